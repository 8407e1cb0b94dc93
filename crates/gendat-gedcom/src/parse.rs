//! Level-numbered line scanner.
//!
//! Pipeline:
//!   raw &str
//!     └─ scan_lines()   → Vec<Line>   (byte offsets into the input)
//!          └─ find()    → matched span + the deeper lines beneath it
//!               └─ repeated once per tag in the path

// ─── Line representation ─────────────────────────────────────────────────────

struct Line<'a> {
  /// Byte offset of the first character of the line.
  start:       usize,
  /// `None` for a line that does not begin with a level number.
  level:       Option<u32>,
  tag:         &'a str,
  /// Byte offset just past the tag; the line's value starts here.
  value_start: usize,
}

/// Split `text` into lines, recording each line's level, tag, and offsets.
/// Tolerates CRLF line endings and leading indentation.
fn scan_lines(text: &str) -> Vec<Line<'_>> {
  let mut lines = Vec::new();
  let mut start = 0usize;
  for raw in text.split('\n') {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    lines.push(parse_line(line, start));
    start += raw.len() + 1;
  }
  lines
}

fn parse_line(line: &str, start: usize) -> Line<'_> {
  let unknown = Line { start, level: None, tag: "", value_start: start };

  let body = line.trim_start();
  let mut pos = line.len() - body.len();

  let digits = body.bytes().take_while(u8::is_ascii_digit).count();
  let Ok(level) = body[..digits].parse::<u32>() else {
    return unknown;
  };
  let rest = &body[digits..];
  if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
    return unknown;
  }
  pos += digits;

  let (mut token, mut token_at) = next_token(line, pos);
  // Level-0 records carry their own cross-reference id before the tag.
  if token.starts_with('@') {
    (token, token_at) = next_token(line, token_at + token.len());
  }

  Line {
    start,
    level: Some(level),
    tag: token,
    value_start: start + token_at + token.len(),
  }
}

/// The next whitespace-delimited token at or after `from`, with its offset.
fn next_token(line: &str, from: usize) -> (&str, usize) {
  let rest = &line[from..];
  let skipped = rest.len() - rest.trim_start().len();
  let at = from + skipped;
  let len = line[at..]
    .find(char::is_whitespace)
    .unwrap_or(line.len() - at);
  (&line[at..at + len], at)
}

// ─── Matching ────────────────────────────────────────────────────────────────

/// Find the first line at `level` tagged `tag` among `lines`, which end at
/// byte offset `scope_end`.
///
/// Returns the captured byte range (from just after the tag up to the next
/// line at `level` or shallower, or the end of the scope) and the deeper
/// lines inside that range.
fn find<'l, 'a>(
  scope_end: usize,
  lines: &'l [Line<'a>],
  level: u32,
  tag: &str,
) -> Option<(usize, usize, &'l [Line<'a>])> {
  let i = lines
    .iter()
    .position(|l| l.level == Some(level) && l.tag == tag)?;

  let end_idx = lines[i + 1..]
    .iter()
    .position(|l| l.level.is_some_and(|lv| lv <= level))
    .map_or(lines.len(), |off| i + 1 + off);

  let end = lines.get(end_idx).map_or(scope_end, |l| l.start);
  Some((lines[i].value_start, end, &lines[i + 1..end_idx]))
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Extract the value of a nested tag from one GEDCOM record.
///
/// `path[0]` is matched against level-1 lines, `path[1]` against level-2
/// lines inside the first match, and so on. The first matching line wins at
/// every level. The result is everything after the deepest tag up to the next
/// line at the same or a shallower level, trimmed. Any unmatched step, or an
/// empty path, yields `None`.
///
/// ```
/// # use gendat_gedcom::extract_tag;
/// let indi = "0 INDI\n1 DEAT\n2 PLAC Truro\n";
/// assert_eq!(extract_tag(indi, &["DEAT", "PLAC"]), Some("Truro"));
/// assert_eq!(extract_tag(indi, &["DEAT", "DATE"]), None);
/// ```
pub fn extract_tag<'a>(text: &'a str, path: &[&str]) -> Option<&'a str> {
  let lines = scan_lines(text);
  let mut scope: &[Line<'_>] = &lines;
  let mut span = None;
  let mut scope_end = text.len();

  for (depth, tag) in path.iter().enumerate() {
    let level = u32::try_from(depth + 1).ok()?;
    let (start, end, inner) = find(scope_end, scope, level, tag)?;
    span = Some((start, end));
    scope = inner;
    scope_end = end;
  }

  let (start, end) = span?;
  Some(text[start..end].trim())
}

/// Extract the cross-reference id held by a level-1 tag, e.g. `F123` from
/// `1 FAMC @F123@`. Returns `None` when the tag is absent or its value is
/// not an `@…@` pointer.
pub fn extract_xref<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
  let value = extract_tag(text, &[tag])?;
  let (inner, _) = value.strip_prefix('@')?.split_once('@')?;
  if inner.is_empty() || inner.contains(char::is_whitespace) {
    return None;
  }
  Some(inner)
}
