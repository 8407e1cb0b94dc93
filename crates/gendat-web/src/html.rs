//! HTML page generation.
//!
//! Pages are written with `quick-xml`'s writer, so every text node and
//! attribute value is escaped on the way out. The first write failure is
//! kept and reported by [`Page::finish`]; later writes become no-ops.

use std::io::Cursor;

use gendat_core::person::PersonLink;
use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::Error;

// ─── Table cells ─────────────────────────────────────────────────────────────

/// One `<td>` of a table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
  Empty,
  Text(String),
  Link { href: String, text: String },
  Label { for_id: String, text: String },
  /// A single-line text input whose `id` equals its `name`.
  Input { name: String, value: String },
}

impl Cell {
  pub fn text(s: impl Into<String>) -> Self { Cell::Text(s.into()) }

  /// Text when present, otherwise an empty cell.
  pub fn opt(s: Option<&str>) -> Self {
    s.map_or(Cell::Empty, |s| Cell::Text(s.to_string()))
  }

  pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
    Cell::Link { href: href.into(), text: text.into() }
  }

  /// A genealogy person: linked when known, the bare id otherwise.
  pub fn person(person: &PersonLink) -> Self {
    match &person.url {
      Some(url) => Cell::link(url, person.text()),
      None => Cell::text(person.text()),
    }
  }
}

// ─── Page builder ────────────────────────────────────────────────────────────

pub struct Page {
  writer: Writer<Cursor<Vec<u8>>>,
  error:  Option<String>,
}

impl Page {
  /// Start a document: doctype, head with `title` and `stylesheet`, and an
  /// open `<body>`.
  pub fn new(title: &str, stylesheet: &str) -> Self {
    let mut page = Self { writer: Writer::new(Cursor::new(Vec::new())), error: None };
    page.event(Event::DocType(BytesText::from_escaped("html")));
    page.start("html", &[("lang", "en")]);
    page.start("head", &[]);
    page.empty("meta", &[("charset", "utf-8")]);
    page.element("title", &[], title);
    page.empty("link", &[("rel", "stylesheet"), ("href", stylesheet)]);
    page.end("head");
    page.start("body", &[]);
    page
  }

  fn event(&mut self, event: Event<'_>) {
    if self.error.is_none()
      && let Err(e) = self.writer.write_event(event)
    {
      self.error = Some(e.to_string());
    }
  }

  pub fn start(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
    self.event(Event::Start(open_tag(tag, attrs)));
    self
  }

  pub fn end(&mut self, tag: &str) -> &mut Self {
    self.event(Event::End(BytesEnd::new(tag)));
    self
  }

  /// A void element such as `<input>` or `<br>`.
  pub fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
    self.event(Event::Empty(open_tag(tag, attrs)));
    self
  }

  pub fn text(&mut self, text: &str) -> &mut Self {
    self.event(Event::Text(BytesText::new(text)));
    self
  }

  /// `<tag attrs>text</tag>`.
  pub fn element(
    &mut self,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
  ) -> &mut Self {
    self.start(tag, attrs).text(text).end(tag)
  }

  pub fn heading(&mut self, text: &str) -> &mut Self {
    self.element("h1", &[], text)
  }

  pub fn paragraph(&mut self, text: &str) -> &mut Self {
    self.element("p", &[], text)
  }

  pub fn link(&mut self, href: &str, text: &str) -> &mut Self {
    self.element("a", &[("href", href)], text)
  }

  /// Render `cell` as one `<td>`.
  pub fn cell(&mut self, cell: &Cell) -> &mut Self {
    self.start("td", &[]);
    match cell {
      Cell::Empty => {}
      Cell::Text(text) => {
        self.text(text);
      }
      Cell::Link { href, text } => {
        self.link(href, text);
      }
      Cell::Label { for_id, text } => {
        self.element("label", &[("for", for_id.as_str())], text);
      }
      Cell::Input { name, value } => {
        self.empty("input", &[
          ("type", "text"),
          ("name", name.as_str()),
          ("id", name.as_str()),
          ("value", value.as_str()),
          ("size", "40"),
        ]);
      }
    }
    self.end("td")
  }

  /// A table with one header row and one `<tr>` per entry of `rows`.
  pub fn table<I>(&mut self, headers: &[&str], rows: I) -> &mut Self
  where
    I: IntoIterator<Item = Vec<Cell>>,
  {
    self.start("table", &[]);
    self.start("tr", &[]);
    for header in headers {
      self.element("th", &[], header);
    }
    self.end("tr");
    for row in rows {
      self.start("tr", &[]);
      for cell in &row {
        self.cell(cell);
      }
      self.end("tr");
    }
    self.end("table")
  }

  pub fn form(&mut self, action: &str) -> &mut Self {
    self.start("form", &[("method", "post"), ("action", action)])
  }

  pub fn hidden(&mut self, name: &str, value: &str) -> &mut Self {
    self.empty("input", &[("type", "hidden"), ("name", name), ("value", value)])
  }

  pub fn submit(&mut self, label: &str) -> &mut Self {
    self.empty("input", &[("type", "submit"), ("name", "submit"), ("value", label)])
  }

  /// Clears a form by posting it without running the browser's field checks.
  pub fn reset(&mut self, label: &str) -> &mut Self {
    self.empty("input", &[
      ("type", "submit"),
      ("formnovalidate", "formnovalidate"),
      ("name", "reset"),
      ("value", label),
    ])
  }

  /// A labelled single-line text input.
  pub fn text_field(&mut self, name: &str, label: &str, value: &str) -> &mut Self {
    self.labelled_input(name, label, value, &[])
  }

  /// A text input the browser will not submit empty.
  pub fn required_field(&mut self, name: &str, label: &str, value: &str) -> &mut Self {
    self.labelled_input(name, label, value, &[("required", "required")])
  }

  fn labelled_input(
    &mut self,
    name: &str,
    label: &str,
    value: &str,
    extra: &[(&str, &str)],
  ) -> &mut Self {
    self.element("label", &[("for", name)], label);
    let mut attrs = vec![("type", "text"), ("name", name), ("id", name), ("value", value)];
    attrs.extend_from_slice(extra);
    self.empty("input", &attrs)
  }

  /// A drop-down whose option values are the indexes of `options`.
  pub fn select(
    &mut self,
    name: &str,
    options: &[&str],
    selected: usize,
  ) -> &mut Self {
    self.start("select", &[("name", name), ("id", name)]);
    for (i, option) in options.iter().enumerate() {
      let value = i.to_string();
      let mut attrs = vec![("value", value.as_str())];
      if i == selected {
        attrs.push(("selected", "selected"));
      }
      self.element("option", &attrs, option);
    }
    self.end("select")
  }

  /// Close the document and return it.
  pub fn finish(mut self) -> Result<String, Error> {
    self.end("body").end("html");
    if let Some(e) = self.error {
      return Err(Error::Render(e));
    }
    let bytes = self.writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| Error::Render(e.to_string()))
  }
}

fn open_tag<'a>(tag: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
  let mut start = BytesStart::new(tag);
  for attr in attrs {
    start.push_attribute(*attr);
  }
  start
}
