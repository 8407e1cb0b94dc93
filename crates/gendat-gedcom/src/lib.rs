//! GEDCOM fragment extraction for GenDat.
//!
//! PhpGedView stores each individual as one raw GEDCOM record. GenDat only
//! needs a narrow slice of it (birth and death facts, the family an
//! individual is a child of), so rather than parsing whole files this crate
//! pulls single nested tag values out of one record. Pure synchronous; no
//! HTTP or database dependencies.
//!
//! # Quick start
//!
//! ```
//! use gendat_gedcom::{extract_tag, extract_xref};
//!
//! let indi = "0 @I1@ INDI\n1 BIRT\n2 DATE 1 JAN 1900\n1 FAMC @F7@\n";
//! assert_eq!(extract_tag(indi, &["BIRT", "DATE"]), Some("1 JAN 1900"));
//! assert_eq!(extract_xref(indi, "FAMC"), Some("F7"));
//! ```
//!
//! Malformed or absent input never errors: every lookup simply yields
//! `None`, which callers treat as "fact not recorded".

mod parse;

pub use parse::{extract_tag, extract_xref};
