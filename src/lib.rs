//! # smaplink
//!
//! This crate moves source maps of generated JavaScript and CSS files between two forms:
//!
//! - **inline**: the map is base64-encoded into a trailing
//!   `//# sourceMappingURL=data:application/json;base64,...` comment;
//! - **external**: the map lives in its own file and the trailing comment only names it.
//!
//! ## Getting Started
//!
//! ```ignore
//! use smaplink::{embed, extract, split_lines, EmbedOptions};
//!
//! // Move the inline map of a bundle out into `bundle.js.map`
//! let extracted = extract(split_lines(&bundle), "bundle.js.map")?;
//! fs::write("bundle.js.map", extracted.map.to_pretty()?)?;
//!
//! // And put it back
//! let lines = embed(extracted.lines, extracted.map, &EmbedOptions::default())?;
//! ```
//!
//! ## Overview
//!
//! ### `recognize`
//!
//! [recognize] parses one trailing comment line into a [SourceMapComment]. It accepts both the
//! `//# ` and the `/*# ... */` syntax, every common spelling of an ASCII/UTF-8 charset
//! declaration, and only canonically padded base64. [SourceMapComment::format] writes the
//! comment back in its simplest form.
//!
//! ### `embed` and `extract`
//!
//! [embed] replaces any trailing source map comment with an inline one. [extract] turns an inline
//! comment into a reference to an external file and hands back the decoded [SourceMapJson].
//! Both work on lines in memory; reading and writing files is up to the caller.
//!
//! ### `SourceMapJson`
//!
//! [SourceMapJson] is the map as an opaque JSON object. The `file` key is always dropped on the
//! way in and on the way out, every other key is kept as is.
//!
//! ## Features
//!
//! - `cli` (default): builds the `smaplink` binary.
//!

mod alphabet;
mod charset;
mod comment;
mod error;
mod json;
mod lines;
pub mod payload;
pub mod selftest;
mod transform;

pub use charset::*;
pub use comment::*;
pub use error::*;
pub use json::*;
pub use lines::*;
pub use transform::*;
