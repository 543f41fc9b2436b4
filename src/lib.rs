//! # vue-style-flatten
//!
//! Rewrites `&`-nested selectors in the `<style lang="css" scoped>` block of
//! a Vue single-file component into flat, plain CSS selectors.
//!
//! The set of selectors is closed: see [`rules::LITERAL_RULES`] and
//! [`rules::REGEX_RULES`]. Everything outside the style block is written
//! back byte for byte.
//!
//! ```no_run
//! use std::path::Path;
//! use vue_style_flatten::{flatten_file, Outcome};
//!
//! fn main() -> vue_style_flatten::Result<()> {
//!     let outcome = flatten_file(Path::new("index.vue"), None)?;
//!     if let Outcome::Flattened(report) = &outcome {
//!         println!("{} rule(s) never fired", report.skipped.len());
//!     }
//!     println!("{}", outcome.message());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod flatten;
pub mod rules;

pub use error::{Error, Result};
pub use flatten::{
    flatten_document, flatten_file, flatten_style_block, locate_style_block, FlattenReport,
    Outcome, DEFAULT_TARGET, STYLE_CLOSE, STYLE_OPEN,
};
pub use rules::RuleSet;
