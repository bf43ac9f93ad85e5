//! Format implementations
//!
//! Each module turns a batch of rendered cards into one output document.

pub mod html;
pub mod json;
pub mod tsv;

pub use html::{HtmlFormat, PreviewOptions};
pub use json::JsonFormat;
pub use tsv::TsvFormat;
