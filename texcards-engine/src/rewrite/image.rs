//! Image directives
//!
//! `\includegraphics[..]{path}` and the `\cimg{path}` shorthand both become an `<img>` whose
//! source is whatever the resolver hands back. A failed resolution drops the image.

use super::Context;
use crate::split::group;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Group 1 is the path as written.
pub static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\(?:includegraphics\*?(?:\[[^\]]*\])?|cimg)\{([^{}]*)\}")
        .expect("image pattern is valid")
});

pub fn image(caps: &Captures<'_>, ctx: &mut Context<'_>) -> String {
    let path = group(caps, 1).trim();
    match ctx.resolver.resolve(path) {
        Ok(reference) => format!(
            r#"<img src="{}" />"#,
            html_escape::encode_double_quoted_attribute(&reference)
        ),
        Err(err) => {
            tracing::warn!(path, error = %err, "image could not be resolved, dropping it");
            String::new()
        }
    }
}
