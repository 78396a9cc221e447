//! Public-facing page metadata derived from the calculator registry.
//!
//! Everything here is recomputed per lookup from the immutable registry plus
//! the sparse override table; nothing is cached.

mod deriver;
mod overrides;
pub mod structured_data;

pub(crate) use deriver::category_url;
pub use deriver::{Breadcrumb, CategoryMetadata, MetaTag, SeoDeriver, SeoMetadata};
pub use overrides::{SeoOverride, SeoOverrides};

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Slug for a category name: lower-cased, `" & "` collapsed to one hyphen,
/// remaining whitespace runs replaced by hyphens.
pub fn category_slug(name: &str) -> String {
    let lowered = name.to_lowercase().replace(" & ", "-");
    WHITESPACE.replace_all(&lowered, "-").into_owned()
}
