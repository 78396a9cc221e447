use std::collections::HashMap;

use serde::Deserialize;

use crate::catalog::Registry;
use crate::error::{IntegrityViolation, Result};

const BUILTIN_OVERRIDES: &str = include_str!("../../data/seo_overrides.toml");

/// Hand-written replacements for individual derived SEO fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeoOverride {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
}

/// Sparse per-calculator override table keyed by calculator id.
#[derive(Debug, Clone, Default)]
pub struct SeoOverrides {
    entries: HashMap<String, SeoOverride>,
}

impl SeoOverrides {
    pub fn new(entries: HashMap<String, SeoOverride>) -> Self {
        Self { entries }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let entries: HashMap<String, SeoOverride> = toml::from_str(source)?;
        Ok(Self::new(entries))
    }

    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_OVERRIDES)
    }

    pub fn get(&self, id: &str) -> Option<&SeoOverride> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Override entries that point at no calculator in `registry`, sorted by id.
    pub fn unknown_ids(&self, registry: &Registry) -> Vec<IntegrityViolation> {
        let mut unknown: Vec<&String> = self
            .entries
            .keys()
            .filter(|id| registry.find_by_id(id).is_none())
            .collect();
        unknown.sort();
        unknown
            .into_iter()
            .map(|id| IntegrityViolation::UnknownOverride(id.clone()))
            .collect()
    }
}
