use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::overrides::{SeoOverride, SeoOverrides};
use crate::catalog::{CalculatorDescriptor, Category, Registry};
use crate::config::SiteConfig;
use crate::constants::CATEGORY_PATH_PREFIX;
use crate::metrics;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

/// Head metadata for one calculator page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoMetadata {
    pub calculator_id: String,
    pub site_name: String,
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical_url: String,
    /// Home, category, calculator. Always exactly three.
    pub breadcrumbs: [Breadcrumb; 3],
}

/// Head metadata for a category listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMetadata {
    pub category: Category,
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub breadcrumbs: [Breadcrumb; 2],
}

/// A `<meta>` element as data: `name`/`property` attribute plus content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub attribute: &'static str,
    pub key: &'static str,
    pub content: String,
}

impl MetaTag {
    fn name(key: &'static str, content: impl Into<String>) -> Self {
        Self {
            attribute: "name",
            key,
            content: content.into(),
        }
    }

    fn property(key: &'static str, content: impl Into<String>) -> Self {
        Self {
            attribute: "property",
            key,
            content: content.into(),
        }
    }
}

impl SeoMetadata {
    /// Description, keywords, Open Graph and Twitter card tags.
    pub fn meta_tags(&self) -> Vec<MetaTag> {
        vec![
            MetaTag::name("description", &self.description),
            MetaTag::name("keywords", &self.keywords),
            MetaTag::property("og:title", &self.title),
            MetaTag::property("og:description", &self.description),
            MetaTag::property("og:url", &self.canonical_url),
            MetaTag::property("og:type", "website"),
            MetaTag::property("og:site_name", &self.site_name),
            MetaTag::name("twitter:card", "summary"),
            MetaTag::name("twitter:title", &self.title),
            MetaTag::name("twitter:description", &self.description),
        ]
    }
}

/// Derives page metadata from registry entries and the override table.
#[derive(Debug, Clone)]
pub struct SeoDeriver {
    registry: Arc<Registry>,
    overrides: SeoOverrides,
    site: SiteConfig,
}

impl SeoDeriver {
    pub fn new(registry: Arc<Registry>, overrides: SeoOverrides, site: SiteConfig) -> Self {
        Self {
            registry,
            overrides,
            site,
        }
    }

    /// Metadata for `calculator_id`, or `None` when the registry has no such id.
    pub fn derive(&self, calculator_id: &str) -> Option<SeoMetadata> {
        let Some(calc) = self.registry.find_by_id(calculator_id) else {
            metrics::record_seo_lookup(false);
            debug!(calculator_id, "Skipping SEO metadata for unknown calculator");
            return None;
        };
        metrics::record_seo_lookup(true);

        let empty = SeoOverride::default();
        let overrides = self.overrides.get(calculator_id).unwrap_or(&empty);

        let title = overrides
            .title
            .clone()
            .unwrap_or_else(|| self.default_title(calc));
        let description = overrides
            .description
            .clone()
            .unwrap_or_else(|| default_description(calc));
        let keywords = overrides
            .keywords
            .clone()
            .unwrap_or_else(|| default_keywords(calc));
        let canonical_url = format!("{}{}", self.site.base_url, calc.path);

        let breadcrumbs = [
            self.home_breadcrumb(),
            self.category_breadcrumb(calc.category),
            Breadcrumb {
                name: calc.title.clone(),
                url: canonical_url.clone(),
            },
        ];

        Some(SeoMetadata {
            calculator_id: calc.id.clone(),
            site_name: self.site.name.clone(),
            title,
            description,
            keywords,
            canonical_url,
            breadcrumbs,
        })
    }

    pub fn derive_category(&self, category: Category) -> CategoryMetadata {
        let titles: Vec<&str> = self
            .registry
            .filter_by_category(category)
            .into_iter()
            .map(|c| c.title.as_str())
            .collect();

        let category_crumb = self.category_breadcrumb(category);
        CategoryMetadata {
            category,
            title: format!("{} Calculators | {}", category, self.site.name),
            description: format!(
                "Free online {} calculators: {}.",
                category,
                titles.join(", ")
            ),
            canonical_url: category_crumb.url.clone(),
            breadcrumbs: [self.home_breadcrumb(), category_crumb],
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    fn default_title(&self, calc: &CalculatorDescriptor) -> String {
        format!(
            "{} - Free {} Calculator | {}",
            calc.title, calc.category, self.site.name
        )
    }

    fn home_breadcrumb(&self) -> Breadcrumb {
        Breadcrumb {
            name: "Home".to_string(),
            url: self.site.base_url.clone(),
        }
    }

    fn category_breadcrumb(&self, category: Category) -> Breadcrumb {
        Breadcrumb {
            name: category.name().to_string(),
            url: category_url(&self.site.base_url, category),
        }
    }
}

pub(crate) fn category_url(base_url: &str, category: Category) -> String {
    format!("{}{}{}", base_url, CATEGORY_PATH_PREFIX, category.slug())
}

fn default_description(calc: &CalculatorDescriptor) -> String {
    format!(
        "Free {} calculator. {} Professional {} calculation tool with formulas and examples.",
        calc.title, calc.description, calc.category
    )
}

fn default_keywords(calc: &CalculatorDescriptor) -> String {
    let name = calc.title.to_lowercase();
    let category = calc.category.name().to_lowercase();
    [
        name.clone(),
        format!("{} calculator", name),
        format!("{} calculator", category),
        format!("{} formula", name),
        format!("calculate {}", name),
        format!("{} online calculator", name),
        format!("free {} calculator", name),
    ]
    .join(", ")
}
