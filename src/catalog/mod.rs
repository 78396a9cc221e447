pub mod registry;
pub mod types;

pub use registry::Registry;
pub use types::{CalculatorDescriptor, Category, CategoryGroup, Icon};

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::error::{CatalogError, Result};
use crate::seo::{SeoDeriver, SeoOverrides};

/// Registry plus everything derived from it, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Catalog {
    registry: Arc<Registry>,
    seo: SeoDeriver,
}

impl Catalog {
    pub fn new(registry: Registry, overrides: SeoOverrides, site: SiteConfig) -> Self {
        let registry = Arc::new(registry);
        let seo = SeoDeriver::new(registry.clone(), overrides, site);
        Self { registry, seo }
    }

    /// Built-in registry and override table. Override ids that match no
    /// calculator fail the load.
    pub fn builtin(site: SiteConfig) -> Result<Self> {
        let registry = Registry::builtin()?;
        let overrides = SeoOverrides::builtin()?;
        let violations = overrides.unknown_ids(&registry);
        if !violations.is_empty() {
            return Err(CatalogError::Integrity(violations));
        }
        Ok(Self::new(registry, overrides, site))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn seo(&self) -> &SeoDeriver {
        &self.seo
    }

    pub fn site(&self) -> &SiteConfig {
        self.seo.site()
    }
}
