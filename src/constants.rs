/// Site defaults used when no config file or environment override is present.
pub const DEFAULT_SITE_NAME: &str = "Engineering Calculators";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_METRICS_PORT: u16 = 9898;

// Environment variables
pub const ENV_CONFIG_PATH: &str = "CALC_CONFIG";
pub const ENV_BASE_URL: &str = "CALC_BASE_URL";
pub const ENV_SITE_NAME: &str = "CALC_SITE_NAME";
pub const ENV_PORT: &str = "PORT";
pub const ENV_METRICS_PORT: &str = "CALC_METRICS_PORT";

/// Sitemap protocol namespace for `<urlset>`.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// Sitemap priorities per page kind
pub const HOMEPAGE_PRIORITY: f32 = 1.0;
pub const CATEGORY_PRIORITY: f32 = 0.8;
pub const CALCULATOR_PRIORITY: f32 = 0.7;

/// Path prefix for category listing pages.
pub const CATEGORY_PATH_PREFIX: &str = "/category/";
