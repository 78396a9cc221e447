pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod seo;
pub mod server;
pub mod sitemap;

pub use catalog::{CalculatorDescriptor, Catalog, Category, Registry};
pub use error::{CatalogError, Result};
