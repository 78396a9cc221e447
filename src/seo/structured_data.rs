//! schema.org JSON-LD blocks injected into calculator page heads.

use serde_json::{json, Value};

use super::{Breadcrumb, SeoMetadata};
use crate::catalog::CalculatorDescriptor;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// `SoftwareApplication` block describing a free, browser-based calculator.
pub fn software_application(meta: &SeoMetadata, calc: &CalculatorDescriptor) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "SoftwareApplication",
        "name": calc.title,
        "description": meta.description,
        "url": meta.canonical_url,
        "applicationCategory": "UtilitiesApplication",
        "applicationSubCategory": calc.category.name(),
        "operatingSystem": "Any",
        "keywords": meta.keywords,
        "offers": {
            "@type": "Offer",
            "price": "0",
            "priceCurrency": "USD"
        },
        "publisher": {
            "@type": "Organization",
            "name": meta.site_name
        }
    })
}

/// `BreadcrumbList` with 1-based positions in trail order.
pub fn breadcrumb_list(trail: &[Breadcrumb]) -> Value {
    let items: Vec<Value> = trail
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": crumb.name,
                "item": crumb.url
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items
    })
}

/// Both blocks for a calculator page, in head order.
pub fn for_calculator(meta: &SeoMetadata, calc: &CalculatorDescriptor) -> Vec<Value> {
    vec![
        software_application(meta, calc),
        breadcrumb_list(&meta.breadcrumbs),
    ]
}
