//! Sitemap protocol document built from the registry.
//!
//! Entry order is fixed: homepage, one entry per distinct category, then one
//! entry per calculator in registry order. Every entry is stamped with the
//! generation date.

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::catalog::Registry;
use crate::constants::{
    CALCULATOR_PRIORITY, CATEGORY_PRIORITY, HOMEPAGE_PRIORITY, SITEMAP_NAMESPACE,
};
use crate::error::{CatalogError, Result};
use crate::metrics;
use crate::seo::category_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub location: String,
    pub last_modified: NaiveDate,
    pub change_frequency: ChangeFrequency,
    /// In `[0.0, 1.0]`.
    pub priority: f32,
}

/// Build the full entry list for `today`.
pub fn generate(registry: &Registry, base_url: &str, today: NaiveDate) -> Vec<SitemapEntry> {
    let categories = registry.list_categories();
    let mut entries = Vec::with_capacity(1 + categories.len() + registry.len());

    entries.push(SitemapEntry {
        location: base_url.to_string(),
        last_modified: today,
        change_frequency: ChangeFrequency::Daily,
        priority: HOMEPAGE_PRIORITY,
    });

    entries.extend(categories.into_iter().map(|category| SitemapEntry {
        location: category_url(base_url, category),
        last_modified: today,
        change_frequency: ChangeFrequency::Weekly,
        priority: CATEGORY_PRIORITY,
    }));

    entries.extend(registry.iter().map(|calc| SitemapEntry {
        location: format!("{}{}", base_url, calc.path),
        last_modified: today,
        change_frequency: ChangeFrequency::Monthly,
        priority: CALCULATOR_PRIORITY,
    }));

    debug!(entries = entries.len(), "Generated sitemap entries");
    metrics::record_sitemap_generated(entries.len());
    entries
}

/// `generate` stamped with the current UTC date.
pub fn generate_now(registry: &Registry, base_url: &str) -> Vec<SitemapEntry> {
    generate(registry, base_url, chrono::Utc::now().date_naive())
}

/// Serialize entries as a `<urlset>` document. Text and attributes are XML-escaped.
pub fn render_xml(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(
            BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)]),
        ))
        .map_err(xml_error)?;

    for entry in entries {
        writer
            .write_event(Event::Start(BytesStart::new("url")))
            .map_err(xml_error)?;
        write_text_element(&mut writer, "loc", &entry.location)?;
        write_text_element(
            &mut writer,
            "lastmod",
            &entry.last_modified.format("%Y-%m-%d").to_string(),
        )?;
        write_text_element(&mut writer, "changefreq", entry.change_frequency.as_str())?;
        write_text_element(&mut writer, "priority", &format!("{:.1}", entry.priority))?;
        writer
            .write_event(Event::End(BytesEnd::new("url")))
            .map_err(xml_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .map_err(xml_error)?;

    let mut xml = String::from_utf8(writer.into_inner())
        .map_err(|e| CatalogError::Xml(e.to_string()))?;
    xml.push('\n');
    Ok(xml)
}

/// Plain-text robots policy pointing crawlers at the sitemap.
pub fn robots_txt(base_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml", base_url)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)?;
    Ok(())
}

fn xml_error(err: impl fmt::Display) -> CatalogError {
    CatalogError::Xml(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CalculatorDescriptor, Category, Icon};
    use quick_xml::Reader;

    const BASE: &str = "https://calc.example.com";

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn calc(id: &str, category: Category) -> CalculatorDescriptor {
        CalculatorDescriptor {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            category,
            path: format!("/calculators/{}", id),
            icon: Icon::Calculator,
        }
    }

    fn registry() -> Registry {
        Registry::new(vec![
            calc("ohms-law", Category::Electrical),
            calc("voltage-drop", Category::WireAndCable),
            calc("power", Category::Electrical),
        ])
        .unwrap()
    }

    /// Collect `<loc>` texts, failing on any malformed XML.
    fn parse_locations(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut locations = Vec::new();
        let mut in_loc = false;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => in_loc = e.name().as_ref() == b"loc",
                Ok(Event::End(_)) => in_loc = false,
                Ok(Event::Text(t)) if in_loc => {
                    locations.push(t.unescape().unwrap().into_owned());
                }
                Ok(Event::Eof) => break,
                Err(e) => panic!("malformed sitemap: {}", e),
                _ => {}
            }
        }
        locations
    }

    #[test]
    fn test_entry_order_and_count() {
        let registry = registry();
        let entries = generate(&registry, BASE, day());

        assert_eq!(entries.len(), 1 + 2 + 3);
        let locations: Vec<&str> = entries.iter().map(|e| e.location.as_str()).collect();
        assert_eq!(
            locations,
            vec![
                BASE,
                "https://calc.example.com/category/electrical",
                "https://calc.example.com/category/wire-cable",
                "https://calc.example.com/calculators/ohms-law",
                "https://calc.example.com/calculators/voltage-drop",
                "https://calc.example.com/calculators/power",
            ]
        );
    }

    #[test]
    fn test_priorities_and_frequencies() {
        let entries = generate(&registry(), BASE, day());
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[0].change_frequency, ChangeFrequency::Daily);
        assert_eq!(entries[1].priority, 0.8);
        assert_eq!(entries[1].change_frequency, ChangeFrequency::Weekly);
        assert_eq!(entries[5].priority, 0.7);
        assert_eq!(entries[5].change_frequency, ChangeFrequency::Monthly);
        assert!(entries.iter().all(|e| e.last_modified == day()));
    }

    #[test]
    fn test_rendered_xml_fields() {
        let xml = render_xml(&generate(&registry(), BASE, day())).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<lastmod>2024-03-09</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert_eq!(parse_locations(&xml).len(), 6);
    }

    #[test]
    fn test_empty_registry_has_only_homepage() {
        let entries = generate(&Registry::empty(), BASE, day());
        assert_eq!(entries.len(), 1);

        let xml = render_xml(&entries).unwrap();
        assert_eq!(parse_locations(&xml), vec![BASE.to_string()]);
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let base = "https://calc.example.com/?ref=a&b=<c>";
        let xml = render_xml(&generate(&Registry::empty(), base, day())).unwrap();
        assert!(xml.contains("&amp;"));
        assert!(xml.contains("&lt;c&gt;"));
        assert_eq!(parse_locations(&xml), vec![base.to_string()]);
    }

    #[test]
    fn test_same_day_output_is_identical() {
        let registry = registry();
        let first = render_xml(&generate(&registry, BASE, day())).unwrap();
        let second = render_xml(&generate(&registry, BASE, day())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_robots_txt() {
        assert_eq!(
            robots_txt(BASE),
            "User-agent: *\nAllow: /\n\nSitemap: https://calc.example.com/sitemap.xml"
        );
    }
}
