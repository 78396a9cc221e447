use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use calc_catalog::config::SiteConfig;
use calc_catalog::server::create_server;
use calc_catalog::Catalog;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;
use tower::ServiceExt;

const BASE: &str = "https://calc.example.com";

fn app() -> Router {
    let site = SiteConfig {
        name: "Calc Hub".to_string(),
        base_url: BASE.to_string(),
    };
    let catalog = Catalog::builtin(site).expect("built-in catalog loads");
    create_server(Arc::new(catalog))
}

async fn get(uri: &str) -> Result<(StatusCode, Option<String>, String)> {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = hyper::body::to_bytes(response.into_body()).await?;
    Ok((status, content_type, String::from_utf8(bytes.to_vec())?))
}

#[tokio::test]
async fn test_sitemap_endpoint() -> Result<()> {
    let (status, content_type, body) = get("/sitemap.xml").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/xml"));

    let catalog = Catalog::builtin(SiteConfig::default())?;
    let expected = 1 + catalog.registry().list_categories().len() + catalog.registry().len();

    let mut reader = Reader::from_str(&body);
    let mut urls = 0;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"url" => urls += 1,
            Ok(Event::Eof) => break,
            Err(e) => panic!("malformed sitemap: {}", e),
            _ => {}
        }
    }
    assert_eq!(urls, expected);
    assert!(body.contains("<loc>https://calc.example.com/calculators/ohms-law</loc>"));
    assert!(body.contains("<loc>https://calc.example.com/category/wire-cable</loc>"));
    Ok(())
}

#[tokio::test]
async fn test_robots_endpoint() -> Result<()> {
    let (status, content_type, body) = get("/robots.txt").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain"));
    assert_eq!(
        body,
        "User-agent: *\nAllow: /\n\nSitemap: https://calc.example.com/sitemap.xml"
    );
    Ok(())
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (status, _, body) = get("/health").await?;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body)?;
    assert_eq!(json["status"], "healthy");
    assert!(json["calculators"].as_u64().unwrap() > 0);
    Ok(())
}

#[tokio::test]
async fn test_calculator_lookup_and_not_found() -> Result<()> {
    let (status, _, body) = get("/api/calculators/ohms-law").await?;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body)?;
    assert_eq!(json["category"], "Electrical");
    assert_eq!(json["path"], "/calculators/ohms-law");
    assert_eq!(json["icon"], "Zap");

    let (status, _, _) = get("/api/calculators/flux-capacitor").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_calculator_search() -> Result<()> {
    let (status, _, body) = get("/api/calculators?q=battery").await?;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body)?;
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["id"].as_str())
        .collect();
    assert!(ids.contains(&"battery-life"));
    assert!(!ids.contains(&"ohms-law"));
    Ok(())
}

#[tokio::test]
async fn test_seo_endpoint() -> Result<()> {
    let (status, _, body) = get("/api/calculators/velocity/seo").await?;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body)?;

    let metadata = &json["metadata"];
    assert_eq!(
        metadata["title"],
        "Velocity - Free General Science Calculator | Calc Hub"
    );
    assert_eq!(
        metadata["canonical_url"],
        "https://calc.example.com/calculators/velocity"
    );
    let crumbs = metadata["breadcrumbs"].as_array().unwrap();
    assert_eq!(crumbs.len(), 3);
    assert_eq!(crumbs[1]["url"], "https://calc.example.com/category/general-science");

    let blocks = json["structured_data"].as_array().unwrap();
    assert_eq!(blocks[0]["@type"], "SoftwareApplication");
    assert_eq!(blocks[1]["@type"], "BreadcrumbList");

    let (status, _, _) = get("/api/calculators/nope/seo").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_seo_override_is_served() -> Result<()> {
    let (_, _, body) = get("/api/calculators/voltage-drop/seo").await?;
    let json: Value = serde_json::from_str(&body)?;
    assert_eq!(
        json["metadata"]["title"],
        "Voltage Drop Calculator - Cable Sizing Tool | Engineering Calculators"
    );
    // Description has no override for this id and is derived.
    assert!(json["metadata"]["description"]
        .as_str()
        .unwrap()
        .starts_with("Free Voltage Drop calculator."));
    Ok(())
}

#[tokio::test]
async fn test_category_endpoints() -> Result<()> {
    let (status, _, body) = get("/api/categories").await?;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body)?;
    let first = &json.as_array().unwrap()[0];
    assert_eq!(first["name"], "Electrical");
    assert_eq!(first["slug"], "electrical");
    assert_eq!(first["url"], "https://calc.example.com/category/electrical");

    let (status, _, body) = get("/api/categories/wire-cable").await?;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body)?;
    assert_eq!(json["metadata"]["category"], "Wire & Cable");
    let calculators = json["calculators"].as_array().unwrap();
    assert!(calculators.iter().all(|c| c["category"] == "Wire & Cable"));

    let (status, _, _) = get("/api/categories/astrology").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
