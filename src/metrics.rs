//! Counters for catalog lookups and sitemap generation.
//!
//! Recording goes through the `metrics` facade and is a no-op until an
//! exporter is installed with [`init_metrics`].

use std::net::SocketAddr;
use tracing::{info, warn};

pub const SITEMAP_GENERATED_TOTAL: &str = "calc_sitemap_generated_total";
pub const SITEMAP_ENTRIES: &str = "calc_sitemap_entries";
pub const SEO_LOOKUPS_TOTAL: &str = "calc_seo_lookups_total";
pub const HTTP_REQUESTS_TOTAL: &str = "calc_http_requests_total";

/// Install the Prometheus exporter on `0.0.0.0:{port}`.
pub fn init_metrics(port: u16) {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            info!("Prometheus exporter listening on http://{}/metrics", addr);
        }
        Err(e) => {
            warn!("Prometheus exporter install failed (possibly already installed): {}", e);
        }
    }
}

pub fn record_sitemap_generated(entries: usize) {
    ::metrics::counter!(SITEMAP_GENERATED_TOTAL).increment(1);
    ::metrics::gauge!(SITEMAP_ENTRIES).set(entries as f64);
}

pub fn record_seo_lookup(found: bool) {
    let result = if found { "hit" } else { "miss" };
    ::metrics::counter!(SEO_LOOKUPS_TOTAL, "result" => result).increment(1);
}

pub fn record_http_request(route: &'static str) {
    ::metrics::counter!(HTTP_REQUESTS_TOTAL, "route" => route).increment(1);
}
