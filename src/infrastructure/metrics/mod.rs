//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Blog views and blog mutations by operation
//! - Signup / signin attempts by outcome

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "blog_api";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Successful single-blog reads (each one bumped a read_count)
pub static BLOG_VIEWS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("blog_views_total", "Total number of counted blog views").namespace(NAMESPACE),
    )
    .expect("Failed to create BLOG_VIEWS_TOTAL metric")
});

/// Blog mutations by operation (create, update, publish, unpublish, delete)
pub static BLOG_MUTATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("blog_mutations_total", "Total number of blog mutations").namespace(NAMESPACE),
        &["operation"],
    )
    .expect("Failed to create BLOG_MUTATIONS_TOTAL metric")
});

/// Authentication attempts by operation and outcome
pub static AUTH_ATTEMPTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("auth_attempts_total", "Total number of signup and signin attempts")
            .namespace(NAMESPACE),
        &["operation", "outcome"],
    )
    .expect("Failed to create AUTH_ATTEMPTS_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(BLOG_VIEWS_TOTAL.clone()))
        .expect("Failed to register BLOG_VIEWS_TOTAL");
    registry
        .register(Box::new(BLOG_MUTATIONS_TOTAL.clone()))
        .expect("Failed to register BLOG_MUTATIONS_TOTAL");
    registry
        .register(Box::new(AUTH_ATTEMPTS_TOTAL.clone()))
        .expect("Failed to register AUTH_ATTEMPTS_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn record_blog_view() {
    BLOG_VIEWS_TOTAL.inc();
}

pub fn record_blog_mutation(operation: &str) {
    BLOG_MUTATIONS_TOTAL.with_label_values(&[operation]).inc();
}

pub fn record_auth_attempt(operation: &str, outcome: &str) {
    AUTH_ATTEMPTS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}
