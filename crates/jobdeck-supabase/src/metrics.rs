//! Request metrics for the PostgREST client.

/// Metric names.
pub mod names {
    pub const REQUESTS_TOTAL: &str = "supabase_requests_total";
    pub const REQUEST_LATENCY_MS: &str = "supabase_request_latency_ms";
}

/// Record one completed request.
pub fn record_request(operation: &'static str, table: &str, status: u16, latency_ms: f64) {
    metrics::counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation,
        "table" => table.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        names::REQUEST_LATENCY_MS,
        "operation" => operation,
        "table" => table.to_string()
    )
    .record(latency_ms);
}
