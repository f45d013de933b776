use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static ACCOUNTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("ledger_accounts_created_total", "Total accounts created")
        .expect("register accounts_created_total")
});

pub static ACCOUNTS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("ledger_accounts_deleted_total", "Total accounts deleted")
        .expect("register accounts_deleted_total")
});

pub static PAYMENTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("ledger_payments_created_total", "Total payments created")
        .expect("register payments_created_total")
});

pub static STORAGE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "ledger_storage_errors_total",
        "Total requests that failed on table file i/o"
    )
    .expect("register storage_errors_total")
});

/// Touch every counter so they show up in the exposition before first use.
pub fn init_metrics() {
    Lazy::force(&ACCOUNTS_CREATED_TOTAL);
    Lazy::force(&ACCOUNTS_DELETED_TOTAL);
    Lazy::force(&PAYMENTS_CREATED_TOTAL);
    Lazy::force(&STORAGE_ERRORS_TOTAL);
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
