//! Wall clock in Unix milliseconds

/// Current time (Unix milliseconds)
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
