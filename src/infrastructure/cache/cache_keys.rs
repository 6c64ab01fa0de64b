use chrono::NaiveDate;

/// `generation` is the service's write counter; `day` pins now-relative
/// periods to the calendar day they were computed on.
pub fn dashboard_key(generation: u64, period: &str, day: NaiveDate) -> String {
    format!("dashboard:{}:{}:{}", generation, period, day)
}

pub fn client_profile_key(generation: u64, client_id: &str, sort_by: &str, sort_order: &str) -> String {
    format!("client_profile:{}:{}:{}:{}", generation, client_id, sort_by, sort_order)
}
