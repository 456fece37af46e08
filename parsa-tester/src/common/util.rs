use chrono::{DateTime, SecondsFormat, Utc};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Timestamp stamped on generated reports, e.g. `2025-05-01T12:00:00Z`.
pub fn report_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
