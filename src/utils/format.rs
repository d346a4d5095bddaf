// src/utils/format.rs

use chrono::{DateTime, Utc};

/// Compact view counter: `45823` -> `"45.8K"`, `1200000` -> `"1.2M"`.
pub fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{:.1}M", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{:.1}K", views as f64 / 1_000.0)
    } else {
        views.to_string()
    }
}

/// Coarse "n days ago" label relative to `now`, counted in whole days.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - then).num_days().unsigned_abs();

    match days {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        d if d < 30 => format!("{} days ago", d),
        d if d < 365 => format!("{} months ago", d / 30),
        d => format!("{} years ago", d / 365),
    }
}
