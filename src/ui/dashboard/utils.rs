//! Dashboard utility functions

use crate::events::Source;
use ratatui::prelude::Color;

/// Get a ratatui color for an event source
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Login => Color::Yellow,
        Source::AuthClient => Color::Cyan,
        Source::Router => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some((date_part, time_part)) = timestamp.split_once(' ') {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Human readable "1h 05m" / "4m 10s" / "12s".
pub fn format_duration_short(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    if secs >= 3600 {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_timestamp_drops_year_and_seconds() {
        assert_eq!(format_compact_timestamp("2026-10-15 09:41:07"), "10-15 09:41");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn short_durations() {
        assert_eq!(format_duration_short(12), "12s");
        assert_eq!(format_duration_short(250), "4m 10s");
        assert_eq!(format_duration_short(3900), "1h 05m");
        assert_eq!(format_duration_short(-3), "0s");
    }
}
