//! Time range, step, and timestamp helpers shared by panels and task views.

use chrono::{DateTime, FixedOffset, Utc};
use vigil_api_models::TaskTimestamp;

/// Number of points a panel aims for when the step is automatic.
const TARGET_POINTS: i64 = 240;

/// Epoch values at or above this are treated as milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Time window queried by a panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeRange {
    /// The last `seconds` seconds, relative to now.
    Relative {
        /// Window length in seconds.
        seconds: i64,
    },
    /// A fixed window in unix seconds.
    Absolute {
        /// Window start.
        start: i64,
        /// Window end.
        end: i64,
    },
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::last(3_600)
    }
}

impl TimeRange {
    /// Relative range covering the last `seconds` seconds.
    #[must_use]
    pub const fn last(seconds: i64) -> Self {
        Self::Relative { seconds }
    }

    /// Resolve to `(start, end)` unix seconds against `now`.
    #[must_use]
    pub fn resolve(self, now: i64) -> (i64, i64) {
        match self {
            Self::Relative { seconds } => (now - seconds.max(0), now),
            Self::Absolute { start, end } if start <= end => (start, end),
            Self::Absolute { start, end } => (end, start),
        }
    }

    /// Relative presets offered by the range picker, keyed for translation.
    #[must_use]
    pub const fn presets() -> [(&'static str, Self); 7] {
        [
            ("range.last_5m", Self::last(300)),
            ("range.last_15m", Self::last(900)),
            ("range.last_1h", Self::last(3_600)),
            ("range.last_6h", Self::last(21_600)),
            ("range.last_12h", Self::last(43_200)),
            ("range.last_1d", Self::last(86_400)),
            ("range.last_7d", Self::last(604_800)),
        ]
    }

    /// Stable value for `<select>` controls (`last:<secs>` or `abs:<start>:<end>`).
    #[must_use]
    pub fn as_value(self) -> String {
        match self {
            Self::Relative { seconds } => format!("last:{seconds}"),
            Self::Absolute { start, end } => format!("abs:{start}:{end}"),
        }
    }

    /// Parse a value produced by [`TimeRange::as_value`].
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        let mut parts = value.split(':');
        match (parts.next()?, parts.next(), parts.next(), parts.next()) {
            ("last", Some(seconds), None, None) => seconds.parse().ok().map(Self::last),
            ("abs", Some(start), Some(end), None) => Some(Self::Absolute {
                start: start.parse().ok()?,
                end: end.parse().ok()?,
            }),
            _ => None,
        }
    }
}

/// Fixed step choices offered by the step picker; `None` means automatic.
pub const STEP_OPTIONS: [Option<u32>; 6] = [None, Some(15), Some(30), Some(60), Some(300), Some(600)];

/// Automatic step: roughly [`TARGET_POINTS`] points across the window, at least 1s.
#[must_use]
pub fn default_step(start: i64, end: i64) -> i64 {
    ((end - start) / TARGET_POINTS).max(1)
}

/// Step to send to the query backend.
#[must_use]
pub fn effective_step(step: Option<u32>, start: i64, end: i64) -> i64 {
    step.filter(|value| *value > 0)
        .map_or_else(|| default_step(start, end), i64::from)
}

/// Format a task creation timestamp as `YYYY-MM-DD HH:MM:SS` in the given
/// offset (minutes east of UTC). Unparseable text is returned verbatim.
#[must_use]
pub fn format_task_timestamp(value: Option<&TaskTimestamp>, offset_minutes: i32) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let offset = FixedOffset::east_opt(offset_minutes.saturating_mul(60))
        .or_else(|| FixedOffset::east_opt(0));
    let Some(offset) = offset else {
        return String::new();
    };
    let parsed = match value {
        TaskTimestamp::Epoch(epoch) => {
            let millis = if epoch.abs() >= EPOCH_MILLIS_THRESHOLD {
                *epoch
            } else {
                epoch.saturating_mul(1_000)
            };
            DateTime::<Utc>::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&offset))
        }
        TaskTimestamp::Text(text) => DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|stamp| stamp.with_timezone(&offset)),
    };
    match (parsed, value) {
        (Some(stamp), _) => stamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        (None, TaskTimestamp::Text(text)) => text.clone(),
        (None, TaskTimestamp::Epoch(epoch)) => epoch.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_range_resolves_against_now() {
        assert_eq!(TimeRange::last(600).resolve(10_000), (9_400, 10_000));
    }

    #[test]
    fn absolute_range_is_normalised() {
        let range = TimeRange::Absolute {
            start: 500,
            end: 100,
        };
        assert_eq!(range.resolve(0), (100, 500));
    }

    #[test]
    fn select_values_round_trip() {
        for (_, preset) in TimeRange::presets() {
            assert_eq!(TimeRange::from_value(&preset.as_value()), Some(preset));
        }
        let absolute = TimeRange::Absolute { start: 1, end: 2 };
        assert_eq!(TimeRange::from_value("abs:1:2"), Some(absolute));
        assert_eq!(TimeRange::from_value("last:x"), None);
        assert_eq!(TimeRange::from_value("week"), None);
    }

    #[test]
    fn automatic_step_targets_240_points() {
        assert_eq!(default_step(0, 3_600), 15);
        assert_eq!(default_step(0, 60), 1);
        assert_eq!(effective_step(None, 0, 86_400), 360);
        assert_eq!(effective_step(Some(0), 0, 86_400), 360);
        assert_eq!(effective_step(Some(30), 0, 86_400), 30);
    }

    #[test]
    fn rfc3339_timestamp_is_shifted_to_offset() {
        let stamp = TaskTimestamp::Text("2024-03-01T00:30:00Z".to_string());
        assert_eq!(format_task_timestamp(Some(&stamp), 480), "2024-03-01 08:30:00");
        assert_eq!(format_task_timestamp(Some(&stamp), 0), "2024-03-01 00:30:00");
    }

    #[test]
    fn epoch_seconds_and_millis_are_both_accepted() {
        let seconds = TaskTimestamp::Epoch(1_709_253_000);
        let millis = TaskTimestamp::Epoch(1_709_253_000_000);
        assert_eq!(format_task_timestamp(Some(&seconds), 0), "2024-03-01 00:30:00");
        assert_eq!(format_task_timestamp(Some(&millis), 0), "2024-03-01 00:30:00");
    }

    #[test]
    fn missing_or_garbled_timestamps_degrade() {
        assert_eq!(format_task_timestamp(None, 0), "");
        let garbled = TaskTimestamp::Text("yesterday".to_string());
        assert_eq!(format_task_timestamp(Some(&garbled), 0), "yesterday");
    }
}
