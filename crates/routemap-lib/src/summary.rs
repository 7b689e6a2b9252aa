use serde::Serialize;

use crate::path::{Path, METERS_PER_MILE};

/// Totals over the visible paths of a map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TourSummary {
    pub paths: usize,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl TourSummary {
    /// Sum distance and duration over `paths`. Infeasible paths contribute nothing.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        paths
            .into_iter()
            .filter_map(Path::route)
            .fold(Self::default(), |summary, route| Self {
                paths: summary.paths + 1,
                distance_meters: summary.distance_meters + route.distance_meters,
                duration_seconds: summary.duration_seconds + route.duration_seconds,
            })
    }

    pub fn distance_text(&self) -> String {
        format_miles(self.distance_meters)
    }

    pub fn duration_text(&self) -> String {
        format_duration(self.duration_seconds)
    }
}

/// Format meters as miles with one decimal, e.g. `"3.1 miles"`.
pub fn format_miles(meters: f64) -> String {
    format!("{:.1} miles", meters / METERS_PER_MILE)
}

/// Format seconds as `"<H> hour(s) <M> minute(s)"`, leaving out zero parts.
///
/// Minutes are rounded to one decimal; a remainder that rounds up to sixty
/// minutes carries into the hours.
pub fn format_duration(seconds: f64) -> String {
    // Tenths of a minute are six seconds.
    let tenths = (seconds.max(0.0) / 6.0).round() as u64;
    let hours = tenths / 600;
    let minute_tenths = tenths % 600;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} {}", hours, plural(hours == 1, "hour")));
    }
    if minute_tenths > 0 {
        let minutes = if minute_tenths % 10 == 0 {
            (minute_tenths / 10).to_string()
        } else {
            format!("{}.{}", minute_tenths / 10, minute_tenths % 10)
        };
        parts.push(format!(
            "{} {}",
            minutes,
            plural(minute_tenths == 10, "minute")
        ));
    }
    parts.join(" ")
}

fn plural(singular: bool, unit: &str) -> String {
    if singular {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}
