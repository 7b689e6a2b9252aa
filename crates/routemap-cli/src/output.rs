//! Output formatting for command results.
//!
//! Every command builds a serializable report and hands it to one of the
//! formatters here, either as plain text or as pretty-printed JSON.

use std::fmt::Write as _;

use clap::ValueEnum;
use routemap_lib::{format_duration, format_miles, RenderRequest, TourSummary, TravelMode};
use serde::Serialize;

use crate::input::LabeledPoint;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// One drawn leg of a tour.
#[derive(Debug, Clone, Serialize)]
pub struct LegReport {
    pub from: String,
    pub to: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Result of the `render` command.
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    pub mode: TravelMode,
    pub points: Vec<LabeledPoint>,
    pub legs: Vec<LegReport>,
    pub skipped_legs: Vec<(String, String)>,
    pub summary: TourSummary,
    pub request: RenderRequest,
}

/// Result of the `distance` command. Negative values mean no route exists.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceReport {
    pub mode: TravelMode,
    pub from: String,
    pub to: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl DistanceReport {
    pub fn is_routable(&self) -> bool {
        self.distance_meters >= 0.0
    }
}

pub fn format_render_text(report: &RenderReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Mode: {}", report.mode);
    let _ = writeln!(out, "Points: {}", report.points.len());
    for leg in &report.legs {
        let _ = writeln!(
            out,
            "  {} -> {}: {}, {}",
            leg.from,
            leg.to,
            format_miles(leg.distance_meters),
            time_or_none(leg.duration_seconds)
        );
    }
    for (from, to) in &report.skipped_legs {
        let _ = writeln!(out, "  {} -> {}: no route", from, to);
    }
    let _ = writeln!(
        out,
        "Total: {}, {}",
        report.summary.distance_text(),
        time_or_none(report.summary.duration_seconds)
    );

    let request = &report.request;
    if request.markers_dropped > 0 || request.paths_dropped > 0 {
        let _ = writeln!(
            out,
            "Left out of the map: {} markers, {} paths",
            request.markers_dropped, request.paths_dropped
        );
    }
    let _ = writeln!(out, "Map: {}", request);
    out
}

pub fn format_distance_text(report: &DistanceReport) -> String {
    if !report.is_routable() {
        return format!(
            "No {} route between {} and {}\n",
            report.mode, report.from, report.to
        );
    }
    format!(
        "{} -> {} ({}): {}, {}\n",
        report.from,
        report.to,
        report.mode,
        format_miles(report.distance_meters),
        time_or_none(report.duration_seconds)
    )
}

fn time_or_none(seconds: f64) -> String {
    let text = format_duration(seconds);
    if text.is_empty() {
        "0 minutes".to_string()
    } else {
        text
    }
}

/// Print a report in the requested format.
pub fn emit<T: Serialize>(
    format: OutputFormat,
    report: &T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => print!("{}", text(report)),
    }
    Ok(())
}
