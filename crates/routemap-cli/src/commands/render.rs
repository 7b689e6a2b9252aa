//! Render command handler: load a point file, optionally connect the points
//! as a closed tour, and print the totals together with the map request.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use routemap_lib::{Error as MapError, Location, RenderConfig, Zoom};
use tracing::warn;

use super::{open_map, ServiceArgs};
use crate::input::read_map_input;
use crate::output::{emit, format_render_text, LegReport, OutputFormat, RenderReport};

/// Arguments for the render command.
#[derive(Debug, Clone, Default)]
pub struct RenderCommandArgs {
    /// Point file in `width height` / `lng lat [label]` format.
    pub input: PathBuf,
    /// Connect the points in file order as a closed tour.
    pub tour: bool,
    /// Canvas size overriding the file header.
    pub size: Option<(u32, u32)>,
    pub path_color: Option<String>,
    pub point_color: Option<String>,
    /// Fixed center; only sent together with `zoom`.
    pub center: Option<Location>,
    /// Fixed zoom level; automatic when absent.
    pub zoom: Option<u8>,
    /// Leave point markers off the map.
    pub no_markers: bool,
}

impl RenderCommandArgs {
    /// Settings for the rendered map, validated before any request is made.
    pub fn to_config(&self, file_size: (u32, u32)) -> Result<RenderConfig> {
        let mut config = RenderConfig::default();
        let (width, height) = self.size.unwrap_or(file_size);
        config.set_canvas_size(width, height);
        if let Some(color) = &self.path_color {
            config.set_path_color(color)?;
        }
        if let Some(color) = &self.point_color {
            config.set_point_color(color)?;
        }
        if let Some(level) = self.zoom {
            config.set_zoom(Zoom::Fixed(level))?;
        }
        config.set_center(self.center);
        config.set_show_points(!self.no_markers);
        Ok(config)
    }
}

/// Parse a `WIDTHxHEIGHT` canvas size.
pub fn parse_size(value: &str) -> std::result::Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{}`", value))?;
    let width = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width `{}`", width))?;
    let height = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height `{}`", height))?;
    Ok((width, height))
}

/// Consecutive pairs of a closed tour over `points`.
///
/// Two points yield a single leg; fewer yield none.
pub fn tour_legs<T: Copy>(points: &[T]) -> Vec<(T, T)> {
    match points.len() {
        0 | 1 => Vec::new(),
        2 => vec![(points[0], points[1])],
        n => (0..n).map(|i| (points[i], points[(i + 1) % n])).collect(),
    }
}

pub fn handle_render(
    service: &ServiceArgs,
    args: &RenderCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let input = read_map_input(&args.input)?;
    let config = args.to_config((input.width, input.height))?;

    let mut map = open_map(service)?;
    *map.config_mut() = config;
    map.set_points(input.points.iter().map(|point| point.location))
        .context("failed to resolve paths between the input points")?;

    let mut names: HashMap<Location, String> = HashMap::new();
    for point in &input.points {
        names
            .entry(point.location)
            .or_insert_with(|| point.display_name());
    }
    let name = |location: Location| {
        names
            .get(&location)
            .cloned()
            .unwrap_or_else(|| location.to_string())
    };

    let mut legs = Vec::new();
    let mut skipped_legs = Vec::new();
    if args.tour {
        let members = map.graph().members().to_vec();
        for (a, b) in tour_legs(&members) {
            match map.add_visible_path(a, b) {
                Ok(_) => {
                    let path = map.graph().path(a, b);
                    legs.push(LegReport {
                        from: name(a),
                        to: name(b),
                        distance_meters: path.map_or(-1.0, |path| path.distance()),
                        duration_seconds: path.map_or(-1.0, |path| path.duration()),
                    });
                }
                Err(MapError::InfeasiblePath { .. }) => {
                    warn!(from = %name(a), to = %name(b), "no route for tour leg; skipping it");
                    skipped_legs.push((name(a), name(b)));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    let request = map
        .render_request()
        .context("failed to compose the map request")?;
    let report = RenderReport {
        mode: map.travel_mode(),
        points: input.points,
        legs,
        skipped_legs,
        summary: map.summary(),
        request,
    };
    emit(format, &report, format_render_text)
}
