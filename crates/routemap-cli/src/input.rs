//! Point file parsing.
//!
//! The first non-comment line holds the canvas size as `width height`. Every
//! following line holds one point as `lng lat [label...]`. Blank lines and
//! lines starting with `#` are skipped.
//!
//! ```text
//! 600 400
//! -74.65219 40.35025 Computer Science
//! -74.65904 40.34187 Wawa
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use routemap_lib::Location;
use serde::Serialize;

/// One point from the input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledPoint {
    pub location: Location,
    pub label: Option<String>,
}

impl LabeledPoint {
    /// Label if present, otherwise the coordinates.
    pub fn display_name(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.location.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapInput {
    pub width: u32,
    pub height: u32,
    pub points: Vec<LabeledPoint>,
}

/// Read and parse a point file.
pub fn read_map_input(path: &Path) -> Result<MapInput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read point file {}", path.display()))?;
    parse_map_input(&text).with_context(|| format!("invalid point file {}", path.display()))
}

pub fn parse_map_input(text: &str) -> Result<MapInput> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let Some((line_no, header)) = lines.next() else {
        bail!("missing `width height` header line");
    };
    let (width, height) = parse_header(header).with_context(|| format!("line {}", line_no))?;

    let points = lines
        .map(|(line_no, line)| parse_point(line).with_context(|| format!("line {}", line_no)))
        .collect::<Result<Vec<_>>>()?;
    if points.is_empty() {
        bail!("no points listed after the header line");
    }

    Ok(MapInput {
        width,
        height,
        points,
    })
}

fn parse_header(line: &str) -> Result<(u32, u32)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [width, height] = fields.as_slice() else {
        bail!("expected `width height`, found `{}`", line);
    };
    let width = width
        .parse()
        .with_context(|| format!("invalid width `{}`", width))?;
    let height = height
        .parse()
        .with_context(|| format!("invalid height `{}`", height))?;
    Ok((width, height))
}

fn parse_point(line: &str) -> Result<LabeledPoint> {
    let mut fields = line.split_whitespace();
    let (Some(lng), Some(lat)) = (fields.next(), fields.next()) else {
        bail!("expected `lng lat [label]`, found `{}`", line);
    };
    let lng: f64 = lng
        .parse()
        .with_context(|| format!("invalid longitude `{}`", lng))?;
    let lat: f64 = lat
        .parse()
        .with_context(|| format!("invalid latitude `{}`", lat))?;
    let location = Location::new(lng, lat)?;

    let label = fields.collect::<Vec<_>>().join(" ");
    Ok(LabeledPoint {
        location,
        label: (!label.is_empty()).then_some(label),
    })
}
