//! Static map request composition.
//!
//! This module provides:
//! - [`RenderConfig`] - Canvas, color, marker and zoom settings with validated defaults
//! - [`HexColor`] - A `0xRRGGBB` color accepted by the static map service
//! - [`RenderRequestBuilder`] - Serializes the map state into one bounded-length URL
//!
//! The composed request never exceeds the configured budget. The fixed head
//! and tail are reserved first, path directives next, and markers fill the
//! remaining room; markers that do not fit are dropped whole.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::bounds::MAX_ZOOM;
use crate::error::{Error, Result};
use crate::location::Location;
use crate::transport::encode_query_value;
use crate::visible::VisibleSet;

pub const DEFAULT_CANVAS_WIDTH: u32 = 500;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 500;
pub const DEFAULT_PATH_COLOR: &str = "0x000000";
pub const DEFAULT_POINT_COLOR: &str = "0xFF0000";

/// Longest request the static map service accepts is 8192 characters; stay
/// below it.
pub const DEFAULT_RENDER_BUDGET: usize = 8000;

/// Pipe separator as it appears inside a query value.
const SEPARATOR: &str = "%7C";

/// Six-digit hex color normalized to the `0xRRGGBB` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    /// Accepts six hex digits behind a `0x`, `0X` or `#` prefix.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor {
            value: value.to_string(),
        };
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .or_else(|| trimmed.strip_prefix('#'))
            .ok_or_else(invalid)?;

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        Ok(Self(format!("0x{}", digits.to_ascii_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HexColor::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Zoom behaviour of the rendered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Zoom {
    /// Let the renderer fit every marker and path; no zoom or center is sent.
    #[default]
    Auto,
    Fixed(u8),
}

/// Settings that shape the rendered map.
#[derive(Debug, Clone, Serialize)]
pub struct RenderConfig {
    width: u32,
    height: u32,
    path_color: HexColor,
    point_color: HexColor,
    show_points: bool,
    zoom: Zoom,
    center: Option<Location>,
    budget: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            path_color: HexColor(DEFAULT_PATH_COLOR.to_string()),
            point_color: HexColor(DEFAULT_POINT_COLOR.to_string()),
            show_points: true,
            zoom: Zoom::Auto,
            center: None,
            budget: DEFAULT_RENDER_BUDGET,
        }
    }
}

impl RenderConfig {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn path_color(&self) -> &HexColor {
        &self.path_color
    }

    pub fn point_color(&self) -> &HexColor {
        &self.point_color
    }

    pub fn show_points(&self) -> bool {
        self.show_points
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn center(&self) -> Option<Location> {
        self.center
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Set the canvas size in pixels; a zero dimension falls back to its default.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.width = if width > 0 { width } else { DEFAULT_CANVAS_WIDTH };
        self.height = if height > 0 {
            height
        } else {
            DEFAULT_CANVAS_HEIGHT
        };
    }

    pub fn set_path_color(&mut self, value: &str) -> Result<()> {
        self.path_color = HexColor::parse(value)?;
        Ok(())
    }

    pub fn set_point_color(&mut self, value: &str) -> Result<()> {
        self.point_color = HexColor::parse(value)?;
        Ok(())
    }

    pub fn set_show_points(&mut self, show: bool) {
        self.show_points = show;
    }

    pub fn set_center(&mut self, center: Option<Location>) {
        self.center = center;
    }

    pub fn set_zoom(&mut self, zoom: Zoom) -> Result<()> {
        if let Zoom::Fixed(level) = zoom {
            if level > MAX_ZOOM {
                return Err(Error::InvalidZoom {
                    level,
                    max: MAX_ZOOM,
                });
            }
        }
        self.zoom = zoom;
        Ok(())
    }

    pub fn set_auto_zoom(&mut self) {
        self.zoom = Zoom::Auto;
    }

    pub fn set_budget(&mut self, budget: usize) {
        self.budget = budget;
    }
}

/// Composed static map request plus what had to be left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRequest {
    pub url: String,
    pub markers_drawn: usize,
    pub markers_dropped: usize,
    pub paths_drawn: usize,
    pub paths_dropped: usize,
}

impl RenderRequest {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn len(&self) -> usize {
        self.url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

impl fmt::Display for RenderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Serializes map state into a static map request.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequestBuilder<'a> {
    endpoint: &'a str,
    credential: &'a str,
    config: &'a RenderConfig,
}

impl<'a> RenderRequestBuilder<'a> {
    pub fn new(endpoint: &'a str, credential: &'a str, config: &'a RenderConfig) -> Self {
        Self {
            endpoint,
            credential,
            config,
        }
    }

    /// Compose the request for `members` (in insertion order) and the visible paths.
    ///
    /// `center` is sent together with the zoom level when the zoom is fixed.
    pub fn build(
        &self,
        members: &[Location],
        visible: &VisibleSet,
        center: Option<Location>,
    ) -> Result<RenderRequest> {
        if members.is_empty() {
            return Err(Error::NotConfigured { what: "map points" });
        }

        let config = self.config;
        let head = format!(
            "{}?size={}x{}",
            self.endpoint, config.width, config.height
        );
        let mut tail = String::from("&maptype=roadmap");
        if let Zoom::Fixed(level) = config.zoom {
            if let Some(center) = center {
                tail.push_str(&format!("&center={}", center));
            }
            tail.push_str(&format!("&zoom={}", level));
        }
        tail.push_str(&format!("&key={}", encode_query_value(self.credential)?));

        let required = head.len() + tail.len();
        let mut remaining =
            config
                .budget
                .checked_sub(required)
                .ok_or(Error::RenderBudgetExceeded {
                    required,
                    budget: config.budget,
                })?;

        let mut paths = String::new();
        let mut paths_drawn = 0;
        let mut paths_dropped = 0;
        for path in visible {
            let Some(token) = path.geometry() else {
                continue;
            };
            let directive = format!(
                "&path=weight:3{sep}color:{color}ff{sep}enc:{token}",
                sep = SEPARATOR,
                color = config.path_color,
                token = token
            );
            if directive.len() <= remaining {
                remaining -= directive.len();
                paths.push_str(&directive);
                paths_drawn += 1;
            } else {
                warn!(a = %path.start(), b = %path.end(), "path geometry does not fit the render budget");
                paths_dropped += 1;
            }
        }

        let mut markers = String::new();
        let mut markers_drawn = 0;
        if config.show_points {
            for (index, location) in members.iter().enumerate() {
                let size = if index == 0 { "mid" } else { "tiny" };
                let directive = format!(
                    "&markers=size:{size}{sep}color:{color}{sep}{location}",
                    size = size,
                    sep = SEPARATOR,
                    color = config.point_color,
                    location = location
                );
                if directive.len() > remaining {
                    break;
                }
                remaining -= directive.len();
                markers.push_str(&directive);
                markers_drawn += 1;
            }
        }
        let markers_dropped = if config.show_points {
            members.len() - markers_drawn
        } else {
            0
        };
        if markers_dropped > 0 {
            warn!(
                dropped = markers_dropped,
                budget = config.budget,
                "markers do not fit the render budget"
            );
        }

        let url = [head, markers, paths, tail].concat();
        Ok(RenderRequest {
            url,
            markers_drawn,
            markers_dropped,
            paths_drawn,
            paths_dropped,
        })
    }
}
