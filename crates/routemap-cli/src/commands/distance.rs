//! Distance command handler.

use anyhow::{Context, Result};
use routemap_lib::Location;

use super::{open_map, ServiceArgs};
use crate::output::{emit, format_distance_text, DistanceReport, OutputFormat};

pub fn handle_distance(
    service: &ServiceArgs,
    from: Location,
    to: Location,
    format: OutputFormat,
) -> Result<()> {
    let map = open_map(service)?;
    let (distance_meters, duration_seconds) = if from == to {
        (0.0, 0.0)
    } else {
        let path = map
            .resolve_path(from, to)
            .with_context(|| format!("failed to resolve a path from {} to {}", from, to))?;
        (path.distance(), path.duration())
    };

    let report = DistanceReport {
        mode: map.travel_mode(),
        from: from.to_string(),
        to: to.to_string(),
        distance_meters,
        duration_seconds,
    };
    emit(format, &report, format_distance_text)
}
