//! Repeated-tile layout
//!
//! Computes the tile size for a fixed number of horizontal repeats and the
//! rectangles that cover a template top to bottom.

use super::types::{Tile, TileSet};
use crate::types::{OverflowPolicy, Result, RollError, Template};

/// Compute the tile placements for a template.
///
/// Each row holds exactly `horizontal_repeats` tiles spanning the full
/// template width. Rows are emitted while the row's top edge is above the
/// template bottom, so the last row may overhang it; `overflow` decides
/// whether that row keeps its full height or is truncated.
///
/// # Arguments
/// * `template` - Page size in points
/// * `aspect_ratio` - Source image width divided by height
/// * `horizontal_repeats` - Tiles per row
/// * `overflow` - Treatment of the last row
pub fn compute_tile_set(
    template: Template,
    aspect_ratio: f64,
    horizontal_repeats: usize,
    overflow: OverflowPolicy,
) -> Result<TileSet> {
    validate_inputs(template, aspect_ratio, horizontal_repeats)?;

    let tile_width = template.width / horizontal_repeats as f64;
    let tile_height = tile_width / aspect_ratio;

    let mut tiles = Vec::new();
    let mut rows = 0;

    loop {
        // Multiply rather than accumulate so long rolls don't drift
        let y = rows as f64 * tile_height;
        if y >= template.height {
            break;
        }

        let height = match overflow {
            OverflowPolicy::Bleed => tile_height,
            OverflowPolicy::Clip => tile_height.min(template.height - y),
        };

        for col in 0..horizontal_repeats {
            tiles.push(Tile::new(col as f64 * tile_width, y, tile_width, height));
        }
        rows += 1;
    }

    Ok(TileSet {
        tile_width,
        tile_height,
        columns: horizontal_repeats,
        rows,
        tiles,
    })
}

/// Aspect ratio (width / height) of a pixel buffer
pub fn aspect_ratio_of(width_px: u32, height_px: u32) -> Result<f64> {
    if width_px == 0 || height_px == 0 {
        return Err(RollError::InvalidGeometry(format!(
            "image has zero size: {}x{}",
            width_px, height_px
        )));
    }
    Ok(width_px as f64 / height_px as f64)
}

fn validate_inputs(template: Template, aspect_ratio: f64, horizontal_repeats: usize) -> Result<()> {
    if !(template.width.is_finite() && template.width > 0.0)
        || !(template.height.is_finite() && template.height > 0.0)
    {
        return Err(RollError::InvalidGeometry(format!(
            "template size must be positive, got {}x{}",
            template.width, template.height
        )));
    }
    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return Err(RollError::InvalidGeometry(format!(
            "aspect ratio must be positive, got {}",
            aspect_ratio
        )));
    }
    if horizontal_repeats == 0 {
        return Err(RollError::InvalidGeometry(
            "horizontal repeats must be at least 1".to_string(),
        ));
    }
    Ok(())
}
