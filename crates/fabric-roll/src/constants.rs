//! Shared constants for roll generation
//!
//! Template sizes, footer text offsets and branding defaults live here so the
//! rest of the crate never carries magic numbers.

use std::time::Duration;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert a length in points to whole pixels at the given DPI (truncating)
#[inline]
pub fn pt_to_px(pt: f64, dpi: u32) -> u32 {
    (pt * (dpi as f64 / POINTS_PER_INCH)) as u32
}

// =============================================================================
// Roll Templates
// =============================================================================

/// Width shared by every roll template (points)
pub const ROLL_TEMPLATE_WIDTH_PT: f64 = 2171.53;

/// Six-foot roll page height (points)
pub const SIX_FOOT_HEIGHT_PT: f64 = 5285.94;

/// Fifteen-foot roll page height (points)
pub const FIFTEEN_FOOT_HEIGHT_PT: f64 = 13061.90;

pub const SIX_FOOT_ROLL_LENGTH: &str = "6'";
pub const FIFTEEN_FOOT_ROLL_LENGTH: &str = "15'";

/// Roll width stamped on every template
pub const DEFAULT_ROLL_WIDTH: &str = "30'";

// =============================================================================
// Tiling and Rasterizing
// =============================================================================

/// Tiles per row
pub const DEFAULT_HORIZONTAL_REPEATS: usize = 6;

/// Resolution the source image is resampled to before embedding
pub const DEFAULT_DPI: u32 = 300;

// =============================================================================
// Footer Text
// =============================================================================

pub const FOOTER_FONT_SIZE: f32 = 14.0;

/// Gray level of the stamped text
pub const FOOTER_TEXT_GRAY: f32 = 0.2;

/// (x from right edge, y below the footer top) for each field, primary scheme
pub const PATTERN_NAME_OFFSET: (f64, f64) = (160.0, 22.0);
pub const ROLL_WIDTH_OFFSET: (f64, f64) = (135.0, 37.0);
pub const ROLL_LENGTH_OFFSET: (f64, f64) = (135.0, 55.0);

/// (x from right edge, y above the page bottom) for each field, alternate scheme
pub const ALT_PATTERN_NAME_OFFSET: (f64, f64) = (160.0, 78.0);
pub const ALT_ROLL_WIDTH_OFFSET: (f64, f64) = (135.0, 58.0);
pub const ALT_ROLL_LENGTH_OFFSET: (f64, f64) = (135.0, 38.0);

// =============================================================================
// Footer Assets
// =============================================================================

pub const FOOTER_FILE_NAME: &str = "Footer.pdf";

/// Height of the synthesized placeholder footer (points)
pub const SIMPLE_FOOTER_HEIGHT_PT: f32 = 100.0;

pub const DEFAULT_TAGLINE: &str = "Celebrating the art of giving with love";
pub const DEFAULT_TEAM: &str = "Aspen & Arlo Team";
pub const DEFAULT_WORDMARK: &str = "ASPEN & ARLO";
pub const DEFAULT_WEBSITE: &str = "aspenandarlo.com";

// =============================================================================
// Environment and Retries
// =============================================================================

pub const DEFAULT_BASE_DIR: &str = "Folder_For_Uploader";
pub const TEMPLATES_DIR_NAME: &str = "Templateimages";
pub const SCRIPTS_DIR_NAME: &str = "Uptodatescripts";

/// Probe file used to check that a directory is writable
pub const WRITE_PROBE_FILE: &str = "test_write.tmp";

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);
