//! Source image decoding, resampling and embedding
//!
//! The source image is resampled once per page to the tile's pixel size at
//! the configured DPI, then embedded as a single image XObject that every
//! tile references.

use crate::constants::pt_to_px;
use crate::layout::TileSet;
use crate::types::{Result, RollError};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageReader};
use lopdf::{Dictionary, Object, Stream};
use std::io::Write;
use std::path::Path;

/// Decode an image from disk, sniffing the format from its contents
pub fn load_source_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RollError::MissingImage(path.to_path_buf()));
    }

    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    log::info!(
        "Opened image {}: {}x{} {:?}",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image)
}

/// Resample the source image to the tile size at `dpi`.
///
/// Fails if the resampled buffer's aspect ratio drifts from the tile's by
/// more than one pixel.
pub fn scale_to_tile(image: &DynamicImage, tile_set: &TileSet, dpi: u32) -> Result<DynamicImage> {
    let width_px = pt_to_px(tile_set.tile_width, dpi).max(1);
    let height_px = pt_to_px(tile_set.tile_height, dpi).max(1);
    log::info!(
        "Pixel dimensions for {} DPI: {}x{}",
        dpi,
        width_px,
        height_px
    );

    let scaled = image.resize_exact(width_px, height_px, FilterType::Lanczos3);
    check_aspect(&scaled, tile_set.aspect_ratio())?;
    Ok(scaled)
}

fn check_aspect(scaled: &DynamicImage, expected_ratio: f64) -> Result<()> {
    let expected_height = scaled.width() as f64 / expected_ratio;
    // Truncation on both axes can cost up to a pixel plus the width's share of one
    let tolerance = 1.0 + 1.0 / expected_ratio;
    if (scaled.height() as f64 - expected_height).abs() > tolerance {
        return Err(RollError::InvalidGeometry(format!(
            "scaled image {}x{} does not match tile aspect ratio {:.4}",
            scaled.width(),
            scaled.height(),
            expected_ratio
        )));
    }
    Ok(())
}

/// Raster image ready to embed as a PDF image XObject
#[derive(Debug, Clone)]
pub struct RasterXObject {
    pub width: u32,
    pub height: u32,
    /// "DeviceRGB" or "DeviceGray"
    pub color_space: &'static str,
    /// Zlib-compressed samples, 8 bits per component
    pub data: Vec<u8>,
}

impl RasterXObject {
    /// Convert a decoded image, blending any alpha channel over white
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let (samples, color_space) = match image.color() {
            ColorType::L8 | ColorType::L16 => (image.to_luma8().into_raw(), "DeviceGray"),
            ColorType::La8 | ColorType::La16 => {
                let la = image.to_luma_alpha8();
                let gray = la
                    .pixels()
                    .map(|p| blend_on_white(p[0], p[1]))
                    .collect::<Vec<u8>>();
                (gray, "DeviceGray")
            }
            color if color.has_alpha() => {
                let rgba = image.to_rgba8();
                let mut rgb = Vec::with_capacity(rgba.width() as usize * rgba.height() as usize * 3);
                for p in rgba.pixels() {
                    rgb.push(blend_on_white(p[0], p[3]));
                    rgb.push(blend_on_white(p[1], p[3]));
                    rgb.push(blend_on_white(p[2], p[3]));
                }
                (rgb, "DeviceRGB")
            }
            _ => (image.to_rgb8().into_raw(), "DeviceRGB"),
        };

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&samples)?;
        let data = encoder.finish()?;

        Ok(Self {
            width: image.width(),
            height: image.height(),
            color_space,
            data,
        })
    }

    /// Build the lopdf image stream
    pub fn to_stream(&self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(self.width as i64));
        dict.set("Height", Object::Integer(self.height as i64));
        dict.set(
            "ColorSpace",
            Object::Name(self.color_space.as_bytes().to_vec()),
        );
        dict.set("BitsPerComponent", Object::Integer(8));
        dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));

        // Already compressed; keep lopdf from compressing again
        let mut stream = Stream::new(dict, self.data.clone());
        stream.allows_compression = false;
        stream
    }
}

fn blend_on_white(value: u8, alpha: u8) -> u8 {
    let alpha = alpha as f32 / 255.0;
    (value as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8
}
