//! Footer assets: where a footer comes from and how it is embedded

use super::simple::generate_simple_footer;
use crate::constants::SIMPLE_FOOTER_HEIGHT_PT;
use crate::layout::Rect;
use crate::options::FooterBranding;
use crate::raster::{RasterXObject, load_source_image};
use crate::render::{create_page_xobject, num, page_box};
use crate::types::{Result, RollError};
use lopdf::{Document, ObjectId};
use std::path::{Path, PathBuf};

/// Outcome of the footer search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterSource {
    /// A footer file found on disk
    File(PathBuf),
    /// No file found; a placeholder is generated per template width
    Synthetic,
}

/// A loaded footer ready to be placed on a page
#[derive(Debug)]
pub enum FooterAsset {
    /// First page of a PDF, embedded as a Form XObject
    Page {
        document: Document,
        page_id: ObjectId,
        bounds: Rect,
    },
    /// A bitmap footer
    Raster(RasterXObject),
}

impl FooterAsset {
    /// Load a footer file: `.pdf` files by page, anything else as an image
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            let document = Document::load(path)?;
            let asset = Self::from_document(document)?;
            log::info!("Opened footer PDF: {}", path.display());
            Ok(asset)
        } else {
            let image = load_source_image(path)?;
            Ok(Self::Raster(RasterXObject::from_image(&image)?))
        }
    }

    /// Use the first page of an already-parsed PDF
    pub fn from_document(document: Document) -> Result<Self> {
        let page_id = document
            .get_pages()
            .values()
            .next()
            .copied()
            .ok_or_else(|| RollError::Footer("footer PDF has no pages".to_string()))?;
        let bounds = page_box(&document, page_id)?;
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Err(RollError::Footer(format!(
                "footer page has empty size {}x{}",
                bounds.width, bounds.height
            )));
        }

        Ok(Self::Page {
            document,
            page_id,
            bounds,
        })
    }

    /// Generate the placeholder footer for a page `width` points wide.
    ///
    /// The asset reports exactly `width` x 100pt. The saved MediaBox is
    /// rounded to whole points, so it is not used for the size.
    pub fn synthetic(width: f64, branding: &FooterBranding) -> Result<Self> {
        let bytes = generate_simple_footer(width as f32, SIMPLE_FOOTER_HEIGHT_PT, branding)?;
        let requested = Rect::new(0.0, 0.0, width, SIMPLE_FOOTER_HEIGHT_PT as f64);

        match Self::from_document(Document::load_mem(&bytes)?)? {
            FooterAsset::Page {
                document, page_id, ..
            } => Ok(FooterAsset::Page {
                document,
                page_id,
                bounds: requested,
            }),
            raster => Ok(raster),
        }
    }

    /// Resolve a search result into an asset
    pub fn from_source(source: &FooterSource, width: f64, branding: &FooterBranding) -> Result<Self> {
        match source {
            FooterSource::File(path) => Self::load(path),
            FooterSource::Synthetic => Self::synthetic(width, branding),
        }
    }

    /// Natural (width, height) of the footer; pixels for rasters, points for pages
    pub fn size(&self) -> (f64, f64) {
        match self {
            FooterAsset::Page { bounds, .. } => (bounds.width, bounds.height),
            FooterAsset::Raster(raster) => (raster.width as f64, raster.height as f64),
        }
    }

    /// Copy the footer into `output` and return its XObject ID
    pub(crate) fn embed(&self, output: &mut Document) -> Result<ObjectId> {
        match self {
            FooterAsset::Page {
                document, page_id, ..
            } => create_page_xobject(output, document, *page_id),
            FooterAsset::Raster(raster) => Ok(output.add_object(raster.to_stream())),
        }
    }

    /// Content command drawing the embedded footer as a band `width` x `height`
    /// resting on the page bottom
    pub(crate) fn draw_command(&self, name: &str, width: f64, height: f64) -> String {
        match self {
            FooterAsset::Page { bounds, .. } => {
                let sx = width / bounds.width;
                let sy = height / bounds.height;
                format!(
                    "q {} 0 0 {} {} {} cm /{} Do Q\n",
                    num(sx),
                    num(sy),
                    num(-bounds.x * sx),
                    num(-bounds.y * sy),
                    name
                )
            }
            FooterAsset::Raster(_) => format!(
                "q {} 0 0 {} 0 0 cm /{} Do Q\n",
                num(width),
                num(height),
                name
            ),
        }
    }
}
