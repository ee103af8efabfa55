//! Placeholder footer generator
//!
//! Used when no footer asset can be found. Produces a standalone one-page PDF
//! with a light band, a border line, branding labels and the captions for the
//! three stamped fields.

use crate::options::FooterBranding;
use crate::types::{Result, RollError};
use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Op, PaintMode, PdfDocument, PdfPage,
    PdfParseErrorSeverity, PdfSaveOptions, PdfWarnMsg, Point, Polygon, PolygonRing, Pt, Rect, Rgb,
    TextItem, WindingOrder,
};

const BAND_GRAY: f32 = 0.95;
const BORDER_GRAY: f32 = 0.8;
const LABEL_SIZE: f32 = 12.0;
const WORDMARK_SIZE: f32 = 16.0;
const WEBSITE_SIZE: f32 = 10.0;

/// Generate the placeholder footer PDF.
///
/// Positions are given from the band's top-left corner and converted to PDF
/// space here; the caption column sits 200pt in from the right edge.
pub fn generate_simple_footer(width: f32, height: f32, branding: &FooterBranding) -> Result<Vec<u8>> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(RollError::Footer(format!(
            "cannot generate a {}x{} footer",
            width, height
        )));
    }
    log::info!("Creating simple footer: {}x{}", width, height);

    let mut ops = Vec::new();

    // Band
    ops.push(Op::SetFillColor { col: gray(BAND_GRAY) });
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    corner(0.0, 0.0),
                    corner(width, 0.0),
                    corner(width, height),
                    corner(0.0, height),
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    });

    // Top border
    ops.push(Op::SetOutlineColor { col: gray(BORDER_GRAY) });
    ops.push(Op::SetOutlineThickness { pt: Pt(1.0) });
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![corner(0.0, height), corner(width, height)],
            is_closed: false,
        },
    });

    ops.push(Op::SetFillColor { col: gray(0.0) });
    let mut label = |text: &str, x: f32, y_from_top: f32, size: f32| {
        push_text(&mut ops, text, x, height - y_from_top, size);
    };

    label(&branding.tagline, 50.0, 20.0, LABEL_SIZE);
    label(&branding.team, 50.0, 40.0, LABEL_SIZE);
    label(&branding.wordmark, width / 2.0 - 100.0, 30.0, WORDMARK_SIZE);

    label("Pattern:", width - 200.0, 20.0, LABEL_SIZE);
    label("Roll Width:", width - 200.0, 40.0, LABEL_SIZE);
    label("Roll Length:", width - 200.0, 60.0, LABEL_SIZE);

    label(&branding.website, width - 150.0, 80.0, WEBSITE_SIZE);

    let mut doc = PdfDocument::new("Footer");
    doc.pages.push(PdfPage {
        media_box: page_rect(width, height),
        trim_box: page_rect(width, height),
        crop_box: page_rect(width, height),
        ops,
    });

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    log_save_warnings(&warnings);
    log::info!("Simple footer created ({} bytes)", bytes.len());

    Ok(bytes)
}

fn log_save_warnings(warnings: &[PdfWarnMsg]) {
    for warning in warnings {
        match warning.severity {
            PdfParseErrorSeverity::Info => log::debug!("Simple footer: {}", warning.msg),
            _ => log::warn!("Simple footer: {}", warning.msg),
        }
    }
}

fn push_text(ops: &mut Vec<Op>, text: &str, x: f32, y: f32, size: f32) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point { x: Pt(x), y: Pt(y) },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        font: BuiltinFont::Helvetica,
        size: Pt(size),
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font: BuiltinFont::Helvetica,
    });
    ops.push(Op::EndTextSection);
}

fn page_rect(width: f32, height: f32) -> Rect {
    Rect {
        x: Pt(0.0),
        y: Pt(0.0),
        width: Pt(width),
        height: Pt(height),
    }
}

fn corner(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

fn gray(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}
