//! Footer compositing and metadata stamping

use super::asset::FooterAsset;
use crate::constants::*;
use crate::options::TextStyle;
use crate::render::{TiledPage, add_helvetica, add_page_resource, append_page_content};
use crate::types::*;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

const FOOTER_XOBJECT_NAME: &str = "Footer";
const FOOTER_FONT_NAME: &str = "F1";

/// Where the three text fields are anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextScheme {
    /// Offsets measured down from the top of the footer band
    FooterRelative,
    /// Fixed offsets measured up from the page bottom
    PageBottom,
}

/// What happened to the footer text
#[derive(Debug, Clone, PartialEq)]
pub enum TextOutcome {
    Placed(TextScheme),
    /// Both schemes failed; the page carries only the footer image
    Omitted(TextError),
}

/// Result of compositing one page
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeReport {
    /// Height of the footer band in points
    pub footer_height: f64,
    pub text: TextOutcome,
    /// Fields as stamped; empty when the text was omitted
    pub fields: Vec<FooterField>,
}

/// Height of a footer scaled to span `template_width`
pub fn footer_height(footer_width: f64, footer_height: f64, template_width: f64) -> f64 {
    footer_height / footer_width * template_width
}

/// Overlay the footer band on the page and stamp the roll metadata.
///
/// The footer is scaled to the full template width and rests on the page
/// bottom. Text falls back from the footer-relative scheme to the
/// page-bottom scheme; if both fail the page is kept without text.
pub fn compose_footer(
    page: &mut TiledPage,
    footer: &FooterAsset,
    fields: &FooterFields,
    style: &TextStyle,
) -> Result<ComposeReport> {
    let template = page.template;
    let (natural_width, natural_height) = footer.size();
    let band_height = footer_height(natural_width, natural_height, template.width);
    if !(band_height.is_finite() && band_height > 0.0) {
        return Err(RollError::Footer(format!(
            "footer of size {}x{} cannot be scaled",
            natural_width, natural_height
        )));
    }
    log::info!(
        "Footer rectangle: (0, {:.2}, {:.2}, {:.2})",
        template.height - band_height,
        template.width,
        template.height
    );

    let footer_id = footer.embed(&mut page.document)?;
    add_page_resource(
        &mut page.document,
        page.page_id,
        "XObject",
        FOOTER_XOBJECT_NAME,
        Object::Reference(footer_id),
    )?;
    append_page_content(
        &mut page.document,
        page.page_id,
        footer
            .draw_command(FOOTER_XOBJECT_NAME, template.width, band_height)
            .into_bytes(),
    )?;
    log::info!("Inserted footer image");

    let placed = place_fields(TextScheme::FooterRelative, fields, template, band_height)
        .map(|stamped| (TextScheme::FooterRelative, stamped))
        .or_else(|err| {
            log::warn!("Error adding text: {}", err);
            log::info!("Trying alternative text placement method");
            place_fields(TextScheme::PageBottom, fields, template, band_height)
                .map(|stamped| (TextScheme::PageBottom, stamped))
        });

    let (text, stamped) = match placed {
        Ok((scheme, stamped)) => {
            stamp_text(page, &stamped, style)?;
            for field in &stamped {
                log::info!("Added {:?}: {}", field.label, field.value);
            }
            (TextOutcome::Placed(scheme), stamped)
        }
        Err(err) => {
            log::error!("Alternative text placement also failed: {}", err);
            (TextOutcome::Omitted(err), Vec::new())
        }
    };

    Ok(ComposeReport {
        footer_height: band_height,
        text,
        fields: stamped,
    })
}

/// Position the three fields under a scheme, checking they can be drawn.
///
/// Positions are baseline points with a top-left page origin. Fails if a
/// value contains a character the built-in font cannot encode or if a
/// baseline lands outside the page.
pub fn place_fields(
    scheme: TextScheme,
    fields: &FooterFields,
    template: Template,
    band_height: f64,
) -> std::result::Result<Vec<FooterField>, TextError> {
    let footer_top = template.height - band_height;

    fields
        .labelled()
        .into_iter()
        .map(|(label, value)| {
            let (dx, dy) = offset(scheme, label);
            let position = match scheme {
                TextScheme::FooterRelative => (template.width - dx, footer_top + dy),
                TextScheme::PageBottom => (template.width - dx, template.height - dy),
            };

            let (x, y) = position;
            if !(0.0..=template.width).contains(&x) || !(0.0..=template.height).contains(&y) {
                return Err(TextError::OutOfPage { x, y });
            }
            encode_win_ansi(value)?;

            Ok(FooterField {
                label,
                value: value.to_string(),
                position,
            })
        })
        .collect()
}

fn offset(scheme: TextScheme, label: FieldLabel) -> (f64, f64) {
    match (scheme, label) {
        (TextScheme::FooterRelative, FieldLabel::PatternName) => PATTERN_NAME_OFFSET,
        (TextScheme::FooterRelative, FieldLabel::RollWidth) => ROLL_WIDTH_OFFSET,
        (TextScheme::FooterRelative, FieldLabel::RollLength) => ROLL_LENGTH_OFFSET,
        (TextScheme::PageBottom, FieldLabel::PatternName) => ALT_PATTERN_NAME_OFFSET,
        (TextScheme::PageBottom, FieldLabel::RollWidth) => ALT_ROLL_WIDTH_OFFSET,
        (TextScheme::PageBottom, FieldLabel::RollLength) => ALT_ROLL_LENGTH_OFFSET,
    }
}

/// Encode text for the WinAnsi-encoded built-in Helvetica.
///
/// Printable ASCII and the Latin-1 supplement map to themselves.
fn encode_win_ansi(text: &str) -> std::result::Result<Vec<u8>, TextError> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => Ok(c as u32 as u8),
            _ => Err(TextError::UnsupportedCharacter(c)),
        })
        .collect()
}

fn stamp_text(page: &mut TiledPage, fields: &[FooterField], style: &TextStyle) -> Result<()> {
    let page_height = page.template.height;
    let mut operations = vec![Operation::new("q", vec![])];

    for field in fields {
        let encoded = encode_win_ansi(&field.value)?;
        let (x, y) = field.position;
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(FOOTER_FONT_NAME.as_bytes().to_vec()),
                    Object::Real(style.font_size),
                ],
            ),
            Operation::new("g", vec![Object::Real(style.gray)]),
            Operation::new(
                "Td",
                vec![Object::Real(x as f32), Object::Real((page_height - y) as f32)],
            ),
            Operation::new("Tj", vec![Object::String(encoded, StringFormat::Literal)]),
            Operation::new("ET", vec![]),
        ]);
    }
    operations.push(Operation::new("Q", vec![]));

    let content = Content { operations }.encode()?;

    let font_id = add_helvetica(&mut page.document);
    add_page_resource(
        &mut page.document,
        page.page_id,
        "Font",
        FOOTER_FONT_NAME,
        Object::Reference(font_id),
    )?;
    append_page_content(&mut page.document, page.page_id, content)
}
