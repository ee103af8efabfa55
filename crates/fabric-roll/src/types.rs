use std::path::PathBuf;
use thiserror::Error;

use crate::constants::{
    FIFTEEN_FOOT_HEIGHT_PT, FIFTEEN_FOOT_ROLL_LENGTH, ROLL_TEMPLATE_WIDTH_PT, SIX_FOOT_HEIGHT_PT,
    SIX_FOOT_ROLL_LENGTH,
};

#[derive(Error, Debug)]
pub enum RollError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Image file not found: {}", .0.display())]
    MissingImage(PathBuf),
    #[error("Footer asset error: {0}")]
    Footer(String),
    #[error("Text placement failed: {0}")]
    Text(#[from] TextError),
    #[error("Environment error: {0}")]
    Environment(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, RollError>;

/// Reasons a footer text field could not be stamped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextError {
    #[error("character {0:?} cannot be encoded in the footer font")]
    UnsupportedCharacter(char),
    #[error("baseline ({x:.2}, {y:.2}) lies outside the page")]
    OutOfPage { x: f64, y: f64 },
}

/// Page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Template {
    pub width: f64,
    pub height: f64,
}

impl Template {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A named roll layout: the page it prints on plus the length stamped in the footer
#[derive(Debug, Clone, PartialEq)]
pub struct RollTemplate {
    /// Used as the output file suffix (`{basename}_{name}.pdf`)
    pub name: String,
    pub template: Template,
    pub roll_length: String,
}

impl RollTemplate {
    pub fn six_foot() -> Self {
        Self {
            name: "6ft".to_string(),
            template: Template::new(ROLL_TEMPLATE_WIDTH_PT, SIX_FOOT_HEIGHT_PT),
            roll_length: SIX_FOOT_ROLL_LENGTH.to_string(),
        }
    }

    pub fn fifteen_foot() -> Self {
        Self {
            name: "15ft".to_string(),
            template: Template::new(ROLL_TEMPLATE_WIDTH_PT, FIFTEEN_FOOT_HEIGHT_PT),
            roll_length: FIFTEEN_FOOT_ROLL_LENGTH.to_string(),
        }
    }
}

/// Behaviour of the last tile row when the template height is not a multiple
/// of the tile height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Keep full-height tiles; the last row runs past the page bottom
    #[default]
    Bleed,
    /// Truncate the last row at the page bottom
    Clip,
}

/// Values stamped into the footer band
#[derive(Debug, Clone, PartialEq)]
pub struct FooterFields {
    pub pattern_name: String,
    pub roll_width: String,
    pub roll_length: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLabel {
    PatternName,
    RollWidth,
    RollLength,
}

/// One text field positioned on the page (top-left origin, baseline point)
#[derive(Debug, Clone, PartialEq)]
pub struct FooterField {
    pub label: FieldLabel,
    pub value: String,
    pub position: (f64, f64),
}

impl FooterFields {
    /// Pair each value with its label, in stamping order
    pub fn labelled(&self) -> [(FieldLabel, &str); 3] {
        [
            (FieldLabel::PatternName, self.pattern_name.as_str()),
            (FieldLabel::RollWidth, self.roll_width.as_str()),
            (FieldLabel::RollLength, self.roll_length.as_str()),
        ]
    }
}
