use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;
use std::time::Duration;

/// Complete configuration for a generation run
#[derive(Debug, Clone, PartialEq)]
pub struct RollConfig {
    // Filesystem layout
    pub base_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub scripts_dir: PathBuf,
    pub footer_file_name: String,
    pub output_dir: PathBuf,

    // Page layout
    pub templates: Vec<RollTemplate>,
    pub horizontal_repeats: usize,
    pub dpi: u32,
    pub overflow: OverflowPolicy,

    // Footer
    pub roll_width: String,
    pub text_style: TextStyle,
    pub branding: FooterBranding,

    // Retries
    pub retry: RetryPolicy,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self::with_base_dir(DEFAULT_BASE_DIR)
    }
}

impl RollConfig {
    /// Default configuration rooted at `base_dir`, writing into the current directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            templates_dir: base_dir.join(TEMPLATES_DIR_NAME),
            scripts_dir: base_dir.join(SCRIPTS_DIR_NAME),
            base_dir,
            footer_file_name: FOOTER_FILE_NAME.to_string(),
            output_dir: PathBuf::from("."),
            templates: vec![RollTemplate::six_foot(), RollTemplate::fifteen_foot()],
            horizontal_repeats: DEFAULT_HORIZONTAL_REPEATS,
            dpi: DEFAULT_DPI,
            overflow: OverflowPolicy::default(),
            roll_width: DEFAULT_ROLL_WIDTH.to_string(),
            text_style: TextStyle::default(),
            branding: FooterBranding::default(),
            retry: RetryPolicy::default(),
        }
    }

    /// Path the footer is expected at before any fallback search
    pub fn primary_footer_path(&self) -> PathBuf {
        self.scripts_dir.join(&self.footer_file_name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.templates.is_empty() {
            return Err(RollError::Config("No templates configured".to_string()));
        }

        for roll in &self.templates {
            let Template { width, height } = roll.template;
            if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
                return Err(RollError::Config(format!(
                    "Template {} has invalid size {}x{}",
                    roll.name, width, height
                )));
            }
            if roll.name.is_empty() {
                return Err(RollError::Config("Template name cannot be empty".to_string()));
            }
        }

        if self.horizontal_repeats == 0 {
            return Err(RollError::Config(
                "Horizontal repeats must be at least 1".to_string(),
            ));
        }

        if self.dpi == 0 {
            return Err(RollError::Config("DPI must be positive".to_string()));
        }

        if self.retry.max_attempts == 0 {
            return Err(RollError::Config(
                "Retry policy needs at least one attempt".to_string(),
            ));
        }

        if self.footer_file_name.is_empty() {
            return Err(RollError::Config("Footer file name cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Font settings for the stamped footer fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    /// Gray level, 0.0 = black
    pub gray: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: FOOTER_FONT_SIZE,
            gray: FOOTER_TEXT_GRAY,
        }
    }
}

/// Text printed by the placeholder footer
#[derive(Debug, Clone, PartialEq)]
pub struct FooterBranding {
    pub tagline: String,
    pub team: String,
    pub wordmark: String,
    pub website: String,
}

impl Default for FooterBranding {
    fn default() -> Self {
        Self {
            tagline: DEFAULT_TAGLINE.to_string(),
            team: DEFAULT_TEAM.to_string(),
            wordmark: DEFAULT_WORDMARK.to_string(),
            website: DEFAULT_WEBSITE.to_string(),
        }
    }
}

/// Delay between failed attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Retry immediately
    None,
    /// Same delay after every failure
    Fixed(Duration),
}

impl Backoff {
    /// Delay to wait after a failed attempt
    pub fn delay(self) -> Duration {
        match self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(delay) => delay,
        }
    }
}

/// Bounded retry around each template's generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Backoff::Fixed(DEFAULT_RETRY_DELAY),
        }
    }
}

impl RetryPolicy {
    /// Retry policy that never sleeps
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::None,
        }
    }
}
