//! Generation driver
//!
//! Processes images one at a time and, for each, every configured roll
//! template in order. Each template is built and written under the retry
//! policy; a failure is recorded in the report and never stops the run.

use crate::footer::{ComposeReport, FooterAsset, FooterSource, compose_footer, locate_footer};
use crate::io::{AtomicWriter, OutputWriter, document_to_bytes};
use crate::layout::{aspect_ratio_of, compute_tile_set};
use crate::options::RollConfig;
use crate::raster::{RasterXObject, load_source_image, scale_to_tile};
use crate::render::render_tiled_page;
use crate::types::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A finished page, serialized and ready to write
#[derive(Debug)]
pub struct BuiltPage {
    pub bytes: Vec<u8>,
    pub tile_count: usize,
    pub compose: ComposeReport,
}

/// A PDF that made it to disk
#[derive(Debug)]
pub struct GeneratedPdf {
    /// Where it was written; differs from the requested output on `_new` fallback
    pub path: PathBuf,
    pub tile_count: usize,
    pub compose: ComposeReport,
}

/// Result of one image on one template
#[derive(Debug)]
pub struct TemplateOutcome {
    pub template: String,
    pub output: PathBuf,
    /// Attempts made, including the successful one
    pub attempts: u32,
    pub result: Result<GeneratedPdf>,
}

impl TemplateOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub enum ImageStatus {
    /// The image file does not exist; nothing was attempted
    Missing,
    Processed {
        base_name: String,
        outcomes: Vec<TemplateOutcome>,
    },
}

#[derive(Debug)]
pub struct ImageReport {
    pub image: PathBuf,
    pub status: ImageStatus,
}

impl ImageReport {
    /// Every template produced its output
    pub fn is_complete(&self) -> bool {
        match &self.status {
            ImageStatus::Missing => false,
            ImageStatus::Processed { outcomes, .. } => {
                outcomes.iter().all(TemplateOutcome::is_success)
            }
        }
    }

    pub fn outcomes(&self) -> &[TemplateOutcome] {
        match &self.status {
            ImageStatus::Missing => &[],
            ImageStatus::Processed { outcomes, .. } => outcomes,
        }
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub footer: FooterSource,
    pub images: Vec<ImageReport>,
}

impl RunReport {
    /// Number of images whose outputs were all written
    pub fn complete_count(&self) -> usize {
        self.images.iter().filter(|r| r.is_complete()).count()
    }
}

/// Drives generation for a set of images
pub struct RollGenerator {
    config: Arc<RollConfig>,
    writer: Arc<dyn OutputWriter>,
}

impl RollGenerator {
    pub fn new(config: RollConfig) -> Result<Self> {
        Self::with_writer(config, Arc::new(AtomicWriter))
    }

    /// Use a custom output writer
    pub fn with_writer(config: RollConfig, writer: Arc<dyn OutputWriter>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            writer,
        })
    }

    pub fn config(&self) -> &RollConfig {
        &self.config
    }

    /// Process every image in order
    pub async fn run(&self, images: &[PathBuf]) -> RunReport {
        log::info!("Starting PDF generation with {} images", images.len());
        let footer = locate_footer(&self.config);

        let mut reports = Vec::with_capacity(images.len());
        for image in images {
            reports.push(self.process_image(image, &footer).await);
        }

        log::info!("PDF generation complete.");
        RunReport {
            footer,
            images: reports,
        }
    }

    /// Generate every template for one image
    pub async fn process_image(&self, image: &Path, footer: &FooterSource) -> ImageReport {
        if !image.is_file() {
            log::error!("Image file not found: {}", image.display());
            return ImageReport {
                image: image.to_path_buf(),
                status: ImageStatus::Missing,
            };
        }

        let base_name = base_name_of(image);
        log::info!("Processing {} from {}", base_name, image.display());

        let mut outcomes = Vec::with_capacity(self.config.templates.len());
        for roll in &self.config.templates {
            outcomes.push(self.generate_template(image, &base_name, roll, footer).await);
        }

        let report = ImageReport {
            image: image.to_path_buf(),
            status: ImageStatus::Processed {
                base_name: base_name.clone(),
                outcomes,
            },
        };
        if report.is_complete() {
            log::info!("PDF generation successful for {}", base_name);
        } else {
            log::error!("PDF generation incomplete for {}", base_name);
        }
        report
    }

    async fn generate_template(
        &self,
        image: &Path,
        base_name: &str,
        roll: &RollTemplate,
        footer: &FooterSource,
    ) -> TemplateOutcome {
        let output = self
            .config
            .output_dir
            .join(format!("{}_{}.pdf", base_name, roll.name));
        log::info!("Generating {} tiled PDF at: {}", roll.name, output.display());

        let fields = FooterFields {
            pattern_name: base_name.to_string(),
            roll_width: self.config.roll_width.clone(),
            roll_length: roll.roll_length.clone(),
        };

        let policy = self.config.retry;
        let mut attempt = 0;
        loop {
            attempt += 1;
            log::info!(
                "{} PDF attempt {}/{}",
                roll.name,
                attempt,
                policy.max_attempts
            );

            match self.attempt(image, roll, footer, &fields, &output).await {
                Ok(generated) => {
                    log::info!(
                        "Successfully created {} PDF: {}",
                        roll.name,
                        generated.path.display()
                    );
                    return TemplateOutcome {
                        template: roll.name.clone(),
                        output,
                        attempts: attempt,
                        result: Ok(generated),
                    };
                }
                Err(err) => {
                    log::error!(
                        "Error on attempt {}/{} for {} PDF: {}",
                        attempt,
                        policy.max_attempts,
                        roll.name,
                        err
                    );
                    if attempt >= policy.max_attempts {
                        log::error!(
                            "Failed to generate {} PDF for {} after {} attempts",
                            roll.name,
                            base_name,
                            attempt
                        );
                        return TemplateOutcome {
                            template: roll.name.clone(),
                            output,
                            attempts: attempt,
                            result: Err(err),
                        };
                    }
                }
            }

            let delay = policy.backoff.delay();
            log::info!(
                "Retrying {} PDF generation (attempt {}/{}) in {:?}",
                roll.name,
                attempt + 1,
                policy.max_attempts,
                delay
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// One build-and-write pass; everything opened here is dropped on return
    async fn attempt(
        &self,
        image: &Path,
        roll: &RollTemplate,
        footer: &FooterSource,
        fields: &FooterFields,
        output: &Path,
    ) -> Result<GeneratedPdf> {
        let config = Arc::clone(&self.config);
        let image = image.to_path_buf();
        let roll = roll.clone();
        let footer = footer.clone();
        let fields = fields.clone();

        let built = tokio::task::spawn_blocking(move || {
            build_roll_page(&image, &roll, &footer, &fields, &config)
        })
        .await??;

        let writer = Arc::clone(&self.writer);
        let target = output.to_path_buf();
        let bytes = built.bytes;
        let path = tokio::task::spawn_blocking(move || writer.write(&bytes, &target)).await??;

        Ok(GeneratedPdf {
            path,
            tile_count: built.tile_count,
            compose: built.compose,
        })
    }
}

/// Build one finished roll page: tile the image, overlay the footer, serialize.
pub fn build_roll_page(
    image_path: &Path,
    roll: &RollTemplate,
    footer: &FooterSource,
    fields: &FooterFields,
    config: &RollConfig,
) -> Result<BuiltPage> {
    log::info!("Creating tiled PDF for {}", image_path.display());

    let source = load_source_image(image_path)?;
    let aspect = aspect_ratio_of(source.width(), source.height())?;
    let tile_set = compute_tile_set(
        roll.template,
        aspect,
        config.horizontal_repeats,
        config.overflow,
    )?;
    log::info!(
        "Calculated tile dimensions: {:.2}x{:.2} ({} rows)",
        tile_set.tile_width,
        tile_set.tile_height,
        tile_set.rows
    );

    let scaled = scale_to_tile(&source, &tile_set, config.dpi)?;
    drop(source);
    let raster = RasterXObject::from_image(&scaled)?;
    drop(scaled);

    let mut page = render_tiled_page(&tile_set, roll.template, &raster)?;
    log::info!(
        "Created {}x{} page with {} tiles",
        roll.template.width,
        roll.template.height,
        page.tile_count
    );

    let asset = FooterAsset::from_source(footer, roll.template.width, &config.branding)?;
    let compose = compose_footer(&mut page, &asset, fields, &config.text_style)?;

    let bytes = document_to_bytes(&mut page.document)?;
    Ok(BuiltPage {
        bytes,
        tile_count: page.tile_count,
        compose,
    })
}

/// File stem used for output names and the stamped pattern name
pub fn base_name_of(image: &Path) -> String {
    image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "image".to_string())
}
