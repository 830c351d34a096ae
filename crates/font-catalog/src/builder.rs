// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use font_mud::{AtlasGenerator, AtlasOptions, AtlasRequest};
use tracing::{debug, info, warn};

use crate::blocks::{BlockRange, BlockTable};
use crate::descriptor::{font_path, FontDescriptor, FontsDescriptor};
use crate::error::{BlockError, BlockResult};
use crate::metrics::{FontInfo, FontSource};
use crate::model::{Font, FontCatalog, FontMetrics};
use crate::output::AssetSink;
use crate::style::FontStyle;

/// Name of the synthetic font carrying the replacement character.
pub const REPLACEMENT_FONT: &str = "Extra";

/// Block generated from the fallback font for the replacement character.
pub const REPLACEMENT_BLOCK: &str = "Specials";
pub const REPLACEMENT_MIN: u32 = 65520;
pub const REPLACEMENT_MAX: u32 = 65535;

/// The only character generated for the replacement block.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

#[derive(Clone, Debug)]
pub struct BuildOptions {
    pub catalog_name: String,
    pub atlas: AtlasOptions,

    /// Font used to generate the replacement character block.
    pub fallback_font: PathBuf,
}

/// Assets produced for one block of one font style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockAssets {
    pub block: String,
    pub charset: Vec<char>,
    pub pages: usize,
}

/// The result of attempting one requested block.
#[derive(Debug)]
pub enum BlockOutcome {
    Generated(BlockAssets),
    UnknownBlock(String),
    NoGlyphs { block: String },
    Failed { block: String, cause: BlockError },
}

impl BlockOutcome {
    /// The warning to report for a skipped block, if it was skipped.
    pub fn warning(&self, font: &str) -> Option<String> {
        match self {
            BlockOutcome::Generated(_) => None,
            BlockOutcome::UnknownBlock(name) => {
                Some(format!("{:?} is not a valid Unicode Block.", name))
            }
            BlockOutcome::NoGlyphs { block } => Some(
                BlockError::NoGlyphsInBlock {
                    font: font.to_string(),
                    block: block.clone(),
                }
                .to_string(),
            ),
            BlockOutcome::Failed { block, cause } => {
                Some(format!("Block {:?} of font {:?} failed: {}", block, font, cause))
            }
        }
    }
}

/// Tally of block outcomes for one font style pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FontReport {
    pub generated: usize,
    pub unknown: usize,
    pub no_glyphs: usize,
    pub failed: usize,
}

impl FontReport {
    pub fn fold(outcomes: &[BlockOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut report, outcome| {
                match outcome {
                    BlockOutcome::Generated(_) => report.generated += 1,
                    BlockOutcome::UnknownBlock(_) => report.unknown += 1,
                    BlockOutcome::NoGlyphs { .. } => report.no_glyphs += 1,
                    BlockOutcome::Failed { .. } => report.failed += 1,
                }
                report
            })
    }

    pub fn skipped(&self) -> usize {
        self.unknown + self.no_glyphs + self.failed
    }
}

/// Builds a single font catalog, one font family and block at a time.
pub struct CatalogBuilder {
    catalog: FontCatalog,
    options: BuildOptions,
    blocks: BlockTable,
    generator: Arc<dyn AtlasGenerator>,
    fonts: Arc<dyn FontSource>,
    sink: Arc<dyn AssetSink>,
}

impl CatalogBuilder {
    pub fn new(
        options: BuildOptions,
        blocks: BlockTable,
        generator: Arc<dyn AtlasGenerator>,
        fonts: Arc<dyn FontSource>,
        sink: Arc<dyn AssetSink>,
    ) -> Self {
        let catalog = FontCatalog::new(
            options.catalog_name.clone(),
            options.atlas.field_type,
            options.atlas.font_size,
            options.atlas.distance_range,
        );

        Self {
            catalog,
            options,
            blocks,
            generator,
            fonts,
            sink,
        }
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    fn scaled_metrics(&self, info: &FontInfo) -> FontMetrics {
        FontMetrics::scaled(
            info,
            self.options.atlas.font_size,
            self.options.atlas.distance_range,
        )
    }

    /// Generates the atlas for the characters of `block` that `info` supports and
    /// folds the result into `font` and the catalog.
    pub async fn build_block_assets(
        &mut self,
        font: &mut Font,
        font_file: &Path,
        block: &BlockRange,
        info: &FontInfo,
        style: FontStyle,
    ) -> BlockResult<BlockAssets> {
        let charset = info.charset_in(block.min(), block.max());
        if charset.is_empty() {
            return Err(BlockError::NoGlyphsInBlock {
                font: font.name.clone(),
                block: block.category.clone(),
            });
        }

        if style.is_regular() {
            info!("Generating assets for block: {}", block.category);
        } else {
            info!("Generating {} assets for block: {}", style.label(), block.category);
        }

        let stem = block.file_stem();
        let request = AtlasRequest {
            font_file: font_file.to_path_buf(),
            charset: charset.clone(),
            filename: stem.clone(),
            options: self.options.atlas,
        };

        let atlas = self.generator.generate(request).await?;
        self.sink
            .write_block_assets(&self.catalog.name, style, &font.name, &stem, &atlas)
            .await?;

        for c in atlas.layout.chars.iter() {
            self.catalog.merge_glyph_extent(c.width, c.height);
        }

        font.metrics.line_height = atlas.layout.common.line_height;
        font.metrics.base = atlas.layout.common.base;
        font.charset.extend(charset.iter());
        self.catalog.register_block(block, &font.name, style);

        debug!(
            "{} glyphs of {:?} on {} page(s)",
            charset.len(),
            block.category,
            atlas.textures.len()
        );

        Ok(BlockAssets {
            block: block.category.clone(),
            charset,
            pages: atlas.textures.len(),
        })
    }

    /// Generates every block `descriptor` requests from one style's font file.
    ///
    /// Unknown blocks and failing blocks are skipped; they never abort the font.
    pub async fn build_font_assets(
        &mut self,
        descriptor: &FontDescriptor,
        font: &mut Font,
        font_file: &Path,
        info: &FontInfo,
        style: FontStyle,
    ) -> Vec<BlockOutcome> {
        let variant = style
            .file_name(descriptor)
            .unwrap_or(descriptor.name.as_str());
        info!("Generating assets for font: {}", variant);

        let mut outcomes = Vec::with_capacity(descriptor.blocks.len());
        for name in descriptor.blocks.iter() {
            let block = match self.blocks.find(name) {
                Some(block) => block.clone(),
                None => {
                    outcomes.push(BlockOutcome::UnknownBlock(name.clone()));
                    continue;
                }
            };

            let outcome = match self
                .build_block_assets(font, font_file, &block, info, style)
                .await
            {
                Ok(assets) => BlockOutcome::Generated(assets),
                Err(BlockError::NoGlyphsInBlock { block, .. }) => BlockOutcome::NoGlyphs { block },
                Err(cause) => BlockOutcome::Failed {
                    block: block.category,
                    cause,
                },
            };

            outcomes.push(outcome);
        }

        for outcome in outcomes.iter() {
            if let Some(warning) = outcome.warning(&font.name) {
                warn!("{}", warning);
            }
        }

        outcomes
    }

    /// Runs every style pass of one family. Returns `None` if the base file can't be opened.
    pub async fn build_family(
        &mut self,
        descriptor: &FontDescriptor,
        font_dir: &Path,
    ) -> Option<Font> {
        let base_file = font_path(font_dir, &descriptor.name);
        let info = match self.fonts.open(&base_file).await {
            Ok(info) => info,
            Err(err) => {
                warn!(
                    "Skipping font {:?}: failed to open {:?}: {}",
                    descriptor.name, base_file, err
                );
                return None;
            }
        };

        let mut font = Font::new(descriptor.name.clone(), self.scaled_metrics(&info));
        let outcomes = self
            .build_font_assets(descriptor, &mut font, &base_file, &info, FontStyle::Regular)
            .await;
        self.log_report(&font.name, FontStyle::Regular, &outcomes);

        for style in FontStyle::ALL.into_iter().skip(1) {
            let file_name = match style.file_name(descriptor) {
                Some(file_name) => file_name,
                None => continue,
            };

            let file = font_path(font_dir, file_name);
            let info = match self.fonts.open(&file).await {
                Ok(info) => info,
                Err(err) => {
                    warn!(
                        "Skipping {} variant of {:?}: failed to open {:?}: {}",
                        style, descriptor.name, file, err
                    );
                    continue;
                }
            };

            style.assign(&mut font, file_name);
            let outcomes = self
                .build_font_assets(descriptor, &mut font, &file, &info, style)
                .await;
            self.log_report(&font.name, style, &outcomes);
        }

        Some(font)
    }

    fn log_report(&self, font: &str, style: FontStyle, outcomes: &[BlockOutcome]) {
        let report = FontReport::fold(outcomes);
        info!(
            "Font {:?} ({}): {} block(s) generated, {} skipped",
            font,
            style,
            report.generated,
            report.skipped()
        );
    }

    /// Generates the replacement character from the fallback font. Any failure here is fatal.
    ///
    /// Only U+FFFD is rendered, even when the fallback covers more of `Specials`.
    pub async fn build_replacement_assets(&mut self) -> anyhow::Result<()> {
        let fallback = self.options.fallback_font.clone();
        let mut info = self
            .fonts
            .open(&fallback)
            .await
            .with_context(|| format!("opening fallback font {:?}", fallback))?;
        info.code_points
            .retain(|code_point| *code_point == REPLACEMENT_CHAR as u32);

        let mut font = Font::new(REPLACEMENT_FONT, self.scaled_metrics(&info));
        let block = BlockRange::new(REPLACEMENT_BLOCK, REPLACEMENT_MIN, REPLACEMENT_MAX);
        self.build_block_assets(&mut font, &fallback, &block, &info, FontStyle::Regular)
            .await
            .context("generating replacement character assets")?;

        self.catalog.fonts.push(font);
        Ok(())
    }

    /// Builds every family in `descriptor`, then the replacement character, and
    /// persists the finished catalog.
    pub async fn build(
        mut self,
        descriptor: &FontsDescriptor,
        font_dir: &Path,
    ) -> anyhow::Result<FontCatalog> {
        for family in descriptor.fonts.iter() {
            if let Some(font) = self.build_family(family, font_dir).await {
                self.catalog.fonts.push(font);
            }
        }

        self.build_replacement_assets().await?;

        let path = self
            .sink
            .write_catalog(&self.catalog)
            .await
            .context("writing font catalog")?;
        info!("Wrote font catalog to {:?}", path);

        Ok(self.catalog)
    }
}
