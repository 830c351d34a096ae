// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

use clap::Parser;
use font_catalog::config::{get_config_path, load_config, Config};
use font_catalog::{
    init_logging, BlockTable, BuildOptions, CatalogBuilder, FontsDescriptor, FsAssetSink,
    FsFontSource,
};
use font_mud::{AtlasOptions, FieldType, MudGenerator};
use tracing::info;
use yacexits::{EX_CONFIG, EX_DATAERR, EX_NOINPUT, EX_OK, EX_SOFTWARE, EX_USAGE};

pub struct CommandError {
    message: String,
    exit_code: u32,
}

trait ToCommandError<T, E> {
    fn to_command_error<C: Display>(self, context: C, exit_code: u32) -> Result<T, CommandError>;
}

impl<T, E> ToCommandError<T, E> for Result<T, E>
where
    E: Display,
{
    fn to_command_error<C: Display>(self, context: C, exit_code: u32) -> Result<T, CommandError> {
        match self {
            Ok(ok) => Ok(ok),
            Err(e) => Err(CommandError {
                message: format!("{}: {:#}", context, e),
                exit_code,
            }),
        }
    }
}

impl<T> ToCommandError<T, ()> for Option<T> {
    fn to_command_error<C: Display>(self, context: C, exit_code: u32) -> Result<T, CommandError> {
        match self {
            Some(val) => Ok(val),
            None => Err(CommandError {
                message: context.to_string(),
                exit_code,
            }),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Generates distance-field glyph atlases for a set of fonts, one per Unicode
/// block and style, plus the font catalog describing them.
#[derive(Debug, Parser)]
pub struct Args {
    /// Name of the font catalog.
    #[clap(short = 'n', long, default_value = "Default")]
    pub name: String,

    /// JSON file listing the fonts and the Unicode blocks each one supports.
    #[clap(short = 'f', long)]
    pub fonts: Option<PathBuf>,

    /// Glyph size in pixels.
    #[clap(short = 's', long, default_value = "32")]
    pub size: u32,

    /// Distance field type: sdf or msdf.
    #[clap(short = 't', long = "type", default_value = "sdf")]
    pub field_type: FieldType,

    /// Distance range in pixels.
    #[clap(short = 'd', long, default_value = "8")]
    pub distance_range: u32,

    /// Root directory for generated assets. Defaults to resources/fonts.
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Unicode block table to use instead of the built-in one.
    #[clap(long)]
    pub blocks: Option<PathBuf>,

    /// Font providing the replacement character.
    #[clap(long)]
    pub fallback_font: Option<PathBuf>,

    /// A configuration file to use if not the default one.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Log every file written.
    #[clap(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    fn load_config(&self) -> CommandResult<Config> {
        let path = match self.config.clone() {
            Some(path) => path,
            None => match get_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Config::default()),
            },
        };

        load_config(&path).to_command_error("loading configuration", EX_CONFIG)
    }

    /// Merges flags over the configuration file.
    fn resolve_config(&self, config: Config) -> Config {
        Config {
            output_dir: self.output.clone().or(config.output_dir),
            fallback_font: self.fallback_font.clone().or(config.fallback_font),
            blocks: self.blocks.clone().or(config.blocks),
        }
    }

    pub async fn run(self) -> CommandResult<()> {
        info!("Creating: {}", self.name);

        let fonts_path = self
            .fonts
            .clone()
            .to_command_error("No supported fonts file was specified (-f).", EX_USAGE)?;

        let config = self.load_config()?;
        let config = self.resolve_config(config);

        let blocks = match config.blocks.as_ref() {
            Some(path) => BlockTable::from_path(path),
            None => BlockTable::builtin(),
        }
        .to_command_error("loading Unicode block table", EX_DATAERR)?;

        let (descriptor, font_dir) =
            FontsDescriptor::load(&fonts_path).to_command_error("loading fonts file", EX_NOINPUT)?;

        let options = BuildOptions {
            catalog_name: self.name.clone(),
            atlas: AtlasOptions::new(self.field_type, self.size, self.distance_range),
            fallback_font: config.fallback_font(),
        };

        let builder = CatalogBuilder::new(
            options,
            blocks,
            Arc::new(MudGenerator),
            Arc::new(FsFontSource),
            Arc::new(FsAssetSink::new(config.output_dir())),
        );

        let catalog = builder
            .build(&descriptor, &font_dir)
            .await
            .to_command_error("building font catalog", EX_SOFTWARE)?;

        info!(
            "Catalog {:?}: {} font(s), {} block(s)",
            catalog.name,
            catalog.fonts.len(),
            catalog.supported_blocks.len()
        );

        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    match args.run().await {
        Ok(_) => exit(EX_OK as i32),
        Err(e) => {
            eprintln!("ERROR: {}", e.message);
            exit(e.exit_code as i32)
        }
    }
}
