// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

//! Builds font catalogs: per-block glyph atlases for a set of font families
//! and the document a renderer uses to find them.

use tracing::Level;

pub mod blocks;
pub mod builder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod metrics;
pub mod model;
pub mod output;
pub mod style;

#[cfg(test)]
mod testing;

pub use anyhow;
pub use font_mud;
pub use tracing;

pub use blocks::{BlockRange, BlockTable};
pub use builder::{BlockOutcome, BuildOptions, CatalogBuilder};
pub use descriptor::{FontDescriptor, FontsDescriptor};
pub use metrics::{FontInfo, FontSource, FsFontSource};
pub use model::{Font, FontCatalog, FontMetrics, UnicodeBlock};
pub use output::{AssetSink, FsAssetSink};
pub use style::FontStyle;

/// Helper function to set up console logging with reasonable defaults.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let format = tracing_subscriber::fmt::format().compact();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .event_format(format)
        .init();
}
