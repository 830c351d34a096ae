// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use font_mud::GeneratedAtlas;
use tracing::debug;

use crate::model::FontCatalog;
use crate::style::FontStyle;

/// Where generated assets and the finished catalog are persisted.
#[async_trait]
pub trait AssetSink: Send + Sync {
    /// Stores the pages and layout of one (font, style, block) atlas.
    async fn write_block_assets(
        &self,
        catalog_name: &str,
        style: FontStyle,
        font_name: &str,
        stem: &str,
        atlas: &GeneratedAtlas,
    ) -> io::Result<()>;

    /// Stores the finished catalog document, returning where it went.
    async fn write_catalog(&self, catalog: &FontCatalog) -> io::Result<PathBuf>;
}

/// Writes everything beneath a root directory.
#[derive(Clone, Debug)]
pub struct FsAssetSink {
    root: PathBuf,
}

impl FsAssetSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<root>/<catalog><suffix>/<font>`
    pub fn font_dir(&self, catalog_name: &str, style: FontStyle, font_name: &str) -> PathBuf {
        self.root
            .join(format!("{}{}", catalog_name, style.suffix()))
            .join(font_name)
    }

    pub fn catalog_path(&self, catalog_name: &str) -> PathBuf {
        self.root.join(format!("{}_FontCatalog.json", catalog_name))
    }
}

#[async_trait]
impl AssetSink for FsAssetSink {
    async fn write_block_assets(
        &self,
        catalog_name: &str,
        style: FontStyle,
        font_name: &str,
        stem: &str,
        atlas: &GeneratedAtlas,
    ) -> io::Result<()> {
        let dir = self.font_dir(catalog_name, style, font_name);
        tokio::fs::create_dir_all(&dir).await?;

        for texture in atlas.textures.iter() {
            let path = dir.join(format!("{}.png", texture.filename));
            debug!("Writing texture page {:?}", path);
            tokio::fs::write(&path, &texture.data).await?;
        }

        let path = dir.join(format!("{}.json", stem));
        debug!("Writing glyph layout {:?}", path);
        let layout = serde_json::to_vec(&atlas.layout)?;
        tokio::fs::write(&path, layout).await
    }

    async fn write_catalog(&self, catalog: &FontCatalog) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.catalog_path(&catalog.name);
        let data = serde_json::to_vec(catalog)?;
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }
}
