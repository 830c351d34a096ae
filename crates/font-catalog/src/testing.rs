// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

//! In-memory stand-ins for the generator, font source and asset sink.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use font_mud::layout::*;
use font_mud::{AtlasGenerator, AtlasRequest, FontError, FontResult, GeneratedAtlas, Texture};
use parking_lot::Mutex;

use crate::metrics::{FontInfo, FontSource};
use crate::model::FontCatalog;
use crate::output::AssetSink;
use crate::style::FontStyle;

pub const MOCK_BASE: i32 = 30;

/// Deterministic glyph box for `c`.
pub fn mock_glyph_size(c: char) -> (u32, u32) {
    let c = c as u32;
    (c % 17 + 5, c % 13 + 10)
}

/// Line height reported for a request of `count` characters.
pub fn mock_line_height(count: i32) -> i32 {
    40 + count
}

pub fn font_info(code_points: impl IntoIterator<Item = u32>) -> FontInfo {
    let mut code_points: Vec<u32> = code_points.into_iter().collect();
    code_points.sort_unstable();
    code_points.dedup();
    FontInfo {
        units_per_em: 1000,
        ascender: 1069,
        descender: -293,
        line_gap: 0,
        cap_height: 714,
        x_height: 536,
        code_points,
    }
}

/// Builds an atlas with one glyph per size, spread across `pages` pages.
pub fn fake_atlas(stem: &str, sizes: &[(u32, u32)], pages: usize) -> GeneratedAtlas {
    let textures: Vec<Texture> = (0..pages)
        .map(|index| Texture {
            filename: if pages == 1 {
                stem.to_string()
            } else {
                format!("{}_{}", stem, index)
            },
            data: vec![index as u8; 8],
        })
        .collect();

    let chars = sizes
        .iter()
        .enumerate()
        .map(|(index, (width, height))| BmChar {
            id: 0x41 + index as u32,
            index: index as u16,
            char: char::from_u32(0x41 + index as u32).unwrap_or('?').to_string(),
            width: *width,
            height: *height,
            xoffset: 0,
            yoffset: 0,
            xadvance: *width as i32,
            chnl: 15,
            x: 0,
            y: 0,
            page: 0,
        })
        .collect();

    GeneratedAtlas {
        layout: BmFontLayout {
            pages: textures
                .iter()
                .map(|texture| format!("{}.png", texture.filename))
                .collect(),
            chars,
            info: BmInfo {
                face: stem.to_string(),
                size: 32,
                bold: 0,
                italic: 0,
                charset: vec![],
                unicode: 1,
                stretch_h: 100,
                smooth: 1,
                aa: 1,
                padding: [0; 4],
                spacing: [2, 2],
            },
            common: BmCommon {
                line_height: mock_line_height(sizes.len() as i32),
                base: MOCK_BASE,
                scale_w: 256,
                scale_h: 256,
                pages: pages as u32,
                packed: 0,
                alpha_chnl: 0,
                red_chnl: 0,
                green_chnl: 0,
                blue_chnl: 0,
            },
            distance_field: BmDistanceField {
                field_type: font_mud::FieldType::Sdf,
                distance_range: 8,
            },
            kernings: vec![],
        },
        textures,
    }
}

/// Records requests and answers with [mock_glyph_size] boxes.
#[derive(Default)]
pub struct MockGenerator {
    failing: HashSet<String>,
    requests: Mutex<Vec<AtlasRequest>>,
}

impl MockGenerator {
    /// A generator that fails for requests whose file stem is listed.
    pub fn failing(stems: &[&str]) -> Self {
        Self {
            failing: stems.iter().map(|stem| stem.to_string()).collect(),
            requests: Default::default(),
        }
    }

    pub fn requests(&self) -> Vec<AtlasRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl AtlasGenerator for MockGenerator {
    async fn generate(&self, request: AtlasRequest) -> FontResult<GeneratedAtlas> {
        self.requests.lock().push(request.clone());
        if self.failing.contains(&request.filename) {
            return Err(FontError::Io(io::Error::new(
                io::ErrorKind::Other,
                "mock generator failure",
            )));
        }

        let sizes: Vec<_> = request.charset.iter().map(|c| mock_glyph_size(*c)).collect();
        Ok(fake_atlas(&request.filename, &sizes, 1))
    }
}

#[derive(Default)]
pub struct MemoryFontSource {
    fonts: HashMap<PathBuf, FontInfo>,
}

impl MemoryFontSource {
    pub fn with(mut self, path: impl Into<PathBuf>, info: FontInfo) -> Self {
        self.fonts.insert(path.into(), info);
        self
    }
}

#[async_trait]
impl FontSource for MemoryFontSource {
    async fn open(&self, path: &Path) -> FontResult<FontInfo> {
        self.fonts.get(path).cloned().ok_or_else(|| {
            FontError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no font at {:?}", path),
            ))
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenBlock {
    pub catalog: String,
    pub style: FontStyle,
    pub font: String,
    pub stem: String,
    pub pages: Vec<String>,
}

#[derive(Default)]
pub struct MemorySink {
    blocks: Mutex<Vec<WrittenBlock>>,
    catalog: Mutex<Option<FontCatalog>>,
}

impl MemorySink {
    pub fn blocks(&self) -> Vec<WrittenBlock> {
        self.blocks.lock().clone()
    }

    pub fn catalog(&self) -> Option<FontCatalog> {
        self.catalog.lock().clone()
    }
}

#[async_trait]
impl AssetSink for MemorySink {
    async fn write_block_assets(
        &self,
        catalog_name: &str,
        style: FontStyle,
        font_name: &str,
        stem: &str,
        atlas: &GeneratedAtlas,
    ) -> io::Result<()> {
        self.blocks.lock().push(WrittenBlock {
            catalog: catalog_name.to_string(),
            style,
            font: font_name.to_string(),
            stem: stem.to_string(),
            pages: atlas
                .textures
                .iter()
                .map(|texture| texture.filename.clone())
                .collect(),
        });

        Ok(())
    }

    async fn write_catalog(&self, catalog: &FontCatalog) -> io::Result<PathBuf> {
        *self.catalog.lock() = Some(catalog.clone());
        Ok(PathBuf::from(format!("{}_FontCatalog.json", catalog.name)))
    }
}
