// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

//! The catalog document and the entities nested in it.

use font_mud::FieldType;
use serde::{Deserialize, Serialize};

use crate::blocks::BlockRange;
use crate::style::FontStyle;

/// A contiguous code point range and the logical fonts that supply glyphs for it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UnicodeBlock {
    pub name: String,
    pub min: u32,
    pub max: u32,
    pub fonts: Vec<String>,
}

/// Font metrics in output pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    pub size: u32,
    pub distance_range: u32,

    /// Set from the last generated atlas; zero until then.
    pub base: i32,
    pub line_height: i32,

    pub line_gap: i32,
    pub cap_height: i32,
    pub x_height: i32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    pub name: String,
    pub metrics: FontMetrics,

    /// Every character generated for this font, in processing order.
    pub charset: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold_italic: Option<String>,
}

impl Font {
    pub fn new(name: impl Into<String>, metrics: FontMetrics) -> Self {
        Self {
            name: name.into(),
            metrics,
            charset: String::new(),
            bold: None,
            italic: None,
            bold_italic: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontCatalog {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub size: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub distance_range: u32,
    pub fonts: Vec<Font>,
    pub supported_blocks: Vec<UnicodeBlock>,
}

impl FontCatalog {
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        size: u32,
        distance_range: u32,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            size,
            max_width: 0,
            max_height: 0,
            distance_range,
            fonts: Vec::new(),
            supported_blocks: Vec::new(),
        }
    }

    /// Widens the catalog-wide glyph box to hold a `width` by `height` glyph.
    pub fn merge_glyph_extent(&mut self, width: u32, height: u32) {
        self.max_width = self.max_width.max(width);
        self.max_height = self.max_height.max(height);
    }

    /// Records that `font_name` supplies glyphs for `block`.
    ///
    /// A block first seen in a styled pass is still registered, but styled
    /// passes never append to an existing entry.
    pub fn register_block(&mut self, block: &BlockRange, font_name: &str, style: FontStyle) {
        match self
            .supported_blocks
            .iter_mut()
            .find(|entry| entry.name == block.category)
        {
            None => self.supported_blocks.push(UnicodeBlock {
                name: block.category.clone(),
                min: block.min(),
                max: block.max(),
                fonts: vec![font_name.to_string()],
            }),
            Some(entry) if style.is_regular() => entry.fonts.push(font_name.to_string()),
            Some(_) => {}
        }
    }

    pub fn block(&self, name: &str) -> Option<&UnicodeBlock> {
        self.supported_blocks.iter().find(|block| block.name == name)
    }

    pub fn font(&self, name: &str) -> Option<&Font> {
        self.fonts.iter().find(|font| font.name == name)
    }
}
