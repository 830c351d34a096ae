// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

//! BMFont-compatible JSON description of a generated atlas.

use serde::{Deserialize, Serialize};

use crate::options::FieldType;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BmFontLayout {
    pub pages: Vec<String>,
    pub chars: Vec<BmChar>,
    pub info: BmInfo,
    pub common: BmCommon,
    #[serde(rename = "distanceField")]
    pub distance_field: BmDistanceField,
    pub kernings: Vec<BmKerning>,
}

impl BmFontLayout {
    /// The largest glyph bitmap in this layout.
    pub fn max_glyph_extent(&self) -> (u32, u32) {
        self.chars.iter().fold((0, 0), |(width, height), c| {
            (width.max(c.width), height.max(c.height))
        })
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BmChar {
    pub id: u32,
    pub index: u16,
    pub char: String,
    pub width: u32,
    pub height: u32,
    pub xoffset: i32,
    pub yoffset: i32,
    pub xadvance: i32,
    pub chnl: u32,
    pub x: u32,
    pub y: u32,
    pub page: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BmInfo {
    pub face: String,
    pub size: u32,
    pub bold: u8,
    pub italic: u8,
    pub charset: Vec<String>,
    pub unicode: u8,
    #[serde(rename = "stretchH")]
    pub stretch_h: u32,
    pub smooth: u8,
    pub aa: u8,
    pub padding: [u32; 4],
    pub spacing: [u32; 2],
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmCommon {
    pub line_height: i32,
    pub base: i32,
    pub scale_w: u32,
    pub scale_h: u32,
    pub pages: u32,
    pub packed: u8,
    pub alpha_chnl: u8,
    pub red_chnl: u8,
    pub green_chnl: u8,
    pub blue_chnl: u8,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmDistanceField {
    pub field_type: FieldType,
    pub distance_range: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BmKerning {
    pub first: u32,
    pub second: u32,
    pub amount: i32,
}
