// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The distance-field encoding of a generated atlas.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-channel signed distance field.
    #[default]
    Sdf,

    /// Multi-channel signed distance field.
    Msdf,
}

impl FieldType {
    /// The number of bytes per pixel in a page of this field type.
    pub fn channels(self) -> u32 {
        match self {
            FieldType::Sdf => 1,
            FieldType::Msdf => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Sdf => "sdf",
            FieldType::Msdf => "msdf",
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sdf" => Ok(FieldType::Sdf),
            "msdf" => Ok(FieldType::Msdf),
            other => Err(format!("unknown field type {:?} (expected sdf or msdf)", other)),
        }
    }
}

/// Parameters shared by every atlas generated for one catalog.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtlasOptions {
    pub field_type: FieldType,

    /// The em size in output pixels.
    pub font_size: u32,

    /// The width in pixels of the distance band encoded around each outline.
    pub distance_range: u32,

    /// Gap in pixels between packed glyphs.
    pub texture_padding: u32,

    /// Grow pages from a small size instead of always using the maximum.
    pub smart_size: bool,

    pub max_texture_size: u32,
}

impl AtlasOptions {
    pub const TEXTURE_PADDING: u32 = 2;
    pub const MAX_TEXTURE_SIZE: u32 = 2048;

    pub fn new(field_type: FieldType, font_size: u32, distance_range: u32) -> Self {
        Self {
            field_type,
            font_size,
            distance_range,
            texture_padding: Self::TEXTURE_PADDING,
            smart_size: true,
            max_texture_size: Self::MAX_TEXTURE_SIZE,
        }
    }

    /// Pixels of padding around each glyph bitmap so the distance band is not clipped.
    pub fn field_margin(&self) -> u32 {
        (self.distance_range + 1) / 2
    }
}

impl Default for AtlasOptions {
    fn default() -> Self {
        Self::new(FieldType::Sdf, 32, 8)
    }
}
