// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use std::path::Path;

use async_trait::async_trait;
use font_mud::{FontError, FontResult};
use ttf_parser::Face;

use crate::model::FontMetrics;

/// Global metrics and code point coverage of one font file, in font units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontInfo {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub cap_height: i16,
    pub x_height: i16,

    /// Ascending code points mapped by the font's Unicode cmap subtables.
    pub code_points: Vec<u32>,
}

impl FontInfo {
    pub fn parse(data: &[u8]) -> FontResult<Self> {
        let face = Face::parse(data, 0).map_err(FontError::FaceParsing)?;

        let mut code_points = BTreeSet::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }

                subtable.codepoints(|code_point| {
                    if subtable.glyph_index(code_point).is_some() {
                        code_points.insert(code_point);
                    }
                });
            }
        }

        Ok(Self {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
            cap_height: face.capital_height().unwrap_or(0),
            x_height: face.x_height().unwrap_or(0),
            code_points: code_points.into_iter().collect(),
        })
    }

    /// The characters of this font inside `[min, max]`, in the font's order.
    pub fn charset_in(&self, min: u32, max: u32) -> Vec<char> {
        self.code_points
            .iter()
            .filter(|code_point| (min..=max).contains(*code_point))
            .filter_map(|code_point| char::from_u32(*code_point))
            .collect()
    }

    pub fn supports(&self, code_point: u32) -> bool {
        self.code_points.binary_search(&code_point).is_ok()
    }
}

impl FontMetrics {
    /// Scales `info`'s metrics to `size` pixels per em. Baseline and line height stay zero.
    pub fn scaled(info: &FontInfo, size: u32, distance_range: u32) -> Self {
        let scale = |units: i16| -> i32 {
            if info.units_per_em == 0 {
                return 0;
            }

            (units as f64 / info.units_per_em as f64 * size as f64).round() as i32
        };

        Self {
            size,
            distance_range,
            base: 0,
            line_height: 0,
            line_gap: scale(info.line_gap),
            cap_height: scale(info.cap_height),
            x_height: scale(info.x_height),
        }
    }
}

/// Opens fonts for their metrics and coverage.
#[async_trait]
pub trait FontSource: Send + Sync {
    async fn open(&self, path: &Path) -> FontResult<FontInfo>;
}

/// Reads font files from the filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsFontSource;

#[async_trait]
impl FontSource for FsFontSource {
    async fn open(&self, path: &Path) -> FontResult<FontInfo> {
        let data = tokio::fs::read(path).await?;
        FontInfo::parse(&data)
    }
}
