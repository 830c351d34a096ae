// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use glam::UVec2;
use rect_packer::Packer;
use tracing::debug;

use crate::error::{FontError, FontResult};
use crate::glyph_bitmap::{GlyphBitmap, GlyphField};
use crate::options::AtlasOptions;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphPlacement {
    pub page: u32,
    pub position: UVec2,
}

/// A set of glyph fields packed onto one or more texture pages.
pub struct GlyphAtlas {
    pub pages: Vec<GlyphBitmap>,
    pub glyphs: Vec<GlyphField>,

    /// Indexed like `glyphs`. Empty glyphs keep the default placement.
    pub placements: Vec<GlyphPlacement>,
}

impl GlyphAtlas {
    pub const START_SIZE: u32 = 256;

    /// Packs every glyph, spilling onto further pages once a page reaches the maximum size.
    pub fn pack(glyphs: Vec<GlyphField>, options: &AtlasOptions) -> FontResult<Self> {
        let max = options.max_texture_size;
        let mut placements = vec![GlyphPlacement::default(); glyphs.len()];
        let mut remaining = Vec::new();
        for (index, glyph) in glyphs.iter().enumerate() {
            if glyph.bitmap.is_empty() {
                continue;
            }

            if glyph.bitmap.width > max || glyph.bitmap.height > max {
                return Err(FontError::PackingError(glyph.codepoint));
            }

            remaining.push(index);
        }

        let mut pages = Vec::new();
        loop {
            let sizes: Vec<(i32, i32)> = remaining
                .iter()
                .map(|index| {
                    let bitmap = &glyphs[*index].bitmap;
                    (bitmap.width as i32, bitmap.height as i32)
                })
                .collect();
            let config = Self::generate_config(&sizes, options);
            let page_index = pages.len() as u32;
            let mut packer = Packer::new(config);
            let mut page = GlyphBitmap::new(
                config.width as u32,
                config.height as u32,
                options.field_type.channels(),
            );
            let mut carried = Vec::new();
            for (index, (width, height)) in remaining.iter().zip(sizes) {
                match packer.pack(width, height, false) {
                    Some(rect) => {
                        let glyph = &glyphs[*index];
                        glyph
                            .bitmap
                            .copy_to(&mut page, rect.x as u32, rect.y as u32);
                        placements[*index] = GlyphPlacement {
                            page: page_index,
                            position: UVec2::new(rect.x as u32, rect.y as u32),
                        };
                    }
                    None => carried.push(*index),
                }
            }

            debug!(
                "Packed page {} ({}x{}), {} glyphs left",
                page_index,
                config.width,
                config.height,
                carried.len()
            );
            pages.push(page);

            if carried.is_empty() {
                break;
            }

            if carried.len() == remaining.len() {
                return Err(FontError::PackingError(glyphs[carried[0]].codepoint));
            }

            remaining = carried;
        }

        Ok(Self {
            pages,
            glyphs,
            placements,
        })
    }

    /// Finds the smallest page that holds every size, growing width and height in turn.
    ///
    /// Returns a maximum-size page if not everything fits.
    fn generate_config(sizes: &[(i32, i32)], options: &AtlasOptions) -> rect_packer::Config {
        let max = options.max_texture_size as i32;
        let start = if options.smart_size {
            (Self::START_SIZE as i32).min(max)
        } else {
            max
        };

        let mut config = rect_packer::Config {
            width: start,
            height: start,
            border_padding: 0,
            rectangle_padding: options.texture_padding as i32,
        };

        let mut last_switched_width = false;
        loop {
            let mut packer = Packer::new(config);
            let fits = sizes
                .iter()
                .all(|(width, height)| packer.pack(*width, *height, false).is_some());
            if fits || (config.width >= max && config.height >= max) {
                return config;
            }

            let grow_height = (last_switched_width && config.height < max) || config.width >= max;
            if grow_height {
                last_switched_width = false;
                config.height = (config.height * 2).min(max);
            } else {
                last_switched_width = true;
                config.width = (config.width * 2).min(max);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;
    use ttf_parser::GlyphId;

    use super::*;
    use crate::options::FieldType;

    fn field(codepoint: char, width: u32, height: u32) -> GlyphField {
        let mut bitmap = GlyphBitmap::new(width, height, 1);
        bitmap.data.fill(200);
        GlyphField {
            codepoint,
            glyph: GlyphId(1),
            bitmap,
            offset: IVec2::ZERO,
            advance: width as i32,
        }
    }

    #[test]
    fn small_set_fits_start_page() {
        let glyphs = vec![field('a', 20, 30), field('b', 20, 30), field(' ', 0, 0)];
        let atlas = GlyphAtlas::pack(glyphs, &AtlasOptions::default()).unwrap();
        assert_eq!(atlas.pages.len(), 1);
        assert_eq!(atlas.pages[0].width, GlyphAtlas::START_SIZE);
        assert_ne!(atlas.placements[0].position, atlas.placements[1].position);
    }

    #[test]
    fn page_grows_before_spilling() {
        let glyphs = (0..40).map(|i| field(char::from(b'A' + i), 60, 60)).collect();
        let atlas = GlyphAtlas::pack(glyphs, &AtlasOptions::default()).unwrap();
        assert_eq!(atlas.pages.len(), 1);
        assert!(atlas.pages[0].width > GlyphAtlas::START_SIZE);
    }

    #[test]
    fn spills_onto_second_page() {
        let mut options = AtlasOptions::new(FieldType::Sdf, 32, 8);
        options.max_texture_size = 128;
        let glyphs = (0..6).map(|i| field(char::from(b'a' + i), 60, 60)).collect();
        let atlas = GlyphAtlas::pack(glyphs, &options).unwrap();
        assert!(atlas.pages.len() > 1);
        assert!(atlas.placements.iter().any(|p| p.page == 1));
        assert!(atlas.pages.iter().all(|p| p.width <= 128 && p.height <= 128));
    }

    #[test]
    fn oversized_glyph_is_a_packing_error() {
        let mut options = AtlasOptions::default();
        options.max_texture_size = 64;
        let result = GlyphAtlas::pack(vec![field('W', 100, 10)], &options);
        assert!(matches!(result, Err(FontError::PackingError('W'))));
    }

    #[test]
    fn only_empty_glyphs_still_produce_a_page() {
        let atlas = GlyphAtlas::pack(vec![field(' ', 0, 0)], &AtlasOptions::default()).unwrap();
        assert_eq!(atlas.pages.len(), 1);
    }
}
