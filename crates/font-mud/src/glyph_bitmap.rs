// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use glam::IVec2;
use msdfgen::{Bitmap, FillRule, FontExt, MsdfGeneratorConfig, Range, Rgba};
use ttf_parser::{Face, GlyphId};

use crate::error::{FontError, FontResult};
use crate::options::{AtlasOptions, FieldType};

pub const ANGLE_THRESHOLD: f64 = 3.0;

/// A rendered distance field for one character, ready to be packed.
pub struct GlyphField {
    pub codepoint: char,
    pub glyph: GlyphId,
    pub bitmap: GlyphBitmap,

    /// BMFont-style offset of the bitmap's top-left from the pen position on the line top.
    pub offset: IVec2,
    pub advance: i32,
}

impl GlyphField {
    /// Renders `codepoint` with `scale` output pixels per font unit.
    ///
    /// `base` is the rounded baseline distance from the line top, in pixels.
    /// Both field types come from one multi-channel true SDF: MSDF pages keep
    /// all four channels, SDF pages keep only the true distance in alpha.
    pub fn generate(
        face: &Face,
        codepoint: char,
        scale: f32,
        base: i32,
        options: &AtlasOptions,
    ) -> FontResult<Self> {
        let glyph = face.glyph_index(codepoint).unwrap_or(GlyphId(0));
        let advance = face
            .glyph_hor_advance(glyph)
            .map(|advance| (advance as f32 * scale).round() as i32)
            .unwrap_or(0);
        let channels = options.field_type.channels();

        let empty = Self {
            codepoint,
            glyph,
            bitmap: GlyphBitmap::new(0, 0, channels),
            offset: IVec2::ZERO,
            advance,
        };

        let mut shape = match face.glyph_shape(glyph) {
            Some(shape) => shape,
            None => return Ok(empty),
        };

        let bounds = shape.get_bound();
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Ok(empty);
        }

        let scale = scale as f64;
        let margin = options.field_margin() * 2;
        let width = (bounds.width() * scale).ceil() as u32 + margin;
        let height = (bounds.height() * scale).ceil() as u32 + margin;
        let range = options.distance_range.max(1) as f64;

        shape.edge_coloring_simple(ANGLE_THRESHOLD, 0);
        let framing = bounds
            .autoframe(width, height, Range::Px(range), None)
            .ok_or(FontError::AutoFraming {
                glyph: codepoint,
                width,
                height,
                range,
            })?;

        let config = MsdfGeneratorConfig::default();
        let mut field = Bitmap::<Rgba<f32>>::new(width, height);
        shape.generate_mtsdf(&mut field, framing, config);
        shape.correct_sign(&mut field, framing, FillRule::default());
        shape.correct_msdf_error(&mut field, framing, config);

        // The glyph origin sits at `translate * scale` from the bitmap's bottom-left.
        let origin_x = framing.translate.x * framing.scale.x;
        let origin_y = framing.translate.y * framing.scale.y;
        let offset = IVec2::new(
            (-origin_x).round() as i32,
            base - (height as f64 - origin_y).round() as i32,
        );

        Ok(Self {
            codepoint,
            glyph,
            bitmap: GlyphBitmap::from_field(&field, width, height, options.field_type),
            offset,
            advance,
        })
    }
}

fn conv(f: f32) -> u8 {
    (f.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub struct GlyphBitmap {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

impl GlyphBitmap {
    pub fn new(width: u32, height: u32, channels: u32) -> Self {
        Self {
            data: vec![0; (width * height * channels) as usize],
            width,
            height,
            channels,
        }
    }

    /// Converts a generated field, flipping msdfgen's bottom-up rows.
    fn from_field(
        field: &Bitmap<Rgba<f32>>,
        width: u32,
        height: u32,
        field_type: FieldType,
    ) -> Self {
        let channels = field_type.channels();
        let mut bitmap = Self::new(width, height, channels);
        let pixels = field.pixels();
        for row in 0..height as usize {
            let src = (height as usize - 1 - row) * width as usize;
            for col in 0..width as usize {
                let p = &pixels[src + col];
                let dst = (row * width as usize + col) * channels as usize;
                match field_type {
                    FieldType::Sdf => bitmap.data[dst] = conv(p.a),
                    FieldType::Msdf => bitmap.data[dst..dst + 4]
                        .copy_from_slice(&[conv(p.r), conv(p.g), conv(p.b), conv(p.a)]),
                }
            }
        }

        bitmap
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn copy_to(&self, dst: &mut GlyphBitmap, x: u32, y: u32) {
        if self.width + x > dst.width || self.height + y > dst.height {
            panic!("copy_to out-of-bounds");
        }

        let row_len = (self.width * self.channels) as usize;
        let mut src_cursor = 0;
        let mut dst_cursor = ((y * dst.width + x) * dst.channels) as usize;
        for _ in 0..self.height {
            let src_range = src_cursor..(src_cursor + row_len);
            let dst_range = dst_cursor..(dst_cursor + row_len);
            dst.data[dst_range].copy_from_slice(&self.data[src_range]);
            src_cursor += row_len;
            dst_cursor += (dst.width * dst.channels) as usize;
        }
    }

    /// Encodes the bitmap as an 8-bit grayscale or RGBA PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        let mut output = Vec::new();
        let mut encoder = png::Encoder::new(&mut output, self.width, self.height);
        encoder.set_color(match self.channels {
            1 => png::ColorType::Grayscale,
            _ => png::ColorType::Rgba,
        });
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.data)?;
        writer.finish()?;
        Ok(output)
    }
}
