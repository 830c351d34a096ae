// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use async_trait::async_trait;
use ttf_parser::Face;

use crate::error::{FontError, FontResult};
use crate::glyph_atlas::GlyphAtlas;
use crate::glyph_bitmap::GlyphField;
use crate::layout::*;
use crate::options::AtlasOptions;

/// One atlas to generate: a font file, the characters to render from it, and
/// the stem used to name the output pages.
#[derive(Clone, Debug)]
pub struct AtlasRequest {
    pub font_file: PathBuf,
    pub charset: Vec<char>,
    pub filename: String,
    pub options: AtlasOptions,
}

/// An encoded texture page.
#[derive(Clone, Debug)]
pub struct Texture {
    /// File name stem, without the `.png` extension.
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct GeneratedAtlas {
    pub textures: Vec<Texture>,
    pub layout: BmFontLayout,
}

#[async_trait]
pub trait AtlasGenerator: Send + Sync {
    async fn generate(&self, request: AtlasRequest) -> FontResult<GeneratedAtlas>;
}

/// Generates atlases from TrueType/OpenType files on disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct MudGenerator;

#[async_trait]
impl AtlasGenerator for MudGenerator {
    async fn generate(&self, request: AtlasRequest) -> FontResult<GeneratedAtlas> {
        if request.charset.is_empty() {
            return Err(FontError::EmptyCharset);
        }

        let data = tokio::fs::read(&request.font_file).await?;
        tokio::task::spawn_blocking(move || generate_atlas(&data, &request))
            .await
            .map_err(|err| FontError::Join(err.to_string()))?
    }
}

fn page_name(filename: &str, index: usize, count: usize) -> String {
    if count == 1 {
        filename.to_string()
    } else {
        format!("{}_{}", filename, index)
    }
}

/// Renders, packs and encodes an atlas from in-memory font data.
pub fn generate_atlas(data: &[u8], request: &AtlasRequest) -> FontResult<GeneratedAtlas> {
    if request.charset.is_empty() {
        return Err(FontError::EmptyCharset);
    }

    let options = &request.options;
    let face = Face::parse(data, 0).map_err(FontError::FaceParsing)?;
    let scale = options.font_size as f32 / face.units_per_em() as f32;
    let base = (face.ascender() as f32 * scale).round() as i32;
    let line_height = ((face.ascender() as i32 - face.descender() as i32
        + face.line_gap() as i32) as f32
        * scale)
        .round() as i32;

    let mut fields = Vec::with_capacity(request.charset.len());
    for codepoint in request.charset.iter() {
        fields.push(GlyphField::generate(&face, *codepoint, scale, base, options)?);
    }

    let atlas = GlyphAtlas::pack(fields, options)?;
    let page_count = atlas.pages.len();
    let mut textures = Vec::with_capacity(page_count);
    for (index, page) in atlas.pages.iter().enumerate() {
        let data = page
            .encode_png()
            .map_err(|err| FontError::Io(std::io::Error::new(std::io::ErrorKind::Other, err)))?;
        textures.push(Texture {
            filename: page_name(&request.filename, index, page_count),
            data,
        });
    }

    let chars = atlas
        .glyphs
        .iter()
        .zip(atlas.placements.iter())
        .map(|(glyph, placement)| BmChar {
            id: glyph.codepoint as u32,
            index: glyph.glyph.0,
            char: glyph.codepoint.to_string(),
            width: glyph.bitmap.width,
            height: glyph.bitmap.height,
            xoffset: glyph.offset.x,
            yoffset: glyph.offset.y,
            xadvance: glyph.advance,
            chnl: 15,
            x: placement.position.x,
            y: placement.position.y,
            page: placement.page,
        })
        .collect();

    let (scale_w, scale_h) = atlas
        .pages
        .first()
        .map(|page| (page.width, page.height))
        .unwrap_or((0, 0));

    let face_name = request
        .font_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    let layout = BmFontLayout {
        pages: textures
            .iter()
            .map(|texture| format!("{}.png", texture.filename))
            .collect(),
        chars,
        info: BmInfo {
            face: face_name,
            size: options.font_size,
            bold: 0,
            italic: 0,
            charset: request.charset.iter().map(|c| c.to_string()).collect(),
            unicode: 1,
            stretch_h: 100,
            smooth: 1,
            aa: 1,
            padding: [0; 4],
            spacing: [options.texture_padding; 2],
        },
        common: BmCommon {
            line_height,
            base,
            scale_w,
            scale_h,
            pages: page_count as u32,
            packed: 0,
            alpha_chnl: 0,
            red_chnl: 0,
            green_chnl: 0,
            blue_chnl: 0,
        },
        distance_field: BmDistanceField {
            field_type: options.field_type,
            distance_range: options.distance_range,
        },
        kernings: Vec::new(),
    };

    Ok(GeneratedAtlas { textures, layout })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FieldType;

    fn request(charset: &str, field_type: FieldType) -> AtlasRequest {
        AtlasRequest {
            font_file: PathBuf::from("NotoSans-Regular.ttf"),
            charset: charset.chars().collect(),
            filename: "Basic_Latin".to_string(),
            options: AtlasOptions::new(field_type, 32, 8),
        }
    }

    #[test]
    fn generates_one_page_for_a_few_letters() {
        let atlas =
            generate_atlas(notosans::REGULAR_TTF, &request("AB g", FieldType::Sdf)).unwrap();
        assert_eq!(atlas.textures.len(), 1);
        assert_eq!(atlas.textures[0].filename, "Basic_Latin");
        assert_eq!(atlas.layout.pages, vec!["Basic_Latin.png".to_string()]);
        assert_eq!(atlas.layout.chars.len(), 4);
        assert_eq!(atlas.layout.chars[2].char, " ");
        assert_eq!(atlas.layout.chars[2].width, 0);
        assert_eq!(atlas.layout.info.face, "NotoSans-Regular");
        assert!(atlas.layout.common.line_height > atlas.layout.common.base);
        assert!(atlas.layout.common.base > 0);
    }

    #[test]
    fn max_extent_covers_every_char() {
        let atlas = generate_atlas(notosans::REGULAR_TTF, &request("iWg", FieldType::Sdf)).unwrap();
        let (width, height) = atlas.layout.max_glyph_extent();
        assert!(atlas.layout.chars.iter().all(|c| c.width <= width && c.height <= height));
        assert!(atlas.layout.chars.iter().any(|c| c.width == width));
    }

    #[test]
    fn msdf_pages_are_rgba() {
        let sdf = generate_atlas(notosans::REGULAR_TTF, &request("A", FieldType::Sdf)).unwrap();
        let msdf = generate_atlas(notosans::REGULAR_TTF, &request("A", FieldType::Msdf)).unwrap();
        assert_eq!(msdf.layout.distance_field.field_type, FieldType::Msdf);
        // IHDR color type: 0 is grayscale, 6 is RGBA.
        assert_eq!(sdf.textures[0].data[25], 0);
        assert_eq!(msdf.textures[0].data[25], 6);
    }

    #[test]
    fn empty_charset_is_rejected() {
        let result = generate_atlas(notosans::REGULAR_TTF, &request("", FieldType::Sdf));
        assert!(matches!(result, Err(FontError::EmptyCharset)));
    }

    #[test]
    fn garbage_font_fails_to_parse() {
        let result = generate_atlas(b"not a font", &request("A", FieldType::Sdf));
        assert!(matches!(result, Err(FontError::FaceParsing(_))));
    }

    #[tokio::test]
    async fn missing_font_file_is_an_io_error() {
        let mut request = request("A", FieldType::Sdf);
        request.font_file = PathBuf::from("/nonexistent/font-mud/Missing.ttf");
        let result = MudGenerator.generate(request).await;
        assert!(matches!(result, Err(FontError::Io(_))));
    }

    #[test]
    fn pages_are_numbered_when_split() {
        assert_eq!(page_name("CJK", 0, 1), "CJK");
        assert_eq!(page_name("CJK", 1, 3), "CJK_1");
    }
}
