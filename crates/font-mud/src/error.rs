// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::fmt::Formatter;

use ttf_parser::FaceParsingError;

#[derive(Debug)]
pub enum FontError {
    /// The request did not name a single character.
    EmptyCharset,
    FaceParsing(FaceParsingError),
    Io(std::io::Error),
    /// msdfgen could not fit the glyph into its bitmap.
    AutoFraming {
        glyph: char,
        width: u32,
        height: u32,
        range: f64,
    },
    PackingError(char),
    /// The blocking generation task panicked or was cancelled.
    Join(String),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FontError::EmptyCharset => write!(f, "no characters were requested"),
            FontError::FaceParsing(err) => write!(f, "failed to parse font face: {}", err),
            FontError::Io(err) => write!(f, "failed to read font file: {}", err),
            FontError::AutoFraming {
                glyph,
                width,
                height,
                range,
            } => {
                write!(
                    f,
                    "failed to autoframe glyph: {:?}, with dimensions:: width: {}, height: {}, px_range: {}",
                    glyph, width, height, range
                )
            }
            FontError::PackingError(glyph) => {
                write!(f, "packing error for glyph: {:?}", glyph)
            }
            FontError::Join(err) => write!(f, "atlas generation task failed: {}", err),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FontError::FaceParsing(err) => Some(err),
            FontError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FontError {
    fn from(err: std::io::Error) -> Self {
        FontError::Io(err)
    }
}

pub type FontResult<T> = Result<T, FontError>;
