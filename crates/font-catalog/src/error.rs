// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::fmt::Formatter;

use font_mud::FontError;

/// Why one block of one font style produced no assets.
#[derive(Debug)]
pub enum BlockError {
    /// The font maps no code point inside the block's range.
    NoGlyphsInBlock { font: String, block: String },
    Generator(FontError),
    Output(std::io::Error),
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::NoGlyphsInBlock { font, block } => {
                write!(
                    f,
                    "No characters in {:?} are supported by font {:?}.",
                    block, font
                )
            }
            BlockError::Generator(err) => write!(f, "atlas generation failed: {}", err),
            BlockError::Output(err) => write!(f, "failed to write assets: {}", err),
        }
    }
}

impl std::error::Error for BlockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlockError::NoGlyphsInBlock { .. } => None,
            BlockError::Generator(err) => Some(err),
            BlockError::Output(err) => Some(err),
        }
    }
}

impl From<FontError> for BlockError {
    fn from(err: FontError) -> Self {
        BlockError::Generator(err)
    }
}

impl From<std::io::Error> for BlockError {
    fn from(err: std::io::Error) -> Self {
        BlockError::Output(err)
    }
}

pub type BlockResult<T> = Result<T, BlockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_glyphs_names_font_and_block() {
        let err = BlockError::NoGlyphsInBlock {
            font: "Sans".into(),
            block: "Hiragana".into(),
        };

        assert_eq!(
            err.to_string(),
            "No characters in \"Hiragana\" are supported by font \"Sans\"."
        );
    }
}
