// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::descriptor::FontDescriptor;
use crate::model::Font;

/// One of the four renderings of a logical font family.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// Processing order within a family.
    pub const ALL: [FontStyle; 4] = [
        FontStyle::Regular,
        FontStyle::Bold,
        FontStyle::Italic,
        FontStyle::BoldItalic,
    ];

    /// Suffix of the catalog-level asset directory for this style.
    pub fn suffix(self) -> &'static str {
        match self {
            FontStyle::Regular => "_Assets",
            FontStyle::Bold => "_BoldAssets",
            FontStyle::Italic => "_ItalicAssets",
            FontStyle::BoldItalic => "_BoldItalicAssets",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FontStyle::Regular => "",
            FontStyle::Bold => "BOLD",
            FontStyle::Italic => "ITALIC",
            FontStyle::BoldItalic => "BOLD ITALIC",
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }

    pub fn is_regular(self) -> bool {
        self == FontStyle::Regular
    }

    /// The font file name (without extension) providing this style, if the family declares one.
    pub fn file_name(self, descriptor: &FontDescriptor) -> Option<&str> {
        match self {
            FontStyle::Regular => Some(&descriptor.name),
            FontStyle::Bold => descriptor.bold.as_deref(),
            FontStyle::Italic => descriptor.italic.as_deref(),
            FontStyle::BoldItalic => descriptor.bold_italic.as_deref(),
        }
    }

    /// Records `file_name` as this style's variant on `font`. Regular is the font itself.
    pub fn assign(self, font: &mut Font, file_name: &str) {
        let slot = match self {
            FontStyle::Regular => return,
            FontStyle::Bold => &mut font.bold,
            FontStyle::Italic => &mut font.italic,
            FontStyle::BoldItalic => &mut font.bold_italic,
        };

        *slot = Some(file_name.to_string());
    }
}

impl Display for FontStyle {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            FontStyle::Regular => f.write_str("REGULAR"),
            other => f.write_str(other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FontMetrics;

    fn descriptor() -> FontDescriptor {
        FontDescriptor {
            name: "Sample".into(),
            bold: Some("Sample-Bold".into()),
            italic: None,
            bold_italic: Some("Sample-BoldItalic".into()),
            blocks: vec![],
        }
    }

    #[test]
    fn suffixes_match_flags() {
        for style in FontStyle::ALL {
            let expected = match (style.is_bold(), style.is_italic()) {
                (false, false) => "_Assets",
                (true, false) => "_BoldAssets",
                (false, true) => "_ItalicAssets",
                (true, true) => "_BoldItalicAssets",
            };
            assert_eq!(style.suffix(), expected);
        }
    }

    #[test]
    fn resolves_variant_file_names() {
        let descriptor = descriptor();
        assert_eq!(FontStyle::Regular.file_name(&descriptor), Some("Sample"));
        assert_eq!(FontStyle::Bold.file_name(&descriptor), Some("Sample-Bold"));
        assert_eq!(FontStyle::Italic.file_name(&descriptor), None);
        assert_eq!(
            FontStyle::BoldItalic.file_name(&descriptor),
            Some("Sample-BoldItalic")
        );
    }

    #[test]
    fn assign_sets_only_the_matching_slot() {
        let mut font = Font::new("Sample", FontMetrics::default());
        FontStyle::Regular.assign(&mut font, "Sample");
        FontStyle::BoldItalic.assign(&mut font, "Sample-BoldItalic");
        assert_eq!(font.bold, None);
        assert_eq!(font.italic, None);
        assert_eq!(font.bold_italic.as_deref(), Some("Sample-BoldItalic"));
    }
}
