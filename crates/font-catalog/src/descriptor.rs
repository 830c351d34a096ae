// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

/// The font descriptor file: which families go into a catalog and which blocks each supports.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FontsDescriptor {
    /// Font directory, relative to the descriptor file.
    pub dir: PathBuf,
    pub fonts: Vec<FontDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDescriptor {
    pub name: String,
    #[serde(default)]
    pub bold: Option<String>,
    #[serde(default)]
    pub italic: Option<String>,
    #[serde(default)]
    pub bold_italic: Option<String>,
    #[serde(default)]
    pub blocks: Vec<String>,
}

impl FontsDescriptor {
    /// Loads a descriptor, returning it along with its resolved font directory.
    pub fn load(path: &Path) -> anyhow::Result<(Self, PathBuf)> {
        info!("Loading font descriptor from {:?}", path);
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading font descriptor {:?}", path))?;
        let descriptor: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing font descriptor {:?}", path))?;
        let font_dir = descriptor.font_dir(path);
        Ok((descriptor, font_dir))
    }

    /// Resolves `dir` against the directory containing the descriptor at `path`.
    pub fn font_dir(&self, path: &Path) -> PathBuf {
        path.parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&self.dir)
    }
}

/// Path to the TrueType file `file_name` inside `dir`.
pub fn font_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!("{}.ttf", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_optional_variants() {
        let json = r#"{
            "dir": "../fonts",
            "fonts": [
                { "name": "Sans", "bold": "Sans-Bold", "boldItalic": "Sans-BoldItalic", "blocks": ["Basic Latin"] },
                { "name": "Symbols" }
            ]
        }"#;

        let descriptor: FontsDescriptor = serde_json::from_str(json).unwrap();
        let sans = &descriptor.fonts[0];
        assert_eq!(sans.bold.as_deref(), Some("Sans-Bold"));
        assert_eq!(sans.italic, None);
        assert_eq!(sans.bold_italic.as_deref(), Some("Sans-BoldItalic"));
        assert_eq!(sans.blocks, vec!["Basic Latin"]);
        assert!(descriptor.fonts[1].blocks.is_empty());
    }

    #[test]
    fn dir_is_relative_to_descriptor() {
        let descriptor = FontsDescriptor {
            dir: "../fonts".into(),
            fonts: vec![],
        };

        let dir = descriptor.font_dir(Path::new("config/catalog/fonts.json"));
        assert_eq!(dir, Path::new("config/catalog/../fonts"));
        assert_eq!(
            font_path(&dir, "Sans-Bold"),
            Path::new("config/catalog/../fonts/Sans-Bold.ttf")
        );
    }

    #[test]
    fn missing_descriptor_is_an_error() {
        assert!(FontsDescriptor::load(Path::new("/nonexistent/fonts.json")).is_err());
    }
}
