// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

const BUILTIN_BLOCKS: &str = include_str!("../resources/unicode-blocks.json");

/// A named Unicode block as listed in a block table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlockRange {
    pub category: String,

    /// Inclusive `[min, max]` code points.
    pub range: [u32; 2],
}

impl BlockRange {
    pub fn new(category: impl Into<String>, min: u32, max: u32) -> Self {
        Self {
            category: category.into(),
            range: [min, max],
        }
    }

    pub fn min(&self) -> u32 {
        self.range[0]
    }

    pub fn max(&self) -> u32 {
        self.range[1]
    }

    pub fn contains(&self, code_point: u32) -> bool {
        (self.min()..=self.max()).contains(&code_point)
    }

    /// The stem used for this block's generated files.
    pub fn file_stem(&self) -> String {
        self.category.replace(' ', "_")
    }
}

/// Ordered list of Unicode blocks that font descriptors refer to by name.
#[derive(Clone, Debug)]
pub struct BlockTable {
    blocks: Vec<BlockRange>,
}

impl BlockTable {
    pub fn new(blocks: Vec<BlockRange>) -> anyhow::Result<Self> {
        for block in blocks.iter() {
            anyhow::ensure!(
                block.min() <= block.max(),
                "block {:?} has an inverted range {:?}",
                block.category,
                block.range
            );
        }

        Ok(Self { blocks })
    }

    /// The block table embedded in this crate.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(BUILTIN_BLOCKS).context("parsing built-in Unicode block table")
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading Unicode block table {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("parsing Unicode block table {:?}", path))
    }

    /// Looks up a block by exact name.
    pub fn find(&self, name: &str) -> Option<&BlockRange> {
        self.blocks.iter().find(|block| block.category == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockRange> {
        self.blocks.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_ordered() {
        let table = BlockTable::builtin().unwrap();
        assert!(!table.is_empty());
        let mut last = None;
        for block in table.iter() {
            if let Some(last) = last {
                assert!(block.min() > last);
            }
            last = Some(block.max());
        }
    }

    #[test]
    fn finds_by_exact_name() {
        let table = BlockTable::builtin().unwrap();
        let latin = table.find("Basic Latin").unwrap();
        assert_eq!(latin.range, [0, 0x7f]);
        let specials = table.find("Specials").unwrap();
        assert_eq!(specials.range, [65520, 65535]);
        assert!(table.find("basic latin").is_none());
        assert!(table.find("Klingon").is_none());
    }

    #[test]
    fn rejects_inverted_ranges() {
        let result = BlockTable::from_json(r#"[{"category": "Broken", "range": [10, 2]}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn file_stem_replaces_spaces() {
        let block = BlockRange::new("CJK Unified Ideographs Extension A", 0x3400, 0x4dbf);
        assert_eq!(block.file_stem(), "CJK_Unified_Ideographs_Extension_A");
        assert!(block.contains(0x3400));
        assert!(block.contains(0x4dbf));
        assert!(!block.contains(0x4dc0));
    }
}
