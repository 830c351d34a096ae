// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0

//! Distance-field glyph atlas generation.

pub mod error;
pub mod generator;
pub mod glyph_atlas;
pub mod glyph_bitmap;
pub mod layout;
pub mod options;

pub use error::{FontError, FontResult};
pub use generator::{AtlasGenerator, AtlasRequest, GeneratedAtlas, MudGenerator, Texture};
pub use layout::BmFontLayout;
pub use options::{AtlasOptions, FieldType};
