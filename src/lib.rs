//! Placeholder toolbar icons for a browser extension.
//!
//! Each icon is a colored circle with a white "M", rendered at the sizes an
//! extension manifest asks for, in a normal and an active color scheme.

pub mod generate;
pub mod glyph;
pub mod manifest;
pub mod palette;
pub mod render;
