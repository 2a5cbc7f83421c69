//! Visual archetypes derived from node categories.
//!
//! The core never renders anything itself. An archetype is the small set of
//! facts a renderer needs to build a primitive for a node: shape, relative
//! size and base color.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Geometric primitive used to draw a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Sphere,
    Octahedron,
    Dodecahedron,
    Icosahedron,
    Torus,
}

/// 24-bit RGB color, stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xffffff);
    pub const BLACK: Rgb = Rgb(0x000000);

    /// Returns `(r, g, b)` channel bytes.
    pub fn channels(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// Emissive color applied to a node while it is the pending connect source.
pub const HIGHLIGHT_EMISSIVE: Rgb = Rgb(0x555555);

/// Derived appearance of one node category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub shape: ShapeKind,
    /// Multiplier applied to the configured base node size.
    pub size_scale: f32,
    pub color: Rgb,
}

impl Archetype {
    pub const fn new(shape: ShapeKind, size_scale: f32, color: Rgb) -> Self {
        Self {
            shape,
            size_scale,
            color,
        }
    }
}

/// Appearance used for any category the registry does not know.
pub const DEFAULT_ARCHETYPE: Archetype = Archetype::new(ShapeKind::Sphere, 1.0, Rgb::WHITE);

impl Default for Archetype {
    fn default() -> Self {
        DEFAULT_ARCHETYPE
    }
}

#[cfg(test)]
mod tests {
    use super::{Rgb, DEFAULT_ARCHETYPE, HIGHLIGHT_EMISSIVE};

    #[test]
    fn rgb_displays_as_lowercase_hex() {
        assert_eq!(Rgb(0xffa500).to_string(), "#ffa500");
        assert_eq!(Rgb(0x0000ff).to_string(), "#0000ff");
        assert_eq!(HIGHLIGHT_EMISSIVE.channels(), (0x55, 0x55, 0x55));
    }

    #[test]
    fn default_archetype_is_white_sphere() {
        assert_eq!(DEFAULT_ARCHETYPE.color, Rgb::WHITE);
        assert_eq!(DEFAULT_ARCHETYPE.size_scale, 1.0);
    }
}
