//! RGBA colors and the rig's material palette.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear RGBA color with components in `[0, 1]`.
///
/// Alpha below 1 marks the primitive as translucent, which routes it to
/// the blended render pass.
///
/// # Example
///
/// ```
/// use forklift_geometry::Rgba;
///
/// let glass = Rgba::new(0.5, 0.7, 1.0, 0.5);
/// assert!(glass.is_translucent());
/// assert!(!Rgba::rgb(1.0, 0.0, 0.0).is_translucent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha (1 = opaque).
    pub a: f32,
}

impl Rgba {
    /// Creates a color from all four components. Components are clamped to `[0, 1]`.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Returns the same color with a different alpha.
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Returns true when the color needs alpha blending.
    #[must_use]
    pub fn is_translucent(self) -> bool {
        self.a < 1.0
    }

    /// Returns the components as an array `[r, g, b, a]`.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantizes the color to 8 bits per channel.
    ///
    /// Useful as a hash key for material caches.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        palette::GRAY
    }
}

/// Named colors used by the rig and warehouse.
pub mod palette {
    use super::Rgba;

    /// Pure red.
    pub const RED: Rgba = Rgba::rgb(1.0, 0.0, 0.0);
    /// Pure blue.
    pub const BLUE: Rgba = Rgba::rgb(0.0, 0.0, 1.0);
    /// Pure green.
    pub const GREEN: Rgba = Rgba::rgb(0.0, 1.0, 0.0);
    /// Safety yellow.
    pub const YELLOW: Rgba = Rgba::rgb(1.0, 1.0, 0.0);
    /// Neutral gray.
    pub const GRAY: Rgba = Rgba::rgb(0.7, 0.7, 0.7);
    /// Black.
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    /// Cardboard brown.
    pub const BROWN: Rgba = Rgba::rgb(0.55, 0.27, 0.07);
    /// Brushed metal.
    pub const METAL: Rgba = Rgba::rgb(0.8, 0.8, 0.9);
    /// Brass, used for the T-nuts.
    pub const BRASS: Rgba = Rgba::rgb(0.85, 0.65, 0.13);
    /// Translucent acrylic for the fork plate.
    pub const ACRYLIC: Rgba = Rgba {
        r: 0.7,
        g: 0.9,
        b: 1.0,
        a: 0.6,
    };
    /// Floor concrete.
    pub const CONCRETE: Rgba = Rgba::rgb(0.65, 0.65, 0.65);
    /// Light wood.
    pub const WOOD_LIGHT: Rgba = Rgba::rgb(0.8, 0.6, 0.4);
    /// Dark wood, used for shelf boards.
    pub const WOOD_DARK: Rgba = Rgba::rgb(0.6, 0.4, 0.2);
    /// Window glass.
    pub const WINDOW: Rgba = Rgba {
        r: 0.5,
        g: 0.7,
        b: 1.0,
        a: 0.5,
    };
    /// Arena grid lines.
    pub const GRID: Rgba = Rgba::rgb(0.5, 0.5, 0.5);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_components() {
        let c = Rgba::new(2.0, -1.0, 0.5, 3.0);
        assert_eq!(c.to_array(), [1.0, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn translucency_follows_alpha() {
        assert!(palette::ACRYLIC.is_translucent());
        assert!(palette::WINDOW.is_translucent());
        assert!(!palette::BRASS.is_translucent());
        assert!(palette::GREEN.with_alpha(0.3).is_translucent());
    }

    #[test]
    fn rgba8_quantization() {
        assert_eq!(palette::RED.to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Rgba::new(0.5, 0.5, 0.5, 0.5).to_rgba8(), [128, 128, 128, 128]);
    }
}
