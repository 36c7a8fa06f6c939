//! Marker colors.

use rand::Rng;

/// An RGB color with channels in `[0, 255]`.
///
/// Channels are floating point and not necessarily integral; hosts that need
/// 8-bit channels truncate via [`Rgb::to_u8`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Draw three independent uniform channels from `[0, 255)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen_range(0.0..255.0),
            g: rng.gen_range(0.0..255.0),
            b: rng.gen_range(0.0..255.0),
        }
    }

    /// Truncate channels to 8-bit values.
    pub fn to_u8(self) -> (u8, u8, u8) {
        (
            self.r.clamp(0.0, 255.0) as u8,
            self.g.clamp(0.0, 255.0) as u8,
            self.b.clamp(0.0, 255.0) as u8,
        )
    }
}
