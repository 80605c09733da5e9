//! Color representation and color space utilities

/// Gamma used when interpolating RGB channels.
pub const INTERPOLATION_GAMMA: f32 = 2.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(r, g, b, a)
    }

    pub const fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    pub fn r(&self) -> f32 {
        self.0
    }

    pub fn g(&self) -> f32 {
        self.1
    }

    pub fn b(&self) -> f32 {
        self.2
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha.clamp(0.0, 1.0))
    }

    /// Reduces HSL lightness by `ratio` of its current value.
    ///
    /// `darken(0.2)` on a color with lightness 0.5 yields lightness 0.4.
    pub fn darken(&self, ratio: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        let lightness = (l - l * ratio).clamp(0.0, 1.0);
        let (r, g, b) = hsl_to_rgb(h, s, lightness);
        Self(r, g, b, self.3)
    }

    /// Hue in degrees, saturation and lightness in `[0, 1]`.
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let (r, g, b) = (self.0, self.1, self.2);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;
        let delta = max - min;
        if delta <= f32::EPSILON {
            return (0.0, 0.0, lightness);
        }
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let hue = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        (hue * 60.0, saturation, lightness)
    }

    /// Interpolates from `self` to `target` with `fraction` clamped to
    /// `[0, 1]`. RGB channels blend in gamma space, alpha blends linearly.
    pub fn interpolate(&self, target: &Color, fraction: f32) -> Color {
        if fraction.is_nan() || fraction <= 0.0 {
            return *self;
        }
        if fraction >= 1.0 {
            return *target;
        }
        let channel = |from: f32, to: f32| {
            let from = from.max(0.0).powf(INTERPOLATION_GAMMA);
            let to = to.max(0.0).powf(INTERPOLATION_GAMMA);
            (from + (to - from) * fraction).powf(1.0 / INTERPOLATION_GAMMA)
        };
        Color(
            channel(self.0, target.0),
            channel(self.1, target.1),
            channel(self.2, target.2),
            self.3 + (target.3 - self.3) * fraction,
        )
    }

    // Common color constants
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (f32, f32, f32) {
    if saturation <= f32::EPSILON {
        return (lightness, lightness, lightness);
    }
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    (r + m, g + m, b + m)
}

#[cfg(test)]
#[path = "tests/color_tests.rs"]
mod tests;
