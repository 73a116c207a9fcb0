//! Colors and the fixed bass/mid/treble palettes.

/// RGBA color with components in 0..=255
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque color; components are clamped to 0..=255
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 255.0)
    }

    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 255.0),
            g: g.clamp(0.0, 255.0),
            b: b.clamp(0.0, 255.0),
            a: a.clamp(0.0, 255.0),
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 255.0),
            ..self
        }
    }

    /// Component-wise interpolation; `t` is clamped to [0, 1]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Normalized [0, 1] components for the GPU
    pub fn to_unit(self) -> [f32; 4] {
        [self.r / 255.0, self.g / 255.0, self.b / 255.0, self.a / 255.0]
    }
}

/// Frequency band a palette entry belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Bass,
    Mid,
    Treble,
}

/// Three fixed color sets, one per band
#[derive(Debug, Clone)]
pub struct Palette {
    pub bass: [Color; 3],
    pub mid: [Color; 3],
    pub treble: [Color; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bass: [
                Color::rgb(255.0, 80.0, 120.0),
                Color::rgb(255.0, 120.0, 180.0),
                Color::rgb(200.0, 50.0, 100.0),
            ],
            mid: [
                Color::rgb(100.0, 255.0, 200.0),
                Color::rgb(150.0, 255.0, 150.0),
                Color::rgb(50.0, 200.0, 150.0),
            ],
            treble: [
                Color::rgb(255.0, 255.0, 100.0),
                Color::rgb(255.0, 200.0, 50.0),
                Color::rgb(200.0, 150.0, 0.0),
            ],
        }
    }
}

impl Palette {
    pub fn colors(&self, band: Band) -> &[Color; 3] {
        match band {
            Band::Bass => &self.bass,
            Band::Mid => &self.mid,
            Band::Treble => &self.treble,
        }
    }

    /// First two colors of a band blended by energy (0..255)
    pub fn energy_color(&self, band: Band, energy: f32) -> Color {
        let colors = self.colors(band);
        colors[0].lerp(colors[1], energy / 255.0)
    }
}
