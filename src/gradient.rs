//! Colors and piecewise-linear color gradients.

use crate::error::{LSystemError, LSystemResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGB color.
///
/// Serialized as a six digit hex string (`"FF8800"`), the same format the
/// command line accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from wide integer components, rejecting anything outside `[0, 255]`.
    pub fn try_from_components(r: i64, g: i64, b: i64) -> LSystemResult<Self> {
        let channel = |c: i64| u8::try_from(c).ok();
        match (channel(r), channel(g), channel(b)) {
            (Some(r), Some(g), Some(b)) => Ok(Self { r, g, b }),
            _ => Err(LSystemError::ColorOutOfRange { r, g, b }),
        }
    }

    /// Parses a six digit hex string such as `"1E90FF"`.
    pub fn from_hex(hex: &str) -> LSystemResult<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(LSystemError::InvalidHexColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| LSystemError::InvalidHexColor(hex.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = LSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = LSystemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// A continuous color curve through an ordered list of stops.
///
/// The stops split `[0, 1]` into equal-length segments; [`Gradient::at`]
/// interpolates linearly inside a segment, truncating each channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    stops: Vec<Rgb>,
    segments: usize,
}

impl Gradient {
    /// Builds a gradient from at least one color stop.
    pub fn new(stops: Vec<Rgb>) -> LSystemResult<Self> {
        if stops.is_empty() {
            return Err(LSystemError::EmptyGradient);
        }
        let segments = stops.len() - 1;
        Ok(Self { stops, segments })
    }

    /// Builds a gradient from raw integer triples, validating every component.
    pub fn from_components(stops: &[(i64, i64, i64)]) -> LSystemResult<Self> {
        let stops = stops
            .iter()
            .map(|&(r, g, b)| Rgb::try_from_components(r, g, b))
            .collect::<LSystemResult<Vec<_>>>()?;
        Self::new(stops)
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// Evaluates the curve at `t`. Values outside `[0, 1]` are clamped.
    pub fn at(&self, t: f64) -> Rgb {
        if self.segments == 0 {
            return self.stops[0];
        }
        let t = if t.is_nan() {
            log::warn!("gradient evaluated at NaN, using 0.0");
            0.0
        } else {
            t.clamp(0.0, 1.0)
        };

        let n = self.segments as f64;
        let x = t * n;
        let i = x.floor() as usize;
        let j = x.ceil() as usize;
        if i == j {
            return self.stops[i];
        }

        let t_min = i as f64 / n;
        let t_max = j as f64 / n;
        let local = (t - t_min) / (t_max - t_min);
        let (a, b) = (self.stops[i], self.stops[j]);
        let lerp = |from: u8, to: u8| (from as f64 + local * (to as f64 - from as f64)) as u8;
        Rgb::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
    }
}
