//! Colors
//!
//! Pixels are stored as packed ARGB32, `0xAARRGGBB`.

/// Red and Blue component mask of a packed pixel, blended as one lane
pub const RB_MASK    : u32 = 0x00FF_00FF;
/// Green component mask of a packed pixel
pub const G_MASK     : u32 = 0x0000_FF00;

/// Convert an f64 [0,1] component to a u8 [0,255] component
pub fn cu8(v: f64) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}

/// Convert from sRGB to RGB for a single component
pub fn srgb_to_rgb(x: f64) -> f64 {
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}
/// Convert from RGB to sRGB for a single component
pub fn rgb_to_srgb(x: f64) -> f64 {
    if x <= 0.003_130_8 {
        x * 12.92
    } else {
        1.055 * x.powf(1.0/2.4) - 0.055
    }
}

/// Color as Alpha, Red, Green and Blue
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Argb {
    /// Alpha
    pub a: u8,
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Argb {
    /// Create new color
    pub fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Argb { a, r, g, b }
    }
    /// Opaque color
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::rgb(255,255,255)
    }
    /// Black Color (255,0,0,0)
    pub fn black() -> Self {
        Self::rgb(0,0,0)
    }
    /// Fully transparent black
    pub fn transparent() -> Self {
        Self::new(0,0,0,0)
    }
    /// Pack into `0xAARRGGBB`
    pub fn to_u32(self) -> u32 {
        u32::from(self.a) << 24 | u32::from(self.r) << 16 | u32::from(self.g) << 8 | u32::from(self.b)
    }
    /// Unpack from `0xAARRGGBB`
    pub fn from_u32(v: u32) -> Self {
        Self::new((v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8, v as u8)
    }
    /// Interpolate each component towards `c` by `k`, [0,1]
    pub fn gradient(&self, c: &Argb, k: f64) -> Argb {
        let k = k.max(0.0).min(1.0);
        let mix = |p: u8, q: u8| {
            let (p, q) = (f64::from(p), f64::from(q));
            (p + (q - p) * k).round() as u8
        };
        Argb::new(mix(self.a, c.a), mix(self.r, c.r), mix(self.g, c.g), mix(self.b, c.b))
    }
}

impl From<Argb> for u32 {
    fn from(c: Argb) -> u32 {
        c.to_u32()
    }
}
impl From<u32> for Argb {
    fn from(v: u32) -> Argb {
        Argb::from_u32(v)
    }
}
