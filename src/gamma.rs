//! Gamma lookup tables

use crate::color::cu8;
use crate::color::rgb_to_srgb;

/// Per-channel gamma correction applied to blended color components
///
/// Each table maps a blended component [0,255] to its corrected value.
#[derive(Clone,PartialEq,Eq)]
pub struct GammaLut {
    pub red: [u8; 256],
    pub green: [u8; 256],
    pub blue: [u8; 256],
}

fn table<F>(gfunc: F) -> [u8; 256]
    where F: Fn(f64) -> f64
{
    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        *v = cu8(gfunc(i as f64 / 255.0));
    }
    lut
}

impl GammaLut {
    /// Tables where `lut[i] == i`
    pub fn identity() -> Self {
        Self::from_fn(|x| x)
    }
    /// Power law gamma, `x^gamma`, on all three channels
    pub fn new(gamma: f64) -> Self {
        Self::per_channel(gamma, gamma, gamma)
    }
    /// Power law gamma with a separate exponent per channel
    pub fn per_channel(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red: table(|x| x.powf(red)),
            green: table(|x| x.powf(green)),
            blue: table(|x| x.powf(blue)),
        }
    }
    /// Tables computed from a gamma function on [0,1]
    pub fn from_fn<F>(gfunc: F) -> Self
        where F: Fn(f64) -> f64
    {
        let lut = table(gfunc);
        Self { red: lut, green: lut, blue: lut }
    }
    /// Linear to sRGB encoding
    pub fn srgb() -> Self {
        Self::from_fn(rgb_to_srgb)
    }
    /// True if every table maps values onto themselves
    pub fn is_identity(&self) -> bool {
        (0 .. 256).all(|i| {
            usize::from(self.red[i]) == i &&
                usize::from(self.green[i]) == i &&
                usize::from(self.blue[i]) == i
        })
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::fmt::Debug for GammaLut {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("GammaLut")
            .field("identity", &self.is_identity())
            .finish()
    }
}
