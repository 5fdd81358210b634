//! Fixed point blending

use crate::color::RB_MASK;
use crate::color::G_MASK;
use crate::gamma::GammaLut;

/// Multiply two u8 values using fixed point math, `a * b / 255` rounded
///
/// See agg_color_rgba.h:395
pub fn multiply_u8(a: u8, b: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let (a,b) = (u32::from(a), u32::from(b));
    let t : u32  = a * b + base_msb;
    let tt : u32 = ((t >> base_shift) + t) >> base_shift;
    tt as u8
}

/// Scale a coverage value [0,255] by a fixed point factor [0,256]
#[inline]
pub fn scale_cover(cover: u32, scale: u32) -> u32 {
    (cover * scale) >> 8
}

/// Combined coverage of two alpha values, `a + b - a * b`
///
/// Built once with all 256 x 256 combinations; indexed by `(a << 8) | b`.
#[derive(Clone)]
pub struct AlphaCache {
    table: Vec<u8>,
}

impl AlphaCache {
    /// Compute the table
    pub fn new() -> Self {
        let mut table = vec![0u8; 256 * 256];
        for a in 0 ..= 255u8 {
            for b in 0 ..= 255u8 {
                let v = u32::from(a) + u32::from(b) - u32::from(multiply_u8(a, b));
                table[(usize::from(a) << 8) | usize::from(b)] = v as u8;
            }
        }
        Self { table }
    }
    /// Alpha resulting from covering alpha `a` with alpha `b`
    #[inline]
    pub fn get(&self, a: u8, b: u8) -> u8 {
        self.table[(usize::from(a) << 8) | usize::from(b)]
    }
}

impl Default for AlphaCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AlphaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("AlphaCache").field("len", &self.table.len()).finish()
    }
}

/// Interpolate Red/Blue and Green of `dst` towards `src` by `alpha` [0,255]
///
/// Red and Blue share one 32-bit lane, `0x00RR00BB`, and are computed with
/// a single multiply. Borrows between the two halves cancel out once the
/// result is masked. Returned values are masked with `RB_MASK` and `G_MASK`.
#[inline]
pub fn lerp_rb_g(dst: u32, src: u32, alpha: u32) -> (u32, u32) {
    let drb = dst & RB_MASK;
    let srb = src & RB_MASK;
    let rb = drb.wrapping_add(srb.wrapping_sub(drb).wrapping_mul(alpha) >> 8) & RB_MASK;

    let dg = (dst & G_MASK) as i32;
    let sg = (src & G_MASK) as i32;
    let g = (dg + (((sg - dg) * alpha as i32) >> 8)) as u32 & G_MASK;
    (rb, g)
}

/// Blend `src` into `dst` with an effective alpha [0,255]
///
/// An alpha of 255 copies `src`, an alpha of 0 leaves `dst`
#[inline]
pub fn blend_pix(dst: u32, src: u32, alpha: u32, cache: &AlphaCache) -> u32 {
    if alpha == 0 {
        return dst;
    }
    if alpha >= 255 {
        return src;
    }
    let (rb, g) = lerp_rb_g(dst, src, alpha);
    let a = cache.get((dst >> 24) as u8, alpha as u8);
    u32::from(a) << 24 | rb | g
}

/// Blend `src` into `dst` and pass the blended components through `gamma`
///
/// Full alpha copies `src` untouched, like [blend_pix]
#[inline]
pub fn blend_pix_gamma(dst: u32, src: u32, alpha: u32, cache: &AlphaCache, gamma: &GammaLut) -> u32 {
    if alpha == 0 {
        return dst;
    }
    if alpha >= 255 {
        return src;
    }
    let (rb, g) = lerp_rb_g(dst, src, alpha);
    let r = gamma.red[((rb >> 16) & 0xFF) as usize];
    let g = gamma.green[(g >> 8) as usize];
    let b = gamma.blue[(rb & 0xFF) as usize];
    let a = cache.get((dst >> 24) as u8, alpha as u8);
    u32::from(a) << 24 | u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b)
}
