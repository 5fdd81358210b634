//! Fillers
//!
//! Rows of cells are swept left to right. Each cell gives the coverage of
//! its own pixel, the running coverage gives the pixels between cells.
//! Coverage is scaled by the paint opacity, the opacity mask and the source
//! alpha before the pixel is blended into the buffer.
//!
//! Fillers are monomorphized over the winding rule and the blend, giving
//! four variants for each paint:
//!
//! | Rule     | Blend          |
//! |----------|----------------|
//! | NonZero  | plain          |
//! | EvenOdd  | plain          |
//! | NonZero  | gamma corrected|
//! | EvenOdd  | gamma corrected|

use crate::cell::Rows;
use crate::math::AlphaCache;
use crate::math::blend_pix;
use crate::math::blend_pix_gamma;
use crate::math::scale_cover;
use crate::gamma::GammaLut;
use crate::alphamask::OpacityMask;
use crate::buffer::PixelBuffer;
use crate::paint::Paint;
use crate::paint::PaintMaterial;
use crate::paint::PaintSampler;
use crate::paint::LinearGradient;
use crate::paint::RadialGradient;
use crate::paint::TransformAdapter;
use crate::affine_transform::Transform;
use crate::raster::FillingRule;
use crate::errors::RasterError;
use crate::PIXEL_SHIFT;

use log::trace;

use std::cmp::min;
use std::cmp::max;

/// Coverage of a pixel from its accumulated area
pub trait WindingRule {
    /// `area` is `(coverage << 9) - cell_area`
    fn alpha(area: i32) -> u32;
}

/// Inside if the winding number is not zero
#[derive(Debug,Default,Copy,Clone)]
pub struct NonZeroWinding;

/// Inside if the winding number is odd
#[derive(Debug,Default,Copy,Clone)]
pub struct EvenOddWinding;

impl WindingRule for NonZeroWinding {
    #[inline]
    fn alpha(area: i32) -> u32 {
        let cover = (area >> (PIXEL_SHIFT + 1)).abs();
        min(cover, 255) as u32
    }
}

impl WindingRule for EvenOddWinding {
    #[inline]
    fn alpha(area: i32) -> u32 {
        let mut cover = (area >> (PIXEL_SHIFT + 1)).abs();
        cover &= 511;
        if cover >= 256 {
            cover = 511 - cover;
        }
        min(cover, 255) as u32
    }
}

/// Sweep row `y` calling `span(x, len, alpha)` for runs of pixels with
/// non-zero coverage, restricted to columns `[min_x, max_x]`
pub fn sweep_row<R, F>(rows: &Rows, y: i32, min_x: i32, max_x: i32, mut span: F)
    where R: WindingRule,
          F: FnMut(i32, i32, u32)
{
    let mut cover = 0;
    let mut cells = rows.row_cells(y).peekable();
    while let Some(cell) = cells.next() {
        let x = cell.x;
        cover += cell.coverage;
        let alpha = R::alpha((cover << (PIXEL_SHIFT + 1)) - cell.area);
        if alpha > 0 && x >= min_x && x <= max_x {
            span(x, 1, alpha);
        }
        if let Some(next) = cells.peek() {
            if next.x > x + 1 && cover != 0 {
                let alpha = R::alpha(cover << (PIXEL_SHIFT + 1));
                let (from, to) = (max(x + 1, min_x), min(next.x - 1, max_x));
                if alpha > 0 && from <= to {
                    span(from, to - from + 1, alpha);
                }
            }
        }
    }
}

/// Blend of a source pixel into a destination pixel
pub trait PixelBlend {
    fn blend(&self, dst: u32, src: u32, alpha: u32) -> u32;
}

/// Linear blend
#[derive(Debug,Copy,Clone)]
pub struct PlainBlend<'a> {
    cache: &'a AlphaCache,
}

/// Linear blend followed by the gamma tables
#[derive(Debug,Copy,Clone)]
pub struct GammaBlend<'a> {
    cache: &'a AlphaCache,
    gamma: &'a GammaLut,
}

impl<'a> PixelBlend for PlainBlend<'a> {
    #[inline]
    fn blend(&self, dst: u32, src: u32, alpha: u32) -> u32 {
        blend_pix(dst, src, alpha, self.cache)
    }
}

impl<'a> PixelBlend for GammaBlend<'a> {
    #[inline]
    fn blend(&self, dst: u32, src: u32, alpha: u32) -> u32 {
        blend_pix_gamma(dst, src, alpha, self.cache, self.gamma)
    }
}

/// Pixels a filler may touch, inclusive
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct FillArea {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

/// Shared state handed to fillers
#[derive(Debug,Copy,Clone)]
pub struct FillContext<'a> {
    pub cache: &'a AlphaCache,
    pub gamma: Option<&'a GammaLut>,
    pub mask: Option<&'a OpacityMask>,
}

/// Opacity and mask scaling of coverage
#[derive(Debug,Copy,Clone)]
struct CoverageScale<'a> {
    opacity: u32,
    mask: Option<&'a OpacityMask>,
}

impl<'a> CoverageScale<'a> {
    #[inline]
    fn apply(&self, x: i32, y: i32, cover: u32) -> u32 {
        let cover = if self.opacity >= 256 { cover } else { scale_cover(cover, self.opacity) };
        match self.mask {
            Some(m) => m.apply(x, y, cover),
            None => cover,
        }
    }
}

/// What a filler draws with
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum FillerKind {
    SolidColor,
    LinearGradient,
    RadialGradient,
    Mask,
}

impl FillerKind {
    /// Filler drawing `paint`
    pub fn for_paint(paint: &Paint) -> FillerKind {
        match paint {
            Paint::SolidColor(_) => FillerKind::SolidColor,
            Paint::LinearGradient(_) => FillerKind::LinearGradient,
            Paint::RadialGradient(_) => FillerKind::RadialGradient,
        }
    }
}

/// Converts accumulated rows into pixels
pub trait PolygonFiller {
    fn kind(&self) -> FillerKind;
    /// Fill the rows of cells inside `area`
    fn fill(&mut self, rows: &Rows, area: &FillArea) -> Result<(), RasterError>;
}

/// Rows shared by the fill area, the buffer and the touched cells
fn row_span(rows: &Rows, area: &FillArea, height: usize) -> Option<(i32, i32)> {
    let (y0, y1) = rows.touched_range()?;
    let y0 = max(y0, max(area.min_y, 0));
    let y1 = min(y1, min(area.max_y, height as i32 - 1));
    if y0 > y1 { None } else { Some((y0, y1)) }
}

/// Sweep, sample and blend every touched row into `buffer`
fn paint_rows<R, B, S>(rows: &Rows, area: &FillArea, buffer: &mut PixelBuffer,
                       sampler: &S, blend: &B, scale: &CoverageScale)
    where R: WindingRule,
          B: PixelBlend,
          S: PaintSampler
{
    let (y0, y1) = match row_span(rows, area, buffer.height()) {
        Some(r) => r,
        None => return,
    };
    let max_x = min(area.max_x, buffer.width() as i32 - 1);
    let min_x = max(area.min_x, 0);
    for y in y0 ..= y1 {
        let row = buffer.row_mut(y as usize);
        let cy = f64::from(y) + 0.5;
        sweep_row::<R, _>(rows, y, min_x, max_x, |x, len, cover| {
            for px in x .. x + len {
                let cover = scale.apply(px, y, cover);
                if cover == 0 {
                    continue;
                }
                let src = sampler.sample(f64::from(px) + 0.5, cy);
                let alpha = ((src >> 24) * (cover + 1)) >> 8;
                let dst = &mut row[px as usize];
                *dst = blend.blend(*dst, src, alpha);
            }
        });
    }
}

/// Pick the winding rule and blend variant for `sampler`
fn dispatch<S: PaintSampler>(rows: &Rows, area: &FillArea, buffer: &mut PixelBuffer,
                             sampler: &S, rule: FillingRule, opacity: u32, ctx: &FillContext) {
    let scale = CoverageScale { opacity, mask: ctx.mask };
    match (rule, ctx.gamma) {
        (FillingRule::NonZero, None) => {
            let b = PlainBlend { cache: ctx.cache };
            paint_rows::<NonZeroWinding, _, _>(rows, area, buffer, sampler, &b, &scale)
        },
        (FillingRule::EvenOdd, None) => {
            let b = PlainBlend { cache: ctx.cache };
            paint_rows::<EvenOddWinding, _, _>(rows, area, buffer, sampler, &b, &scale)
        },
        (FillingRule::NonZero, Some(gamma)) => {
            let b = GammaBlend { cache: ctx.cache, gamma };
            paint_rows::<NonZeroWinding, _, _>(rows, area, buffer, sampler, &b, &scale)
        },
        (FillingRule::EvenOdd, Some(gamma)) => {
            let b = GammaBlend { cache: ctx.cache, gamma };
            paint_rows::<EvenOddWinding, _, _>(rows, area, buffer, sampler, &b, &scale)
        },
    }
}

/// Solid color filler
#[derive(Debug)]
pub struct ColorFiller<'a> {
    buffer: &'a mut PixelBuffer,
    color: u32,
    rule: FillingRule,
    opacity: u32,
    ctx: FillContext<'a>,
}

impl<'a> ColorFiller<'a> {
    /// Filler for a solid color material
    pub fn new(buffer: &'a mut PixelBuffer, material: &PaintMaterial,
               ctx: FillContext<'a>) -> Result<Self, RasterError> {
        let color = match material.paint {
            Paint::SolidColor(c) => c.to_u32(),
            ref other => return Err(RasterError::PaintMismatch {
                expected: "solid color", found: other.kind_name()
            }),
        };
        Ok(Self { buffer, color, rule: material.rule, opacity: material.scaled_opacity(), ctx })
    }
}

impl<'a> PolygonFiller for ColorFiller<'a> {
    fn kind(&self) -> FillerKind {
        FillerKind::SolidColor
    }
    fn fill(&mut self, rows: &Rows, area: &FillArea) -> Result<(), RasterError> {
        trace!("FILL: color {:08x} rule {:?} opacity {}", self.color, self.rule, self.opacity);
        let color = crate::color::Argb::from_u32(self.color);
        dispatch(rows, area, self.buffer, &color, self.rule, self.opacity, &self.ctx);
        Ok(())
    }
}

/// Gradient filler, sampling the paint at each pixel center
#[derive(Debug)]
pub struct GradientFiller<'a, S> {
    buffer: &'a mut PixelBuffer,
    sampler: S,
    kind: FillerKind,
    rule: FillingRule,
    opacity: u32,
    ctx: FillContext<'a>,
}

impl<'a, 'p> GradientFiller<'a, &'p LinearGradient> {
    /// Filler for a linear gradient material
    pub fn linear(buffer: &'a mut PixelBuffer, material: &'p PaintMaterial,
                  ctx: FillContext<'a>) -> Result<Self, RasterError> {
        match material.paint {
            Paint::LinearGradient(ref g) => Ok(Self {
                buffer, sampler: g, kind: FillerKind::LinearGradient,
                rule: material.rule, opacity: material.scaled_opacity(), ctx,
            }),
            ref other => Err(RasterError::PaintMismatch {
                expected: "linear gradient", found: other.kind_name()
            }),
        }
    }
}

impl<'a, 'p> GradientFiller<'a, &'p RadialGradient> {
    /// Filler for a radial gradient material
    pub fn radial(buffer: &'a mut PixelBuffer, material: &'p PaintMaterial,
                  ctx: FillContext<'a>) -> Result<Self, RasterError> {
        match material.paint {
            Paint::RadialGradient(ref g) => Ok(Self {
                buffer, sampler: g, kind: FillerKind::RadialGradient,
                rule: material.rule, opacity: material.scaled_opacity(), ctx,
            }),
            ref other => Err(RasterError::PaintMismatch {
                expected: "radial gradient", found: other.kind_name()
            }),
        }
    }
}

impl<'a, S: PaintSampler> GradientFiller<'a, S> {
    /// Sample the gradient through `inverse`, mapping pixels back to paint space
    pub fn with_transform(self, inverse: Transform) -> GradientFiller<'a, TransformAdapter<S>> {
        GradientFiller {
            buffer: self.buffer,
            sampler: TransformAdapter::new(self.sampler, inverse),
            kind: self.kind,
            rule: self.rule,
            opacity: self.opacity,
            ctx: self.ctx,
        }
    }
}

impl<'a, S: PaintSampler> PolygonFiller for GradientFiller<'a, S> {
    fn kind(&self) -> FillerKind {
        self.kind
    }
    fn fill(&mut self, rows: &Rows, area: &FillArea) -> Result<(), RasterError> {
        trace!("FILL: {:?} rule {:?} opacity {}", self.kind, self.rule, self.opacity);
        dispatch(rows, area, self.buffer, &self.sampler, self.rule, self.opacity, &self.ctx);
        Ok(())
    }
}

/// Writes coverage into an opacity mask instead of blending color
///
/// New coverage is combined with the existing mask value, `a + b - a * b`
#[derive(Debug)]
pub struct MaskFiller<'a> {
    mask: &'a mut OpacityMask,
    rule: FillingRule,
    opacity: u32,
    cache: &'a AlphaCache,
}

impl<'a> MaskFiller<'a> {
    /// Filler writing into `mask`; gamma correction is not supported
    pub fn new(mask: &'a mut OpacityMask, material: &PaintMaterial,
               cache: &'a AlphaCache, gamma: Option<&GammaLut>) -> Result<Self, RasterError> {
        if gamma.is_some() {
            return Err(RasterError::NotImplemented("gamma correction when filling an opacity mask"));
        }
        Ok(Self { mask, rule: material.rule, opacity: material.scaled_opacity(), cache })
    }
    fn fill_rule<R: WindingRule>(&mut self, rows: &Rows, area: &FillArea) {
        let (sx, sy, ex, ey) = self.mask.bounds();
        let (y0, y1) = match rows.touched_range() {
            Some((y0, y1)) => (max(max(y0, area.min_y), sy), min(min(y1, area.max_y), ey - 1)),
            None => return,
        };
        let min_x = max(area.min_x, sx);
        let max_x = min(area.max_x, ex - 1);
        let scale = CoverageScale { opacity: self.opacity, mask: None };
        let (mask, cache) = (&mut *self.mask, self.cache);
        for y in y0 ..= y1 {
            sweep_row::<R, _>(rows, y, min_x, max_x, |x, len, cover| {
                for px in x .. x + len {
                    let cover = scale.apply(px, y, cover);
                    if let Some(v) = mask.value(px, y) {
                        mask.set(px, y, cache.get(v, cover as u8));
                    }
                }
            });
        }
    }
}

impl<'a> PolygonFiller for MaskFiller<'a> {
    fn kind(&self) -> FillerKind {
        FillerKind::Mask
    }
    fn fill(&mut self, rows: &Rows, area: &FillArea) -> Result<(), RasterError> {
        trace!("FILL: mask rule {:?} opacity {}", self.rule, self.opacity);
        match self.rule {
            FillingRule::NonZero => self.fill_rule::<NonZeroWinding>(rows, area),
            FillingRule::EvenOdd => self.fill_rule::<EvenOddWinding>(rows, area),
        }
        Ok(())
    }
}
