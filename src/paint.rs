//! Paint
//!
//! What a polygon is filled with: a solid color or a gradient, sampled at
//! pixel centers. Gradients map a position to a 256 entry [ColorRamp].

use crate::color::Argb;
use crate::affine_transform::Transform;
use crate::raster::FillingRule;

/// Number of colors in a gradient ramp
pub const RAMP_SIZE : usize = 256;

/// How gradient positions outside of [0,1] are mapped back onto the ramp
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum Spread {
    /// Clamp to the end colors
    Pad,
    /// Start over at 0 after 1
    Repeat,
    /// Mirror back and forth
    Reflect,
}
impl Default for Spread {
    fn default() -> Spread {
        Spread::Pad
    }
}

impl Spread {
    /// Ramp index of gradient position `t`
    pub fn index(self, t: f64) -> usize {
        let t = if t.is_finite() { t } else { 0.0 };
        let t = match self {
            Spread::Pad => t.max(0.0).min(1.0),
            Spread::Repeat => t - t.floor(),
            Spread::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        };
        let last = (RAMP_SIZE - 1) as f64;
        (t * last).round() as usize
    }
}

/// Color at a position along a gradient, offset in [0,1]
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Argb,
}

impl GradientStop {
    pub fn new(offset: f64, color: Argb) -> Self {
        Self { offset: offset.max(0.0).min(1.0), color }
    }
}

/// Precomputed gradient colors, packed ARGB32
#[derive(Clone,PartialEq)]
pub struct ColorRamp {
    colors: Vec<u32>,
}

impl ColorRamp {
    /// Build the ramp by interpolating between ordered stops
    ///
    /// Before the first stop the first color is used, after the last stop
    /// the last color. Without stops the ramp is transparent.
    pub fn new(stops: &[GradientStop]) -> Self {
        let mut stops = stops.to_vec();
        stops.sort_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap_or(std::cmp::Ordering::Equal));
        let last = (RAMP_SIZE - 1) as f64;
        let colors = (0 .. RAMP_SIZE).map(|i| {
            let t = i as f64 / last;
            let c = match stops.iter().position(|s| s.offset >= t) {
                None => stops.last().map(|s| s.color).unwrap_or_default(),
                Some(0) => stops[0].color,
                Some(k) => {
                    let (s0, s1) = (&stops[k-1], &stops[k]);
                    let span = s1.offset - s0.offset;
                    if span <= 0.0 {
                        s1.color
                    } else {
                        s0.color.gradient(&s1.color, (t - s0.offset) / span)
                    }
                }
            };
            c.to_u32()
        }).collect();
        Self { colors }
    }
    /// Ramp from `c1` at 0 to `c2` at 1
    pub fn two(c1: Argb, c2: Argb) -> Self {
        Self::new(&[GradientStop::new(0.0, c1), GradientStop::new(1.0, c2)])
    }
    /// Color at ramp index `i`
    #[inline]
    pub fn get(&self, i: usize) -> u32 {
        self.colors[i.min(RAMP_SIZE - 1)]
    }
    /// Color at gradient position `t`
    #[inline]
    pub fn at(&self, t: f64, spread: Spread) -> u32 {
        self.get(spread.index(t))
    }
}

impl std::fmt::Debug for ColorRamp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ColorRamp")
            .field("first", &format_args!("{:08x}", self.colors[0]))
            .field("last", &format_args!("{:08x}", self.colors[RAMP_SIZE-1]))
            .finish()
    }
}

/// Source color for a sample point in paint space
pub trait PaintSampler {
    /// Packed ARGB32 color at (x,y)
    fn sample(&self, x: f64, y: f64) -> u32;
}

/// Gradient along the line from (x1,y1) at 0 to (x2,y2) at 1
#[derive(Debug,Clone,PartialEq)]
pub struct LinearGradient {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub ramp: ColorRamp,
    pub spread: Spread,
}

impl LinearGradient {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, ramp: ColorRamp) -> Self {
        Self { x1, y1, x2, y2, ramp, spread: Spread::Pad }
    }
    pub fn with_spread(mut self, spread: Spread) -> Self {
        self.spread = spread;
        self
    }
    /// Position of (x,y) projected onto the gradient line
    pub fn position(&self, x: f64, y: f64) -> f64 {
        let dx = self.x2 - self.x1;
        let dy = self.y2 - self.y1;
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            return 0.0;
        }
        ((x - self.x1) * dx + (y - self.y1) * dy) / len2
    }
}

impl PaintSampler for LinearGradient {
    fn sample(&self, x: f64, y: f64) -> u32 {
        self.ramp.at(self.position(x, y), self.spread)
    }
}

/// Elliptical gradient, 0 at the center and 1 on the ellipse (rx, ry)
#[derive(Debug,Clone,PartialEq)]
pub struct RadialGradient {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub ramp: ColorRamp,
    pub spread: Spread,
}

impl RadialGradient {
    /// Circular gradient
    pub fn new(cx: f64, cy: f64, r: f64, ramp: ColorRamp) -> Self {
        Self::elliptical(cx, cy, r, r, ramp)
    }
    pub fn elliptical(cx: f64, cy: f64, rx: f64, ry: f64, ramp: ColorRamp) -> Self {
        Self { cx, cy, rx, ry, ramp, spread: Spread::Pad }
    }
    pub fn with_spread(mut self, spread: Spread) -> Self {
        self.spread = spread;
        self
    }
    /// Normalized distance of (x,y) from the center
    pub fn position(&self, x: f64, y: f64) -> f64 {
        if self.rx == 0.0 || self.ry == 0.0 {
            return 1.0;
        }
        let u = (x - self.cx) / self.rx;
        let v = (y - self.cy) / self.ry;
        (u * u + v * v).sqrt()
    }
}

impl PaintSampler for RadialGradient {
    fn sample(&self, x: f64, y: f64) -> u32 {
        self.ramp.at(self.position(x, y), self.spread)
    }
}

impl PaintSampler for Argb {
    fn sample(&self, _x: f64, _y: f64) -> u32 {
        self.to_u32()
    }
}

/// Inverse maps sample points from device space back into paint space
///
/// The inverse is computed once, when the adapter is built.
#[derive(Debug,Clone)]
pub struct TransformAdapter<S> {
    inner: S,
    inverse: Transform,
}

impl<S: PaintSampler> TransformAdapter<S> {
    /// Wrap `inner` with the already inverted `inverse` transform
    pub fn new(inner: S, inverse: Transform) -> Self {
        Self { inner, inverse }
    }
}

impl<S: PaintSampler> PaintSampler for TransformAdapter<S> {
    #[inline]
    fn sample(&self, x: f64, y: f64) -> u32 {
        let (u, v) = self.inverse.transform(x, y);
        self.inner.sample(u, v)
    }
}

impl<'a, S: PaintSampler> PaintSampler for &'a S {
    #[inline]
    fn sample(&self, x: f64, y: f64) -> u32 {
        (**self).sample(x, y)
    }
}

/// What to fill with
#[derive(Debug,Clone,PartialEq)]
pub enum Paint {
    SolidColor(Argb),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
}

impl Paint {
    /// Solid color paint
    pub fn solid(c: Argb) -> Self {
        Paint::SolidColor(c)
    }
    /// Name of the paint kind, for error reporting
    pub fn kind_name(&self) -> &'static str {
        match self {
            Paint::SolidColor(_) => "solid color",
            Paint::LinearGradient(_) => "linear gradient",
            Paint::RadialGradient(_) => "radial gradient",
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Paint::SolidColor(Argb::black())
    }
}

/// Paint, filling rule and opacity used by one fill
#[derive(Debug,Clone,PartialEq)]
pub struct PaintMaterial {
    pub paint: Paint,
    pub rule: FillingRule,
    scaled_opacity: u32,
}

impl PaintMaterial {
    /// Non-zero filling, full opacity
    pub fn new(paint: Paint) -> Self {
        Self { paint, rule: FillingRule::NonZero, scaled_opacity: 256 }
    }
    pub fn with_rule(mut self, rule: FillingRule) -> Self {
        self.rule = rule;
        self
    }
    /// Opacity in [0,1], stored as [0,256] fixed point
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.scaled_opacity = (opacity.max(0.0).min(1.0) * 256.0).round() as u32;
        self
    }
    /// Opacity as [0,256] fixed point
    pub fn scaled_opacity(&self) -> u32 {
        self.scaled_opacity
    }
}

impl Default for PaintMaterial {
    fn default() -> Self {
        Self::new(Paint::default())
    }
}
