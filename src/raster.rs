//! Polygon Rasterizer
//!
//! Collects polygons into rows of cells and fills them with the current
//! paint. A pass is either two phase
//!
//!     use vecraster::{Rasterizer,PixelBuffer};
//!
//!     let mut ras = Rasterizer::new();
//!     ras.attach(PixelBuffer::new(8, 8));
//!     ras.begin().unwrap();
//!     ras.add_polygon(&[1.,1., 7.,1., 4.,7.], 3, 0).unwrap();
//!     ras.add_polygon(&[3.,2., 5.,2., 4.,4.], 3, 0).unwrap();
//!     ras.finish().unwrap();
//!
//! or a single [Rasterizer::fill_polygon] call.

use crate::cell::Rows;
use crate::clip::Clip;
use crate::clip::ClipBox;
use crate::buffer::PixelBuffer;
use crate::alphamask::OpacityMask;
use crate::gamma::GammaLut;
use crate::math::AlphaCache;
use crate::paint::PaintMaterial;
use crate::affine_transform::Transform;
use crate::render::FillArea;
use crate::render::FillContext;
use crate::render::FillerKind;
use crate::render::PolygonFiller;
use crate::render::ColorFiller;
use crate::render::GradientFiller;
use crate::render::MaskFiller;
use crate::errors::RasterError;
use crate::PIXEL_SCALE;

use log::debug;
use log::trace;
use log::warn;

/// Largest coordinate accepted, in pixels; larger values are clamped
///
/// Edges are clipped in 64 bit scaled coordinates, this keeps their
/// intersections with the box exact to a sub-pixel step.
const COORD_LIMIT : f64 = (1u64 << 40) as f64;

/// Winding rule deciding which parts of a polygon are inside
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum FillingRule {
    NonZero,
    EvenOdd,
}
impl Default for FillingRule {
    fn default() -> FillingRule {
        FillingRule::NonZero
    }
}

/// Rasterizer pass state
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum State {
    /// No pass in progress
    Idle,
    /// Between begin and finish
    Accumulating,
}
impl Default for State {
    fn default() -> State {
        State::Idle
    }
}
impl State {
    fn name(self) -> &'static str {
        match self {
            State::Idle => "idle",
            State::Accumulating => "accumulating",
        }
    }
}

/// Analytical scanline rasterizer
///
/// Owns the target buffer, the paint state and the scratch rows reused
/// between passes.
#[derive(Debug,Default)]
pub struct Rasterizer {
    buffer: Option<PixelBuffer>,
    rows: Rows,
    clip: Clip,
    state: State,
    material: PaintMaterial,
    gamma: Option<GammaLut>,
    mask: Option<OpacityMask>,
    transform: Transform,
    inverse: Option<Transform>,
    cache: AlphaCache,
    coords: Vec<f64>,
    contour_start: Option<(i64, i64)>,
    contour_open: bool,
}

/// Scaled coordinate of `v` pixels, clamped to the accepted range
fn scaled(v: f64) -> i64 {
    (v.max(-COORD_LIMIT).min(COORD_LIMIT) * f64::from(PIXEL_SCALE)).round() as i64
}

impl Rasterizer {
    /// Create a new rasterizer without a buffer
    pub fn new() -> Self {
        Self { clip: Clip::new(), ..Default::default() }
    }
    /// Draw into `buffer`, returning the previously attached one
    ///
    /// A pass in progress is discarded
    pub fn attach(&mut self, buffer: PixelBuffer) -> Option<PixelBuffer> {
        if self.state == State::Accumulating {
            warn!("buffer attached during a pass, discarding the pass");
            self.end_pass();
        }
        self.rows.resize(buffer.height());
        debug!("attach buffer {}x{}", buffer.width(), buffer.height());
        self.buffer.replace(buffer)
    }
    /// Remove the buffer
    pub fn detach(&mut self) -> Option<PixelBuffer> {
        if self.state == State::Accumulating {
            warn!("buffer detached during a pass, discarding the pass");
            self.end_pass();
        }
        self.buffer.take()
    }
    /// Attached buffer
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }
    /// Attached buffer, mutable
    pub fn buffer_mut(&mut self) -> Option<&mut PixelBuffer> {
        self.buffer.as_mut()
    }
    /// Paint used by the next fill
    pub fn set_paint(&mut self, material: PaintMaterial) {
        self.material = material;
    }
    pub fn paint(&self) -> &PaintMaterial {
        &self.material
    }
    /// Gamma correction applied when blending, `None` to blend linearly
    pub fn set_gamma(&mut self, gamma: Option<GammaLut>) {
        self.gamma = gamma;
    }
    pub fn gamma(&self) -> Option<&GammaLut> {
        self.gamma.as_ref()
    }
    /// Opacity mask applied to coverage, `None` to draw unmasked
    pub fn set_mask(&mut self, mask: Option<OpacityMask>) {
        self.mask = mask;
    }
    pub fn mask(&self) -> Option<&OpacityMask> {
        self.mask.as_ref()
    }
    /// Transform applied to polygon coordinates
    ///
    /// Gradients are sampled through the inverse, computed once here
    pub fn set_transform(&mut self, transform: Transform) -> Result<(), RasterError> {
        let inverse = transform.inverted().ok_or(RasterError::NonInvertibleTransform)?;
        self.transform = transform;
        self.inverse = if transform.is_identity() { None } else { Some(inverse) };
        debug!("transform {:?}", transform);
        Ok(())
    }
    pub fn transform(&self) -> &Transform {
        &self.transform
    }
    /// Current pass state
    pub fn state(&self) -> State {
        self.state
    }
    /// Clip box of the current or last pass
    pub fn clip_box(&self) -> ClipBox {
        self.clip.clip_box()
    }
    /// Accumulated rows of cells
    pub fn rows(&self) -> &Rows {
        &self.rows
    }

    fn expect_state(&self, state: State, operation: &'static str) -> Result<(), RasterError> {
        if self.state != state {
            return Err(RasterError::InvalidState { operation, state: self.state.name() });
        }
        Ok(())
    }

    /// Start a pass clipped to the whole buffer
    pub fn begin(&mut self) -> Result<(), RasterError> {
        let (w, h) = self.buffer_size()?;
        self.begin_with_clip(ClipBox::for_buffer(w, h))
    }
    /// Start a pass clipped to `clip_box`, restricted to the buffer
    pub fn begin_with_clip(&mut self, clip_box: ClipBox) -> Result<(), RasterError> {
        self.expect_state(State::Idle, "begin")?;
        let (w, h) = self.buffer_size()?;
        self.rows.resize(h);
        self.clip.set_clip_box(clip_box, w, h);
        self.contour_start = None;
        self.contour_open = false;
        self.state = State::Accumulating;
        debug!("begin pass, clip {:?}", self.clip.clip_box());
        Ok(())
    }
    fn buffer_size(&self) -> Result<(usize, usize), RasterError> {
        self.buffer.as_ref()
            .map(|b| (b.width(), b.height()))
            .ok_or(RasterError::MissingBuffer)
    }

    /// Start a new contour at (x,y), closing the current one
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<(), RasterError> {
        self.expect_state(State::Accumulating, "move_to")?;
        self.close_contour();
        let (x, y) = self.transform.transform(x, y);
        self.move_to_scaled(scaled(x), scaled(y));
        Ok(())
    }
    /// Add an edge from the current point to (x,y)
    ///
    /// Without a current point this starts a contour at (x,y)
    pub fn line_to(&mut self, x: f64, y: f64) -> Result<(), RasterError> {
        self.expect_state(State::Accumulating, "line_to")?;
        let (x, y) = self.transform.transform(x, y);
        let (x, y) = (scaled(x), scaled(y));
        if self.contour_start.is_none() {
            self.move_to_scaled(x, y);
        } else {
            self.line_to_scaled(x, y);
        }
        Ok(())
    }
    /// Close the current contour back to its start
    pub fn close_polygon(&mut self) -> Result<(), RasterError> {
        self.expect_state(State::Accumulating, "close_polygon")?;
        self.close_contour();
        Ok(())
    }
    fn move_to_scaled(&mut self, x: i64, y: i64) {
        self.clip.move_to(x, y);
        self.contour_start = Some((x, y));
        self.contour_open = false;
    }
    fn line_to_scaled(&mut self, x: i64, y: i64) {
        self.clip.line_to(&mut self.rows, x, y);
        self.contour_open = true;
    }
    fn close_contour(&mut self) {
        if let (true, Some((x, y))) = (self.contour_open, self.contour_start) {
            trace!("CLOSE POLYGON: {} {}", x, y);
            self.clip.line_to(&mut self.rows, x, y);
            self.contour_open = false;
        }
    }

    /// Add a closed polygon
    ///
    /// `coords` holds `x0,y0,x1,y1,...`; `point_count` points are read
    /// starting at point `start_offset`. Polygons with fewer than 3 points
    /// are ignored.
    pub fn add_polygon(&mut self, coords: &[f64], point_count: usize, start_offset: usize) -> Result<(), RasterError> {
        self.expect_state(State::Accumulating, "add_polygon")?;
        let end = start_offset.checked_add(point_count)
            .and_then(|n| n.checked_mul(2))
            .filter(|&n| n <= coords.len())
            .ok_or_else(|| RasterError::InvalidPolygon(
                format!("{} points from {} in {} coordinates", point_count, start_offset, coords.len())))?;
        if point_count < 3 {
            warn!("polygon with {} points ignored", point_count);
            return Ok(());
        }
        self.close_contour();
        let mut coords_buf = std::mem::replace(&mut self.coords, Vec::new());
        coords_buf.clear();
        for p in coords[start_offset * 2 .. end].chunks(2) {
            let (x, y) = self.transform.transform(p[0], p[1]);
            coords_buf.push(x);
            coords_buf.push(y);
        }
        let mut pts = coords_buf.chunks(2).map(|p| (scaled(p[0]), scaled(p[1])));
        if let Some((x, y)) = pts.next() {
            self.move_to_scaled(x, y);
        }
        for (x, y) in pts {
            self.line_to_scaled(x, y);
        }
        self.close_contour();
        self.coords = coords_buf;
        Ok(())
    }

    /// Merge precomputed `(x, coverage, area)` cells into row `y`
    ///
    /// Rows outside of the clip box are ignored, columns are clamped to it
    pub fn append_row_data(&mut self, y: i32, cells: &[(i32, i32, i32)]) -> Result<(), RasterError> {
        self.expect_state(State::Accumulating, "append_row_data")?;
        let (y0, y1) = self.clip.row_range();
        if self.clip.is_clip_box_outside_bound() || y < y0 || y > y1 {
            warn!("row data for row {} outside of clip rows {} .. {}", y, y0, y1);
            return Ok(());
        }
        let (min_x, max_x) = self.clip.column_range();
        self.rows.prepare_rows(y, y);
        for &(x, coverage, area) in cells {
            self.rows.set_cell(y, x, coverage, area, min_x, max_x);
        }
        Ok(())
    }

    fn fill_area(&self) -> FillArea {
        let (min_x, max_x) = self.clip.column_range();
        let (min_y, max_y) = self.clip.row_range();
        FillArea { min_x, min_y, max_x, max_y }
    }
    fn end_pass(&mut self) {
        self.rows.reset();
        self.contour_start = None;
        self.contour_open = false;
        self.state = State::Idle;
    }

    /// Fill the accumulated polygons with the current paint and end the pass
    pub fn finish(&mut self) -> Result<(), RasterError> {
        self.expect_state(State::Accumulating, "finish")?;
        self.close_contour();
        let result = self.render();
        debug!("finish pass, {} cells", self.rows.total_cells());
        self.end_pass();
        result
    }
    /// End the pass without drawing
    pub fn finish_without_filling(&mut self) -> Result<(), RasterError> {
        self.expect_state(State::Accumulating, "finish_without_filling")?;
        debug!("discard pass, {} cells", self.rows.total_cells());
        self.end_pass();
        Ok(())
    }
    /// Write the coverage of the accumulated polygons into `mask` and end
    /// the pass
    ///
    /// The paint opacity and filling rule apply; gamma correction is not
    /// supported.
    pub fn finish_to_mask(&mut self, mask: &mut OpacityMask) -> Result<(), RasterError> {
        self.expect_state(State::Accumulating, "finish_to_mask")?;
        self.close_contour();
        let area = self.fill_area();
        let result = MaskFiller::new(mask, &self.material, &self.cache, self.gamma.as_ref())
            .and_then(|mut f| f.fill(&self.rows, &area));
        debug!("finish pass into mask, {} cells", self.rows.total_cells());
        self.end_pass();
        result
    }

    fn render(&mut self) -> Result<(), RasterError> {
        if self.clip.is_clip_box_outside_bound() || !self.rows.has_cells() {
            return Ok(());
        }
        let area = self.fill_area();
        let buffer = self.buffer.as_mut().ok_or(RasterError::MissingBuffer)?;
        let ctx = FillContext {
            cache: &self.cache,
            gamma: self.gamma.as_ref(),
            mask: self.mask.as_ref(),
        };
        let material = &self.material;
        let rows = &self.rows;
        let kind = FillerKind::for_paint(&material.paint);
        trace!("RENDER: {:?} filler, transformed {}", kind, self.inverse.is_some());
        match (kind, self.inverse) {
            (FillerKind::SolidColor, _) =>
                ColorFiller::new(buffer, material, ctx)?.fill(rows, &area),
            (FillerKind::LinearGradient, None) =>
                GradientFiller::linear(buffer, material, ctx)?.fill(rows, &area),
            (FillerKind::LinearGradient, Some(inv)) =>
                GradientFiller::linear(buffer, material, ctx)?.with_transform(inv).fill(rows, &area),
            (FillerKind::RadialGradient, None) =>
                GradientFiller::radial(buffer, material, ctx)?.fill(rows, &area),
            (FillerKind::RadialGradient, Some(inv)) =>
                GradientFiller::radial(buffer, material, ctx)?.with_transform(inv).fill(rows, &area),
            (FillerKind::Mask, _) => Err(RasterError::PaintMismatch {
                expected: "color or gradient", found: material.paint.kind_name()
            }),
        }
    }

    /// Fill a single closed polygon, see [Rasterizer::add_polygon]
    pub fn fill_polygon(&mut self, coords: &[f64], point_count: usize, start_offset: usize) -> Result<(), RasterError> {
        self.begin()?;
        if let Err(e) = self.add_polygon(coords, point_count, start_offset) {
            self.end_pass();
            return Err(e);
        }
        self.finish()
    }
}
