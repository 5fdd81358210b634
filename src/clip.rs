//! Clipping Region
//!
//! Edges are clipped against the clip box one at a time. Parts of an edge
//! left or right of the box are projected onto the box edge, keeping their
//! winding; parts above or below the box are dropped. A polygon clipped
//! this way covers exactly the pixels of the polygon intersected with the box.

use crate::cell::Rows;
use crate::PIXEL_SHIFT;
use crate::PIXEL_SCALE;
use crate::upscale;

use log::trace;
use log::debug;

/// Inside the clip box
pub const INSIDE : u8 = 0b0000;
/// Right of the clip box, x > x_max
pub const X_MAX  : u8 = 0b0001;
/// Below the clip box, y > y_max
pub const Y_MAX  : u8 = 0b0010;
/// Left of the clip box, x < x_min
pub const X_MIN  : u8 = 0b0100;
/// Above the clip box, y < y_min
pub const Y_MIN  : u8 = 0b1000;

const X_BITS : u8 = X_MIN | X_MAX;
const Y_BITS : u8 = Y_MIN | Y_MAX;

/// Key of a segment in the clip dispatch, `(start << 4) | end`
pub fn region_pair_key(start: u8, end: u8) -> u8 {
    (start << 4) | (end & 0x0F)
}

/// Clip box, in buffer pixels
#[derive(Debug,Copy,Clone,PartialEq,Default)]
pub struct ClipBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl ClipBox {
    /// Create a new clip box; values are sorted before storing
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let (x_min, x_max) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let (y_min, y_max) = if y1 > y2 { (y2, y1) } else { (y1, y2) };
        Self { x_min, y_min, x_max, y_max }
    }
    /// Whole buffer of width by height
    pub fn for_buffer(width: usize, height: usize) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }
    /// Box restricted to a buffer of width by height
    ///
    /// The far edges are pulled in by 1/256 pixel so the last column and row
    /// are the last ones touched.
    pub fn clamped(&self, width: usize, height: usize) -> Self {
        let eps = 1.0 / f64::from(PIXEL_SCALE);
        Self {
            x_min: self.x_min.max(0.0),
            y_min: self.y_min.max(0.0),
            x_max: self.x_max.min(width as f64 - eps),
            y_max: self.y_max.min(height as f64 - eps),
        }
    }
    /// True if the box covers no area
    pub fn is_empty(&self) -> bool {
        !(self.x_min < self.x_max && self.y_min < self.y_max)
    }
}

/// Where a point of a segment plan lies
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum PlanPoint {
    /// Start of the segment
    Start,
    /// End of the segment
    End,
    /// Start of the segment projected onto the left edge
    StartOnXMin,
    /// Start of the segment projected onto the right edge
    StartOnXMax,
    /// End of the segment projected onto the left edge
    EndOnXMin,
    /// End of the segment projected onto the right edge
    EndOnXMax,
    /// Where the segment crosses the left edge
    CrossXMin,
    /// Where the segment crosses the right edge
    CrossXMax,
}

/// Straight pieces a segment is replaced with, before clipping in y
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct SegmentPlan {
    pieces: [(PlanPoint, PlanPoint); 3],
    len: usize,
}

impl SegmentPlan {
    const EMPTY : SegmentPlan = SegmentPlan { pieces: [(PlanPoint::Start, PlanPoint::End); 3], len: 0 };
    fn of(p: &[(PlanPoint, PlanPoint)]) -> Self {
        let mut plan = Self::EMPTY;
        plan.pieces[.. p.len()].copy_from_slice(p);
        plan.len = p.len();
        plan
    }
    /// Pieces, in drawing order
    pub fn pieces(&self) -> &[(PlanPoint, PlanPoint)] {
        &self.pieces[.. self.len]
    }
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Plan for a segment from region `start` to region `end`
///
/// Segments with both ends on the same side outside in y draw nothing.
pub fn classify_segment(start: u8, end: u8) -> SegmentPlan {
    use self::PlanPoint::*;
    let (fy1, fy2) = (start & Y_BITS, end & Y_BITS);
    if fy1 != INSIDE && fy1 == fy2 {
        return SegmentPlan::EMPTY;
    }
    match (start & X_BITS, end & X_BITS) {
        (INSIDE, INSIDE) => SegmentPlan::of(&[(Start, End)]),
        (INSIDE, X_MAX)  => SegmentPlan::of(&[(Start, CrossXMax), (CrossXMax, EndOnXMax)]),
        (X_MAX, INSIDE)  => SegmentPlan::of(&[(StartOnXMax, CrossXMax), (CrossXMax, End)]),
        (INSIDE, X_MIN)  => SegmentPlan::of(&[(Start, CrossXMin), (CrossXMin, EndOnXMin)]),
        (X_MIN, INSIDE)  => SegmentPlan::of(&[(StartOnXMin, CrossXMin), (CrossXMin, End)]),
        (X_MAX, X_MIN)   => SegmentPlan::of(&[(StartOnXMax, CrossXMax), (CrossXMax, CrossXMin),
                                              (CrossXMin, EndOnXMin)]),
        (X_MIN, X_MAX)   => SegmentPlan::of(&[(StartOnXMin, CrossXMin), (CrossXMin, CrossXMax),
                                              (CrossXMax, EndOnXMax)]),
        (X_MIN, X_MIN)   => SegmentPlan::of(&[(StartOnXMin, EndOnXMin)]),
        (X_MAX, X_MAX)   => SegmentPlan::of(&[(StartOnXMax, EndOnXMax)]),
        // Both x bits set cannot be produced by a valid box
        _ => SegmentPlan::EMPTY,
    }
}

/// a * b / c, rounded
///
/// Done in floating point, the product of two wide coordinates does not
/// fit in 64 bits.
fn mul_div(a: i64, b: i64, c: i64) -> i64 {
    let (a, b, c) = (a as f64, b as f64, c as f64);
    (a * b / c).round() as i64
}

/// Clip Region
///
/// Keeps the current point and its region code between edges. Coordinates
/// are in 1/256 pixels. Points are 64 bit so far away vertices keep the
/// direction of their edges; only the pieces left inside the box are
/// narrowed for drawing.
#[derive(Debug,Default)]
pub struct Clip {
    clip_box: ClipBox,
    x_min: i32,
    y_min: i32,
    x_max: i32,
    y_max: i32,
    outside: bool,
    current_x: i64,
    current_y: i64,
    flag: u8,
}

impl Clip {
    /// Create a new clipping region, empty until a box is set
    pub fn new() -> Self {
        Self { outside: true, ..Default::default() }
    }
    /// Set the clip box, restricted to a buffer of width by height
    pub fn set_clip_box(&mut self, b: ClipBox, width: usize, height: usize) {
        let b = b.clamped(width, height);
        self.clip_box = b;
        self.outside = b.is_empty();
        self.x_min = upscale(b.x_min);
        self.y_min = upscale(b.y_min);
        self.x_max = upscale(b.x_max);
        self.y_max = upscale(b.y_max);
        if self.outside {
            debug!("clip box {:?} outside of buffer {}x{}", b, width, height);
        } else {
            debug!("clip box {:?}", b);
        }
    }
    /// Current clip box, restricted to the buffer
    pub fn clip_box(&self) -> ClipBox {
        self.clip_box
    }
    /// True if the clip box lies outside of the buffer and nothing is drawn
    pub fn is_clip_box_outside_bound(&self) -> bool {
        self.outside
    }
    /// Scaled clip box rows, first and last
    pub fn row_range(&self) -> (i32, i32) {
        (self.y_min >> PIXEL_SHIFT, self.y_max >> PIXEL_SHIFT)
    }
    /// Scaled clip box columns, first and last
    pub fn column_range(&self) -> (i32, i32) {
        (self.x_min >> PIXEL_SHIFT, self.x_max >> PIXEL_SHIFT)
    }
    /// Region code of the scaled point (x,y)
    pub fn region(&self, x: i64, y: i64) -> u8 {
        let mut code = INSIDE;
        if x > i64::from(self.x_max) { code |= X_MAX; }
        if x < i64::from(self.x_min) { code |= X_MIN; }
        code | self.y_region(y)
    }
    fn y_region(&self, y: i64) -> u8 {
        if y > i64::from(self.y_max) {
            Y_MAX
        } else if y < i64::from(self.y_min) {
            Y_MIN
        } else {
            INSIDE
        }
    }
    /// Current point and its region code
    pub fn position(&self) -> (i64, i64, u8) {
        (self.current_x, self.current_y, self.flag)
    }
    /// Start a new contour at the scaled point (x,y)
    pub fn move_to(&mut self, x: i64, y: i64) {
        self.current_x = x;
        self.current_y = y;
        self.flag = self.region(x, y);
    }
    /// Draw the visible part of the edge from the current point to (x,y)
    ///
    /// The current point always advances to (x,y), visible or not
    pub fn line_to(&mut self, rows: &mut Rows, x: i64, y: i64) {
        let (x1, y1, f1) = (self.current_x, self.current_y, self.flag);
        let f2 = self.region(x, y);
        self.current_x = x;
        self.current_y = y;
        self.flag = f2;
        if self.outside || (x1 == x && y1 == y) {
            return;
        }
        let key = region_pair_key(f1, f2);
        let plan = classify_segment(f1, f2);
        trace!("CLIP: {} {} -> {} {} key {:#04x} pieces {}", x1, y1, x, y, key, plan.len());
        for &(a, b) in plan.pieces() {
            let (ax, ay) = self.plan_point(a, x1, y1, x, y);
            let (bx, by) = self.plan_point(b, x1, y1, x, y);
            self.line_clip_y(rows, ax, ay, bx, by);
        }
    }
    fn plan_point(&self, p: PlanPoint, x1: i64, y1: i64, x2: i64, y2: i64) -> (i64, i64) {
        let (x_min, x_max) = (i64::from(self.x_min), i64::from(self.x_max));
        let cross = |bx: i64| (bx, y1 + mul_div(bx - x1, y2 - y1, x2 - x1));
        match p {
            PlanPoint::Start => (x1, y1),
            PlanPoint::End => (x2, y2),
            PlanPoint::StartOnXMin => (x_min, y1),
            PlanPoint::StartOnXMax => (x_max, y1),
            PlanPoint::EndOnXMin => (x_min, y2),
            PlanPoint::EndOnXMax => (x_max, y2),
            PlanPoint::CrossXMin => cross(x_min),
            PlanPoint::CrossXMax => cross(x_max),
        }
    }
    /// Clip a line along the top and bottom of the region and draw it
    fn line_clip_y(&self, rows: &mut Rows, x1: i64, y1: i64, x2: i64, y2: i64) {
        let f1 = self.y_region(y1);
        let f2 = self.y_region(y2);
        if f1 == INSIDE && f2 == INSIDE {
            self.draw(rows, x1, y1, x2, y2);
            return;
        }
        // Both points above or below the clip box
        if f1 == f2 {
            return;
        }
        let (y_min, y_max) = (i64::from(self.y_min), i64::from(self.y_max));
        let project = |by: i64| (x1 + mul_div(by - y1, x2 - x1, y2 - y1), by);
        let (tx1, ty1) = match f1 {
            Y_MIN => project(y_min),
            Y_MAX => project(y_max),
            _ => (x1, y1),
        };
        let (tx2, ty2) = match f2 {
            Y_MIN => project(y_min),
            Y_MAX => project(y_max),
            _ => (x2, y2),
        };
        self.draw(rows, tx1, ty1, tx2, ty2);
    }
    /// Draw a line already clipped in y, x is held to the box
    fn draw(&self, rows: &mut Rows, x1: i64, y1: i64, x2: i64, y2: i64) {
        let narrow_x = |x: i64| x.max(i64::from(self.x_min)).min(i64::from(self.x_max)) as i32;
        let narrow_y = |y: i64| y.max(i64::from(self.y_min)).min(i64::from(self.y_max)) as i32;
        let (x1, y1, x2, y2) = (narrow_x(x1), narrow_y(y1), narrow_x(x2), narrow_y(y2));
        rows.prepare_rows(y1.min(y2) >> PIXEL_SHIFT, y1.max(y2) >> PIXEL_SHIFT);
        rows.draw_scaled_line(x1, y1, x2, y2);
    }
}
