//! Cells and Rows
//!
//! Coverage is accumulated per scanline in sparse, X-ascending lists of
//! cells. Cells of every row live in one arena and are linked by index.
//!
//! For each cell touched by an edge:
//!   - `coverage`: signed height of the edge inside the cell, 1/256 pixel
//!   - `area`: signed height times the sum of the fractional x at both
//!     ends of the edge inside the cell (twice the trapezoid left of the edge)

use crate::PIXEL_SHIFT;
use crate::PIXEL_SCALE;
use crate::PIXEL_MASK;

use log::trace;

use std::cmp::min;
use std::cmp::max;

/// Accumulated coverage of one pixel of a row
#[derive(Debug,Copy,Clone,PartialEq,Default)]
pub struct CellData {
    /// Pixel column
    pub x: i32,
    /// Signed vertical coverage
    pub coverage: i32,
    /// Signed area, 2 x trapezoid
    pub area: i32,
    /// Next cell to the right
    pub next: Option<u32>,
}

/// Head of the cell list of one scanline
#[derive(Debug,Copy,Clone,PartialEq,Default)]
pub struct RowData {
    /// Left most cell
    pub first: Option<u32>,
    /// Last cell accessed, starting point for the next insertion
    pub current: Option<u32>,
}

/// Scanlines of cells
///
/// Rows outside of `[current_start_y, current_end_y)` have not been
/// prepared and must not be written to.
#[derive(Debug)]
pub struct Rows {
    cells: Vec<CellData>,
    rows: Vec<RowData>,
    current_start_y: i32,
    current_end_y: i32,
    min_y: i32,
    max_y: i32,
}

/// Cells of one row, left to right
pub struct RowCells<'a> {
    cells: &'a [CellData],
    cur: Option<u32>,
}

impl<'a> Iterator for RowCells<'a> {
    type Item = &'a CellData;
    fn next(&mut self) -> Option<&'a CellData> {
        let c = &self.cells[self.cur? as usize];
        self.cur = c.next;
        Some(c)
    }
}

impl Default for Rows {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Rows {
    /// Rows for a buffer of `height` scanlines
    pub fn new(height: usize) -> Self {
        let mut r = Rows {
            cells: vec![],
            rows: vec![],
            current_start_y: 0,
            current_end_y: 0,
            min_y: std::i32::MAX,
            max_y: std::i32::MIN,
        };
        r.resize(height);
        r
    }
    /// Number of rows, buffer height + 2
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
    /// True once any edge deposited a cell
    pub fn has_cells(&self) -> bool {
        !self.cells.is_empty()
    }
    /// Number of cells in use
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }
    /// Recreate the rows if the buffer height changed
    pub fn resize(&mut self, height: usize) {
        if self.rows.len() != height + 2 {
            self.rows = vec![RowData::default(); height + 2];
            self.cells.clear();
            self.current_start_y = 0;
            self.current_end_y = 0;
            self.min_y = std::i32::MAX;
            self.max_y = std::i32::MIN;
        } else {
            self.reset();
        }
    }
    /// Clear all prepared rows and drop every cell, keeping allocations
    pub fn reset(&mut self) {
        for y in self.current_start_y .. self.current_end_y {
            self.rows[y as usize] = RowData::default();
        }
        self.cells.clear();
        self.current_start_y = 0;
        self.current_end_y = 0;
        self.min_y = std::i32::MAX;
        self.max_y = std::i32::MIN;
    }
    /// Make sure rows `[start_y, end_y + 2)` are initialized
    ///
    /// The range is clamped to the rows available
    pub fn prepare_rows(&mut self, start_y: i32, end_y: i32) {
        let lo = max(start_y, 0);
        let hi = min(end_y.saturating_add(2), self.rows.len() as i32);
        if lo >= hi {
            return;
        }
        if self.current_start_y >= self.current_end_y {
            for y in lo .. hi {
                self.rows[y as usize] = RowData::default();
            }
            self.current_start_y = lo;
            self.current_end_y = hi;
        } else {
            for y in lo .. self.current_start_y {
                self.rows[y as usize] = RowData::default();
            }
            for y in self.current_end_y .. hi {
                self.rows[y as usize] = RowData::default();
            }
            self.current_start_y = min(lo, self.current_start_y);
            self.current_end_y = max(hi, self.current_end_y);
        }
        trace!("PREPARE_ROWS {} .. {}", self.current_start_y, self.current_end_y);
    }
    /// True if row `y` has been prepared
    pub fn is_prepared(&self, y: i32) -> bool {
        y >= self.current_start_y && y < self.current_end_y
    }
    /// First and last row holding cells
    pub fn touched_range(&self) -> Option<(i32, i32)> {
        if self.min_y > self.max_y {
            None
        } else {
            Some((self.min_y, self.max_y))
        }
    }
    /// Cells of row `y`, left to right
    pub fn row_cells(&self, y: i32) -> RowCells {
        let cur = if self.is_prepared(y) {
            self.rows[y as usize].first
        } else {
            None
        };
        RowCells { cells: &self.cells, cur }
    }
    /// Cell at column `x` of row `y`, created if not present
    ///
    /// The search starts at the last cell accessed in the row when it is
    /// left of `x`, edges mostly visit columns left to right.
    ///
    /// # Panics
    /// If row `y` has not been prepared
    pub fn go_to_cell(&mut self, y: i32, x: i32) -> usize {
        assert!(self.is_prepared(y), "row {} used before prepare_rows ({} .. {})",
                y, self.current_start_y, self.current_end_y);
        let row = self.rows[y as usize];
        let mut prev = None;
        let mut cur = row.first;
        if let Some(c) = row.current {
            let cell = &self.cells[c as usize];
            if cell.x == x {
                return c as usize;
            }
            if cell.x < x {
                prev = Some(c);
                cur = cell.next;
            }
        }
        while let Some(c) = cur {
            let cell = &self.cells[c as usize];
            if cell.x == x {
                self.rows[y as usize].current = Some(c);
                return c as usize;
            }
            if cell.x > x {
                break;
            }
            prev = Some(c);
            cur = cell.next;
        }
        let id = self.cells.len() as u32;
        self.cells.push(CellData { x, coverage: 0, area: 0, next: cur });
        match prev {
            None => self.rows[y as usize].first = Some(id),
            Some(p) => self.cells[p as usize].next = Some(id),
        }
        self.rows[y as usize].current = Some(id);
        id as usize
    }
    /// Accumulate coverage and area into the cell at (x,y)
    fn add(&mut self, y: i32, x: i32, coverage: i32, area: i32) {
        let c = self.go_to_cell(y, x);
        let cell = &mut self.cells[c];
        cell.coverage += coverage;
        cell.area += area;
        self.min_y = min(self.min_y, y);
        self.max_y = max(self.max_y, y);
    }
    /// Merge precomputed coverage and area into row `y`
    ///
    /// `x` is clamped to the columns `[min_x, max_x]` of the clip box
    pub fn set_cell(&mut self, y: i32, x: i32, coverage: i32, area: i32, min_x: i32, max_x: i32) {
        let x = max(min_x, min(x, max_x));
        self.add(y, x, coverage, area);
    }

    /// Deposit the coverage of the edge (x1,y1) - (x2,y2), in 1/256 pixels
    pub fn draw_scaled_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        // Horizontal edges carry no coverage
        if y1 == y2 {
            return;
        }
        // Walk left to right; a reversed edge negates its contributions
        let (slope_by_x, xa, ya, xb, yb) = if x2 < x1 {
            (-1, x2, y2, x1, y1)
        } else if x2 > x1 {
            (1, x1, y1, x2, y2)
        } else {
            (0, x1, y1, x2, y2)
        };
        let sign = if slope_by_x < 0 { -1 } else { 1 };
        let slope_by_y = if yb > ya { 1 } else { -1 };
        trace!("LINE: {} {} -> {} {} slope {} {}", x1, y1, x2, y2, slope_by_x, slope_by_y);

        let (mut ey, ey_end) = if slope_by_y > 0 {
            (ya >> PIXEL_SHIFT, (yb - 1) >> PIXEL_SHIFT)
        } else {
            ((ya - 1) >> PIXEL_SHIFT, yb >> PIXEL_SHIFT)
        };

        if slope_by_x == 0 {
            let ex = xa >> PIXEL_SHIFT;
            let two_fx = (xa & PIXEL_MASK) << 1;
            let mut y_from = ya;
            loop {
                let y_to = row_exit(ey, yb, slope_by_y);
                let delta = y_to - y_from;
                self.add(ey, ex, delta, two_fx * delta);
                if ey == ey_end {
                    break;
                }
                ey += slope_by_y;
                y_from = y_to;
            }
            return;
        }

        let dx = i64::from(xb - xa);
        let dy = i64::from(yb - ya);
        let mut x_from = xa;
        let mut y_from = ya;
        loop {
            let y_to = row_exit(ey, yb, slope_by_y);
            // (y_to - ya) and dy share their sign, the quotient is a floor
            let x_to = if y_to == yb {
                xb
            } else {
                xa + (i64::from(y_to - ya) * dx / dy) as i32
            };
            self.draw_row_span(ey, x_from, y_from, x_to, y_to, sign);
            if ey == ey_end {
                break;
            }
            ey += slope_by_y;
            x_from = x_to;
            y_from = y_to;
        }
    }

    /// Deposit the part of an edge inside row `ey`, `x1 <= x2`
    fn draw_row_span(&mut self, ey: i32, x1: i32, y1: i32, x2: i32, y2: i32, sign: i32) {
        let dy = y2 - y1;
        if dy == 0 {
            return;
        }
        if x1 == x2 {
            let ex = x1 >> PIXEL_SHIFT;
            let two_fx = (x1 & PIXEL_MASK) << 1;
            self.add(ey, ex, sign * dy, sign * dy * two_fx);
            return;
        }
        let ex1 = x1 >> PIXEL_SHIFT;
        // An edge ending on a pixel boundary ends in the pixel to its left
        let ex2 = (x2 - 1) >> PIXEL_SHIFT;
        if ex1 == ex2 {
            let base = ex1 << PIXEL_SHIFT;
            let (fx1, fx2) = (x1 - base, x2 - base);
            self.add(ey, ex1, sign * dy, sign * dy * (fx1 + fx2));
            return;
        }
        let dx = i64::from(x2 - x1);
        let (mut x_from, mut y_from) = (x1, y1);
        for ex in ex1 ..= ex2 {
            let base = ex << PIXEL_SHIFT;
            let (x_to, y_to) = if ex == ex2 {
                (x2, y2)
            } else {
                let x_to = base + PIXEL_SCALE;
                (x_to, y1 + (i64::from(x_to - x1) * i64::from(dy) / dx) as i32)
            };
            let delta = y_to - y_from;
            if delta != 0 {
                let fx_sum = (x_from - base) + (x_to - base);
                self.add(ey, ex, sign * delta, sign * delta * fx_sum);
            }
            x_from = x_to;
            y_from = y_to;
        }
    }
}

/// Scaled y where an edge heading to `y_end` leaves row `ey`
#[inline]
fn row_exit(ey: i32, y_end: i32, slope_by_y: i32) -> i32 {
    if slope_by_y > 0 {
        min(y_end, (ey + 1) << PIXEL_SHIFT)
    } else {
        max(y_end, ey << PIXEL_SHIFT)
    }
}
