//! Opacity mask
//!
//! A byte per pixel coverage layer combined with the computed coverage of a
//! fill. A mask value `v` scales coverage by `(v + 1) / 256`.

use crate::errors::RasterError;

/// Byte per pixel opacity mask covering `[start_x, end_x) x [start_y, end_y)`
/// of the destination buffer
///
/// Pixels outside of the bounds are fully masked out.
#[derive(Debug,Clone,Default)]
pub struct OpacityMask {
    /// Mask values, 0 (masked) to 255 (visible)
    data: Vec<u8>,
    stride: isize,
    start_offset: usize,
    start_x: i32,
    start_y: i32,
    end_x: i32,
    end_y: i32,
}

impl OpacityMask {
    /// Create a new mask, all values zero, over the given bounds
    pub fn new(start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> Self {
        let w = (end_x - start_x).max(0) as usize;
        let h = (end_y - start_y).max(0) as usize;
        Self {
            data: vec![0u8; w * h],
            stride: w as isize,
            start_offset: 0,
            start_x, start_y, end_x, end_y,
        }
    }
    /// Create a mask of width by height, anchored at (0,0), filled with `v`
    pub fn uniform(width: usize, height: usize, v: u8) -> Self {
        let mut m = Self::new(0, 0, width as i32, height as i32);
        m.data.iter_mut().for_each(|x| *x = v);
        m
    }
    /// Wrap existing mask data
    pub fn from_raw(data: Vec<u8>, stride: isize, start_offset: usize,
                    start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> Result<Self, RasterError> {
        let w = (end_x - start_x).max(0) as usize;
        let h = (end_y - start_y).max(0) as usize;
        if h > 0 && w > 0 {
            for &y in [0, h - 1].iter() {
                let start = start_offset as isize + y as isize * stride;
                if start < 0 || start as usize + w > data.len() {
                    return Err(RasterError::InvalidBuffer(
                        format!("mask row {} at {} outside of {} values", y, start, data.len())));
                }
            }
        }
        Ok(Self { data, stride, start_offset, start_x, start_y, end_x, end_y })
    }
    /// Mask bounds as `(start_x, start_y, end_x, end_y)`, end exclusive
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (self.start_x, self.start_y, self.end_x, self.end_y)
    }
    /// Distance in values between two mask rows
    pub fn stride(&self) -> isize {
        self.stride
    }
    /// True if (x,y) is inside the mask bounds
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.start_x && x < self.end_x && y >= self.start_y && y < self.end_y
    }
    fn index(&self, x: i32, y: i32) -> usize {
        let row = self.start_offset as isize + (y - self.start_y) as isize * self.stride;
        (row + (x - self.start_x) as isize) as usize
    }
    /// Mask value at (x,y), `None` outside of the bounds
    pub fn value(&self, x: i32, y: i32) -> Option<u8> {
        if self.contains(x, y) {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }
    /// Set the mask value at (x,y); ignored outside of the bounds
    pub fn set(&mut self, x: i32, y: i32, v: u8) {
        if self.contains(x, y) {
            let i = self.index(x, y);
            self.data[i] = v;
        }
    }
    /// Scale a coverage [0,255] by the mask value at (x,y)
    #[inline]
    pub fn apply(&self, x: i32, y: i32, cover: u32) -> u32 {
        match self.value(x, y) {
            Some(v) => (cover * (u32::from(v) + 1)) >> 8,
            None => 0,
        }
    }
}
