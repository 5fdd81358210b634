//! Pixel buffer

use crate::errors::RasterError;

/// Packed ARGB32 pixel buffer
///
/// Row `y` starts at `start_offset + y * stride`. A negative stride stores
/// the rows bottom-up (flipped Y axis).
#[derive(Debug,Clone,Default)]
pub struct PixelBuffer {
    /// Pixel data, `0xAARRGGBB`
    data: Vec<u32>,
    /// Image Width in pixels
    width: usize,
    /// Image Height in pixels
    height: usize,
    /// Distance in pixels between the starts of two consecutive rows
    stride: isize,
    /// Index of the first pixel of row 0
    start_offset: usize,
}

impl PixelBuffer {
    /// Create a new buffer of width by height, all transparent black
    pub fn new(width: usize, height: usize) -> Self {
        PixelBuffer {
            width, height,
            data: vec![0u32; width * height],
            stride: width as isize,
            start_offset: 0,
        }
    }
    /// Create a new buffer with rows stored bottom-up
    pub fn new_flipped(width: usize, height: usize) -> Self {
        PixelBuffer {
            width, height,
            data: vec![0u32; width * height],
            stride: -(width as isize),
            start_offset: width * height.saturating_sub(1),
        }
    }
    /// Wrap existing pixel data
    ///
    /// Every row, `start_offset + y * stride .. + width`, must lie inside `data`
    pub fn from_raw(data: Vec<u32>, width: usize, height: usize,
                    stride: isize, start_offset: usize) -> Result<Self, RasterError> {
        if stride.unsigned_abs() < width && height > 1 {
            return Err(RasterError::InvalidBuffer(
                format!("stride {} smaller than width {}", stride, width)));
        }
        for &y in [0, height.saturating_sub(1)].iter() {
            let start = start_offset as isize + y as isize * stride;
            if start < 0 || start as usize + width > data.len() {
                return Err(RasterError::InvalidBuffer(
                    format!("row {} at {} outside of {} pixels", y, start, data.len())));
            }
        }
        Ok(PixelBuffer { data, width, height, stride, start_offset })
    }
    /// Image Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }
    /// Image Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }
    /// Pixel storage, in memory order
    pub fn data(&self) -> &[u32] {
        &self.data
    }
    /// Distance in pixels between two rows
    pub fn stride(&self) -> isize {
        self.stride
    }
    /// Index of the first pixel of row 0
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }
    /// Index of the first pixel of row `y`
    pub fn row_offset(&self, y: usize) -> usize {
        debug_assert!(y < self.height);
        (self.start_offset as isize + y as isize * self.stride) as usize
    }
    /// Pixels of row `y`
    pub fn row(&self, y: usize) -> &[u32] {
        let i = self.row_offset(y);
        &self.data[i .. i + self.width]
    }
    /// Mutable pixels of row `y`
    pub fn row_mut(&mut self, y: usize) -> &mut [u32] {
        let i = self.row_offset(y);
        let w = self.width;
        &mut self.data[i .. i + w]
    }
    /// Pixel at (x,y)
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self[(x,y)]
    }
    /// Set the pixel at (x,y)
    pub fn set(&mut self, x: usize, y: usize, v: u32) {
        self[(x,y)] = v;
    }
    /// Set every pixel to `v`
    pub fn clear(&mut self, v: u32) {
        for y in 0 .. self.height {
            self.row_mut(y).iter_mut().for_each(|p| *p = v);
        }
    }
    /// Image as top-down RGBA bytes
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width * self.height * 4);
        for y in 0 .. self.height {
            for &p in self.row(y) {
                out.extend_from_slice(&[(p >> 16) as u8, (p >> 8) as u8, p as u8, (p >> 24) as u8]);
            }
        }
        out
    }
}

use std::ops::Index;
use std::ops::IndexMut;

impl Index<(usize,usize)> for PixelBuffer {
    type Output = u32;
    fn index(&self, index: (usize, usize)) -> &u32 {
        assert!(index.0 < self.width, "request {} >= {} width :: index", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index", index.1, self.height);
        let i = self.row_offset(index.1) + index.0;
        &self.data[i]
    }
}
impl IndexMut<(usize,usize)> for PixelBuffer {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut u32 {
        assert!(index.0 < self.width, "request {} >= {} width :: index_mut", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index_mut", index.1, self.height);
        let i = self.row_offset(index.1) + index.0;
        &mut self.data[i]
    }
}
