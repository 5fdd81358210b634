//! Analytical scanline rasterizer
//!
//! Polygons are turned into exact per-pixel coverage and blended into a
//! packed ARGB32 [PixelBuffer] with a [PaintMaterial] (solid color, linear
//! or radial gradient).
//!
//! # How does this work
//!
//! ```text
//!    ras = Rasterizer::new()
//!    ras.attach(PixelBuffer)
//!  Raster Operations
//!    begin, move_to, line_to, add_polygon
//!     clip.line_to()                   -- region code (start << 4 | end)
//!      classify_segment()              -- 0..3 pieces, clipped in y
//!       rows.draw_scaled_line()        -- row by row, cell by cell
//!        rows.go_to_cell()
//!     Output: Rows of Cells with X, Coverage and Area
//!  Render to Image
//!   finish()
//!     filler.fill(rows)                -- ColorFiller, GradientFiller, MaskFiller
//!       paint_rows()                   -- opacity, mask, gamma, AlphaCache
//!         sweep_row()                  -- winding rule, spans between cells
//! ```
//!
//! # Example
//!
//!     use vecraster::{Rasterizer,PixelBuffer,PaintMaterial,Paint,Argb};
//!
//!     let mut ras = Rasterizer::new();
//!     ras.attach(PixelBuffer::new(20, 20));
//!     ras.set_paint(PaintMaterial::new(Paint::solid(Argb::new(255,255,0,0))));
//!
//!     let square = [0.,0., 10.,0., 10.,10., 0.,10., 0.,0.];
//!     ras.fill_polygon(&square, 5, 0).unwrap();
//!
//!     let buf = ras.buffer().unwrap();
//!     assert_eq!(buf.get(5,5), 0xFFFF0000);
//!     assert_eq!(buf.get(15,15), 0x00000000);
//!

pub mod errors;
pub mod color;
pub mod math;
pub mod gamma;
pub mod buffer;
pub mod alphamask;
pub mod affine_transform;
pub mod paint;
pub mod cell;
pub mod clip;
pub mod render;
pub mod raster;
pub mod io;

pub use errors::*;
pub use color::*;
pub use math::*;
pub use gamma::*;
pub use buffer::*;
pub use alphamask::*;
pub use affine_transform::*;
pub use paint::*;
pub use cell::*;
pub use clip::*;
pub use render::*;
pub use raster::*;

/// Sub-pixel precision, in bits
pub const PIXEL_SHIFT : i32 = 8;
/// Number of sub-pixel steps in a pixel
pub const PIXEL_SCALE : i32 = 1 << PIXEL_SHIFT;
/// Mask of the fractional part of a scaled coordinate
pub const PIXEL_MASK  : i32 = PIXEL_SCALE - 1;

/// Convert a coordinate in pixels to the scaled (1/256 pixel) space
pub(crate) fn upscale(v: f64) -> i32 {
    (v * f64::from(PIXEL_SCALE)).round() as i32
}
