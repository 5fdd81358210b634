//! Reading and writing of PNG files
//!
//! Pixel buffers are stored as 8 bit RGBA, top row first.

use crate::buffer::PixelBuffer;
use crate::errors::RasterError;

use log::debug;

use std::path::Path;

/// Write `buffer` to `filename`, format from the extension
pub fn write_png<P: AsRef<Path>>(buffer: &PixelBuffer, filename: P) -> Result<(), RasterError> {
    let rgba = buffer.to_rgba();
    image::save_buffer(filename, &rgba, buffer.width() as u32, buffer.height() as u32, image::RGBA(8))?;
    Ok(())
}

/// Read an image into a new pixel buffer
pub fn read_png<P: AsRef<Path>>(filename: P) -> Result<PixelBuffer, RasterError> {
    let img = image::open(filename)?.to_rgba();
    let (w, h) = img.dimensions();
    let (w, h) = (w as usize, h as usize);
    let data = img.into_raw().chunks(4)
        .map(|px| {
            let (r, g, b, a) = (u32::from(px[0]), u32::from(px[1]), u32::from(px[2]), u32::from(px[3]));
            a << 24 | r << 16 | g << 8 | b
        })
        .collect();
    PixelBuffer::from_raw(data, w, h, w as isize, 0)
}

/// Number of pixels differing between two buffers
///
/// Buffers of different sizes differ everywhere
pub fn buffer_diff(a: &PixelBuffer, b: &PixelBuffer) -> usize {
    if a.width() != b.width() || a.height() != b.height() {
        debug!("size differs {}x{} {}x{}", a.width(), a.height(), b.width(), b.height());
        return std::cmp::max(a.width() * a.height(), b.width() * b.height());
    }
    let mut n = 0;
    for y in 0 .. a.height() {
        for (x, (p1, p2)) in a.row(y).iter().zip(b.row(y).iter()).enumerate() {
            if p1 != p2 {
                debug!("[{},{}]: {:08x} {:08x}", x, y, p1, p2);
                n += 1;
            }
        }
    }
    n
}

/// True if two image files hold the same pixels
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool, RasterError> {
    let a = read_png(f1)?;
    let b = read_png(f2)?;
    Ok(buffer_diff(&a, &b) == 0)
}
