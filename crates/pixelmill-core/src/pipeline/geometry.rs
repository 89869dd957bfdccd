//! Crop and flip operators.

use crate::buffer::PixelBuffer;
use crate::error::OperatorError;
use crate::spec::CropSpec;

/// Cut the sub-rectangle `(x1, y1)..(x2, y2)` out of `buf`.
///
/// Bounds are checked against the buffer's current dimensions: the
/// rectangle must be non-empty and lie fully inside the buffer.
pub fn crop(buf: &PixelBuffer, spec: &CropSpec) -> Result<PixelBuffer, OperatorError> {
    let (w, h) = buf.dimensions();
    if spec.x1 >= spec.x2 || spec.y1 >= spec.y2 {
        return Err(OperatorError::geometry(
            format!(
                "empty crop rectangle ({},{})..({},{})",
                spec.x1, spec.y1, spec.x2, spec.y2
            ),
            w,
            h,
        ));
    }
    if spec.x2 > w || spec.y2 > h {
        return Err(OperatorError::geometry(
            format!(
                "crop rectangle ({},{})..({},{}) exceeds the buffer",
                spec.x1, spec.y1, spec.x2, spec.y2
            ),
            w,
            h,
        ));
    }
    Ok(PixelBuffer::from_fn(
        spec.x2 - spec.x1,
        spec.y2 - spec.y1,
        |x, y| buf.pixel(spec.x1 + x, spec.y1 + y),
    ))
}

/// Mirror left/right by reversing each row in place.
pub fn flip_h(mut buf: PixelBuffer) -> PixelBuffer {
    let (w, h) = buf.dimensions();
    for y in 0..h {
        for x in 0..w / 2 {
            let a = buf.pixel(x, y);
            let b = buf.pixel(w - 1 - x, y);
            buf.put_pixel(x, y, b);
            buf.put_pixel(w - 1 - x, y, a);
        }
    }
    buf
}

/// Mirror top/bottom by reversing the row order in place.
pub fn flip_v(mut buf: PixelBuffer) -> PixelBuffer {
    let (w, h) = buf.dimensions();
    for y in 0..h / 2 {
        for x in 0..w {
            let a = buf.pixel(x, y);
            let b = buf.pixel(x, h - 1 - y);
            buf.put_pixel(x, y, b);
            buf.put_pixel(x, h - 1 - y, a);
        }
    }
    buf
}
