//! Linear contrast adjustment around the 8-bit midpoint.

use crate::buffer::PixelBuffer;
use crate::error::OperatorError;
use crate::spec::ContrastSpec;

const MIDPOINT: f32 = 127.5;

/// Scale each color channel's distance from mid-gray by the factor.
///
/// Factors above 1 spread values toward the extremes, factors below 1 pull
/// them toward gray, 1 is a no-op and 0 collapses every color channel to
/// 128. Negative or non-finite factors are rejected with
/// `InvalidParameter`. Alpha is untouched.
pub fn adjust(mut buf: PixelBuffer, spec: &ContrastSpec) -> Result<PixelBuffer, OperatorError> {
    let factor = spec.contrast;
    if !(factor >= 0.0) || !factor.is_finite() {
        return Err(OperatorError::InvalidParameter(format!(
            "contrast factor must be a non-negative finite number, got {}",
            factor
        )));
    }

    let (w, h) = buf.dimensions();
    for y in 0..h {
        for x in 0..w {
            let mut px = buf.pixel(x, y);
            for channel in px.iter_mut().take(3) {
                let remapped = MIDPOINT + (*channel as f32 - MIDPOINT) * factor;
                *channel = remapped.round().clamp(0.0, 255.0) as u8;
            }
            buf.put_pixel(x, y, px);
        }
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varied() -> PixelBuffer {
        PixelBuffer::from_fn(4, 3, |x, y| {
            [(x * 60) as u8, (y * 90) as u8, ((x + y) * 30) as u8, 180]
        })
    }

    #[test]
    fn test_factor_one_is_noop() {
        let buf = varied();
        let out = adjust(buf.clone(), &ContrastSpec { contrast: 1.0 }).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn test_factor_zero_collapses_to_midpoint() {
        let out = adjust(varied(), &ContrastSpec { contrast: 0.0 }).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                let px = out.pixel(x, y);
                assert_eq!(&px[..3], &[128, 128, 128]);
                assert_eq!(px[3], 180);
            }
        }
    }

    #[test]
    fn test_high_factor_clamps() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.put_pixel(0, 0, [10, 245, 127, 255]);
        buf.put_pixel(1, 0, [128, 0, 255, 255]);
        let out = adjust(buf, &ContrastSpec { contrast: 100.0 }).unwrap();
        assert_eq!(&out.pixel(0, 0)[..3], &[0, 255, 78]);
        assert_eq!(&out.pixel(1, 0)[..3], &[178, 0, 255]);
    }

    #[test]
    fn test_half_factor_pulls_toward_gray() {
        let mut buf = PixelBuffer::new(1, 1);
        buf.put_pixel(0, 0, [27, 227, 127, 64]);
        let out = adjust(buf, &ContrastSpec { contrast: 0.5 }).unwrap();
        // 127.5 + (27 - 127.5) * 0.5 = 77.25 -> 77
        // 127.5 + (227 - 127.5) * 0.5 = 177.25 -> 177
        // 127.5 + (127 - 127.5) * 0.5 = 127.25 -> 127
        assert_eq!(out.pixel(0, 0), [77, 177, 127, 64]);
    }

    #[test]
    fn test_negative_factor_rejected() {
        let err = adjust(varied(), &ContrastSpec { contrast: -0.5 }).unwrap_err();
        assert!(matches!(err, OperatorError::InvalidParameter(_)));
    }

    #[test]
    fn test_nan_and_infinite_factors_rejected() {
        for bad in [f32::NAN, f32::INFINITY] {
            assert!(matches!(
                adjust(varied(), &ContrastSpec { contrast: bad }),
                Err(OperatorError::InvalidParameter(_))
            ));
        }
    }
}
