//! Kernel-based resampling for normal resizes.
//!
//! Resampling is a separable 2D convolution: each axis is scaled
//! independently with a 1D kernel evaluated over a kernel-specific support
//! radius of source samples. Target pixels map back to source coordinates
//! through the pixel-center convention `src = (dst + 0.5) * scale - 0.5`,
//! which makes a same-size nearest resize an exact identity. Sample
//! coordinates outside the buffer clamp to the nearest edge sample.
//!
//! Applied weights are re-normalized to sum to 1 for every target pixel, so
//! partial windows at the edges cause no brightness drift. The alpha channel
//! is resampled exactly like the color channels.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::OperatorError;
use crate::spec::SampleFilter;

/// Resize `buf` to `target_w x target_h` with the given kernel.
///
/// `SampleFilter::Undefined` is rejected with `MissingFilter`; a zero target
/// dimension is rejected with `InvalidGeometry`.
pub fn resize(
    buf: &PixelBuffer,
    target_w: u32,
    target_h: u32,
    filter: SampleFilter,
) -> Result<PixelBuffer, OperatorError> {
    let (w, h) = buf.dimensions();
    if filter == SampleFilter::Undefined {
        return Err(OperatorError::MissingFilter);
    }
    if target_w == 0 || target_h == 0 {
        return Err(OperatorError::geometry(
            format!("resize target {}x{} has a zero dimension", target_w, target_h),
            w,
            h,
        ));
    }
    if w == 0 || h == 0 {
        return Err(OperatorError::geometry("cannot resample an empty buffer", w, h));
    }

    if filter == SampleFilter::Nearest {
        return Ok(resize_nearest(buf, target_w, target_h));
    }

    let kernel = Kernel::for_filter(filter);
    let mid = horizontal_sample(buf, target_w, &kernel);
    Ok(vertical_sample(&mid, target_w, h, target_h, &kernel))
}

/// A 1D resampling kernel: a weighting function and its support radius.
struct Kernel {
    support: f32,
    eval: fn(f32) -> f32,
}

impl Kernel {
    /// Kernel table for the non-trivial filters. `Undefined` and `Nearest`
    /// never reach here; both are handled before convolution starts.
    fn for_filter(filter: SampleFilter) -> Self {
        match filter {
            SampleFilter::Triangle => Kernel {
                support: 1.0,
                eval: triangle,
            },
            SampleFilter::CatmullRom => Kernel {
                support: 2.0,
                eval: catmull_rom,
            },
            SampleFilter::Lanczos3 => Kernel {
                support: 3.0,
                eval: lanczos3,
            },
            SampleFilter::Gaussian => Kernel {
                support: 2.0,
                eval: gaussian,
            },
            SampleFilter::Undefined | SampleFilter::Nearest => unreachable!(),
        }
    }
}

/// Triangle (bilinear) kernel: `max(0, 1 - |d|)`.
fn triangle(d: f32) -> f32 {
    let d = d.abs();
    if d < 1.0 {
        1.0 - d
    } else {
        0.0
    }
}

/// Catmull-Rom cubic convolution with A = -0.5.
fn catmull_rom(d: f32) -> f32 {
    const A: f32 = -0.5;
    let d = d.abs();
    if d < 1.0 {
        (A + 2.0) * d * d * d - (A + 3.0) * d * d + 1.0
    } else if d < 2.0 {
        A * (d * d * d - 5.0 * d * d + 8.0 * d - 4.0)
    } else {
        0.0
    }
}

fn sinc(x: f32) -> f32 {
    if x == 0.0 {
        1.0
    } else {
        let p = std::f32::consts::PI * x;
        p.sin() / p
    }
}

/// Lanczos kernel with window 3: `sinc(d) * sinc(d / 3)`.
fn lanczos3(d: f32) -> f32 {
    if d.abs() < 3.0 {
        sinc(d) * sinc(d / 3.0)
    } else {
        0.0
    }
}

/// Gaussian kernel with sigma 0.5, truncated at its support radius.
/// The missing normalization constant cancels out in per-pixel weight
/// normalization.
fn gaussian(d: f32) -> f32 {
    const SIGMA: f32 = 0.5;
    if d.abs() > 2.0 {
        0.0
    } else {
        (-d * d / (2.0 * SIGMA * SIGMA)).exp()
    }
}

/// Source coordinate of a target pixel center.
#[inline]
fn source_center(dst: u32, scale: f32) -> f32 {
    (dst as f32 + 0.5) * scale - 0.5
}

/// Nearest-neighbor picks one source sample per target pixel, rounding
/// halves away from zero.
fn resize_nearest(buf: &PixelBuffer, target_w: u32, target_h: u32) -> PixelBuffer {
    let (w, h) = buf.dimensions();
    let scale_x = w as f32 / target_w as f32;
    let scale_y = h as f32 / target_h as f32;
    PixelBuffer::from_fn(target_w, target_h, |x, y| {
        let src_x = (source_center(x, scale_x).round().max(0.0) as u32).min(w - 1);
        let src_y = (source_center(y, scale_y).round().max(0.0) as u32).min(h - 1);
        buf.pixel(src_x, src_y)
    })
}

/// Horizontal pass: scale width, keep height, accumulate into f32 so the
/// vertical pass sees unquantized samples.
fn horizontal_sample(buf: &PixelBuffer, target_w: u32, kernel: &Kernel) -> Vec<f32> {
    let (w, h) = buf.dimensions();
    let scale = w as f32 / target_w as f32;
    let mut out = vec![0.0f32; target_w as usize * h as usize * CHANNELS];

    for y in 0..h {
        for x in 0..target_w {
            let center = source_center(x, scale);
            let left = (center - kernel.support).floor() as i64;
            let right = (center + kernel.support).ceil() as i64;

            let mut acc = [0.0f32; CHANNELS];
            let mut weight_sum = 0.0f32;
            for tap in left..=right {
                let weight = (kernel.eval)(center - tap as f32);
                if weight == 0.0 {
                    continue;
                }
                let src_x = tap.clamp(0, w as i64 - 1) as u32;
                let px = buf.pixel(src_x, y);
                for c in 0..CHANNELS {
                    acc[c] += weight * px[c] as f32;
                }
                weight_sum += weight;
            }

            let base = (y as usize * target_w as usize + x as usize) * CHANNELS;
            for c in 0..CHANNELS {
                out[base + c] = acc[c] / weight_sum;
            }
        }
    }
    out
}

/// Vertical pass over the intermediate plane; quantizes back to u8 with
/// rounding and clamping (negative-lobe kernels can overshoot the range).
fn vertical_sample(
    mid: &[f32],
    width: u32,
    src_h: u32,
    target_h: u32,
    kernel: &Kernel,
) -> PixelBuffer {
    let scale = src_h as f32 / target_h as f32;
    let mut out = PixelBuffer::new(width, target_h);

    for y in 0..target_h {
        let center = source_center(y, scale);
        let top = (center - kernel.support).floor() as i64;
        let bottom = (center + kernel.support).ceil() as i64;

        for x in 0..width {
            let mut acc = [0.0f32; CHANNELS];
            let mut weight_sum = 0.0f32;
            for tap in top..=bottom {
                let weight = (kernel.eval)(center - tap as f32);
                if weight == 0.0 {
                    continue;
                }
                let src_y = tap.clamp(0, src_h as i64 - 1) as usize;
                let base = (src_y * width as usize + x as usize) * CHANNELS;
                for c in 0..CHANNELS {
                    acc[c] += weight * mid[base + c];
                }
                weight_sum += weight;
            }

            let mut px = [0u8; CHANNELS];
            for c in 0..CHANNELS {
                px[c] = (acc[c] / weight_sum).round().clamp(0.0, 255.0) as u8;
            }
            out.put_pixel(x, y, px);
        }
    }
    out
}
