//! Named color presets, applied as per-channel affine washes.
//!
//! A preset blends a fixed tint into every pixel:
//! `out = tint * strength + in * (1 - strength)` per color channel. The
//! curves are configuration, not algorithm; [`PresetsConfig`] carries the
//! built-in palette and any user overrides.

use crate::buffer::PixelBuffer;
use crate::config::{PresetCurve, PresetsConfig};
use crate::error::OperatorError;
use crate::spec::FilterSpec;

/// Apply the preset selected by `spec`.
///
/// An `Unspecified` preset is rejected with `MissingFilterPreset`; an
/// explicit filter step that picks nothing is malformed input, not a no-op.
pub fn apply(
    buf: PixelBuffer,
    spec: &FilterSpec,
    presets: &PresetsConfig,
) -> Result<PixelBuffer, OperatorError> {
    let curve = presets
        .curve(spec.preset)
        .ok_or(OperatorError::MissingFilterPreset)?;
    Ok(wash(buf, curve))
}

/// Blend the curve's tint into every pixel. Alpha is untouched.
fn wash(mut buf: PixelBuffer, curve: PresetCurve) -> PixelBuffer {
    let strength = curve.strength;
    let keep = 1.0 - strength;
    let tint = [
        curve.tint[0] as f32 * strength,
        curve.tint[1] as f32 * strength,
        curve.tint[2] as f32 * strength,
    ];

    let (w, h) = buf.dimensions();
    for y in 0..h {
        for x in 0..w {
            let mut px = buf.pixel(x, y);
            for c in 0..3 {
                px[c] = (tint[c] + px[c] as f32 * keep).round() as u8;
            }
            buf.put_pixel(x, y, px);
        }
    }
    buf
}
