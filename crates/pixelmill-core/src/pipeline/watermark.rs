//! Watermark compositing.
//!
//! The watermark is an RGBA asset blended onto the buffer with source-over
//! compositing at a fixed offset. Assets come from a configured image file
//! or, by default, the built-in badge.

use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::error::{OperatorError, Result};
use crate::spec::WatermarkSpec;

/// Side length of the built-in badge.
pub const BUILTIN_SIZE: u32 = 64;

/// An owned watermark image.
#[derive(Debug, Clone)]
pub struct WatermarkAsset {
    pixels: PixelBuffer,
}

impl WatermarkAsset {
    /// The built-in badge: a translucent disc crossed by two diagonal
    /// sails, drawn procedurally so the engine ships with no binary blob.
    pub fn builtin() -> Self {
        let center = (BUILTIN_SIZE - 1) as f32 / 2.0;
        let radius = 28.0;
        let pixels = PixelBuffer::from_fn(BUILTIN_SIZE, BUILTIN_SIZE, |x, y| {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            if (dx * dx + dy * dy).sqrt() > radius {
                return [0, 0, 0, 0];
            }
            let diag = (x as i32 - y as i32).abs() <= 3;
            let anti = (x as i32 + y as i32 - (BUILTIN_SIZE as i32 - 1)).abs() <= 3;
            if diag || anti {
                [255, 255, 255, 220]
            } else {
                [16, 16, 16, 160]
            }
        });
        Self { pixels }
    }

    /// Load a watermark from any image file the codec understands.
    pub fn load_from(path: &Path) -> Result<Self> {
        let img = image::open(path)?;
        Ok(Self {
            pixels: PixelBuffer::from(img),
        })
    }

    /// Wrap an existing buffer as a watermark.
    pub fn from_buffer(pixels: PixelBuffer) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Composite `asset` onto `buf` with its top-left corner at the spec offset.
///
/// The whole watermark must fit: `x + asset.width <= buffer.width` and
/// likewise for height, else `InvalidGeometry`.
pub fn composite(
    mut buf: PixelBuffer,
    spec: &WatermarkSpec,
    asset: &WatermarkAsset,
) -> std::result::Result<PixelBuffer, OperatorError> {
    let (w, h) = buf.dimensions();
    let (wm_w, wm_h) = asset.pixels.dimensions();
    if spec.x.checked_add(wm_w).map_or(true, |right| right > w)
        || spec.y.checked_add(wm_h).map_or(true, |bottom| bottom > h)
    {
        return Err(OperatorError::geometry(
            format!(
                "watermark {}x{} at ({},{}) does not fit",
                wm_w, wm_h, spec.x, spec.y
            ),
            w,
            h,
        ));
    }

    for wy in 0..wm_h {
        for wx in 0..wm_w {
            let fg = asset.pixels.pixel(wx, wy);
            if fg[3] == 0 {
                continue;
            }
            let bg = buf.pixel(spec.x + wx, spec.y + wy);
            buf.put_pixel(spec.x + wx, spec.y + wy, blend_over(fg, bg));
        }
    }
    Ok(buf)
}

/// Source-over blending of non-premultiplied RGBA samples.
fn blend_over(fg: [u8; 4], bg: [u8; 4]) -> [u8; 4] {
    let fa = fg[3] as f32 / 255.0;
    let ba = bg[3] as f32 / 255.0;
    let out_a = fa + ba * (1.0 - fa);
    if out_a == 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let v = (fg[c] as f32 * fa + bg[c] as f32 * ba * (1.0 - fa)) / out_a;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_2x2(px: [u8; 4]) -> WatermarkAsset {
        WatermarkAsset::from_buffer(PixelBuffer::from_fn(2, 2, |_, _| px))
    }

    fn canvas(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::from_fn(w, h, |_, _| [100, 100, 100, 255])
    }

    #[test]
    fn test_builtin_badge_shape() {
        let badge = WatermarkAsset::builtin();
        assert_eq!((badge.width(), badge.height()), (64, 64));
        let px = &badge.pixels;
        // corners are fully transparent, the center sits on a sail
        assert_eq!(px.pixel(0, 0)[3], 0);
        assert_eq!(px.pixel(63, 63)[3], 0);
        assert_eq!(px.pixel(31, 31), [255, 255, 255, 220]);
        // off-diagonal interior is the dark disc
        assert_eq!(px.pixel(31, 12), [16, 16, 16, 160]);
    }

    #[test]
    fn test_opaque_watermark_replaces_pixels() {
        let out = composite(
            canvas(4, 4),
            &WatermarkSpec { x: 1, y: 2 },
            &asset_2x2([200, 10, 10, 255]),
        )
        .unwrap();
        assert_eq!(out.pixel(1, 2), [200, 10, 10, 255]);
        assert_eq!(out.pixel(2, 3), [200, 10, 10, 255]);
        assert_eq!(out.pixel(0, 0), [100, 100, 100, 255]);
    }

    #[test]
    fn test_transparent_watermark_leaves_background() {
        let out = composite(
            canvas(4, 4),
            &WatermarkSpec { x: 0, y: 0 },
            &asset_2x2([255, 255, 255, 0]),
        )
        .unwrap();
        assert_eq!(out.pixel(0, 0), [100, 100, 100, 255]);
    }

    #[test]
    fn test_half_alpha_blends() {
        let out = composite(
            canvas(2, 2),
            &WatermarkSpec { x: 0, y: 0 },
            &asset_2x2([200, 0, 0, 128]),
        )
        .unwrap();
        let px = out.pixel(0, 0);
        // fa ~= 0.502: r = 200 * fa + 100 * (1 - fa) ~= 150
        assert_eq!(px[3], 255);
        assert!((px[0] as i16 - 150).abs() <= 1, "got {}", px[0]);
        assert!((px[1] as i16 - 50).abs() <= 1, "got {}", px[1]);
    }

    #[test]
    fn test_exact_fit_is_allowed() {
        let out = composite(
            canvas(2, 2),
            &WatermarkSpec { x: 0, y: 0 },
            &asset_2x2([1, 2, 3, 255]),
        )
        .unwrap();
        assert_eq!(out.pixel(1, 1), [1, 2, 3, 255]);
    }

    #[test]
    fn test_overhang_rejected() {
        for (x, y) in [(3, 0), (0, 3), (4, 4)] {
            let result = composite(
                canvas(4, 4),
                &WatermarkSpec { x, y },
                &asset_2x2([1, 2, 3, 255]),
            );
            assert!(
                matches!(result, Err(OperatorError::InvalidGeometry { .. })),
                "({},{}) should overhang",
                x,
                y
            );
        }
    }

    #[test]
    fn test_offset_overflow_rejected() {
        let result = composite(
            canvas(4, 4),
            &WatermarkSpec {
                x: u32::MAX - 1,
                y: 0,
            },
            &asset_2x2([1, 2, 3, 255]),
        );
        assert!(matches!(result, Err(OperatorError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mark.png");
        let img = PixelBuffer::from_fn(3, 2, |x, _| [(x * 50) as u8, 0, 0, 255]);
        img.into_rgba_image().save(&path).unwrap();

        let asset = WatermarkAsset::load_from(&path).unwrap();
        assert_eq!((asset.width(), asset.height()), (3, 2));
        assert_eq!(asset.pixels.pixel(2, 0), [100, 0, 0, 255]);
    }
}
