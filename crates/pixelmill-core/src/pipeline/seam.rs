//! Content-aware resizing by seam removal and insertion.
//!
//! A seam is an 8-connected path of one pixel per row, chosen to minimize
//! the total gradient energy it crosses. Shrinking removes the lowest-energy
//! seam one at a time; enlarging inserts one at a time, each insertion
//! averaging the seam pixel with its right neighbor. The energy map is
//! recomputed every iteration because each applied seam changes the
//! neighbor relationships that define it, so the whole operation costs
//! O(seams * width * height).
//!
//! Width is adjusted first, then height; height carving runs the same
//! vertical-seam machinery on a transposed buffer.

use crate::buffer::PixelBuffer;
use crate::error::OperatorError;

/// Seam-carve `buf` to `target_w x target_h`.
///
/// Zero targets and enlargements of more than the buffer's pixel count per
/// axis are rejected with `InvalidGeometry`. A target equal to the current
/// size on both axes returns the buffer unchanged.
pub fn seam_carve(
    buf: &PixelBuffer,
    target_w: u32,
    target_h: u32,
) -> Result<PixelBuffer, OperatorError> {
    let (w, h) = buf.dimensions();
    if target_w == 0 || target_h == 0 {
        return Err(OperatorError::geometry(
            format!(
                "seam carve target {}x{} has a zero dimension",
                target_w, target_h
            ),
            w,
            h,
        ));
    }
    let pixel_count = w as u64 * h as u64;
    if grows_beyond(w, target_w, pixel_count) || grows_beyond(h, target_h, pixel_count) {
        return Err(OperatorError::geometry(
            format!(
                "seam carve target {}x{} enlarges beyond the pixel count {}",
                target_w, target_h, pixel_count
            ),
            w,
            h,
        ));
    }

    let mut out = carve_width(buf.clone(), target_w);
    if out.height() != target_h {
        out = carve_width(out.transposed(), target_h).transposed();
    }
    Ok(out)
}

fn grows_beyond(dim: u32, target: u32, pixel_count: u64) -> bool {
    target > dim && (target - dim) as u64 > pixel_count
}

/// Remove or insert vertical seams until `buf` is `target_w` wide.
fn carve_width(mut buf: PixelBuffer, target_w: u32) -> PixelBuffer {
    while buf.width() > target_w {
        let seam = find_seam(&buf);
        buf = remove_seam(&buf, &seam);
    }
    while buf.width() < target_w {
        let seam = find_seam(&buf);
        buf = insert_seam(&buf, &seam);
    }
    buf
}

/// Rec. 601 luminance; alpha does not contribute to energy.
#[inline]
fn luminance(px: [u8; 4]) -> f32 {
    0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32
}

/// Gradient-magnitude energy per pixel: the sum of absolute horizontal and
/// vertical luminance differences, with edge-clamped neighbors.
fn energy_map(buf: &PixelBuffer) -> Vec<f32> {
    let (w, h) = buf.dimensions();
    let (wi, hi) = (w as usize, h as usize);

    let mut luma = vec![0.0f32; wi * hi];
    for y in 0..h {
        for x in 0..w {
            luma[y as usize * wi + x as usize] = luminance(buf.pixel(x, y));
        }
    }

    let mut energy = vec![0.0f32; wi * hi];
    for y in 0..hi {
        for x in 0..wi {
            let left = luma[y * wi + x.saturating_sub(1)];
            let right = luma[y * wi + (x + 1).min(wi - 1)];
            let up = luma[y.saturating_sub(1) * wi + x];
            let down = luma[(y + 1).min(hi - 1) * wi + x];
            energy[y * wi + x] = (right - left).abs() + (down - up).abs();
        }
    }
    energy
}

/// Find the lowest-cost vertical seam, one column per row.
///
/// The cumulative-cost table is classic dynamic programming: each cell adds
/// its own energy to the cheapest of the three cells directly above it.
/// Ties always resolve to the smallest column index, both when filling the
/// table and when backtracking, so the chosen seam is deterministic.
fn find_seam(buf: &PixelBuffer) -> Vec<u32> {
    let (w, h) = buf.dimensions();
    let (wi, hi) = (w as usize, h as usize);
    let energy = energy_map(buf);

    let mut cost = energy;
    for y in 1..hi {
        for x in 0..wi {
            let (_, parent_cost) = best_parent(&cost[(y - 1) * wi..y * wi], x);
            cost[y * wi + x] += parent_cost;
        }
    }

    let last = &cost[(hi - 1) * wi..hi * wi];
    let mut col = 0usize;
    for x in 1..wi {
        if last[x] < last[col] {
            col = x;
        }
    }

    let mut seam = vec![0u32; hi];
    seam[hi - 1] = col as u32;
    for y in (0..hi - 1).rev() {
        let (parent, _) = best_parent(&cost[y * wi..(y + 1) * wi], col);
        col = parent;
        seam[y] = col as u32;
    }
    seam
}

/// Cheapest cell among `{x-1, x, x+1}` in `row`, smallest column on ties.
#[inline]
fn best_parent(row: &[f32], x: usize) -> (usize, f32) {
    let mut best = x.saturating_sub(1);
    if row[x] < row[best] {
        best = x;
    }
    if x + 1 < row.len() && row[x + 1] < row[best] {
        best = x + 1;
    }
    (best, row[best])
}

/// Drop one pixel per row at the seam column, shifting the rest left.
fn remove_seam(buf: &PixelBuffer, seam: &[u32]) -> PixelBuffer {
    let (w, h) = buf.dimensions();
    let mut out = PixelBuffer::new(w - 1, h);
    for y in 0..h {
        let sx = seam[y as usize];
        for x in 0..w - 1 {
            let src_x = if x < sx { x } else { x + 1 };
            out.put_pixel(x, y, buf.pixel(src_x, y));
        }
    }
    out
}

/// Insert one pixel per row after the seam column, averaging the seam pixel
/// with its right neighbor so the duplicate does not read as a hard stripe.
fn insert_seam(buf: &PixelBuffer, seam: &[u32]) -> PixelBuffer {
    let (w, h) = buf.dimensions();
    let mut out = PixelBuffer::new(w + 1, h);
    for y in 0..h {
        let sx = seam[y as usize];
        let seam_px = buf.pixel(sx, y);
        let next_px = buf.pixel((sx + 1).min(w - 1), y);
        let mut blended = [0u8; 4];
        for c in 0..4 {
            blended[c] = ((seam_px[c] as u16 + next_px[c] as u16) / 2) as u8;
        }
        for x in 0..=sx {
            out.put_pixel(x, y, buf.pixel(x, y));
        }
        out.put_pixel(sx + 1, y, blended);
        for x in sx + 1..w {
            out.put_pixel(x + 1, y, buf.pixel(x, y));
        }
    }
    out
}
