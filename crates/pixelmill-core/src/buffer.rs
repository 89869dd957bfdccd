//! Owned RGBA pixel storage passed between pipeline operators.
//!
//! Every operator consumes a [`PixelBuffer`] and produces a new one; the
//! buffer itself is plain storage with no transform logic. Pixels are 8-bit
//! RGBA, interleaved row-major, so `data.len() == width * height * 4` always
//! holds once a buffer exists.

use image::{DynamicImage, RgbaImage};

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// An owned, mutable RGBA8 image buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer of the given size filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// Build a buffer from raw interleaved RGBA bytes.
    ///
    /// Returns `None` when the byte length does not match the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * CHANNELS {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by evaluating `f` at every coordinate.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut buf = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buf.put_pixel(x, y, f(x, y));
            }
        }
        buf
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Buffer dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Byte offset of the pixel at `(x, y)`.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Read the RGBA pixel at `(x, y)`.
    ///
    /// Callers are expected to stay in bounds; operators validate their
    /// geometry before touching pixels.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Write the RGBA pixel at `(x, y)`.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&px);
    }

    /// The interleaved RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Return a new buffer with rows and columns swapped.
    ///
    /// The pixel at `(x, y)` lands at `(y, x)`. Operators that only know how
    /// to work along the horizontal axis run on a transposed buffer and
    /// transpose the result back.
    pub fn transposed(&self) -> PixelBuffer {
        let mut out = PixelBuffer::new(self.height, self.width);
        for y in 0..self.height {
            for x in 0..self.width {
                out.put_pixel(y, x, self.pixel(x, y));
            }
        }
        out
    }

    /// Convert into an [`image::RgbaImage`] for encoding.
    pub fn into_rgba_image(self) -> RgbaImage {
        let (width, height) = self.dimensions();
        // Length invariant is enforced at construction, so this cannot fail.
        RgbaImage::from_raw(width, height, self.into_raw())
            .expect("pixel data length matches dimensions")
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

impl From<DynamicImage> for PixelBuffer {
    fn from(img: DynamicImage) -> Self {
        Self::from(img.into_rgba8())
    }
}

impl From<PixelBuffer> for RgbaImage {
    fn from(buf: PixelBuffer) -> Self {
        buf.into_rgba_image()
    }
}
