//! Input validation before decode.

use std::io::Read;
use std::path::Path;

use pixelmill_core::config::LimitsConfig;

/// Validates input files before handing them to the image decoder.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Perform quick validation before full decode.
    ///
    /// Checks:
    /// - File exists and is readable
    /// - File size is within limits
    /// - File has valid image magic bytes
    pub fn validate(&self, path: &Path) -> anyhow::Result<()> {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }

        let metadata = std::fs::metadata(path)?;
        let max_bytes = self.limits.max_file_size_mb * 1024 * 1024;
        if metadata.len() > max_bytes {
            anyhow::bail!(
                "{} is {} MB, above the {} MB limit",
                path.display(),
                metadata.len() / (1024 * 1024),
                self.limits.max_file_size_mb
            );
        }

        let mut file = std::fs::File::open(path)?;
        let mut header = [0u8; 12];
        let bytes_read = file.read(&mut header).unwrap_or(0);
        if !valid_image_header(&header[..bytes_read]) {
            anyhow::bail!(
                "{} does not look like a supported image format",
                path.display()
            );
        }
        Ok(())
    }
}

/// Check the leading bytes against known image format signatures.
fn valid_image_header(header: &[u8]) -> bool {
    if header.len() < 4 {
        return false;
    }
    match header {
        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => true,
        // PNG: 89 'PNG'
        [0x89, b'P', b'N', b'G', ..] => true,
        // GIF: GIF8
        [b'G', b'I', b'F', b'8', ..] => true,
        // WebP: RIFF....WEBP (a short RIFF header may still be WebP)
        [b'R', b'I', b'F', b'F', .., b'W', b'E', b'B', b'P'] => true,
        [b'R', b'I', b'F', b'F', rest @ ..] => rest.len() < 8,
        // BMP: BM
        [b'B', b'M', ..] => true,
        // TIFF: II or MM followed by version 42
        [b'I', b'I', 0x2A, 0x00, ..] => true,
        [b'M', b'M', 0x00, 0x2A, ..] => true,
        // HEIC/HEIF/AVIF: ftyp box at offset 4
        [_, _, _, _, b'f', b't', b'y', b'p', ..] => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_bytes_jpeg() {
        assert!(valid_image_header(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0]));
    }

    #[test]
    fn test_magic_bytes_png() {
        assert!(valid_image_header(&[
            0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A
        ]));
    }

    #[test]
    fn test_magic_bytes_webp() {
        assert!(valid_image_header(&[
            b'R', b'I', b'F', b'F', 0, 0, 0, 0, b'W', b'E', b'B', b'P'
        ]));
    }

    #[test]
    fn test_magic_bytes_riff_without_webp_tag_rejected() {
        assert!(!valid_image_header(&[
            b'R', b'I', b'F', b'F', 0, 0, 0, 0, b'W', b'A', b'V', b'E'
        ]));
    }

    #[test]
    fn test_magic_bytes_tiff_both_endians() {
        assert!(valid_image_header(&[b'I', b'I', 0x2A, 0x00]));
        assert!(valid_image_header(&[b'M', b'M', 0x00, 0x2A]));
        // bare byte-order marks without the version are not TIFF
        assert!(!valid_image_header(&[b'I', b'I', 0x00, 0x00]));
        assert!(!valid_image_header(&[b'M', b'M', 0x00, 0x00]));
    }

    #[test]
    fn test_magic_bytes_invalid() {
        assert!(!valid_image_header(&[0x00, 0x00, 0x00, 0x00]));
        assert!(!valid_image_header(&[0xFF, 0xD8]));
    }

    #[test]
    fn test_validate_missing_file() {
        let validator = Validator::new(LimitsConfig::default());
        assert!(validator.validate(Path::new("/no/such/file.png")).is_err());
    }

    #[test]
    fn test_validate_accepts_real_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.png");
        pixelmill_core::PixelBuffer::from_fn(2, 2, |_, _| [1, 2, 3, 255])
            .into_rgba_image()
            .save(&path)
            .unwrap();

        let validator = Validator::new(LimitsConfig::default());
        assert!(validator.validate(&path).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "just some text, long enough to read").unwrap();

        let validator = Validator::new(LimitsConfig::default());
        assert!(validator.validate(&path).is_err());
    }
}
