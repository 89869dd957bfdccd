//! Transform specs: the declarative description of a pipeline run.
//!
//! A run is an ordered sequence of [`Spec`] values. Each spec names one
//! operation and carries its parameters; the executor applies them strictly
//! in order. Specs are plain data and are validated by the operators at
//! execution time, not at construction, so an out-of-range crop only fails
//! once it meets a buffer it does not fit.

use serde::{Deserialize, Serialize};

/// One transform step.
///
/// Internally tagged for marshalling: `{"op":"crop",...}`, `{"op":"flip_h"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Spec {
    /// Cut out a rectangular region
    Crop(CropSpec),
    /// Scale to a target size, by resampling or seam carving
    Resize(ResizeSpec),
    /// Mirror horizontally (left/right)
    FlipH,
    /// Mirror vertically (top/bottom)
    FlipV,
    /// Scale pixel contrast around the mid-point
    Contrast(ContrastSpec),
    /// Apply a named color preset
    Filter(FilterSpec),
    /// Composite a watermark at a fixed position
    Watermark(WatermarkSpec),
}

/// Crop rectangle, half-open on neither side: the region spans
/// `x1..x2` by `y1..y2` and keeps `(x2 - x1) * (y2 - y1)` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSpec {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

/// Resize target and strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeSpec {
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
    /// Scaling strategy
    #[serde(default)]
    pub mode: ResizeMode,
    /// Resampling kernel for [`ResizeMode::Normal`]
    #[serde(default)]
    pub filter: SampleFilter,
}

/// Contrast adjustment factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastSpec {
    /// Multiplier applied to each channel's distance from mid-gray.
    /// `1.0` leaves the image unchanged, `0.0` flattens it to gray.
    pub contrast: f32,
}

/// Color preset selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub preset: FilterPreset,
}

/// Watermark placement, top-left corner of the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkSpec {
    pub x: u32,
    pub y: u32,
}

/// How a resize reaches its target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Kernel resampling of the whole frame
    #[default]
    Normal,
    /// Content-aware seam removal or insertion
    SeamCarve,
}

/// Resampling kernel for normal resizes.
///
/// `Undefined` is the unset state; a normal resize must pick a concrete
/// kernel or the pipeline rejects the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFilter {
    #[default]
    Undefined,
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
    Gaussian,
}

/// Named color wash presets.
///
/// `Unspecified` is the unset state; a filter step must select a concrete
/// preset or the pipeline rejects the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPreset {
    #[default]
    Unspecified,
    Oceanic,
    Islands,
    Marine,
}

/// The operation family of a spec, used in reporting and error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecKind {
    Crop,
    Resize,
    FlipH,
    FlipV,
    Contrast,
    Filter,
    Watermark,
}

impl SpecKind {
    /// Stable lowercase name, matching the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecKind::Crop => "crop",
            SpecKind::Resize => "resize",
            SpecKind::FlipH => "flip_h",
            SpecKind::FlipV => "flip_v",
            SpecKind::Contrast => "contrast",
            SpecKind::Filter => "filter",
            SpecKind::Watermark => "watermark",
        }
    }

    /// Parse a wire tag back into a kind. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "crop" => Some(SpecKind::Crop),
            "resize" => Some(SpecKind::Resize),
            "flip_h" => Some(SpecKind::FlipH),
            "flip_v" => Some(SpecKind::FlipV),
            "contrast" => Some(SpecKind::Contrast),
            "filter" => Some(SpecKind::Filter),
            "watermark" => Some(SpecKind::Watermark),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpecKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Spec {
    /// Crop to the rectangle spanning `(x1, y1)..(x2, y2)`.
    pub fn crop(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Spec::Crop(CropSpec { x1, y1, x2, y2 })
    }

    /// Resample to `width x height` with the given kernel.
    pub fn resize(width: u32, height: u32, filter: SampleFilter) -> Self {
        Spec::Resize(ResizeSpec {
            width,
            height,
            mode: ResizeMode::Normal,
            filter,
        })
    }

    /// Seam-carve to `width x height`.
    pub fn seam_carve(width: u32, height: u32) -> Self {
        Spec::Resize(ResizeSpec {
            width,
            height,
            mode: ResizeMode::SeamCarve,
            filter: SampleFilter::Undefined,
        })
    }

    /// Mirror left/right.
    pub fn flip_h() -> Self {
        Spec::FlipH
    }

    /// Mirror top/bottom.
    pub fn flip_v() -> Self {
        Spec::FlipV
    }

    /// Scale contrast by `factor`.
    pub fn contrast(factor: f32) -> Self {
        Spec::Contrast(ContrastSpec { contrast: factor })
    }

    /// Apply a color preset.
    pub fn filter(preset: FilterPreset) -> Self {
        Spec::Filter(FilterSpec { preset })
    }

    /// Composite the watermark with its top-left corner at `(x, y)`.
    pub fn watermark(x: u32, y: u32) -> Self {
        Spec::Watermark(WatermarkSpec { x, y })
    }

    /// The operation family this spec belongs to.
    pub fn kind(&self) -> SpecKind {
        match self {
            Spec::Crop(_) => SpecKind::Crop,
            Spec::Resize(_) => SpecKind::Resize,
            Spec::FlipH => SpecKind::FlipH,
            Spec::FlipV => SpecKind::FlipV,
            Spec::Contrast(_) => SpecKind::Contrast,
            Spec::Filter(_) => SpecKind::Filter,
            Spec::Watermark(_) => SpecKind::Watermark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_crop_roundtrip() {
        let spec = Spec::crop(0, 0, 100, 50);
        let json = serde_json::to_string(&spec).unwrap();

        // Verify the "op" tag is present alongside inlined fields
        assert!(json.contains("\"op\":\"crop\""));
        assert!(json.contains("\"x2\":100"));

        let parsed: Spec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn test_spec_unit_variants_serialize_as_bare_tag() {
        let json = serde_json::to_string(&Spec::flip_h()).unwrap();
        assert_eq!(json, "{\"op\":\"flip_h\"}");

        let parsed: Spec = serde_json::from_str("{\"op\":\"flip_v\"}").unwrap();
        assert_eq!(parsed, Spec::FlipV);
    }

    #[test]
    fn test_resize_defaults_to_normal_undefined() {
        let parsed: Spec =
            serde_json::from_str("{\"op\":\"resize\",\"width\":10,\"height\":10}").unwrap();
        match parsed {
            Spec::Resize(r) => {
                assert_eq!(r.mode, ResizeMode::Normal);
                assert_eq!(r.filter, SampleFilter::Undefined);
            }
            _ => panic!("Expected Resize variant"),
        }
    }

    #[test]
    fn test_sample_filter_wire_names() {
        let json = serde_json::to_string(&SampleFilter::CatmullRom).unwrap();
        assert_eq!(json, "\"catmull_rom\"");
        let json = serde_json::to_string(&SampleFilter::Lanczos3).unwrap();
        assert_eq!(json, "\"lanczos3\"");
    }

    #[test]
    fn test_filter_preset_defaults_to_unspecified() {
        let parsed: Spec = serde_json::from_str("{\"op\":\"filter\"}").unwrap();
        assert_eq!(parsed, Spec::filter(FilterPreset::Unspecified));
    }

    #[test]
    fn test_kind_names_match_wire_tags() {
        let specs = [
            Spec::crop(0, 0, 1, 1),
            Spec::resize(1, 1, SampleFilter::Nearest),
            Spec::flip_h(),
            Spec::flip_v(),
            Spec::contrast(1.0),
            Spec::filter(FilterPreset::Oceanic),
            Spec::watermark(0, 0),
        ];
        for spec in specs {
            let json = serde_json::to_string(&spec).unwrap();
            let tag = format!("\"op\":\"{}\"", spec.kind());
            assert!(json.contains(&tag), "{} missing {}", json, tag);
            assert_eq!(SpecKind::from_tag(spec.kind().as_str()), Some(spec.kind()));
        }
    }

    #[test]
    fn test_from_tag_rejects_unknown_names() {
        assert_eq!(SpecKind::from_tag("sharpen"), None);
        assert_eq!(SpecKind::from_tag("Crop"), None);
        assert_eq!(SpecKind::from_tag(""), None);
    }
}
