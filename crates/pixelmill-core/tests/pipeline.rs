//! End-to-end tests of the public pipeline API: spec strings in, buffers
//! and typed errors out.

use pixelmill_core::{
    decode_spec_string, encode_spec_string, Config, Executor, FilterPreset, OperatorError,
    PixelBuffer, Pixelmill, SampleFilter, Spec, SpecKind,
};

fn quadrant_buffer() -> PixelBuffer {
    // 4x4 with a distinct value per pixel so positions are traceable
    PixelBuffer::from_fn(4, 4, |x, y| [(y * 4 + x) as u8 * 16, x as u8, y as u8, 255])
}

#[test]
fn crop_then_flip_h_mirrors_top_left_quadrant() {
    let input = quadrant_buffer();
    let specs = [Spec::crop(0, 0, 2, 2), Spec::flip_h()];
    let out = Executor::new().run(input.clone(), &specs).unwrap();

    assert_eq!(out.dimensions(), (2, 2));
    assert_eq!(out.pixel(0, 0), input.pixel(1, 0));
    assert_eq!(out.pixel(1, 0), input.pixel(0, 0));
    assert_eq!(out.pixel(0, 1), input.pixel(1, 1));
    assert_eq!(out.pixel(1, 1), input.pixel(0, 1));
}

#[test]
fn empty_spec_sequence_is_identity() {
    let input = quadrant_buffer();
    let out = Executor::new().run(input.clone(), &[]).unwrap();
    assert_eq!(out, input);
}

#[test]
fn seam_carve_zero_width_reports_invalid_geometry_at_index_zero() {
    let err = Executor::new()
        .run(quadrant_buffer(), &[Spec::seam_carve(0, 4)])
        .unwrap_err();
    assert_eq!(err.index, 0);
    assert_eq!(err.kind, SpecKind::Resize);
    assert!(matches!(err.source, OperatorError::InvalidGeometry { .. }));
    let message = err.to_string();
    assert!(message.contains("step 0"));
    assert!(message.contains("resize"));
}

#[test]
fn unspecified_preset_reports_missing_filter_preset() {
    let err = Executor::new()
        .run(
            quadrant_buffer(),
            &[Spec::filter(FilterPreset::Unspecified)],
        )
        .unwrap_err();
    assert!(matches!(err.source, OperatorError::MissingFilterPreset));
}

#[test]
fn seam_carve_narrows_one_column_at_a_time() {
    let input = PixelBuffer::from_fn(10, 6, |x, y| {
        let v = ((x * 31 + y * 17) % 256) as u8;
        [v, v, v, 255]
    });
    let out = Executor::new()
        .run(input, &[Spec::seam_carve(7, 6)])
        .unwrap();
    assert_eq!(out.dimensions(), (7, 6));
}

#[test]
fn spec_string_drives_full_run() {
    let spec_string = encode_spec_string(&[
        Spec::crop(1, 1, 9, 7),
        Spec::resize(4, 3, SampleFilter::Triangle),
        Spec::contrast(1.1),
    ])
    .unwrap();

    let mill = Pixelmill::new(Config::default()).unwrap();
    let input = PixelBuffer::from_fn(10, 8, |x, y| [(x * 20) as u8, (y * 30) as u8, 128, 255]);
    let out = mill.run_spec_string(input, &spec_string).unwrap();
    assert_eq!(out.dimensions(), (4, 3));
}

#[test]
fn spec_string_roundtrip_preserves_order() {
    let specs = vec![
        Spec::flip_v(),
        Spec::seam_carve(3, 3),
        Spec::watermark(0, 0),
    ];
    let decoded = decode_spec_string(&encode_spec_string(&specs).unwrap()).unwrap();
    assert_eq!(decoded, specs);
}

#[test]
fn custom_preset_palette_flows_from_config() {
    let mut config = Config::default();
    config.presets.oceanic.tint = [255, 0, 0];
    config.presets.oceanic.strength = 1.0;

    let mill = Pixelmill::new(config).unwrap();
    let input = PixelBuffer::from_fn(2, 2, |_, _| [0, 255, 0, 255]);
    let out = mill
        .run(input, &[Spec::filter(FilterPreset::Oceanic)])
        .unwrap();
    assert_eq!(&out.pixel(0, 0)[..3], &[255, 0, 0]);
}

#[test]
fn failed_run_yields_no_buffer() {
    // a mid-sequence failure must not leak the partially transformed image
    let specs = [
        Spec::flip_h(),
        Spec::crop(0, 0, 99, 99),
        Spec::flip_v(),
    ];
    let result = Executor::new().run(quadrant_buffer(), &specs);
    assert!(result.is_err());
}
