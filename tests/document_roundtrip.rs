use layrs::canvas::stack::{LayerStack, DEFAULT_MAX_LAYERS};
use layrs::canvas::surface::{Color, Paint};
use layrs::io::codec;

fn sample_stack() -> LayerStack {
    let mut stack = LayerStack::new(24, 16, Color::TRANSPARENT, DEFAULT_MAX_LAYERS);
    stack
        .current_layer_mut()
        .surface
        .apply(2, 3, Paint::blend(Color::rgb(200, 20, 20)));
    stack.add_layer();
    stack
        .current_layer_mut()
        .surface
        .apply(5, 7, Paint::blend(Color::rgba(20, 200, 20, 128)));
    stack
}

#[test]
fn tiff_document_roundtrip_preserves_layers_and_pixels() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("doc.tiff");

    let stack = sample_stack();
    codec::save_document(&stack, &path).expect("save document");

    let loaded =
        codec::load_document(&path, Color::TRANSPARENT, DEFAULT_MAX_LAYERS).expect("load document");

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.width(), 24);
    assert_eq!(loaded.height(), 16);

    let original: Vec<_> = stack.surfaces();
    let restored: Vec<_> = loaded.surfaces();
    for (a, b) in original.iter().zip(&restored) {
        assert_eq!(a.pixels(), b.pixels());
    }
    // Top page is composited last, so it becomes the current layer.
    assert_eq!(loaded.current_id(), *loaded.order().last().unwrap());
}

#[test]
fn png_import_replaces_stack_with_single_layer() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("flat.png");

    let stack = sample_stack();
    codec::export_flattened(&stack, Color::WHITE, &path).expect("export png");

    let loaded =
        codec::load_document(&path, Color::TRANSPARENT, DEFAULT_MAX_LAYERS).expect("import png");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.width(), 24);
    assert_eq!(loaded.height(), 16);
    // The flattened export composited the stroke over white.
    assert_eq!(
        loaded.current_layer().surface.pixel(2, 3),
        Color::rgb(200, 20, 20)
    );
    assert_eq!(
        loaded.current_layer().surface.pixel(0, 0),
        Color::WHITE
    );
}

#[test]
fn export_over_opaque_background_fills_transparent_pixels() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("flat.bmp");

    let stack = sample_stack();
    codec::export_flattened(&stack, Color::rgb(10, 20, 30), &path).expect("export bmp");

    let image = image::open(&path).expect("decode bmp").to_rgb8();
    assert_eq!(image.dimensions(), (24, 16));
    assert_eq!(image.get_pixel(0, 0), &image::Rgb([10, 20, 30]));
    assert_eq!(image.get_pixel(2, 3), &image::Rgb([200, 20, 20]));
}

#[test]
fn unreadable_document_reports_error_without_panicking() {
    let err = codec::load_document(
        std::path::Path::new("/definitely/missing.tiff"),
        Color::TRANSPARENT,
        DEFAULT_MAX_LAYERS,
    )
    .expect_err("missing file must fail");
    assert!(format!("{err:#}").contains("missing.tiff"));
}
