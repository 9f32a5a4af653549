//! Image codec boundary.
//!
//! Flattened exports go through the `image` crate, picked by file
//! extension. Multi-layer documents round-trip through multi-page TIFF:
//! one RGBA8 page per layer in paint order, bottom layer first. Importing
//! any non-multipage image replaces the document with a single layer.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Local;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype, TiffEncoder};
use tracing::info;

use crate::canvas::stack::LayerStack;
use crate::canvas::surface::{Color, Surface};

/// Extensions accepted for flattened single-image export/import.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "bmp", "jpg", "jpeg", "gif"];
/// Extensions for the layered document format.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["tif", "tiff"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

pub fn is_document_path(path: &Path) -> bool {
    DOCUMENT_EXTENSIONS.contains(&extension_of(path).as_str())
}

/// Default file stem for save dialogs, e.g. `painting_20260830_142501`.
pub fn default_file_stem() -> String {
    format!("painting_{}", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Flatten the visible layers over `background` and encode by extension.
/// Formats without an alpha channel (JPEG/BMP/GIF) are written as RGB.
pub fn export_flattened(stack: &LayerStack, background: Color, path: &Path) -> Result<()> {
    let flat = stack.flatten(background);
    let image = image::RgbaImage::from_raw(flat.width(), flat.height(), flat.pixels().to_vec())
        .context("flattened frame has inconsistent dimensions")?;

    let ext = extension_of(path);
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        bail!("unsupported export format: {:?}", ext);
    }

    let result = if ext == "png" {
        image.save(path)
    } else {
        image::DynamicImage::ImageRgba8(image).to_rgb8().save(path)
    };
    result.with_context(|| format!("write image {}", path.display()))?;
    info!(path = %path.display(), "flattened image exported");
    Ok(())
}

/// Write every layer as one RGBA8 TIFF page, bottom layer first so the
/// top layer is composited last on import.
pub fn save_document(stack: &LayerStack, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create document {}", path.display()))?;
    let mut encoder =
        TiffEncoder::new(BufWriter::new(file)).context("initialize TIFF encoder")?;

    for surface in stack.surfaces() {
        encoder
            .write_image::<colortype::RGBA8>(surface.width(), surface.height(), surface.pixels())
            .with_context(|| format!("encode layer page in {}", path.display()))?;
    }
    info!(path = %path.display(), layers = stack.len(), "document saved");
    Ok(())
}

/// Load a document. Multi-page TIFF rebuilds the full layer stack; any
/// other supported image becomes a single-layer document.
pub fn load_document(path: &Path, key: Color, max_layers: usize) -> Result<LayerStack> {
    let surfaces = if is_document_path(path) {
        decode_document_pages(path, key)?
    } else {
        vec![decode_single_image(path, key)?]
    };

    let (width, height) = (surfaces[0].width(), surfaces[0].height());
    if surfaces
        .iter()
        .any(|s| s.width() != width || s.height() != height)
    {
        bail!(
            "layer pages of {} disagree on dimensions",
            path.display()
        );
    }

    info!(path = %path.display(), layers = surfaces.len(), "document loaded");
    Ok(LayerStack::from_surfaces(surfaces, max_layers))
}

fn decode_single_image(path: &Path, key: Color) -> Result<Surface> {
    let image = image::open(path)
        .with_context(|| format!("decode image {}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    Ok(Surface::from_pixels(width, height, key, image.into_raw()))
}

fn decode_document_pages(path: &Path, key: Color) -> Result<Vec<Surface>> {
    let file = File::open(path).with_context(|| format!("open document {}", path.display()))?;
    let mut decoder =
        Decoder::new(BufReader::new(file)).context("initialize TIFF decoder")?;

    let mut surfaces = Vec::new();
    loop {
        let (width, height) = decoder.dimensions().context("read page dimensions")?;
        let data = match decoder.read_image().context("decode page pixels")? {
            DecodingResult::U8(data) => data,
            other => bail!("unsupported TIFF sample format: {:?}", discriminant_name(&other)),
        };
        if data.len() != (width as usize) * (height as usize) * 4 {
            bail!("TIFF page is not RGBA8");
        }
        surfaces.push(Surface::from_pixels(width, height, key, data));

        if !decoder.more_images() {
            break;
        }
        decoder.next_image().context("advance to next page")?;
    }

    if surfaces.is_empty() {
        bail!("document {} has no pages", path.display());
    }
    Ok(surfaces)
}

fn discriminant_name(result: &DecodingResult) -> &'static str {
    match result {
        DecodingResult::U8(_) => "u8",
        DecodingResult::U16(_) => "u16",
        DecodingResult::U32(_) => "u32",
        DecodingResult::U64(_) => "u64",
        DecodingResult::F32(_) => "f32",
        DecodingResult::F64(_) => "f64",
        DecodingResult::I8(_) => "i8",
        DecodingResult::I16(_) => "i16",
        DecodingResult::I32(_) => "i32",
        DecodingResult::I64(_) => "i64",
    }
}
