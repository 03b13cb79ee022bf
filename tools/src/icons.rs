use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::imageops::FilterType as ResizeFilter;
use image::{ColorType, DynamicImage, ImageEncoder, RgbaImage};
use tracing::info;

use crate::error::ToolError;

pub const DEFAULT_SOURCE: &str = "assets/images/KeubIt.png";
pub const DEFAULT_OUT_DIR: &str = "assets/icons";

/// Channels below this on all of R, G and B count as background.
pub const BACKGROUND_THRESHOLD: u8 = 40;

pub const SIZES: [(&str, u32); 5] = [
    ("favicon-16x16.png", 16),
    ("favicon-32x32.png", 32),
    ("apple-touch-icon.png", 180),
    ("android-chrome-192x192.png", 192),
    ("android-chrome-512x512.png", 512),
];

/// Sizes bundled into `favicon.ico`.
const ICO_SIZES: [u32; 2] = [16, 32];

/// Clears the alpha of every near-black pixel.
pub fn make_transparent(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r < BACKGROUND_THRESHOLD && g < BACKGROUND_THRESHOLD && b < BACKGROUND_THRESHOLD {
            pixel.0[3] = 0;
        }
    }
}

fn resize(logo: &RgbaImage, size: u32) -> RgbaImage {
    DynamicImage::ImageRgba8(logo.clone())
        .resize_to_fill(size, size, ResizeFilter::Lanczos3)
        .to_rgba8()
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ToolError> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(buf)
}

/// Writes every icon size plus `favicon.ico` into `out_dir` and returns the
/// paths written.
pub fn generate(source: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, ToolError> {
    if !source.exists() {
        return Err(ToolError::MissingSource(source.to_path_buf()));
    }
    fs::create_dir_all(out_dir)?;

    let mut logo = image::open(source)?.to_rgba8();
    make_transparent(&mut logo);

    let mut written = Vec::with_capacity(SIZES.len() + 1);
    let mut ico_frames = Vec::with_capacity(ICO_SIZES.len());
    for (name, size) in SIZES {
        let icon = resize(&logo, size);
        let png = encode_png(&icon)?;
        let path = out_dir.join(name);
        fs::write(&path, &png)?;
        info!("✓ {}", name);
        if ICO_SIZES.contains(&size) {
            ico_frames.push(IcoFrame::with_encoded(png, size, size, ColorType::Rgba8)?);
        }
        written.push(path);
    }

    let ico_path = out_dir.join("favicon.ico");
    IcoEncoder::new(BufWriter::new(File::create(&ico_path)?)).encode_images(&ico_frames)?;
    info!("✓ favicon.ico");
    written.push(ico_path);

    info!("Done.");
    Ok(written)
}
