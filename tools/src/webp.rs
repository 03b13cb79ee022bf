use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::webp::{WebPEncoder, WebPQuality};
use image::ColorType;
use tracing::{error, info, warn};

use crate::error::ToolError;

pub const DEFAULT_QUALITY: u8 = 85;

/// Site images that ship with a WebP variant, relative to the site root.
pub const DEFAULT_IMAGES: [&str; 11] = [
    // Hero carousel
    "assets/images/hero/benjamin-davies-mqN-EV9rNlY-unsplash.jpg",
    "assets/images/hero/tim-marshall-hIHh4E4_OGA-unsplash.png",
    "assets/images/hero/galen-crout-fItRJ7AHak8-unsplash.jpg",
    "assets/images/hero/kalisa-veer-gRx74OSJTG8-unsplash.jpg",
    "assets/images/hero/live-kaiah-uvCAKs9CSVs-unsplash.jpg",
    "assets/images/hero/paul-pastourmatzis-nhFcSmJtAeo-unsplash.jpg",
    "assets/images/hero/x-N4QTBfNQ8Nk-unsplash.jpg",
    // Experience cards
    "assets/images/keub-rafting.png",
    "assets/images/keub-ski.png",
    "assets/images/keub-beach.png",
    // Topographic background
    "assets/images/tetons-topo.png",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub output: PathBuf,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl Conversion {
    pub fn savings_percent(&self) -> i64 {
        savings_percent(self.input_bytes, self.output_bytes)
    }
}

/// Size reduction as a whole percentage; negative when the output grew.
pub fn savings_percent(input_bytes: u64, output_bytes: u64) -> i64 {
    if input_bytes == 0 {
        return 0;
    }
    ((1.0 - output_bytes as f64 / input_bytes as f64) * 100.0).round() as i64
}

/// Encodes `input` as a lossy WebP next to it. Returns `None` when the input
/// does not exist.
pub fn convert(input: &Path, quality: u8) -> Result<Option<Conversion>, ToolError> {
    if !input.exists() {
        return Ok(None);
    }
    let output = input.with_extension("webp");
    let rgba = image::open(input)?.to_rgba8();

    let writer = BufWriter::new(File::create(&output)?);
    WebPEncoder::new_with_quality(writer, WebPQuality::lossy(quality)).encode(
        rgba.as_raw(),
        rgba.width(),
        rgba.height(),
        ColorType::Rgba8,
    )?;

    Ok(Some(Conversion {
        input_bytes: fs::metadata(input)?.len(),
        output_bytes: fs::metadata(&output)?.len(),
        output,
    }))
}

/// Converts every image under `root`, logging each result. A failure on one
/// file does not stop the rest. Returns the number converted.
pub fn convert_all<S: AsRef<str>>(root: &Path, images: &[S], quality: u8) -> usize {
    info!("Converting images to WebP...");
    let mut converted = 0;
    for relative in images {
        let relative = relative.as_ref();
        match convert(&root.join(relative), quality) {
            Ok(Some(conversion)) => {
                converted += 1;
                info!(
                    "✓ {} → {} ({}% smaller)",
                    file_name(Path::new(relative)),
                    file_name(&conversion.output),
                    conversion.savings_percent()
                );
            }
            Ok(None) => warn!("Skipping (not found): {}", relative),
            Err(e) => error!("✗ {}: {}", relative, e),
        }
    }
    info!("Done.");
    converted
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;

    fn write_png(path: &Path) {
        let image = RgbImage::from_fn(48, 32, |x, y| Rgb([(x * 5) as u8, (y * 7) as u8, 120]));
        image.save(path).unwrap();
    }

    #[test]
    fn hero_manifest_lists_every_converted_hero_image() {
        let manifest = include_str!("../../frontend/assets/images/hero/hero-images.json");
        for image in DEFAULT_IMAGES.iter().filter(|p| p.starts_with("assets/images/hero/")) {
            let webp = Path::new(image).with_extension("webp");
            assert!(manifest.contains(&format!("\"src\": \"{image}\"")), "{image}");
            assert!(manifest.contains(&format!("\"srcWebp\": \"{}\"", webp.display())), "{image}");
        }
    }

    #[test]
    fn savings_round_to_whole_percent() {
        assert_eq!(savings_percent(1000, 250), 75);
        assert_eq!(savings_percent(3, 2), 33);
        assert_eq!(savings_percent(100, 150), -50);
        assert_eq!(savings_percent(0, 10), 0);
    }

    #[test]
    fn writes_sibling_webp() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hero.png");
        write_png(&input);

        let conversion = convert(&input, DEFAULT_QUALITY).unwrap().unwrap();
        assert_eq!(conversion.output, dir.path().join("hero.webp"));
        assert!(conversion.output_bytes > 0);

        let decoded = image::open(&conversion.output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (48, 32));
    }

    #[test]
    fn missing_input_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(convert(&dir.path().join("nope.jpg"), 85).unwrap(), None);
    }

    #[test]
    fn batch_continues_past_missing_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("a.png"));
        fs::write(dir.path().join("broken.png"), b"not an image").unwrap();
        write_png(&dir.path().join("b.png"));

        let converted = convert_all(dir.path(), &["a.png", "missing.png", "broken.png", "b.png"], 85);
        assert_eq!(converted, 2);
        assert!(dir.path().join("b.webp").exists());
    }
}
