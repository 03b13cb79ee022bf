use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;

/// One hero background as described in `hero-images.json`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HeroImage {
    pub src: String,
    #[serde(default, rename = "srcWebp")]
    pub src_webp: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

impl HeroImage {
    /// The WebP variant when the browser can render it and one is listed.
    pub fn source(&self, webp_supported: bool) -> &str {
        match self.src_webp.as_deref() {
            Some(webp) if webp_supported && !webp.is_empty() => webp,
            _ => &self.src,
        }
    }

    pub fn alt_text(&self) -> Option<&str> {
        self.alt.as_deref().filter(|alt| !alt.is_empty())
    }

    /// Accessible name of the indicator button for slide `index`.
    pub fn label(&self, index: usize) -> String {
        self.alt_text()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Hero image {}", index + 1))
    }
}

#[derive(Debug, Deserialize)]
struct HeroConfig {
    images: Vec<HeroImage>,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("request failed: {0}")]
    Request(#[from] gloo_net::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("configuration lists no images")]
    Empty,
}

pub fn parse_hero_config(raw: &str) -> Result<Vec<HeroImage>, ConfigLoadError> {
    let config: HeroConfig = serde_json::from_str(raw)?;
    if config.images.is_empty() {
        return Err(ConfigLoadError::Empty);
    }
    Ok(config.images)
}

pub async fn load_hero_images(url: &str) -> Result<Vec<HeroImage>, ConfigLoadError> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(ConfigLoadError::Status(response.status()));
    }
    let raw = response.text().await?;
    parse_hero_config(&raw)
}
