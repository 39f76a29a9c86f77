use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Speed/quality selector, mapped onto a concrete Gemini model id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// Fast, cheaper model.
    Flash,
    /// Higher quality model.
    #[default]
    Pro,
}

impl ModelTier {
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelTier::Flash => "gemini-2.5-flash-image",
            ModelTier::Pro => "gemini-3-pro-image-preview",
        }
    }

    /// Lenient lookup: anything that is not a known fast tier is treated as `Pro`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "flash" | "fast" => ModelTier::Flash,
            "pro" | "quality" => ModelTier::Pro,
            other => {
                log::debug!("Unknown model tier {:?}, using pro", other);
                ModelTier::Pro
            }
        }
    }

    pub fn supported_models() -> Vec<(&'static str, &'static str)> {
        vec![
            (ModelTier::Flash.model_id(), "flash"),
            (ModelTier::Pro.model_id(), "pro"),
        ]
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelTier::Flash => write!(f, "flash"),
            ModelTier::Pro => write!(f, "pro"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    #[value(name = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    #[value(name = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    #[value(name = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    #[value(name = "4:3")]
    Classic,
    #[serde(rename = "3:4")]
    #[value(name = "3:4")]
    ClassicPortrait,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Classic => "4:3",
            AspectRatio::ClassicPortrait => "3:4",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
