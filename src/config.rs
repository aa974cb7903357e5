use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: Analysis,
    #[serde(default)]
    pub scoring: Scoring,
    #[serde(default)]
    pub probe: Probe,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub security: Security,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// How many leading pages the text probe samples.
    pub sample_pages: u32,
    /// Extracted text at or below this many non-whitespace chars is noise.
    pub text_noise_threshold_chars: usize,
    /// When image enumeration fails, files above this size are assumed
    /// to contain images.
    pub image_fallback_min_bytes: u64,
    /// Coverage contributed by each image-per-page, in percent.
    pub image_pct_per_image_page: u32,
    pub confidence_floor: u8,
    pub confidence_text_probe: u8,
    pub confidence_image_probe: u8,
    pub signature_keywords: Vec<String>,
    pub underscore_run_pattern: String,
}
impl Default for Analysis {
    fn default() -> Self {
        Self {
            sample_pages: 5,
            text_noise_threshold_chars: 50,
            image_fallback_min_bytes: 2 * 1024 * 1024,
            image_pct_per_image_page: 60,
            confidence_floor: 30,
            confidence_text_probe: 35,
            confidence_image_probe: 35,
            signature_keywords: vec![
                "signature".into(),
                "signed".into(),
                "initials".into(),
                "notary".into(),
                "witness".into(),
            ],
            underscore_run_pattern: "_{5,}".into(),
        }
    }
}

/// Scoring magnitudes are policy, not physics; they live here so the
/// ranking can be tuned without touching the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoring {
    pub base_score: i32,

    pub print_dpi_bonus: i32,
    pub digital_dpi_bonus: i32,

    pub content_match_bonus: i32,
    pub content_partial_bonus: i32,
    pub content_mismatch_penalty: i32,
    pub mixed_hybrid_bonus: i32,
    pub mixed_image_bonus: i32,
    pub mixed_text_bonus: i32,
    pub signature_text_bonus: i32,
    pub color_image_bonus: i32,
    pub mono_text_bonus: i32,

    pub declared_match_bonus: i32,
    pub declared_partial_bonus: i32,
    pub declared_mixed_text_bonus: i32,
    pub declared_mismatch_penalty: i32,

    pub low_compression_cutoff_pct: u32,
    pub high_compression_cutoff_pct: u32,
    pub priority_bonus: i32,
    pub priority_penalty: i32,

    pub archive_bonus: i32,
    pub bulk_bonus: i32,
    pub modern_bonus: i32,

    pub huge_file_bytes: u64,
    pub large_file_bytes: u64,
    pub small_file_bytes: u64,
    pub huge_file_low_dpi_bonus: i32,
    pub huge_file_aggressive_bonus: i32,
    pub large_file_low_dpi_bonus: i32,
    pub small_file_gentle_bonus: i32,
}
impl Default for Scoring {
    fn default() -> Self {
        Self {
            base_score: 50,

            print_dpi_bonus: 15,
            digital_dpi_bonus: 20,

            content_match_bonus: 25,
            content_partial_bonus: 10,
            content_mismatch_penalty: 15,
            mixed_hybrid_bonus: 25,
            mixed_image_bonus: 10,
            mixed_text_bonus: 5,
            signature_text_bonus: 10,
            color_image_bonus: 8,
            mono_text_bonus: 5,

            declared_match_bonus: 12,
            declared_partial_bonus: 5,
            declared_mixed_text_bonus: 2,
            declared_mismatch_penalty: 8,

            low_compression_cutoff_pct: 40,
            high_compression_cutoff_pct: 65,
            priority_bonus: 15,
            priority_penalty: 10,

            archive_bonus: 30,
            bulk_bonus: 20,
            modern_bonus: 10,

            huge_file_bytes: 10 * 1024 * 1024,
            large_file_bytes: 5 * 1024 * 1024,
            small_file_bytes: 500 * 1024,
            huge_file_low_dpi_bonus: 15,
            huge_file_aggressive_bonus: 10,
            large_file_low_dpi_bonus: 8,
            small_file_gentle_bonus: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Probe {
    pub pdfinfo_bin: String,
    pub pdftotext_bin: String,
    pub pdfimages_bin: String,
    pub timeout_seconds: u64,
}
impl Default for Probe {
    fn default() -> Self {
        Self {
            pdfinfo_bin: "pdfinfo".into(),
            pdftotext_bin: "pdftotext".into(),
            pdfimages_bin: "pdfimages".into(),
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    pub max_input_file_bytes: u64,
    pub max_input_pages: u32,
}
impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_file_bytes: 2 * 1024 * 1024 * 1024,
            max_input_pages: 20000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Security {
    pub reject_url_inputs: bool,
}
impl Default for Security {
    fn default() -> Self {
        Self {
            reject_url_inputs: true,
        }
    }
}
