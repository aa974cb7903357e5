use crate::{config::Config, probe::DocProbe, util};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

/// The only error kinds that cross the analyzer boundary. Sub-probe
/// failures never surface here; they degrade `confidence` instead.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("unreadable document: {path}: {reason}")]
    UnreadableDocument { path: String, reason: String },
}

/// Structured description of a document's content signals. Derived once
/// per analysis call; owned by the caller; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentCharacterization {
    pub file_size_bytes: u64,
    pub page_count: u32,
    pub has_text: bool,
    pub has_images: bool,
    /// Rough coverage estimate from image count vs page count, not a true
    /// pixel-coverage measurement.
    pub image_percentage_estimate: u8,
    pub has_color: bool,
    pub has_signature_markers: bool,
    /// 0-100; how much the signals above should be trusted.
    pub confidence: u8,
    /// Provenance only; ignored by scoring. Empty when hashing failed.
    pub sha256: String,
    pub analyzed_at: String,
}

/// Inspect a document and characterize its content. Fatal only when the
/// path is missing or the file cannot be read as a document; every other
/// failure is absorbed into a lower-confidence result.
pub fn analyze(
    cfg: &Config,
    probe: &dyn DocProbe,
    input: &Path,
) -> Result<DocumentCharacterization, AnalyzeError> {
    if !input.is_file() {
        return Err(AnalyzeError::FileNotFound(input.display().to_string()));
    }

    let meta = probe
        .metadata(input)
        .map_err(|err| AnalyzeError::UnreadableDocument {
            path: input.display().to_string(),
            reason: format!("{err:#}"),
        })?;

    if meta.file_bytes > cfg.limits.max_input_file_bytes {
        return Err(AnalyzeError::UnreadableDocument {
            path: input.display().to_string(),
            reason: format!("exceeds max_input_file_bytes: {}", meta.file_bytes),
        });
    }
    if meta.page_count == 0 || meta.page_count > cfg.limits.max_input_pages {
        return Err(AnalyzeError::UnreadableDocument {
            path: input.display().to_string(),
            reason: format!("page count out of range: {}", meta.page_count),
        });
    }

    let mut confidence = cfg.analysis.confidence_floor as u32;

    // Text sub-probe. Success raises confidence even when the document
    // turns out to be textless; the signal was measured either way.
    let mut has_text = false;
    let mut has_signature_markers = false;
    match probe.extract_text(input, cfg.analysis.sample_pages) {
        Ok(raw) => {
            confidence += cfg.analysis.confidence_text_probe as u32;
            let text: String = raw.nfkc().collect();
            let glyphs = text.chars().filter(|c| !c.is_whitespace()).count();
            has_text = glyphs > cfg.analysis.text_noise_threshold_chars;
            has_signature_markers = detect_signature_markers(cfg, &text);
            debug!(glyphs, has_text, has_signature_markers, "text probe ok");
        }
        Err(err) => {
            // Signature detection depends on extracted text, so it is
            // skipped and stays false.
            warn!("text probe failed, treating as no text signal: {err:#}");
        }
    }

    // Image sub-probe, with a size-based fallback on failure.
    let mut has_images;
    let mut image_percentage_estimate = 0u8;
    let mut has_color = false;
    match probe.list_images(input) {
        Ok(images) => {
            confidence += cfg.analysis.confidence_image_probe as u32;
            has_images = !images.is_empty();
            image_percentage_estimate =
                estimate_image_pct(cfg, images.len() as u32, meta.page_count);
            has_color = images.iter().any(|i| {
                let cs = i.color_space.to_ascii_lowercase();
                cs.contains("rgb") || cs.contains("cmyk")
            });
            debug!(
                count = images.len(),
                has_images, has_color, image_percentage_estimate, "image probe ok"
            );
        }
        Err(err) => {
            has_images = meta.file_bytes > cfg.analysis.image_fallback_min_bytes;
            if has_images {
                // No count to scale from; report an even-odds estimate.
                image_percentage_estimate = 50;
            }
            warn!("image probe failed, falling back to size heuristic: {err:#}");
        }
    }

    // Digest failure is provenance loss, not a content signal.
    let sha256 = match util::hash_file(input) {
        Ok(digest) => digest,
        Err(err) => {
            warn!("input digest failed: {err:#}");
            String::new()
        }
    };

    Ok(DocumentCharacterization {
        file_size_bytes: meta.file_bytes,
        page_count: meta.page_count,
        has_text,
        has_images,
        image_percentage_estimate,
        has_color,
        has_signature_markers,
        confidence: confidence.min(100) as u8,
        sha256,
        analyzed_at: util::now_rfc3339(),
    })
}

fn estimate_image_pct(cfg: &Config, image_count: u32, page_count: u32) -> u8 {
    let pages = page_count.max(1);
    let pct = image_count
        .saturating_mul(cfg.analysis.image_pct_per_image_page)
        .checked_div(pages)
        .unwrap_or(0);
    pct.min(100) as u8
}

fn detect_signature_markers(cfg: &Config, text: &str) -> bool {
    let keywords = cfg
        .analysis
        .signature_keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!("(?i)({keywords}|{})", cfg.analysis.underscore_run_pattern);
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(text),
        Err(err) => {
            warn!("bad signature pattern in config, skipping detection: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{detect_signature_markers, estimate_image_pct};
    use crate::config::Config;

    #[test]
    fn image_pct_is_capped() {
        let cfg = Config::default();
        assert_eq!(estimate_image_pct(&cfg, 1000, 3), 100);
        assert_eq!(estimate_image_pct(&cfg, 0, 10), 0);
    }

    #[test]
    fn signature_keywords_are_case_insensitive() {
        let cfg = Config::default();
        assert!(detect_signature_markers(&cfg, "SIGNED before me this day"));
        assert!(detect_signature_markers(&cfg, "Name: ________________"));
        assert!(!detect_signature_markers(&cfg, "plain paragraph text"));
    }
}
