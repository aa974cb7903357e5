use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown profile: {0}")]
    NotFound(String),
}

/// Resolution class a profile targets. 300/225 are print-grade; 150/72 are
/// digital-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DpiTier {
    Dpi300,
    Dpi225,
    Dpi150,
    Dpi72,
}

impl DpiTier {
    pub fn is_print_grade(self) -> bool {
        matches!(self, DpiTier::Dpi300 | DpiTier::Dpi225)
    }

    pub fn is_digital_only(self) -> bool {
        !self.is_print_grade()
    }

    pub fn dpi(self) -> u32 {
        match self {
            DpiTier::Dpi300 => 300,
            DpiTier::Dpi225 => 225,
            DpiTier::Dpi150 => 150,
            DpiTier::Dpi72 => 72,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EncodingFamily {
    LossyImage,
    LosslessText,
    Hybrid,
}

/// Ordinal quality ranking; ordering matters (Good < High < VeryHigh <
/// Excellent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum QualityTier {
    Good,
    High,
    VeryHigh,
    Excellent,
}

impl QualityTier {
    pub fn label(self) -> &'static str {
        match self {
            QualityTier::Good => "Good",
            QualityTier::High => "High",
            QualityTier::VeryHigh => "Very High",
            QualityTier::Excellent => "Excellent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompressionRange {
    pub low_pct: u32,
    pub high_pct: u32,
}

impl CompressionRange {
    pub fn midpoint_pct(self) -> u32 {
        (self.low_pct + self.high_pct) / 2
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompressionProfile {
    pub name: &'static str,
    pub dpi_tier: DpiTier,
    pub encoding: EncodingFamily,
    pub estimated_compression: CompressionRange,
    pub quality: QualityTier,
    /// Compatibility fallback presets; never a recommended default.
    pub legacy: bool,
    /// Long-term-retention oriented.
    pub archive: bool,
    /// The one profile safe to suggest with no signals at all.
    pub safe_default: bool,
}

const fn profile(
    name: &'static str,
    dpi_tier: DpiTier,
    encoding: EncodingFamily,
    low_pct: u32,
    high_pct: u32,
    quality: QualityTier,
) -> CompressionProfile {
    CompressionProfile {
        name,
        dpi_tier,
        encoding,
        estimated_compression: CompressionRange { low_pct, high_pct },
        quality,
        legacy: false,
        archive: false,
        safe_default: false,
    }
}

const fn legacy(mut p: CompressionProfile) -> CompressionProfile {
    p.legacy = true;
    p
}

const fn archive(mut p: CompressionProfile) -> CompressionProfile {
    p.archive = true;
    p
}

const fn safe_default(mut p: CompressionProfile) -> CompressionProfile {
    p.safe_default = true;
    p
}

/// Declaration order is the ranking tie-break order; do not reorder.
fn build() -> Vec<CompressionProfile> {
    use DpiTier::*;
    use EncodingFamily::*;
    use QualityTier::*;
    vec![
        safe_default(profile("balanced", Dpi225, Hybrid, 40, 60, VeryHigh)),
        profile("print-quality", Dpi300, Hybrid, 20, 40, Excellent),
        profile("text-optimal", Dpi300, LosslessText, 30, 50, Excellent),
        profile("text-compact", Dpi225, LosslessText, 45, 65, VeryHigh),
        profile("scan-photo", Dpi300, LossyImage, 35, 55, VeryHigh),
        profile("scan-compact", Dpi150, LossyImage, 65, 85, Good),
        profile("web-optimized", Dpi150, LossyImage, 60, 80, Good),
        archive(profile("archive-master", Dpi300, LosslessText, 15, 35, Excellent)),
        profile("bulk-intake", Dpi150, LossyImage, 70, 90, Good),
        legacy(profile("legacy-screen", Dpi72, LossyImage, 75, 90, Good)),
        legacy(profile("legacy-ebook", Dpi150, LossyImage, 60, 80, Good)),
        legacy(profile("legacy-printer", Dpi300, Hybrid, 30, 50, High)),
        legacy(profile("legacy-prepress", Dpi300, Hybrid, 15, 35, Excellent)),
    ]
}

static CATALOG: OnceLock<Vec<CompressionProfile>> = OnceLock::new();

/// The full catalog in stable declaration order.
pub fn all() -> &'static [CompressionProfile] {
    CATALOG.get_or_init(build)
}

pub fn get(name: &str) -> Result<&'static CompressionProfile, CatalogError> {
    all()
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| CatalogError::NotFound(name.to_string()))
}
