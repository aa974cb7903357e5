use crate::{
    analyzer::DocumentCharacterization, prefs::UserPreferences, scoring::ProfileScore,
};
use serde::Serialize;
use std::fmt::Write;

/// Everything a recommendation run produced, for `--json` output.
#[derive(Debug, Serialize)]
pub struct Recommendation<'a> {
    pub preferences: &'a UserPreferences,
    pub characterization: Option<&'a DocumentCharacterization>,
    pub scores: &'a [ProfileScore],
}

const LOW_CONFIDENCE_CUTOFF: u8 = 60;

/// Render an analysis as a display-ready block. Total; no error cases.
pub fn format_analysis(doc: &DocumentCharacterization) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Document analysis");
    let _ = writeln!(
        out,
        "  File size:   {} ({} bytes)",
        human_bytes(doc.file_size_bytes),
        doc.file_size_bytes
    );
    let _ = writeln!(out, "  Pages:       {}", doc.page_count);
    let _ = writeln!(out, "  Text:        {}", yes_no(doc.has_text));
    if doc.has_images {
        let _ = writeln!(
            out,
            "  Images:      yes (~{}% coverage, estimated)",
            doc.image_percentage_estimate
        );
    } else {
        let _ = writeln!(out, "  Images:      no");
    }
    let _ = writeln!(out, "  Color:       {}", yes_no(doc.has_color));
    let _ = writeln!(
        out,
        "  Signatures:  {}",
        if doc.has_signature_markers {
            "markers detected"
        } else {
            "none detected"
        }
    );
    let _ = writeln!(out, "  Confidence:  {}/100", doc.confidence);
    if doc.confidence < LOW_CONFIDENCE_CUTOFF {
        let _ = writeln!(
            out,
            "  Note: some content probes failed; treat these signals as rough estimates."
        );
    }
    if !doc.sha256.is_empty() {
        let _ = writeln!(out, "  SHA-256:     {}", doc.sha256);
    }
    let _ = writeln!(out, "  Analyzed:    {}", doc.analyzed_at);
    out
}

/// Render a ranked score list. Expects the slice ordered as produced by
/// the scoring engine. Total; no error cases.
pub fn format_scores(scores: &[ProfileScore]) -> String {
    let mut out = String::new();

    if let Some(top) = scores.first() {
        let _ = writeln!(
            out,
            "Recommended profile: {} (score {}/100)\n",
            top.profile, top.score
        );
    }

    let width = scores.iter().map(|s| s.profile.len()).max().unwrap_or(0);
    for (rank, s) in scores.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:<width$}  score {:>3}  est. reduction {}-{}%  quality {}",
            rank + 1,
            s.profile,
            s.score,
            s.estimated_compression.low_pct,
            s.estimated_compression.high_pct,
            s.quality_rating,
        );
        for reason in &s.reasons {
            let _ = writeln!(out, "       - {reason}");
        }
    }
    out
}

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

fn human_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KIB * KIB * KIB {
        format!("{:.1} GiB", b / (KIB * KIB * KIB))
    } else if b >= KIB * KIB {
        format!("{:.1} MiB", b / (KIB * KIB))
    } else if b >= KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{bytes} B")
    }
}
