use crate::{
    analyzer::DocumentCharacterization,
    catalog::{self, CompressionProfile, CompressionRange, EncodingFamily},
    config::{Config, Scoring},
    prefs::{DocumentType, SizePriority, UseCase, UserPreferences},
};
use serde::Serialize;

/// One ranked catalog entry with its numeric fitness and justification.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileScore {
    pub profile: &'static str,
    pub score: u8,
    pub reasons: Vec<String>,
    pub estimated_compression: CompressionRange,
    pub quality_rating: &'static str,
}

/// Rank every catalog profile against the given preferences and (optional)
/// measured characterization. Pure and deterministic: same inputs, same
/// ordered output. With no signals at all the ranking is differentiated
/// only by the modernity adjustment.
pub fn score_profiles(
    cfg: &Config,
    prefs: &UserPreferences,
    doc: Option<&DocumentCharacterization>,
) -> Vec<ProfileScore> {
    let mut scored: Vec<ProfileScore> = catalog::all()
        .iter()
        .map(|p| score_one(&cfg.scoring, prefs, doc, p))
        .collect();
    // Stable sort: equal scores keep catalog declaration order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

fn bump(score: &mut i32, reasons: &mut Vec<String>, delta: i32, reason: &str) {
    *score += delta;
    reasons.push(reason.to_string());
}

fn score_one(
    s: &Scoring,
    prefs: &UserPreferences,
    doc: Option<&DocumentCharacterization>,
    p: &CompressionProfile,
) -> ProfileScore {
    let mut score = s.base_score;
    let mut reasons: Vec<String> = Vec::new();

    let mid = p.estimated_compression.midpoint_pct();
    let high_compression = mid >= s.high_compression_cutoff_pct;
    let low_compression = mid <= s.low_compression_cutoff_pct;

    // 1. Print/digital DPI fit. An explicit will_print overrides whatever
    // the use case implies.
    let wants_print = match prefs.will_print {
        Some(v) => Some(v),
        None => match prefs.use_case {
            Some(UseCase::Print) => Some(true),
            Some(UseCase::Digital) | Some(UseCase::Bulk) => Some(false),
            _ => None,
        },
    };
    match wants_print {
        Some(true) if p.dpi_tier.is_print_grade() => {
            bump(
                &mut score,
                &mut reasons,
                s.print_dpi_bonus,
                "print-grade resolution",
            );
        }
        Some(false) if p.dpi_tier.is_digital_only() => {
            bump(
                &mut score,
                &mut reasons,
                s.digital_dpi_bonus,
                "compact output for on-screen use",
            );
        }
        _ => {}
    }

    // 2. Content-type fit: measured signals at full magnitude, or the
    // self-reported document type at reduced magnitude.
    if let Some(doc) = doc {
        content_fit_measured(s, doc, p, &mut score, &mut reasons);
    } else if let Some(dt) = prefs.document_type {
        content_fit_declared(s, dt, p, &mut score, &mut reasons);
    }

    // 3. Size-vs-quality priority, against the range midpoint.
    if let Some(priority) = prefs.size_priority {
        match priority {
            SizePriority::Quality => {
                if low_compression {
                    bump(
                        &mut score,
                        &mut reasons,
                        s.priority_bonus,
                        "minimal quality loss",
                    );
                } else if high_compression {
                    bump(
                        &mut score,
                        &mut reasons,
                        -s.priority_penalty,
                        "heavy compression conflicts with quality priority",
                    );
                }
            }
            SizePriority::Aggressive => {
                if high_compression {
                    bump(
                        &mut score,
                        &mut reasons,
                        s.priority_bonus,
                        "maximum size reduction",
                    );
                } else if low_compression {
                    bump(
                        &mut score,
                        &mut reasons,
                        -s.priority_penalty,
                        "too gentle for aggressive size priority",
                    );
                }
            }
            SizePriority::Balanced => {
                if !low_compression && !high_compression {
                    bump(
                        &mut score,
                        &mut reasons,
                        s.priority_bonus,
                        "balanced size/quality trade-off",
                    );
                } else {
                    bump(
                        &mut score,
                        &mut reasons,
                        -s.priority_penalty,
                        "outside the balanced compression band",
                    );
                }
            }
        }
    }

    // 4. Use-case specialization.
    match prefs.use_case {
        Some(UseCase::Archive) => {
            if p.archive {
                bump(
                    &mut score,
                    &mut reasons,
                    s.archive_bonus,
                    "designed for long-term archival",
                );
            }
        }
        Some(UseCase::Bulk) => {
            if high_compression && p.dpi_tier.is_digital_only() {
                bump(
                    &mut score,
                    &mut reasons,
                    s.bulk_bonus,
                    "suited to high-volume bulk intake",
                );
            }
        }
        _ => {}
    }

    // 5. Modernity bias: legacy presets are a compatibility fallback.
    if !p.legacy {
        bump(
            &mut score,
            &mut reasons,
            s.modern_bonus,
            "modern encoder defaults",
        );
    }

    // 6. File-size escalation.
    if let Some(doc) = doc {
        let bytes = doc.file_size_bytes;
        if bytes >= s.huge_file_bytes {
            if p.dpi_tier.is_digital_only() {
                bump(
                    &mut score,
                    &mut reasons,
                    s.huge_file_low_dpi_bonus,
                    "very large file benefits from lower resolution",
                );
            }
            if high_compression {
                bump(
                    &mut score,
                    &mut reasons,
                    s.huge_file_aggressive_bonus,
                    "very large file benefits from aggressive compression",
                );
            }
        } else if bytes >= s.large_file_bytes {
            if p.dpi_tier.is_digital_only() {
                bump(
                    &mut score,
                    &mut reasons,
                    s.large_file_low_dpi_bonus,
                    "large file benefits from lower resolution",
                );
            }
        } else if bytes <= s.small_file_bytes && (p.archive || p.safe_default) {
            bump(
                &mut score,
                &mut reasons,
                s.small_file_gentle_bonus,
                "small file needs only gentle compression",
            );
        }
    }

    if reasons.is_empty() {
        reasons.push("suitable for your needs".to_string());
    }

    ProfileScore {
        profile: p.name,
        score: score.clamp(0, 100) as u8,
        reasons,
        estimated_compression: p.estimated_compression,
        quality_rating: p.quality.label(),
    }
}

fn content_fit_measured(
    s: &Scoring,
    doc: &DocumentCharacterization,
    p: &CompressionProfile,
    score: &mut i32,
    reasons: &mut Vec<String>,
) {
    match (doc.has_text, doc.has_images) {
        (true, false) => match p.encoding {
            EncodingFamily::LosslessText => bump(
                score,
                reasons,
                s.content_match_bonus,
                "optimized for text documents",
            ),
            EncodingFamily::LossyImage => bump(
                score,
                reasons,
                -s.content_mismatch_penalty,
                "image encoding wastes space on text",
            ),
            EncodingFamily::Hybrid => bump(
                score,
                reasons,
                s.content_partial_bonus,
                "handles text content well",
            ),
        },
        (false, true) => match p.encoding {
            EncodingFamily::LossyImage => bump(
                score,
                reasons,
                s.content_match_bonus,
                "tuned for scanned/image content",
            ),
            EncodingFamily::LosslessText => bump(
                score,
                reasons,
                -s.content_mismatch_penalty,
                "text encoding struggles with scans",
            ),
            EncodingFamily::Hybrid => bump(
                score,
                reasons,
                s.content_partial_bonus,
                "handles image content well",
            ),
        },
        (true, true) => match p.encoding {
            EncodingFamily::Hybrid => bump(
                score,
                reasons,
                s.mixed_hybrid_bonus,
                "best fit for mixed text and images",
            ),
            EncodingFamily::LossyImage => bump(
                score,
                reasons,
                s.mixed_image_bonus,
                "copes with mixed content",
            ),
            EncodingFamily::LosslessText => bump(
                score,
                reasons,
                s.mixed_text_bonus,
                "retains text fidelity in mixed content",
            ),
        },
        (false, false) => {}
    }

    if doc.has_signature_markers && p.encoding == EncodingFamily::LosslessText {
        bump(
            score,
            reasons,
            s.signature_text_bonus,
            "preserves signature legibility",
        );
    }

    if doc.has_color {
        if p.encoding == EncodingFamily::LossyImage {
            bump(
                score,
                reasons,
                s.color_image_bonus,
                "retains color image quality",
            );
        }
    } else if p.encoding == EncodingFamily::LosslessText {
        bump(
            score,
            reasons,
            s.mono_text_bonus,
            "monochrome content compresses cleanly",
        );
    }
}

fn content_fit_declared(
    s: &Scoring,
    dt: DocumentType,
    p: &CompressionProfile,
    score: &mut i32,
    reasons: &mut Vec<String>,
) {
    match dt {
        DocumentType::Text => match p.encoding {
            EncodingFamily::LosslessText => bump(
                score,
                reasons,
                s.declared_match_bonus,
                "matches your declared text document",
            ),
            EncodingFamily::LossyImage => bump(
                score,
                reasons,
                -s.declared_mismatch_penalty,
                "mismatched with declared text document",
            ),
            EncodingFamily::Hybrid => bump(
                score,
                reasons,
                s.declared_partial_bonus,
                "workable for declared text document",
            ),
        },
        DocumentType::Scanned => match p.encoding {
            EncodingFamily::LossyImage => bump(
                score,
                reasons,
                s.declared_match_bonus,
                "matches your declared scanned document",
            ),
            EncodingFamily::LosslessText => bump(
                score,
                reasons,
                -s.declared_mismatch_penalty,
                "mismatched with declared scanned document",
            ),
            EncodingFamily::Hybrid => bump(
                score,
                reasons,
                s.declared_partial_bonus,
                "workable for declared scanned document",
            ),
        },
        DocumentType::Mixed => match p.encoding {
            EncodingFamily::Hybrid => bump(
                score,
                reasons,
                s.declared_match_bonus,
                "matches your declared mixed document",
            ),
            EncodingFamily::LossyImage => bump(
                score,
                reasons,
                s.declared_partial_bonus,
                "workable for declared mixed document",
            ),
            EncodingFamily::LosslessText => bump(
                score,
                reasons,
                s.declared_mixed_text_bonus,
                "keeps text sharp in declared mixed document",
            ),
        },
        DocumentType::Unknown => {}
    }
}
