use shrink_advisor::{
    analyzer::DocumentCharacterization,
    config::Config,
    prefs::UserPreferences,
    report::{format_analysis, format_scores},
    scoring::score_profiles,
};

fn mk_doc(confidence: u8) -> DocumentCharacterization {
    DocumentCharacterization {
        file_size_bytes: 2_500_000,
        page_count: 12,
        has_text: true,
        has_images: true,
        image_percentage_estimate: 40,
        has_color: true,
        has_signature_markers: false,
        confidence,
        sha256: "deadbeef".into(),
        analyzed_at: "2026-01-01T00:00:00Z".into(),
    }
}

#[test]
fn low_confidence_adds_a_caveat() {
    let low = format_analysis(&mk_doc(30));
    assert!(low.contains("rough estimates"));

    let high = format_analysis(&mk_doc(100));
    assert!(!high.contains("rough estimates"));
}

#[test]
fn analysis_report_carries_the_signals() {
    let out = format_analysis(&mk_doc(100));
    assert!(out.contains("Pages:       12"));
    assert!(out.contains("~40% coverage"));
    assert!(out.contains("deadbeef"));
    assert!(out.contains("2.4 MiB"));
}

#[test]
fn score_report_names_the_top_pick_and_reasons() {
    let cfg = Config::default();
    let scores = score_profiles(&cfg, &UserPreferences::default(), Some(&mk_doc(100)));
    let out = format_scores(&scores);

    assert!(out.starts_with(&format!("Recommended profile: {}", scores[0].profile)));
    // Every profile shows up with at least one justification line.
    for s in &scores {
        assert!(out.contains(s.profile));
        assert!(out.contains(s.reasons[0].as_str()));
    }
}
