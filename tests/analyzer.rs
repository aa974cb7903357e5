use anyhow::{anyhow, Result};
use shrink_advisor::{
    analyzer::{analyze, AnalyzeError},
    config::Config,
    probe::{DocMeta, DocProbe, ImageInfo, ProbeDiag},
};
use std::path::{Path, PathBuf};

/// Probe double: `None` for a field means that sub-probe fails.
struct FakeProbe {
    meta: Option<DocMeta>,
    text: Option<String>,
    images: Option<Vec<ImageInfo>>,
}

impl DocProbe for FakeProbe {
    fn doctor(&self) -> Result<ProbeDiag> {
        Ok(ProbeDiag {
            ok: true,
            tools: vec![],
        })
    }

    fn metadata(&self, _input: &Path) -> Result<DocMeta> {
        self.meta.clone().ok_or_else(|| anyhow!("metadata failed"))
    }

    fn extract_text(&self, _input: &Path, _sample_pages: u32) -> Result<String> {
        self.text.clone().ok_or_else(|| anyhow!("text failed"))
    }

    fn list_images(&self, _input: &Path) -> Result<Vec<ImageInfo>> {
        self.images.clone().ok_or_else(|| anyhow!("images failed"))
    }
}

fn meta(file_bytes: u64, page_count: u32) -> Option<DocMeta> {
    Some(DocMeta {
        file_bytes,
        page_count,
    })
}

fn images(spaces: &[&str]) -> Option<Vec<ImageInfo>> {
    Some(
        spaces
            .iter()
            .map(|s| ImageInfo {
                color_space: s.to_string(),
            })
            .collect(),
    )
}

/// analyze() stats the path before probing, so tests need a real file.
fn scratch_pdf(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("shrink-advisor-test-{}-{name}", std::process::id()));
    std::fs::write(&path, b"%PDF-1.4\n").unwrap();
    path
}

const LONG_TEXT: &str = "This agreement is made and entered into by and between \
the parties identified below, each of whom agrees to the terms herein.";

#[test]
fn missing_path_is_file_not_found() {
    let cfg = Config::default();
    let probe = FakeProbe {
        meta: meta(1000, 1),
        text: Some(LONG_TEXT.into()),
        images: images(&[]),
    };
    let err = analyze(&cfg, &probe, Path::new("/definitely/not/here.pdf")).unwrap_err();
    assert!(matches!(err, AnalyzeError::FileNotFound(_)));
}

#[test]
fn metadata_failure_is_unreadable_document() {
    let cfg = Config::default();
    let path = scratch_pdf("unreadable.pdf");
    let probe = FakeProbe {
        meta: None,
        text: Some(LONG_TEXT.into()),
        images: images(&[]),
    };
    let err = analyze(&cfg, &probe, &path).unwrap_err();
    assert!(matches!(err, AnalyzeError::UnreadableDocument { .. }));
    std::fs::remove_file(path).ok();
}

#[test]
fn oversize_file_is_unreadable_document() {
    let cfg = Config::default();
    let path = scratch_pdf("oversize.pdf");
    let probe = FakeProbe {
        meta: meta(cfg.limits.max_input_file_bytes + 1, 10),
        text: Some(LONG_TEXT.into()),
        images: images(&[]),
    };
    let err = analyze(&cfg, &probe, &path).unwrap_err();
    assert!(matches!(err, AnalyzeError::UnreadableDocument { .. }));
    assert!(err.to_string().contains("max_input_file_bytes"));
    std::fs::remove_file(path).ok();
}

#[test]
fn zero_pages_is_unreadable_document() {
    let cfg = Config::default();
    let path = scratch_pdf("zeropages.pdf");
    let probe = FakeProbe {
        meta: meta(1_000_000, 0),
        text: Some(LONG_TEXT.into()),
        images: images(&[]),
    };
    let err = analyze(&cfg, &probe, &path).unwrap_err();
    assert!(matches!(err, AnalyzeError::UnreadableDocument { .. }));
    std::fs::remove_file(path).ok();
}

#[test]
fn too_many_pages_is_unreadable_document() {
    let cfg = Config::default();
    let path = scratch_pdf("toolong.pdf");
    let probe = FakeProbe {
        meta: meta(1_000_000, cfg.limits.max_input_pages + 1),
        text: Some(LONG_TEXT.into()),
        images: images(&[]),
    };
    let err = analyze(&cfg, &probe, &path).unwrap_err();
    assert!(matches!(err, AnalyzeError::UnreadableDocument { .. }));
    assert!(err.to_string().contains("page count out of range"));
    std::fs::remove_file(path).ok();
}

#[test]
fn full_success_reaches_max_confidence() {
    let cfg = Config::default();
    let path = scratch_pdf("full.pdf");
    let probe = FakeProbe {
        meta: meta(1_000_000, 10),
        text: Some(LONG_TEXT.into()),
        images: images(&["rgb", "gray"]),
    };
    let doc = analyze(&cfg, &probe, &path).unwrap();
    assert_eq!(doc.confidence, 100);
    assert!(doc.has_text);
    assert!(doc.has_images);
    assert!(doc.has_color);
    assert_eq!(doc.page_count, 10);
    assert!(!doc.sha256.is_empty());
    std::fs::remove_file(path).ok();
}

#[test]
fn short_extracted_text_counts_as_noise() {
    let cfg = Config::default();
    let path = scratch_pdf("noise.pdf");
    let probe = FakeProbe {
        meta: meta(1_000_000, 10),
        text: Some("p.3".into()),
        images: images(&[]),
    };
    let doc = analyze(&cfg, &probe, &path).unwrap();
    // Probe succeeded, so confidence is full even though the text is noise.
    assert!(!doc.has_text);
    assert_eq!(doc.confidence, 100);
    std::fs::remove_file(path).ok();
}

#[test]
fn image_probe_failure_degrades_confidence_and_uses_size_fallback() {
    let cfg = Config::default();
    let path = scratch_pdf("imgfail.pdf");

    let full = FakeProbe {
        meta: meta(3_000_000, 10),
        text: Some(LONG_TEXT.into()),
        images: images(&["gray"]),
    };
    let degraded = FakeProbe {
        meta: meta(3_000_000, 10),
        text: Some(LONG_TEXT.into()),
        images: None,
    };

    let full_doc = analyze(&cfg, &full, &path).unwrap();
    let degraded_doc = analyze(&cfg, &degraded, &path).unwrap();

    assert!(degraded_doc.confidence < full_doc.confidence);
    // 3 MB is above the fallback threshold, so images are assumed present.
    assert!(degraded_doc.has_images);
    assert!(!degraded_doc.has_color);
    std::fs::remove_file(path).ok();
}

#[test]
fn small_file_fallback_assumes_no_images() {
    let cfg = Config::default();
    let path = scratch_pdf("smallfail.pdf");
    let probe = FakeProbe {
        meta: meta(100_000, 3),
        text: Some(LONG_TEXT.into()),
        images: None,
    };
    let doc = analyze(&cfg, &probe, &path).unwrap();
    assert!(!doc.has_images);
    assert_eq!(doc.image_percentage_estimate, 0);
    std::fs::remove_file(path).ok();
}

#[test]
fn all_probes_failing_still_returns_floor_confidence() {
    let cfg = Config::default();
    let path = scratch_pdf("allfail.pdf");
    let probe = FakeProbe {
        meta: meta(3_000_000, 10),
        text: None,
        images: None,
    };
    let doc = analyze(&cfg, &probe, &path).unwrap();
    assert_eq!(doc.confidence, cfg.analysis.confidence_floor);
    assert!(doc.has_images); // size heuristic only
    assert!(!doc.has_text);
    std::fs::remove_file(path).ok();
}

#[test]
fn signature_detection_is_skipped_when_text_probe_fails() {
    let cfg = Config::default();
    let path = scratch_pdf("sigskip.pdf");
    let probe = FakeProbe {
        meta: meta(1_000_000, 5),
        text: None,
        images: images(&[]),
    };
    let doc = analyze(&cfg, &probe, &path).unwrap();
    assert!(!doc.has_signature_markers);
    std::fs::remove_file(path).ok();
}

#[test]
fn signature_markers_found_in_extracted_text() {
    let cfg = Config::default();
    let path = scratch_pdf("sig.pdf");
    let text = format!("{LONG_TEXT}\nSignature: ______________\n");
    let probe = FakeProbe {
        meta: meta(1_000_000, 5),
        text: Some(text),
        images: images(&[]),
    };
    let doc = analyze(&cfg, &probe, &path).unwrap();
    assert!(doc.has_signature_markers);
    std::fs::remove_file(path).ok();
}
