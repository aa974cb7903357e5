pub mod poppler;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Byte size and page count for a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMeta {
    pub file_bytes: u64,
    pub page_count: u32,
}

/// One embedded image as declared by the enumeration service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    pub color_space: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeDiag {
    pub ok: bool,
    pub tools: Vec<ToolDiag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDiag {
    pub name: String,
    pub bin: String,
    pub version: Option<String>,
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// External read-only inspection collaborators. Implementations are opaque;
/// any method may fail independently and the analyzer treats each failure
/// as a degraded signal, not a fatal error (metadata excepted).
pub trait DocProbe {
    fn doctor(&self) -> Result<ProbeDiag>;
    fn metadata(&self, input: &Path) -> Result<DocMeta>;
    fn extract_text(&self, input: &Path, sample_pages: u32) -> Result<String>;
    fn list_images(&self, input: &Path) -> Result<Vec<ImageInfo>>;
}
