use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    Print,
    Digital,
    Archive,
    Bulk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Scanned,
    Text,
    Mixed,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePriority {
    Quality,
    Balanced,
    Aggressive,
}

/// Free-form user input, before normalization. Field values are whatever
/// the caller typed; nothing here is trusted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPreferences {
    pub use_case: Option<String>,
    pub document_type: Option<String>,
    pub size_priority: Option<String>,
    pub will_print: Option<bool>,
}

/// Normalized selection criteria. Every field is optional; `None` means
/// "no signal", which the scoring engine treats differently from any
/// chosen value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    pub use_case: Option<UseCase>,
    pub document_type: Option<DocumentType>,
    pub size_priority: Option<SizePriority>,
    pub will_print: Option<bool>,
}

/// Total: unrecognized values are dropped (with a warning), never rejected.
/// This is an advisory tool; bad input degrades to "no signal" instead of
/// blocking the recommendation.
pub fn normalize(raw: &RawPreferences) -> UserPreferences {
    UserPreferences {
        use_case: coerce(raw.use_case.as_deref(), "use_case", |v| match v {
            "print" => Some(UseCase::Print),
            "digital" => Some(UseCase::Digital),
            "archive" => Some(UseCase::Archive),
            "bulk" => Some(UseCase::Bulk),
            _ => None,
        }),
        document_type: coerce(raw.document_type.as_deref(), "document_type", |v| match v {
            "scanned" => Some(DocumentType::Scanned),
            "text" => Some(DocumentType::Text),
            "mixed" => Some(DocumentType::Mixed),
            "unknown" => Some(DocumentType::Unknown),
            _ => None,
        }),
        size_priority: coerce(raw.size_priority.as_deref(), "size_priority", |v| match v {
            "quality" => Some(SizePriority::Quality),
            "balanced" => Some(SizePriority::Balanced),
            "aggressive" => Some(SizePriority::Aggressive),
            _ => None,
        }),
        will_print: raw.will_print,
    }
}

fn coerce<T>(raw: Option<&str>, field: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let raw = raw?.trim().to_ascii_lowercase();
    if raw.is_empty() {
        return None;
    }
    match parse(&raw) {
        Some(v) => Some(v),
        None => {
            warn!("ignoring unrecognized {field}: {raw:?}");
            None
        }
    }
}
