//! Story progress payload

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;

/// Chapter progress as reported by the backend's story state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryProgress {
    #[serde(default)]
    pub chapter_title: String,
    /// Zero-based index of the current chapter
    #[serde(default)]
    pub chapter_index: u32,
    #[serde(default)]
    pub total_chapters: u32,
    /// Overall completion, nominally 0-100
    #[serde(default)]
    pub progress_pct: f64,
    #[serde(default)]
    pub turn: Option<u32>,
    #[serde(default)]
    pub max_turns: Option<u32>,
}

impl StoryProgress {
    /// Decode the `story-progress-updated` payload.
    pub fn decode(json: &str) -> Result<Self, PayloadError> {
        serde_json::from_str(json).map_err(|e| PayloadError::new("story-progress-updated", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_progress_info() {
        let progress = StoryProgress::decode(
            r#"{"chapter_title":"Глава II","chapter_index":1,"total_chapters":3,"turn":4,"max_turns":12,"progress_pct":44.4}"#,
        )
        .unwrap();
        assert_eq!(progress.chapter_title, "Глава II");
        assert_eq!(progress.chapter_index, 1);
        assert_eq!(progress.total_chapters, 3);
        assert_eq!(progress.turn, Some(4));
        assert!((progress.progress_pct - 44.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_percentage_is_accepted() {
        let progress = StoryProgress::decode(r#"{"progress_pct": -10}"#).unwrap();
        assert_eq!(progress.progress_pct, -10.0);
    }
}
