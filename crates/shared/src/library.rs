//! Library snapshot types
//!
//! The backend serializes its library as a JSON object keyed by work key. The
//! view only reads the presentation fields below; everything else the backend
//! keeps per work (prompts, intros, chapters, ...) is ignored on decode.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PayloadError;

/// A playable situation inside a work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Situation {
    pub key: String,
    pub title: String,
    /// The character the backend plays in this situation
    #[serde(default)]
    pub character: String,
    /// Everyone present, for display only
    #[serde(default)]
    pub characters: Option<String>,
    /// Accent color override for this situation
    #[serde(default)]
    pub color: Option<String>,
    /// The role the user plays; labels the user's bubbles
    #[serde(default)]
    pub user_character: Option<String>,
}

/// One work in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub title: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Character for works without situations (legacy single-scene works)
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub situations: Vec<Situation>,
}

impl LibraryEntry {
    pub fn has_situations(&self) -> bool {
        !self.situations.is_empty()
    }

    pub fn situation(&self, key: &str) -> Option<&Situation> {
        self.situations.iter().find(|s| s.key == key)
    }
}

/// Read-only library snapshot, in the order the backend serialized it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    entries: Vec<(String, LibraryEntry)>,
}

impl Library {
    pub fn new(entries: Vec<(String, LibraryEntry)>) -> Self {
        Self { entries }
    }

    /// Decode the `library-loaded` payload.
    pub fn decode(json: &str) -> Result<Self, PayloadError> {
        serde_json::from_str(json).map_err(|e| PayloadError::new("library-loaded", e))
    }

    pub fn get(&self, work_key: &str) -> Option<&LibraryEntry> {
        self.entries
            .iter()
            .find(|(key, _)| key == work_key)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LibraryEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for Library {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LibraryVisitor;

        impl<'de> Visitor<'de> for LibraryVisitor {
            type Value = Library;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of work key to library entry")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, entry)) = map.next_entry::<String, LibraryEntry>()? {
                    entries.push((key, entry));
                }
                Ok(Library { entries })
            }
        }

        deserializer.deserialize_map(LibraryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r##"{
        "pod_igoto": {
            "title": "Под игото",
            "color": "#DC2626",
            "situations": [
                {
                    "key": "pod_igoto_sit1",
                    "title": "Гост (Глава I) — Среща в обора",
                    "character": "Бай Марко",
                    "characters": "Бай Марко, Иван Краличът (ти)",
                    "color": "#DC2626",
                    "intro": "Пролетта на 1876 година.",
                    "prompt": "ignored"
                },
                {
                    "key": "pod_igoto_sit2",
                    "title": "Бурята (Глава II) — Воденицата",
                    "character": "Дядо Стоян",
                    "user_character": "Иван Краличът"
                }
            ]
        },
        "legacy": {
            "title": "Старата повест",
            "character": "Разказвач"
        }
    }"##;

    #[test]
    fn test_decode_keeps_backend_order_and_ignores_extra_fields() {
        let library = Library::decode(SNAPSHOT).unwrap();
        let keys: Vec<&str> = library.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["pod_igoto", "legacy"]);

        let work = library.get("pod_igoto").unwrap();
        assert!(work.has_situations());
        assert_eq!(work.color.as_deref(), Some("#DC2626"));

        let second = work.situation("pod_igoto_sit2").unwrap();
        assert_eq!(second.user_character.as_deref(), Some("Иван Краличът"));
        assert_eq!(second.color, None);
    }

    #[test]
    fn test_work_without_situations() {
        let library = Library::decode(SNAPSHOT).unwrap();
        let legacy = library.get("legacy").unwrap();
        assert!(!legacy.has_situations());
        assert_eq!(legacy.character.as_deref(), Some("Разказвач"));
        assert!(library.get("missing").is_none());
    }

    #[test]
    fn test_malformed_library_reports_event() {
        let err = Library::decode("{\"broken\": ").unwrap_err();
        assert_eq!(err.event, "library-loaded");
    }
}
