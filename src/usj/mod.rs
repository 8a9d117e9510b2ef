//! USJ (Unified Scripture JSON) document model.
//!
//! USJ is the JSON serialization of USX: each book is a tree of typed nodes
//! (`book`, `chapter`, `para`, `verse`, `note`, `char`) whose `content`
//! arrays mix bare strings with nested nodes. A full translation ships as a
//! single JSON object mapping canonical keys (`"01GENBSB"`) to book
//! documents; the key order is the translation's book order, so [`Usj`]
//! keeps entries as an ordered list rather than a map.

pub mod marker;

use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A full USJ asset: ordered `(canonical key, book document)` entries.
#[derive(Debug, Clone, Default)]
pub struct Usj {
    pub entries: Vec<(String, UsjBook)>,
}

/// One book document (`{"type": "USJ", "version": "3.1", "content": [...]}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsjBook {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub content: Vec<UsjContent>,
}

impl UsjBook {
    /// Entries whose `type` is anything but `"USJ"` are not scripture and
    /// are skipped by the compiler.
    pub fn is_scripture(&self) -> bool {
        self.kind == "USJ"
    }
}

/// A content entry: bare text or a nested marker node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UsjContent {
    Text(String),
    Node(UsjNode),
}

impl UsjContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            UsjContent::Text(s) => Some(s),
            UsjContent::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&UsjNode> {
        match self {
            UsjContent::Text(_) => None,
            UsjContent::Node(n) => Some(n),
        }
    }
}

/// A marker node in the USJ tree.
///
/// Which attributes are meaningful depends on `kind`: `book` nodes carry
/// `code`, `chapter` and `verse` nodes carry `number` and `sid`, `para`,
/// `char`, and `note` nodes carry `marker` (and notes a `caller`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsjNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<UsjContent>,
}

impl UsjNode {
    /// The marker string, or `""` when absent.
    pub fn marker_str(&self) -> &str {
        self.marker.as_deref().unwrap_or("")
    }

    /// Concatenated direct string children, ignoring nested nodes.
    pub fn direct_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.content {
            if let UsjContent::Text(s) = entry {
                out.push_str(s);
            }
        }
        out
    }

    /// Whether any direct child is a `verse` node.
    pub fn has_verse_child(&self) -> bool {
        self.content
            .iter()
            .filter_map(UsjContent::as_node)
            .any(|n| n.kind == "verse")
    }
}

impl Usj {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromStr for Usj {
    type Err = Error;

    /// Parse either a full keyed asset or a lone book document.
    ///
    /// A lone document (top-level `"type": "USJ"`) is wrapped as a single
    /// entry with an empty key; its book code then comes from the `book`
    /// node inside.
    fn from_str(s: &str) -> Result<Usj> {
        if let Ok(book) = serde_json::from_str::<UsjBook>(s) {
            return Ok(Usj {
                entries: vec![(String::new(), book)],
            });
        }
        Ok(serde_json::from_str::<Usj>(s)?)
    }
}

// The asset must deserialize straight from the JSON text: bouncing through a
// sorted map type would reorder the books.

impl<'de> Deserialize<'de> for Usj {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Usj;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of canonical keys to USJ book documents")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Usj, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, book)) = map.next_entry::<String, UsjBook>()? {
                    entries.push((key, book));
                }
                Ok(Usj { entries })
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl Serialize for Usj {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, book) in &self.entries {
            map.serialize_entry(key, book)?;
        }
        map.end()
    }
}
