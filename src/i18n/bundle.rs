//! Text bundle: the nested static site copy for one locale.
//!
//! A bundle is a tree of [`TextNode`]s. Mappings keep their document order so a
//! translated bundle serializes with the same layout as its source file.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Flattened bundle: dot-notation key -> leaf text.
pub type TranslationMap = HashMap<String, String>;

/// One node of a text bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextNode {
    /// A piece of display text.
    Leaf(String),
    /// Ordered list of nodes (e.g. feature bullet points).
    Sequence(Vec<TextNode>),
    /// Ordered key -> node mapping.
    Mapping(Vec<(String, TextNode)>),
}

impl TextNode {
    /// What: Convenience constructor for a leaf.
    #[must_use]
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// What: Leaf text, if this node is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(s) => Some(s),
            _ => None,
        }
    }

    /// What: Direct child of a mapping by key.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// What: Look up a node by dot-notation path.
    ///
    /// Inputs:
    /// - `path`: e.g. `home.hero.title` or `home.accommodation.features.0`
    ///
    /// Output:
    /// - The node at `path`, or `None` when any segment is missing.
    ///
    /// Details:
    /// - Numeric segments index into sequences.
    /// - An empty path returns the node itself.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Self> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |node, segment| match node {
            Self::Mapping(_) => node.child(segment),
            Self::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Self::Leaf(_) => None,
        })
    }

    /// What: Display text at `path`, or the path itself when missing.
    ///
    /// Details:
    /// - Returning the key keeps pages renderable and makes missing copy easy to spot.
    #[must_use]
    pub fn text(&self, path: &str) -> String {
        if let Some(text) = self.get(path).and_then(Self::as_leaf) {
            return text.to_string();
        }
        tracing::debug!(
            "Missing text key: '{}'. Returning key as-is. Please add this key to locale files.",
            path
        );
        path.to_string()
    }

    /// What: Number of leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Sequence(items) => items.iter().map(Self::leaf_count).sum(),
            Self::Mapping(entries) => entries.iter().map(|(_, v)| v.leaf_count()).sum(),
        }
    }

    /// What: Structural equality ignoring leaf content.
    ///
    /// Output:
    /// - `true` when both trees have the same keys in the same order at every level
    ///   and the same length for every sequence.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(_), Self::Leaf(_)) => true,
            (Self::Sequence(a), Self::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            (Self::Mapping(a), Self::Mapping(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.same_shape(vb))
            }
            _ => false,
        }
    }

    /// What: Flatten every leaf into dot-notation keys.
    ///
    /// Output:
    /// - `TranslationMap` such as `home.hero.title -> "Selamat Datang ..."`.
    ///
    /// Details:
    /// - Sequence elements are keyed by index (`features.0`, `features.1`, ...).
    #[must_use]
    pub fn flatten(&self) -> TranslationMap {
        let mut out = TranslationMap::new();
        flatten_node(self, "", &mut out);
        out
    }

    /// What: Render the bundle as pretty JSON.
    ///
    /// # Errors
    /// - Returns `Err` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// What: Render the bundle as YAML.
    ///
    /// # Errors
    /// - Returns `Err` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_norway::Error> {
        serde_norway::to_string(self)
    }
}

/// What: Recursively flatten a node into `out`.
///
/// Inputs:
/// - `node`: Current node.
/// - `prefix`: Dot-notation key of `node` (empty at the root).
/// - `out`: Map to populate.
fn flatten_node(node: &TextNode, prefix: &str, out: &mut TranslationMap) {
    let join = |segment: &str| {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{prefix}.{segment}")
        }
    };
    match node {
        TextNode::Leaf(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        TextNode::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_node(item, &join(&i.to_string()), out);
            }
        }
        TextNode::Mapping(entries) => {
            for (key, value) in entries {
                flatten_node(value, &join(key), out);
            }
        }
    }
}

/// What: Replace `{name}` placeholders in display text.
///
/// Inputs:
/// - `text`: Template such as `Menampilkan {count} paket`.
/// - `replacements`: `(name, value)` pairs.
///
/// Output:
/// - Text with the first occurrence of each placeholder substituted.
#[must_use]
pub fn replace_placeholders<V: fmt::Display>(text: &str, replacements: &[(&str, V)]) -> String {
    let mut result = text.to_string();
    for (name, value) in replacements {
        result = result.replacen(&format!("{{{name}}}"), &value.to_string(), 1);
    }
    result
}

impl Serialize for TextNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(s) => serializer.serialize_str(s),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(entries) => serializer.collect_map(entries.iter().map(|(k, v)| (k, v))),
        }
    }
}

impl<'de> Deserialize<'de> for TextNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TextNodeVisitor)
    }
}

/// Builds [`TextNode`]s in document order from any self-describing format.
struct TextNodeVisitor;

impl<'de> Visitor<'de> for TextNodeVisitor {
    type Value = TextNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, a sequence or a mapping of text")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TextNode, E> {
        Ok(TextNode::leaf(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<TextNode, E> {
        Ok(TextNode::Leaf(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<TextNode, E> {
        Ok(TextNode::Leaf(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TextNode, E> {
        Ok(TextNode::Leaf(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TextNode, E> {
        Ok(TextNode::Leaf(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<TextNode, E> {
        Ok(TextNode::Leaf(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<TextNode, E> {
        Ok(TextNode::Leaf(String::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<TextNode, E> {
        Ok(TextNode::Leaf(String::new()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TextNode, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(TextNode::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TextNode, A::Error> {
        let mut entries: Vec<(String, TextNode)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<TextNode>()? {
            let TextNode::Leaf(key) = key else {
                return Err(de::Error::custom("bundle keys must be scalars"));
            };
            let value = map.next_value()?;
            if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
                slot.1 = value;
            } else {
                entries.push((key, value));
            }
        }
        Ok(TextNode::Mapping(entries))
    }
}
