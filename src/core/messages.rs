//! Validation messages
//!
//! A leaf input reports a flat [`Messages`] map (message key -> text). Composite
//! nodes nest those maps into a [`MessageTree`] mirroring the shape of the
//! payload, so the tree for `{"people": [{"name": ""}]}` reads
//! `{"people": {"0": {"name": {"isEmpty": "..."}}}}` once serialized.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Ordered message key -> message text map produced by a single field
pub type Messages = IndexMap<String, String>;

/// Build a single-entry [`Messages`] map
pub fn violation(key: impl Into<String>, message: impl Into<String>) -> Messages {
    let mut messages = Messages::new();
    messages.insert(key.into(), message.into());
    messages
}

/// Recursive message report for a node of the input tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageTree {
    /// Messages of a leaf input, or the collection-level messages of a collection
    Field(Messages),

    /// Messages of an input filter, keyed by child name (invalid children only)
    Nested(IndexMap<String, MessageTree>),

    /// Messages of a collection, keyed by item position (invalid items only)
    Items(BTreeMap<usize, MessageTree>),
}

impl MessageTree {
    /// `true` when the tree carries no message at all
    pub fn is_empty(&self) -> bool {
        match self {
            MessageTree::Field(messages) => messages.is_empty(),
            MessageTree::Nested(children) => children.values().all(MessageTree::is_empty),
            MessageTree::Items(items) => items.values().all(MessageTree::is_empty),
        }
    }

    /// Leaf messages, if this is a [`MessageTree::Field`]
    pub fn as_field(&self) -> Option<&Messages> {
        match self {
            MessageTree::Field(messages) => Some(messages),
            _ => None,
        }
    }

    /// Child report by name, if this is a [`MessageTree::Nested`]
    pub fn get(&self, name: &str) -> Option<&MessageTree> {
        match self {
            MessageTree::Nested(children) => children.get(name),
            _ => None,
        }
    }

    /// Item report by position, if this is a [`MessageTree::Items`]
    pub fn item(&self, index: usize) -> Option<&MessageTree> {
        match self {
            MessageTree::Items(items) => items.get(&index),
            _ => None,
        }
    }

    /// Plain JSON rendering of the tree
    pub fn to_json(&self) -> Value {
        match self {
            MessageTree::Field(messages) => Value::Object(
                messages
                    .iter()
                    .map(|(key, text)| (key.clone(), Value::String(text.clone())))
                    .collect(),
            ),
            MessageTree::Nested(children) => Value::Object(
                children
                    .iter()
                    .map(|(name, tree)| (name.clone(), tree.to_json()))
                    .collect(),
            ),
            MessageTree::Items(items) => Value::Object(
                items
                    .iter()
                    .map(|(index, tree)| (index.to_string(), tree.to_json()))
                    .collect(),
            ),
        }
    }

    /// Flatten the tree into dotted paths (`people.0.name`) -> message texts
    pub fn flatten(&self) -> IndexMap<String, Vec<String>> {
        let mut out = IndexMap::new();
        self.flatten_into(String::new(), &mut out);
        out
    }

    fn flatten_into(&self, prefix: String, out: &mut IndexMap<String, Vec<String>>) {
        let join = |segment: &str| {
            if prefix.is_empty() {
                segment.to_string()
            } else {
                format!("{}.{}", prefix, segment)
            }
        };

        match self {
            MessageTree::Field(messages) => {
                if !messages.is_empty() {
                    out.entry(prefix.clone())
                        .or_default()
                        .extend(messages.values().cloned());
                }
            }
            MessageTree::Nested(children) => {
                for (name, tree) in children {
                    tree.flatten_into(join(name), out);
                }
            }
            MessageTree::Items(items) => {
                for (index, tree) in items {
                    tree.flatten_into(join(&index.to_string()), out);
                }
            }
        }
    }
}

impl From<Messages> for MessageTree {
    fn from(messages: Messages) -> Self {
        MessageTree::Field(messages)
    }
}
