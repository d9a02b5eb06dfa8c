//! Shared capability of every node of an input tree

use super::{CollectionInputFilter, InputFilter};
use crate::config::Settings;
use crate::core::messages::MessageTree;
use crate::input::{ArrayInput, Input};
use serde_json::Value;

/// What a parent needs from a child, whatever its kind
///
/// Parents only ever talk to their children through this trait: they hand
/// them their slice of the payload, ask whether it is valid and collect the
/// resulting values and messages. Traversal is strictly top-down.
pub trait InputNode {
    /// Replace the node's payload (`None` when the key is absent)
    fn populate(&mut self, payload: Option<Value>);

    /// Validate the current payload; `context` is forwarded to every validator
    fn is_valid(&mut self, context: Option<&Value>) -> bool;

    /// Filtered value (`null` when absent); nested objects and arrays for composites
    fn computed_value(&self) -> Value;

    /// Unfiltered value, shaped like [`computed_value`](Self::computed_value)
    fn computed_raw_value(&self) -> Value;

    /// Messages of the last validation, `None` when the node passed
    fn message_tree(&self) -> Option<MessageTree>;

    /// Deep structural copy with fresh validation state
    fn replicate(&self) -> Self
    where
        Self: Sized;

    /// Switch the node (and its descendants) to the given settings
    fn apply_settings(&mut self, settings: &Settings);
}

/// Any child of an [`InputFilter`]
#[derive(Debug, Clone)]
pub enum Node {
    Input(Input),
    ArrayInput(ArrayInput),
    InputFilter(InputFilter),
    Collection(CollectionInputFilter),
}

impl Node {
    pub fn as_input(&self) -> Option<&Input> {
        match self {
            Node::Input(input) => Some(input),
            Node::ArrayInput(array) => Some(array.input()),
            _ => None,
        }
    }

    pub fn as_input_mut(&mut self) -> Option<&mut Input> {
        match self {
            Node::Input(input) => Some(input),
            Node::ArrayInput(array) => Some(array.input_mut()),
            _ => None,
        }
    }

    pub fn as_input_filter(&self) -> Option<&InputFilter> {
        match self {
            Node::InputFilter(filter) => Some(filter),
            _ => None,
        }
    }

    pub fn as_input_filter_mut(&mut self) -> Option<&mut InputFilter> {
        match self {
            Node::InputFilter(filter) => Some(filter),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&CollectionInputFilter> {
        match self {
            Node::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut CollectionInputFilter> {
        match self {
            Node::Collection(collection) => Some(collection),
            _ => None,
        }
    }
}

impl InputNode for Node {
    fn populate(&mut self, payload: Option<Value>) {
        match self {
            Node::Input(node) => node.populate(payload),
            Node::ArrayInput(node) => node.populate(payload),
            Node::InputFilter(node) => node.populate(payload),
            Node::Collection(node) => node.populate(payload),
        }
    }

    fn is_valid(&mut self, context: Option<&Value>) -> bool {
        match self {
            Node::Input(node) => node.is_valid(context),
            Node::ArrayInput(node) => node.is_valid(context),
            Node::InputFilter(node) => node.is_valid(context),
            Node::Collection(node) => node.is_valid(context),
        }
    }

    fn computed_value(&self) -> Value {
        match self {
            Node::Input(node) => node.computed_value(),
            Node::ArrayInput(node) => node.computed_value(),
            Node::InputFilter(node) => node.computed_value(),
            Node::Collection(node) => node.computed_value(),
        }
    }

    fn computed_raw_value(&self) -> Value {
        match self {
            Node::Input(node) => node.computed_raw_value(),
            Node::ArrayInput(node) => node.computed_raw_value(),
            Node::InputFilter(node) => node.computed_raw_value(),
            Node::Collection(node) => node.computed_raw_value(),
        }
    }

    fn message_tree(&self) -> Option<MessageTree> {
        match self {
            Node::Input(node) => node.message_tree(),
            Node::ArrayInput(node) => node.message_tree(),
            Node::InputFilter(node) => node.message_tree(),
            Node::Collection(node) => node.message_tree(),
        }
    }

    fn replicate(&self) -> Self {
        match self {
            Node::Input(node) => Node::Input(node.replicate()),
            Node::ArrayInput(node) => Node::ArrayInput(node.replicate()),
            Node::InputFilter(node) => Node::InputFilter(node.replicate()),
            Node::Collection(node) => Node::Collection(node.replicate()),
        }
    }

    fn apply_settings(&mut self, settings: &Settings) {
        match self {
            Node::Input(node) => InputNode::apply_settings(node, settings),
            Node::ArrayInput(node) => InputNode::apply_settings(node, settings),
            Node::InputFilter(node) => InputNode::apply_settings(node, settings),
            Node::Collection(node) => InputNode::apply_settings(node, settings),
        }
    }
}

impl From<Input> for Node {
    fn from(input: Input) -> Self {
        Node::Input(input)
    }
}

impl From<ArrayInput> for Node {
    fn from(input: ArrayInput) -> Self {
        Node::ArrayInput(input)
    }
}

impl From<InputFilter> for Node {
    fn from(filter: InputFilter) -> Self {
        Node::InputFilter(filter)
    }
}

impl From<CollectionInputFilter> for Node {
    fn from(collection: CollectionInputFilter) -> Self {
        Node::Collection(collection)
    }
}
