//! Array-valued inputs
//!
//! An [`ArrayInput`] expects a JSON array: its filters run on every element
//! and its validators check every element, stopping at the first failure.

use super::Input;
use crate::config::Settings;
use crate::core::messages::{MessageTree, Messages};
use crate::input_filter::InputNode;
use serde_json::Value;

/// Input whose value is an array validated element by element
#[derive(Debug, Clone)]
pub struct ArrayInput {
    input: Input,
}

impl ArrayInput {
    /// Create a required array input with empty chains
    pub fn new(name: impl Into<String>) -> Self {
        Self::from(Input::new(name))
    }

    pub fn name(&self) -> &str {
        self.input.name()
    }

    /// Underlying input holding the policy and the chains
    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    pub fn set_value(&mut self, value: Value) -> &mut Self {
        self.input.set_value(value);
        self
    }

    pub fn clear_value(&mut self) -> &mut Self {
        self.input.clear_value();
        self
    }

    pub fn raw_value(&self) -> Option<&Value> {
        self.input.raw_value()
    }

    /// Array of filtered elements
    pub fn value(&self) -> Option<&Value> {
        self.input.value()
    }

    pub fn messages(&self) -> &Messages {
        self.input.messages()
    }

    pub fn is_valid(&mut self, context: Option<&Value>) -> bool {
        self.input.is_valid(context)
    }
}

impl InputNode for ArrayInput {
    fn populate(&mut self, payload: Option<Value>) {
        self.input.populate(payload);
    }

    fn is_valid(&mut self, context: Option<&Value>) -> bool {
        self.input.is_valid(context)
    }

    fn computed_value(&self) -> Value {
        self.input.computed_value()
    }

    fn computed_raw_value(&self) -> Value {
        self.input.computed_raw_value()
    }

    fn message_tree(&self) -> Option<MessageTree> {
        self.input.message_tree()
    }

    fn replicate(&self) -> Self {
        Self {
            input: self.input.replicate(),
        }
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.input.apply_settings(settings);
    }
}

impl From<Input> for ArrayInput {
    fn from(mut input: Input) -> Self {
        input.set_each_element(true);
        Self { input }
    }
}
