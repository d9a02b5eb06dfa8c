//! Composite input filters
//!
//! An [`InputFilter`] is an ordered set of named children ([`Node`]s): leaf
//! inputs, nested input filters and collections. It owns the payload handed to
//! [`set_data`](InputFilter::set_data), distributes it to its children by name
//! and aggregates their validity, values and messages.
//!
//! # Example
//!
//! ```rust,ignore
//! use inputfilter::prelude::*;
//! use serde_json::json;
//!
//! let mut filter = InputFilter::new().with_input(
//!     Input::new("username")
//!         .with_filter(filters::trim())
//!         .with_validator(validators::min_length(3)),
//! );
//!
//! filter.set_data(json!({"username": "  ab  "}))?;
//! assert!(!filter.is_valid(None));
//!
//! filter.set_data(json!({"username": "  abcd "}))?;
//! assert!(filter.is_valid(None));
//! assert_eq!(filter.value("username")?, json!("abcd"));
//! ```

pub mod collection;
pub mod node;

pub use collection::CollectionInputFilter;
pub use node::{InputNode, Node};

use crate::config::Settings;
use crate::core::error::{InputFilterError, Result};
use crate::core::messages::MessageTree;
use crate::core::value::type_name;
use crate::input::Input;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Ordered collection of named inputs validated together against one payload
#[derive(Debug, Clone, Default)]
pub struct InputFilter {
    children: IndexMap<String, Node>,
    data: Map<String, Value>,
    validation_group: Option<Vec<String>>,
    valid_inputs: Vec<String>,
    invalid: IndexMap<String, MessageTree>,
}

impl InputFilter {
    pub fn new() -> Self {
        Self::default()
    }

    // === Children ===

    /// Register a child under `name`, replacing any child of the same name in place
    pub fn add(&mut self, name: impl Into<String>, node: impl Into<Node>) -> &mut Self {
        self.children.insert(name.into(), node.into());
        self
    }

    /// Register an input under its own name
    pub fn add_input(&mut self, input: Input) -> &mut Self {
        let name = input.name().to_string();
        self.add(name, input)
    }

    /// Builder form of [`add`](Self::add)
    pub fn with(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        self.add(name, node);
        self
    }

    /// Builder form of [`add_input`](Self::add_input)
    pub fn with_input(mut self, input: Input) -> Self {
        self.add_input(input);
        self
    }

    /// Unregister a child; it also leaves the validation group
    ///
    /// A group left without members is cleared, so every remaining child is
    /// validated again.
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        if let Some(group) = self.validation_group.as_mut() {
            group.retain(|member| member != name);
            if group.is_empty() {
                tracing::debug!(input = %name, "validation group emptied, clearing it");
                self.validation_group = None;
            }
        }
        self.children.shift_remove(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Child names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    // === Payload ===

    /// Set the payload to validate; it must be a JSON object
    ///
    /// Every child is reset first, then the children whose name appears in the
    /// payload receive their value. Keys matching no child are kept aside and
    /// reported by [`unknown`](Self::unknown).
    pub fn set_data(&mut self, data: Value) -> Result<&mut Self> {
        match data {
            Value::Object(map) => {
                self.populate_map(map);
                Ok(self)
            }
            other => {
                let actual = type_name(&other);
                tracing::warn!(actual, "input filter payload must be an object");
                Err(InputFilterError::InvalidPayload {
                    expected: "object",
                    actual,
                })
            }
        }
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    fn populate_map(&mut self, data: Map<String, Value>) {
        self.data = data;
        self.valid_inputs.clear();
        self.invalid.clear();
        for (name, child) in self.children.iter_mut() {
            child.populate(self.data.get(name).cloned());
        }
    }

    // === Validation group ===

    /// Restrict the next validations to the named children
    ///
    /// Children left out are neither validated nor reported in values or
    /// messages. Naming an unknown child is an error and leaves the current
    /// group untouched.
    pub fn set_validation_group<I, S>(&mut self, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if let Some(unknown) = names.iter().find(|name| !self.children.contains_key(*name)) {
            tracing::warn!(input = %unknown, "validation group references unknown input");
            return Err(InputFilterError::UnknownValidationGroupInput(
                unknown.clone(),
            ));
        }
        self.validation_group = Some(names);
        Ok(self)
    }

    /// Validate every child again
    pub fn clear_validation_group(&mut self) -> &mut Self {
        self.validation_group = None;
        self
    }

    pub fn validation_group(&self) -> Option<&[String]> {
        self.validation_group.as_deref()
    }

    fn is_active(&self, name: &str) -> bool {
        self.validation_group
            .as_ref()
            .is_none_or(|group| group.iter().any(|member| member == name))
    }

    // === Validation ===

    /// Validate every active child against the current payload
    ///
    /// All active children are evaluated, so one call yields the complete
    /// message report. Without an explicit `context`, the payload of this
    /// filter is used as the context of the whole subtree.
    pub fn is_valid(&mut self, context: Option<&Value>) -> bool {
        self.valid_inputs.clear();
        self.invalid.clear();

        let own_context;
        let context = match context {
            Some(context) => context,
            None => {
                own_context = Value::Object(self.data.clone());
                &own_context
            }
        };

        if tracing::enabled!(tracing::Level::DEBUG) && self.has_unknown() {
            let keys: Vec<String> = self.unknown().keys().cloned().collect();
            tracing::debug!(?keys, "payload carries unknown keys");
        }

        let group = self.validation_group.as_ref();
        for (name, child) in self.children.iter_mut() {
            if group.is_some_and(|group| !group.iter().any(|member| member == name)) {
                continue;
            }

            if child.is_valid(Some(context)) {
                self.valid_inputs.push(name.clone());
            } else {
                let messages = child
                    .message_tree()
                    .unwrap_or_else(|| MessageTree::Nested(IndexMap::new()));
                self.invalid.insert(name.clone(), messages);
            }
        }

        tracing::trace!(
            valid = self.valid_inputs.len(),
            invalid = self.invalid.len(),
            "input filter validated"
        );
        self.invalid.is_empty()
    }

    /// Names of the children that passed the last validation
    pub fn valid_inputs(&self) -> &[String] {
        &self.valid_inputs
    }

    /// Names of the children that failed the last validation
    pub fn invalid_inputs(&self) -> impl Iterator<Item = &str> {
        self.invalid.keys().map(String::as_str)
    }

    /// Messages of the failing children, keyed by child name
    pub fn messages(&self) -> &IndexMap<String, MessageTree> {
        &self.invalid
    }

    // === Values ===

    /// Filtered values of the active children
    pub fn values(&self) -> Map<String, Value> {
        self.children
            .iter()
            .filter(|(name, _)| self.is_active(name))
            .map(|(name, child)| (name.clone(), child.computed_value()))
            .collect()
    }

    /// Raw values of the active children
    pub fn raw_values(&self) -> Map<String, Value> {
        self.children
            .iter()
            .filter(|(name, _)| self.is_active(name))
            .map(|(name, child)| (name.clone(), child.computed_raw_value()))
            .collect()
    }

    /// Filtered value of one child; nested filters yield objects, collections arrays
    pub fn value(&self, name: &str) -> Result<Value> {
        self.children
            .get(name)
            .map(InputNode::computed_value)
            .ok_or_else(|| InputFilterError::UnknownInput(name.to_string()))
    }

    /// Raw value of one child
    pub fn raw_value(&self, name: &str) -> Result<Value> {
        self.children
            .get(name)
            .map(InputNode::computed_raw_value)
            .ok_or_else(|| InputFilterError::UnknownInput(name.to_string()))
    }

    /// Payload entries matching no child
    pub fn unknown(&self) -> Map<String, Value> {
        self.data
            .iter()
            .filter(|(key, _)| !self.children.contains_key(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn has_unknown(&self) -> bool {
        self.data.keys().any(|key| !self.children.contains_key(key))
    }

    // === Settings ===

    /// Switch every node of the tree to `settings`
    pub fn apply_settings(&mut self, settings: &Settings) -> &mut Self {
        for child in self.children.values_mut() {
            child.apply_settings(settings);
        }
        self
    }
}

impl InputNode for InputFilter {
    fn populate(&mut self, payload: Option<Value>) {
        let data = match payload {
            Some(Value::Object(map)) => map,
            None | Some(Value::Null) => Map::new(),
            Some(other) => {
                tracing::debug!(
                    actual = type_name(&other),
                    "nested input filter received a non-object value, treating it as empty"
                );
                Map::new()
            }
        };
        self.populate_map(data);
    }

    fn is_valid(&mut self, context: Option<&Value>) -> bool {
        InputFilter::is_valid(self, context)
    }

    fn computed_value(&self) -> Value {
        Value::Object(self.values())
    }

    fn computed_raw_value(&self) -> Value {
        Value::Object(self.raw_values())
    }

    fn message_tree(&self) -> Option<MessageTree> {
        (!self.invalid.is_empty()).then(|| MessageTree::Nested(self.invalid.clone()))
    }

    fn replicate(&self) -> Self {
        Self {
            children: self
                .children
                .iter()
                .map(|(name, child)| (name.clone(), child.replicate()))
                .collect(),
            data: Map::new(),
            validation_group: self.validation_group.clone(),
            valid_inputs: Vec::new(),
            invalid: IndexMap::new(),
        }
    }

    fn apply_settings(&mut self, settings: &Settings) {
        InputFilter::apply_settings(self, settings);
    }
}
