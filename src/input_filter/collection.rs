//! Collections: one template input filter replicated over an array payload

use super::{InputFilter, InputNode};
use crate::config::Settings;
use crate::core::error::{InputFilterError, Result};
use crate::core::messages::{MessageTree, Messages, violation};
use crate::core::value::type_name;
use crate::input::IS_EMPTY;
use serde_json::Value;
use std::collections::BTreeMap;

/// Message key of a strict collection whose payload length differs from its count
pub const COUNT_MISMATCH: &str = "countMismatch";

/// Input filter validating every element of an array payload
///
/// Each element gets its own deep copy of the template, so items never share
/// values or messages. The number of items is the configured count, or the
/// payload length when no count is configured. A count of zero accepts any
/// payload and passes it through unchanged.
#[derive(Debug, Clone)]
pub struct CollectionInputFilter {
    template: InputFilter,
    count: Option<usize>,
    required: bool,
    strict_count: Option<bool>,
    default_strict_count: bool,
    required_message: String,
    count_mismatch_message: String,
    validation_group: Option<Vec<String>>,
    data: Vec<Value>,
    items: Vec<InputFilter>,
    messages: Messages,
    collection_messages: BTreeMap<usize, MessageTree>,
}

impl CollectionInputFilter {
    pub fn new(template: InputFilter) -> Self {
        let settings = Settings::default();
        Self {
            template,
            count: None,
            required: false,
            strict_count: None,
            default_strict_count: settings.strict_collection_count,
            required_message: settings.required_message,
            count_mismatch_message: settings.count_mismatch_message,
            validation_group: None,
            data: Vec::new(),
            items: Vec::new(),
            messages: Messages::new(),
            collection_messages: BTreeMap::new(),
        }
    }

    // === Configuration ===

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self.rebuild_items();
        self
    }

    /// Set the expected number of items; negative counts are rejected
    pub fn set_count(&mut self, count: i64) -> Result<&mut Self> {
        let count = usize::try_from(count).map_err(|_| {
            tracing::warn!(count, "collection count must be non-negative");
            InputFilterError::InvalidCount(count)
        })?;
        self.count = Some(count);
        self.rebuild_items();
        Ok(self)
    }

    /// Derive the count from the payload length again
    pub fn clear_count(&mut self) -> &mut Self {
        self.count = None;
        self.rebuild_items();
        self
    }

    /// Explicitly configured count, if any
    pub fn configured_count(&self) -> Option<usize> {
        self.count
    }

    /// Number of items validated for the current payload
    pub fn count(&self) -> usize {
        self.count.unwrap_or(self.data.len())
    }

    /// A required collection rejects a payload without items
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Reject payloads whose length differs from the count
    ///
    /// An explicit choice outlives [`apply_settings`](Self::apply_settings);
    /// settings only decide for collections left unconfigured.
    pub fn with_strict_count(mut self, strict_count: bool) -> Self {
        self.strict_count = Some(strict_count);
        self
    }

    pub fn is_strict_count(&self) -> bool {
        self.strict_count.unwrap_or(self.default_strict_count)
    }

    pub fn template(&self) -> &InputFilter {
        &self.template
    }

    /// Template access; changes apply from the next payload on
    pub fn template_mut(&mut self) -> &mut InputFilter {
        &mut self.template
    }

    /// Restrict every item to the named template children
    pub fn set_validation_group<I, S>(&mut self, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if let Some(unknown) = names.iter().find(|name| !self.template.has(name)) {
            tracing::warn!(input = %unknown, "validation group references unknown input");
            return Err(InputFilterError::UnknownValidationGroupInput(
                unknown.clone(),
            ));
        }
        for item in &mut self.items {
            item.validation_group = Some(names.clone());
        }
        self.validation_group = Some(names);
        Ok(self)
    }

    pub fn clear_validation_group(&mut self) -> &mut Self {
        self.validation_group = None;
        for item in &mut self.items {
            item.validation_group = self.template.validation_group.clone();
        }
        self
    }

    // === Payload ===

    /// Set the payload to validate; it must be a JSON array
    pub fn set_data(&mut self, data: Value) -> Result<&mut Self> {
        match data {
            Value::Array(items) => {
                self.populate_items(items);
                Ok(self)
            }
            other => {
                let actual = type_name(&other);
                tracing::warn!(actual, "collection payload must be an array");
                Err(InputFilterError::InvalidPayload {
                    expected: "array",
                    actual,
                })
            }
        }
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Per-position copies of the template holding the current payload
    pub fn items(&self) -> &[InputFilter] {
        &self.items
    }

    fn populate_items(&mut self, data: Vec<Value>) {
        self.data = data;
        self.rebuild_items();
    }

    fn rebuild_items(&mut self) {
        self.messages.clear();
        self.collection_messages.clear();
        self.items = (0..self.count())
            .map(|index| {
                let mut item = self.template.replicate();
                if let Some(group) = &self.validation_group {
                    item.validation_group = Some(group.clone());
                }
                item.populate(self.data.get(index).cloned());
                item
            })
            .collect();
    }

    // === Validation ===

    /// Validate every item against its slice of the payload
    pub fn is_valid(&mut self, context: Option<&Value>) -> bool {
        self.messages.clear();
        self.collection_messages.clear();

        if self.required && self.data.is_empty() {
            self.messages = violation(IS_EMPTY, self.required_message.clone());
            return false;
        }

        let count = self.count();
        if count == 0 {
            return true;
        }

        if self.is_strict_count() && self.data.len() != count {
            tracing::debug!(
                expected = count,
                actual = self.data.len(),
                "collection count mismatch"
            );
            self.messages = violation(COUNT_MISMATCH, self.count_mismatch_message.clone());
            return false;
        }

        let mut valid = true;
        for (index, item) in self.items.iter_mut().enumerate() {
            if !item.is_valid(context) {
                valid = false;
                self.collection_messages
                    .insert(index, MessageTree::Nested(item.messages().clone()));
            }
        }
        valid
    }

    /// Collection-level messages (`isEmpty`, `countMismatch`)
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Messages of the failing items, keyed by position
    pub fn collection_messages(&self) -> &BTreeMap<usize, MessageTree> {
        &self.collection_messages
    }

    // === Values ===

    /// Filtered values of every item, in payload order
    pub fn values(&self) -> Vec<Value> {
        if self.count() == 0 {
            return self.data.clone();
        }
        self.items
            .iter()
            .map(|item| Value::Object(item.values()))
            .collect()
    }

    /// Raw values of every item, in payload order
    pub fn raw_values(&self) -> Vec<Value> {
        if self.count() == 0 {
            return self.data.clone();
        }
        self.items
            .iter()
            .map(|item| Value::Object(item.raw_values()))
            .collect()
    }

    // === Settings ===

    pub fn apply_settings(&mut self, settings: &Settings) -> &mut Self {
        self.required_message = settings.required_message.clone();
        self.count_mismatch_message = settings.count_mismatch_message.clone();
        self.default_strict_count = settings.strict_collection_count;
        self.template.apply_settings(settings);
        for item in &mut self.items {
            item.apply_settings(settings);
        }
        self
    }
}

impl InputNode for CollectionInputFilter {
    fn populate(&mut self, payload: Option<Value>) {
        let data = match payload {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                tracing::debug!(
                    actual = type_name(&other),
                    "collection received a non-array value, treating it as empty"
                );
                Vec::new()
            }
        };
        self.populate_items(data);
    }

    fn is_valid(&mut self, context: Option<&Value>) -> bool {
        CollectionInputFilter::is_valid(self, context)
    }

    fn computed_value(&self) -> Value {
        Value::Array(self.values())
    }

    fn computed_raw_value(&self) -> Value {
        Value::Array(self.raw_values())
    }

    fn message_tree(&self) -> Option<MessageTree> {
        if !self.messages.is_empty() {
            Some(MessageTree::Field(self.messages.clone()))
        } else if !self.collection_messages.is_empty() {
            Some(MessageTree::Items(self.collection_messages.clone()))
        } else {
            None
        }
    }

    fn replicate(&self) -> Self {
        let mut copy = Self {
            template: self.template.replicate(),
            data: Vec::new(),
            items: Vec::new(),
            messages: Messages::new(),
            collection_messages: BTreeMap::new(),
            validation_group: self.validation_group.clone(),
            required_message: self.required_message.clone(),
            count_mismatch_message: self.count_mismatch_message.clone(),
            ..*self
        };
        copy.rebuild_items();
        copy
    }

    fn apply_settings(&mut self, settings: &Settings) {
        CollectionInputFilter::apply_settings(self, settings);
    }
}
