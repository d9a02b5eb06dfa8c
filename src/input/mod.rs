//! Leaf inputs
//!
//! An [`Input`] binds one named value to a [`FilterChain`] and a
//! [`ValidatorChain`], together with its required / allow-empty /
//! continue-if-empty policy and an optional fallback value.
//!
//! # Validation order
//!
//! 1. A missing value with a fallback takes the fallback and is valid.
//! 2. Validators (and the emptiness check) see the *filtered* value.
//! 3. An empty value skips the validators unless `continue_if_empty` is set:
//!    it is valid when the input is optional or allows empty values, and fails
//!    with the `isEmpty` message otherwise.
//! 4. The validator chain decides; a failure with a fallback still passes.

pub mod array;

pub use array::ArrayInput;

use crate::chain::{Filter, FilterChain, Validator, ValidatorChain};
use crate::config::Settings;
use crate::core::messages::{MessageTree, Messages, violation};
use crate::core::value::is_empty_value;
use crate::input_filter::InputNode;
use serde_json::Value;
use std::cell::OnceCell;

/// Message key of a missing or empty required value
pub const IS_EMPTY: &str = "isEmpty";

/// Message key used when an input carries a custom error message
pub const ERROR: &str = "error";

/// Message key of an array input receiving a non-array value
pub const NOT_ARRAY: &str = "notArray";

/// What the empty-value policy decided for the current value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmptyOutcome {
    /// Empty and allowed: valid without running validators
    Skip,
    /// Empty and required: invalid without running validators
    Missing,
    /// Run the validator chain
    Run,
}

/// A named leaf value with its filters, validators and empty-value policy
#[derive(Debug, Clone)]
pub struct Input {
    name: String,
    required: bool,
    allow_empty: bool,
    continue_if_empty: bool,
    fallback: Option<Value>,
    error_message: Option<String>,
    required_message: String,
    not_array_message: String,
    each_element: bool,
    filters: FilterChain,
    validators: ValidatorChain,
    raw: Option<Value>,
    filtered: OnceCell<Option<Value>>,
    messages: Messages,
}

impl Input {
    /// Create a required input with empty chains
    pub fn new(name: impl Into<String>) -> Self {
        let settings = Settings::default();
        Self {
            name: name.into(),
            required: true,
            allow_empty: false,
            continue_if_empty: false,
            fallback: None,
            error_message: None,
            required_message: settings.required_message,
            not_array_message: settings.not_array_message,
            each_element: false,
            filters: FilterChain::new(),
            validators: ValidatorChain::new(),
            raw: None,
            filtered: OnceCell::new(),
            messages: Messages::new(),
        }
    }

    // === Builder ===

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    pub fn with_continue_if_empty(mut self, continue_if_empty: bool) -> Self {
        self.continue_if_empty = continue_if_empty;
        self
    }

    /// Value used when the payload lacks this input or the input fails
    pub fn with_fallback(mut self, fallback: Value) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Single message reported instead of the validators' own messages
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.attach(filter);
        self
    }

    pub fn with_validator<V>(mut self, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.validators.attach(validator, false);
        self
    }

    /// Attach a validator that stops the chain when it fails
    pub fn with_breaking_validator<V>(mut self, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.validators.attach(validator, true);
        self
    }

    pub fn with_filter_chain(mut self, chain: FilterChain) -> Self {
        self.filters = chain;
        self
    }

    pub fn with_validator_chain(mut self, chain: ValidatorChain) -> Self {
        self.validators = chain;
        self
    }

    // === Configuration accessors ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Whether empty values pass; optional inputs always accept them
    pub fn allows_empty(&self) -> bool {
        self.allow_empty || !self.required
    }

    pub fn set_allow_empty(&mut self, allow_empty: bool) -> &mut Self {
        self.allow_empty = allow_empty;
        self
    }

    pub fn continues_if_empty(&self) -> bool {
        self.continue_if_empty
    }

    pub fn set_continue_if_empty(&mut self, continue_if_empty: bool) -> &mut Self {
        self.continue_if_empty = continue_if_empty;
        self
    }

    pub fn fallback_value(&self) -> Option<&Value> {
        self.fallback.as_ref()
    }

    pub fn set_fallback_value(&mut self, fallback: Option<Value>) -> &mut Self {
        self.fallback = fallback;
        self
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn filter_chain(&self) -> &FilterChain {
        &self.filters
    }

    pub fn filter_chain_mut(&mut self) -> &mut FilterChain {
        &mut self.filters
    }

    pub fn validator_chain(&self) -> &ValidatorChain {
        &self.validators
    }

    pub fn validator_chain_mut(&mut self) -> &mut ValidatorChain {
        &mut self.validators
    }

    // === Value state ===

    /// Store a raw value and drop the memoized filtered value
    pub fn set_value(&mut self, value: Value) -> &mut Self {
        self.raw = Some(value);
        self.filtered = OnceCell::new();
        self
    }

    /// Make the value absent
    pub fn clear_value(&mut self) -> &mut Self {
        self.raw = None;
        self.filtered = OnceCell::new();
        self
    }

    /// `true` when a raw value (possibly `null`) was supplied
    pub fn has_value(&self) -> bool {
        self.raw.is_some()
    }

    pub fn raw_value(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    /// Filtered value, computed once per raw value
    ///
    /// Array inputs filter every element of an array value; a non-array value
    /// is handed back unfiltered.
    pub fn value(&self) -> Option<&Value> {
        self.filtered
            .get_or_init(|| {
                self.raw.as_ref().map(|raw| match raw {
                    Value::Array(items) if self.each_element => Value::Array(
                        items
                            .iter()
                            .map(|item| self.filters.filter(item.clone()))
                            .collect(),
                    ),
                    _ if self.each_element => raw.clone(),
                    _ => self.filters.filter(raw.clone()),
                })
            })
            .as_ref()
    }

    /// Messages of the last [`is_valid`](Self::is_valid) call
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    // === Validation ===

    /// Validate the current value against the policy and the validator chain
    pub fn is_valid(&mut self, context: Option<&Value>) -> bool {
        self.messages.clear();
        self.validators.clear_messages();

        if self.raw.is_none() {
            if let Some(fallback) = self.fallback.clone() {
                tracing::debug!(input = %self.name, "missing value replaced by fallback");
                self.set_value(fallback);
                return true;
            }
        }

        let value = self.value().cloned();
        let valid = match self.empty_outcome(is_empty_value(value.as_ref())) {
            EmptyOutcome::Skip => true,
            EmptyOutcome::Missing => {
                self.messages = violation(IS_EMPTY, self.required_message.clone());
                false
            }
            EmptyOutcome::Run if self.each_element => self.run_each(value, context),
            EmptyOutcome::Run => {
                let value = value.unwrap_or(Value::Null);
                let valid = self.validators.is_valid(&value, context);
                if !valid {
                    self.messages = self.validators.messages().clone();
                }
                valid
            }
        };

        if valid {
            return true;
        }

        if let Some(fallback) = self.fallback.clone() {
            tracing::debug!(input = %self.name, "invalid value replaced by fallback");
            self.set_value(fallback);
            self.messages.clear();
            return true;
        }

        if let Some(message) = &self.error_message {
            self.messages = violation(ERROR, message.clone());
        }

        false
    }

    fn empty_outcome(&self, empty: bool) -> EmptyOutcome {
        if !empty || self.continue_if_empty {
            EmptyOutcome::Run
        } else if self.allows_empty() {
            EmptyOutcome::Skip
        } else {
            EmptyOutcome::Missing
        }
    }

    // Array inputs: every element goes through the chain; the first failing
    // element ends the pass.
    fn run_each(&mut self, value: Option<Value>, context: Option<&Value>) -> bool {
        let items = match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.messages = violation(NOT_ARRAY, self.not_array_message.clone());
                return false;
            }
        };

        for item in &items {
            if !self.validators.is_valid(item, context) {
                self.messages = self.validators.messages().clone();
                return false;
            }
        }
        true
    }

    pub(crate) fn set_each_element(&mut self, each_element: bool) {
        self.each_element = each_element;
        self.filtered = OnceCell::new();
    }
}

impl InputNode for Input {
    fn populate(&mut self, payload: Option<Value>) {
        self.messages.clear();
        match payload {
            Some(value) => self.set_value(value),
            None => self.clear_value(),
        };
    }

    fn is_valid(&mut self, context: Option<&Value>) -> bool {
        Input::is_valid(self, context)
    }

    fn computed_value(&self) -> Value {
        self.value().cloned().unwrap_or(Value::Null)
    }

    fn computed_raw_value(&self) -> Value {
        self.raw.clone().unwrap_or(Value::Null)
    }

    fn message_tree(&self) -> Option<MessageTree> {
        (!self.messages.is_empty()).then(|| MessageTree::Field(self.messages.clone()))
    }

    fn replicate(&self) -> Self {
        let mut copy = self.clone();
        copy.populate(None);
        copy.validators.clear_messages();
        copy
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.required_message = settings.required_message.clone();
        self.not_array_message = settings.not_array_message.clone();
    }
}
