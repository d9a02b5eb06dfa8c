//! Ordered pipeline of validators with break-on-failure semantics

use super::filter_chain::DEFAULT_PRIORITY;
use crate::core::messages::Messages;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A pass/fail check on a value
///
/// `context` is the read-only auxiliary value forwarded by the input tree
/// (by default the payload of the input filter being validated). On failure
/// the validator returns its messages keyed by message key.
///
/// Any `Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync`
/// closure is a validator.
pub trait Validator: Send + Sync {
    fn validate(&self, value: &Value, context: Option<&Value>) -> Result<(), Messages>;
}

impl<F> Validator for F
where
    F: Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync,
{
    fn validate(&self, value: &Value, context: Option<&Value>) -> Result<(), Messages> {
        self(value, context)
    }
}

#[derive(Clone)]
struct ValidatorEntry {
    priority: i32,
    break_on_failure: bool,
    validator: Arc<dyn Validator>,
}

/// Ordered sequence of validators
///
/// Every entry runs until one marked `break_on_failure` fails. Messages of all
/// failing entries evaluated during the last [`is_valid`](Self::is_valid) call
/// are kept, in evaluation order.
#[derive(Clone, Default)]
pub struct ValidatorChain {
    entries: Vec<ValidatorEntry>,
    messages: Messages,
}

impl ValidatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator with the default priority
    pub fn attach<V>(&mut self, validator: V, break_on_failure: bool) -> &mut Self
    where
        V: Validator + 'static,
    {
        self.attach_with_priority(validator, break_on_failure, DEFAULT_PRIORITY)
    }

    /// Insert a validator at the given priority (higher runs first)
    pub fn attach_with_priority<V>(
        &mut self,
        validator: V,
        break_on_failure: bool,
        priority: i32,
    ) -> &mut Self
    where
        V: Validator + 'static,
    {
        self.insert(ValidatorEntry {
            priority,
            break_on_failure,
            validator: Arc::new(validator),
        });
        self
    }

    /// Insert a validator ahead of every current entry
    pub fn prepend<V>(&mut self, validator: V, break_on_failure: bool) -> &mut Self
    where
        V: Validator + 'static,
    {
        let priority = self
            .entries
            .first()
            .map_or(DEFAULT_PRIORITY, |first| first.priority.max(DEFAULT_PRIORITY));
        self.entries.insert(
            0,
            ValidatorEntry {
                priority,
                break_on_failure,
                validator: Arc::new(validator),
            },
        );
        self
    }

    /// Append every entry of `other`, keeping priorities and break flags
    pub fn merge(&mut self, other: &ValidatorChain) -> &mut Self {
        for entry in &other.entries {
            self.insert(entry.clone());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate `value`, resetting the messages of the previous call first
    pub fn is_valid(&mut self, value: &Value, context: Option<&Value>) -> bool {
        self.messages.clear();
        let mut valid = true;

        for entry in &self.entries {
            if let Err(messages) = entry.validator.validate(value, context) {
                valid = false;
                self.messages.extend(messages);
                if entry.break_on_failure {
                    break;
                }
            }
        }

        valid
    }

    /// Messages of the most recent [`is_valid`](Self::is_valid) call
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Forget the messages of the last call
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    fn insert(&mut self, entry: ValidatorEntry) {
        let position = self
            .entries
            .iter()
            .position(|existing| existing.priority < entry.priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(position, entry);
    }
}

impl fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("len", &self.entries.len())
            .field("messages", &self.messages)
            .finish()
    }
}
