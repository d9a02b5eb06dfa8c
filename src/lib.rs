//! # inputfilter-rs
//!
//! Filtering and validation engine for nested payloads (form submissions, API
//! bodies) described as a tree of inputs.
//!
//! ## Features
//!
//! - **Inputs**: one named value, a filter chain, a validator chain and a
//!   required / allow-empty / continue-if-empty policy
//! - **Input filters**: named children validated together, nested to any depth
//! - **Collections**: a template input filter replicated over an array payload
//! - **Break-on-failure chains**: structural checks guard expensive ones
//! - **Complete reports**: one `is_valid` call yields every message of the tree
//! - **Settings**: reserved message texts and strict counting loaded from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use inputfilter::prelude::*;
//! use serde_json::json;
//!
//! let mut filter = InputFilter::new()
//!     .with_input(
//!         Input::new("username")
//!             .with_filter(filters::trim())
//!             .with_validator(validators::min_length(3)),
//!     )
//!     .with(
//!         "people",
//!         CollectionInputFilter::new(
//!             InputFilter::new().with_input(Input::new("name")),
//!         ),
//!     );
//!
//! filter.set_data(json!({
//!     "username": "  alice ",
//!     "people": [{"name": "Bob"}, {"name": ""}]
//! }))?;
//!
//! assert!(!filter.is_valid(None));
//! // {"people": {"1": {"name": {"isEmpty": "Value is required and can't be empty"}}}}
//! println!("{}", MessageTree::Nested(filter.messages().clone()).to_json());
//! ```

pub mod chain;
pub mod config;
pub mod core;
pub mod input;
pub mod input_filter;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Chains ===
    pub use crate::chain::{DEFAULT_PRIORITY, Filter, FilterChain, Validator, ValidatorChain};

    // === Nodes ===
    pub use crate::input::{ArrayInput, Input};
    pub use crate::input_filter::{CollectionInputFilter, InputFilter, InputNode, Node};

    // === Results ===
    pub use crate::core::{
        InputFilterError, MessageTree, Messages, Result, is_empty_value, violation,
    };

    // === Ready-made steps ===
    pub use crate::core::validation::{filters, validators};

    #[cfg(feature = "axum")]
    pub use crate::core::validation::{ProvidesInputFilter, Validated};

    // === Config ===
    pub use crate::config::Settings;
}
