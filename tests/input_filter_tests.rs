//! End-to-end behaviour of input filter trees:
//! 1. Empty-value policy (required / allow-empty / continue-if-empty)
//! 2. Break-on-failure chains
//! 3. Nesting, unknown keys and context propagation
//! 4. Idempotent re-validation

use inputfilter::prelude::*;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Validator counting its invocations and always passing
fn spy(
    calls: Arc<AtomicUsize>,
) -> impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync {
    move |_: &Value, _: Option<&Value>| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

mod empty_value_policy_tests {
    use super::*;

    #[test]
    fn test_required_missing_value_reports_only_is_empty() {
        init_tracing();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut filter =
            InputFilter::new().with_input(Input::new("foo").with_validator(spy(calls.clone())));

        filter.set_data(json!({})).expect("object payload");

        assert!(!filter.is_valid(None));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let messages = filter.messages()["foo"].as_field().expect("leaf messages");
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages.get("isEmpty").map(String::as_str),
            Some("Value is required and can't be empty")
        );
    }

    #[test]
    fn test_optional_absent_value_skips_chain() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut filter = InputFilter::new().with_input(
            Input::new("foo")
                .with_required(false)
                .with_validator(spy(calls.clone())),
        );

        filter.set_data(json!({})).expect("object payload");

        assert!(filter.is_valid(None));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_continue_if_empty_hands_empty_string_to_chain() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut filter = InputFilter::new().with_input(
            Input::new("foo")
                .with_required(false)
                .with_continue_if_empty(true)
                .with_validator(move |value: &Value, _: Option<&Value>| {
                    sink.lock().expect("lock").push(value.clone());
                    Ok::<(), Messages>(())
                }),
        );

        filter.set_data(json!({"foo": ""})).expect("object payload");

        assert!(filter.is_valid(None));
        assert_eq!(*seen.lock().expect("lock"), vec![json!("")]);
    }

    #[test]
    fn test_fallback_bypasses_validation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut filter = InputFilter::new().with_input(
            Input::new("limit")
                .with_fallback(json!(25))
                .with_validator(spy(calls.clone())),
        );

        filter.set_data(json!({})).expect("object payload");

        assert!(filter.is_valid(None));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(filter.value("limit").expect("known input"), json!(25));
    }
}

mod chain_tests {
    use super::*;

    #[test]
    fn test_breaking_validator_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut filter = InputFilter::new().with_input(
            Input::new("age")
                .with_breaking_validator(validators::is_string())
                .with_validator(spy(calls.clone())),
        );

        filter.set_data(json!({"age": 12})).expect("object payload");

        assert!(!filter.is_valid(None));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let messages = filter.messages()["age"].as_field().expect("leaf messages");
        assert_eq!(
            messages.keys().collect::<Vec<_>>(),
            vec![validators::NOT_STRING]
        );
    }

    #[test]
    fn test_username_trim_and_min_length() {
        let mut filter = InputFilter::new().with_input(
            Input::new("username")
                .with_filter(filters::trim())
                .with_validator(validators::min_length(3)),
        );

        filter.set_data(json!({"username": "  ab  "})).expect("object payload");
        assert!(!filter.is_valid(None));
        assert_eq!(filter.value("username").expect("known input"), json!("ab"));
        assert!(
            filter.messages()["username"]
                .as_field()
                .is_some_and(|m| m.contains_key(validators::STRING_LENGTH_TOO_SHORT))
        );

        filter.set_data(json!({"username": "  abcd "})).expect("object payload");
        assert!(filter.is_valid(None));
        assert_eq!(filter.value("username").expect("known input"), json!("abcd"));
        assert_eq!(filter.raw_value("username").expect("known input"), json!("  abcd "));
    }
}

mod tree_tests {
    use super::*;

    #[test]
    fn test_nested_filter_value_is_a_mapping() {
        let mut filter = InputFilter::new().with(
            "people",
            InputFilter::new().with_input(Input::new("name")),
        );

        filter
            .set_data(json!({"people": {"name": "Wanderson"}}))
            .expect("object payload");

        assert!(filter.is_valid(None));
        let people = filter.value("people").expect("known input");
        assert!(people.is_object());
        assert_eq!(people, json!({"name": "Wanderson"}));
    }

    #[test]
    fn test_nested_messages_mirror_payload_shape() {
        let zip = Input::new("zip")
            .with_validator(validators::regex(r"^\d{5}$").expect("pattern"));
        let mut filter = InputFilter::new()
            .with_input(Input::new("title"))
            .with(
                "address",
                InputFilter::new()
                    .with_input(Input::new("city"))
                    .with_input(zip),
            );

        filter
            .set_data(json!({"title": "Home", "address": {"zip": "12a"}}))
            .expect("object payload");

        assert!(!filter.is_valid(None));
        let tree = MessageTree::Nested(filter.messages().clone());
        let flat = tree.flatten();
        assert_eq!(
            flat.keys().collect::<Vec<_>>(),
            vec!["address.city", "address.zip"]
        );
        assert!(tree.to_json()["address"]["zip"]["regexNotMatch"].is_string());
    }

    #[test]
    fn test_unknown_keys_never_fail_validation() {
        let mut filter = InputFilter::new().with_input(Input::new("name"));

        filter
            .set_data(json!({"name": "x", "extra": 1, "other": {"deep": true}}))
            .expect("object payload");

        assert!(filter.is_valid(None));
        assert_eq!(
            Value::Object(filter.unknown()),
            json!({"extra": 1, "other": {"deep": true}})
        );
        assert_eq!(Value::Object(filter.values()), json!({"name": "x"}));
    }

    #[test]
    fn test_explicit_context_reaches_every_depth() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let recorder = move |_: &Value, context: Option<&Value>| {
            sink.lock().expect("lock").push(context.cloned());
            Ok::<(), Messages>(())
        };

        let mut filter = InputFilter::new()
            .with_input(Input::new("top").with_validator(recorder.clone()))
            .with(
                "nested",
                InputFilter::new().with_input(Input::new("inner").with_validator(recorder)),
            );

        filter
            .set_data(json!({"top": 1, "nested": {"inner": 2}}))
            .expect("object payload");
        let context = json!({"tenant": "acme"});

        assert!(filter.is_valid(Some(&context)));
        assert_eq!(
            *seen.lock().expect("lock"),
            vec![Some(context.clone()), Some(context)]
        );
    }

    #[test]
    fn test_array_input_inside_filter() {
        let mut filter = InputFilter::new().with(
            "tags",
            ArrayInput::from(
                Input::new("tags")
                    .with_filter(filters::lowercase())
                    .with_validator(validators::in_list(vec!["rust".into(), "go".into()])),
            ),
        );

        filter.set_data(json!({"tags": ["Rust", "GO"]})).expect("object payload");
        assert!(filter.is_valid(None));
        assert_eq!(filter.value("tags").expect("known input"), json!(["rust", "go"]));

        filter.set_data(json!({"tags": ["Rust", "cobol"]})).expect("object payload");
        assert!(!filter.is_valid(None));
    }
}

mod idempotence_tests {
    use super::*;

    #[test]
    fn test_same_payload_twice_gives_same_report() {
        let mut filter = InputFilter::new()
            .with_input(Input::new("name").with_validator(validators::min_length(3)))
            .with_input(Input::new("email"))
            .with(
                "items",
                CollectionInputFilter::new(
                    InputFilter::new()
                        .with_input(Input::new("sku").with_validator(validators::is_string())),
                ),
            );
        let payload = json!({"name": "al", "items": [{"sku": 1}, {"sku": "A1"}]});

        filter.set_data(payload.clone()).expect("object payload");
        let first_valid = filter.is_valid(None);
        let first_messages = filter.messages().clone();

        filter.set_data(payload).expect("object payload");
        let second_valid = filter.is_valid(None);

        assert!(!first_valid);
        assert_eq!(first_valid, second_valid);
        assert_eq!(&first_messages, filter.messages());
    }

    #[test]
    fn test_validating_twice_without_new_data_is_stable() {
        let mut filter = InputFilter::new().with_input(
            Input::new("n")
                .with_filter(filters::to_int())
                .with_validator(validators::positive()),
        );
        filter.set_data(json!({"n": "-3"})).expect("object payload");

        assert!(!filter.is_valid(None));
        assert!(!filter.is_valid(None));
        assert_eq!(filter.value("n").expect("known input"), json!(-3));
    }
}
