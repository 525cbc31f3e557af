//! Tests that the prelude exposes everything needed to build chains.

use pretty_assertions::assert_eq;
use serde_json::json;
use sift_validator::prelude::*;

#[test]
fn registration_form_chain() {
    let mut chain = ValidatorChain::new();
    chain.attach(NotEmpty::new(), true);
    chain.attach(StringLength::between(8, 64), false);
    chain.attach(
        Regex::new("[0-9]").unwrap().with_message(Regex::NOT_MATCH, "Needs a digit"),
        false,
    );

    assert!(chain.check(&json!("correct horse 1"), None).is_valid());

    let outcome = chain.check(&json!("short"), None);
    assert_eq!(
        outcome.into_messages().into_iter().collect::<Vec<_>>(),
        vec![
            (
                "stringLengthTooShort".to_owned(),
                "The input is less than 8 characters long".to_owned()
            ),
            ("regexNotMatch".to_owned(), "Needs a digit".to_owned()),
        ]
    );

    let outcome = chain.check(&json!(""), None);
    assert_eq!(outcome.messages().len(), 1);
    assert!(outcome.messages().contains_key(NotEmpty::IS_EMPTY));
}

#[test]
fn confirmation_uses_context() {
    let chain = ValidatorChain::new().with(Identical::field("password"));
    let data = json!({"password": "s3cret", "confirm": "s3cret"});

    assert!(chain.check(&json!("s3cret"), Some(&data)).is_valid());
    assert!(!chain.check(&json!("other"), Some(&data)).is_valid());
}

#[test]
fn translated_chain() {
    let catalog: Catalog = [(
        "The input was not found in the haystack".to_owned(),
        "Unbekannter Wert".to_owned(),
    )]
    .into_iter()
    .collect();

    let chain = ValidatorChain::new()
        .with(InArray::new([json!("red"), json!("green")]))
        .with_translator(catalog);

    let outcome = chain.check(&json!("blue"), None);
    assert_eq!(outcome.messages()[InArray::NOT_IN_ARRAY], "Unbekannter Wert");
}

#[test]
fn custom_callback_in_chain() {
    let chain = ValidatorChain::new().with(
        Callback::new(|v, _| v.as_str().is_some_and(|s| s.starts_with('+')))
            .with_message(Callback::INVALID, "Must start with +"),
    );

    assert_eq!(
        chain.check(&json!("123"), None).messages()[Callback::INVALID],
        "Must start with +"
    );
}
