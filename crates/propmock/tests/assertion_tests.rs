/// Assertion tests: `to_have_props`, `to_have_prop`, `to_have_prop_value`,
/// `to_have_prop_entry` and their failure messages.
use propmock::{AssertionError, HarnessError, MockRegistry};
use propmock_core::{matchers, Mapping, SafeValue, Value};

fn registry_with_button() -> (MockRegistry, Value) {
    let on_click = Value::function("handleClick", |_| Value::Undefined);
    let mut registry = MockRegistry::new();
    registry.record(
        "button",
        Mapping::new()
            .with("label", "Save")
            .with("size", 2)
            .with("tags", Value::sequence(["primary", "wide"]))
            .with("onClick", on_click.clone()),
    );
    (registry, on_click)
}

// ============================================================================
// to_have_props
// ============================================================================

#[test]
fn to_have_props_passes_on_equal_props_in_any_order() {
    let (registry, on_click) = registry_with_button();
    let expected = Mapping::new()
        .with("onClick", on_click)
        .with("tags", Value::sequence(["primary", "wide"]))
        .with("size", 2)
        .with("label", "Save");
    registry.expect("button").to_have_props(Some(&expected)).unwrap();
}

#[test]
fn to_have_props_accepts_matchers() {
    let (registry, _) = registry_with_button();
    let expected = Mapping::new()
        .with("label", matchers::string_containing("Sa"))
        .with("size", matchers::any_number())
        .with("tags", matchers::array_containing(vec!["wide".into()]))
        .with("onClick", matchers::any_function());
    registry.expect("button").to_have_props(Some(&expected)).unwrap();
}

#[test]
fn to_have_props_without_expected_only_requires_props() {
    let (mut registry, _) = registry_with_button();
    registry.expect("button").to_have_props(None).unwrap();

    registry.record("bare", Mapping::new());
    let err = registry.expect("bare").to_have_props(None).unwrap_err();
    assert!(matches!(err, AssertionError::Harness(HarnessError::NoProps(_))));
    assert_eq!(
        err.to_string(),
        "Expected element to have mock props, but Props not found for element with testId: bare"
    );
}

#[test]
fn to_have_props_fails_with_diff() {
    let (registry, on_click) = registry_with_button();
    let expected = Mapping::new()
        .with("label", "Cancel")
        .with("size", 2)
        .with("tags", Value::sequence(["primary", "wide"]))
        .with("onClick", on_click);
    let err = registry.expect("button").to_have_props(Some(&expected)).unwrap_err();
    let AssertionError::Mismatch(diff) = &err else {
        panic!("expected a mismatch, got {err:?}");
    };
    assert_eq!(diff.message, "Expected props to match");
    assert_eq!(diff.actual.get("label"), Some(&SafeValue::String("Save".into())));
    assert_eq!(diff.expected.get("label"), Some(&SafeValue::String("Cancel".into())));

    let text = err.to_string();
    assert!(text.starts_with("Expected props to match\n\nExpected:\n"));
    assert!(text.contains("\"label\": \"Cancel\""));
    assert!(text.contains("\"label\": \"Save\""));
    assert!(text.contains("[Function: handleClick]"));
}

#[test]
fn to_have_props_distinguishes_function_references() {
    let (registry, _) = registry_with_button();
    let expected = Mapping::new()
        .with("label", "Save")
        .with("size", 2)
        .with("tags", Value::sequence(["primary", "wide"]))
        .with("onClick", Value::function("handleClick", |_| Value::Undefined));
    assert!(registry.expect("button").to_have_props(Some(&expected)).is_err());
}

#[test]
fn to_have_props_fails_on_extra_expected_key() {
    let (registry, on_click) = registry_with_button();
    let expected = Mapping::new()
        .with("label", "Save")
        .with("size", 2)
        .with("tags", Value::sequence(["primary", "wide"]))
        .with("onClick", on_click)
        .with("variant", "ghost");
    assert!(matches!(
        registry.expect("button").to_have_props(Some(&expected)),
        Err(AssertionError::Mismatch(_))
    ));
}

#[test]
fn to_have_props_ignores_children() {
    let mut registry = MockRegistry::new();
    registry.record(
        "card",
        Mapping::new()
            .with("title", "Hi")
            .with("children", Value::element("span")),
    );
    let expect = registry.expect("card");
    expect
        .to_have_props(Some(&Mapping::new().with("title", "Hi")))
        .unwrap();
    expect.not_to_have_prop("children").unwrap();
    let err = expect.to_have_prop("children").unwrap_err();
    assert!(err.to_string().ends_with("Available props: title"));
}

#[test]
fn children_only_mock_has_no_props_to_assert_on() {
    let mut registry = MockRegistry::new();
    registry.record("wrapper", Mapping::new().with("children", "text"));
    let err = registry.expect("wrapper").to_have_props(None).unwrap_err();
    assert!(matches!(err, AssertionError::Harness(HarnessError::NoProps(_))));
}

#[test]
fn diff_shows_props_as_compared() {
    let mut registry = MockRegistry::new();
    let user = Mapping::new().with("name", "Ada");
    registry.record("profile", Mapping::new().with("user", user.clone()));
    user.insert("name", "Grace");

    let expected = Mapping::new().with("user", Mapping::new().with("name", "Ada"));
    let err = registry
        .expect("profile")
        .to_have_props(Some(&expected))
        .unwrap_err();
    let AssertionError::Mismatch(diff) = err else {
        panic!("expected a mismatch");
    };
    assert_eq!(
        diff.actual.get("user").and_then(|u| u.get("name")),
        Some(&SafeValue::String("Grace".into()))
    );

    let err = registry
        .expect("profile")
        .to_have_prop_value("user", &Mapping::new().with("name", "Ada").into())
        .unwrap_err();
    let AssertionError::Mismatch(diff) = err else {
        panic!("expected a mismatch");
    };
    assert_eq!(diff.actual.get("name"), Some(&SafeValue::String("Grace".into())));
}

#[test]
fn to_have_props_on_unknown_mock() {
    let registry = MockRegistry::new();
    let err = registry.expect("nope").to_have_props(None).unwrap_err();
    assert!(matches!(err, AssertionError::Harness(HarnessError::NotFound(_))));
}

// ============================================================================
// to_have_prop / not_to_have_prop
// ============================================================================

#[test]
fn to_have_prop_checks_key_presence() {
    let (registry, _) = registry_with_button();
    registry.expect("button").to_have_prop("label").unwrap();
    let err = registry.expect("button").to_have_prop("variant").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected element to have prop \"variant\", but it doesn't. Available props: label, size, tags, onClick"
    );
}

#[test]
fn not_to_have_prop_rejects_present_key() {
    let (mut registry, _) = registry_with_button();
    registry.expect("button").not_to_have_prop("variant").unwrap();
    let err = registry.expect("button").not_to_have_prop("label").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected element not to have prop \"label\", but it does"
    );

    registry.record("bare", Mapping::new());
    registry.expect("bare").not_to_have_prop("label").unwrap();
}

// ============================================================================
// to_have_prop_value / to_have_prop_entry
// ============================================================================

#[test]
fn to_have_prop_value_compares_structurally() {
    let (registry, on_click) = registry_with_button();
    let expect = registry.expect("button");
    expect.to_have_prop_value("label", &"Save".into()).unwrap();
    expect
        .to_have_prop_value("tags", &Value::sequence(["primary", "wide"]))
        .unwrap();
    expect.to_have_prop_value("onClick", &on_click).unwrap();
    expect
        .to_have_prop_value("size", &matchers::close_to(2.0, 3).into())
        .unwrap();
}

#[test]
fn to_have_prop_value_reports_the_single_prop() {
    let (registry, _) = registry_with_button();
    let err = registry
        .expect("button")
        .to_have_prop_value("size", &Value::from(3))
        .unwrap_err();
    let AssertionError::Mismatch(diff) = err else {
        panic!("expected a mismatch");
    };
    assert_eq!(diff.message, "Expected element to have prop \"size\" with correct value");
    assert_eq!(diff.actual, SafeValue::Number(2.0));
    assert_eq!(diff.expected, SafeValue::Number(3.0));
}

#[test]
fn to_have_prop_value_on_missing_key_lists_available_props() {
    let (registry, _) = registry_with_button();
    let err = registry
        .expect("button")
        .to_have_prop_value("variant", &"ghost".into())
        .unwrap_err();
    assert!(matches!(err, AssertionError::MissingProp { ref key, .. } if key == "variant"));
}

#[test]
fn to_have_prop_entry_uses_the_single_pair() {
    let (registry, _) = registry_with_button();
    let expect = registry.expect("button");
    expect
        .to_have_prop_entry(&Mapping::new().with("label", "Save"))
        .unwrap();
    assert!(matches!(
        expect.to_have_prop_entry(&Mapping::new().with("label", "Nope")),
        Err(AssertionError::Mismatch(_))
    ));
}

#[test]
fn to_have_prop_entry_requires_exactly_one_pair() {
    let (registry, _) = registry_with_button();
    let expect = registry.expect("button");
    let err = expect.to_have_prop_entry(&Mapping::new()).unwrap_err();
    assert!(matches!(err, AssertionError::EntryCount(0)));
    let two = Mapping::new().with("label", "Save").with("size", 2);
    assert!(matches!(
        expect.to_have_prop_entry(&two),
        Err(AssertionError::EntryCount(2))
    ));
}

#[test]
fn missing_prop_on_mock_without_keys_says_none() {
    let mut registry = MockRegistry::new();
    registry.record("one", Mapping::new().with("only", 1));
    let props = registry.original_props("one").unwrap().clone();
    props.remove("only");
    let err = registry.expect("one").to_have_prop("x").unwrap_err();
    assert!(err.to_string().ends_with("Available props: none"));
}
