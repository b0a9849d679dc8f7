use super::*;

#[test]
fn numbers_render_without_trailing_zero() {
    assert_eq!(Value::Number(45.0).to_string(), "45");
    assert_eq!(Value::Number(0.9).to_string(), "0.9");
    assert_eq!(Value::Number(-0.0).to_string(), "0");
    assert_eq!(Value::Number(-12.5).to_string(), "-12.5");
}

#[test]
fn number_prefix_ignores_units_and_rejects_garbage() {
    assert_eq!(parse_number_prefix("12px"), Some(12.0));
    assert_eq!(parse_number_prefix("  -3.5deg"), Some(-3.5));
    assert_eq!(parse_number_prefix("1e3"), Some(1000.0));
    assert_eq!(parse_number_prefix("2e"), Some(2.0));
    assert_eq!(parse_number_prefix(".5"), Some(0.5));
    assert_eq!(parse_number_prefix("abc"), None);
    assert_eq!(parse_number_prefix(""), None);
    assert_eq!(parse_number_prefix("-"), None);
}

#[test]
fn text_values_read_as_numbers_when_numeric() {
    assert_eq!(Value::from("90").as_number(), Some(90.0));
    assert_eq!(Value::from("red").as_number(), None);
    assert_eq!(Value::Bool(true).as_number(), None);
}

#[test]
fn style_flags_parse_and_display() {
    let styles = TextStyles::from_flags("bold, uppercase,unknown");
    assert!(styles.bold);
    assert!(styles.uppercase);
    assert!(!styles.italic);
    assert_eq!(Value::from(styles).to_string(), "bold,uppercase");
}

#[test]
fn untagged_json_maps_to_variants() {
    let v: Value = serde_json::from_str("90").unwrap();
    assert_eq!(v, Value::Number(90.0));
    let v: Value = serde_json::from_str("\"#fff\"").unwrap();
    assert_eq!(v, Value::from("#fff"));
    let v: Value = serde_json::from_str(r#"{"bold":true}"#).unwrap();
    assert_eq!(
        v,
        Value::Styles(TextStyles {
            bold: true,
            ..TextStyles::default()
        })
    );
}
