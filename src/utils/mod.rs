use serde_json::Value;

/// Loose truthiness check applied to submitted form fields.
///
/// Missing, `null`, `false`, `0` and `""` all count as blank. Arrays and
/// objects are never blank.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Text form of a field as it is written to a text column.
///
/// Strings pass through untouched. Booleans are written as `1`/`0`, the way
/// MySQL stores a bound boolean. Whole numbers are written without a
/// fractional part (`1.0` is written as `"1"`), so a phone number sent as
/// `5550100` is stored as `"5550100"`. Arrays and objects are written as
/// JSON text.
pub fn field_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Bool(flag)) => Some(if *flag { "1" } else { "0" }.to_string()),
        Some(Value::Number(number)) => Some(number_text(number)),
        Some(other) => Some(other.to_string()),
    }
}

fn number_text(number: &serde_json::Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(n) if n.fract() == 0.0 && n.abs() < 1e21 => format!("{:.0}", n),
        Some(n) => n.to_string(),
        None => number.to_string(),
    }
}

/// Text of a field that must be present and non-blank.
pub fn required_text(value: Option<&Value>) -> Option<String> {
    if is_truthy(value) {
        field_text(value)
    } else {
        None
    }
}

/// Numeric form of a field. Numeric strings such as `"4"` are accepted;
/// anything else is stored as NULL.
pub fn field_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    }
}
