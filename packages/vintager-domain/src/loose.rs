//! Boundary parsing for loosely typed store payloads.
//!
//! The hosted store returns numeric columns either as JSON numbers or as strings depending on the
//! column type and client. These helpers collapse every shape into a strict optional value so the
//! engine never has to care where a value came from.

use serde_json::Value;

/// A finite number, from either a JSON number or a string that parses to one.
pub fn number(value: &Value) -> Option<f64> {
	let parsed = match value {
		Value::Number(number) => number.as_f64(),
		Value::String(raw) => {
			let trimmed = raw.trim();

			if trimmed.is_empty() { None } else { trimmed.parse::<f64>().ok() }
		},
		_ => None,
	};

	parsed.filter(|number| number.is_finite())
}

/// A whole number that fits `i64`. Fractional values are missing, not truncated.
pub fn integer(value: &Value) -> Option<i64> {
	if let Some(int) = value.as_i64() {
		return Some(int);
	}

	number(value)
		.filter(|number| number.fract() == 0.0)
		.filter(|number| *number >= i64::MIN as f64 && *number <= i64::MAX as f64)
		.map(|number| number as i64)
}

pub fn year(value: &Value) -> Option<i32> {
	integer(value).and_then(|year| i32::try_from(year).ok())
}

/// Non-blank text. Numbers are rendered with their JSON spelling.
pub fn text(value: &Value) -> Option<String> {
	match value {
		Value::String(raw) if !raw.trim().is_empty() => Some(raw.clone()),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}
