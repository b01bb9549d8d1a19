use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::sort::SortKey;

/// User-selected filter and sort state. `Default` is the "clear all" state.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FilterCriteria {
	pub query: String,
	pub categories: BTreeSet<String>,
	pub subcategories: BTreeSet<String>,
	pub tags: BTreeSet<String>,
	pub tag_mode: MatchMode,
	pub year: NumericRange,
	pub price: NumericRange,
	pub sort: SortKey,
	/// Controls which actions the presentation layer offers. Never affects filtering.
	pub admin_mode: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
	All,
	#[default]
	Any,
}

/// Inclusive range with optional bounds.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct NumericRange {
	pub min: Option<f64>,
	pub max: Option<f64>,
}
impl NumericRange {
	pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
		Self { min, max }
	}

	pub fn is_unset(&self) -> bool {
		self.min.is_none() && self.max.is_none()
	}

	/// An unset range admits everything, including missing values. Any configured bound excludes
	/// missing values.
	pub fn admits(&self, value: Option<f64>) -> bool {
		if self.is_unset() {
			return true;
		}

		let Some(value) = value else {
			return false;
		};

		if let Some(min) = self.min
			&& value < min
		{
			return false;
		}
		if let Some(max) = self.max
			&& value > max
		{
			return false;
		}

		true
	}
}
