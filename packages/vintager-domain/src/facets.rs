use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
	model::{AnnotatedItem, non_blank},
	sort::collate,
};

/// Option lists and numeric hints for the filter controls.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Facets {
	pub categories: Vec<String>,
	pub subcategories: Vec<String>,
	pub tags: Vec<String>,
	pub price: NumericExtent,
	pub year: NumericExtent,
}

/// Placeholder hints only. Both ends are zero when no item carries a value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct NumericExtent {
	pub min: f64,
	pub max: f64,
}
impl NumericExtent {
	fn from_values(values: impl Iterator<Item = f64>) -> Self {
		let mut extent: Option<Self> = None;

		for value in values {
			extent = Some(match extent {
				Some(current) => Self { min: current.min.min(value), max: current.max.max(value) },
				None => Self { min: value, max: value },
			});
		}

		extent.unwrap_or_default()
	}
}

pub fn extract_facets(items: &[AnnotatedItem]) -> Facets {
	Facets {
		categories: distinct(items.iter().map(|entry| entry.item.category.as_deref())),
		subcategories: distinct(items.iter().map(|entry| entry.item.subcategory.as_deref())),
		tags: distinct(items.iter().flat_map(|entry| entry.tags.iter().map(|tag| Some(tag.as_str())))),
		price: NumericExtent::from_values(items.iter().filter_map(|entry| entry.item.price)),
		year: NumericExtent::from_values(items.iter().filter_map(|entry| entry.item.year())),
	}
}

// Exact-match distinct, collated order.
fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
	let mut distinct: Vec<String> =
		values.filter_map(non_blank).collect::<BTreeSet<_>>().into_iter().map(str::to_string).collect();

	distinct.sort_by(|a, b| collate(a, b));

	distinct
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::CatalogItem;

	fn entry(category: Option<&str>, price: Option<f64>, tags: &[&str]) -> AnnotatedItem {
		let mut item = CatalogItem::new(0, "x");

		item.category = category.map(str::to_string);
		item.price = price;

		AnnotatedItem { item, tags: tags.iter().map(|tag| tag.to_string()).collect() }
	}

	#[test]
	fn categories_are_trimmed_distinct_and_sorted() {
		let items = vec![
			entry(Some(" France"), None, &[]),
			entry(Some("Australia"), None, &[]),
			entry(Some("France "), None, &[]),
			entry(Some(""), None, &[]),
			entry(None, None, &[]),
			entry(Some("france"), None, &[]),
		];
		let facets = extract_facets(&items);

		assert_eq!(facets.categories, vec!["Australia", "france", "France"]);
	}

	#[test]
	fn lowercase_and_accented_values_sort_alphabetically() {
		let items = vec![
			entry(Some("argentina"), None, &[]),
			entry(Some("Österreich"), None, &[]),
			entry(Some("Portugal"), None, &[]),
			entry(Some(""), None, &[]),
		];

		assert_eq!(extract_facets(&items).categories, vec!["argentina", "Österreich", "Portugal"]);
	}

	#[test]
	fn tags_are_collected_across_items() {
		let items = vec![entry(None, None, &["Oak", "Berry"]), entry(None, None, &["Berry", "Leather"])];

		assert_eq!(extract_facets(&items).tags, vec!["Berry", "Leather", "Oak"]);
	}

	#[test]
	fn extents_skip_missing_values() {
		let items = vec![entry(None, Some(32.0), &[]), entry(None, None, &[]), entry(None, Some(9.5), &[])];
		let facets = extract_facets(&items);

		assert_eq!(facets.price, NumericExtent { min: 9.5, max: 32.0 });
		assert_eq!(facets.year, NumericExtent { min: 0.0, max: 0.0 });
	}
}
