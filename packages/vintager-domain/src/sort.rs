use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::model::AnnotatedItem;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
	#[default]
	NameAsc,
	NameDesc,
	YearAsc,
	YearDesc,
	PriceAsc,
	PriceDesc,
}
impl SortKey {
	pub const ALL: [Self; 6] =
		[Self::NameAsc, Self::NameDesc, Self::YearAsc, Self::YearDesc, Self::PriceAsc, Self::PriceDesc];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::NameAsc => "name_asc",
			Self::NameDesc => "name_desc",
			Self::YearAsc => "year_asc",
			Self::YearDesc => "year_desc",
			Self::PriceAsc => "price_asc",
			Self::PriceDesc => "price_desc",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|key| key.as_str() == raw)
	}

	pub fn is_descending(self) -> bool {
		matches!(self, Self::NameDesc | Self::YearDesc | Self::PriceDesc)
	}
}

/// Stable sort by `key`. Items lacking the sorted year or price go last in either direction.
pub fn sort_items<'a>(items: Vec<&'a AnnotatedItem>, key: SortKey) -> Vec<&'a AnnotatedItem> {
	match key {
		SortKey::NameAsc | SortKey::NameDesc => {
			let mut keyed: Vec<_> =
				items.into_iter().map(|entry| (CollationKey::new(&entry.item.name), entry)).collect();

			keyed.sort_by(|(a, _), (b, _)| directed(a.cmp(b), key.is_descending()));

			keyed.into_iter().map(|(_, entry)| entry).collect()
		},
		_ => {
			let mut items = items;
			items.sort_by(|a, b| compare(a, b, key));

			items
		},
	}
}

pub fn compare(a: &AnnotatedItem, b: &AnnotatedItem, key: SortKey) -> Ordering {
	match key {
		SortKey::NameAsc | SortKey::NameDesc =>
			directed(collate(&a.item.name, &b.item.name), key.is_descending()),
		SortKey::YearAsc | SortKey::YearDesc =>
			compare_missing_last(a.item.year(), b.item.year(), key.is_descending()),
		SortKey::PriceAsc | SortKey::PriceDesc =>
			compare_missing_last(a.item.price, b.item.price, key.is_descending()),
	}
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
	if descending { ordering.reverse() } else { ordering }
}

// Missing reads as +inf ascending and -inf descending, which lands it last either way.
fn compare_missing_last(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
	match (a, b) {
		(Some(a), Some(b)) => directed(a.partial_cmp(&b).unwrap_or(Ordering::Equal), descending),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}

/// Locale-style string ordering: letters first, then accents (unaccented first), then case
/// (lowercase first). The raw text only breaks ties between strings that are canonically equal.
pub fn collate(a: &str, b: &str) -> Ordering {
	CollationKey::new(a).cmp(&CollationKey::new(b))
}

#[derive(Debug, Eq, Ord, PartialEq, PartialOrd)]
struct CollationKey<'a> {
	base: String,
	accents: String,
	uppercase: Vec<bool>,
	raw: &'a str,
}
impl<'a> CollationKey<'a> {
	fn new(raw: &'a str) -> Self {
		let decomposed: Vec<char> = raw.nfkd().collect();
		let accents: String = decomposed.iter().flat_map(|ch| ch.to_lowercase()).collect();
		let base = accents.chars().filter(|ch| !is_combining_mark(*ch)).collect();
		let uppercase = decomposed
			.iter()
			.filter(|ch| !is_combining_mark(**ch))
			.map(|ch| ch.is_uppercase())
			.collect();

		Self { base, accents, uppercase, raw }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::CatalogItem;

	fn entry(id: i64, name: &str, price: Option<f64>) -> AnnotatedItem {
		let mut item = CatalogItem::new(id, name);

		item.price = price;

		AnnotatedItem { item, tags: Vec::new() }
	}

	fn ids(items: &[&AnnotatedItem]) -> Vec<i64> {
		items.iter().map(|entry| entry.item.id).collect()
	}

	#[test]
	fn names_ignore_case_and_accents() {
		let items = [entry(1, "zinfandel", None), entry(2, "Élan", None), entry(3, "Barbera", None)];
		let sorted = sort_items(items.iter().collect(), SortKey::NameAsc);

		assert_eq!(ids(&sorted), vec![3, 2, 1]);

		let sorted = sort_items(items.iter().collect(), SortKey::NameDesc);

		assert_eq!(ids(&sorted), vec![1, 2, 3]);
	}

	#[test]
	fn folded_ties_put_plain_lowercase_first() {
		let items = [
			entry(1, "Zed", None),
			entry(2, "Merlot", None),
			entry(3, "Côte", None),
			entry(4, "merlot", None),
			entry(5, "cote", None),
			entry(6, "Abc", None),
		];
		let sorted = sort_items(items.iter().collect(), SortKey::NameAsc);

		assert_eq!(ids(&sorted), vec![6, 5, 3, 4, 2, 1]);
	}

	#[test]
	fn collation_places_lowercase_and_accented_words_alphabetically() {
		let mut words = vec!["Portugal", "Other", "Österreich", "argentina", "Italy"];

		words.sort_by(|a, b| collate(a, b));

		assert_eq!(words, vec!["argentina", "Italy", "Österreich", "Other", "Portugal"]);
	}

	#[test]
	fn missing_prices_sort_last_in_both_directions() {
		let items = [
			entry(1, "a", None),
			entry(2, "b", Some(30.0)),
			entry(3, "c", Some(10.0)),
			entry(4, "d", None),
		];

		assert_eq!(ids(&sort_items(items.iter().collect(), SortKey::PriceAsc)), vec![3, 2, 1, 4]);
		assert_eq!(ids(&sort_items(items.iter().collect(), SortKey::PriceDesc)), vec![2, 3, 1, 4]);
	}

	#[test]
	fn equal_keys_keep_input_order() {
		let items = [entry(1, "a", Some(5.0)), entry(2, "b", Some(5.0)), entry(3, "c", Some(5.0))];

		assert_eq!(ids(&sort_items(items.iter().collect(), SortKey::PriceDesc)), vec![1, 2, 3]);

		let twins = [entry(7, "Merlot", None), entry(8, "Merlot", None)];

		assert_eq!(ids(&sort_items(twins.iter().collect(), SortKey::NameDesc)), vec![7, 8]);
	}

	#[test]
	fn keys_round_trip_through_their_names() {
		for key in SortKey::ALL {
			assert_eq!(SortKey::parse(key.as_str()), Some(key));
		}

		assert_eq!(SortKey::parse("rating"), None);
	}
}
