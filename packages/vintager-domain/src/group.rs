use std::collections::BTreeMap;

use serde::Serialize;

use crate::{model::AnnotatedItem, sort::collate};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Group<'a> {
	pub key: String,
	pub items: Vec<&'a AnnotatedItem>,
}

/// Partitions sorted items by category key. Groups ascend by collated key; members keep their
/// order. Keys differing only in case stay separate groups.
pub fn group_by_category<'a>(sorted: Vec<&'a AnnotatedItem>) -> Vec<Group<'a>> {
	let mut by_key: BTreeMap<String, Vec<&'a AnnotatedItem>> = BTreeMap::new();

	for entry in sorted {
		by_key.entry(entry.item.category_key().to_string()).or_default().push(entry);
	}

	let mut groups: Vec<Group<'a>> =
		by_key.into_iter().map(|(key, items)| Group { key, items }).collect();

	groups.sort_by(|a, b| collate(&a.key, &b.key));

	groups
}
