use crate::{
	criteria::{FilterCriteria, MatchMode},
	model::{AnnotatedItem, non_blank},
};

/// Conjunction of every configured clause. Pure; evaluation order does not matter.
pub fn matches(entry: &AnnotatedItem, criteria: &FilterCriteria) -> bool {
	matches_text(entry, &criteria.query)
		&& matches_category(entry, criteria)
		&& matches_subcategory(entry, criteria)
		&& matches_tags(entry, criteria)
		&& criteria.year.admits(entry.item.year())
		&& criteria.price.admits(entry.item.price)
}

/// Items passing [`matches`], in input order.
pub fn filter<'a>(items: &'a [AnnotatedItem], criteria: &FilterCriteria) -> Vec<&'a AnnotatedItem> {
	items.iter().filter(|entry| matches(entry, criteria)).collect()
}

fn matches_text(entry: &AnnotatedItem, query: &str) -> bool {
	let query = query.trim();

	if query.is_empty() {
		return true;
	}

	searchable_text(entry).to_lowercase().contains(&query.to_lowercase())
}

fn searchable_text(entry: &AnnotatedItem) -> String {
	let item = &entry.item;

	[
		Some(item.name.as_str()),
		item.producer.as_deref(),
		item.brand.as_deref(),
		item.category.as_deref(),
		item.subcategory.as_deref(),
	]
	.into_iter()
	.filter_map(non_blank)
	.collect::<Vec<_>>()
	.join(" ")
}

fn matches_category(entry: &AnnotatedItem, criteria: &FilterCriteria) -> bool {
	criteria.categories.is_empty() || criteria.categories.contains(entry.item.category_key())
}

fn matches_subcategory(entry: &AnnotatedItem, criteria: &FilterCriteria) -> bool {
	if criteria.subcategories.is_empty() {
		return true;
	}

	entry.item.subcategory_key().map(|value| criteria.subcategories.contains(value)).unwrap_or(false)
}

fn matches_tags(entry: &AnnotatedItem, criteria: &FilterCriteria) -> bool {
	if criteria.tags.is_empty() {
		return true;
	}

	match criteria.tag_mode {
		MatchMode::All => criteria.tags.iter().all(|tag| entry.has_tag(tag)),
		MatchMode::Any => criteria.tags.iter().any(|tag| entry.has_tag(tag)),
	}
}
