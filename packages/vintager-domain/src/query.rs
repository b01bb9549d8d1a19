use serde::Serialize;

use crate::{
	criteria::FilterCriteria,
	filter::filter,
	group::{Group, group_by_category},
	model::AnnotatedItem,
	sort::sort_items,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryResult<'a> {
	pub total: usize,
	pub matched: usize,
	pub groups: Vec<Group<'a>>,
}
impl<'a> QueryResult<'a> {
	/// Every matched item in display order.
	pub fn items(&self) -> impl Iterator<Item = &'a AnnotatedItem> + '_ {
		self.groups.iter().flat_map(|group| group.items.iter().copied())
	}
}

/// Filter, then sort, then group.
pub fn run_query<'a>(items: &'a [AnnotatedItem], criteria: &FilterCriteria) -> QueryResult<'a> {
	let filtered = filter(items, criteria);
	let matched = filtered.len();
	let sorted = sort_items(filtered, criteria.sort);

	QueryResult { total: items.len(), matched, groups: group_by_category(sorted) }
}
