use std::collections::{HashMap, HashSet};

use crate::model::{AnnotatedItem, CatalogItem, ItemTagLink, Tag};

/// Joins items with their tag labels.
///
/// Links pointing at a tag id missing from the dictionary are dropped. Repeated `(item, tag)` links
/// contribute one label. Runs in `O(items + links + tags)`.
pub fn stitch(items: &[CatalogItem], links: &[ItemTagLink], tags: &[Tag]) -> Vec<AnnotatedItem> {
	let labels: HashMap<i64, &str> = tags.iter().map(|tag| (tag.id, tag.label.as_str())).collect();
	let mut seen: HashSet<ItemTagLink> = HashSet::with_capacity(links.len());
	let mut by_item: HashMap<i64, Vec<String>> = HashMap::new();

	for link in links {
		let Some(label) = labels.get(&link.tag_id) else {
			continue;
		};

		if !seen.insert(*link) {
			continue;
		}

		by_item.entry(link.item_id).or_default().push((*label).to_string());
	}

	items
		.iter()
		.map(|item| AnnotatedItem {
			item: item.clone(),
			tags: by_item.get(&item.id).cloned().unwrap_or_default(),
		})
		.collect()
}
