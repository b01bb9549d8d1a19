use serde::{Deserialize, Serialize};

use crate::{CatalogService, Result};
use vintager_domain::{
	AnnotatedItem, Facets, FilterCriteria, display, display::TagPreview, run_query,
};
use vintager_store::image::{ResponsiveImage, responsive_image};

const CARD_IMAGE_SIZES: &str = "(max-width: 640px) 100vw, (max-width: 1024px) 50vw, 33vw";

#[derive(Clone, Debug, Serialize)]
pub struct ListResponse {
	pub total: usize,
	pub matched: usize,
	pub criteria: FilterCriteria,
	pub groups: Vec<CardGroup>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CardGroup {
	pub key: String,
	pub items: Vec<WineCard>,
}

#[derive(Clone, Debug, Serialize)]
pub struct WineCard {
	pub id: i64,
	pub name: String,
	pub title: String,
	pub subtitle: String,
	pub location: String,
	pub vintage: Option<i32>,
	pub price: Option<f64>,
	pub price_label: Option<String>,
	pub image: ResponsiveImage,
	pub tags: TagPreview,
	pub actions: CardActions,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct CardActions {
	pub edit: bool,
	pub delete: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TagOption {
	pub id: i64,
	pub label: String,
}

impl CatalogService {
	/// Runs the query pipeline over the current snapshot and renders grouped cards.
	pub fn list(&self, mut criteria: FilterCriteria) -> Result<ListResponse> {
		let snapshot = self.snapshot()?;
		let admin = self.session.is_admin();
		criteria.admin_mode = admin;
		let result = run_query(&snapshot.items, &criteria);
		let groups = result
			.groups
			.iter()
			.map(|group| CardGroup {
				key: group.key.clone(),
				items: group.items.iter().map(|entry| self.card(entry, admin)).collect(),
			})
			.collect();

		tracing::debug!(
			total = result.total,
			matched = result.matched,
			sort = criteria.sort.as_str(),
			"Catalog query evaluated."
		);

		Ok(ListResponse { total: result.total, matched: result.matched, criteria, groups })
	}

	pub fn facets(&self) -> Result<Facets> {
		Ok(vintager_domain::extract_facets(&self.snapshot()?.items))
	}

	/// Tag dictionary entries whose label contains `query`, ignoring case.
	pub fn tag_options(&self, query: &str) -> Result<Vec<TagOption>> {
		let snapshot = self.snapshot()?;
		let needle = query.trim().to_lowercase();

		Ok(snapshot
			.tags
			.iter()
			.filter(|tag| needle.is_empty() || tag.label.to_lowercase().contains(&needle))
			.take(self.cfg.catalog.tag_option_limit)
			.map(|tag| TagOption { id: tag.id, label: tag.label.clone() })
			.collect())
	}

	fn card(&self, entry: &AnnotatedItem, admin: bool) -> WineCard {
		let item = &entry.item;

		WineCard {
			id: item.id,
			name: item.name.clone(),
			title: display::title(item),
			subtitle: display::subtitle(item),
			location: display::card_location(item),
			vintage: item.vintage,
			price: item.price,
			price_label: display::price_label(item.price),
			image: responsive_image(item.image.as_deref(), CARD_IMAGE_SIZES, &self.cfg.catalog),
			tags: display::tag_preview(&entry.tags),
			actions: CardActions { edit: admin, delete: admin },
		}
	}
}
