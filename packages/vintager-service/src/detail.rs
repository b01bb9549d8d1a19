use serde::Serialize;

use crate::{CatalogService, Error, Result};
use vintager_domain::{display, display::ProfileScale};
use vintager_store::image::{ResponsiveImage, responsive_image};

const DETAIL_IMAGE_SIZES: &str = "(max-width: 768px) 100vw, 50vw";

#[derive(Clone, Debug, Serialize)]
pub struct WineDetail {
	pub id: i64,
	pub name: String,
	pub title: String,
	pub subtitle: String,
	pub location: String,
	pub vintage: Option<i32>,
	pub brand: Option<String>,
	pub price: Option<f64>,
	pub price_label: Option<String>,
	pub volume: Option<String>,
	pub alcohol_content: Option<String>,
	pub stock_level: Option<i64>,
	pub description: Option<String>,
	pub image: ResponsiveImage,
	pub profile: Vec<ProfileScale>,
	pub tags: Vec<String>,
	pub editable: bool,
}

impl CatalogService {
	/// Fetches one item straight from the source, independent of the loaded snapshot.
	pub async fn detail(&self, id: i64) -> Result<WineDetail> {
		let item = self
			.source
			.fetch_item(id)
			.await?
			.ok_or_else(|| Error::NotFound { message: format!("Wine {id} does not exist.") })?;
		// A detail view without tags is still useful.
		let tags = match self.source.fetch_item_tags(id).await {
			Ok(tags) => tags.into_iter().map(|tag| tag.label).collect(),
			Err(err) => {
				tracing::warn!(id, error = %err, "Tags for wine failed to load.");

				Vec::new()
			},
		};

		Ok(WineDetail {
			id: item.id,
			title: display::title(&item),
			subtitle: display::subtitle(&item),
			location: display::detail_location(&item),
			price_label: display::price_label(item.price),
			image: responsive_image(item.image.as_deref(), DETAIL_IMAGE_SIZES, &self.cfg.catalog),
			profile: display::profile_scales(&item.profile),
			editable: self.session.is_admin(),
			name: item.name,
			vintage: item.vintage,
			brand: item.brand,
			price: item.price,
			volume: item.volume,
			alcohol_content: item.alcohol_content,
			stock_level: item.stock_level,
			description: item.description,
			tags,
		})
	}
}
