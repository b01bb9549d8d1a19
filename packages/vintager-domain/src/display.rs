//! Text shown on catalog cards and the detail view.

use serde::Serialize;

use crate::model::{CatalogItem, OTHER_GROUP, ProfileAxis, ProfileScores, non_blank};

const TAG_PREVIEW_LIMIT: usize = 3;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TagPreview {
	pub shown: Vec<String>,
	pub remainder: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileScale {
	pub left: &'static str,
	pub right: &'static str,
	pub score: u8,
	pub percent: f64,
}

pub fn title(item: &CatalogItem) -> String {
	match item.vintage {
		Some(vintage) => format!("{} • {vintage}", item.name),
		None => item.name.clone(),
	}
}

/// Producer and varietal, blanks skipped.
pub fn subtitle(item: &CatalogItem) -> String {
	join_present([item.producer.as_deref(), item.subcategory.as_deref()], " • ")
}

pub fn card_location(item: &CatalogItem) -> String {
	non_blank(item.region.as_deref()).unwrap_or(OTHER_GROUP).to_string()
}

pub fn detail_location(item: &CatalogItem) -> String {
	join_present([item.region.as_deref(), item.category.as_deref()], ", ")
}

pub fn price_label(price: Option<f64>) -> Option<String> {
	price.map(|price| format!("${price:.2}"))
}

pub fn tag_preview(tags: &[String]) -> TagPreview {
	let shown: Vec<String> = tags.iter().take(TAG_PREVIEW_LIMIT).cloned().collect();
	let remainder = tags.len() - shown.len();

	TagPreview { shown, remainder }
}

pub fn profile_scales(profile: &ProfileScores) -> Vec<ProfileScale> {
	ProfileAxis::ALL
		.into_iter()
		.map(|axis| {
			let (left, right) = axis.labels();
			let score = profile.score(axis);

			ProfileScale { left, right, score, percent: f64::from(score) * 100.0 / 5.0 }
		})
		.collect()
}

fn join_present<const N: usize>(parts: [Option<&str>; N], separator: &str) -> String {
	parts.into_iter().filter_map(non_blank).collect::<Vec<_>>().join(separator)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn grange() -> CatalogItem {
		let mut item = CatalogItem::new(1, "Grange");

		item.vintage = Some(2018);
		item.producer = Some("Penfolds".to_string());
		item.subcategory = Some("Shiraz".to_string());
		item.category = Some("Australia".to_string());

		item
	}

	#[test]
	fn titles_append_vintage_when_present() {
		let mut item = grange();

		assert_eq!(title(&item), "Grange • 2018");

		item.vintage = None;

		assert_eq!(title(&item), "Grange");
	}

	#[test]
	fn locations_fall_back_sensibly() {
		let mut item = grange();

		assert_eq!(card_location(&item), "Other");
		assert_eq!(detail_location(&item), "Australia");

		item.region = Some("Barossa Valley".to_string());

		assert_eq!(card_location(&item), "Barossa Valley");
		assert_eq!(detail_location(&item), "Barossa Valley, Australia");
		assert_eq!(subtitle(&item), "Penfolds • Shiraz");
	}

	#[test]
	fn prices_render_with_two_decimals() {
		assert_eq!(price_label(Some(20.0)), Some("$20.00".to_string()));
		assert_eq!(price_label(Some(9.5)), Some("$9.50".to_string()));
		assert_eq!(price_label(None), None);
	}

	#[test]
	fn preview_shows_three_and_counts_the_rest() {
		let tags: Vec<String> =
			["Berry", "Oak", "Pepper", "Leather", "Plum"].iter().map(|tag| tag.to_string()).collect();
		let preview = tag_preview(&tags);

		assert_eq!(preview.shown, vec!["Berry", "Oak", "Pepper"]);
		assert_eq!(preview.remainder, 2);
		assert_eq!(tag_preview(&tags[..1]).remainder, 0);
	}

	#[test]
	fn scales_use_clamped_scores() {
		let profile = ProfileScores { light_bold: Some(9.0), dry_sweet: Some(1.0), ..Default::default() };
		let scales = profile_scales(&profile);

		assert_eq!(scales.len(), 4);
		assert_eq!((scales[0].left, scales[0].right, scales[0].score), ("Light", "Bold", 5));
		assert_eq!(scales[0].percent, 100.0);
		assert_eq!(scales[1].score, 0);
		assert_eq!(scales[2].percent, 20.0);
	}
}
