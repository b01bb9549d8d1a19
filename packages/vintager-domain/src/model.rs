use serde::{Deserialize, Serialize};

/// Label used for items whose category is blank, both for grouping and for category filtering.
pub const OTHER_GROUP: &str = "Other";

const PROFILE_MIN: f64 = 0.0;
const PROFILE_MAX: f64 = 5.0;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CatalogItem {
	pub id: i64,
	pub name: String,
	pub vintage: Option<i32>,
	/// Country.
	pub category: Option<String>,
	/// Grape varietal.
	pub subcategory: Option<String>,
	/// Vineyard.
	pub producer: Option<String>,
	pub brand: Option<String>,
	pub region: Option<String>,
	/// Always finite when present. Non-numeric payloads are dropped at the boundary.
	pub price: Option<f64>,
	pub profile: ProfileScores,
	pub volume: Option<String>,
	pub alcohol_content: Option<String>,
	pub stock_level: Option<i64>,
	pub image: Option<String>,
	pub description: Option<String>,
}
impl CatalogItem {
	pub fn new(id: i64, name: impl Into<String>) -> Self {
		Self { id, name: name.into(), ..Default::default() }
	}

	/// Trimmed category, or [`OTHER_GROUP`] when the category is absent or blank.
	pub fn category_key(&self) -> &str {
		non_blank(self.category.as_deref()).unwrap_or(OTHER_GROUP)
	}

	pub fn subcategory_key(&self) -> Option<&str> {
		non_blank(self.subcategory.as_deref())
	}

	pub fn year(&self) -> Option<f64> {
		self.vintage.map(f64::from)
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProfileAxis {
	LightBold,
	SmoothTannic,
	DrySweet,
	SoftAcidic,
}
impl ProfileAxis {
	pub const ALL: [Self; 4] = [Self::LightBold, Self::SmoothTannic, Self::DrySweet, Self::SoftAcidic];

	pub fn labels(self) -> (&'static str, &'static str) {
		match self {
			Self::LightBold => ("Light", "Bold"),
			Self::SmoothTannic => ("Smooth", "Tannic"),
			Self::DrySweet => ("Dry", "Sweet"),
			Self::SoftAcidic => ("Soft", "Acidic"),
		}
	}
}

/// Stored profile values, kept as received. Reads go through [`ProfileScores::score`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ProfileScores {
	pub light_bold: Option<f64>,
	pub smooth_tannic: Option<f64>,
	pub dry_sweet: Option<f64>,
	pub soft_acidic: Option<f64>,
}
impl ProfileScores {
	pub fn raw(&self, axis: ProfileAxis) -> Option<f64> {
		match axis {
			ProfileAxis::LightBold => self.light_bold,
			ProfileAxis::SmoothTannic => self.smooth_tannic,
			ProfileAxis::DrySweet => self.dry_sweet,
			ProfileAxis::SoftAcidic => self.soft_acidic,
		}
	}

	/// Score in `0..=5`. Absent or non-finite values read as zero; everything else is rounded and
	/// clamped.
	pub fn score(&self, axis: ProfileAxis) -> u8 {
		clamp_score(self.raw(axis))
	}
}

pub fn clamp_score(raw: Option<f64>) -> u8 {
	let value = raw.filter(|value| value.is_finite()).unwrap_or(PROFILE_MIN);

	value.round().clamp(PROFILE_MIN, PROFILE_MAX) as u8
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tag {
	pub id: i64,
	pub label: String,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ItemTagLink {
	pub item_id: i64,
	pub tag_id: i64,
}

/// An item plus the labels of its linked tags, in link-scan order.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AnnotatedItem {
	#[serde(flatten)]
	pub item: CatalogItem,
	pub tags: Vec<String>,
}
impl AnnotatedItem {
	pub fn has_tag(&self, label: &str) -> bool {
		self.tags.iter().any(|tag| tag == label)
	}
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}
