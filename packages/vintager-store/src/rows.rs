//! Row shapes returned by the store. Loose columns stay as JSON until converted.

use serde::Deserialize;
use serde_json::Value;

use vintager_domain::{CatalogItem, ItemTagLink, ProfileScores, Tag, loose};

pub const WINE_COLUMNS: &str = "id,name,vintage,region,country,vineyard,brand,varietal,volume,\
alcohol_content,stock_level,light_bold,smooth_tannic,dry_sweet,soft_acidic,description,image,price";
pub const LINK_COLUMNS: &str = "wine_id,tasting_note_id";
pub const TAG_COLUMNS: &str = "id,tasting_note";

#[derive(Debug, Deserialize)]
pub struct WineRow {
	pub id: i64,
	#[serde(default)]
	pub name: Value,
	#[serde(default)]
	pub vintage: Value,
	#[serde(default)]
	pub region: Value,
	#[serde(default)]
	pub country: Value,
	#[serde(default)]
	pub vineyard: Value,
	#[serde(default)]
	pub brand: Value,
	#[serde(default)]
	pub varietal: Value,
	#[serde(default)]
	pub volume: Value,
	#[serde(default)]
	pub alcohol_content: Value,
	#[serde(default)]
	pub stock_level: Value,
	#[serde(default)]
	pub light_bold: Value,
	#[serde(default)]
	pub smooth_tannic: Value,
	#[serde(default)]
	pub dry_sweet: Value,
	#[serde(default)]
	pub soft_acidic: Value,
	#[serde(default)]
	pub description: Value,
	#[serde(default)]
	pub image: Value,
	#[serde(default)]
	pub price: Value,
}
impl WineRow {
	pub fn into_item(self) -> CatalogItem {
		CatalogItem {
			id: self.id,
			name: loose::text(&self.name).unwrap_or_default(),
			vintage: loose::year(&self.vintage),
			category: loose::text(&self.country),
			subcategory: loose::text(&self.varietal),
			producer: loose::text(&self.vineyard),
			brand: loose::text(&self.brand),
			region: loose::text(&self.region),
			price: loose::number(&self.price),
			profile: ProfileScores {
				light_bold: loose::number(&self.light_bold),
				smooth_tannic: loose::number(&self.smooth_tannic),
				dry_sweet: loose::number(&self.dry_sweet),
				soft_acidic: loose::number(&self.soft_acidic),
			},
			volume: loose::text(&self.volume),
			alcohol_content: loose::text(&self.alcohol_content),
			stock_level: loose::integer(&self.stock_level),
			image: loose::text(&self.image),
			description: loose::text(&self.description),
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct LinkRow {
	pub wine_id: i64,
	pub tasting_note_id: i64,
}
impl From<LinkRow> for ItemTagLink {
	fn from(row: LinkRow) -> Self {
		Self { item_id: row.wine_id, tag_id: row.tasting_note_id }
	}
}

#[derive(Debug, Deserialize)]
pub struct TagRow {
	pub id: i64,
	#[serde(default)]
	pub tasting_note: Value,
}
impl TagRow {
	/// Dictionary entries without a usable label are dropped; links to them then resolve to
	/// nothing, same as a dangling tag id.
	pub fn into_tag(self) -> Option<Tag> {
		loose::text(&self.tasting_note).map(|label| Tag { id: self.id, label })
	}
}
