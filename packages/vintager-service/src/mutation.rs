//! Create, edit and delete requests.
//!
//! The catalog is a read-only showcase: requests are checked the same way a real write would be
//! and then acknowledged with a notice. Neither the store nor the loaded snapshot is touched.

use std::{collections::HashSet, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::{CatalogService, Error, Result};

pub const PLAYGROUND_NOTICE: &str = "This is a playground app. No changes will be made.";

const VINTAGE_RANGE: RangeInclusive<i32> = 1_900..=2_100;
const SCORE_RANGE: RangeInclusive<i32> = 0..=5;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct WineDraft {
	pub name: String,
	pub vintage: Option<i32>,
	pub region: String,
	pub country: String,
	pub vineyard: String,
	pub brand: String,
	pub varietal: String,
	pub volume: String,
	pub alcohol_content: String,
	pub price: Option<f64>,
	pub stock_level: Option<i64>,
	pub light_bold: i32,
	pub smooth_tannic: i32,
	pub dry_sweet: i32,
	pub soft_acidic: i32,
	pub description: String,
	pub image: String,
	pub tasting_note_ids: Vec<i64>,
}
impl Default for WineDraft {
	fn default() -> Self {
		Self {
			name: String::new(),
			vintage: None,
			region: String::new(),
			country: String::new(),
			vineyard: String::new(),
			brand: String::new(),
			varietal: String::new(),
			volume: "750 ml".to_string(),
			alcohol_content: "13% ABV".to_string(),
			price: None,
			stock_level: None,
			light_bold: 0,
			smooth_tannic: 0,
			dry_sweet: 0,
			soft_acidic: 0,
			description: String::new(),
			image: String::new(),
			tasting_note_ids: Vec::new(),
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationAction {
	Create,
	Update,
	Delete,
}

#[derive(Clone, Debug, Serialize)]
pub struct MutationReceipt {
	pub action: MutationAction,
	pub id: Option<i64>,
	pub applied: bool,
	pub notice: &'static str,
}

impl CatalogService {
	pub fn create(&self, draft: WineDraft) -> Result<MutationReceipt> {
		self.require_admin()?;
		self.validate_draft(&draft)?;

		Ok(self.acknowledge(MutationAction::Create, None))
	}

	pub fn update(&self, id: i64, draft: WineDraft) -> Result<MutationReceipt> {
		self.require_admin()?;
		self.require_item(id)?;
		self.validate_draft(&draft)?;

		Ok(self.acknowledge(MutationAction::Update, Some(id)))
	}

	pub fn delete(&self, id: i64) -> Result<MutationReceipt> {
		self.require_admin()?;
		self.require_item(id)?;

		Ok(self.acknowledge(MutationAction::Delete, Some(id)))
	}

	fn require_admin(&self) -> Result<()> {
		if self.session.is_admin() {
			Ok(())
		} else {
			Err(Error::AdminRequired { message: "Log in as admin to change the catalog.".to_string() })
		}
	}

	fn require_item(&self, id: i64) -> Result<()> {
		if self.snapshot()?.items.iter().any(|entry| entry.item.id == id) {
			Ok(())
		} else {
			Err(Error::NotFound { message: format!("Wine {id} does not exist.") })
		}
	}

	fn validate_draft(&self, draft: &WineDraft) -> Result<()> {
		if draft.name.trim().is_empty() {
			return Err(invalid("name must be non-empty."));
		}
		if let Some(vintage) = draft.vintage
			&& !VINTAGE_RANGE.contains(&vintage)
		{
			return Err(invalid("vintage must be in the range 1900-2100."));
		}
		if let Some(price) = draft.price
			&& (!price.is_finite() || price < 0.0)
		{
			return Err(invalid("price must be a non-negative number."));
		}
		if draft.stock_level.is_some_and(|stock| stock < 0) {
			return Err(invalid("stock_level must be zero or greater."));
		}

		for (field, score) in [
			("light_bold", draft.light_bold),
			("smooth_tannic", draft.smooth_tannic),
			("dry_sweet", draft.dry_sweet),
			("soft_acidic", draft.soft_acidic),
		] {
			if !SCORE_RANGE.contains(&score) {
				return Err(invalid(&format!("{field} must be in the range 0-5.")));
			}
		}

		if draft.tasting_note_ids.is_empty() {
			return Ok(());
		}

		let snapshot = self.snapshot()?;
		let known: HashSet<i64> = snapshot.tags.iter().map(|tag| tag.id).collect();

		if let Some(unknown) = draft.tasting_note_ids.iter().find(|id| !known.contains(*id)) {
			return Err(invalid(&format!("tasting_note_ids contains unknown id {unknown}.")));
		}

		Ok(())
	}

	fn acknowledge(&self, action: MutationAction, id: Option<i64>) -> MutationReceipt {
		tracing::info!(?action, ?id, "Simulated catalog change. Nothing was written.");

		MutationReceipt { action, id, applied: false, notice: PLAYGROUND_NOTICE }
	}
}

fn invalid(message: &str) -> Error {
	Error::InvalidRequest { message: message.to_string() }
}
