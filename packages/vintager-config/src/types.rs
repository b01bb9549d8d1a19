use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub store: Store,
	#[serde(default)]
	pub catalog: Catalog,
	#[serde(default)]
	pub session: Session,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

/// Hosted database endpoint. Only the public (anon) key is ever configured here.
#[derive(Clone, Debug, Deserialize)]
pub struct Store {
	/// Project base URL, e.g. `https://abc.supabase.co`. A trailing slash is trimmed on load.
	pub url: String,
	pub anon_key: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub tables: StoreTables,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StoreTables {
	pub items: String,
	pub links: String,
	pub tags: String,
}
impl Default for StoreTables {
	fn default() -> Self {
		Self {
			items: "wine".to_string(),
			links: "wine_tast_note".to_string(),
			tags: "tasting_note".to_string(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Catalog {
	pub fallback_image: String,
	pub image_widths: Vec<u32>,
	pub image_quality: u8,
	pub tag_option_limit: usize,
}
impl Default for Catalog {
	fn default() -> Self {
		Self {
			fallback_image: "/hero_image.png".to_string(),
			image_widths: vec![320, 480, 640, 768, 1_024],
			image_quality: 75,
			tag_option_limit: 50,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Session {
	/// Optional. When unset the admin flag lives in memory and resets on restart.
	pub path: Option<PathBuf>,
	pub key: String,
}
impl Default for Session {
	fn default() -> Self {
		Self { path: None, key: "vintager:isAdmin".to_string() }
	}
}
