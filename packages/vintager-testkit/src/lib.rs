use std::{
	env,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use serde_json::Map;

use vintager_config::{Catalog, Config, Service, Session, Store, StoreTables};
use vintager_domain::{AnnotatedItem, CatalogItem, ItemTagLink, ProfileScores, Tag};

pub const DANGLING_TAG_ID: i64 = 999;

/// Raw result sets as the store would return them.
pub struct SampleCatalog {
	pub items: Vec<CatalogItem>,
	pub links: Vec<ItemTagLink>,
	pub tags: Vec<Tag>,
}
impl SampleCatalog {
	pub fn annotated(&self) -> Vec<AnnotatedItem> {
		vintager_domain::stitch(&self.items, &self.links, &self.tags)
	}
}

pub fn wine(
	id: i64,
	name: &str,
	category: Option<&str>,
	subcategory: Option<&str>,
	vintage: Option<i32>,
	price: Option<f64>,
) -> CatalogItem {
	CatalogItem {
		category: category.map(str::to_string),
		subcategory: subcategory.map(str::to_string),
		vintage,
		price,
		..CatalogItem::new(id, name)
	}
}

pub fn tag(id: i64, label: &str) -> Tag {
	Tag { id, label: label.to_string() }
}

pub fn link(item_id: i64, tag_id: i64) -> ItemTagLink {
	ItemTagLink { item_id, tag_id }
}

/// Eight wines across three countries plus two without one. Prices and vintages are missing on
/// purpose for a few entries; the links include a duplicate and one dangling tag id.
pub fn sample_catalog() -> SampleCatalog {
	let mut grange = wine(1, "Grange", Some("Australia"), Some("Shiraz"), Some(2018), Some(950.0));
	grange.producer = Some("Penfolds".to_string());
	grange.region = Some("Barossa Valley".to_string());
	grange.profile = ProfileScores {
		light_bold: Some(5.0),
		smooth_tannic: Some(4.0),
		dry_sweet: Some(1.0),
		soft_acidic: Some(2.0),
	};
	let mut chablis = wine(3, "Chablis", Some("France"), Some("Chardonnay"), Some(2021), Some(35.0));
	chablis.producer = Some("Domaine Laroche".to_string());
	let items = vec![
		grange,
		wine(2, "Shiraz", Some("Australia"), Some("Shiraz"), Some(2020), Some(20.0)),
		chablis,
		wine(4, "Pinot", Some("France"), Some("Pinot Noir"), None, None),
		wine(5, "Élan Rouge", Some(" France "), Some("Merlot"), Some(2016), Some(48.0)),
		wine(6, "Barolo", Some("Italy"), Some("Nebbiolo"), Some(2015), Some(80.0)),
		wine(7, "House Red", None, None, Some(2022), Some(12.0)),
		wine(8, "Mystery Blend", Some("  "), Some("Blend"), None, None),
	];
	let tags = vec![
		tag(10, "Berry"),
		tag(11, "Oak"),
		tag(12, "Pepper"),
		tag(13, "Citrus"),
		tag(14, "Leather"),
		tag(15, "Vanilla"),
	];
	let links = vec![
		link(1, 10),
		link(1, 11),
		link(1, 12),
		link(1, 14),
		link(2, 10),
		link(3, 13),
		link(3, 11),
		link(3, 13),
		link(5, 10),
		link(5, 15),
		link(6, 14),
		link(6, DANGLING_TAG_ID),
		link(7, 10),
	];

	SampleCatalog { items, links, tags }
}

/// A valid configuration pointing the store at `store_url`. The session lives in memory.
pub fn sample_config(store_url: &str) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		store: Store {
			url: store_url.trim_end_matches('/').to_string(),
			anon_key: "test-anon-key".to_string(),
			timeout_ms: 2_000,
			tables: StoreTables::default(),
			default_headers: Map::new(),
		},
		catalog: Catalog::default(),
		session: Session::default(),
	}
}

/// A unique path under the system temp dir. Nothing is created.
pub fn temp_path(prefix: &str, extension: &str) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);
	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|elapsed| elapsed.as_nanos())
		.unwrap_or_default();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();

	env::temp_dir().join(format!("{prefix}_{nanos}_{pid}_{ordinal}.{extension}"))
}
