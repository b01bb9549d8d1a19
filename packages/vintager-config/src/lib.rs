mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Catalog, Config, Service, Session, Store, StoreTables};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}

	let url = cfg.store.url.trim();

	if url.is_empty() {
		return Err(Error::Validation { message: "store.url must be non-empty.".to_string() });
	}
	if !(url.starts_with("http://") || url.starts_with("https://")) {
		return Err(Error::Validation {
			message: "store.url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.store.anon_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "store.anon_key must be non-empty.".to_string(),
		});
	}
	if cfg.store.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "store.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (label, table) in [
		("store.tables.items", &cfg.store.tables.items),
		("store.tables.links", &cfg.store.tables.links),
		("store.tables.tags", &cfg.store.tables.tags),
	] {
		if table.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	for (key, value) in &cfg.store.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("store.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.catalog.image_widths.is_empty() {
		return Err(Error::Validation {
			message: "catalog.image_widths must be non-empty.".to_string(),
		});
	}
	if cfg.catalog.image_widths.contains(&0) {
		return Err(Error::Validation {
			message: "catalog.image_widths must be greater than zero.".to_string(),
		});
	}
	if !(1..=100).contains(&cfg.catalog.image_quality) {
		return Err(Error::Validation {
			message: "catalog.image_quality must be in the range 1-100.".to_string(),
		});
	}
	if cfg.catalog.tag_option_limit == 0 {
		return Err(Error::Validation {
			message: "catalog.tag_option_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.session.key.trim().is_empty() {
		return Err(Error::Validation { message: "session.key must be non-empty.".to_string() });
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.store.url.trim().trim_end_matches('/').to_string();
	cfg.store.url = trimmed;

	if cfg.catalog.fallback_image.trim().is_empty() {
		cfg.catalog.fallback_image = Catalog::default().fallback_image;
	}
	if cfg.session.path.as_deref().map(|path| path.as_os_str().is_empty()).unwrap_or(false) {
		cfg.session.path = None;
	}

	cfg.catalog.image_widths.sort_unstable();
	cfg.catalog.image_widths.dedup();
}
