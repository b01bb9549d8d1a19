pub mod image;
pub mod rows;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client, StatusCode,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::rows::{LINK_COLUMNS, LinkRow, TAG_COLUMNS, TagRow, WINE_COLUMNS, WineRow};
use vintager_config::StoreTables;
use vintager_domain::{CatalogItem, ItemTagLink, Tag};

const REST_PATH: &str = "/rest/v1";
const ERROR_BODY_LIMIT: usize = 200;

/// Headers the hosted REST gateway expects on every request: the public key as `apikey` and as a
/// bearer token, plus any configured extras.
pub fn auth_headers(anon_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	headers.insert(HeaderName::from_static("apikey"), anon_key.parse()?);
	headers.insert(AUTHORIZATION, format!("Bearer {anon_key}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};
		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

#[derive(Clone, Debug, Serialize)]
pub struct SmokeReport {
	pub table: String,
	pub rows: Option<usize>,
	pub error: Option<String>,
}
impl SmokeReport {
	pub fn is_ok(&self) -> bool {
		self.error.is_none()
	}
}

/// Read-only client for the three catalog tables.
#[derive(Clone, Debug)]
pub struct StoreClient {
	http: Client,
	base: String,
	tables: StoreTables,
}
impl StoreClient {
	pub fn new(cfg: &vintager_config::Store) -> Result<Self> {
		let http = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(auth_headers(&cfg.anon_key, &cfg.default_headers)?)
			.build()?;

		Ok(Self { http, base: format!("{}{REST_PATH}", cfg.url), tables: cfg.tables.clone() })
	}

	pub async fn fetch_items(&self) -> Result<Vec<CatalogItem>> {
		let rows: Vec<WineRow> =
			self.select(&self.tables.items, &[("select", WINE_COLUMNS.to_string())]).await?;

		Ok(rows.into_iter().map(WineRow::into_item).collect())
	}

	pub async fn fetch_links(&self) -> Result<Vec<ItemTagLink>> {
		let rows: Vec<LinkRow> =
			self.select(&self.tables.links, &[("select", LINK_COLUMNS.to_string())]).await?;

		Ok(rows.into_iter().map(ItemTagLink::from).collect())
	}

	pub async fn fetch_tags(&self) -> Result<Vec<Tag>> {
		let rows: Vec<TagRow> =
			self.select(&self.tables.tags, &[("select", TAG_COLUMNS.to_string())]).await?;

		Ok(rows.into_iter().filter_map(TagRow::into_tag).collect())
	}

	/// Zero rows is `None`, not an error.
	pub async fn fetch_item(&self, id: i64) -> Result<Option<CatalogItem>> {
		let rows: Vec<WineRow> = self
			.select(
				&self.tables.items,
				&[("select", WINE_COLUMNS.to_string()), ("id", format!("eq.{id}"))],
			)
			.await?;

		Ok(rows.into_iter().next().map(WineRow::into_item))
	}

	/// Tags linked to one item, in link order. Skips the dictionary request when nothing is linked.
	pub async fn fetch_item_tags(&self, id: i64) -> Result<Vec<Tag>> {
		let rows: Vec<LinkRow> = self
			.select(
				&self.tables.links,
				&[("select", LINK_COLUMNS.to_string()), ("wine_id", format!("eq.{id}"))],
			)
			.await?;
		let mut tag_ids: Vec<i64> = Vec::with_capacity(rows.len());

		for row in rows {
			if !tag_ids.contains(&row.tasting_note_id) {
				tag_ids.push(row.tasting_note_id);
			}
		}

		if tag_ids.is_empty() {
			return Ok(Vec::new());
		}

		let id_list = tag_ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",");
		let rows: Vec<TagRow> = self
			.select(
				&self.tables.tags,
				&[("select", TAG_COLUMNS.to_string()), ("id", format!("in.({id_list})"))],
			)
			.await?;
		let mut tags: Vec<Tag> = rows.into_iter().filter_map(TagRow::into_tag).collect();
		tags.sort_by_key(|tag| tag_ids.iter().position(|id| *id == tag.id).unwrap_or(usize::MAX));

		Ok(tags)
	}

	/// Reads up to `limit` rows from each table and reports what came back.
	pub async fn smoke(&self, limit: u32) -> Vec<SmokeReport> {
		let mut reports = Vec::with_capacity(3);

		for (table, columns) in [
			(&self.tables.items, "id,name,region"),
			(&self.tables.tags, TAG_COLUMNS),
			(&self.tables.links, LINK_COLUMNS),
		] {
			let query = [("select", columns.to_string()), ("limit", limit.to_string())];
			let report = match self.select::<Value>(table, &query).await {
				Ok(rows) => SmokeReport { table: table.clone(), rows: Some(rows.len()), error: None },
				Err(err) =>
					SmokeReport { table: table.clone(), rows: None, error: Some(err.to_string()) },
			};
			reports.push(report);
		}

		reports
	}

	async fn select<T>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
	{
		let url = format!("{}/{table}", self.base);
		let res = self.http.get(url).query(query).send().await?;
		let status = res.status();

		if !status.is_success() {
			let body = res.text().await.unwrap_or_default();
			tracing::warn!(%status, table, "Store request failed.");

			return Err(Error::InvalidResponse { message: describe_failure(table, status, &body) });
		}

		let rows: Vec<T> = res.json().await?;
		tracing::debug!(table, rows = rows.len(), "Store request succeeded.");

		Ok(rows)
	}
}

fn describe_failure(table: &str, status: StatusCode, body: &str) -> String {
	let detail = serde_json::from_str::<Value>(body)
		.ok()
		.and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_string))
		.unwrap_or_else(|| body.chars().take(ERROR_BODY_LIMIT).collect());

	if detail.trim().is_empty() {
		format!("Request to {table} failed with status {status}.")
	} else {
		format!("Request to {table} failed with status {status}: {detail}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn failure_messages_prefer_the_gateway_message() {
		let message = describe_failure(
			"wine",
			StatusCode::UNAUTHORIZED,
			r#"{"message":"Invalid API key","hint":"Double check your key"}"#,
		);

		assert_eq!(message, "Request to wine failed with status 401 Unauthorized: Invalid API key");
		assert_eq!(
			describe_failure("wine", StatusCode::BAD_GATEWAY, ""),
			"Request to wine failed with status 502 Bad Gateway."
		);
	}
}
