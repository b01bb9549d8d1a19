use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use vintager_api::{routes, state::AppState};
use vintager_domain::{CatalogItem, ItemTagLink, Tag};
use vintager_service::{AdminSession, BoxFuture, CatalogService, CatalogSource};
use vintager_testkit::{SampleCatalog, sample_catalog, sample_config};

struct SampleSource {
	catalog: SampleCatalog,
	fail_items: bool,
}
impl CatalogSource for SampleSource {
	fn fetch_items(&self) -> BoxFuture<'_, vintager_store::Result<Vec<CatalogItem>>> {
		Box::pin(async move {
			if self.fail_items {
				return Err(vintager_store::Error::InvalidResponse {
					message: "wine is unavailable.".to_string(),
				});
			}

			Ok(self.catalog.items.clone())
		})
	}

	fn fetch_links(&self) -> BoxFuture<'_, vintager_store::Result<Vec<ItemTagLink>>> {
		Box::pin(async move { Ok(self.catalog.links.clone()) })
	}

	fn fetch_tags(&self) -> BoxFuture<'_, vintager_store::Result<Vec<Tag>>> {
		Box::pin(async move { Ok(self.catalog.tags.clone()) })
	}

	fn fetch_item(&self, id: i64) -> BoxFuture<'_, vintager_store::Result<Option<CatalogItem>>> {
		Box::pin(async move { Ok(self.catalog.items.iter().find(|item| item.id == id).cloned()) })
	}

	fn fetch_item_tags(&self, id: i64) -> BoxFuture<'_, vintager_store::Result<Vec<Tag>>> {
		Box::pin(async move {
			let annotated = self.catalog.annotated();
			let labels = annotated
				.iter()
				.find(|entry| entry.item.id == id)
				.map(|entry| entry.tags.clone())
				.unwrap_or_default();

			Ok(self
				.catalog
				.tags
				.iter()
				.filter(|tag| labels.contains(&tag.label))
				.cloned()
				.collect())
		})
	}
}

fn service(fail_items: bool) -> Arc<CatalogService> {
	let source = SampleSource { catalog: sample_catalog(), fail_items };

	Arc::new(CatalogService::with_source(
		sample_config("http://127.0.0.1:9"),
		Arc::new(source),
		AdminSession::ephemeral("vintager:isAdmin"),
	))
}

async fn loaded_app() -> (Router, Arc<CatalogService>) {
	let service = service(false);

	service.load().await;

	(routes::router(AppState::from_service(service.clone())), service)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
	let mut builder = Request::builder().method(method).uri(uri);
	let body = match body {
		Some(body) => {
			builder = builder.header("content-type", "application/json");

			Body::from(body.to_string())
		},
		None => Body::empty(),
	};
	let response = app
		.clone()
		.oneshot(builder.body(body).expect("Failed to build request."))
		.await
		.expect("Failed to call the router.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Failed to parse response.")
	};

	(status, json)
}

#[tokio::test]
async fn health_ok() {
	let (app, _) = loaded_app().await;
	let (status, _) = call(&app, "GET", "/health", None).await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn catalog_reports_not_ready_before_load() {
	let app = routes::router(AppState::from_service(service(false)));
	let (status, json) = call(&app, "GET", "/v1/wines", None).await;

	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(json["error_code"], "CATALOG_NOT_READY");

	let (status, json) = call(&app, "GET", "/v1/catalog/state", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["status"], "idle");

	let (_, json) = call(&app, "POST", "/v1/catalog/reload", None).await;

	assert_eq!(json["status"], "ready");
	assert_eq!(json["item_count"], 8);
}

#[tokio::test]
async fn failed_load_is_reported() {
	let service = service(true);

	service.load().await;

	let app = routes::router(AppState::from_service(service));
	let (status, json) = call(&app, "GET", "/v1/wines/facets", None).await;

	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(json["error_code"], "CATALOG_LOAD_FAILED");
}

#[tokio::test]
async fn default_listing_groups_by_country() {
	let (app, _) = loaded_app().await;
	let (status, json) = call(&app, "GET", "/v1/wines", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["total"], 8);
	assert_eq!(json["groups"][0]["key"], "Australia");
	assert_eq!(json["groups"][0]["items"][0]["title"], "Grange • 2018");
	assert_eq!(json["groups"][3]["key"], "Other");
}

#[tokio::test]
async fn query_filters_and_sorts() {
	let (app, _) = loaded_app().await;
	let criteria = serde_json::json!({
		"categories": ["France", "Other"],
		"sort": "price_desc",
	});
	let (status, json) = call(&app, "POST", "/v1/wines/query", Some(criteria)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["matched"], 5);

	let france: Vec<i64> = json["groups"][0]["items"]
		.as_array()
		.expect("Group items must be an array.")
		.iter()
		.filter_map(|card| card["id"].as_i64())
		.collect();

	assert_eq!(json["groups"][0]["key"], "France");
	assert_eq!(france, vec![5, 3, 4]);
}

#[tokio::test]
async fn malformed_criteria_are_rejected() {
	let (app, _) = loaded_app().await;
	let (status, json) =
		call(&app, "POST", "/v1/wines/query", Some(serde_json::json!({ "sort": "cheapest" }))).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn facets_and_tag_options() {
	let (app, _) = loaded_app().await;
	let (_, facets) = call(&app, "GET", "/v1/wines/facets", None).await;

	assert_eq!(facets["categories"], serde_json::json!(["Australia", "France", "Italy"]));
	assert_eq!(facets["price"]["max"], 950.0);

	let (status, options) = call(&app, "GET", "/v1/tags/options?q=oa", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(options, serde_json::json!([{ "id": 11, "label": "Oak" }]));
}

#[tokio::test]
async fn detail_and_missing_wine() {
	let (app, _) = loaded_app().await;
	let (status, json) = call(&app, "GET", "/v1/wines/6", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["name"], "Barolo");
	assert_eq!(json["tags"], serde_json::json!(["Leather"]));

	let (status, json) = call(&app, "GET", "/v1/wines/404", None).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "NOT_FOUND");

	let (status, json) = call(&app, "GET", "/v1/wines/abc", None).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn mutations_need_an_admin_session() {
	let (app, service) = loaded_app().await;
	let draft = serde_json::json!({ "name": "Hill of Grace", "vintage": 2017 });
	let (status, json) = call(&app, "POST", "/v1/wines", Some(draft.clone())).await;

	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(json["error_code"], "ADMIN_REQUIRED");

	let (_, session) = call(&app, "POST", "/v1/session/login", None).await;

	assert_eq!(session["admin"], true);

	let (status, json) = call(&app, "POST", "/v1/wines", Some(draft.clone())).await;

	assert_eq!(status, StatusCode::ACCEPTED);
	assert_eq!(json["applied"], false);
	assert_eq!(json["notice"], "This is a playground app. No changes will be made.");

	let (status, _) = call(&app, "PUT", "/v1/wines/2", Some(draft)).await;

	assert_eq!(status, StatusCode::ACCEPTED);

	let (status, json) = call(&app, "DELETE", "/v1/wines/1", None).await;

	assert_eq!(status, StatusCode::ACCEPTED);
	assert_eq!(json["action"], "delete");
	assert_eq!(service.snapshot().expect("Catalog should be ready.").items.len(), 8);

	let (status, json) =
		call(&app, "POST", "/v1/wines", Some(serde_json::json!({ "name": "" }))).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "INVALID_REQUEST");

	call(&app, "POST", "/v1/session/logout", None).await;

	let (_, session) = call(&app, "GET", "/v1/session", None).await;

	assert_eq!(session["admin"], false);
}
