//! Catalog load lifecycle.
//!
//! Every `load` takes a fresh token from the service's generation counter. A completion only
//! commits while its token is still the newest one, so a slow earlier request can never overwrite
//! the result of a later one.

use std::sync::{Arc, atomic::Ordering};

use serde::Serialize;
use time::OffsetDateTime;

use crate::{CatalogService, Error, Result};
use vintager_domain::{AnnotatedItem, Tag};

#[derive(Clone, Debug)]
pub enum LoadState {
	Idle,
	Loading,
	Ready(Arc<CatalogSnapshot>),
	Errored { message: String },
}
impl LoadState {
	pub fn status(&self) -> &'static str {
		match self {
			Self::Idle => "idle",
			Self::Loading => "loading",
			Self::Ready(_) => "ready",
			Self::Errored { .. } => "errored",
		}
	}
}

/// Stitched catalog plus the tag dictionary it was built from.
#[derive(Clone, Debug)]
pub struct CatalogSnapshot {
	pub items: Vec<AnnotatedItem>,
	pub tags: Vec<Tag>,
	pub loaded_at: OffsetDateTime,
	/// Set when links or tags failed to load and items carry no tags.
	pub partial: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct StateView {
	pub status: &'static str,
	pub message: Option<String>,
	pub item_count: Option<usize>,
	pub tag_count: Option<usize>,
	pub partial: bool,
	#[serde(with = "crate::time_serde::option")]
	pub loaded_at: Option<OffsetDateTime>,
}
impl From<&LoadState> for StateView {
	fn from(state: &LoadState) -> Self {
		let mut view = Self {
			status: state.status(),
			message: None,
			item_count: None,
			tag_count: None,
			partial: false,
			loaded_at: None,
		};

		match state {
			LoadState::Ready(snapshot) => {
				view.item_count = Some(snapshot.items.len());
				view.tag_count = Some(snapshot.tags.len());
				view.partial = snapshot.partial;
				view.loaded_at = Some(snapshot.loaded_at);
			},
			LoadState::Errored { message } => view.message = Some(message.clone()),
			LoadState::Idle | LoadState::Loading => {},
		}

		view
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
	Committed,
	/// A newer load started before this one finished; its result was dropped.
	Superseded,
}

impl CatalogService {
	pub async fn load(&self) -> LoadOutcome {
		let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
		let pending = PendingLoad { service: self, token, previous: Some(self.state()) };
		self.commit(token, LoadState::Loading);
		tracing::info!(token, "Loading catalog.");

		let items = match self.source.fetch_items().await {
			Ok(items) => items,
			Err(err) => {
				tracing::error!(token, error = %err, "Catalog items failed to load.");

				return pending.finish(LoadState::Errored { message: err.to_string() });
			},
		};
		let mut partial = false;
		let links = self.source.fetch_links().await.unwrap_or_else(|err| {
			tracing::warn!(token, error = %err, "Item tag links failed to load. Continuing without tags.");
			partial = true;

			Vec::new()
		});
		let tags = self.source.fetch_tags().await.unwrap_or_else(|err| {
			tracing::warn!(token, error = %err, "Tag dictionary failed to load. Continuing without tags.");
			partial = true;

			Vec::new()
		});
		let annotated = vintager_domain::stitch(&items, &links, &tags);
		tracing::info!(token, items = annotated.len(), tags = tags.len(), partial, "Catalog loaded.");

		pending.finish(LoadState::Ready(Arc::new(CatalogSnapshot {
			items: annotated,
			tags,
			loaded_at: OffsetDateTime::now_utc(),
			partial,
		})))
	}

	pub fn state(&self) -> LoadState {
		self.state.read().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn state_view(&self) -> StateView {
		StateView::from(&self.state())
	}

	/// The current snapshot, or the reason there is none.
	pub fn snapshot(&self) -> Result<Arc<CatalogSnapshot>> {
		match self.state() {
			LoadState::Ready(snapshot) => Ok(snapshot),
			LoadState::Idle | LoadState::Loading => Err(Error::NotReady),
			LoadState::Errored { message } => Err(Error::LoadFailed { message }),
		}
	}

	fn commit(&self, token: u64, next: LoadState) -> LoadOutcome {
		let mut state = self.state.write().unwrap_or_else(|err| err.into_inner());

		if self.generation.load(Ordering::SeqCst) != token {
			tracing::debug!(token, status = next.status(), "Discarding stale catalog load.");

			return LoadOutcome::Superseded;
		}

		*state = next;

		LoadOutcome::Committed
	}
}

/// Owns the `Loading` state of one load. Dropping it unfinished (the caller's future was
/// cancelled) puts back the state seen before the load, or `Errored` if there was nothing to put
/// back.
struct PendingLoad<'a> {
	service: &'a CatalogService,
	token: u64,
	previous: Option<LoadState>,
}
impl PendingLoad<'_> {
	fn finish(mut self, next: LoadState) -> LoadOutcome {
		self.previous = None;

		self.service.commit(self.token, next)
	}
}
impl Drop for PendingLoad<'_> {
	fn drop(&mut self) {
		let Some(previous) = self.previous.take() else {
			return;
		};
		let restored = match previous {
			LoadState::Ready(_) | LoadState::Errored { .. } => previous,
			LoadState::Idle | LoadState::Loading => LoadState::Errored {
				message: "Catalog load was cancelled before it finished.".to_string(),
			},
		};
		tracing::warn!(token = self.token, status = restored.status(), "Catalog load cancelled.");
		self.service.commit(self.token, restored);
	}
}
