pub mod catalog;
pub mod detail;
pub mod error;
pub mod mutation;
pub mod session;
pub mod state;
pub mod time_serde;

use std::{
	future::Future,
	pin::Pin,
	sync::{Arc, RwLock, atomic::AtomicU64},
};

pub use catalog::{CardActions, CardGroup, ListResponse, TagOption, WineCard};
pub use detail::WineDetail;
pub use error::{Error, Result};
pub use mutation::{MutationAction, MutationReceipt, PLAYGROUND_NOTICE, WineDraft};
pub use session::{AdminSession, FileStore, KeyValueStore, MemoryStore};
pub use state::{CatalogSnapshot, LoadOutcome, LoadState, StateView};
use vintager_config::Config;
use vintager_domain::{CatalogItem, ItemTagLink, Tag};
use vintager_store::StoreClient;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read access to the hosted catalog tables.
pub trait CatalogSource
where
	Self: Send + Sync,
{
	fn fetch_items(&self) -> BoxFuture<'_, vintager_store::Result<Vec<CatalogItem>>>;

	fn fetch_links(&self) -> BoxFuture<'_, vintager_store::Result<Vec<ItemTagLink>>>;

	fn fetch_tags(&self) -> BoxFuture<'_, vintager_store::Result<Vec<Tag>>>;

	fn fetch_item(&self, id: i64) -> BoxFuture<'_, vintager_store::Result<Option<CatalogItem>>>;

	fn fetch_item_tags(&self, id: i64) -> BoxFuture<'_, vintager_store::Result<Vec<Tag>>>;
}

pub struct CatalogService {
	pub cfg: Config,
	pub session: AdminSession,
	source: Arc<dyn CatalogSource>,
	state: RwLock<LoadState>,
	generation: AtomicU64,
}

impl CatalogSource for StoreClient {
	fn fetch_items(&self) -> BoxFuture<'_, vintager_store::Result<Vec<CatalogItem>>> {
		Box::pin(StoreClient::fetch_items(self))
	}

	fn fetch_links(&self) -> BoxFuture<'_, vintager_store::Result<Vec<ItemTagLink>>> {
		Box::pin(StoreClient::fetch_links(self))
	}

	fn fetch_tags(&self) -> BoxFuture<'_, vintager_store::Result<Vec<Tag>>> {
		Box::pin(StoreClient::fetch_tags(self))
	}

	fn fetch_item(&self, id: i64) -> BoxFuture<'_, vintager_store::Result<Option<CatalogItem>>> {
		Box::pin(StoreClient::fetch_item(self, id))
	}

	fn fetch_item_tags(&self, id: i64) -> BoxFuture<'_, vintager_store::Result<Vec<Tag>>> {
		Box::pin(StoreClient::fetch_item_tags(self, id))
	}
}

impl CatalogService {
	/// Builds the service against the configured store and session file.
	pub fn new(cfg: Config) -> Result<Self> {
		let source = Arc::new(StoreClient::new(&cfg.store)?);
		let store: Arc<dyn KeyValueStore> = match cfg.session.path.as_ref() {
			Some(path) => Arc::new(FileStore::new(path.clone())),
			None => Arc::new(MemoryStore::default()),
		};
		let session = AdminSession::restore(store, &cfg.session.key)?;

		Ok(Self::with_source(cfg, source, session))
	}

	pub fn with_source(cfg: Config, source: Arc<dyn CatalogSource>, session: AdminSession) -> Self {
		Self {
			cfg,
			session,
			source,
			state: RwLock::new(LoadState::Idle),
			generation: AtomicU64::new(0),
		}
	}
}
