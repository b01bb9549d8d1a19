use std::sync::Arc;

use vintager_service::CatalogService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CatalogService>,
}
impl AppState {
	pub fn new(config: vintager_config::Config) -> color_eyre::Result<Self> {
		let service = CatalogService::new(config)?;

		Ok(Self { service: Arc::new(service) })
	}

	pub fn from_service(service: Arc<CatalogService>) -> Self {
		Self { service }
	}
}
