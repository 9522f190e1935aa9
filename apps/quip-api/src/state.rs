use std::sync::Arc;

use quip_service::SuggestService;

use crate::relay::Relay;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SuggestService>,
	pub relay: Arc<Relay>,
}
impl AppState {
	pub fn new(config: quip_config::Config) -> Self {
		Self::with_service(SuggestService::new(config))
	}

	pub fn with_service(service: SuggestService) -> Self {
		Self { service: Arc::new(service), relay: Arc::new(Relay::new()) }
	}
}
