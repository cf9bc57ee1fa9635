use std::sync::Arc;

use crate::{config::AppConfig, services::trips::TripService, store::Repository};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Repository>,
    pub trips: TripService,
}

impl AppState {
    pub fn new(config: &AppConfig, store: Arc<dyn Repository>) -> Self {
        let trips = TripService::new(store.clone(), config.driver_status_policy);
        Self { store, trips }
    }
}
