use std::sync::Arc;
use std::time::Duration;

use crate::telemetry::TelemetryService;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: TelemetryService,
}

impl AppState {
    pub fn request_timeout(&self) -> Duration {
        self.config.web.request_timeout
    }
}
