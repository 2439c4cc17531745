use std::sync::Arc;

use crate::application::ports::StagingStore;
use crate::application::services::ComplianceService;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub compliance_service: Arc<ComplianceService>,
    pub staging_store: Arc<dyn StagingStore>,
    pub settings: Arc<Settings>,
}
