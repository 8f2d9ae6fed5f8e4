use std::sync::Arc;

use crate::config::Settings;
use crate::gateway::{ModelGateway, OpenAiCompatibleGateway};
use crate::service::AssistanceService;
use crate::upload::UploadPolicy;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub service: Arc<AssistanceService>,
    pub image_policy: Arc<UploadPolicy>,
    pub document_policy: Arc<UploadPolicy>,
}

impl AppState {
    /// State backed by the configured OpenAI-compatible provider.
    pub fn new(settings: Settings) -> Self {
        let gateway = Arc::new(OpenAiCompatibleGateway::from_settings(&settings));
        Self::with_gateway(settings, gateway)
    }

    pub fn with_gateway(settings: Settings, gateway: Arc<dyn ModelGateway>) -> Self {
        let settings = Arc::new(settings);
        Self {
            image_policy: Arc::new(UploadPolicy::for_images(&settings)),
            document_policy: Arc::new(UploadPolicy::for_documents(&settings)),
            service: Arc::new(AssistanceService::new(settings.clone(), gateway)),
            settings,
        }
    }
}
