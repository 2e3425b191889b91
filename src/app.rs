use crate::constants::env as env_constants;
use crate::errors::AdsError;
use crate::graph::client::GraphClient;
use crate::graph::transport::GraphTransport;
use crate::managers::ads::AdsManager;
use crate::managers::call::CallManager;
use crate::managers::create::CreateManager;
use crate::services::logger::{LogLevel, Logger};
use crate::services::validation::Validation;
use crate::utils::select::{PromptInput, TermPrompt};
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub ads: Arc<AdsManager>,
    pub create: Arc<CreateManager>,
    pub call: Arc<CallManager>,
}

impl App {
    pub fn initialize(access_token: Option<String>, verbose: bool) -> Result<Self, AdsError> {
        let mut logger = Logger::new("adgraph");
        if verbose {
            logger.set_level(LogLevel::Debug);
        }
        let token = access_token.or_else(|| std::env::var(env_constants::ACCESS_TOKEN).ok());
        if token.is_none() {
            logger.warn(
                "No access token supplied; the Graph API will reject requests",
                None,
            );
        }
        let transport: Arc<dyn GraphTransport> = Arc::new(GraphClient::new(logger.clone(), token)?);
        Ok(Self::wire(logger, transport, Box::new(TermPrompt)))
    }

    /// Wiring seam shared with the tests, which inject scripted transports
    /// and prompts.
    pub fn wire(
        logger: Logger,
        transport: Arc<dyn GraphTransport>,
        prompt: Box<dyn PromptInput>,
    ) -> Self {
        let validation = Validation::new();
        let ads = Arc::new(AdsManager::new(logger.clone(), transport.clone()));
        let create = Arc::new(CreateManager::new(
            logger.clone(),
            transport.clone(),
            ads.clone(),
            validation,
            prompt,
        ));
        let call = Arc::new(CallManager::new(logger.clone(), transport, ads.clone()));
        Self {
            logger,
            ads,
            create,
            call,
        }
    }
}
