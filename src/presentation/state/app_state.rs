use std::sync::Arc;

use tokio::sync::RwLock;

use crate::application::ports::{ChatClient, FileLoader, ImageStager, SearchClient};
use crate::application::services::{AssistantService, ContextService};
use crate::domain::Session;

pub struct AppState<F, I, C, S>
where
    F: FileLoader,
    I: ImageStager,
    C: ChatClient,
    S: SearchClient,
{
    pub context_service: Arc<ContextService<F, I>>,
    pub assistant_service: Arc<AssistantService<C>>,
    pub search_client: Arc<S>,
    pub session: Arc<RwLock<Session>>,
}

impl<F, I, C, S> Clone for AppState<F, I, C, S>
where
    F: FileLoader,
    I: ImageStager,
    C: ChatClient,
    S: SearchClient,
{
    fn clone(&self) -> Self {
        Self {
            context_service: Arc::clone(&self.context_service),
            assistant_service: Arc::clone(&self.assistant_service),
            search_client: Arc::clone(&self.search_client),
            session: Arc::clone(&self.session),
        }
    }
}
