use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::RwLock;

use blr_pulse::application::ports::FileLoader;
use blr_pulse::application::services::{AssistantService, ContextService};
use blr_pulse::domain::Session;
use blr_pulse::infrastructure::imaging::PngImageStager;
use blr_pulse::infrastructure::llm::OpenAiChatClient;
use blr_pulse::infrastructure::observability::init_tracing;
use blr_pulse::infrastructure::search::GoogleSearchClient;
use blr_pulse::infrastructure::text_processing::{
    CompositeFileLoader, PdfAdapter, PlainTextAdapter,
};
use blr_pulse::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    init_tracing(&settings.logging);

    let file_loader = Arc::new(CompositeFileLoader::new(
        Arc::new(PlainTextAdapter) as Arc<dyn FileLoader>,
        Arc::new(PdfAdapter::new()) as Arc<dyn FileLoader>,
    ));
    let image_stager = Arc::new(PngImageStager::new());
    let chat_client = Arc::new(OpenAiChatClient::new(&settings.llm));
    let search_client = Arc::new(GoogleSearchClient::new(&settings.search));

    let context_service = Arc::new(ContextService::new(
        Arc::clone(&file_loader),
        Arc::clone(&image_stager),
    ));
    let assistant_service = Arc::new(AssistantService::new(Arc::clone(&chat_client)));

    let state = AppState {
        context_service,
        assistant_service,
        search_client,
        session: Arc::new(RwLock::new(Session::new())),
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
