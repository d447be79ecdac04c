//! Service wiring: data layer, session tokens, user directory, assistant.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use tokio_stream::{StreamExt, wrappers::BroadcastStream};
use tracing::info;

use logihub_assistant::{Assistant, AssistantProxy, LlmProvider, OpenAiChatClient};
use logihub_auth::{Hs256SessionTokens, MockUserDirectory, SessionTokens};
use logihub_infra::{DataService, SupabaseSource};
use secrecy::ExposeSecret;

use crate::config::AppConfig;

pub struct AppServices {
    pub data: DataService,
    pub users: MockUserDirectory,
    pub tokens: Arc<dyn SessionTokens>,
    pub assistant: Assistant,
    /// Backs `/functions/ai-assistant`; `None` without an API key.
    pub proxy: Option<AssistantProxy>,
}

impl AppServices {
    pub fn new(data: DataService, tokens: Arc<dyn SessionTokens>, provider: Option<Arc<dyn LlmProvider>>) -> Self {
        let proxy = provider.map(AssistantProxy::new);
        let assistant = match &proxy {
            Some(p) => Assistant::with_remote(p.clone()),
            None => Assistant::rules_only(),
        };
        Self { data, users: MockUserDirectory::new(), tokens, assistant, proxy }
    }
}

pub fn build_services(config: &AppConfig) -> AppServices {
    let tokens: Arc<dyn SessionTokens> = Arc::new(Hs256SessionTokens::new(
        config.session.secret.expose_secret().as_bytes(),
        config.session_ttl(),
    ));

    let mut data = DataService::new();
    if let Some(supabase) = &config.supabase {
        info!(url = %supabase.url, "remote data source enabled");
        data = data.with_remote(Arc::new(SupabaseSource::new(supabase.settings())));
    }

    let provider = config.assistant.llm_settings().map(|settings| {
        info!(model = %settings.model, "assistant model configured");
        Arc::new(OpenAiChatClient::new(settings)) as Arc<dyn LlmProvider>
    });

    AppServices::new(data, tokens, provider)
}

/// SSE stream of data change notices. Lagged receivers skip what they missed.
pub fn change_stream(services: Arc<AppServices>) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = services.data.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(notice) => {
            let data = serde_json::to_string(&notice).unwrap_or_else(|_| "{}".to_string());
            Some(Ok(SseEvent::default().event(notice.collection.as_str()).data(data)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
