//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! Services are generic over repository/gateway/codec traits, but AppState
//! pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use sada_core::analysis::AnalysisService;
use sada_core::chat::ChatService;
use sada_infra::attachment::Base64Codec;
use sada_infra::config::{resolve_api_key, resolve_database_url};
use sada_infra::llm::gemini::GeminiProvider;
use sada_infra::sqlite::analysis::SqliteAnalysisRepository;
use sada_infra::sqlite::chat::SqliteChatRepository;
use sada_infra::sqlite::pool::DatabasePool;
use sada_infra::sqlite::status::SqliteStatusRepository;
use sada_types::config::ServiceConfig;

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteChatService = ChatService<SqliteChatRepository, GeminiProvider, Base64Codec>;

pub type ConcreteAnalysisService =
    AnalysisService<SqliteAnalysisRepository, SqliteChatRepository, GeminiProvider, Base64Codec>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub analysis_service: Arc<ConcreteAnalysisService>,
    pub status_repo: Arc<SqliteStatusRepository>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the DB, wire services.
    ///
    /// Fails fast when the model API key env var is unset -- the key's
    /// lifecycle is process start to shutdown, never mutated afterwards.
    pub async fn init(config: &ServiceConfig, data_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = resolve_database_url(config, &data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;

        let api_key = resolve_api_key(config).with_context(|| {
            format!(
                "model API key not found: set the {} environment variable",
                config.model.api_key_env
            )
        })?;

        let enforce_refs = config.chat.enforce_session_refs;

        let chat_service = ChatService::new(
            SqliteChatRepository::new(db_pool.clone()),
            GeminiProvider::from_config(&config.model, api_key.clone()),
            Base64Codec,
            enforce_refs,
        );

        let analysis_service = AnalysisService::new(
            SqliteAnalysisRepository::new(db_pool.clone()),
            SqliteChatRepository::new(db_pool.clone()),
            GeminiProvider::from_config(&config.model, api_key),
            Base64Codec,
            enforce_refs,
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            analysis_service: Arc::new(analysis_service),
            status_repo: Arc::new(SqliteStatusRepository::new(db_pool.clone())),
            db_pool,
        })
    }
}
