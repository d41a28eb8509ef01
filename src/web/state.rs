use crate::config::AppConfig;
use crate::convert::Converter;
use minijinja::Environment;
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use tokio::sync::RwLock;

use super::templates::init_templates;

/// Shared application state for the web server
pub struct AppState {
    pub config: AppConfig,
    pub converter: Converter,
    pub template_env: Environment<'static>,
    /// Conversion cache keyed by the exact question text
    pub query_cache: RwLock<HashMap<String, String>>,
    pub query_count: AtomicU64,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: AppConfig, converter: Converter) -> Self {
        Self {
            config,
            converter,
            template_env: init_templates(),
            query_cache: RwLock::new(HashMap::new()),
            query_count: AtomicU64::new(0),
            startup_time: chrono::Utc::now(),
        }
    }
}
