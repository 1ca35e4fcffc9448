use std::sync::Arc;

use roster_engine::{EngineResult, ReviewService};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub engine: ReviewService,
}

/// Runs an engine call on the blocking pool. Storage calls hold a mutex
/// and do disk I/O, so they stay off the async runtime.
pub async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&ReviewService) -> EngineResult<T> + Send + 'static,
    T: Send + 'static,
{
    let engine = state.engine.clone();
    Ok(tokio::task::spawn_blocking(move || f(&engine)).await??)
}
