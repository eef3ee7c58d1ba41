use std::sync::Arc;

use hideseek_backend::domain::challenge_picker::SequencePicker;
use hideseek_backend::error::AppError;
use hideseek_backend::infra::state::build_state;
use hideseek_backend::state::app_state::AppState;
use hideseek_backend::store::DocumentStore;

/// Always draws the first prompt of the pool.
pub fn first_prompt() -> Arc<SequencePicker> {
    Arc::new(SequencePicker::new(vec![0]))
}

/// Memory store, default Hong Kong game, deterministic prompts.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state().with_picker(first_prompt()).build().await
}

pub async fn build_test_state_with_store(
    store: Arc<dyn DocumentStore>,
) -> Result<AppState, AppError> {
    build_state()
        .with_picker(first_prompt())
        .with_store(store)
        .build()
        .await
}
