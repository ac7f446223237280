// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::services::predictor::{RandomSource, ThreadRandom, YieldModel};

pub type SharedState = Arc<AppState>;

/// Read-only after startup; handlers never mutate it.
pub struct AppState {
    pub model: YieldModel,
    pub random: Arc<dyn RandomSource>,
    pub predict_delay: Duration,
}

impl AppState {
    pub fn new(predict_delay: Duration) -> Self {
        Self {
            model: YieldModel::default(),
            random: Arc::new(ThreadRandom),
            predict_delay,
        }
    }

    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Arc::new(random);
        self
    }
}
