use std::time::Duration;

use async_trait::async_trait;
use draws_export::state::DrawResult;
use raffles::PresentationHook;

/// Stands in for the reveal animation : waits a little, then records what was shown
#[derive(Default)]
pub struct RevealRecorder {
    pub delay_ms: u64,
    pub shown: Vec<(usize, usize, DrawResult)>,
}

impl RevealRecorder {
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            shown: vec![],
        }
    }
}

#[async_trait]
impl PresentationHook for RevealRecorder {
    async fn on_awarded(&mut self, result: &DrawResult, sequence_index: usize, total_prizes: usize) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        self.shown
            .push((sequence_index, total_prizes, result.clone()));
    }
}
