use async_trait::async_trait;
use draws_export::state::DrawResult;

/// Presentation step run after each committed draw.
/// The orchestrator awaits it before accepting the next draw and never looks at what it does.
/// `sequence_index` starts at 1
#[async_trait]
pub trait PresentationHook: Send {
    async fn on_awarded(&mut self, result: &DrawResult, sequence_index: usize, total_prizes: usize);
}

/// Hook that returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPresentation;

#[async_trait]
impl PresentationHook for NoPresentation {
    async fn on_awarded(&mut self, _result: &DrawResult, _sequence_index: usize, _total_prizes: usize) {}
}
