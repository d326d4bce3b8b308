use chrono::{DateTime, Utc};
use draws_export::msg::{AuditRow, ExportRow, InputError, SessionMsg, SessionStats};
use draws_export::state::{
    DrawResult, Participant, Prize, SessionOptions, SessionOptionsMsg, SessionState,
};

use crate::error::DrawError;
use crate::execute::{
    execute_abort, execute_draw, execute_initialize, execute_modify_options,
};
use crate::hook::PresentationHook;
use crate::query::{query_audit_rows, query_export_rows, query_stats};
use crate::rand::{shuffle, OsEntropy, SecureRandomSource, UniformSampler};
use crate::state::SessionInfo;

/// Runs one raffle at a time : owns the pool of remaining participants, the prize list and the result log.
///
/// Every mutating call takes `&mut self`, so a draw can't start while another one (or its presentation) is in flight.
/// Sharing an orchestrator between tasks needs a mutex or an actor around it.
pub struct DrawOrchestrator<S: SecureRandomSource = OsEntropy> {
    sampler: UniformSampler<S>,
    session: SessionInfo,
}

impl DrawOrchestrator<OsEntropy> {
    /// Orchestrator drawing from the operating system CSPRNG
    pub fn new() -> Self {
        Self::with_source(OsEntropy)
    }
}

impl Default for DrawOrchestrator<OsEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SecureRandomSource> DrawOrchestrator<S> {
    pub fn with_source(source: S) -> Self {
        Self::with_options(source, SessionOptions::default())
    }

    pub fn with_options(source: S, options: SessionOptions) -> Self {
        Self {
            sampler: UniformSampler::new(source),
            session: SessionInfo::new(options),
        }
    }

    pub fn initialize(
        &mut self,
        participants: Vec<Participant>,
        prizes: Vec<Prize>,
    ) -> Result<(), DrawError> {
        execute_initialize(&mut self.session, participants, prizes)
    }

    /// Opens a session from a roster message : options are applied, rows validated, then the session initialized
    pub fn open(&mut self, msg: SessionMsg) -> Result<(), DrawError> {
        if !self.session.state.can_initialize() {
            return Err(DrawError::WrongStateForInitialize {
                status: self.session.state,
            });
        }

        let options = SessionOptionsMsg {
            name: Some(msg.name.trim().to_string()),
            ..msg.options.clone()
        };
        // The overflow policy falls back to the orchestrator's own options
        let mut msg = msg;
        msg.options.prize_overflow = msg
            .options
            .prize_overflow
            .or(Some(self.session.options.prize_overflow));
        let (participants, prizes) = msg.into_parts().map_err(|err| match err {
            InputError::TooManyPrizes {
                prizes,
                participants,
            } => DrawError::TooManyPrizes {
                prizes,
                participants,
            },
            err => DrawError::Input(err),
        })?;

        let previous_options = self.session.options.clone();
        execute_modify_options(&mut self.session, options)?;
        execute_initialize(&mut self.session, participants, prizes).map_err(|err| {
            self.session.options = previous_options;
            err
        })
    }

    pub fn draw_next(&mut self) -> Result<DrawResult, DrawError> {
        execute_draw(&mut self.session, &mut self.sampler)
    }

    /// Draws the next winner, then hands the committed result to the presentation step and waits for it
    pub async fn draw_and_present<H>(&mut self, hook: &mut H) -> Result<DrawResult, DrawError>
    where
        H: PresentationHook + ?Sized,
    {
        let result = self.draw_next()?;
        hook.on_awarded(&result, self.session.position, self.session.prizes.len())
            .await;
        Ok(result)
    }

    /// Runs a whole raffle : every prize is drawn and presented in order.
    /// Any failure aborts the session, no partial result is kept
    pub async fn conduct<H>(
        &mut self,
        participants: Vec<Participant>,
        prizes: Vec<Prize>,
        hook: &mut H,
    ) -> Result<Vec<DrawResult>, DrawError>
    where
        H: PresentationHook + ?Sized,
    {
        self.initialize(participants, prizes)?;

        while !self.is_complete() {
            if let Err(err) = self.draw_and_present(hook).await {
                self.session.discard(SessionState::Aborted);
                return Err(err);
            }
        }

        Ok(self.session.results.clone())
    }

    pub fn abort(&mut self) -> Result<(), DrawError> {
        execute_abort(&mut self.session)
    }

    pub fn modify_options(&mut self, options: SessionOptionsMsg) -> Result<(), DrawError> {
        execute_modify_options(&mut self.session, options)
    }

    /// Participants in a random order, for display only. Winners are never picked from this list
    pub fn display_order(&mut self) -> Result<Vec<Participant>, DrawError> {
        shuffle(&mut self.sampler, &self.session.participants)
    }

    /// True once every prize of the session is awarded
    pub fn is_complete(&self) -> bool {
        self.session.state == SessionState::Complete
    }

    pub fn current_results(&self) -> &[DrawResult] {
        &self.session.results
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn pool_size(&self) -> usize {
        self.session.pool.len()
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.session.prizes
    }

    pub fn participants(&self) -> &[Participant] {
        &self.session.participants
    }

    pub fn options(&self) -> &SessionOptions {
        &self.session.options
    }

    pub fn stats(&self) -> SessionStats {
        query_stats(&self.session)
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        query_export_rows(&self.session)
    }

    pub fn audit_rows(&self, generated_at: DateTime<Utc>) -> Vec<AuditRow> {
        query_audit_rows(&self.session, generated_at)
    }

    /// Random words rejected by the sampler over the orchestrator's lifetime
    pub fn rejections(&self) -> u64 {
        self.sampler.rejections()
    }
}
