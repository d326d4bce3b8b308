use std::collections::HashMap;

use draws_export::state::{DrawResult, Participant, Prize, SessionOptions, SessionState};

use crate::error::DrawError;
use crate::rand::{SecureRandomSource, UniformSampler};

/// Participants still eligible to win, indexed by ticket number.
/// Removal swaps the last participant into the freed slot, so the order is not kept
#[derive(Debug, Clone, Default)]
pub struct Pool {
    participants: Vec<Participant>,
    slots: HashMap<String, usize>,
}

impl Pool {
    pub fn new(participants: &[Participant]) -> Self {
        let slots: HashMap<String, usize> = participants
            .iter()
            .enumerate()
            .map(|(slot, participant)| (participant.ticket_number.clone(), slot))
            .collect();

        // Uniqueness is the roster builder's job, we only check it in debug builds
        debug_assert_eq!(
            slots.len(),
            participants.len(),
            "ticket numbers must be unique within a participant list"
        );

        Self {
            participants: participants.to_vec(),
            slots,
        }
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&Participant> {
        self.participants.get(slot)
    }

    pub fn contains(&self, ticket_number: &str) -> bool {
        self.slots.contains_key(ticket_number)
    }

    pub fn remove(&mut self, ticket_number: &str) -> Option<Participant> {
        let slot = self.slots.remove(ticket_number)?;
        let removed = self.participants.swap_remove(slot);
        if let Some(moved) = self.participants.get(slot) {
            self.slots.insert(moved.ticket_number.clone(), slot);
        }
        Some(removed)
    }
}

/// Everything one draw session owns.
/// Pool and results live and die together, nothing here outlives the session
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub options: SessionOptions,
    pub participants: Vec<Participant>,
    pub prizes: Vec<Prize>,
    pub pool: Pool,
    pub results: Vec<DrawResult>,
    pub position: usize,
    pub state: SessionState,
    pub validated: Option<bool>,
}

impl SessionInfo {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            participants: vec![],
            prizes: vec![],
            pool: Pool::default(),
            results: vec![],
            position: 0,
            state: SessionState::Idle,
            validated: None,
        }
    }

    /// Drops every piece of session data, keeping only the options
    pub fn discard(&mut self, state: SessionState) {
        self.participants.clear();
        self.prizes.clear();
        self.pool = Pool::default();
        self.results.clear();
        self.position = 0;
        self.validated = None;
        self.state = state;
    }
}

/// Picks the ticket number of the next winner, uniformly among the pool
pub fn pick_winner_ticket<S: SecureRandomSource>(
    sampler: &mut UniformSampler<S>,
    pool: &Pool,
) -> Result<String, DrawError> {
    let slot = sampler.next_index(pool.len())?;
    pool.get(slot)
        .map(|participant| participant.ticket_number.clone())
        .ok_or(DrawError::EmptyPool {})
}
