use draws_export::state::{
    DrawResult, Participant, Prize, SessionOptions, SessionOptionsMsg, SessionState,
};
use tracing::{debug, error, info, warn};

use crate::error::DrawError;
use crate::rand::{SecureRandomSource, UniformSampler};
use crate::state::{pick_winner_ticket, Pool, SessionInfo};
use crate::validate::validate_results;

/// Opens a new session on the provided participants and prizes.
/// Nothing is touched unless every check passes :
///
/// `participants` and `prizes` must not be empty
///
/// there can't be more prizes than participants, every participant wins at most once
///
/// `max_participant_number` from the session options is enforced when set
///
/// A session can only be opened when no other one is running (Idle, Complete or Aborted)
pub fn execute_initialize(
    session: &mut SessionInfo,
    participants: Vec<Participant>,
    prizes: Vec<Prize>,
) -> Result<(), DrawError> {
    if !session.state.can_initialize() {
        return Err(DrawError::WrongStateForInitialize {
            status: session.state,
        });
    }
    if participants.is_empty() {
        return Err(DrawError::InvalidArgument(
            "no participants provided".to_string(),
        ));
    }
    if prizes.is_empty() {
        return Err(DrawError::InvalidArgument("no prizes provided".to_string()));
    }
    if prizes.len() > participants.len() {
        return Err(DrawError::TooManyPrizes {
            prizes: prizes.len(),
            participants: participants.len(),
        });
    }
    if let Some(max) = session.options.max_participant_number {
        if participants.len() > max as usize {
            return Err(DrawError::InvalidArgument(format!(
                "{} participants exceed the maximum of {}",
                participants.len(),
                max
            )));
        }
    }

    session.pool = Pool::new(&participants);
    session.participants = participants;
    session.prizes = prizes;
    session.results = Vec::with_capacity(session.prizes.len());
    session.position = 0;
    session.validated = None;
    session.state = SessionState::Ready;

    info!(
        name = session.options.name.as_str(),
        comment = session.options.comment.as_deref().unwrap_or_default(),
        participants = session.participants.len(),
        prizes = session.prizes.len(),
        "draw session initialized"
    );
    Ok(())
}

/// Draws the winner of the next prize.
/// Selection, removal from the pool and recording happen in one step :
/// if the randomness provider fails, the session is left exactly as it was
pub fn execute_draw<S: SecureRandomSource>(
    session: &mut SessionInfo,
    sampler: &mut UniformSampler<S>,
) -> Result<DrawResult, DrawError> {
    if !session.state.can_draw() && session.state != SessionState::Complete {
        return Err(DrawError::WrongStateForDraw {
            status: session.state,
        });
    }
    if session.position == session.prizes.len() {
        return Err(DrawError::Complete {});
    }
    if session.pool.is_empty() {
        error!(
            position = session.position,
            prizes = session.prizes.len(),
            "pool exhausted while prizes remain"
        );
        return Err(DrawError::EmptyPool {});
    }

    let previous_state = session.state;
    session.state = SessionState::Drawing;
    debug!(pool_size = session.pool.len(), position = session.position, "drawing");

    let ticket = match pick_winner_ticket(sampler, &session.pool) {
        Ok(ticket) => ticket,
        Err(err) => {
            session.state = previous_state;
            return Err(err);
        }
    };

    // The picked ticket comes from the pool, so it is always found there
    let winner = match session.pool.remove(&ticket) {
        Some(winner) => winner,
        None => {
            session.state = previous_state;
            error!(ticket = ticket.as_str(), "picked ticket missing from the pool");
            return Err(DrawError::EmptyPool {});
        }
    };
    debug_assert!(!session.pool.contains(&ticket));
    let result = DrawResult {
        winner,
        prize: session.prizes[session.position].clone(),
    };
    session.results.push(result.clone());
    session.position += 1;

    info!(
        rank = session.position,
        ticket = result.winner.ticket_number.as_str(),
        prize = result.prize.as_str(),
        "prize awarded"
    );

    if session.position == session.prizes.len() {
        session.state = SessionState::Complete;
        complete_session(session);
    } else {
        session.state = SessionState::Revealed;
    }

    Ok(result)
}

fn complete_session(session: &mut SessionInfo) {
    if session.options.validate_on_complete {
        let valid = validate_results(&session.results, &session.participants);
        if !valid {
            warn!(
                name = session.options.name.as_str(),
                "result validation failed for a completed session"
            );
        }
        session.validated = Some(valid);
    }
    info!(
        name = session.options.name.as_str(),
        winners = session.results.len(),
        "draw session complete"
    );
}

/// Cancels the running session.
/// Pool and results are dropped without keeping any partial result. A completed session can't be aborted
pub fn execute_abort(session: &mut SessionInfo) -> Result<(), DrawError> {
    if session.state == SessionState::Complete {
        return Err(DrawError::WrongStateForAbort {
            status: session.state,
        });
    }

    info!(
        name = session.options.name.as_str(),
        awarded = session.results.len(),
        "draw session aborted"
    );
    session.discard(SessionState::Aborted);
    Ok(())
}

/// Changes the session options.
/// Only possible between sessions, the options of a running session are fixed
pub fn execute_modify_options(
    session: &mut SessionInfo,
    options: SessionOptionsMsg,
) -> Result<(), DrawError> {
    if !session.state.can_initialize() {
        return Err(DrawError::WrongStateForOptions {
            status: session.state,
        });
    }

    session.options = SessionOptions::new_from(session.options.clone(), options);
    Ok(())
}
