use std::collections::HashSet;

use draws_export::state::{DrawResult, Participant};

/// Checks a result log against the participant list it was drawn from.
/// Every winner must come from `original_participants` and no ticket may win twice.
///
/// Works only from its two inputs, never from the pool, so it stays an independent check of what the orchestrator recorded.
pub fn validate_results(results: &[DrawResult], original_participants: &[Participant]) -> bool {
    let participant_tickets: HashSet<&str> = original_participants
        .iter()
        .map(|participant| participant.ticket_number.as_str())
        .collect();
    let mut winner_tickets: HashSet<&str> = HashSet::with_capacity(results.len());

    results.iter().all(|result| {
        let ticket = result.winner.ticket_number.as_str();
        participant_tickets.contains(ticket) && winner_tickets.insert(ticket)
    })
}
