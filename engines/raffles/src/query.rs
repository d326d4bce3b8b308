use chrono::{DateTime, Utc};
use draws_export::msg::{audit_rows, export_rows, AuditRow, ExportRow, SessionStats};

use crate::state::SessionInfo;

pub fn query_stats(session: &SessionInfo) -> SessionStats {
    SessionStats {
        name: session.options.name.clone(),
        comment: session.options.comment.clone(),
        state: session.state,
        total_participants: session.participants.len(),
        total_prizes: session.prizes.len(),
        winners: session.results.len(),
        remaining_prizes: session.prizes.len() - session.position,
        pool_size: session.pool.len(),
        validated: session.validated,
    }
}

/// Result log as `(rank, winner name, ticket number, prize)` rows, in draw order
pub fn query_export_rows(session: &SessionInfo) -> Vec<ExportRow> {
    export_rows(&session.results)
}

pub fn query_audit_rows(session: &SessionInfo, generated_at: DateTime<Utc>) -> Vec<AuditRow> {
    audit_rows(&session.results, generated_at)
}
