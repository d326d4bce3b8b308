use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utils::msg::{is_valid_name, to_csv};

use crate::state::{DrawResult, Participant, Prize, PrizeOverflow, SessionOptionsMsg, SessionState};

pub const EXPORT_HEADER: [&str; 4] = ["#", "Winner", "Ticket", "Prize"];
pub const AUDIT_HEADER: [&str; 5] = [
    "Sequence",
    "Timestamp",
    "Winner Name",
    "Ticket Number",
    "Prize Awarded",
];

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Name is not in the expected format (3-50 UTF-8 bytes)")]
    InvalidName {},

    #[error("The participant list is empty")]
    NoParticipants {},

    #[error("The prize list is empty")]
    NoPrizes {},

    #[error("Invalid rows : {}", .0.join("; "))]
    InvalidRows(Vec<String>),

    #[error("Too many prizes for this session. Prizes : {prizes:?}, Participants : {participants:?}")]
    TooManyPrizes { prizes: usize, participants: usize },
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ParticipantMsg {
    pub name: String,
    pub ticket_number: String,
}

/// Everything needed to open a draw session, as handed over by the roster collaborator
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct SessionMsg {
    pub name: String,
    pub participants: Vec<ParticipantMsg>,
    pub prizes: Vec<String>,
    #[serde(default)]
    pub options: SessionOptionsMsg,
}

impl SessionMsg {
    /// Checks the roster and prize list.
    /// Every faulty row is reported, row numbers start at 1
    pub fn validate(&self) -> Result<(), InputError> {
        if !is_valid_name(self.name.trim()) {
            return Err(InputError::InvalidName {});
        }
        if self.participants.is_empty() {
            return Err(InputError::NoParticipants {});
        }
        if self.prizes.is_empty() {
            return Err(InputError::NoPrizes {});
        }

        let mut errors = vec![];
        let mut tickets = HashSet::new();
        for (index, row) in self.participants.iter().enumerate() {
            let name = row.name.trim();
            let ticket = row.ticket_number.trim();
            if name.is_empty() {
                errors.push(format!("participant row {}: empty name", index + 1));
                continue;
            }
            if ticket.is_empty() {
                errors.push(format!("participant row {}: empty ticket number", index + 1));
                continue;
            }
            if !tickets.insert(ticket) {
                errors.push(format!(
                    "participant row {}: duplicate ticket number {}",
                    index + 1,
                    ticket
                ));
            }
        }
        for (index, prize) in self.prizes.iter().enumerate() {
            if prize.trim().is_empty() {
                errors.push(format!("prize row {}: empty prize", index + 1));
            }
        }

        if !errors.is_empty() {
            return Err(InputError::InvalidRows(errors));
        }
        Ok(())
    }

    /// Validates the message and returns the trimmed participants and the prizes to draw.
    /// Prize overflow is resolved here, according to the session options
    pub fn into_parts(self) -> Result<(Vec<Participant>, Vec<Prize>), InputError> {
        self.validate()?;

        let participants: Vec<Participant> = self
            .participants
            .iter()
            .map(|row| Participant::new(row.name.trim(), row.ticket_number.trim()))
            .collect();
        let mut prizes: Vec<Prize> = self
            .prizes
            .iter()
            .map(|prize| prize.trim().to_string())
            .collect();

        if prizes.len() > participants.len() {
            match self.options.prize_overflow.unwrap_or_default() {
                PrizeOverflow::Reject => {
                    return Err(InputError::TooManyPrizes {
                        prizes: prizes.len(),
                        participants: participants.len(),
                    })
                }
                PrizeOverflow::Truncate => prizes.truncate(participants.len()),
            }
        }

        Ok((participants, prizes))
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct SessionStats {
    pub name: String,
    pub comment: Option<String>,
    pub state: SessionState,
    pub total_participants: usize,
    pub total_prizes: usize,
    pub winners: usize,
    pub remaining_prizes: usize,
    pub pool_size: usize,
    pub validated: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct ExportRow {
    pub rank: usize,
    pub winner_name: String,
    pub ticket_number: String,
    pub prize: Prize,
}

impl ExportRow {
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.rank.to_string(),
            self.winner_name.clone(),
            self.ticket_number.clone(),
            self.prize.clone(),
        ]
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct AuditRow {
    pub sequence: usize,
    pub timestamp: String,
    pub winner_name: String,
    pub ticket_number: String,
    pub prize: Prize,
}

impl AuditRow {
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.sequence.to_string(),
            self.timestamp.clone(),
            self.winner_name.clone(),
            self.ticket_number.clone(),
            self.prize.clone(),
        ]
    }
}

/// Result log in draw order, ranks start at 1
pub fn export_rows(results: &[DrawResult]) -> Vec<ExportRow> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| ExportRow {
            rank: index + 1,
            winner_name: result.winner.name.clone(),
            ticket_number: result.winner.ticket_number.clone(),
            prize: result.prize.clone(),
        })
        .collect()
}

/// Audit rows all share the generation time, as the log is exported in one go
pub fn audit_rows(results: &[DrawResult], generated_at: DateTime<Utc>) -> Vec<AuditRow> {
    let timestamp = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    results
        .iter()
        .enumerate()
        .map(|(index, result)| AuditRow {
            sequence: index + 1,
            timestamp: timestamp.clone(),
            winner_name: result.winner.name.clone(),
            ticket_number: result.winner.ticket_number.clone(),
            prize: result.prize.clone(),
        })
        .collect()
}

pub fn export_csv(rows: &[ExportRow]) -> String {
    to_csv(&EXPORT_HEADER, rows.iter().map(ExportRow::cells))
}

pub fn audit_csv(rows: &[AuditRow]) -> String {
    to_csv(&AUDIT_HEADER, rows.iter().map(AuditRow::cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(name: &str, ticket: &str) -> ParticipantMsg {
        ParticipantMsg {
            name: name.to_string(),
            ticket_number: ticket.to_string(),
        }
    }

    fn session_msg(participants: Vec<ParticipantMsg>, prizes: Vec<&str>) -> SessionMsg {
        SessionMsg {
            name: "office party".to_string(),
            participants,
            prizes: prizes.into_iter().map(String::from).collect(),
            options: SessionOptionsMsg::default(),
        }
    }

    #[test]
    fn validate_reports_every_bad_row() {
        let msg = session_msg(
            vec![
                row("John", "001"),
                row("  ", "002"),
                row("Jane", ""),
                row("Bob", "001"),
            ],
            vec!["Laptop", " "],
        );

        assert_eq!(
            msg.validate().unwrap_err(),
            InputError::InvalidRows(vec![
                "participant row 2: empty name".to_string(),
                "participant row 3: empty ticket number".to_string(),
                "participant row 4: duplicate ticket number 001".to_string(),
                "prize row 2: empty prize".to_string(),
            ])
        );
    }

    #[test]
    fn validate_empty_lists_and_name() {
        let msg = session_msg(vec![], vec!["Laptop"]);
        assert_eq!(msg.validate().unwrap_err(), InputError::NoParticipants {});

        let msg = session_msg(vec![row("John", "001")], vec![]);
        assert_eq!(msg.validate().unwrap_err(), InputError::NoPrizes {});

        let mut msg = session_msg(vec![row("John", "001")], vec!["Laptop"]);
        msg.name = "x".to_string();
        assert_eq!(msg.validate().unwrap_err(), InputError::InvalidName {});
    }

    #[test]
    fn into_parts_trims_and_applies_overflow_policy() {
        let msg = session_msg(vec![row(" John ", " 001 ")], vec!["Laptop", "Mouse"]);
        assert_eq!(
            msg.clone().into_parts().unwrap_err(),
            InputError::TooManyPrizes {
                prizes: 2,
                participants: 1
            }
        );

        let mut msg = msg;
        msg.options.prize_overflow = Some(PrizeOverflow::Truncate);
        let (participants, prizes) = msg.into_parts().unwrap();
        assert_eq!(participants, vec![Participant::new("John", "001")]);
        assert_eq!(prizes, vec!["Laptop".to_string()]);
    }

    #[test]
    fn session_msg_from_json() {
        let msg: SessionMsg = serde_json::from_str(
            r#"{
                "name": "office party",
                "participants": [{"name": "John", "ticket_number": "001"}],
                "prizes": ["Laptop"]
            }"#,
        )
        .unwrap();
        assert_eq!(msg.options, SessionOptionsMsg::default());
        msg.validate().unwrap();
    }

    #[test]
    fn export_and_audit_rows() {
        let results = vec![
            DrawResult {
                winner: Participant::new("Smith, John", "001"),
                prize: "Laptop".to_string(),
            },
            DrawResult {
                winner: Participant::new("Jane", "002"),
                prize: "Mouse".to_string(),
            },
        ];

        let rows = export_rows(&results);
        assert_eq!(rows[1].rank, 2);
        assert_eq!(
            export_csv(&rows),
            "#,Winner,Ticket,Prize\n1,\"Smith, John\",001,Laptop\n2,Jane,002,Mouse"
        );

        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let audit = audit_rows(&results, at);
        assert_eq!(audit[0].timestamp, "2024-03-01T12:30:00.000Z");
        assert_eq!(audit[1].sequence, 2);
        assert!(audit_csv(&audit).starts_with("Sequence,Timestamp,Winner Name"));
    }
}
