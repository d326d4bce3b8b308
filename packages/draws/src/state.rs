use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SESSION_NAME: &str = "raffle";
pub const DEFAULT_VALIDATE_ON_COMPLETE: bool = true;

/// Prizes carry no structure of their own, they are told apart by their position in the prize list
pub type Prize = String;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Participant {
    pub name: String,
    pub ticket_number: String,
}

impl Participant {
    pub fn new(name: &str, ticket_number: &str) -> Self {
        Participant {
            name: name.to_string(),
            ticket_number: ticket_number.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct DrawResult {
    pub winner: Participant,
    pub prize: Prize,
}

/// Lifecycle of a draw session.
/// `Complete` and `Aborted` are terminal for the session, a new `initialize` starts another one.
#[derive(
    Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    Idle,
    Ready,
    Drawing,
    Revealed,
    Complete,
    Aborted,
}

impl SessionState {
    pub fn can_draw(&self) -> bool {
        matches!(self, SessionState::Ready | SessionState::Revealed)
    }

    pub fn can_initialize(&self) -> bool {
        matches!(
            self,
            SessionState::Idle | SessionState::Complete | SessionState::Aborted
        )
    }
}

/// What to do with the prizes that can't be awarded because the prize list is longer than the participant list
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrizeOverflow {
    #[default]
    Reject,
    Truncate,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct SessionOptions {
    pub name: String,
    pub comment: Option<String>,
    pub max_participant_number: Option<u32>,
    pub prize_overflow: PrizeOverflow,
    pub validate_on_complete: bool, // Re-check the result log once every prize is awarded
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub struct SessionOptionsMsg {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub max_participant_number: Option<u32>,
    pub prize_overflow: Option<PrizeOverflow>,
    pub validate_on_complete: Option<bool>,
}

impl SessionOptions {
    pub fn new(options: SessionOptionsMsg) -> Self {
        Self {
            name: options
                .name
                .unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string()),
            comment: options.comment,
            max_participant_number: options.max_participant_number,
            prize_overflow: options.prize_overflow.unwrap_or_default(),
            validate_on_complete: options
                .validate_on_complete
                .unwrap_or(DEFAULT_VALIDATE_ON_COMPLETE),
        }
    }

    pub fn new_from(current_options: SessionOptions, options: SessionOptionsMsg) -> Self {
        Self {
            name: options.name.unwrap_or(current_options.name),
            comment: options.comment.or(current_options.comment),
            max_participant_number: options
                .max_participant_number
                .or(current_options.max_participant_number),
            prize_overflow: options
                .prize_overflow
                .unwrap_or(current_options.prize_overflow),
            validate_on_complete: options
                .validate_on_complete
                .unwrap_or(current_options.validate_on_complete),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions::new(SessionOptionsMsg::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_defaults() {
        let options = SessionOptions::default();
        assert_eq!(options.name, DEFAULT_SESSION_NAME);
        assert_eq!(options.prize_overflow, PrizeOverflow::Reject);
        assert!(options.validate_on_complete);
        assert_eq!(options.max_participant_number, None);
    }

    #[test]
    fn options_from_json() {
        let msg: SessionOptionsMsg = serde_json::from_str(
            r#"{"name": "spring fair", "prize_overflow": "truncate", "max_participant_number": 500}"#,
        )
        .unwrap();
        let options = SessionOptions::new(msg);

        assert_eq!(options.name, "spring fair");
        assert_eq!(options.prize_overflow, PrizeOverflow::Truncate);
        assert_eq!(options.max_participant_number, Some(500));
        assert!(options.validate_on_complete);
    }

    #[test]
    fn options_update_keeps_unset_fields() {
        let current = SessionOptions::new(SessionOptionsMsg {
            comment: Some("first".to_string()),
            max_participant_number: Some(10),
            ..Default::default()
        });
        let updated = SessionOptions::new_from(
            current,
            SessionOptionsMsg {
                validate_on_complete: Some(false),
                ..Default::default()
            },
        );

        assert_eq!(updated.comment, Some("first".to_string()));
        assert_eq!(updated.max_participant_number, Some(10));
        assert!(!updated.validate_on_complete);
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Revealed.to_string(), "revealed");
        assert!(SessionState::Ready.can_draw());
        assert!(!SessionState::Drawing.can_draw());
        assert!(SessionState::Aborted.can_initialize());
        assert!(!SessionState::Revealed.can_initialize());
    }
}
