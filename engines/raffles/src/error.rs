use draws_export::msg::InputError;
use draws_export::state::SessionState;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DrawError {
    #[error("{0}")]
    Input(#[from] InputError),

    #[error("Invalid argument : {0}")]
    InvalidArgument(String),

    #[error("Too many prizes for this session. Prizes : {prizes:?}, Participants : {participants:?}")]
    TooManyPrizes { prizes: usize, participants: usize },

    #[error("The pool is empty but prizes remain, the session state is inconsistent")]
    EmptyPool {},

    #[error("Every prize of this session was already awarded")]
    Complete {},

    #[error("The secure randomness provider could not supply data : {0}")]
    EntropyUnavailable(String),

    #[error("This session is not ready to draw. Current status : {status:?}")]
    WrongStateForDraw { status: SessionState },

    #[error("A session is already running. Current status : {status:?}")]
    WrongStateForInitialize { status: SessionState },

    #[error("This session can't be aborted anymore. Current status : {status:?}")]
    WrongStateForAbort { status: SessionState },

    #[error("Options can't be changed while a session is running. Current status : {status:?}")]
    WrongStateForOptions { status: SessionState },
}
