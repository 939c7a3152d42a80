use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed nickname/score.
    #[error("{0}")]
    Validation(String),

    #[error("nickname {nickname:?} is already taken, try {suggestion:?}")]
    Conflict {
        nickname:   String,
        suggestion: String,
    },

    #[error("could not reach the score server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("score server answered {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Session(String),
}

impl warp::reject::Reject for Error {}
