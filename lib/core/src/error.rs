use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown code {code} for field '{field}'")]
    UnknownCode { field: String, code: u32 },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn unknown_field(name: &str) -> Self {
        Error::Configuration(format!("unknown field '{}'", name))
    }
}
