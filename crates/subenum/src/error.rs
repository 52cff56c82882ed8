use derive_more::From;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    CliUsage(String),
    EmptyDomain,

    #[from]
    SystemTime(std::time::SystemTimeError),

    #[from]
    File(std::io::Error),

    #[from]
    Reqwest(reqwest::Error),

    #[from]
    Json(serde_json::Error),

    #[from]
    Regex(regex::Error),

    #[from]
    Join(tokio::task::JoinError),

    #[from]
    Tracing(tracing::subscriber::SetGlobalDefaultError),
}

/// Failure of a single source for a single domain, never fatal for the run.
#[derive(Debug)]
pub enum SourceError {
    /// The request could not be sent or no response came back.
    Network(reqwest::Error),
    /// The response body could not be fully read.
    Read(reqwest::Error),
    /// A structured source did not answer with valid JSON.
    Parse(serde_json::Error),
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for SourceError {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        match self {
            SourceError::Network(err) => write!(fmt, "network error: {err}"),
            SourceError::Read(err) => write!(fmt, "read error: {err}"),
            SourceError::Parse(err) => write!(fmt, "parse error: {err}"),
        }
    }
}

impl std::error::Error for SourceError {}

// endregion: --- Error Boilerplate
