use thiserror::Error;

/// Canonical result for enumgen.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid enum value: {0}")]
    InvalidValue(String),

    #[error("invalid enum name: {0:?}")]
    InvalidName(String),

    #[error("no matching enum value for {0:?}")]
    NoMatch(String),

    #[error("cannot parse {input:?} as {target}: {reason}")]
    Parse {
        input: String,
        target: &'static str,
        reason: String,
    },

    #[error("value {value} is out of range for type {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("unsupported persisted kind {found} for type {target}")]
    TypeMismatch {
        found: &'static str,
        target: &'static str,
    },

    #[error("decode error: {0}")]
    Decode(String),

    // Usage-contract violations. The panicking registry operations raise these
    // messages; the `try_*` forms return them.
    #[error("enum: name {0:?} already exists")]
    DuplicateName(String),

    #[error("enum: value {value} already used for {existing:?}")]
    DuplicateValue { value: String, existing: String },

    #[error("enum: cannot generate values on a static registry")]
    StaticRegistry,

    #[error("enum: no registry bound to this value")]
    NoRegistry,

    #[error("number of fields ({fields}) exceeds the capacity of {target}")]
    Capacity { fields: usize, target: &'static str },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}
