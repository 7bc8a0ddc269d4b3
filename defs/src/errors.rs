use thiserror::Error;

/// A document fragment failed to decode or failed minimal schema validation.
///
/// The index is the zero-based position of the fragment within its input
/// resource, counting non-empty fragments.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("document {0} is not valid YAML: {1}")]
    InvalidYaml(usize, #[source] serde_yaml::Error),

    #[error("document {0} is not a mapping")]
    NotAMapping(usize),

    #[error("document {0} is missing or has an empty required field '{1}'")]
    MissingField(usize, &'static str),
}

/// Listing, marking, or posting against the report channel failed.
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("failed to connect to the report channel: {0}")]
    Connect(String),

    #[error("failed to list prior report segments: {0}")]
    List(String),

    #[error("failed to mark prior segment {0} as superseded: {1}")]
    Mark(u64, String),

    #[error("failed to post report segment: {0}")]
    Post(String),
}
