use std::error::Error as StdError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("no source map: the last line does not carry an inline source map")]
    NoSourceMap,
    #[error("malformed source map comment on line {line}: {reason}")]
    MalformedComment { line: usize, reason: GrammarError },
    #[error("malformed source map payload: {0}")]
    MalformedPayload(Box<dyn StdError + Send + Sync>),
    #[error("malformed source map payload: top-level value is not an object")]
    NotAnObject,
    #[error("unserializable value at \"{path}\": non-finite numbers are not valid JSON")]
    UnserializableValue { path: String },
    #[error("invalid source map reference \"{0}\"")]
    InvalidReference(String),
}

impl From<base64::DecodeError> for Error {
    fn from(value: base64::DecodeError) -> Self {
        Self::MalformedPayload(Box::new(value))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(value: std::str::Utf8Error) -> Self {
        Self::MalformedPayload(Box::new(value))
    }
}

impl From<simd_json::Error> for Error {
    fn from(value: simd_json::Error) -> Self {
        Self::MalformedPayload(Box::new(value))
    }
}

/// Why a line is not a well-formed `sourceMappingURL` comment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GrammarError {
    #[error("missing `//# sourceMappingURL=` or `/*# sourceMappingURL=` lead-in")]
    MissingLeadIn,
    #[error("comment delimiters do not match")]
    MismatchedDelimiters,
    #[error("data url is not `application/json`")]
    UnsupportedMediaType,
    #[error("unsupported charset \"{0}\"")]
    UnsupportedCharset(String),
    #[error("data url is not base64 encoded")]
    MissingBase64,
    #[error("base64 payload length {0} is not a multiple of 4")]
    PayloadLength(usize),
    #[error("unexpected character in base64 payload at offset {offset}")]
    PayloadCharacter { offset: usize },
    #[error("invalid reference \"{0}\"")]
    InvalidReference(String),
}
