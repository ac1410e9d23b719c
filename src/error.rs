use std::fmt;

#[derive(Debug)]
pub enum ClustreeError {
    Parse(serde_json::Error),
    Encode(Box<bincode::error::EncodeError>),
    Decode(Box<bincode::error::DecodeError>),
    Io(std::io::Error),
    Other(String),
}

impl fmt::Display for ClustreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClustreeError::Parse(e) => write!(f, "Cluster data error: {}", e),
            ClustreeError::Encode(e) => write!(f, "Preference encode error: {}", e),
            ClustreeError::Decode(e) => write!(f, "Preference decode error: {}", e),
            ClustreeError::Io(e) => write!(f, "IO error: {}", e),
            ClustreeError::Other(e) => write!(f, "Error: {}", e),
        }
    }
}

impl std::error::Error for ClustreeError {}

impl From<serde_json::Error> for ClustreeError {
    fn from(err: serde_json::Error) -> Self {
        ClustreeError::Parse(err)
    }
}

impl From<Box<bincode::error::EncodeError>> for ClustreeError {
    fn from(err: Box<bincode::error::EncodeError>) -> Self {
        ClustreeError::Encode(err)
    }
}

impl From<bincode::error::EncodeError> for ClustreeError {
    fn from(err: bincode::error::EncodeError) -> Self {
        ClustreeError::Encode(Box::new(err))
    }
}

impl From<Box<bincode::error::DecodeError>> for ClustreeError {
    fn from(err: Box<bincode::error::DecodeError>) -> Self {
        ClustreeError::Decode(err)
    }
}

impl From<bincode::error::DecodeError> for ClustreeError {
    fn from(err: bincode::error::DecodeError) -> Self {
        ClustreeError::Decode(Box::new(err))
    }
}

impl From<std::io::Error> for ClustreeError {
    fn from(err: std::io::Error) -> Self {
        ClustreeError::Io(err)
    }
}

impl From<String> for ClustreeError {
    fn from(err: String) -> Self {
        ClustreeError::Other(err)
    }
}

impl From<&str> for ClustreeError {
    fn from(err: &str) -> Self {
        ClustreeError::Other(err.to_string())
    }
}
