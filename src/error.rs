use std::fmt;


#[macro_export]
macro_rules! internal_error_message {
    () => {
        format!("Internal error at {}:{}.", file!(), line!())
    };
    ($($arg:tt)+) => {
        format!("Internal error at {}:{}: {}.", file!(), line!(), format!($($arg)*))
    };
}

// Anything that prevented us from getting a well-formed response. Shown to the user the same
// way as a server rejection.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TransportError {
    // Connection refused, timeout, etc.
    Http(String),
    // Server answered with a non-2xx status.
    Status(u16),
    // Response body could not be parsed or lacks required fields.
    Malformed(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Http(message) => write!(f, "Cannot reach the server: {message}"),
            TransportError::Status(status) => write!(f, "Server returned status {status}"),
            TransportError::Malformed(message) => write!(f, "Bad server response: {message}"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Http(err.to_string())
        }
    }
}
