//! Error types for the plcresolve command

use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Resolve(atproto_wellknown::ResolveError),
    Output(String),
    Config(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Resolve(err) => write!(f, "{}", err),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Resolve(err) => Some(err),
            _ => None,
        }
    }
}

impl From<atproto_wellknown::ResolveError> for CliError {
    fn from(err: atproto_wellknown::ResolveError) -> Self {
        CliError::Resolve(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<tracing_subscriber::filter::ParseError> for CliError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        CliError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use atproto_wellknown::ResolveError;

    #[test]
    fn test_resolve_error_display_passes_through() {
        let err = CliError::Resolve(ResolveError::HttpStatus(404));
        assert_eq!(format!("{}", err), "HTTP status error: 404");
    }

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("bad directive".to_string());
        assert_eq!(format!("{}", err), "Configuration error: bad directive");
    }

    #[test]
    fn test_resolve_error_has_source() {
        use std::error::Error;
        let err = CliError::from(ResolveError::Cancelled);
        assert!(err.source().is_some());
    }
}
