use sleuth_core::SleuthError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("provider {provider} failed: {message}")]
    Provider { provider: String, message: String },
}

impl ReportError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ReportError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

impl From<ReportError> for SleuthError {
    fn from(err: ReportError) -> Self {
        SleuthError::Report(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_the_path() {
        let err = ReportError::Io {
            path: PathBuf::from("/read-only/report.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/read-only/report.json"));

        let umbrella: SleuthError = err.into();
        assert!(matches!(umbrella, SleuthError::Report(_)));
    }

    #[test]
    fn test_provider_error_display() {
        let err = ReportError::provider("page", "HTTP 503");
        assert_eq!(err.to_string(), "provider page failed: HTTP 503");
    }
}
