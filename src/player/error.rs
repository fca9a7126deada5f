use thiserror::Error;

/// Boxed cause carried by resolution failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during music operations
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("User is not in a voice channel")]
    UserNotInVoiceChannel,

    #[error("Failed to join voice channel: {0}")]
    JoinError(String),

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("Failed to get voice manager")]
    NoVoiceManager,

    #[error("Could not resolve `{query}`: {source}")]
    Resolution {
        query: String,
        #[source]
        source: BoxError,
    },

    #[error("No results found for `{0}`")]
    NoResults(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Audio output error: {0}")]
    Output(String),

    #[error("Status message error: {0}")]
    Status(String),

    #[error("The music session is no longer running")]
    SessionClosed,
}

impl MusicError {
    pub fn resolution(query: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Resolution {
            query: query.into(),
            source: source.into(),
        }
    }

    /// True for failures that mean a query could not be turned into a track.
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution { .. } | Self::NoResults(_))
    }
}

/// Result type for music operations
pub type MusicResult<T> = Result<T, MusicError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolution_error_keeps_query_and_cause() {
        let err = MusicError::resolution("never gonna", "yt-dlp exploded");

        assert!(err.is_resolution());
        assert_eq!(
            err.to_string(),
            "Could not resolve `never gonna`: yt-dlp exploded"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn no_results_is_a_resolution_failure() {
        assert!(MusicError::NoResults("lofi".into()).is_resolution());
        assert!(!MusicError::InvalidArgument("volume".into()).is_resolution());
        assert!(!MusicError::NotConnected.is_resolution());
    }
}
