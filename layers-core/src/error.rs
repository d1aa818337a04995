use thiserror::Error;

/// Errors raised while resolving and fetching a forecast.
///
/// Three categories matter to callers: transport failures (the upstream
/// could not be reached or kept failing), malformed responses, and the
/// no-data case where the service answered but had no periods.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid coordinate ({latitude}, {longitude}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Failed to get data from {url} after {attempts} attempts (last status {last_status})")]
    RetriesExhausted { url: String, attempts: u32, last_status: u16 },

    #[error("Request to {url} failed with status {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Response from {url} was not valid JSON: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Point metadata from {url} has neither an hourly forecast URL nor grid identifiers")]
    MissingEndpoint { url: String },

    #[error("No hourly periods available from {url} for this location")]
    NoData { url: String },

    #[error("Failed to parse timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl FetchError {
    /// Network failures, exhausted retries and HTTP error statuses.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Client(_)
                | FetchError::Network { .. }
                | FetchError::RetriesExhausted { .. }
                | FetchError::Status { .. }
        )
    }

    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            FetchError::Malformed { .. }
                | FetchError::MissingEndpoint { .. }
                | FetchError::Timestamp { .. }
        )
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, FetchError::NoData { .. })
    }
}

/// Errors from the end-to-end recommendation pipeline.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Weather data not available for ({latitude}, {longitude})")]
    Unavailable { latitude: f64, longitude: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_disjoint() {
        let transport = FetchError::RetriesExhausted {
            url: "u".into(),
            attempts: 3,
            last_status: 503,
        };
        let no_data = FetchError::NoData { url: "u".into() };
        let malformed = FetchError::MissingEndpoint { url: "u".into() };

        assert!(transport.is_transport() && !transport.is_no_data() && !transport.is_malformed());
        assert!(no_data.is_no_data() && !no_data.is_transport() && !no_data.is_malformed());
        assert!(malformed.is_malformed() && !malformed.is_transport());
    }
}
