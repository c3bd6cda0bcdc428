use thiserror::Error;

/// Errors returned by the TableLens client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or undecodable response body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error response
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The base URL cannot carry path segments
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// True when the server reported the table as unknown
    ///
    /// Unknown tables come back as a 500 like any other data failure, so only
    /// the error code tells them apart.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { code: Some(code), .. } if code == TABLE_NOT_FOUND)
    }
}

/// Error code the server uses for a table missing from its catalog
pub const TABLE_NOT_FOUND: &str = "TABLE_NOT_FOUND";

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, code: Option<&str>) -> ClientError {
        ClientError::Api {
            status,
            code: code.map(str::to_string),
            message: "failed".to_string(),
        }
    }

    #[test]
    fn test_not_found_is_decided_by_code() {
        assert!(api(500, Some("TABLE_NOT_FOUND")).is_not_found());
        assert!(!api(500, Some("QUERY_FAILED")).is_not_found());
        assert!(!api(404, Some("ROUTE_NOT_FOUND")).is_not_found());
        assert!(!api(404, None).is_not_found());
    }
}
