//! The single error shape every store API failure funnels into.

/// Error raised by any [`FakeStoreClient`](crate::FakeStoreClient) operation.
///
/// Every failure class -- precondition violation, non-2xx response,
/// transport or decode failure -- carries the same three fields, so callers
/// branch on data instead of error subtypes. `status` is the discriminator:
/// it holds the HTTP code when a response was received and `None` when the
/// request never completed (or was never sent).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{endpoint}: {message}")]
pub struct ApiError {
    /// Human-readable description of the failure. For non-2xx responses it
    /// always contains the numeric status code.
    pub message: String,
    /// HTTP status code, when a response was received.
    pub status: Option<u16>,
    /// Logical endpoint path the operation targeted, unencoded,
    /// e.g. `/products/3` or `/products/category/men's clothing`.
    pub endpoint: String,
}

impl ApiError {
    /// A call rejected before any request was sent.
    pub fn precondition(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            endpoint: endpoint.into(),
        }
    }

    /// A response carrying a non-2xx status code. The body text is folded
    /// into the message for debugging.
    pub fn status(endpoint: impl Into<String>, status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("Store API returned HTTP {status}")
        } else {
            format!("Store API returned HTTP {status}: {body}")
        };
        Self {
            message,
            status: Some(status),
            endpoint: endpoint.into(),
        }
    }

    /// A request that failed in flight, or a 2xx body that failed to decode.
    pub fn transport(endpoint: impl Into<String>, source: &reqwest::Error) -> Self {
        Self {
            message: source.to_string(),
            status: None,
            endpoint: endpoint.into(),
        }
    }

    /// Whether this is the upstream's not-found answer.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_always_names_the_code() {
        let err = ApiError::status("/products/99", 404, "");
        assert!(err.message.contains("404"));
        assert_eq!(err.status, Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn status_message_folds_in_the_body() {
        let err = ApiError::status("/products", 500, "  upstream exploded  ");
        assert_eq!(
            err.message,
            "Store API returned HTTP 500: upstream exploded"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn precondition_carries_no_status() {
        let err = ApiError::precondition("/products/0", "Product id must be positive");
        assert_eq!(err.status, None);
        assert!(!err.is_not_found());
    }

    #[test]
    fn display_includes_endpoint_and_message() {
        let err = ApiError::precondition("/products/category/", "Category name must not be blank");
        assert_eq!(
            err.to_string(),
            "/products/category/: Category name must not be blank"
        );
    }
}
