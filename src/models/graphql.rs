//! Error envelope of the GitHub GraphQL responses read by this crate.
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Why a response carried no usable data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphQlFailure {
    /// The requested login does not exist.
    NotFound,
    Message(String),
}

/// Classifies the first entry of a response's `errors` array, if there is one.
/// `fallback` stands in for an error without a message.
#[must_use]
pub fn first_failure(errors: &[GraphQlError], fallback: &str) -> Option<GraphQlFailure> {
    let error = errors.first()?;
    if error.kind.as_deref() == Some("NOT_FOUND") {
        return Some(GraphQlFailure::NotFound);
    }
    Some(GraphQlFailure::Message(
        error.message.clone().unwrap_or_else(|| fallback.to_owned()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(json: &str) -> Vec<GraphQlError> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_not_found_wins_over_its_message() {
        let errs = errors(r#"[{ "type": "NOT_FOUND", "message": "Could not resolve" }]"#);
        assert_eq!(first_failure(&errs, "x"), Some(GraphQlFailure::NotFound));
    }

    #[test]
    fn test_only_the_first_error_counts() {
        let errs = errors(r#"[{ "message": "rate limited" }, { "type": "NOT_FOUND" }]"#);
        assert_eq!(
            first_failure(&errs, "x"),
            Some(GraphQlFailure::Message("rate limited".to_owned()))
        );
    }

    #[test]
    fn test_missing_message_uses_the_fallback() {
        let errs = errors(r#"[{ "type": "FORBIDDEN" }]"#);
        assert_eq!(
            first_failure(&errs, "request failed"),
            Some(GraphQlFailure::Message("request failed".to_owned()))
        );
        assert_eq!(first_failure(&[], "request failed"), None);
    }
}
