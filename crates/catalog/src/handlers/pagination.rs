//! Pagination query parameters and their validation.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use crate::{errors::AppError, items_service::DEFAULT_LIMIT};

/// Largest page a client may request.
pub const MAX_LIMIT: i64 = 100;

/// Returns the default pagination limit.
pub fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Item listing query parameters.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListItemsQuery {
    /// Maximum number of items to return (1-100).
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,
    /// Number of items to skip.
    #[serde(default)]
    #[validate(range(min = 0, message = "offset must not be negative"))]
    pub offset: i64,
}

impl Default for ListItemsQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl ListItemsQuery {
    /// Validates the parameters, mapping failures to [`AppError::InvalidInput`].
    pub fn validated(self) -> Result<Self, AppError> {
        self.validate().map_err(validation_error)?;
        Ok(self)
    }
}

/// Flattens validator messages into a single client-facing error.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errors)| {
            errors
                .iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect();
    messages.sort();
    AppError::InvalidInput(messages.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: i64, offset: i64) -> ListItemsQuery {
        ListItemsQuery { limit, offset }
    }

    #[test]
    fn test_defaults() {
        let q: ListItemsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.limit, 10);
        assert_eq!(q.offset, 0);
    }

    #[test]
    fn test_accepts_bounds() {
        assert!(query(1, 0).validated().is_ok());
        assert!(query(MAX_LIMIT, 49_990).validated().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        for (limit, offset) in [(0, 0), (-5, 0), (MAX_LIMIT + 1, 0), (10, -1)] {
            let err = query(limit, offset).validated().unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "{limit}/{offset}");
        }
    }

    #[test]
    fn test_messages_joined() {
        let err = query(0, -1).validated().unwrap_err();
        match err {
            AppError::InvalidInput(msg) => {
                assert_eq!(
                    msg,
                    "limit must be between 1 and 100, offset must not be negative"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
