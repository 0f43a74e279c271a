//! Result type alias for the ticker exporter

use super::errors::TickerError;

/// Result type alias using `TickerError` as the error type.
///
/// # Examples
///
/// ```
/// use ticker_export::domain::result::Result;
/// use ticker_export::domain::errors::TickerError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TickerError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(TickerError::Validation("test error".to_string()));
        assert!(result.is_err());
    }
}
