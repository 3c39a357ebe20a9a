use super::ApiError;

/// City names allow letters, whitespace, and hyphens only. Anything else is
/// rejected before the upstream is contacted.
pub fn validate_city(city: &str) -> Result<&str, ApiError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("City name is required"));
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-')
    {
        return Err(ApiError::validation("Invalid city name format"));
    }

    Ok(trimmed)
}

/// Effective history page size: `min(requested, 50)`, default 10.
pub fn effective_limit(requested: Option<u64>) -> u64 {
    const DEFAULT_LIMIT: u64 = 10;
    const MAX_LIMIT: u64 = 50;

    requested.map_or(DEFAULT_LIMIT, |limit| limit.min(MAX_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_city() {
        assert_eq!(validate_city("London").unwrap(), "London");
        assert_eq!(validate_city("  Rio de Janeiro  ").unwrap(), "Rio de Janeiro");
        assert!(validate_city("Saint-Denis").is_ok());
        assert!(validate_city("").is_err());
        assert!(validate_city("   ").is_err());
        assert!(validate_city("London123").is_err());
        assert!(validate_city("London; DROP TABLE searches").is_err());
        assert!(validate_city("São Paulo").is_err());
    }

    #[test]
    fn test_effective_limit() {
        assert_eq!(effective_limit(None), 10);
        assert_eq!(effective_limit(Some(1)), 1);
        assert_eq!(effective_limit(Some(50)), 50);
        assert_eq!(effective_limit(Some(51)), 50);
        assert_eq!(effective_limit(Some(1000)), 50);
    }
}
