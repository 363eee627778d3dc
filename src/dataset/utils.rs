/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Fill step: a missing cell (`None` or blank after cleaning) becomes "0".
pub fn fill_missing(raw: Option<&str>) -> String {
    match raw.map(clean_str) {
        Some(s) if !s.is_empty() => s,
        _ => "0".to_string(),
    }
}

/// Coerce a filled cell to f64. Anything that does not parse, or parses to NaN,
/// is treated as invalid and becomes 0.
pub fn coerce_numeric(cell: &str) -> f64 {
    let s = clean_str(cell);
    let parsed = s
        .parse::<f64>()
        .ok()
        .or_else(|| s.replace(',', "").parse::<f64>().ok());
    match parsed {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_str() {
        assert_eq!(clean_str("  Gucci "), "Gucci");
        assert_eq!(clean_str("\" Hermès \""), "Hermès");
        assert_eq!(clean_str("\""), "\"");
    }

    #[test]
    fn test_fill_missing() {
        assert_eq!(fill_missing(None), "0");
        assert_eq!(fill_missing(Some("   ")), "0");
        assert_eq!(fill_missing(Some("\"\"")), "0");
        assert_eq!(fill_missing(Some("Luxury")), "Luxury");
    }

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric("0.25"), 0.25);
        assert_eq!(coerce_numeric(" -3 "), -3.0);
        assert_eq!(coerce_numeric("12,345.5"), 12345.5);
        assert_eq!(coerce_numeric("n/a"), 0.0);
        assert_eq!(coerce_numeric("NaN"), 0.0);
        assert_eq!(coerce_numeric("0"), 0.0);
    }
}
