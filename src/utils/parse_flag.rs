/// Parse a boolean flag from an optional string value
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(v) => {
            let t = v.trim().to_lowercase();
            if t.is_empty() {
                default
            } else {
                matches!(t.as_str(), "1" | "true" | "yes" | "y" | "on")
            }
        }
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        for v in ["1", "true", "YES", "y", "on"] {
            assert!(parse_flag(Some(v), false), "{v}");
        }
    }

    #[test]
    fn falsy_and_default() {
        assert!(!parse_flag(Some("no"), true));
        assert!(parse_flag(Some("  "), true));
        assert!(!parse_flag(None, false));
    }
}
