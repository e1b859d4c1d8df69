/// Parse a numeric form value and clamp it into `[min, max]`.
///
/// Non-numeric input yields `min`. Fractions are truncated, the way an
/// integer field reads a typed value.
pub fn parse_clamped(raw: &str, min: u32, max: u32) -> u32 {
    let t = raw.trim();
    let parsed = t
        .parse::<i64>()
        .ok()
        .or_else(|| t.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64));
    match parsed {
        Some(v) => v.clamp(min as i64, max as i64) as u32,
        None => min,
    }
}
