/// Quote a CSV field when it contains a delimiter, a quote or a line break.
/// Embedded quotes are doubled.
pub fn quote_csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
