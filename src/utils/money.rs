/// Format an amount with two decimals, e.g. `$130.00`.
pub fn format_money(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}
