//! Flat projections of an estimate summary: CSV rows and an e-mail body.

use crate::config::DEFAULT_EMAIL_SUBJECT;
use crate::models::EstimateSummary;
use crate::utils::{format_money, quote_csv_field};

pub const CSV_HEADER: [&str; 13] = [
    "Config Name",
    "Service Type",
    "Qty",
    "Region",
    "OS",
    "Prov. Model",
    "GPUs",
    "Core Resources",
    "Other Resources",
    "Addons",
    "Unit Monthly Price",
    "Billing Cycle",
    "Total Cost",
];

const GRAND_TOTAL_LABEL: &str = "Grand Total:";
const EMAIL_GREETING: &str = "Here is my WorldPosta CloudEdge Estimate:";
const EMAIL_FOOTER: &str = "This estimate was generated using the WorldPosta CloudEdge Calculator.";

/// Header row, one row per item, and a trailing grand-total row.
///
/// The grand-total row is blank except for the label under "Billing Cycle"
/// and the formatted amount under "Total Cost".
pub fn export_rows(summary: &EstimateSummary, currency: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(summary.items.len() + 2);
    rows.push(CSV_HEADER.iter().map(|h| h.to_string()).collect());

    for item in &summary.items {
        rows.push(vec![
            item.name.clone(),
            item.service_type_name.clone(),
            item.quantity.to_string(),
            item.region_name.clone(),
            item.os_name.clone(),
            item.provisioning_name.clone(),
            item.gpu_summary.clone(),
            item.core_resources.clone(),
            item.other_resources.clone(),
            item.addons_summary.clone(),
            format!("{:.2}", item.unit_monthly_price),
            item.billing_cycle.clone(),
            format!("{:.2}", item.total_cost_for_period),
        ]);
    }

    let mut total = vec![String::new(); CSV_HEADER.len()];
    total[CSV_HEADER.len() - 2] = GRAND_TOTAL_LABEL.to_string();
    total[CSV_HEADER.len() - 1] = format_money(currency, summary.grand_total);
    rows.push(total);
    rows
}

/// Join rows into CSV text, quoting fields where needed.
pub fn rows_to_csv(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row.iter().map(|f| quote_csv_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Multi-line summary of every item followed by the grand total.
pub fn narrative(summary: &EstimateSummary, currency: &str) -> String {
    let mut body = format!("{}\n\n", EMAIL_GREETING);
    for item in &summary.items {
        body.push_str(&format!(
            "Configuration: {} (x{}) - Type: {}\n",
            item.name, item.quantity, item.service_type_name
        ));
        body.push_str(&format!(" Region: {}\n", item.region_name));
        body.push_str(&format!(
            " OS: {} | Model: {} | GPUs: {}\n",
            item.os_name, item.provisioning_name, item.gpu_summary
        ));
        body.push_str(&format!(" Main Resources: {}\n", item.details));
        if item.addons_summary != "None" {
            body.push_str(&format!(" Addons: {}\n", item.addons_summary));
        }
        body.push_str(&format!(" Billing: {}\n", item.billing_cycle));
        body.push_str(&format!(
            " Cost: {}\n\n",
            format_money(currency, item.total_cost_for_period)
        ));
    }
    body.push_str(&format!(
        "Grand Total: {}\n\n",
        format_money(currency, summary.grand_total)
    ));
    body.push_str(EMAIL_FOOTER);
    body.push('\n');
    body
}

/// `mailto:` link with a percent-encoded subject and body.
pub fn mailto_link(subject: &str, body: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}

/// Mail link for a narrative using the default subject.
pub fn email_link(body: &str) -> String {
    mailto_link(DEFAULT_EMAIL_SUBJECT, body)
}
