use crate::service::CatalogStatus;
use crate::session::{CoinPicker, Outcome, Session};
use common::{error::CATALOG_LOAD_FAILED_MESSAGE, models::CalculationReport};
use std::fmt::Write;

const LOADING_MESSAGE: &str = "Loading coin list...";

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Signed two-decimal dollars: `+$200.00`, `-$125.00`
pub fn format_profit(profit: f64) -> String {
    if profit >= 0.0 {
        format!("+${:.2}", profit.abs())
    } else {
        format!("-${:.2}", profit.abs())
    }
}

/// Signed two-decimal percentage: `+20.00%`, `-25.00%`
pub fn format_roi(roi_percent: f64) -> String {
    if roi_percent >= 0.0 {
        format!("+{:.2}%", roi_percent.abs())
    } else {
        format!("{:.2}%", roi_percent)
    }
}

fn gain_color(value: f64) -> &'static str {
    if value >= 0.0 {
        "green"
    } else {
        "red"
    }
}

pub fn render_report(report: &CalculationReport) -> String {
    let result = &report.result;
    format!(
        "Bought <strong>{quantity:.6}</strong> coins at <strong>${buy}</strong> each.<br>\n\
         Sold at <strong>${sell}</strong>.<br>\n\
         Profit/Loss: <span style=\"color: {profit_color};\">{profit}</span><br>\n\
         ROI: <span style=\"color: {roi_color};\">{roi}</span>",
        quantity = result.quantity,
        buy = report.buy_price,
        sell = report.sell_price,
        profit_color = gain_color(result.profit),
        profit = format_profit(result.profit),
        roi_color = gain_color(result.roi_percent),
        roi = format_roi(result.roi_percent),
    )
}

/// `<option>` list for one selector, the chosen coin marked selected
fn render_options(picker: &CoinPicker) -> String {
    let mut html = String::new();
    for coin in picker.options() {
        let selected = if coin.id == picker.selected_id() {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape_html(&coin.id),
            selected,
            escape_html(&coin.label())
        );
    }
    html
}

fn render_picker(title: &str, prefix: &str, picker: &CoinPicker) -> String {
    format!(
        "<fieldset>\n<legend>{title}</legend>\n\
         <input type=\"text\" name=\"{prefix}_search\" placeholder=\"Search coins\" value=\"{search}\">\n\
         <select name=\"{prefix}_coin\" size=\"8\">\n{options}</select>\n\
         </fieldset>",
        title = title,
        prefix = prefix,
        search = escape_html(picker.search()),
        options = render_options(picker),
    )
}

fn render_result(outcome: &Outcome, status: CatalogStatus, catalog_empty: bool) -> String {
    match outcome {
        Outcome::Report(report) => render_report(report),
        Outcome::Message(msg) => escape_html(msg),
        Outcome::Idle => match status {
            CatalogStatus::Loading if catalog_empty => LOADING_MESSAGE.to_string(),
            CatalogStatus::Failed => CATALOG_LOAD_FAILED_MESSAGE.to_string(),
            _ => String::new(),
        },
    }
}

/// Full calculator page for the current session state
pub fn render_page(session: &Session<'_>, status: CatalogStatus) -> String {
    let catalog_empty = session.catalog().is_empty();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Crypto Return Calculator</title>
</head>
<body>
<h1>Crypto Return Calculator</h1>
<form method="post" action="/">
<label>Investment (USD) <input type="number" name="investment" min="0" step="any" value="{investment}"></label>
{buy}
{sell}
<button type="submit" name="action" value="search">Search</button>
<button type="submit" name="action" value="calculate">Calculate</button>
</form>
<form method="post" action="/reload">
<button type="submit">Reload coin list</button>
</form>
<div id="result">{result}</div>
</body>
</html>
"#,
        investment = escape_html(session.investment()),
        buy = render_picker("Buy coin", "buy", session.buy()),
        sell = render_picker("Sell coin", "sell", session.sell()),
        result = render_result(session.outcome(), status, catalog_empty),
    )
}
