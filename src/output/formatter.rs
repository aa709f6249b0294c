use std::io::IsTerminal;

use owo_colors::OwoColorize;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::tariff::Quotation;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Round to cents, half away from zero
fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Plain two-decimal amount without grouping ("1234.50")
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", to_cents(amount))
}

/// Money with thousands separators and a currency prefix ("$1,234.50")
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let plain = format_amount(amount);
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (whole, cents) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{}{}.{}", sign, symbol, grouped, cents)
}

fn format_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Format a quotation as an aligned two-column table:
/// heading, storage period, then one line per charge with the total last.
pub fn format_breakdown_table(quotation: &Quotation, symbol: &str, use_colors: bool) -> String {
    let lines = quotation.breakdown.lines();
    let name_width = lines.iter().map(|l| l.name.chars().count()).max().unwrap_or(0);
    let amounts: Vec<String> = lines
        .iter()
        .map(|l| format_currency(l.amount, symbol))
        .collect();
    let amount_width = amounts.iter().map(|a| a.chars().count()).max().unwrap_or(0);

    let title = quotation.category.title();
    let period = format!("Storage period: {}", format_days(quotation.days));

    let mut out = Vec::with_capacity(lines.len() + 3);
    if use_colors {
        out.push(title.bold().to_string());
        out.push(period.dimmed().to_string());
    } else {
        out.push(title.to_string());
        out.push(period);
    }
    out.push(String::new());

    let last = lines.len().saturating_sub(1);
    for (idx, (line, amount)) in lines.iter().zip(&amounts).enumerate() {
        let row = format!(
            "{:<name_width$}  {:>amount_width$}",
            line.name,
            amount,
            name_width = name_width,
            amount_width = amount_width
        );
        if use_colors && idx == last {
            out.push(row.bold().to_string());
        } else {
            out.push(row);
        }
    }

    out.join("\n")
}

/// Format a quotation as tab-separated values for scripting
/// Columns: name, amount (no headers, no colors, no currency symbol)
pub fn format_tsv(quotation: &Quotation) -> String {
    quotation
        .breakdown
        .iter()
        .map(|line| format!("{}\t{}", line.name, format_amount(line.amount)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON rendering of the full quotation
pub fn format_json(quotation: &Quotation) -> serde_json::Result<String> {
    serde_json::to_string_pretty(quotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tariff::{calculate_20ft_charges, ContainerRates, ContainerRequest, DateRange};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_quotation() -> Quotation {
        let carry_in = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let carry_out = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let request = ContainerRequest {
            containers: 1,
            dates: DateRange::new(carry_in, carry_out).unwrap(),
        };
        calculate_20ft_charges(&request, &ContainerRates::twenty_foot()).unwrap()
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(148.68)), "148.68");
        assert_eq!(format_amount(dec!(1245.488)), "1245.49");
        assert_eq!(format_amount(dec!(0.125)), "0.13");
    }

    #[test]
    fn test_format_currency_small() {
        assert_eq!(format_currency(dec!(5), "$"), "$5.00");
        assert_eq!(format_currency(dec!(999.999), "$"), "$1,000.00");
    }

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(dec!(1234.5), "$"), "$1,234.50");
        assert_eq!(format_currency(dec!(75000), "$"), "$75,000.00");
        assert_eq!(format_currency(dec!(1234567.891), "$"), "$1,234,567.89");
        assert_eq!(format_currency(dec!(123456), "$"), "$123,456.00");
    }

    #[test]
    fn test_format_currency_custom_symbol_and_negative() {
        assert_eq!(format_currency(dec!(1500), "TZS "), "TZS 1,500.00");
        assert_eq!(format_currency(dec!(-1500), "$"), "-$1,500.00");
    }

    #[test]
    fn test_format_days() {
        assert_eq!(format_days(1), "1 day");
        assert_eq!(format_days(20), "20 days");
    }

    #[test]
    fn test_format_breakdown_table_plain() {
        let result = format_breakdown_table(&sample_quotation(), "$", false);
        let lines: Vec<&str> = result.lines().collect();

        assert_eq!(lines[0], "Port and ICD Charges for 20FT Container");
        assert_eq!(lines[1], "Storage period: 20 days");
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with("Storage Charges"));
        assert!(lines[3].ends_with("$472.00"));
        assert!(lines.last().unwrap().starts_with("Total"));
        assert!(lines.last().unwrap().ends_with("$955.80"));
    }

    #[test]
    fn test_format_breakdown_table_aligns_amounts() {
        let result = format_breakdown_table(&sample_quotation(), "$", false);
        let widths: Vec<usize> = result
            .lines()
            .skip(3)
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_format_tsv() {
        let result = format_tsv(&sample_quotation());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "Storage Charges\t472.00");
        assert_eq!(lines[8], "Total\t955.80");
        assert!(lines.iter().all(|l| l.split('\t').count() == 2));
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&sample_quotation()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["category"], "TwentyFoot");
        assert_eq!(value["days"], 20);
        assert_eq!(value["breakdown"].as_array().unwrap().len(), 9);
        assert_eq!(value["breakdown"][8]["name"], "Total");
    }
}
