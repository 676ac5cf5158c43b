//! Display formatting for values cited back to the user.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Currency and short-date rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatting {
    pub currency_symbol: String,
    /// A chrono `strftime` pattern.
    pub short_date_format: String,
}

impl Default for Formatting {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            short_date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

impl Formatting {
    /// `45000` -> `$45,000.00`; negatives lead with `-`.
    pub fn currency(&self, amount: Decimal) -> String {
        let rounded = amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .abs();
        let text = format!("{rounded:.2}");
        let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let sign = if amount.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{grouped}.{cents}", self.currency_symbol)
    }

    /// True when every specifier in `pattern` is one chrono can render.
    pub fn is_valid_date_format(pattern: &str) -> bool {
        !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
    }

    pub fn short_date(&self, date: NaiveDate) -> String {
        date.format(&self.short_date_format).to_string()
    }
}
