//! Presentation formatters driven by user configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Formats numeric amounts for presentation.
pub trait NumberFormatter: Send + Sync {
    fn format_number(&self, value: f64, decimals: usize) -> String;

    /// Two-decimal rendering used for money amounts.
    fn format_amount(&self, value: f64) -> String {
        self.format_number(value, 2)
    }
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Thousands / decimal separator convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// `1.234,56`
    #[default]
    Dot,
    /// `1,234.56`
    Comma,
    /// `1 234,56`
    Space,
}

impl NumberFormat {
    fn separators(&self) -> (char, char) {
        match self {
            NumberFormat::Dot => ('.', ','),
            NumberFormat::Comma => (',', '.'),
            NumberFormat::Space => (' ', ','),
        }
    }
}

impl NumberFormatter for NumberFormat {
    fn format_number(&self, value: f64, decimals: usize) -> String {
        let (thousands, decimal) = self.separators();
        let fixed = format!("{:.*}", decimals, value);
        let (sign, unsigned) = match fixed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", fixed.as_str()),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (unsigned, None),
        };

        let mut out = String::from(sign);
        for (idx, digit) in integer.chars().enumerate() {
            if idx > 0 && (integer.len() - idx) % 3 == 0 {
                out.push(thousands);
            }
            out.push(digit);
        }
        if let Some(fraction) = fraction {
            out.push(decimal);
            out.push_str(fraction);
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "dd/mm/yyyy")]
    DayMonthYear,
    #[serde(rename = "mm/dd/yyyy")]
    MonthDayYear,
    #[serde(rename = "yyyy-mm-dd")]
    YearMonthDay,
}

impl DateFormat {
    fn pattern(&self) -> &'static str {
        match self {
            DateFormat::DayMonthYear => "%d/%m/%Y",
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::YearMonthDay => "%Y-%m-%d",
        }
    }
}

impl DateFormatter for DateFormat {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

/// Number and date formatting bundled for consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Formatter {
    pub number: NumberFormat,
    pub date: DateFormat,
}

impl Formatter {
    pub fn new(number: NumberFormat, date: DateFormat) -> Self {
        Self { number, date }
    }
}

impl NumberFormatter for Formatter {
    fn format_number(&self, value: f64, decimals: usize) -> String {
        self.number.format_number(value, decimals)
    }
}

impl DateFormatter for Formatter {
    fn format_date(&self, date: NaiveDate) -> String {
        self.date.format_date(date)
    }
}
