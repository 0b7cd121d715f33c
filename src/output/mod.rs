//! Terminal rendering of tick reports.
//!
//! Kept apart from the tick processor so the feed format can change without
//! touching fetch or detection logic.

use std::error::Error;

use chrono::{DateTime, Local};
use crossterm::style::{style, Color, Stylize};

use crate::strategy::{PriceLine, TickReport};

pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn timestamp(at: DateTime<Local>) -> String {
        at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// All lines for one tick: one per asset, each optionally followed by
    /// its spike alert.
    pub fn render(&self, ts: &str, report: &TickReport) -> Vec<String> {
        let mut out = Vec::with_capacity(report.lines.len());
        for line in &report.lines {
            out.push(self.price_line(ts, line));
            if let Some(alert) = self.spike_line(line).filter(|_| line.spike) {
                out.push(alert);
            }
        }
        out
    }

    pub fn price_line(&self, ts: &str, line: &PriceLine) -> String {
        let base = format!(
            "{ts} {:<6} {}",
            line.asset.display_name(),
            format_usd(line.price)
        );
        match line.change {
            None => base,
            Some(change) => {
                let pct = format!("{change:+.2}%");
                let color = if change >= 0.0 { Color::Green } else { Color::Red };
                format!("{base}  {}", self.paint(pct, color))
            }
        }
    }

    pub fn spike_line(&self, line: &PriceLine) -> Option<String> {
        let change = line.change?;
        let text = format!(
            "  >> Spike alert: {} moved {change:+.2}% since last tick",
            line.asset.display_name()
        );
        Some(self.paint(text, Color::Yellow))
    }

    pub fn error_line(&self, err: &dyn Error) -> String {
        format!("Error: {}", error_chain(err))
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.color {
            style(text).with(color).to_string()
        } else {
            text
        }
    }
}

/// `outer: cause: root cause`, following `Error::source` to the end.
pub fn error_chain(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// `$1,234.5678`: thousands separators, four decimals.
pub fn format_usd(price: f64) -> String {
    let fixed = format!("{:.4}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{frac_part}")
    }
}
