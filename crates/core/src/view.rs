//! Read-only view models handed to presentation.

use crate::domain::analysis::{AnalysisResult, NewsItem, StockRecommendation};
use crate::search::{SUBMIT_LABEL, SUBMIT_LABEL_LOADING};
use crate::session::SessionState;
use reqwest::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Up,
    Down,
}

impl Polarity {
    pub fn of(change: f64) -> Self {
        if change >= 0.0 {
            Polarity::Up
        } else {
            Polarity::Down
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionView<'a> {
    pub input_disabled: bool,
    pub can_forward: bool,
    pub submit_label: &'static str,
    pub error: Option<&'a str>,
    pub result: Option<ResultView<'a>>,
}

impl<'a> SessionView<'a> {
    pub fn new(state: &'a SessionState, origin: &Url) -> Self {
        let input_disabled = state.is_loading();
        Self {
            input_disabled,
            can_forward: state.result().is_some(),
            submit_label: if input_disabled {
                SUBMIT_LABEL_LOADING
            } else {
                SUBMIT_LABEL
            },
            error: state.error(),
            result: state.result().map(|r| ResultView::new(r, origin)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView<'a> {
    pub summary: &'a str,
    pub themes: &'a [String],
    /// `None` when the backend cited no articles; the section is then hidden.
    pub news: Option<&'a [NewsItem]>,
    pub cards: Vec<StockCardView<'a>>,
}

impl<'a> ResultView<'a> {
    pub fn new(result: &'a AnalysisResult, origin: &Url) -> Self {
        Self {
            summary: &result.news_summary,
            themes: &result.themes,
            news: (!result.news_items.is_empty()).then_some(result.news_items.as_slice()),
            cards: result
                .recommended_stocks
                .iter()
                .map(|s| StockCardView::new(s, origin))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockCardView<'a> {
    pub name: &'a str,
    pub ticker: &'a str,
    pub market: &'a str,
    pub price_text: Option<String>,
    pub change_text: String,
    pub polarity: Polarity,
    pub reason: &'a str,
    pub chart_src: Option<Url>,
}

impl<'a> StockCardView<'a> {
    pub fn new(stock: &'a StockRecommendation, origin: &Url) -> Self {
        let chart_src = stock.chart_url.as_deref().and_then(|path| {
            resolve_chart_url(origin, path)
                .inspect_err(|e| {
                    tracing::warn!(ticker = %stock.ticker, error = %e, "chart url not resolvable; omitting chart")
                })
                .ok()
        });

        Self {
            name: &stock.name,
            ticker: &stock.ticker,
            market: &stock.market,
            price_text: stock.price.map(format_price),
            change_text: format_change(stock.change),
            polarity: Polarity::of(stock.change),
            reason: &stock.reason,
            chart_src,
        }
    }
}

pub fn resolve_chart_url(origin: &Url, path: &str) -> anyhow::Result<Url> {
    Ok(origin.join(path)?)
}

/// Thousands-grouped price with at most three fraction digits, e.g. `198,500` or `120.5`.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let text = format!("{:.3}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i != 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if value < 0.0 && (grouped != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Signed percent, e.g. `+2.35%`, `-1.2%`. Zero counts as up.
pub fn format_change(change: f64) -> String {
    let change = if change == 0.0 { 0.0 } else { change };
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{change}%")
}
