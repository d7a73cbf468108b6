//! Keyword/market input handling.
//!
//! Turns raw form input into a [`SearchRequest`]. Rejections are reported as [`InputError`]s,
//! which never reach the session and are not system errors.

use crate::backend::AnalysisBackend;
use crate::domain::market::{Market, MarketSelection};
use crate::domain::request::SearchRequest;
use crate::notice::Notice;
use crate::session::{AnalysisSession, Settlement};
use std::fmt;

pub const SUBMIT_LABEL: &str = "검색";
pub const SUBMIT_LABEL_LOADING: &str = "분석 중...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    EmptyKeywords,
    NoMarketSelected,
    /// An analysis is already in flight.
    Busy,
}

impl InputError {
    pub fn message(self) -> &'static str {
        match self {
            InputError::EmptyKeywords => "키워드를 입력해주세요.",
            InputError::NoMarketSelected => "최소 하나의 시장을 선택해주세요.",
            InputError::Busy => "분석 중입니다. 잠시만 기다려주세요.",
        }
    }

    pub fn notice(self) -> Notice {
        Notice::blocking(self.message())
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for InputError {}

/// Splits on commas, trims each piece and drops the empty ones. Order is preserved.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn submit(
    raw_keyword_text: &str,
    selection: &MarketSelection,
    is_loading: bool,
) -> Result<SearchRequest, InputError> {
    if is_loading {
        return Err(InputError::Busy);
    }

    let keywords = split_keywords(raw_keyword_text);
    if keywords.is_empty() {
        return Err(InputError::EmptyKeywords);
    }

    let markets = selection.selected();
    if markets.is_empty() {
        return Err(InputError::NoMarketSelected);
    }

    // Both parts were checked above, so construction cannot fail here.
    SearchRequest::try_new(keywords, markets).map_err(|_| InputError::EmptyKeywords)
}

/// Form state of the search input: keyword text plus market checkboxes.
#[derive(Debug, Clone, Default)]
pub struct SearchController {
    keyword_text: String,
    selection: MarketSelection,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword_text(&self) -> &str {
        &self.keyword_text
    }

    pub fn selection(&self) -> &MarketSelection {
        &self.selection
    }

    pub fn set_keywords(&mut self, text: impl Into<String>) {
        self.keyword_text = text.into();
    }

    pub fn set_market(&mut self, market: Market, checked: bool) {
        self.selection.set(market, checked);
    }

    pub fn toggle_market(&mut self, market: Market) {
        self.selection.toggle(market);
    }

    pub fn submit_current(&self, is_loading: bool) -> Result<SearchRequest, InputError> {
        submit(&self.keyword_text, &self.selection, is_loading)
    }

    /// Validates the held form and hands the request to `session`.
    ///
    /// Returns `Ok(None)` when the session ignored the dispatch.
    pub async fn submit_to<B: AnalysisBackend>(
        &self,
        session: &mut AnalysisSession<B>,
    ) -> Result<Option<Settlement>, InputError> {
        let request = self
            .submit_current(session.is_loading())
            .inspect_err(|err| tracing::debug!(%err, "search input rejected"))?;
        Ok(session.start_search(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn selection(krx: bool, us: bool) -> MarketSelection {
        [(Market::Krx, krx), (Market::Us, us)].into_iter().collect()
    }

    #[test]
    fn normalizes_keywords_and_markets() {
        let req = submit("반도체, 2차전지, , HBM", &selection(true, false), false).unwrap();
        assert_eq!(req.keywords(), ["반도체", "2차전지", "HBM"]);
        assert_eq!(req.markets(), &BTreeSet::from([Market::Krx]));
    }

    #[test]
    fn keeps_order_and_drops_whitespace_tokens() {
        assert_eq!(
            split_keywords("  z ,\t, a,b ,   ,c"),
            vec!["z".to_string(), "a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn rejects_when_no_market_selected() {
        assert_eq!(
            submit("AI", &selection(false, false), false),
            Err(InputError::NoMarketSelected)
        );
    }

    #[test]
    fn rejects_blank_keyword_text() {
        for raw in ["", "   ", ",,,", " , \t ,"] {
            assert_eq!(
                submit(raw, &selection(true, true), false),
                Err(InputError::EmptyKeywords),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn refuses_while_loading() {
        assert_eq!(
            submit("AI", &selection(true, true), true),
            Err(InputError::Busy)
        );
    }

    #[test]
    fn controller_defaults_to_all_markets() {
        let mut controller = SearchController::new();
        controller.set_keywords("AI, HBM");
        let req = controller.submit_current(false).unwrap();
        assert_eq!(req.markets().len(), 2);

        controller.toggle_market(Market::Krx);
        controller.set_market(Market::Us, false);
        assert_eq!(
            controller.submit_current(false),
            Err(InputError::NoMarketSelected)
        );
    }

    #[test]
    fn notices_are_blocking() {
        let notice = InputError::NoMarketSelected.notice();
        assert_eq!(notice.kind, crate::notice::NoticeKind::Blocking);
        assert_eq!(notice.message, "최소 하나의 시장을 선택해주세요.");
    }
}
