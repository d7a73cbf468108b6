use crate::backend::AnalysisBackend;
use crate::domain::analysis::{AnalysisResult, NewsItem, StockRecommendation};
use crate::domain::request::SearchRequest;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted backend that records every call it receives.
#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    analyze_outcomes: Mutex<VecDeque<anyhow::Result<AnalysisResult>>>,
    fail_forwards: Mutex<usize>,
    analyze_calls: Mutex<Vec<SearchRequest>>,
    forward_calls: Mutex<Vec<serde_json::Value>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_analyze(&self, outcome: anyhow::Result<AnalysisResult>) {
        self.analyze_outcomes.lock().unwrap().push_back(outcome);
    }

    pub(crate) fn fail_next_forward(&self) {
        *self.fail_forwards.lock().unwrap() += 1;
    }

    pub(crate) fn analyze_calls(&self) -> Vec<SearchRequest> {
        self.analyze_calls.lock().unwrap().clone()
    }

    pub(crate) fn forward_calls(&self) -> Vec<serde_json::Value> {
        self.forward_calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AnalysisBackend for FakeBackend {
    async fn analyze(&self, request: &SearchRequest) -> anyhow::Result<AnalysisResult> {
        self.analyze_calls.lock().unwrap().push(request.clone());
        self.analyze_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted analyze outcome")))
    }

    async fn forward(&self, result: &AnalysisResult) -> anyhow::Result<()> {
        self.forward_calls
            .lock()
            .unwrap()
            .push(serde_json::to_value(result)?);

        let mut failures = self.fail_forwards.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            anyhow::bail!("notification channel unavailable");
        }
        Ok(())
    }
}

pub(crate) fn sample_result() -> AnalysisResult {
    AnalysisResult {
        news_summary: "HBM 수요 확대로 메모리 업황 개선 기대".to_string(),
        themes: vec!["반도체".to_string(), "HBM".to_string()],
        news_items: vec![NewsItem {
            title: "SK하이닉스, HBM 증설".to_string(),
            link: "https://news.example/hbm".to_string(),
            date: "2025-01-02".to_string(),
        }],
        recommended_stocks: vec![
            StockRecommendation {
                name: "SK하이닉스".to_string(),
                ticker: "000660".to_string(),
                market: "KRX".to_string(),
                price: Some(198500.0),
                change: 2.35,
                reason: "HBM 점유율 1위".to_string(),
                chart_url: Some("/static/charts/000660.png".to_string()),
            },
            StockRecommendation {
                name: "Micron".to_string(),
                ticker: "MU".to_string(),
                market: "US".to_string(),
                price: None,
                change: -1.2,
                reason: "메모리 가격 반등".to_string(),
                chart_url: None,
            },
        ],
    }
}
