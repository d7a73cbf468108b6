use anyhow::ensure;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub news_summary: String,
    pub themes: Vec<String>,
    pub news_items: Vec<NewsItem>,
    pub recommended_stocks: Vec<StockRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecommendation {
    pub name: String,
    pub ticker: String,
    pub market: String,
    #[serde(default)]
    pub price: Option<f64>,
    /// Signed daily change in percent.
    pub change: f64,
    pub reason: String,
    /// Path relative to the backend origin, e.g. `/static/charts/005930.png`.
    #[serde(default)]
    pub chart_url: Option<String>,
}

impl AnalysisResult {
    /// Shape rules serde cannot express. Any violation fails the whole result.
    pub fn validate(&self) -> anyhow::Result<()> {
        for stock in &self.recommended_stocks {
            stock.validate()?;
        }
        Ok(())
    }
}

impl StockRecommendation {
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            !self.ticker.trim().is_empty(),
            "recommended stock {:?} has an empty ticker",
            self.name
        );
        ensure!(self.change.is_finite(), "change must be finite (ticker={})", self.ticker);
        if let Some(path) = &self.chart_url {
            ensure!(
                path.starts_with('/') && !path.starts_with("//"),
                "chart_url must be an origin-relative path (ticker={}, got {path:?})",
                self.ticker
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(text: &str) -> anyhow::Result<AnalysisResult> {
        let result = serde_json::from_str::<AnalysisResult>(text)?;
        result.validate()?;
        Ok(result)
    }

    fn body() -> serde_json::Value {
        json!({
            "news_summary": "반도체 업황 개선 기대",
            "themes": ["반도체", "HBM"],
            "news_items": [
                {"title": "HBM 수요 급증", "link": "https://news.example/1", "date": "2025-01-02"}
            ],
            "recommended_stocks": [
                {
                    "name": "삼성전자",
                    "ticker": "005930",
                    "market": "KRX",
                    "price": 71000.0,
                    "change": -0.42,
                    "reason": "HBM 공급 확대",
                    "chart_url": "/static/charts/005930.png"
                },
                {
                    "name": "NVIDIA",
                    "ticker": "NVDA",
                    "market": "US",
                    "price": null,
                    "change": 1.5,
                    "reason": "AI 가속기 수요",
                    "chart_url": null
                }
            ]
        })
    }

    #[test]
    fn parses_backend_body() {
        let result = parse(&body().to_string()).unwrap();
        assert_eq!(result.themes, ["반도체", "HBM"]);
        assert_eq!(result.news_items.len(), 1);
        assert_eq!(result.recommended_stocks[0].price, Some(71000.0));
        assert_eq!(result.recommended_stocks[1].price, None);
        assert_eq!(result.recommended_stocks[1].chart_url, None);
    }

    #[test]
    fn missing_optional_keys_are_accepted() {
        let mut v = body();
        let stock = &mut v["recommended_stocks"][1];
        stock.as_object_mut().unwrap().remove("price");
        stock.as_object_mut().unwrap().remove("chart_url");
        assert!(parse(&v.to_string()).is_ok());
    }

    #[test]
    fn rejects_missing_required_field() {
        let mut v = body();
        v.as_object_mut().unwrap().remove("themes");
        assert!(parse(&v.to_string()).is_err());
    }

    #[test]
    fn unknown_quote_fails_whole_result() {
        // A failed quote lookup upstream nulls both price and change.
        let mut v = body();
        v["recommended_stocks"][0]["price"] = serde_json::Value::Null;
        v["recommended_stocks"][0]["change"] = serde_json::Value::Null;
        assert!(parse(&v.to_string()).is_err());

        v["recommended_stocks"][0].as_object_mut().unwrap().remove("change");
        assert!(parse(&v.to_string()).is_err());
    }

    #[test]
    fn rejects_absolute_chart_url() {
        let mut v = body();
        v["recommended_stocks"][0]["chart_url"] = json!("https://evil.example/x.png");
        assert!(parse(&v.to_string()).is_err());
    }

    #[test]
    fn rejects_non_json() {
        assert!(parse("Internal Server Error").is_err());
    }

    #[test]
    fn serializes_back_to_same_shape() {
        let v = body();
        let result = parse(&v.to_string()).unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), v);
    }

    #[test]
    fn reserializing_normalizes_numbers_and_absent_optionals() {
        let mut v = body();
        let stock = v["recommended_stocks"][1].as_object_mut().unwrap();
        stock.remove("price");
        stock.remove("chart_url");
        stock.insert("change".into(), json!(2));
        stock.insert("volume".into(), json!(1200));

        let result = parse(&v.to_string()).unwrap();
        let out = serde_json::to_value(&result).unwrap();
        let stock = &out["recommended_stocks"][1];
        assert_eq!(stock["change"], json!(2.0));
        assert!(stock["change"].is_f64());
        assert_eq!(stock["price"], serde_json::Value::Null);
        assert_eq!(stock["chart_url"], serde_json::Value::Null);
        assert!(stock.get("volume").is_none());
        assert_ne!(out, v);
    }
}
