pub mod error;
pub mod http;

use crate::domain::analysis::AnalysisResult;
use crate::domain::request::SearchRequest;

/// The two network operations the session depends on.
#[async_trait::async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &SearchRequest) -> anyhow::Result<AnalysisResult>;

    /// Relays `result` to the notification channel. The response body is not consumed.
    async fn forward(&self, result: &AnalysisResult) -> anyhow::Result<()>;
}
