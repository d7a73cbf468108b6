pub const ANALYZE_FAILED_MESSAGE: &str = "분석 정보를 가져오는데 실패했습니다. 다시 시도해주세요.";
pub const FORWARD_SENT_MESSAGE: &str = "텔레그램으로 전송되었습니다!";
pub const FORWARD_FAILED_MESSAGE: &str = "텔레그램 전송에 실패했습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Input was rejected before anything was sent.
    Blocking,
    Confirmation,
    Failure,
}

/// Transient message for the user. Never part of the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn blocking(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Blocking, message)
    }

    pub fn forward_sent() -> Self {
        Self::new(NoticeKind::Confirmation, FORWARD_SENT_MESSAGE)
    }

    pub fn forward_failed() -> Self {
        Self::new(NoticeKind::Failure, FORWARD_FAILED_MESSAGE)
    }
}
