//! 평가 서비스 호출 에러 타입.

use thiserror::Error;

/// 평가 서비스 호출 관련 에러.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    Network(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 2xx 이외의 응답
    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 응답 본문 파싱 실패
    #[error("Parse error: {0}")]
    Parse(String),

    /// 잘못된 URL 구성
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl UpstreamError {
    /// 메트릭 라벨 등에 쓰이는 짧은 분류명.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Network(_) => "network",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Status { .. } => "status",
            UpstreamError::Parse(_) => "parse",
            UpstreamError::InvalidUrl(_) => "invalid_url",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(err.to_string())
        } else if err.is_decode() {
            UpstreamError::Parse(err.to_string())
        } else {
            UpstreamError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_and_kind() {
        let err = UpstreamError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.kind(), "status");
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_parse_error_from_serde() {
        let serde_err = serde_json::from_str::<Vec<f64>>("{").unwrap_err();
        let err = UpstreamError::from(serde_err);
        assert_eq!(err.kind(), "parse");
    }
}
