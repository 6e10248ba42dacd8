//! 서비스 에러 타입.
//!
//! 두 서비스 모두 클라이언트 입력 오류와 평가 서비스 조회 실패,
//! 두 가지 범주만 구분합니다.

use thiserror::Error;

/// 서비스 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// 잘못되었거나 누락된 요청 파라미터
    #[error("{0}")]
    InvalidParameters(String),

    /// 평가 서비스 조회 실패 (네트워크, 상태 코드, 파싱, 빈 결과)
    #[error("{0}")]
    UpstreamFetchFailed(String),
}

/// 서비스 작업을 위한 Result 타입.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// 클라이언트가 원인인 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServiceError::InvalidParameters(_))
    }

    /// 응답 본문에 쓰이는 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidParameters(_) => "INVALID_PARAMETERS",
            ServiceError::UpstreamFetchFailed(_) => "UPSTREAM_FETCH_FAILED",
        }
    }
}
