//! # Aggregator Core
//!
//! 평균 계산 서비스와 주가 집계 서비스가 공유하는 기본 구성 요소입니다.
//! - 도메인 타입 (숫자 종류, 가격 레코드, 티커, 조회 기간)
//! - 에러 분류
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;
