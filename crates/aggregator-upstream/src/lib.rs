//! 평가 서비스(upstream) 연동.
//!
//! 숫자 목록과 주가 이력을 가져오는 데이터 소스 trait과
//! reqwest 기반 HTTP 구현체를 제공합니다.

pub mod client;
pub mod error;
pub mod traits;

pub use client::{ClientConfig, EvaluationClient};
pub use error::UpstreamError;
pub use traits::{NumberSource, PriceSource, UpstreamResult};
