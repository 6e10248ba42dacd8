//! 도메인 타입.
//!
//! 숫자 종류 선택자, 주가 레코드, 티커, 조회 기간(분) 등
//! 두 서비스가 공유하는 값 타입을 정의합니다.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::ServiceError;

// ==================== NumberKind ====================

/// 평가 서비스에서 조회할 숫자 종류.
///
/// 유효한 값은 네 가지뿐이므로 닫힌 열거형으로 표현합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    /// 소수 (`p`)
    Prime,
    /// 피보나치 수 (`f`)
    Fibonacci,
    /// 짝수 (`e`)
    Even,
    /// 난수 (`r`)
    Random,
}

impl NumberKind {
    /// 평가 서비스의 경로.
    pub fn upstream_path(&self) -> &'static str {
        match self {
            NumberKind::Prime => "/primes",
            NumberKind::Fibonacci => "/fibo",
            NumberKind::Even => "/even",
            NumberKind::Random => "/rand",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumberKind::Prime => "prime",
            NumberKind::Fibonacci => "fibonacci",
            NumberKind::Even => "even",
            NumberKind::Random => "random",
        };
        f.write_str(name)
    }
}

impl FromStr for NumberKind {
    type Err = ServiceError;

    /// 한 글자 코드(`p|f|e|r`) 또는 평가 서비스 경로 이름(`primes|fibo|even|rand`)을 받습니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "p" | "primes" => Ok(NumberKind::Prime),
            "f" | "fibo" => Ok(NumberKind::Fibonacci),
            "e" | "even" => Ok(NumberKind::Even),
            "r" | "rand" => Ok(NumberKind::Random),
            _ => Err(ServiceError::InvalidParameters(
                "Invalid number type. Use p, f, e, or r".to_string(),
            )),
        }
    }
}

// ==================== PriceEntry ====================

/// 평가 서비스가 반환하는 단일 가격 레코드.
///
/// 계산에는 `price`만 사용합니다. 타임스탬프와 그 밖의 필드는
/// 해석하지 않고 받은 그대로 응답에 전달합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    /// 가격
    pub price: f64,
    /// 마지막 갱신 시각 (형식 무관)
    pub last_updated_at: Value,
    /// 알 수 없는 추가 필드
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PriceEntry {
    /// 새 가격 레코드 생성.
    pub fn new(price: f64, last_updated_at: impl Into<Value>) -> Self {
        Self {
            price,
            last_updated_at: last_updated_at.into(),
            extra: Map::new(),
        }
    }
}

// ==================== Ticker ====================

/// 종목 티커.
///
/// 비어 있지 않다는 것 외에는 검증하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// 티커 생성. 앞뒤 공백을 제거한 뒤 비어 있으면 에러를 반환합니다.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ServiceError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ServiceError::InvalidParameters(
                "Ticker must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 문자열 참조 반환.
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ==================== Minutes ====================

/// 가격 조회 기간(분). 1 이상의 유한한 수.
///
/// 소수(`1.5`)와 지수 표기(`1e2`)도 허용하며,
/// 평가 서비스에는 호출자가 보낸 표기를 그대로 전달합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Minutes {
    value: f64,
    raw: String,
}

impl Minutes {
    /// 쿼리 문자열 값에서 파싱합니다.
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let raw = raw.trim();
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 1.0 => Ok(Self {
                value,
                raw: raw.to_string(),
            }),
            _ => Err(ServiceError::InvalidParameters(format!(
                "minutes must be a number of at least 1, got '{}'",
                raw
            ))),
        }
    }

    /// 수치 값.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// 평가 서비스에 전달할 원본 표기.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_kind_from_code() {
        assert_eq!("p".parse::<NumberKind>().unwrap(), NumberKind::Prime);
        assert_eq!("f".parse::<NumberKind>().unwrap(), NumberKind::Fibonacci);
        assert_eq!("e".parse::<NumberKind>().unwrap(), NumberKind::Even);
        assert_eq!("r".parse::<NumberKind>().unwrap(), NumberKind::Random);
        assert_eq!("fibo".parse::<NumberKind>().unwrap(), NumberKind::Fibonacci);
    }

    #[test]
    fn test_number_kind_rejects_unknown() {
        for raw in ["x", "P", "", "prime ", "pp"] {
            let err = raw.parse::<NumberKind>().unwrap_err();
            assert!(err.is_client_error(), "{raw:?} should be a client error");
        }
    }

    #[test]
    fn test_number_kind_paths_and_codes() {
        let paths: Vec<_> = ["p", "f", "e", "r"]
            .iter()
            .map(|c| c.parse::<NumberKind>().unwrap().upstream_path())
            .collect();
        assert_eq!(paths, vec!["/primes", "/fibo", "/even", "/rand"]);
    }

    #[test]
    fn test_price_entry_wire_format() {
        let json = r#"{"price":231.95,"lastUpdatedAt":"2025-05-08T04:26:27.465134"}"#;
        let entry: PriceEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.price, 231.95);
        assert_eq!(entry.last_updated_at, "2025-05-08T04:26:27.465134");

        let out = serde_json::to_string(&entry).unwrap();
        assert_eq!(out, json);
    }

    #[test]
    fn test_price_entry_passes_through_unknown_shapes() {
        let json = r#"{"price":10.5,"lastUpdatedAt":1746678387,"volume":1200}"#;
        let entry: PriceEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.price, 10.5);
        assert_eq!(entry.last_updated_at, 1746678387);
        assert_eq!(entry.extra["volume"], 1200);

        let out = serde_json::to_string(&entry).unwrap();
        assert_eq!(out, json);
    }

    #[test]
    fn test_ticker_validation() {
        assert_eq!(Ticker::new(" NVDA ").unwrap().as_str(), "NVDA");
        assert!(Ticker::new("").is_err());
        assert!(Ticker::new("   ").is_err());
    }

    #[test]
    fn test_minutes_validation() {
        assert_eq!(Minutes::parse("50").unwrap().value(), 50.0);
        assert!(Minutes::parse("0").is_err());
        assert!(Minutes::parse("0.5").is_err());
        assert!(Minutes::parse("-5").is_err());
        assert!(Minutes::parse("abc").is_err());
        assert!(Minutes::parse("").is_err());
        assert!(Minutes::parse("inf").is_err());
        assert!(Minutes::parse("NaN").is_err());
    }

    #[test]
    fn test_minutes_accepts_any_number_at_least_one() {
        assert_eq!(Minutes::parse("1").unwrap().value(), 1.0);
        assert_eq!(Minutes::parse("1.5").unwrap().value(), 1.5);
        assert_eq!(Minutes::parse("30.0").unwrap().value(), 30.0);
        assert_eq!(Minutes::parse("1e2").unwrap().value(), 100.0);
        assert_eq!(Minutes::parse("5000000000").unwrap().value(), 5e9);
    }

    #[test]
    fn test_minutes_keeps_caller_text() {
        let minutes = Minutes::parse(" 1.50 ").unwrap();
        assert_eq!(minutes.as_str(), "1.50");
        assert_eq!(minutes.to_string(), "1.50");
    }
}
