//! 가격 통계 계산 모듈.
//!
//! 평균, 표본 표준편차(n-1), 표본 공분산, Pearson 상관계수를 계산합니다.
//!
//! # 예시
//!
//! ```rust
//! use aggregator_analytics::stats::{pearson_correlation, round_to};
//!
//! let a = [1.0, 2.0, 3.0, 4.0];
//! let b = [2.0, 4.0, 6.0, 8.0];
//! assert_eq!(pearson_correlation(&a, &b), 1.0);
//! assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
//! ```

use aggregator_core::PriceEntry;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 평균 가격 반올림 자릿수.
pub const PRICE_DECIMALS: u32 = 6;

/// 상관계수 반올림 자릿수.
pub const CORRELATION_DECIMALS: u32 = 4;

/// 소수점 `dp`자리로 반올림 (0.5는 0에서 먼 쪽으로).
///
/// 10진 표기가 아니라 `f64`의 실제 이진 값을 기준으로 반올림하므로
/// `1.005`는 `1.00499999…`로 취급되어 `1.0`이 됩니다.
/// `Decimal`로 표현할 수 없는 값(NaN, 무한대, 범위 초과)은 그대로 반환합니다.
pub fn round_to(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// 산술 평균. 빈 입력은 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 표본 표준편차 (Bessel 보정, n-1 분모). 데이터가 2개 미만이면 0.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// 표본 공분산 (n-1 분모).
///
/// 두 시계열은 같은 길이여야 하며, 데이터가 2개 미만이면 0.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mean_x = mean(x);
    let mean_y = mean(y);

    let sum: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();
    sum / (n - 1) as f64
}

/// Pearson 상관계수.
///
/// 두 시계열을 짧은 쪽 길이로 앞에서부터 잘라 위치 기준으로 정렬한 뒤 계산합니다.
/// 어느 한쪽이 비었거나 표준편차가 0이면 0을 반환합니다.
/// 결과는 소수점 4자리로 반올림됩니다.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);

    let std_x = sample_std_dev(x);
    let std_y = sample_std_dev(y);
    if std_x == 0.0 || std_y == 0.0 {
        return 0.0;
    }

    round_to(sample_covariance(x, y) / (std_x * std_y), CORRELATION_DECIMALS)
}

/// 가격 레코드에서 가격만 추출.
pub fn prices_of(entries: &[PriceEntry]) -> Vec<f64> {
    entries.iter().map(|e| e.price).collect()
}

/// 가격 이력의 평균 가격 (소수점 6자리). 빈 이력은 0.
pub fn average_price(entries: &[PriceEntry]) -> f64 {
    round_to(mean(&prices_of(entries)), PRICE_DECIMALS)
}

/// 두 가격 이력 간 Pearson 상관계수.
pub fn price_correlation(a: &[PriceEntry], b: &[PriceEntry]) -> f64 {
    pearson_correlation(&prices_of(a), &prices_of(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(prices: &[f64]) -> Vec<PriceEntry> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| PriceEntry::new(*p, format!("2025-05-08T04:{:02}:00", i)))
            .collect()
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(4.0, 2), 4.0);
        assert_eq!(round_to(2.345, 2), 2.35);
        assert_eq!(round_to(-2.345, 2), -2.35);
        assert_eq!(round_to(1.23456789, 6), 1.234568);
        assert!(round_to(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_round_to_uses_binary_value() {
        // 1.005, 1.45는 실제로 중간값보다 약간 작음
        assert_eq!(round_to(1.005, 2), 1.0);
        assert_eq!(round_to(1.45, 1), 1.4);
        assert_eq!(round_to((1.0 + 1.01) / 2.0, 2), 1.0);
        // 2.675는 약간 작고 1.125는 정확한 중간값
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(1.125, 2), 1.13);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[]), 0.0);
        assert_eq!(sample_std_dev(&[5.0]), 0.0);
        // 분산 = ((1-2.5)^2 + (2-2.5)^2 + (3-2.5)^2 + (4-2.5)^2) / 3 = 5/3
        let sd = sample_std_dev(&[1.0, 2.0, 3.0, 4.0]);
        assert!((sd - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sample_covariance() {
        let cov = sample_covariance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((cov - 2.0).abs() < 1e-12);
        assert_eq!(sample_covariance(&[1.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_perfect_correlation() {
        assert_eq!(pearson_correlation(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]), 1.0);
        assert_eq!(pearson_correlation(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), -1.0);
    }

    #[test]
    fn test_correlation_is_symmetric() {
        let a = [231.95, 124.95, 459.09, 998.27, 997.53];
        let b = [34.5, 41.2, 38.9, 44.0, 43.1];
        assert_eq!(pearson_correlation(&a, &b), pearson_correlation(&b, &a));
    }

    #[test]
    fn test_correlation_constant_series_is_zero() {
        assert_eq!(pearson_correlation(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(pearson_correlation(&[1.0, 2.0, 3.0], &[7.0, 7.0, 7.0]), 0.0);
    }

    #[test]
    fn test_correlation_empty_or_single_is_zero() {
        assert_eq!(pearson_correlation(&[], &[1.0, 2.0]), 0.0);
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[]), 0.0);
        assert_eq!(pearson_correlation(&[1.0], &[2.0]), 0.0);
    }

    #[test]
    fn test_correlation_truncates_to_common_length() {
        // 앞 3개만 사용: 완전 양의 상관
        let a = [1.0, 2.0, 3.0, 100.0, -50.0];
        let b = [2.0, 4.0, 6.0];
        assert_eq!(pearson_correlation(&a, &b), 1.0);
    }

    #[test]
    fn test_correlation_rounded_to_four_places() {
        let corr = pearson_correlation(&[1.0, 2.0, 3.0, 4.0], &[1.0, 3.0, 2.0, 4.0]);
        assert_eq!(corr, 0.8);

        let corr = pearson_correlation(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0]);
        assert_eq!(corr, 0.5);

        let corr = pearson_correlation(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 1.0, 4.0, 3.0, 7.0]);
        assert_eq!(corr, round_to(corr, 4));
        assert!(corr > 0.8 && corr < 0.9);
    }

    #[test]
    fn test_correlation_uses_unrounded_means() {
        // 평균을 6자리로 반올림하면 공분산이 왜곡되어 3.0이 나오는 입력
        let a = [1.0000001, 1.0000002, 1.0000004];
        let b = [1.0000004, 1.0000001, 1.0000002];
        assert_eq!(pearson_correlation(&a, &b), -0.5);
    }

    #[test]
    fn test_average_price() {
        assert_eq!(average_price(&[]), 0.0);
        assert_eq!(average_price(&entries(&[1.0, 2.0, 2.0])), 1.666667);
    }

    #[test]
    fn test_price_correlation_uses_prices() {
        let a = entries(&[10.0, 11.0, 12.0]);
        let b = entries(&[20.0, 22.0, 24.0]);
        assert_eq!(price_correlation(&a, &b), 1.0);
    }
}
