//! 숫자 윈도우와 가격 통계.
//!
//! - [`window`]: 중복 없는 FIFO 숫자 윈도우와 평균
//! - [`stats`]: 평균, 표본 표준편차, 공분산, Pearson 상관계수

pub mod stats;
pub mod window;

pub use stats::{
    average_price, mean, pearson_correlation, price_correlation, round_to, sample_covariance,
    sample_std_dev,
};
pub use window::{NumberWindow, WindowError, WindowUpdate};
