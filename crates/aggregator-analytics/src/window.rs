//! 숫자 슬라이딩 윈도우.
//!
//! 최대 `capacity`개의 서로 다른 숫자를 삽입 순서대로 보관합니다.
//! 가득 찬 상태에서 새 숫자가 들어오면 가장 오래된 숫자 하나를 버립니다.
//!
//! 불변식:
//! - 길이는 `capacity`를 넘지 않습니다.
//! - 같은 값이 두 번 들어 있지 않습니다.

use serde::Serialize;
use std::collections::VecDeque;
use thiserror::Error;

use crate::stats::{mean, round_to};

/// 윈도우 평균 반올림 자릿수.
pub const AVERAGE_DECIMALS: u32 = 2;

/// 윈도우 생성 에러.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    /// 크기 0
    #[error("window capacity must be at least 1")]
    ZeroCapacity,
}

/// 한 번의 병합 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowUpdate {
    /// 병합 직전 윈도우
    pub previous: Vec<f64>,
    /// 병합 직후 윈도우
    pub current: Vec<f64>,
    /// 병합 직후 윈도우 평균 (소수점 2자리)
    pub average: f64,
    /// 새로 추가된 숫자 수
    pub accepted: usize,
    /// 밀려난 숫자 수
    pub evicted: usize,
}

/// 중복 없는 FIFO 숫자 윈도우.
#[derive(Debug, Clone)]
pub struct NumberWindow {
    capacity: usize,
    current: VecDeque<f64>,
    previous: Vec<f64>,
}

impl NumberWindow {
    /// 빈 윈도우 생성.
    pub fn new(capacity: usize) -> Result<Self, WindowError> {
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            current: VecDeque::with_capacity(capacity),
            previous: Vec::new(),
        })
    }

    /// 최대 크기.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 현재 숫자 수.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// 비어 있는지 확인.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// 현재 윈도우 복사본 (오래된 것부터).
    pub fn current(&self) -> Vec<f64> {
        self.current.iter().copied().collect()
    }

    /// `(이전, 현재)` 윈도우 쌍.
    pub fn snapshot(&self) -> (Vec<f64>, Vec<f64>) {
        (self.previous.clone(), self.current())
    }

    /// 현재 윈도우 평균 (소수점 2자리). 빈 윈도우는 0.
    pub fn average(&self) -> f64 {
        let values: Vec<f64> = self.current.iter().copied().collect();
        round_to(mean(&values), AVERAGE_DECIMALS)
    }

    /// 새로 가져온 숫자들을 받은 순서대로 병합합니다.
    ///
    /// 이미 있는 값은 건너뛰고(위치도 바뀌지 않음), 없는 값은 끝에 추가합니다.
    /// 가득 찬 상태라면 추가할 때마다 맨 앞 값 하나를 제거합니다.
    pub fn merge(&mut self, fetched: &[f64]) -> WindowUpdate {
        self.previous = self.current();

        let mut accepted = 0;
        let mut evicted = 0;
        for &value in fetched {
            if self.current.contains(&value) {
                continue;
            }
            if self.current.len() >= self.capacity {
                self.current.pop_front();
                evicted += 1;
            }
            self.current.push_back(value);
            accepted += 1;
        }

        WindowUpdate {
            previous: self.previous.clone(),
            current: self.current(),
            average: self.average(),
            accepted,
            evicted,
        }
    }
}
