use serde::{Deserialize, Serialize};

/// 범위 입력(슬라이더) 설정. 입력 경계 검사는 여기서 끝내고 계산 모듈로 넘긴다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// 화면을 처음 열었을 때의 값
    pub initial: f64,
}

impl SliderRange {
    pub const fn new(min: f64, max: f64, step: f64, initial: f64) -> Self {
        Self {
            min,
            max,
            step,
            initial,
        }
    }

    /// 월 요금 슬라이더 기본값 [₹].
    pub const fn default_bill() -> Self {
        Self::new(500.0, 20_000.0, 100.0, 1_500.0)
    }

    /// 지붕 면적 슬라이더 기본값 [sq ft].
    pub const fn default_area() -> Self {
        Self::new(100.0, 2_000.0, 50.0, 500.0)
    }

    pub fn validate(&self) -> Result<(), String> {
        let all_finite = [self.min, self.max, self.step, self.initial]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err("slider bounds must be finite".into());
        }
        if self.min >= self.max {
            return Err(format!("slider min {} must be below max {}", self.min, self.max));
        }
        if self.step <= 0.0 {
            return Err(format!("slider step {} must be positive", self.step));
        }
        Ok(())
    }

    /// 범위로 자르고 min 기준 가장 가까운 step 위치로 맞춘다. 숫자가 아니면 min.
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }

    /// 슬라이더 위의 상대 위치(0..=1).
    pub fn fraction(&self, value: f64) -> f64 {
        (self.snap(value) - self.min) / (self.max - self.min)
    }

    /// 모든 값에 같은 변환을 적용한 범위(단위 환산용).
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.min), f(self.max), f(self.step), f(self.initial))
    }
}
