use tracing::debug;

use super::tariff::TariffConstants;
use crate::units::{convert_area, AreaUnit};

/// 사이징 계산 입력. 슬라이더 범위 안의 값이 들어온다고 가정한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingInput {
    /// 월 전기요금 [₹]
    pub monthly_bill_rupees: f64,
    /// 사용 가능한 지붕 면적 [sq ft]
    pub roof_area_sq_ft: f64,
}

impl SizingInput {
    pub fn new(monthly_bill_rupees: f64, roof_area_sq_ft: f64) -> Self {
        Self {
            monthly_bill_rupees,
            roof_area_sq_ft,
        }
    }

    /// 임의 면적 단위로 받은 지붕 면적을 sq ft로 환산해 입력을 만든다.
    pub fn with_area_unit(monthly_bill_rupees: f64, roof_area: f64, unit: AreaUnit) -> Self {
        Self::new(
            monthly_bill_rupees,
            convert_area(roof_area, unit, AreaUnit::SquareFoot),
        )
    }
}

/// 추천 용량을 결정한 제약.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitingFactor {
    /// 전력 사용량 기준 용량이 그대로 채택됨
    Consumption,
    /// 지붕 면적이 용량을 제한함
    RoofArea,
    /// 두 기준 모두 1 kW 미만이라 최소 용량으로 올림
    MinimumCapacity,
}

/// 사이징 결과. 입력과 상수 표만으로 결정된다.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingResult {
    pub monthly_units_kwh: f64,
    /// 사용량 기준 용량(반올림)
    pub required_kw: u32,
    /// 지붕 면적 기준 최대 용량(내림)
    pub max_kw_by_roof: u32,
    /// 최종 추천 용량, 항상 1 이상
    pub recommended_capacity_kw: u32,
    pub subsidy_rupees: u64,
    pub total_cost_rupees: u64,
    /// 총 설치비 - 보조금
    pub investment_rupees: i64,
    pub monthly_generation_kwh: f64,
    pub monthly_savings_rupees: f64,
    pub yearly_savings_rupees: f64,
    /// 단순 회수기간 [년], 소수 첫째 자리까지 반올림
    pub payback_years: f64,
}

impl SizingResult {
    pub fn limiting_factor(&self) -> LimitingFactor {
        if self.required_kw.min(self.max_kw_by_roof) < 1 {
            LimitingFactor::MinimumCapacity
        } else if self.max_kw_by_roof < self.required_kw {
            LimitingFactor::RoofArea
        } else {
            LimitingFactor::Consumption
        }
    }
}

/// 결과를 낼 수 없는 경우. 화면에는 "계산 불가"로 표시된다.
#[derive(Debug, Clone, PartialEq)]
pub enum SizingError {
    /// 입력이 NaN 또는 무한대
    NonFiniteInput(&'static str),
    /// 분모로 쓰이는 상수가 0 이하이거나 유한하지 않음
    InvalidConstant { name: &'static str, value: f64 },
    /// 연간 절감액이 0이라 회수기간을 구할 수 없음
    ZeroYearlySavings,
    /// 용량에 맞는 보조금 단계가 없음
    MissingSubsidyTier(u32),
    /// 보조금이 설치비보다 커서 투자액이 음수
    SubsidyExceedsCost { subsidy: u64, total_cost: u64 },
}

impl std::fmt::Display for SizingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizingError::NonFiniteInput(field) => write!(f, "input {field} is not a finite number"),
            SizingError::InvalidConstant { name, value } => {
                write!(f, "constant {name} = {value} is not usable")
            }
            SizingError::ZeroYearlySavings => write!(f, "yearly savings are zero"),
            SizingError::MissingSubsidyTier(kw) => write!(f, "no subsidy tier covers {kw} kW"),
            SizingError::SubsidyExceedsCost {
                subsidy,
                total_cost,
            } => write!(f, "subsidy {subsidy} exceeds total cost {total_cost}"),
        }
    }
}

impl std::error::Error for SizingError {}

const MONTHS_PER_YEAR: f64 = 12.0;
// 2^63
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// 월 요금과 지붕 면적으로 추천 용량, 보조금, 투자액, 회수기간을 계산한다.
///
/// 사용량 기준 용량은 반올림, 지붕 기준 용량은 내림으로 구한다. 두 값 중 작은 쪽을
/// 택하되 1 kW 미만이면 1 kW로 올린다.
pub fn compute(input: SizingInput, constants: &TariffConstants) -> Result<SizingResult, SizingError> {
    if !input.monthly_bill_rupees.is_finite() {
        return Err(SizingError::NonFiniteInput("monthly_bill_rupees"));
    }
    if !input.roof_area_sq_ft.is_finite() {
        return Err(SizingError::NonFiniteInput("roof_area_sq_ft"));
    }
    if let Some((name, value)) = constants.first_invalid() {
        return Err(SizingError::InvalidConstant { name, value });
    }

    let monthly_units_kwh = input.monthly_bill_rupees / constants.tariff_per_unit;
    let required_kw = to_kw((monthly_units_kwh / constants.generation_per_kw_per_month).round());
    let max_kw_by_roof = to_kw((input.roof_area_sq_ft / constants.roof_area_per_kw).floor());
    let recommended_capacity_kw = required_kw.min(max_kw_by_roof).max(1);

    let subsidy_rupees = constants
        .subsidy_tiers
        .subsidy_for(recommended_capacity_kw)
        .ok_or(SizingError::MissingSubsidyTier(recommended_capacity_kw))?;

    let kw = f64::from(recommended_capacity_kw);
    let total_cost = (kw * constants.cost_per_kw).round();
    // i64로 표현할 수 없는 설치비는 상수 오류로 본다.
    if total_cost >= I64_LIMIT {
        return Err(SizingError::InvalidConstant {
            name: "cost_per_kw",
            value: constants.cost_per_kw,
        });
    }
    let total_cost_rupees = total_cost as u64;
    if subsidy_rupees > total_cost_rupees {
        return Err(SizingError::SubsidyExceedsCost {
            subsidy: subsidy_rupees,
            total_cost: total_cost_rupees,
        });
    }
    let investment_rupees =
        i64::try_from(total_cost_rupees - subsidy_rupees).map_err(|_| SizingError::InvalidConstant {
            name: "cost_per_kw",
            value: constants.cost_per_kw,
        })?;

    let monthly_generation_kwh = kw * constants.generation_per_kw_per_month;
    let monthly_savings_rupees = monthly_generation_kwh * constants.tariff_per_unit;
    let yearly_savings_rupees = monthly_savings_rupees * MONTHS_PER_YEAR;
    if !(yearly_savings_rupees.is_finite() && yearly_savings_rupees > 0.0) {
        return Err(SizingError::ZeroYearlySavings);
    }
    let payback_years = round_to_tenth(investment_rupees as f64 / yearly_savings_rupees);

    debug!(
        bill = input.monthly_bill_rupees,
        area = input.roof_area_sq_ft,
        required_kw,
        max_kw_by_roof,
        recommended_capacity_kw,
        "sizing computed"
    );

    Ok(SizingResult {
        monthly_units_kwh,
        required_kw,
        max_kw_by_roof,
        recommended_capacity_kw,
        subsidy_rupees,
        total_cost_rupees,
        investment_rupees,
        monthly_generation_kwh,
        monthly_savings_rupees,
        yearly_savings_rupees,
        payback_years,
    })
}

// float -> int 캐스트는 포화된다: 음수/NaN은 0, 범위 초과는 u32::MAX.
fn to_kw(value: f64) -> u32 {
    value as u32
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
