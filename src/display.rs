//! 계산기와 화면 사이의 경계. 입력은 `InputSource`로 읽고 결과 문자열은
//! `OutputSink`의 고정된 표시 대상에 쓴다.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::format::{self, DisplayOptions};
use crate::i18n::keys;
use crate::sizing::{self, LimitingFactor, SizingError, SizingInput, SizingResult, TariffConstants};

/// 결과가 쓰이는 표시 대상. 식별자는 고정이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisplayTarget {
    Capacity,
    Subsidy,
    Investment,
    Payback,
    TotalCost,
    MonthlyGeneration,
    MonthlySavings,
    YearlySavings,
}

impl DisplayTarget {
    /// 항상 갱신되는 네 개의 대상.
    pub const CORE: [DisplayTarget; 4] = [
        DisplayTarget::Capacity,
        DisplayTarget::Subsidy,
        DisplayTarget::Investment,
        DisplayTarget::Payback,
    ];

    /// `show_breakdown`일 때 추가로 갱신되는 대상.
    pub const BREAKDOWN: [DisplayTarget; 4] = [
        DisplayTarget::TotalCost,
        DisplayTarget::MonthlyGeneration,
        DisplayTarget::MonthlySavings,
        DisplayTarget::YearlySavings,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DisplayTarget::Capacity => "capacity",
            DisplayTarget::Subsidy => "subsidy",
            DisplayTarget::Investment => "investment",
            DisplayTarget::Payback => "payback",
            DisplayTarget::TotalCost => "total_cost",
            DisplayTarget::MonthlyGeneration => "monthly_generation",
            DisplayTarget::MonthlySavings => "monthly_savings",
            DisplayTarget::YearlySavings => "yearly_savings",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            DisplayTarget::Capacity => keys::TARGET_CAPACITY,
            DisplayTarget::Subsidy => keys::TARGET_SUBSIDY,
            DisplayTarget::Investment => keys::TARGET_INVESTMENT,
            DisplayTarget::Payback => keys::TARGET_PAYBACK,
            DisplayTarget::TotalCost => keys::TARGET_TOTAL_COST,
            DisplayTarget::MonthlyGeneration => keys::TARGET_MONTHLY_GENERATION,
            DisplayTarget::MonthlySavings => keys::TARGET_MONTHLY_SAVINGS,
            DisplayTarget::YearlySavings => keys::TARGET_YEARLY_SAVINGS,
        }
    }
}

pub fn limiting_label_key(factor: LimitingFactor) -> &'static str {
    match factor {
        LimitingFactor::Consumption => keys::LIMIT_CONSUMPTION,
        LimitingFactor::RoofArea => keys::LIMIT_ROOF,
        LimitingFactor::MinimumCapacity => keys::LIMIT_MINIMUM,
    }
}

/// 두 개의 범위 입력 값을 제공한다.
pub trait InputSource {
    fn monthly_bill(&self) -> f64;
    fn roof_area_sq_ft(&self) -> f64;
}

/// 표시 대상에 문자열을 기록한다. 같은 대상에 다시 쓰면 마지막 값이 남는다.
pub trait OutputSink {
    fn write(&mut self, target: DisplayTarget, text: &str);
}

impl InputSource for SizingInput {
    fn monthly_bill(&self) -> f64 {
        self.monthly_bill_rupees
    }

    fn roof_area_sq_ft(&self) -> f64 {
        self.roof_area_sq_ft
    }
}

impl OutputSink for BTreeMap<DisplayTarget, String> {
    fn write(&mut self, target: DisplayTarget, text: &str) {
        self.insert(target, text.to_string());
    }
}

impl OutputSink for HashMap<DisplayTarget, String> {
    fn write(&mut self, target: DisplayTarget, text: &str) {
        self.insert(target, text.to_string());
    }
}

/// 계산 결과(또는 오류)를 모든 표시 대상의 문자열로 바꾼다.
/// 오류면 모든 대상이 `unavailable` 문자열이 된다.
pub fn render(
    outcome: &Result<SizingResult, SizingError>,
    opts: &DisplayOptions,
    unavailable: &str,
) -> Vec<(DisplayTarget, String)> {
    let all = DisplayTarget::CORE.iter().chain(DisplayTarget::BREAKDOWN.iter());
    match outcome {
        Ok(r) => all
            .map(|&target| {
                let text = match target {
                    DisplayTarget::Capacity => format::capacity(r.recommended_capacity_kw),
                    DisplayTarget::Subsidy => format::currency(r.subsidy_rupees as f64, opts),
                    DisplayTarget::Investment => format::currency(r.investment_rupees as f64, opts),
                    DisplayTarget::Payback => format::payback(r.payback_years),
                    DisplayTarget::TotalCost => format::currency(r.total_cost_rupees as f64, opts),
                    DisplayTarget::MonthlyGeneration => format::energy(r.monthly_generation_kwh, opts),
                    DisplayTarget::MonthlySavings => format::currency(r.monthly_savings_rupees, opts),
                    DisplayTarget::YearlySavings => format::currency(r.yearly_savings_rupees, opts),
                };
                (target, text)
            })
            .collect(),
        Err(_) => all.map(|&target| (target, unavailable.to_string())).collect(),
    }
}

/// 입력 변경 알림마다 계산 → 서식 → 기록을 수행한다. 상태를 갖지 않는다.
#[derive(Debug, Clone)]
pub struct Recalculator {
    constants: TariffConstants,
    options: DisplayOptions,
    unavailable: String,
}

impl Recalculator {
    pub fn new(constants: TariffConstants, options: DisplayOptions, unavailable: impl Into<String>) -> Self {
        Self {
            constants,
            options,
            unavailable: unavailable.into(),
        }
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    pub fn on_input_changed<S, O>(&self, source: &S, sink: &mut O) -> Result<SizingResult, SizingError>
    where
        S: InputSource + ?Sized,
        O: OutputSink + ?Sized,
    {
        let input = SizingInput::new(source.monthly_bill(), source.roof_area_sq_ft());
        let outcome = sizing::compute(input, &self.constants);
        if let Err(e) = &outcome {
            warn!(bill = input.monthly_bill_rupees, area = input.roof_area_sq_ft, "sizing unavailable: {e}");
        }
        for (target, text) in render(&outcome, &self.options, &self.unavailable) {
            if self.options.show_breakdown || DisplayTarget::CORE.contains(&target) {
                sink.write(target, &text);
            }
        }
        outcome
    }
}
