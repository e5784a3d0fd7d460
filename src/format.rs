//! 결과 표시용 문자열 서식. 통화 기호, 천 단위 구분, 용량/회수기간 표기.

use serde::{Deserialize, Serialize};

use crate::units::AreaUnit;

/// 자릿수 구분 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Grouping {
    /// 1,234,567
    #[default]
    Western,
    /// 12,34,567 (lakh/crore)
    Indian,
}

/// 화면 표시 옵션.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub grouping: Grouping,
    /// 총 설치비/발전량/절감액까지 표시할지 여부
    pub show_breakdown: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
            grouping: Grouping::Western,
            show_breakdown: false,
        }
    }
}

/// 정수에 자릿수 구분 쉼표를 넣는다.
pub fn group_digits(value: u64, grouping: Grouping) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let width = match grouping {
        Grouping::Western => 3,
        Grouping::Indian => 2,
    };
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(width);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

// 절댓값을 소수 둘째 자리까지 표기하고 끝자리 0은 지운다.
fn grouped_abs(value: f64, grouping: Grouping) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let mut out = group_digits(cents / 100, grouping);
    let frac = cents % 100;
    if frac != 0 {
        out.push('.');
        out.push_str(format!("{frac:02}").trim_end_matches('0'));
    }
    out
}

/// 통화 금액. 음수는 기호 앞에 부호를 둔다(-₹5,000).
pub fn currency(amount: f64, opts: &DisplayOptions) -> String {
    let body = grouped_abs(amount, opts.grouping);
    let sign = if amount < 0.0 && body != "0" { "-" } else { "" };
    format!("{sign}{}{body}", opts.currency_symbol)
}

pub fn capacity(kw: u32) -> String {
    format!("{kw} kW")
}

pub fn payback(years: f64) -> String {
    format!("{years:.1}")
}

pub fn energy(kwh: f64, opts: &DisplayOptions) -> String {
    format!("{} kWh", grouped_abs(kwh, opts.grouping))
}

/// 요금 슬라이더 말풍선 표기.
pub fn bill_tooltip(bill: f64, opts: &DisplayOptions) -> String {
    currency(bill.trunc(), opts)
}

/// 면적 슬라이더 말풍선 표기.
pub fn area_tooltip(area: f64, unit: AreaUnit) -> String {
    let value = if area.fract() == 0.0 {
        format!("{area:.0}")
    } else {
        format!("{area:.1}")
    };
    format!("{value} {}", unit.symbol())
}
