use serde::{Deserialize, Serialize};

/// 설치 용량 하한별 보조금 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidyTier {
    /// 이 단계가 적용되는 최소 용량 [kW]
    pub min_kw: u32,
    /// 보조금 [₹]
    pub amount_rupees: u64,
}

/// 보조금 표 구성 오류.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubsidyTableError {
    /// 단계가 하나도 없음
    Empty,
    /// 0 kW 단계는 허용하지 않는다
    ZeroMinimum,
    /// 같은 하한을 가진 단계가 둘 이상
    Duplicate(u32),
    /// 1 kW부터 시작하지 않아 공백 구간이 생김
    MissingBaseTier(u32),
}

impl std::fmt::Display for SubsidyTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubsidyTableError::Empty => write!(f, "subsidy table has no tiers"),
            SubsidyTableError::ZeroMinimum => write!(f, "subsidy tier with min_kw = 0"),
            SubsidyTableError::Duplicate(kw) => write!(f, "duplicate subsidy tier at {kw} kW"),
            SubsidyTableError::MissingBaseTier(first) => {
                write!(f, "subsidy table starts at {first} kW, expected a 1 kW tier")
            }
        }
    }
}

impl std::error::Error for SubsidyTableError {}

/// 용량에 대한 계단형 보조금 표.
///
/// 생성 시 정렬·검증되므로 1 kW 이상의 모든 용량에 대해 정확히 하나의 단계가 대응한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SubsidyTier>", into = "Vec<SubsidyTier>")]
pub struct SubsidyTable {
    tiers: Vec<SubsidyTier>,
}

impl SubsidyTable {
    pub fn new(mut tiers: Vec<SubsidyTier>) -> Result<Self, SubsidyTableError> {
        if tiers.is_empty() {
            return Err(SubsidyTableError::Empty);
        }
        tiers.sort_by_key(|t| t.min_kw);
        if tiers[0].min_kw == 0 {
            return Err(SubsidyTableError::ZeroMinimum);
        }
        if tiers[0].min_kw != 1 {
            return Err(SubsidyTableError::MissingBaseTier(tiers[0].min_kw));
        }
        if let Some(pair) = tiers.windows(2).find(|w| w[0].min_kw == w[1].min_kw) {
            return Err(SubsidyTableError::Duplicate(pair[0].min_kw));
        }
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[SubsidyTier] {
        &self.tiers
    }

    /// 용량에 해당하는 보조금을 찾는다. 0 kW처럼 어떤 단계에도 속하지 않으면 None.
    pub fn subsidy_for(&self, kw: u32) -> Option<u64> {
        self.tiers
            .iter()
            .rev()
            .find(|t| t.min_kw <= kw)
            .map(|t| t.amount_rupees)
    }
}

impl Default for SubsidyTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                SubsidyTier { min_kw: 1, amount_rupees: 30_000 },
                SubsidyTier { min_kw: 2, amount_rupees: 60_000 },
                SubsidyTier { min_kw: 3, amount_rupees: 78_000 },
            ],
        }
    }
}

impl TryFrom<Vec<SubsidyTier>> for SubsidyTable {
    type Error = SubsidyTableError;

    fn try_from(value: Vec<SubsidyTier>) -> Result<Self, Self::Error> {
        SubsidyTable::new(value)
    }
}

impl From<SubsidyTable> for Vec<SubsidyTier> {
    fn from(value: SubsidyTable) -> Self {
        value.tiers
    }
}

/// 사이징 계산에 쓰이는 요금·발전·비용 상수 표.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffConstants {
    /// 전력 요금 [₹/kWh]
    pub tariff_per_unit: f64,
    /// 설치 kW당 월 발전량 [kWh/kW·월]
    pub generation_per_kw_per_month: f64,
    /// kW당 필요한 지붕 면적 [sq ft/kW]
    pub roof_area_per_kw: f64,
    /// kW당 설치비 [₹/kW]
    pub cost_per_kw: f64,
    /// 계단형 보조금 표
    pub subsidy_tiers: SubsidyTable,
}

impl Default for TariffConstants {
    fn default() -> Self {
        Self {
            tariff_per_unit: 7.5,
            generation_per_kw_per_month: 135.0,
            roof_area_per_kw: 100.0,
            cost_per_kw: 65_000.0,
            subsidy_tiers: SubsidyTable::default(),
        }
    }
}

impl TariffConstants {
    /// 나눗셈 분모로 쓰이는 상수는 양수, 설치비는 0 이상이어야 한다.
    /// 위반한 첫 상수의 이름과 값을 돌려준다.
    pub fn first_invalid(&self) -> Option<(&'static str, f64)> {
        let positive = [
            ("tariff_per_unit", self.tariff_per_unit),
            ("generation_per_kw_per_month", self.generation_per_kw_per_month),
            ("roof_area_per_kw", self.roof_area_per_kw),
        ];
        positive
            .into_iter()
            .find(|(_, v)| !v.is_finite() || *v <= 0.0)
            .or_else(|| {
                let c = self.cost_per_kw;
                (!c.is_finite() || c < 0.0).then_some(("cost_per_kw", c))
            })
    }
}
