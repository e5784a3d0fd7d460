use serde::{Deserialize, Serialize};

/// 면적 단위. 사이징 내부 기준은 제곱피트이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AreaUnit {
    #[default]
    SquareFoot,
    SquareMeter,
}

const SQ_M_PER_SQ_FT: f64 = 0.092903;

impl AreaUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareFoot => "sq ft",
            AreaUnit::SquareMeter => "m²",
        }
    }
}

fn to_square_foot(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareFoot => value,
        AreaUnit::SquareMeter => value / SQ_M_PER_SQ_FT,
    }
}

fn from_square_foot(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareFoot => value,
        AreaUnit::SquareMeter => value * SQ_M_PER_SQ_FT,
    }
}

/// 면적을 변환한다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    let sq_ft = to_square_foot(value, from);
    from_square_foot(sq_ft, to)
}
