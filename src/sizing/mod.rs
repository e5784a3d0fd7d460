//! 지붕형 태양광 용량·보조금·회수기간 계산 모듈 모음.

pub mod calculator;
pub mod tariff;

pub use calculator::*;
pub use tariff::*;
