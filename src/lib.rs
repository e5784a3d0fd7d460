//! 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 코드를 쓰게 한다.

pub mod app;
pub mod config;
pub mod display;
pub mod faq;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod sizing;
pub mod slider;
pub mod ui_cli;
pub mod units;
