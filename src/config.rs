use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::format::DisplayOptions;
use crate::sizing::TariffConstants;
use crate::slider::SliderRange;
use crate::units::AreaUnit;

/// 기본 설정 파일 경로.
pub const CONFIG_FILE: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/en-in/hi-in)
    pub language: String,
    /// 외부 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// 내장 FAQ 대신 읽을 TOML 파일
    pub faq_path: Option<String>,
    /// 면적 입력 단위
    pub area_unit: AreaUnit,
    /// GUI 창 투명도
    pub window_alpha: f32,
    pub tariff: TariffConstants,
    /// 월 요금 슬라이더 [₹]
    pub bill_slider: SliderRange,
    /// 지붕 면적 슬라이더 [sq ft]
    pub area_slider: SliderRange,
    pub display: DisplayOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            faq_path: None,
            area_unit: AreaUnit::SquareFoot,
            window_alpha: 1.0,
            tariff: TariffConstants::default(),
            bill_slider: SliderRange::default_bill(),
            area_slider: SliderRange::default_area(),
            display: DisplayOptions::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류(보조금 표 검증 실패 포함)
    Parse(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
    /// 값은 읽혔으나 사용할 수 없음
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config file I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Parse(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        load_from(path)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!(path = CONFIG_FILE, "default config written");
        Ok(cfg)
    }
}

/// 지정한 파일에서 설정을 읽고 검증한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg = parse(&content)?;
    info!(path = %path.display(), language = %cfg.language, "config loaded");
    Ok(cfg)
}

/// TOML 문자열을 설정으로 읽는다. 빠진 항목은 기본값으로 채운다.
pub fn parse(content: &str) -> Result<Config, ConfigError> {
    let cfg: Config = toml::from_str(content)?;
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    /// 상수 표와 슬라이더 범위를 검사한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((name, value)) = self.tariff.first_invalid() {
            return Err(ConfigError::Invalid(format!("tariff.{name} = {value}")));
        }
        self.bill_slider
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("bill_slider: {e}")))?;
        self.area_slider
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("area_slider: {e}")))?;
        if !(0.0..=1.0).contains(&self.window_alpha) {
            return Err(ConfigError::Invalid(format!(
                "window_alpha = {} outside 0..=1",
                self.window_alpha
            )));
        }
        Ok(())
    }

    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!(path = %path.display(), "config saved");
        Ok(())
    }
}
