use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::faq::FaqError;
use crate::i18n::{self, Translator};
use crate::sizing::{SizingError, SizingInput};
use crate::ui_cli::{self, MenuChoice};
use crate::units::AreaUnit;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 콘솔 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 사이징 계산 불가
    Sizing(SizingError),
    /// FAQ 로드 오류
    Faq(FaqError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Config(e) => write!(f, "configuration error: {e}"),
            AppError::Sizing(e) => write!(f, "sizing unavailable: {e}"),
            AppError::Faq(e) => write!(f, "FAQ error: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<SizingError> for AppError {
    fn from(value: SizingError) -> Self {
        AppError::Sizing(value)
    }
}

impl From<FaqError> for AppError {
    fn from(value: FaqError) -> Self {
        AppError::Faq(value)
    }
}

/// 설정의 언어/언어팩으로 번역기를 만든다.
pub fn translator_for(config: &Config, cli_lang: &str) -> Translator {
    let code = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
    Translator::new_with_pack(&code, config.language_pack_dir.as_deref())
}

/// CLI 애플리케이션의 메인 루프를 실행한다. 설정은 `config_path`에 저장한다.
/// `cli_lang`은 설정 저장 후 번역기를 다시 만들 때도 우선한다.
pub fn run(
    config: &mut Config,
    tr: &mut Translator,
    config_path: &Path,
    cli_lang: &str,
) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Calculator => ui_cli::handle_calculator(tr, config)?,
            MenuChoice::Faq => ui_cli::handle_faq(tr, config)?,
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    config.save_to(config_path)?;
                    *tr = translator_for(config, cli_lang);
                    println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
                }
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

/// 인자로 받은 값으로 한 번만 계산해 출력한다. 계산 불가면 오류로 끝낸다.
pub fn run_once(
    config: &Config,
    tr: &Translator,
    bill: f64,
    area: f64,
    area_unit: AreaUnit,
) -> Result<(), AppError> {
    let input = ui_cli::snap_input(tr, config, SizingInput::with_area_unit(bill, area, area_unit));
    ui_cli::print_sizing(tr, config, &input)?;
    Ok(())
}
