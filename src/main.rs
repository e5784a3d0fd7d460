use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rooftop_solar_sizer::{app, config, i18n, logging, units::AreaUnit};

/// 지붕형 태양광 용량·보조금·회수기간 계산기 (CLI).
#[derive(Debug, Parser)]
#[command(name = "rooftop_solar_sizer_cli", version, about)]
struct Cli {
    /// 월 전기요금 [₹]. --area와 함께 주면 한 번만 계산하고 끝낸다.
    #[arg(long)]
    bill: Option<f64>,
    /// 사용 가능한 지붕 면적
    #[arg(long)]
    area: Option<f64>,
    /// --area의 단위
    #[arg(long, value_enum)]
    area_unit: Option<AreaArg>,
    /// 언어(auto/en/hi)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 설정 파일 경로(기본: ./config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// 총 설치비, 발전량, 절감액도 함께 출력
    #[arg(long)]
    breakdown: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AreaArg {
    Sqft,
    Sqm,
}

impl From<AreaArg> for AreaUnit {
    fn from(value: AreaArg) -> Self {
        match value {
            AreaArg::Sqft => AreaUnit::SquareFoot,
            AreaArg::Sqm => AreaUnit::SquareMeter,
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> std::process::ExitCode {
    logging::init();
    let cli = Cli::parse();
    let lang = i18n::resolve_language(&cli.lang, None);
    match try_run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            let tr = i18n::Translator::new(&lang);
            eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            std::process::ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), app::AppError> {
    let (mut cfg, path) = match &cli.config {
        Some(path) => (config::load_from(path)?, path.clone()),
        None => (config::load_or_default()?, PathBuf::from(config::CONFIG_FILE)),
    };
    if cli.breakdown {
        cfg.display.show_breakdown = true;
    }
    let mut tr = app::translator_for(&cfg, &cli.lang);
    let area_unit = cli.area_unit.map(AreaUnit::from).unwrap_or(cfg.area_unit);
    match (cli.bill, cli.area) {
        (Some(bill), Some(area)) => app::run_once(&cfg, &tr, bill, area, area_unit),
        _ => app::run(&mut cfg, &mut tr, &path, &cli.lang),
    }
}
