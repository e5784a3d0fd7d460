use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::app::AppError;
use crate::config::Config;
use crate::display::{self, DisplayTarget, OutputSink, Recalculator};
use crate::faq::{self, FaqBoard, FaqCategory};
use crate::format::{self, Grouping};
use crate::i18n::{keys, Translator};
use crate::sizing::{SizingError, SizingInput, SizingResult};
use crate::slider::SliderRange;
use crate::units::{convert_area, AreaUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculator,
    Faq,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_CALCULATOR));
    println!("{}", tr.t(keys::MAIN_MENU_FAQ));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = match read_line(&tr.t(keys::PROMPT_MENU_SELECT)) {
            Ok(sel) => sel,
            // 입력이 닫혔으면 종료
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(MenuChoice::Exit),
            Err(e) => return Err(e),
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculator),
            "2" => return Ok(MenuChoice::Faq),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 결과 표시 대상을 "라벨: 값" 한 줄씩 콘솔에 찍는다.
struct ConsoleSink<'a> {
    tr: &'a Translator,
}

impl OutputSink for ConsoleSink<'_> {
    fn write(&mut self, target: DisplayTarget, text: &str) {
        let label = format!("{}:", self.tr.t(target.label_key()));
        println!("  {label:<28} {text}");
    }
}

/// 계산기 메뉴를 처리한다. 계산이 불가해도 메뉴로 돌아간다.
pub fn handle_calculator(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::CALC_HEADING));
    println!("{}", tr.t(keys::HELP_CALCULATOR));
    let bill_prompt = range_prompt(tr, keys::CALC_PROMPT_BILL, &cfg.bill_slider, &cfg.display.currency_symbol);
    let bill = read_f64(tr, &bill_prompt)?;

    println!("{}", tr.t(keys::CALC_AREA_UNIT_OPTIONS));
    let unit = match read_line(&tr.t(keys::PROMPT_SELECT))?.trim() {
        "1" => AreaUnit::SquareFoot,
        "2" => AreaUnit::SquareMeter,
        _ => cfg.area_unit,
    };
    let area_range = cfg
        .area_slider
        .map(|v| convert_area(v, AreaUnit::SquareFoot, unit));
    let area = read_f64(tr, &range_prompt(tr, keys::CALC_PROMPT_AREA, &area_range, unit.symbol()))?;

    let input = snap_input(tr, cfg, SizingInput::with_area_unit(bill, area, unit));
    if let Err(e) = print_sizing(tr, cfg, &input) {
        debug!("calculator result unavailable: {e}");
    }
    Ok(())
}

fn range_prompt(tr: &Translator, key: &str, range: &SliderRange, unit: &str) -> String {
    format!(
        "{} ({:.0}-{:.0} {unit}, step {}): ",
        tr.t(key),
        range.min,
        range.max,
        range.step
    )
}

/// 슬라이더 범위/간격으로 입력을 맞추고, 바뀌었으면 알린다.
pub fn snap_input(tr: &Translator, cfg: &Config, input: SizingInput) -> SizingInput {
    let bill = cfg.bill_slider.snap(input.monthly_bill_rupees);
    let area = cfg.area_slider.snap(input.roof_area_sq_ft);
    if bill != input.monthly_bill_rupees || area != input.roof_area_sq_ft {
        println!(
            "{} {} / {}",
            tr.t(keys::CALC_CLAMPED),
            format::bill_tooltip(bill, &cfg.display),
            format::area_tooltip(area, AreaUnit::SquareFoot)
        );
    }
    SizingInput::new(bill, area)
}

/// 슬라이더 위치를 막대로 표현한다.
fn gauge(fraction: f64) -> String {
    const WIDTH: usize = 20;
    let filled = ((fraction.clamp(0.0, 1.0) * WIDTH as f64).round() as usize).min(WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

/// 입력 위치와 계산 결과를 출력한다.
pub fn print_sizing(tr: &Translator, cfg: &Config, input: &SizingInput) -> Result<SizingResult, SizingError> {
    println!(
        "  {} {}",
        gauge(cfg.bill_slider.fraction(input.monthly_bill_rupees)),
        format::bill_tooltip(input.monthly_bill_rupees, &cfg.display)
    );
    println!(
        "  {} {}",
        gauge(cfg.area_slider.fraction(input.roof_area_sq_ft)),
        format::area_tooltip(input.roof_area_sq_ft, AreaUnit::SquareFoot)
    );
    println!("{}", tr.t(keys::CALC_RESULT_HEADING));
    let recalc = Recalculator::new(cfg.tariff.clone(), cfg.display.clone(), tr.t(keys::UNAVAILABLE));
    let mut sink = ConsoleSink { tr };
    let outcome = recalc.on_input_changed(input, &mut sink);
    match &outcome {
        Ok(result) if cfg.display.show_breakdown => {
            println!("  {} {}", tr.t(keys::CALC_LIMITING), tr.t(display::limiting_label_key(result.limiting_factor())));
        }
        Ok(_) => {}
        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
    }
    outcome
}

/// FAQ 메뉴를 처리한다. 분류를 고른 뒤 번호로 항목을 펼치거나 접는다.
pub fn handle_faq(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::FAQ_HEADING));
    let entries = match faq::load(cfg.faq_path.as_deref()) {
        Ok(entries) => entries,
        Err(e) => {
            println!("{} {e}", tr.t(keys::FAQ_LOAD_ERROR));
            faq::built_in()?
        }
    };
    let mut board = FaqBoard::new(entries);
    loop {
        let sel = read_line(&tr.t(keys::FAQ_CATEGORY_PROMPT))?;
        match sel.trim() {
            "" => return Ok(()),
            "5" => board.show_all(),
            s => match s.parse::<usize>().ok().and_then(|n| FaqCategory::ALL.get(n.wrapping_sub(1)).copied()) {
                Some(category) => board.filter(category),
                None => {
                    println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
                    continue;
                }
            },
        }
        browse_faq(tr, &mut board)?;
    }
}

fn browse_faq(tr: &Translator, board: &mut FaqBoard) -> Result<(), AppError> {
    loop {
        let heading = board
            .selected_category()
            .map(|c| tr.t(c.label_key()))
            .unwrap_or_else(|| tr.t(keys::FAQ_CATEGORY_ALL));
        println!("\n[{heading}]");
        let visible: Vec<usize> = board.visible().map(|(i, _)| i).collect();
        for (n, &index) in visible.iter().enumerate() {
            let entry = &board.entries()[index];
            let marker = if board.is_expanded(index) { "−" } else { "+" };
            println!("{:>3}) {marker} {}", n + 1, entry.question);
            if board.is_expanded(index) {
                println!("       {}", entry.answer);
            }
        }
        let sel = read_line(&tr.t(keys::FAQ_TOGGLE_PROMPT))?;
        if sel.trim().is_empty() {
            return Ok(());
        }
        match sel.trim().parse::<usize>().ok().and_then(|n| visible.get(n.wrapping_sub(1))) {
            Some(&index) => {
                board.toggle(index);
            }
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 설정 메뉴를 처리한다. 설정이 바뀌었으면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} language={}, grouping={:?}, breakdown={}",
        tr.t(keys::SETTINGS_CURRENT),
        cfg.language,
        cfg.display.grouping,
        cfg.display.show_breakdown
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => Ok(false),
        "1" => {
            let code = read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            match code.trim().to_lowercase().as_str() {
                c @ ("auto" | "en" | "en-in" | "hi" | "hi-in") => {
                    cfg.language = c.to_string();
                    Ok(true)
                }
                _ => {
                    println!("{}", tr.t(keys::SETTINGS_INVALID));
                    Ok(false)
                }
            }
        }
        "2" => {
            println!("{}", tr.t(keys::SETTINGS_GROUPING_OPTIONS));
            let grouping = match read_line(&tr.t(keys::PROMPT_SELECT))?.trim() {
                "1" => Grouping::Western,
                "2" => Grouping::Indian,
                _ => {
                    println!("{}", tr.t(keys::SETTINGS_INVALID));
                    return Ok(false);
                }
            };
            cfg.display.grouping = grouping;
            Ok(true)
        }
        "3" => {
            cfg.display.show_breakdown = !cfg.display.show_breakdown;
            Ok(true)
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            Ok(false)
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    read_line_from(&mut io::stdin().lock())
}

/// 한 줄을 읽는다. 입력이 끝났으면(0바이트) `UnexpectedEof` 오류.
fn read_line_from<R: BufRead>(reader: &mut R) -> Result<String, AppError> {
    let mut buf = String::new();
    let n = reader.read_line(&mut buf).map_err(AppError::Io)?;
    if n == 0 {
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().replace(',', "").parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_fills_proportionally() {
        assert_eq!(gauge(0.0), format!("[{}]", "-".repeat(20)));
        assert_eq!(gauge(1.0), format!("[{}]", "#".repeat(20)));
        assert_eq!(gauge(0.5), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
    }

    #[test]
    fn closed_input_is_reported_as_eof() {
        let mut input = io::Cursor::new("3\n\n");
        assert_eq!(read_line_from(&mut input).expect("first line"), "3\n");
        // 빈 줄은 입력 종료가 아니다
        assert_eq!(read_line_from(&mut input).expect("blank line"), "\n");
        match read_line_from(&mut input) {
            Err(AppError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected {other:?}"),
        }
        // 끝난 뒤에도 계속 같은 오류
        assert!(read_line_from(&mut input).is_err());
    }
}
