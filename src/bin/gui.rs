#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use rooftop_solar_sizer::{
    config,
    display::{self, DisplayTarget, Recalculator},
    faq::{self, FaqBoard},
    format::{self, Grouping},
    i18n::{self, keys},
    logging,
    sizing::{SizingError, SizingInput, SizingResult},
    slider::SliderRange,
    units::{convert_area, AreaUnit},
};
use std::collections::BTreeMap;
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    logging::init();
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/hi)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([980.0, 680.0])
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        tracing::warn!("config load failed, using defaults: {e}");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Rooftop Solar Sizer",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Calculator,
    Faq,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    tab: Tab,
    // 계산기
    bill: f64,
    /// config.area_unit 기준 면적
    area: f64,
    recalculator: Recalculator,
    outputs: BTreeMap<DisplayTarget, String>,
    last_result: Option<Result<SizingResult, SizingError>>,
    // FAQ
    faq_board: FaqBoard,
    faq_status: Option<String>,
    // 설정
    show_settings: bool,
    lang_input: String,
    window_alpha: f32,
    save_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let tr = translator(&config);
        let recalculator = recalculator(&config, &tr);
        let (faq_board, faq_status) = match faq::load(config.faq_path.as_deref()) {
            Ok(entries) => (FaqBoard::new(entries), None),
            Err(e) => {
                tracing::warn!("FAQ load failed, using built-in set: {e}");
                let status = Some(format!("{} {e}", tr.t(keys::FAQ_LOAD_ERROR)));
                (FaqBoard::new(faq::built_in().unwrap_or_default()), status)
            }
        };
        let area_range = area_range(&config);
        let mut s = Self {
            bill: config.bill_slider.snap(config.bill_slider.initial),
            area: area_range.snap(area_range.initial),
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            config,
            tr,
            tab: Tab::Calculator,
            recalculator,
            outputs: BTreeMap::new(),
            last_result: None,
            faq_board,
            faq_status,
            show_settings: false,
            save_status: None,
        };
        s.recalculate();
        s
    }

    /// 슬라이더 값이 바뀔 때마다 호출된다.
    fn recalculate(&mut self) {
        let area_sq_ft = convert_area(self.area, self.config.area_unit, AreaUnit::SquareFoot);
        let input = SizingInput::new(self.bill, area_sq_ft);
        self.outputs.clear();
        let outcome = self.recalculator.on_input_changed(&input, &mut self.outputs);
        self.last_result = Some(outcome);
    }

    /// 언어/표시 옵션이 바뀐 뒤 번역기와 계산기를 다시 만든다.
    fn rebuild(&mut self) {
        self.tr = translator(&self.config);
        self.recalculator = recalculator(&self.config, &self.tr);
        self.recalculate();
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(self.tr.t(keys::GUI_NAV_HEADING));
            ui.add_space(8.0);
        });
        for (tab, key) in [
            (Tab::Calculator, keys::GUI_TAB_CALCULATOR),
            (Tab::Faq, keys::GUI_TAB_FAQ),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(self.tr.t(key))
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_calculator(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_TAB_CALCULATOR));
        ui.label(egui::RichText::new(tr.t(keys::HELP_CALCULATOR)).small());
        ui.separator();

        let bill_range = self.config.bill_slider;
        let area_range = area_range(&self.config);
        let unit = self.config.area_unit;
        let mut changed = false;

        egui::Grid::new("calc_inputs")
            .num_columns(3)
            .spacing([12.0, 10.0])
            .show(ui, |ui| {
                ui.label(tr.t(keys::GUI_BILL_LABEL));
                let bill_slider = egui::Slider::new(&mut self.bill, bill_range.min..=bill_range.max)
                    .step_by(bill_range.step)
                    .show_value(false);
                changed |= ui.add(bill_slider).changed();
                ui.strong(format::bill_tooltip(self.bill, &self.config.display));
                ui.end_row();

                ui.label(tr.t(keys::GUI_AREA_LABEL));
                let area_slider = egui::Slider::new(&mut self.area, area_range.min..=area_range.max)
                    .step_by(area_range.step)
                    .show_value(false);
                changed |= ui.add(area_slider).changed();
                ui.strong(format::area_tooltip(self.area, unit));
                ui.end_row();
            });

        ui.horizontal(|ui| {
            let mut new_unit = unit;
            ui.radio_value(&mut new_unit, AreaUnit::SquareFoot, AreaUnit::SquareFoot.symbol());
            ui.radio_value(&mut new_unit, AreaUnit::SquareMeter, AreaUnit::SquareMeter.symbol());
            if new_unit != unit {
                self.area = convert_area(self.area, unit, new_unit);
                self.config.area_unit = new_unit;
                self.area = area_range_for(&self.config.area_slider, new_unit).snap(self.area);
                changed = true;
            }
        });

        if changed {
            self.recalculate();
        }

        ui.add_space(10.0);
        ui.separator();
        let targets: Vec<DisplayTarget> = if self.config.display.show_breakdown {
            DisplayTarget::CORE
                .iter()
                .chain(DisplayTarget::BREAKDOWN.iter())
                .copied()
                .collect()
        } else {
            DisplayTarget::CORE.to_vec()
        };
        egui::Grid::new("calc_outputs")
            .num_columns(2)
            .spacing([24.0, 8.0])
            .striped(true)
            .show(ui, |ui| {
                for target in targets {
                    ui.label(tr.t(target.label_key()));
                    let text = self.outputs.get(&target).cloned().unwrap_or_default();
                    ui.label(egui::RichText::new(text).strong().size(18.0));
                    ui.end_row();
                }
            });

        match &self.last_result {
            Some(Ok(result)) if self.config.display.show_breakdown => {
                ui.add_space(6.0);
                ui.label(format!(
                    "{} {}",
                    tr.t(keys::CALC_LIMITING),
                    tr.t(display::limiting_label_key(result.limiting_factor()))
                ));
            }
            Some(Err(e)) => {
                ui.add_space(6.0);
                let color = ui.visuals().error_fg_color;
                ui.colored_label(color, format!("{}: {e}", tr.t(keys::ERROR_PREFIX)));
            }
            _ => {}
        }
    }

    fn ui_faq(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.horizontal(|ui| {
            ui.heading(tr.t(keys::GUI_TAB_FAQ));
            if ui.button(tr.t(keys::GUI_LOAD_FAQ)).clicked() {
                if let Some(path) = FileDialog::new().add_filter("TOML", &["toml"]).pick_file() {
                    match faq::load_from_file(&path) {
                        Ok(entries) => {
                            self.faq_board = FaqBoard::new(entries);
                            self.config.faq_path = Some(path.display().to_string());
                            self.faq_status = None;
                        }
                        Err(e) => {
                            self.faq_status = Some(format!("{} {e}", tr.t(keys::FAQ_LOAD_ERROR)));
                        }
                    }
                }
            }
        });
        if let Some(msg) = &self.faq_status {
            let color = ui.visuals().warn_fg_color;
            ui.colored_label(color, msg.as_str());
        }
        ui.separator();

        // 분류 탭
        ui.horizontal_wrapped(|ui| {
            let current = self.faq_board.selected_category();
            if ui.selectable_label(current.is_none(), tr.t(keys::FAQ_CATEGORY_ALL)).clicked() {
                self.faq_board.show_all();
            }
            for category in faq::FaqCategory::ALL {
                if ui
                    .selectable_label(current == Some(category), tr.t(category.label_key()))
                    .clicked()
                {
                    self.faq_board.filter(category);
                }
            }
        });
        ui.add_space(8.0);

        // 아코디언: 클릭은 모아 두었다가 그리기가 끝난 뒤 반영한다.
        let mut clicked = None;
        for (index, entry) in self.faq_board.visible() {
            let open = self.faq_board.is_expanded(index);
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                let marker = if open { "−" } else { "+" };
                let header = egui::RichText::new(format!("{marker}  {}", entry.question)).strong();
                if ui.add(egui::Label::new(header).sense(egui::Sense::click())).clicked() {
                    clicked = Some(index);
                }
                if open {
                    ui.add_space(4.0);
                    ui.label(entry.answer.as_str());
                }
            });
            ui.add_space(4.0);
        }
        if let Some(index) = clicked {
            self.faq_board.toggle(index);
        }
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let mut open = self.show_settings;
        let mut dirty = false;
        let mut save = false;
        egui::Window::new(tr.t(keys::GUI_SETTINGS))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(tr.t(keys::GUI_LANGUAGE));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.clone())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), tr.t(keys::GUI_LANGUAGE_AUTO));
                        ui.selectable_value(&mut self.lang_input, "en-in".into(), "English");
                        ui.selectable_value(&mut self.lang_input, "hi-in".into(), "हिन्दी");
                    });
                ui.separator();
                ui.label(tr.t(keys::GUI_GROUPING));
                ui.horizontal(|ui| {
                    let grouping = &mut self.config.display.grouping;
                    dirty |= ui.radio_value(grouping, Grouping::Western, "1,234,567").changed();
                    dirty |= ui.radio_value(grouping, Grouping::Indian, "12,34,567").changed();
                });
                dirty |= ui
                    .checkbox(&mut self.config.display.show_breakdown, tr.t(keys::GUI_BREAKDOWN))
                    .changed();
                ui.separator();
                ui.label(tr.t(keys::GUI_ALPHA));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                if ui.button(tr.t(keys::GUI_SAVE)).clicked() {
                    save = true;
                }
                if let Some(msg) = &self.save_status {
                    ui.label(msg.as_str());
                }
            });
        self.show_settings = open;

        if save {
            self.config.language = self.lang_input.clone();
            self.config.window_alpha = self.window_alpha;
            self.rebuild();
            self.save_status = Some(match self.config.save() {
                Ok(()) => self.tr.t(keys::SETTINGS_SAVED),
                Err(e) => {
                    tracing::error!("config save failed: {e}");
                    format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX))
                }
            });
        } else if dirty {
            self.rebuild();
        }
    }
}

fn translator(config: &config::Config) -> i18n::Translator {
    let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
    tracing::debug!(lang = %lang_code, "GUI language resolved");
    i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref())
}

fn recalculator(config: &config::Config, tr: &i18n::Translator) -> Recalculator {
    Recalculator::new(config.tariff.clone(), config.display.clone(), tr.t(keys::UNAVAILABLE))
}

fn area_range(config: &config::Config) -> SliderRange {
    area_range_for(&config.area_slider, config.area_unit)
}

/// sq ft 기준 슬라이더 범위를 표시 단위로 환산한다.
fn area_range_for(range: &SliderRange, unit: AreaUnit) -> SliderRange {
    range.map(|v| convert_area(v, AreaUnit::SquareFoot, unit))
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::GUI_APP_TITLE));
                ui.separator();
                if ui.button(self.tr.t(keys::GUI_SETTINGS)).clicked() {
                    self.show_settings = true;
                }
            });
        });

        if self.show_settings {
            self.ui_settings(ctx);
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(180.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Calculator => self.ui_calculator(ui),
                    Tab::Faq => self.ui_faq(ui),
                });
        });
    }
}
