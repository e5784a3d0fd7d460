use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::{debug, warn};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const UNAVAILABLE: &str = "general.unavailable";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CALCULATOR: &str = "main_menu.calculator";
    pub const MAIN_MENU_FAQ: &str = "main_menu.faq";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";

    pub const CALC_HEADING: &str = "calculator.heading";
    pub const CALC_PROMPT_BILL: &str = "calculator.prompt_bill";
    pub const CALC_PROMPT_AREA: &str = "calculator.prompt_area";
    pub const CALC_AREA_UNIT_OPTIONS: &str = "calculator.area_unit_options";
    pub const CALC_CLAMPED: &str = "calculator.clamped";
    pub const CALC_RESULT_HEADING: &str = "calculator.result_heading";
    pub const CALC_LIMITING: &str = "calculator.limiting";
    pub const LIMIT_CONSUMPTION: &str = "calculator.limit_consumption";
    pub const LIMIT_ROOF: &str = "calculator.limit_roof";
    pub const LIMIT_MINIMUM: &str = "calculator.limit_minimum";
    pub const HELP_CALCULATOR: &str = "help.calculator";

    pub const TARGET_CAPACITY: &str = "target.capacity";
    pub const TARGET_SUBSIDY: &str = "target.subsidy";
    pub const TARGET_INVESTMENT: &str = "target.investment";
    pub const TARGET_PAYBACK: &str = "target.payback";
    pub const TARGET_TOTAL_COST: &str = "target.total_cost";
    pub const TARGET_MONTHLY_GENERATION: &str = "target.monthly_generation";
    pub const TARGET_MONTHLY_SAVINGS: &str = "target.monthly_savings";
    pub const TARGET_YEARLY_SAVINGS: &str = "target.yearly_savings";

    pub const FAQ_HEADING: &str = "faq.heading";
    pub const FAQ_CATEGORY_PROMPT: &str = "faq.category_prompt";
    pub const FAQ_TOGGLE_PROMPT: &str = "faq.toggle_prompt";
    pub const FAQ_CATEGORY_GENERAL: &str = "faq.category_general";
    pub const FAQ_CATEGORY_SUBSIDY: &str = "faq.category_subsidy";
    pub const FAQ_CATEGORY_TECHNICAL: &str = "faq.category_technical";
    pub const FAQ_CATEGORY_INSTALLATION: &str = "faq.category_installation";
    pub const FAQ_CATEGORY_ALL: &str = "faq.category_all";
    pub const FAQ_LOAD_ERROR: &str = "faq.load_error";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_GROUPING_OPTIONS: &str = "settings.grouping_options";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_APP_TITLE: &str = "gui.app_title";
    pub const GUI_NAV_HEADING: &str = "gui.nav_heading";
    pub const GUI_TAB_CALCULATOR: &str = "gui.tab_calculator";
    pub const GUI_TAB_FAQ: &str = "gui.tab_faq";
    pub const GUI_BILL_LABEL: &str = "gui.bill_label";
    pub const GUI_AREA_LABEL: &str = "gui.area_label";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_LANGUAGE: &str = "gui.language";
    pub const GUI_LANGUAGE_AUTO: &str = "gui.language_auto";
    pub const GUI_GROUPING: &str = "gui.grouping";
    pub const GUI_BREAKDOWN: &str = "gui.breakdown";
    pub const GUI_ALPHA: &str = "gui.alpha";
    pub const GUI_SAVE: &str = "gui.save";
    pub const GUI_LOAD_FAQ: &str = "gui.load_faq";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Hi,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("hi") {
            Language::Hi
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en-in",
            Language::Hi => "hi-in",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드에 따라 내장 문자열만으로 번역기를 생성한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: built_in_pack(lang_code),
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        if overrides.is_none() && Language::from_code(lang_code) != Language::En {
            warn!(lang = lang_code, "no language pack found, using English");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 영어 → 키 자체 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key)
            .or_else(|| en(key).map(str::to_string))
            .unwrap_or_else(|| key.to_string())
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-in".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("hi") => Some("hi-in".into()),
        other if other.starts_with("en") => Some("en-in".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "hi" => Some("hi-in".into()),
        "en" => Some("en-in".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫/중첩 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        debug!(path = %path.display(), "language pack found");
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., hi-in)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., hi)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match Language::from_code(lang) {
        Language::Hi => parse_toml_to_map(include_str!("../locales/hi-in.toml")),
        Language::En => None,
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        UNAVAILABLE => "Unavailable",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        MAIN_MENU_TITLE => "\n=== Rooftop Solar Sizer ===",
        MAIN_MENU_CALCULATOR => "1) Solar savings calculator",
        MAIN_MENU_FAQ => "2) Frequently asked questions",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        CALC_HEADING => "\n-- Solar Savings Calculator --",
        CALC_PROMPT_BILL => "Monthly electricity bill [₹]",
        CALC_PROMPT_AREA => "Available roof area",
        CALC_AREA_UNIT_OPTIONS => "Area unit: 1=sq ft 2=m² (enter = configured unit)",
        CALC_CLAMPED => "Value adjusted to slider range/step:",
        CALC_RESULT_HEADING => "\n-- Recommended system --",
        CALC_LIMITING => "Sized by:",
        LIMIT_CONSUMPTION => "your electricity consumption",
        LIMIT_ROOF => "available roof area",
        LIMIT_MINIMUM => "minimum system size (1 kW)",
        HELP_CALCULATOR => "Help: capacity = min(round(bill / tariff / generation per kW), floor(area / area per kW)), at least 1 kW.",
        TARGET_CAPACITY => "Recommended capacity",
        TARGET_SUBSIDY => "Government subsidy",
        TARGET_INVESTMENT => "Your investment",
        TARGET_PAYBACK => "Payback period (years)",
        TARGET_TOTAL_COST => "Total system cost",
        TARGET_MONTHLY_GENERATION => "Monthly generation",
        TARGET_MONTHLY_SAVINGS => "Monthly savings",
        TARGET_YEARLY_SAVINGS => "Yearly savings",
        FAQ_HEADING => "\n-- Frequently Asked Questions --",
        FAQ_CATEGORY_PROMPT => "Category (1=General 2=Subsidy 3=Technical 4=Installation 5=All, enter = back): ",
        FAQ_TOGGLE_PROMPT => "Question number to open/close (enter = back): ",
        FAQ_CATEGORY_GENERAL => "General",
        FAQ_CATEGORY_SUBSIDY => "Subsidy",
        FAQ_CATEGORY_TECHNICAL => "Technical",
        FAQ_CATEGORY_INSTALLATION => "Installation",
        FAQ_CATEGORY_ALL => "All",
        FAQ_LOAD_ERROR => "Could not load FAQ file:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current settings:",
        SETTINGS_OPTIONS => "1) Language  2) Number grouping  3) Toggle cost breakdown",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto / en / hi): ",
        SETTINGS_GROUPING_OPTIONS => "1) 1,234,567  2) 12,34,567",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        GUI_APP_TITLE => "Rooftop Solar Sizer",
        GUI_NAV_HEADING => "Menu",
        GUI_TAB_CALCULATOR => "Calculator",
        GUI_TAB_FAQ => "FAQ",
        GUI_BILL_LABEL => "Monthly electricity bill",
        GUI_AREA_LABEL => "Available roof area",
        GUI_SETTINGS => "Settings",
        GUI_LANGUAGE => "Language",
        GUI_LANGUAGE_AUTO => "System",
        GUI_GROUPING => "Number grouping",
        GUI_BREAKDOWN => "Show cost breakdown",
        GUI_ALPHA => "Window transparency",
        GUI_SAVE => "Save settings",
        GUI_LOAD_FAQ => "Load FAQ file…",
        _ => return None,
    })
}
