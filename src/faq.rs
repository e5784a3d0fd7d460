//! 자주 묻는 질문 목록. 분류 탭 필터와 한 번에 하나만 펼쳐지는 아코디언 상태를 다룬다.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::i18n::keys;

const BUILT_IN_FAQ: &str = include_str!("../faqs/default.toml");

/// FAQ 분류(탭).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaqCategory {
    General,
    Subsidy,
    Technical,
    Installation,
}

impl FaqCategory {
    pub const ALL: [FaqCategory; 4] = [
        FaqCategory::General,
        FaqCategory::Subsidy,
        FaqCategory::Technical,
        FaqCategory::Installation,
    ];

    pub fn label_key(&self) -> &'static str {
        match self {
            FaqCategory::General => keys::FAQ_CATEGORY_GENERAL,
            FaqCategory::Subsidy => keys::FAQ_CATEGORY_SUBSIDY,
            FaqCategory::Technical => keys::FAQ_CATEGORY_TECHNICAL,
            FaqCategory::Installation => keys::FAQ_CATEGORY_INSTALLATION,
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub category: FaqCategory,
    pub question: String,
    pub answer: String,
    /// 비활성 항목은 표시하지 않는다
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Deserialize)]
struct FaqFile {
    #[serde(default)]
    faq: Vec<FaqEntry>,
}

/// FAQ 파일 로드 오류.
#[derive(Debug)]
pub enum FaqError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// 표시할 활성 항목이 없음
    Empty,
}

impl std::fmt::Display for FaqError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaqError::Io(e) => write!(f, "FAQ file I/O error: {e}"),
            FaqError::Parse(e) => write!(f, "FAQ file parse error: {e}"),
            FaqError::Empty => write!(f, "FAQ file has no active entries"),
        }
    }
}

impl std::error::Error for FaqError {}

impl From<std::io::Error> for FaqError {
    fn from(value: std::io::Error) -> Self {
        FaqError::Io(value)
    }
}

impl From<toml::de::Error> for FaqError {
    fn from(value: toml::de::Error) -> Self {
        FaqError::Parse(value)
    }
}

/// `[[faq]]` 배열 형식의 TOML을 읽는다.
pub fn parse(src: &str) -> Result<Vec<FaqEntry>, FaqError> {
    let file: FaqFile = toml::from_str(src)?;
    if !file.faq.iter().any(|e| e.active) {
        return Err(FaqError::Empty);
    }
    Ok(file.faq)
}

/// 빌드 시 포함된 기본 FAQ.
pub fn built_in() -> Result<Vec<FaqEntry>, FaqError> {
    parse(BUILT_IN_FAQ)
}

pub fn load_from_file(path: &Path) -> Result<Vec<FaqEntry>, FaqError> {
    let content = fs::read_to_string(path)?;
    let entries = parse(&content)?;
    info!(path = %path.display(), count = entries.len(), "FAQ file loaded");
    Ok(entries)
}

/// 설정된 경로가 있으면 그 파일을, 없으면 내장 FAQ를 읽는다.
pub fn load(path: Option<&str>) -> Result<Vec<FaqEntry>, FaqError> {
    match path {
        Some(p) => load_from_file(Path::new(p)),
        None => built_in(),
    }
}

/// FAQ 화면 상태: 선택된 분류 탭과 펼쳐진 항목(최대 1개).
#[derive(Debug, Clone)]
pub struct FaqBoard {
    entries: Vec<FaqEntry>,
    filter: Option<FaqCategory>,
    expanded: Option<usize>,
}

impl FaqBoard {
    /// 비활성 항목은 버린다. 처음에는 모든 분류를 보여주고 아무 항목도 펼치지 않는다.
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self {
            entries: entries.into_iter().filter(|e| e.active).collect(),
            filter: None,
            expanded: None,
        }
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn selected_category(&self) -> Option<FaqCategory> {
        self.filter
    }

    /// 해당 분류만 보이게 한다. 펼쳐진 항목이 가려지면 접는다.
    pub fn filter(&mut self, category: FaqCategory) {
        self.filter = Some(category);
        if let Some(i) = self.expanded {
            if !self.is_visible(i) {
                self.expanded = None;
            }
        }
    }

    /// 필터와 탭 선택을 해제한다.
    pub fn show_all(&mut self) {
        self.filter = None;
    }

    pub fn is_visible(&self, index: usize) -> bool {
        match (self.entries.get(index), self.filter) {
            (Some(entry), Some(category)) => entry.category == category,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// 보이는 항목을 원래 인덱스와 함께 돌려준다.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &FaqEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(i, _)| self.is_visible(*i))
    }

    /// 항목을 펼치거나 접는다. 펼치면 다른 항목은 모두 접힌다.
    /// 반환값은 호출 후 해당 항목이 펼쳐져 있는지 여부.
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.is_visible(index) {
            return false;
        }
        if self.expanded == Some(index) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(index);
            true
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded == Some(index)
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }
}
