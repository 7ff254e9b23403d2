use serde::{Deserialize, Serialize};

/// 学习笔记的侧重点
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[serde(rename = "Key Concepts & Definitions")]
    #[default]
    KeyConcepts,
    #[serde(rename = "Step-by-Step Instructions")]
    StepByStep,
    #[serde(rename = "Summary + Key Points")]
    SummaryKeyPoints,
}

impl Focus {
    /// 下拉框中的全部选项，按展示顺序排列
    pub fn all() -> [Focus; 3] {
        [Focus::KeyConcepts, Focus::StepByStep, Focus::SummaryKeyPoints]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Focus::KeyConcepts => "Key Concepts & Definitions",
            Focus::StepByStep => "Step-by-Step Instructions",
            Focus::SummaryKeyPoints => "Summary + Key Points",
        }
    }
}

impl std::fmt::Display for Focus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Focus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Focus::all()
            .into_iter()
            .find(|focus| focus.label() == s.trim())
            .ok_or_else(|| format!("Unknown focus preference: {}", s))
    }
}

/// 学习笔记的语气
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[serde(rename = "Formal & Academic")]
    #[default]
    FormalAcademic,
    #[serde(rename = "Friendly & Conversational")]
    FriendlyConversational,
    #[serde(rename = "Neutral & Balanced")]
    NeutralBalanced,
}

impl Tone {
    /// 下拉框中的全部选项，按展示顺序排列
    pub fn all() -> [Tone; 3] {
        [
            Tone::FormalAcademic,
            Tone::FriendlyConversational,
            Tone::NeutralBalanced,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::FormalAcademic => "Formal & Academic",
            Tone::FriendlyConversational => "Friendly & Conversational",
            Tone::NeutralBalanced => "Neutral & Balanced",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::all()
            .into_iter()
            .find(|tone| tone.label() == s.trim())
            .ok_or_else(|| format!("Unknown tone preference: {}", s))
    }
}

/// 用户在表单中填写的学习笔记偏好
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct StudySheetPreferences {
    /// 博客或教程链接
    pub blog_link: String,
    pub focus: Focus,
    pub tone: Tone,
}
