//! Story Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::StoryError;

/// 故事类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Fantasy,
    NatureAdventure,
    FairyTale,
    AnimalStory,
}

impl Genre {
    pub const ALL: [Genre; 4] = [
        Genre::Fantasy,
        Genre::NatureAdventure,
        Genre::FairyTale,
        Genre::AnimalStory,
    ];

    /// Prompt 中使用的展示名称
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fantasy => "Fantasy",
            Self::NatureAdventure => "Nature Adventure",
            Self::FairyTale => "Fairy Tale",
            Self::AnimalStory => "Animal Story",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Genre {
    type Err = StoryError;

    /// 同时接受 `nature_adventure` 和展示名称 `Nature Adventure`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "fantasy" => Ok(Self::Fantasy),
            "nature_adventure" => Ok(Self::NatureAdventure),
            "fairy_tale" => Ok(Self::FairyTale),
            "animal_story" => Ok(Self::AnimalStory),
            _ => Err(StoryError::UnknownGenre(s.to_string())),
        }
    }
}

/// 听众年龄段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    /// 1-3 岁
    Toddler,
    /// 4-8 岁
    Child,
}

impl AgeGroup {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toddler => "Toddlers (1-3 years)",
            Self::Child => "Children (4-8 years)",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AgeGroup {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "toddler" | "toddlers" | "toddlers_(1_3_years)" => Ok(Self::Toddler),
            "child" | "children" | "children_(4_8_years)" => Ok(Self::Child),
            _ => Err(StoryError::UnknownAgeGroup(s.to_string())),
        }
    }
}

fn normalize_key(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// 主角描述
///
/// 不变量: 去除首尾空白后非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characters(String);

impl Characters {
    pub fn new(characters: impl Into<String>) -> Result<Self, StoryError> {
        let characters = characters.into();
        let trimmed = characters.trim();
        if trimmed.is_empty() {
            return Err(StoryError::EmptyCharacters);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 一次生成动作的全部输入参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest {
    pub characters: Characters,
    pub genre: Genre,
    pub age_group: AgeGroup,
    pub tips: Option<String>,
}

impl StoryRequest {
    pub fn new(
        characters: impl Into<String>,
        genre: Genre,
        age_group: AgeGroup,
        tips: Option<String>,
    ) -> Result<Self, StoryError> {
        Ok(Self {
            characters: Characters::new(characters)?,
            genre,
            age_group,
            tips,
        })
    }

    /// 非空白的附加提示，原文返回
    pub fn effective_tips(&self) -> Option<&str> {
        self.tips
            .as_deref()
            .filter(|tips| !tips.trim().is_empty())
    }
}

/// 发送给文本生成服务的 Prompt，构造后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryPrompt(String);

impl StoryPrompt {
    pub(super) fn new(prompt: String) -> Self {
        Self(prompt)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoryPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 生成服务返回的故事正文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryText(String);

impl StoryText {
    pub fn new(text: impl Into<String>) -> Result<Self, StoryError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(StoryError::EmptyStory);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for StoryText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 调用方提供的 API Key
///
/// 每次请求随 query 参数发送，不落盘、不写日志。`Debug` 输出已脱敏。
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, StoryError> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(StoryError::MissingApiKey);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
