//! 解析結果の出力
//!
//! - テキスト: 端末表示用
//! - JSON: 生成日時付きのエンベロープ

use crate::error::Result;
use chrono::{DateTime, Local};
use inci_scout_common::{AnalysisResult, AnalysisStatus};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// 出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use text or json", s)),
        }
    }
}

/// JSON出力のエンベロープ
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Local>,
    pub results: Vec<AnalysisResult>,
}

impl Report {
    pub fn new(results: Vec<AnalysisResult>) -> Self {
        Self {
            generated_at: Local::now(),
            results,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// 1件分をテキストにする
pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();

    if !result.file_name.is_empty() {
        let _ = writeln!(out, "■ {}", result.file_name);
    }

    let mark = match result.status {
        AnalysisStatus::Done => "✅",
        AnalysisStatus::NoText => "⚠",
        AnalysisStatus::OcrFailed => "❌",
    };
    let _ = writeln!(out, "{} {}", mark, result.message);

    if result.is_failed() {
        return out;
    }

    if !result.ingredients.is_empty() {
        let _ = writeln!(out, "\n[성분 {}개]", result.ingredients.len());
        let _ = writeln!(out, "  {}", result.ingredients.join(", "));
    }

    if !result.evidence.is_empty() {
        let _ = writeln!(out, "\n[기능 태그]");
        for evidence in &result.evidence {
            let _ = writeln!(out, "  #{} ← {}", evidence.tag, evidence.keywords.join(", "));
        }
    }

    if !result.warnings.is_empty() {
        let _ = writeln!(out, "\n[주의 성분]");
        for warning in &result.warnings {
            let _ = writeln!(out, "  ! {}", warning);
        }
    }

    if let Some(confidence) = &result.confidence {
        let _ = writeln!(
            out,
            "\n[인식 신뢰도: {} ({}점)] {}",
            confidence.level, confidence.score, confidence.message
        );
        for hint in &confidence.hints {
            let _ = writeln!(out, "  - {}", hint);
        }
    }

    if let Some(recommendation) = &result.recommendation {
        let _ = writeln!(out, "\n[추천] {}", recommendation);
    }

    // 成分が取れなかった時は生テキストを見せる
    if result.ingredients.is_empty() && !result.raw_text.trim().is_empty() {
        let _ = writeln!(out, "\n[인식된 원문]\n{}", result.raw_text.trim());
    }

    out
}
