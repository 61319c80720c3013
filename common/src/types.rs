//! 解析結果の型定義
//!
//! - CategoryTag: 機能カテゴリ（宣言順が出力順）
//! - TagReport: タグ付け結果（タグ・根拠・注意成分）
//! - ConfidenceVerdict: 認識信頼度
//! - AnalysisResult: 1回の解析の最終出力

use serde::{Deserialize, Serialize};

/// 機能カテゴリ
///
/// 宣言順がそのままタグ・根拠の出力順になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryTag {
    Whitening,
    WrinkleCare,
    Acne,
    Hydration,
    Barrier,
    PoreSebum,
}

impl CategoryTag {
    pub const ALL: [CategoryTag; 6] = [
        CategoryTag::Whitening,
        CategoryTag::WrinkleCare,
        CategoryTag::Acne,
        CategoryTag::Hydration,
        CategoryTag::Barrier,
        CategoryTag::PoreSebum,
    ];

    /// 表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            CategoryTag::Whitening => "미백",
            CategoryTag::WrinkleCare => "주름개선",
            CategoryTag::Acne => "트러블케어",
            CategoryTag::Hydration => "보습",
            CategoryTag::Barrier => "장벽강화",
            CategoryTag::PoreSebum => "피지·모공",
        }
    }
}

impl std::fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// タグごとの根拠キーワード（初回一致順）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagEvidence {
    pub tag: CategoryTag,
    pub keywords: Vec<String>,
}

/// タグ付け結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagReport {
    pub tags: Vec<CategoryTag>,
    pub evidence: Vec<TagEvidence>,
    pub warnings: Vec<String>,
}

impl TagReport {
    /// 指定タグの根拠を取得
    pub fn evidence_for(&self, tag: CategoryTag) -> Option<&[String]> {
        self.evidence
            .iter()
            .find(|e| e.tag == tag)
            .map(|e| e.keywords.as_slice())
    }
}

/// 信頼度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Mid,
    Low,
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "high"),
            ConfidenceLevel::Mid => write!(f, "mid"),
            ConfidenceLevel::Low => write!(f, "low"),
        }
    }
}

/// 認識信頼度の判定結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceVerdict {
    pub level: ConfidenceLevel,
    pub score: u8,
    pub message: String,
    /// 撮り直しのヒント（lowのみ）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

/// 解析ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    #[default]
    Done,
    /// OCRは成功したが成分を取り出せなかった
    NoText,
    /// OCR呼び出し自体が失敗した
    OcrFailed,
}

/// 解析結果
///
/// 1回の解析ごとに丸ごと作り直される。前回の結果は参照しない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 画像ファイル名（テキスト入力時は空）
    #[serde(default)]
    pub file_name: String,

    pub status: AnalysisStatus,

    /// ユーザー向けメッセージ
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub ingredients: Vec<String>,

    #[serde(default)]
    pub tags: Vec<CategoryTag>,

    #[serde(default)]
    pub evidence: Vec<TagEvidence>,

    #[serde(default)]
    pub warnings: Vec<String>,

    /// OCR失敗時はNone
    #[serde(default)]
    pub confidence: Option<ConfidenceVerdict>,

    /// OCR失敗時はNone
    #[serde(default)]
    pub recommendation: Option<String>,

    /// 成分が取れなかった時の表示用に残すOCR生テキスト
    #[serde(default)]
    pub raw_text: String,
}

impl AnalysisResult {
    pub fn is_failed(&self) -> bool {
        self.status == AnalysisStatus::OcrFailed
    }

    /// ファイル名を付与
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_matches_declaration() {
        assert_eq!(CategoryTag::ALL[0], CategoryTag::Whitening);
        assert_eq!(CategoryTag::ALL[5], CategoryTag::PoreSebum);
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&CategoryTag::WrinkleCare).unwrap();
        assert_eq!(json, "\"wrinkle_care\"");
        let tag: CategoryTag = serde_json::from_str("\"pore_sebum\"").unwrap();
        assert_eq!(tag, CategoryTag::PoreSebum);
    }

    #[test]
    fn test_analysis_result_camel_case() {
        let result = AnalysisResult {
            file_name: "front.jpg".to_string(),
            raw_text: "정제수".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"fileName\":\"front.jpg\""));
        assert!(json.contains("\"rawText\""));
        assert!(json.contains("\"status\":\"done\""));
    }

    #[test]
    fn test_evidence_for() {
        let report = TagReport {
            tags: vec![CategoryTag::Hydration],
            evidence: vec![TagEvidence {
                tag: CategoryTag::Hydration,
                keywords: vec!["글리세린".to_string()],
            }],
            warnings: vec![],
        };
        assert_eq!(
            report.evidence_for(CategoryTag::Hydration),
            Some(&["글리세린".to_string()][..])
        );
        assert!(report.evidence_for(CategoryTag::Acne).is_none());
    }
}
