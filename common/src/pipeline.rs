//! 解析パイプライン
//!
//! OCR生テキスト → 正規化 → 成分抽出 → タグ付け → {信頼度, おすすめ}
//! を1回の呼び出しで通し、不変の `AnalysisResult` を返す。
//! 各段は前段の出力だけに依存する純関数。

use crate::confidence;
use crate::dictionary::KeywordDictionary;
use crate::extractor;
use crate::normalizer;
use crate::recommender;
use crate::tagger;
use crate::types::{AnalysisResult, AnalysisStatus};

pub const DONE_MESSAGE: &str = "분석 완료";
pub const NO_TEXT_MESSAGE: &str = "텍스트를 인식하지 못했습니다. 성분표가 잘 보이도록 다시 촬영해 주세요.";
pub const OCR_FAILED_MESSAGE: &str = "OCR 처리 중 오류가 발생했습니다. 다시 시도해 주세요.";

/// 組み込み辞書で解析
pub fn analyze(raw_text: &str) -> AnalysisResult {
    analyze_with(raw_text, KeywordDictionary::builtin())
}

/// 指定辞書で解析
///
/// 空テキストはエラーではなく `NoText` として通常どおり最後まで流す。
pub fn analyze_with(raw_text: &str, dictionary: &KeywordDictionary) -> AnalysisResult {
    let normalized = normalizer::normalize(raw_text);
    let ingredients = extractor::extract_with_hints(&normalized, &dictionary.split_hints);
    let report = tagger::tag_with(&ingredients, dictionary);

    let verdict = confidence::estimate(&ingredients, &report.tags, raw_text);
    let recommendation =
        recommender::recommend_with(&report.tags, &ingredients, &report.warnings, dictionary);

    let (status, message) = if ingredients.is_empty() {
        (AnalysisStatus::NoText, NO_TEXT_MESSAGE)
    } else {
        (AnalysisStatus::Done, DONE_MESSAGE)
    };

    AnalysisResult {
        file_name: String::new(),
        status,
        message: message.to_string(),
        ingredients,
        tags: report.tags,
        evidence: report.evidence,
        warnings: report.warnings,
        confidence: Some(verdict),
        recommendation: Some(recommendation.to_string()),
        raw_text: raw_text.to_string(),
    }
}

/// OCR呼び出しの結果を受けて解析
///
/// OCRが失敗した場合は全項目を空に戻し、固定の失敗メッセージを返す。
/// 再試行はしない。
pub fn analyze_ocr_output<E>(
    ocr_output: std::result::Result<String, E>,
    dictionary: &KeywordDictionary,
) -> AnalysisResult {
    match ocr_output {
        Ok(text) => analyze_with(&text, dictionary),
        Err(_) => AnalysisResult::ocr_failed(),
    }
}

impl AnalysisResult {
    /// OCR失敗時の結果（信頼度・おすすめはNone）
    pub fn ocr_failed() -> Self {
        Self {
            status: AnalysisStatus::OcrFailed,
            message: OCR_FAILED_MESSAGE.to_string(),
            confidence: None,
            recommendation: None,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::is_valid_ingredient_token;
    use crate::types::{CategoryTag, ConfidenceLevel};

    #[test]
    fn test_basic_list_end_to_end() {
        let raw = "정제수, 글리세린, 나이아신아마이드(2%)";
        assert_eq!(normalizer::normalize(raw), raw);

        let result = analyze(raw);
        assert_eq!(result.status, AnalysisStatus::Done);
        assert_eq!(result.ingredients, vec!["정제수", "글리세린", "나이아신아마이드"]);
        assert!(result.tags.contains(&CategoryTag::Whitening));

        let whitening = result
            .evidence
            .iter()
            .find(|e| e.tag == CategoryTag::Whitening)
            .expect("미백 근거가 없음");
        assert!(whitening.keywords.iter().any(|k| k == "나이아신아마이드" || k == "NIACINAMIDE"));
        assert_eq!(result.raw_text, raw);
    }

    #[test]
    fn test_empty_text_is_not_an_error() {
        let result = analyze("");
        assert_eq!(result.status, AnalysisStatus::NoText);
        assert_eq!(result.message, NO_TEXT_MESSAGE);
        assert!(result.ingredients.is_empty());
        assert!(result.tags.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.confidence.as_ref().map(|c| c.level), Some(ConfidenceLevel::Low));
        assert_eq!(result.recommendation.as_deref(), Some(recommender::NEUTRAL));
    }

    #[test]
    fn test_three_letter_noise_rejected() {
        let result = analyze("IZE");
        assert!(result.ingredients.is_empty());
        assert!(!is_valid_ingredient_token("IZE"));
    }

    #[test]
    fn test_fragrance_warning_reported_once() {
        let result = analyze("정제수, FRAGRANCE, Fragrance, 천연향료");
        let count = result
            .warnings
            .iter()
            .filter(|w| w.as_str() == "향료/알레르기 유발 가능 성분")
            .count();
        assert_eq!(count, 1);
        assert_eq!(result.recommendation.as_deref(), Some(recommender::SENSITIVE_CAUTION));
    }

    #[test]
    fn test_ocr_failure_resets_everything() {
        let result = analyze_ocr_output(
            Err::<String, _>("tesseract: command not found"),
            KeywordDictionary::builtin(),
        );
        assert_eq!(result.status, AnalysisStatus::OcrFailed);
        assert!(result.is_failed());
        assert_eq!(result.message, OCR_FAILED_MESSAGE);
        assert!(result.ingredients.is_empty());
        assert!(result.tags.is_empty());
        assert!(result.evidence.is_empty());
        assert!(result.warnings.is_empty());
        assert!(result.confidence.is_none());
        assert!(result.recommendation.is_none());
        assert!(result.raw_text.is_empty());
    }

    #[test]
    fn test_ocr_success_passes_text_through() {
        let result = analyze_ocr_output(
            Ok::<_, std::io::Error>("정제수, 카올린, 글리세린".to_string()),
            KeywordDictionary::builtin(),
        );
        assert_eq!(result.status, AnalysisStatus::Done);
        assert_eq!(result.recommendation.as_deref(), Some(recommender::COMBINATION_OILY_LEANING));
    }

    #[test]
    fn test_full_label_reaches_high_confidence() {
        let raw = "정제수, 부틸렌글라이콜, 글리세린, 나이아신아마이드, 세라마이드엔피, \
                   소듐하이알루로네이트, 판테놀, 알란토인, 아데노신, 마데카소사이드, \
                   병풀추출물, 카보머, 트로메타민, 다이메티콘, 스쿠알란, 베타인, \
                   토코페롤, 잔탄검, 에틸헥실글리세린, 시어버터";
        let result = analyze(raw);
        assert!(result.ingredients.len() >= 15, "{:?}", result.ingredients);
        assert_eq!(result.confidence.as_ref().map(|c| c.level), Some(ConfidenceLevel::High));
        assert_eq!(result.recommendation.as_deref(), Some(recommender::DRY_WEAK_BARRIER));
    }

    #[test]
    fn test_with_file_name() {
        let result = analyze("글리세린").with_file_name("back.jpg");
        assert_eq!(result.file_name, "back.jpg");
    }
}
