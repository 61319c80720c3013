//! 認識信頼度の推定
//!
//! 成分数・タグ数・生テキスト長からスコアを積み上げて3段階に分ける。

use crate::types::{CategoryTag, ConfidenceLevel, ConfidenceVerdict};

pub const HIGH_MESSAGE: &str = "성분표가 선명하게 인식되었습니다.";
pub const MID_MESSAGE: &str = "일부 성분이 누락되었을 수 있습니다. 결과는 참고용으로 확인하세요.";
pub const LOW_MESSAGE: &str = "인식된 성분이 적습니다. 사진을 다시 찍어 보세요.";

/// lowのみ付与する撮り直しヒント（照明・構図）
pub const LOW_HINTS: [&str; 2] = [
    "밝은 곳에서 그림자나 반사 없이 촬영하세요.",
    "성분표 영역만 화면에 가득 차도록 가까이 찍어 주세요.",
];

/// 信頼度スコアを計算
pub fn score(ingredient_count: usize, tag_count: usize, raw_text_len: usize) -> u8 {
    let mut score = 0;

    if ingredient_count >= 15 {
        score += 2;
    } else if ingredient_count >= 8 {
        score += 1;
    }

    if tag_count >= 2 {
        score += 1;
    }

    if raw_text_len >= 120 {
        score += 1;
    }

    score
}

/// 信頼度を判定
///
/// 生テキスト長は文字数で数える（バイト数ではない）。
pub fn estimate(ingredients: &[String], tags: &[CategoryTag], raw_text: &str) -> ConfidenceVerdict {
    let score = score(ingredients.len(), tags.len(), raw_text.chars().count());

    let (level, message, hints) = if score >= 4 {
        (ConfidenceLevel::High, HIGH_MESSAGE, Vec::new())
    } else if score >= 2 {
        (ConfidenceLevel::Mid, MID_MESSAGE, Vec::new())
    } else {
        (
            ConfidenceLevel::Low,
            LOW_MESSAGE,
            LOW_HINTS.iter().map(|h| h.to_string()).collect(),
        )
    };

    ConfidenceVerdict {
        level,
        score,
        message: message.to_string(),
        hints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("성분{}", i)).collect()
    }

    #[test]
    fn test_score_thresholds() {
        assert_eq!(score(0, 0, 0), 0);
        assert_eq!(score(7, 0, 0), 0);
        assert_eq!(score(8, 0, 0), 1);
        assert_eq!(score(14, 0, 0), 1);
        assert_eq!(score(15, 0, 0), 2);
        assert_eq!(score(0, 1, 0), 0);
        assert_eq!(score(0, 2, 0), 1);
        assert_eq!(score(0, 0, 119), 0);
        assert_eq!(score(0, 0, 120), 1);
        assert_eq!(score(15, 2, 120), 4);
    }

    #[test]
    fn test_estimate_high() {
        let tags = [CategoryTag::Hydration, CategoryTag::Barrier];
        let verdict = estimate(&names(15), &tags, &"가".repeat(120));
        assert_eq!(verdict.level, ConfidenceLevel::High);
        assert_eq!(verdict.message, HIGH_MESSAGE);
        assert!(verdict.hints.is_empty());
    }

    #[test]
    fn test_estimate_mid() {
        let verdict = estimate(&names(8), &[CategoryTag::Acne, CategoryTag::Barrier], "");
        assert_eq!(verdict.level, ConfidenceLevel::Mid);
        assert_eq!(verdict.score, 2);
        assert!(verdict.hints.is_empty());
    }

    #[test]
    fn test_estimate_low_has_two_hints() {
        let verdict = estimate(&[], &[], "");
        assert_eq!(verdict.level, ConfidenceLevel::Low);
        assert_eq!(verdict.message, LOW_MESSAGE);
        assert_eq!(verdict.hints.len(), 2);
    }

    #[test]
    fn test_raw_text_counted_in_chars() {
        // ハングル40文字 = 120バイトだが文字数は40
        let verdict = estimate(&[], &[], &"가".repeat(40));
        assert_eq!(verdict.score, 0);
    }

    #[test]
    fn test_estimate_deterministic() {
        let ingredients = names(9);
        let tags = [CategoryTag::Whitening];
        let raw = "정제수, 글리세린".repeat(10);
        assert_eq!(estimate(&ingredients, &tags, &raw), estimate(&ingredients, &tags, &raw));
    }
}
