//! 肌タイプ別おすすめ
//!
//! タグ集合・密封成分の有無・注意成分の有無から、
//! 優先順位付きの判定表で1文を選ぶ（最初に一致した行が採用）。

use crate::dictionary::KeywordDictionary;
use crate::tagger::contains_any;
use crate::types::CategoryTag;

pub const COMBINATION_OILY_LEANING: &str =
    "수분 공급과 피지 조절을 함께 노린 조합이에요. 복합성·지성 피부에 잘 맞아요.";
pub const DRY_WEAK_BARRIER: &str =
    "보습 성분과 유분막을 만드는 성분이 함께 있어 건성·장벽이 약한 피부에 적합해요.";
pub const OILY_COMBINATION: &str =
    "무거운 유분 없이 피지 관리에 초점을 둔 제품이에요. 지성·복합성 피부에 추천해요.";
pub const ACNE_PRONE: &str =
    "트러블 케어 성분이 들어 있어 여드름성 피부에 도움이 될 수 있어요. 자극이 없는지 먼저 확인하세요.";
pub const SENSITIVE_CAUTION: &str =
    "주의 성분이 포함되어 있어요. 민감성 피부라면 팔 안쪽에 패치 테스트 후 사용하세요.";
pub const NEUTRAL: &str =
    "특별히 두드러지는 기능 성분은 없어요. 대부분의 피부 타입에 무난하게 사용할 수 있어요.";

/// 組み込み辞書の密封マーカーでおすすめを選ぶ
pub fn recommend(tags: &[CategoryTag], ingredients: &[String], warnings: &[String]) -> &'static str {
    recommend_with(tags, ingredients, warnings, KeywordDictionary::builtin())
}

/// 指定辞書の密封マーカーでおすすめを選ぶ
pub fn recommend_with(
    tags: &[CategoryTag],
    ingredients: &[String],
    warnings: &[String],
    dictionary: &KeywordDictionary,
) -> &'static str {
    let hydration = tags.contains(&CategoryTag::Hydration);
    let sebum = tags.contains(&CategoryTag::PoreSebum);
    let acne = tags.contains(&CategoryTag::Acne);
    let occlusive = has_occlusive(ingredients, dictionary);

    if hydration && !occlusive && sebum {
        COMBINATION_OILY_LEANING
    } else if hydration && occlusive {
        DRY_WEAK_BARRIER
    } else if sebum && !occlusive {
        OILY_COMBINATION
    } else if acne {
        ACNE_PRONE
    } else if !warnings.is_empty() {
        SENSITIVE_CAUTION
    } else {
        NEUTRAL
    }
}

/// 重い密封成分（シア・バター・ココナッツ等）を含むか
pub fn has_occlusive(ingredients: &[String], dictionary: &KeywordDictionary) -> bool {
    contains_any(ingredients, &dictionary.occlusive_markers)
}
