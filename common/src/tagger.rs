//! カテゴリタグ付け
//!
//! 成分名にキーワードが部分一致（大文字化して比較、単語境界なし）すれば
//! そのカテゴリを付与し、一致したキーワードを根拠として残す。
//! 成分名は複合語が多く、OCRの区切りも不安定なため部分一致で拾う。

use crate::dictionary::{CautionRule, KeywordDictionary};
use crate::types::{CategoryTag, TagEvidence, TagReport};

/// 組み込み辞書でタグ付けする
pub fn tag(ingredients: &[String]) -> TagReport {
    tag_with(ingredients, KeywordDictionary::builtin())
}

/// 指定辞書でタグ付けする
pub fn tag_with(ingredients: &[String], dictionary: &KeywordDictionary) -> TagReport {
    let upper: Vec<String> = ingredients.iter().map(|i| i.to_uppercase()).collect();

    let mut tags: Vec<CategoryTag> = Vec::new();
    let mut evidence: Vec<TagEvidence> = Vec::new();

    // 辞書ファイルの記述順ではなくタグの宣言順
    for category in CategoryTag::ALL {
        let keywords = dictionary.keywords_for(category);
        let mut matched: Vec<String> = Vec::new();

        for ingredient in &upper {
            for keyword in keywords {
                if ingredient.contains(&keyword.to_uppercase()) && !matched.contains(keyword) {
                    matched.push(keyword.clone());
                }
            }
        }

        if !matched.is_empty() {
            tags.push(category);
            evidence.push(TagEvidence {
                tag: category,
                keywords: matched,
            });
        }
    }

    let warnings = collect_warnings(&upper, &dictionary.cautions);

    TagReport {
        tags,
        evidence,
        warnings,
    }
}

/// 注意成分ルールを宣言順に評価（ラベルは1回まで）
fn collect_warnings(upper_ingredients: &[String], rules: &[CautionRule]) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();

    for rule in rules {
        let fired = rule.keywords.iter().any(|keyword| {
            let keyword = keyword.to_uppercase();
            upper_ingredients.iter().any(|i| i.contains(&keyword))
        });

        if fired && !warnings.contains(&rule.label) {
            warnings.push(rule.label.clone());
        }
    }

    warnings
}

/// いずれかの成分がマーカーを含むか（大文字化して比較）
pub fn contains_any(ingredients: &[String], markers: &[String]) -> bool {
    ingredients.iter().any(|ingredient| {
        let ingredient = ingredient.to_uppercase();
        markers.iter().any(|m| ingredient.contains(&m.to_uppercase()))
    })
}
