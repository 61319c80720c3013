//! キーワード辞書
//!
//! カテゴリ別キーワード・注意成分ルール・分割ヒント・密封成分マーカーを
//! 1つのデータ資産として持つ。組み込み辞書は初回参照時に1度だけ構築される。
//! JSONファイルで差し替え可能。

use crate::error::{Error, Result};
use crate::types::CategoryTag;
use serde::{Deserialize, Serialize};

/// カテゴリとそのキーワード（順序付き）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub tag: CategoryTag,
    pub keywords: Vec<String>,
}

/// 注意成分ルール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CautionRule {
    pub label: String,
    pub keywords: Vec<String>,
}

/// キーワード辞書
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDictionary {
    /// 宣言順がタグの出力順
    pub categories: Vec<CategoryKeywords>,
    /// 宣言順が注意成分の出力順
    pub cautions: Vec<CautionRule>,
    /// OCRで連結された成分名を切り分けるための既知の成分名
    #[serde(default)]
    pub split_hints: Vec<String>,
    /// 重い密封（オクルーシブ）成分の部分文字列
    #[serde(default)]
    pub occlusive_markers: Vec<String>,
}

lazy_static::lazy_static! {
    static ref BUILTIN: KeywordDictionary = KeywordDictionary::builtin_tables();
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl KeywordDictionary {
    /// 組み込み辞書
    pub fn builtin() -> &'static KeywordDictionary {
        &BUILTIN
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let dictionary: Self = serde_json::from_str(json)?;
        dictionary.validate()?;
        Ok(dictionary)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSONへ書き出し（カスタム辞書の雛形用）
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 辞書の整合性チェック
    ///
    /// 空キーワードは全成分に部分一致してしまうため拒否する。
    pub fn validate(&self) -> Result<()> {
        let mut seen = Vec::new();
        for category in &self.categories {
            if seen.contains(&category.tag) {
                return Err(Error::Dictionary(format!(
                    "카테고리가 중복되었습니다: {:?}",
                    category.tag
                )));
            }
            seen.push(category.tag);

            if category.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(Error::Dictionary(format!(
                    "빈 키워드가 있습니다: {:?}",
                    category.tag
                )));
            }
        }

        for rule in &self.cautions {
            if rule.label.trim().is_empty() {
                return Err(Error::Dictionary("주의 규칙의 라벨이 비어 있습니다".into()));
            }
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(Error::Dictionary(format!(
                    "빈 키워드가 있습니다: {}",
                    rule.label
                )));
            }
        }

        if self
            .split_hints
            .iter()
            .chain(self.occlusive_markers.iter())
            .any(|k| k.trim().is_empty())
        {
            return Err(Error::Dictionary("빈 분할 힌트/밀폐 성분 표지가 있습니다".into()));
        }

        Ok(())
    }

    /// 指定カテゴリのキーワード
    pub fn keywords_for(&self, tag: CategoryTag) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.tag == tag)
            .map(|c| c.keywords.as_slice())
            .unwrap_or(&[])
    }

    fn builtin_tables() -> Self {
        let categories = vec![
            CategoryKeywords {
                tag: CategoryTag::Whitening,
                keywords: words(&[
                    "나이아신아마이드", "NIACINAMIDE", "알부틴", "ARBUTIN",
                    "아스코빅애씨드", "ASCORBIC", "아스코빌", "ASCORBYL",
                    "트라넥삼산", "TRANEXAMIC", "글루타치온", "GLUTATHIONE",
                    "감초", "GLYCYRRHIZA",
                ]),
            },
            CategoryKeywords {
                tag: CategoryTag::WrinkleCare,
                keywords: words(&[
                    "아데노신", "ADENOSINE", "레티놀", "RETINOL", "레티날", "RETINAL",
                    "펩타이드", "PEPTIDE", "콜라겐", "COLLAGEN", "바쿠치올", "BAKUCHIOL",
                ]),
            },
            CategoryKeywords {
                tag: CategoryTag::Acne,
                keywords: words(&[
                    "살리실릭애씨드", "SALICYLIC", "티트리", "MELALEUCA",
                    "아젤라익", "AZELAIC", "설퍼", "SULFUR",
                    "마데카소사이드", "MADECASSOSIDE", "병풀", "CENTELLA",
                ]),
            },
            CategoryKeywords {
                tag: CategoryTag::Hydration,
                keywords: words(&[
                    "히알루론", "하이알루로", "HYALURON", "글리세린", "GLYCERIN",
                    "판테놀", "PANTHENOL", "베타인", "BETAINE", "트레할로스", "TREHALOSE",
                    "부틸렌글라이콜", "BUTYLENE", "알로에", "ALOE",
                ]),
            },
            CategoryKeywords {
                tag: CategoryTag::Barrier,
                keywords: words(&[
                    "세라마이드", "CERAMIDE", "콜레스테롤", "CHOLESTEROL",
                    "스쿠알란", "SQUALANE", "피토스핑고신", "PHYTOSPHINGOSINE",
                    "판테놀", "시어버터", "SHEA",
                ]),
            },
            CategoryKeywords {
                tag: CategoryTag::PoreSebum,
                keywords: words(&[
                    "카올린", "KAOLIN", "벤토나이트", "BENTONITE", "클레이", "CLAY",
                    "위치하젤", "HAMAMELIS", "녹차", "CAMELLIA", "징크", "ZINC",
                    "살리실릭애씨드", "숯", "CHARCOAL",
                ]),
            },
        ];

        let cautions = vec![
            CautionRule {
                label: "향료/알레르기 유발 가능 성분".into(),
                keywords: words(&[
                    "향료", "FRAGRANCE", "PARFUM", "리모넨", "LIMONENE", "리날룰", "LINALOOL",
                    "시트로넬올", "CITRONELLOL", "제라니올", "GERANIOL", "쿠마린", "COUMARIN",
                    "유제놀", "EUGENOL",
                ]),
            },
            CautionRule {
                label: "알코올(에탄올)".into(),
                keywords: words(&["에탄올", "ETHANOL", "변성알코올", "DENAT"]),
            },
            CautionRule {
                label: "에센셜오일/향 추출물".into(),
                keywords: words(&[
                    "라벤더", "LAVENDER", "LAVANDULA", "페퍼민트", "PEPPERMINT", "유칼립투스",
                    "EUCALYPTUS", "로즈마리", "ROSEMARY", "베르가모트", "BERGAMOT", "레몬껍질",
                    "에센셜오일",
                ]),
            },
        ];

        let split_hints = words(&[
            "정제수", "글리세린", "나이아신아마이드", "부틸렌글라이콜", "다이프로필렌글라이콜",
            "프로판다이올", "헥산다이올", "판테놀", "세라마이드엔피", "세라마이드", "히알루론산",
            "소듐하이알루로네이트", "알란토인", "아데노신", "마데카소사이드", "병풀추출물",
            "카보머", "트로메타민", "다이메티콘", "스쿠알란", "베타인", "알부틴",
            "에탄올", "시어버터", "토코페롤", "잔탄검", "하이드록시아세토페논",
            "에틸헥실글리세린", "세틸알코올", "글리세릴스테아레이트", "알로에베라잎추출물",
            "디소듐이디티에이",
        ]);

        let occlusive_markers = words(&[
            "시어", "SHEA", "버터", "BUTTER", "코코넛", "COCONUT", "페트롤라툼", "PETROLATUM",
        ]);

        Self {
            categories,
            cautions,
            split_hints,
            occlusive_markers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_all_categories_in_order() {
        let dict = KeywordDictionary::builtin();
        let tags: Vec<CategoryTag> = dict.categories.iter().map(|c| c.tag).collect();
        assert_eq!(tags, CategoryTag::ALL.to_vec());
    }

    #[test]
    fn test_builtin_is_valid() {
        assert!(KeywordDictionary::builtin().validate().is_ok());
    }

    #[test]
    fn test_builtin_caution_order() {
        let dict = KeywordDictionary::builtin();
        assert_eq!(dict.cautions.len(), 3);
        assert!(dict.cautions[0].label.starts_with("향료"));
        assert!(dict.cautions[1].label.starts_with("알코올"));
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let dict = KeywordDictionary::builtin();
        let json = dict.to_json().unwrap();
        let loaded = KeywordDictionary::from_json(&json).unwrap();
        assert_eq!(&loaded, dict);
    }

    #[test]
    fn test_from_json_rejects_empty_keyword() {
        let json = r#"{
            "categories": [{"tag": "hydration", "keywords": ["글리세린", " "]}],
            "cautions": []
        }"#;
        let err = KeywordDictionary::from_json(json).unwrap_err();
        assert!(matches!(err, Error::Dictionary(_)));
    }

    #[test]
    fn test_from_json_rejects_duplicate_category() {
        let json = r#"{
            "categories": [
                {"tag": "acne", "keywords": ["티트리"]},
                {"tag": "acne", "keywords": ["병풀"]}
            ],
            "cautions": []
        }"#;
        assert!(KeywordDictionary::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_optional_sections_default_empty() {
        let json = r#"{
            "categories": [{"tag": "barrier", "keywords": ["세라마이드"]}],
            "cautions": [{"label": "향료", "keywords": ["향료"]}]
        }"#;
        let dict = KeywordDictionary::from_json(json).unwrap();
        assert!(dict.split_hints.is_empty());
        assert!(dict.occlusive_markers.is_empty());
        assert_eq!(dict.keywords_for(CategoryTag::Barrier), &["세라마이드".to_string()]);
        assert!(dict.keywords_for(CategoryTag::Acne).is_empty());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join("inci-scout-dictionary-test.json");
        std::fs::write(&path, KeywordDictionary::builtin().to_json().unwrap()).unwrap();
        let dict = KeywordDictionary::from_file(&path).unwrap();
        assert_eq!(dict.categories.len(), 6);
        std::fs::remove_file(&path).ok();
    }
}
