//! 成分トークン抽出
//!
//! 正規化済みテキストから成分名の候補を取り出す。
//!
//! ## 処理フロー
//! 1. 粗分割（改行・カンマ）
//! 2. トークン単位のクリーンアップ
//! 3. 妥当性フィルタ
//! 4. 重複除去（大文字小文字を区別しない）
//! 5. 分割ヒントによる連結トークンの切り分け
//! 6. 最終の重複除去

use crate::dictionary::KeywordDictionary;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static::lazy_static! {
    static ref PAREN_RE: Regex = Regex::new(r"\(.*?\)").unwrap();
    static ref DIGIT_PERCENT_RE: Regex = Regex::new(r"[0-9%]").unwrap();
    static ref NON_LETTER_RE: Regex = Regex::new(r"[^\p{L}\s-]").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref HANGUL_RUN_RE: Regex = Regex::new(r"[가-힣]{2,}").unwrap();
    static ref LATIN_RUN_RE: Regex = Regex::new(r"[A-Za-z]{4,}").unwrap();
    static ref THREE_LATIN_RE: Regex = Regex::new(r"^[A-Za-z]{3}$").unwrap();
}

/// ゼロ幅文字・BOM
const INVISIBLE_MARKS: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// 組み込み辞書の分割ヒントで成分リストを抽出する
pub fn extract(normalized: &str) -> Vec<String> {
    extract_with_hints(normalized, &KeywordDictionary::builtin().split_hints)
}

/// 指定の分割ヒントで成分リストを抽出する
pub fn extract_with_hints(normalized: &str, hints: &[String]) -> Vec<String> {
    let cleaned = rough_split(normalized)
        .into_iter()
        .map(|t| clean_token(&t))
        .filter(|t| is_valid_ingredient_token(t));

    let first_pass = dedup_case_insensitive(cleaned);

    let split = first_pass
        .iter()
        .flat_map(|token| split_by_hints(token, hints));

    dedup_case_insensitive(split)
}

/// 改行をカンマに寄せてカンマで分割
pub fn rough_split(normalized: &str) -> Vec<String> {
    normalized
        .replace('\n', ",")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// トークン1つ分のクリーンアップ
///
/// 括弧内・数字・%・記号を落とし、NFKC正規化してゼロ幅文字を除く。
pub fn clean_token(token: &str) -> String {
    let text = PAREN_RE.replace_all(token, "");
    let text = DIGIT_PERCENT_RE.replace_all(&text, "");
    let text = NON_LETTER_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");

    text.trim()
        .nfkc()
        .filter(|c| !INVISIBLE_MARKS.contains(c))
        .collect()
}

/// 成分名として妥当か判定
///
/// 以下はOCRノイズとして捨てる:
/// - 空、3文字未満
/// - ちょうど3文字のラテン文字（例: "IZE"）
/// - ハングル2音節以上の並びも、ラテン文字4文字以上の並びも含まない
/// - 同じ1文字の繰り返し（例: "aaaa"）
pub fn is_valid_ingredient_token(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    if token.chars().count() < 3 {
        return false;
    }
    if THREE_LATIN_RE.is_match(token) {
        return false;
    }
    if !HANGUL_RUN_RE.is_match(token) && !LATIN_RUN_RE.is_match(token) {
        return false;
    }
    !is_single_char_repeat(token)
}

fn is_single_char_repeat(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

/// 大文字化したキーで重複除去（初出順を維持）
pub fn dedup_case_insensitive<I>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|t| seen.insert(t.to_uppercase()))
        .collect()
}

/// 分割ヒントでOCR連結トークンを切り分ける
///
/// スペース区切りの各ピースについて、含まれるヒントが2つ以上なら
/// 長いヒントから順に切り出す。切り出したヒントより前の文字列は捨て、
/// ヒントの最後の出現位置より後ろを残りとして次のヒントへ進む。
///
/// 前側を捨てるため、既知ヒントの前に連結された3つ目の成分は失われる
/// （例: "정제수글리세린" → ["글리세린"]）。既知の制限として挙動を固定している。
pub fn split_by_hints(token: &str, hints: &[String]) -> Vec<String> {
    let mut out = Vec::new();

    for piece in token.split(' ').filter(|p| !p.is_empty()) {
        let mut matched: Vec<&str> = hints
            .iter()
            .map(String::as_str)
            .filter(|h| piece.contains(h))
            .collect();

        if matched.len() <= 1 {
            if is_valid_ingredient_token(piece) {
                out.push(piece.to_string());
            }
            continue;
        }

        // 長いヒント優先（"세라마이드엔피" を "세라마이드" で割らない）
        matched.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let mut remainder = piece;
        for hint in matched {
            if let Some(pos) = remainder.rfind(hint) {
                if is_valid_ingredient_token(hint) {
                    out.push(hint.to_string());
                }
                remainder = &remainder[pos + hint.len()..];
            }
        }

        if is_valid_ingredient_token(remainder) {
            out.push(remainder.to_string());
        }
    }

    out
}
