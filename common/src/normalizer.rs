//! OCR生テキストの正規化
//!
//! 箇条書き記号・区切り記号をカンマに寄せ、空白を畳む。

use regex::Regex;

lazy_static::lazy_static! {
    // 中黒・ビュレット・ハングル中点・パイプ
    static ref BULLET_RE: Regex = Regex::new(r"[•·ㆍ|]").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref NEWLINES_RE: Regex = Regex::new(r"\n+").unwrap();
}

/// OCR生テキストを正規化する
///
/// 処理順（この順序で残る区切りが決まる）:
/// 1. 区切り記号 → `,`
/// 2. `\r` → `\n`
/// 3. 空白の連続 → 半角スペース1つ（改行も畳まれる）
/// 4. 改行の連続 → 改行1つ
/// 5. 前後の空白を除去
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = BULLET_RE.replace_all(raw, ",");
    let text = text.replace('\r', "\n");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = NEWLINES_RE.replace_all(&text, "\n");

    text.trim().to_string()
}
