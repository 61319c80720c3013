//! OCR結果キャッシュモジュール
//!
//! 画像のSHA-256をキーにしてOCR生テキストをキャッシュし、
//! 同じ画像の再認識をスキップする。解析結果ではなく生テキストを持つので、
//! 辞書を変えても再実行時に反映される。

use crate::error::Result;
use crate::scanner::ImageInfo;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".inci-scout-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// ファイルハッシュ → OCR結果のマップ
    entries: HashMap<String, CacheEntry>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    /// 認識時の言語ヒント
    pub language: String,
    /// OCR生テキスト
    pub raw_text: String,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み（読めなければ空）
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, CacheFile>(reader) {
            Ok(cache) => {
                // バージョンチェック
                if cache.version != Self::CURRENT_VERSION {
                    tracing::warn!(path = %cache_path.display(), "캐시 버전 불일치, 새로 만듭니다");
                    return Self::default();
                }
                cache
            }
            Err(e) => {
                tracing::warn!(path = %cache_path.display(), error = %e, "캐시를 읽을 수 없습니다");
                Self::default()
            }
        }
    }

    /// キャッシュファイルを保存
    pub fn save(&self, folder: &Path) -> Result<()> {
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除
    ///
    /// # Returns
    /// 削除した場合 true、元々なかった場合 false
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// 同じ言語ヒントで認識したエントリのみ返す
    pub fn get(&self, hash: &str, language: &str) -> Option<&CacheEntry> {
        self.entries.get(hash).filter(|e| e.language == language)
    }

    pub fn insert(&mut self, hash: String, file_name: String, language: String, raw_text: String) {
        self.entries.insert(
            hash,
            CacheEntry {
                file_name,
                language,
                raw_text,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 画像ファイルのハッシュを計算（SHA-256, hex）
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// キャッシュ済み画像と未キャッシュ画像に振り分ける
///
/// # Returns
/// (キャッシュ済み: (画像, 生テキスト), 未キャッシュ: (画像, ハッシュ))
pub fn filter_cached_images(
    images: &[ImageInfo],
    cache: &CacheFile,
    language: &str,
) -> (Vec<(ImageInfo, String)>, Vec<(ImageInfo, String)>) {
    let mut cached = Vec::new();
    let mut uncached = Vec::new();

    for img in images {
        let hash = match compute_file_hash(&img.path) {
            Ok(h) => h,
            Err(e) => {
                // ハッシュ計算失敗時は未キャッシュとして扱う
                tracing::warn!(file = %img.file_name, error = %e, "해시 계산 실패");
                uncached.push((img.clone(), String::new()));
                continue;
            }
        };

        match cache.get(&hash, language) {
            Some(entry) => cached.push((img.clone(), entry.raw_text.clone())),
            None => uncached.push((img.clone(), hash)),
        }
    }

    (cached, uncached)
}
