//! キャッシュ機能テスト
//!
//! OCR生テキストキャッシュの動作を検証

use inci_scout::analyzer::cache::{compute_file_hash, filter_cached_images, CacheFile};
use inci_scout::scanner::ImageInfo;
use tempfile::tempdir;

fn image_info(dir: &std::path::Path, name: &str, bytes: &[u8]) -> ImageInfo {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    ImageInfo {
        path,
        file_name: name.to_string(),
    }
}

/// 空のキャッシュファイル
#[test]
fn test_cache_file_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let cache = CacheFile::load(dir.path());

    assert_eq!(cache.len(), 0);
    assert!(cache.is_empty());
}

/// キャッシュの保存と読み込み
#[test]
fn test_cache_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut cache = CacheFile::load(dir.path());
    cache.insert(
        "abc123".to_string(),
        "label.jpg".to_string(),
        "kor+eng".to_string(),
        "정제수, 글리세린".to_string(),
    );
    cache.save(dir.path()).expect("キャッシュ保存失敗");
    assert!(CacheFile::cache_path(dir.path()).exists());

    let loaded = CacheFile::load(dir.path());
    assert_eq!(loaded.len(), 1);

    let entry = loaded.get("abc123", "kor+eng").expect("キャッシュが見つからない");
    assert_eq!(entry.file_name, "label.jpg");
    assert_eq!(entry.raw_text, "정제수, 글리세린");
}

/// 言語ヒントが違えばヒットしない
#[test]
fn test_cache_language_mismatch() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut cache = CacheFile::load(dir.path());
    cache.insert("h1".into(), "a.png".into(), "kor".into(), "글리세린".into());

    assert!(cache.get("h1", "kor").is_some());
    assert!(cache.get("h1", "kor+eng").is_none());
}

/// 壊れたキャッシュファイルは空として扱う
#[test]
fn test_cache_corrupt_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(CacheFile::cache_path(dir.path()), "{ not json").unwrap();

    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

/// キャッシュ削除
#[test]
fn test_cache_clear() {
    let dir = tempdir().expect("Failed to create temp dir");

    assert!(!CacheFile::clear(dir.path()).unwrap());

    CacheFile::default().save(dir.path()).unwrap();
    assert!(CacheFile::clear(dir.path()).unwrap());
    assert!(!CacheFile::cache_path(dir.path()).exists());
}

/// キャッシュ済み/未キャッシュの振り分け
#[test]
fn test_filter_cached_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    let cached_img = image_info(dir.path(), "cached.png", b"cached image bytes");
    let new_img = image_info(dir.path(), "new.png", b"new image bytes");

    let mut cache = CacheFile::default();
    let hash = compute_file_hash(&cached_img.path).unwrap();
    cache.insert(hash, cached_img.file_name.clone(), "kor+eng".into(), "나이아신아마이드".into());

    let images = vec![cached_img, new_img];
    let (cached, uncached) = filter_cached_images(&images, &cache, "kor+eng");

    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].0.file_name, "cached.png");
    assert_eq!(cached[0].1, "나이아신아마이드");

    assert_eq!(uncached.len(), 1);
    assert_eq!(uncached[0].0.file_name, "new.png");
    assert_eq!(uncached[0].1, compute_file_hash(&images[1].path).unwrap());
}

/// 同じ内容なら別名でもヒット
#[test]
fn test_filter_by_content_not_name() {
    let dir = tempdir().expect("Failed to create temp dir");

    let original = image_info(dir.path(), "front.png", b"same label");
    let copy = image_info(dir.path(), "front-copy.png", b"same label");

    let mut cache = CacheFile::default();
    cache.insert(
        compute_file_hash(&original.path).unwrap(),
        original.file_name.clone(),
        "kor+eng".into(),
        "판테놀".into(),
    );

    let (cached, uncached) = filter_cached_images(&[copy], &cache, "kor+eng");
    assert_eq!(cached.len(), 1);
    assert!(uncached.is_empty());
}
