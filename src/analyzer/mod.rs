pub mod cache;

pub use cache::CacheFile;

use crate::error::{InciScoutError, Result};
use crate::ocr::TesseractOcr;
use crate::preprocess::{self, PreprocessOptions};
use crate::scanner::ImageInfo;
use indicatif::{ProgressBar, ProgressStyle};
use inci_scout_common::{analyze_ocr_output, AnalysisResult, KeywordDictionary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::task::JoinSet;

/// 画像解析オプション
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// 同時にOCRする枚数
    pub batch_size: usize,
    /// Noneなら前処理しない
    pub preprocess: Option<PreprocessOptions>,
    /// キャッシュを置くフォルダ（Noneならキャッシュ無効）
    pub cache_dir: Option<PathBuf>,
    /// 前処理画像の一時フォルダを作る場所（Noneならシステムの一時フォルダ）
    pub temp_root: Option<PathBuf>,
    pub show_progress: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            batch_size: 4,
            preprocess: Some(PreprocessOptions::default()),
            cache_dir: None,
            temp_root: None,
            show_progress: false,
        }
    }
}

/// 画像群を解析する
///
/// 画像ごとに 前処理 → OCR → パイプライン を通す。
/// 1枚のOCR失敗はその画像の `OcrFailed` 結果になり、バッチは続行する。
/// 戻り値は入力と同じ順序。
pub async fn analyze_images(
    images: &[ImageInfo],
    ocr: &TesseractOcr,
    dictionary: &KeywordDictionary,
    options: &AnalyzeOptions,
) -> Result<Vec<AnalysisResult>> {
    let mut ocr_cache = options.cache_dir.as_deref().map(CacheFile::load);

    // キャッシュ済みのテキストを先に拾う
    let mut texts: Vec<Option<Result<String>>> =
        (0..images.len()).map(|_| None).collect();
    let mut pending: Vec<(usize, String)> = Vec::new();

    match &ocr_cache {
        Some(cache_file) => {
            let (cached, uncached) = cache::filter_cached_images(images, cache_file, ocr.language());
            tracing::info!(hits = cached.len(), misses = uncached.len(), "캐시 조회");

            for (img, raw_text) in cached {
                if let Some(idx) = index_of(images, &img) {
                    texts[idx] = Some(Ok(raw_text));
                }
            }
            for (img, hash) in uncached {
                if let Some(idx) = index_of(images, &img) {
                    pending.push((idx, hash));
                }
            }
        }
        None => pending.extend((0..images.len()).map(|i| (i, String::new()))),
    }

    let progress = progress_bar(pending.len() as u64, options.show_progress);
    // 実行ごとの一時フォルダ。dropで中身ごと消える
    let work_dir = work_dir(options.temp_root.as_deref())?;

    for (batch_idx, batch) in pending.chunks(options.batch_size.max(1)).enumerate() {
        tracing::debug!(batch = batch_idx + 1, size = batch.len(), "OCR 배치 시작");

        let mut set = JoinSet::new();
        for (idx, _) in batch {
            let image = images[*idx].clone();
            let ocr = ocr.clone();
            let preprocess_options = options.preprocess;
            let work_dir = work_dir.path().to_path_buf();
            let idx = *idx;

            set.spawn(async move {
                let text = recognize_one(idx, &image, &ocr, preprocess_options, &work_dir).await;
                (idx, text)
            });
        }

        join_batch(&mut set, images, &mut texts, &progress).await;
    }
    progress.finish_and_clear();
    drop(work_dir);

    // 成功したOCRのみキャッシュ
    if let (Some(cache_file), Some(dir)) = (ocr_cache.as_mut(), options.cache_dir.as_deref()) {
        let mut added = 0;
        for (idx, hash) in &pending {
            if hash.is_empty() {
                continue;
            }
            if let Some(Ok(text)) = &texts[*idx] {
                cache_file.insert(
                    hash.clone(),
                    images[*idx].file_name.clone(),
                    ocr.language().to_string(),
                    text.clone(),
                );
                added += 1;
            }
        }
        if added > 0 {
            cache_file.save(dir)?;
            tracing::info!(added, total = cache_file.len(), "캐시 저장");
        }
    }

    let results = images
        .iter()
        .zip(texts)
        .map(|(img, text)| {
            let text = text.unwrap_or_else(|| {
                Err(InciScoutError::Ocr("OCR 작업이 중단되었습니다".into()))
            });
            analyze_ocr_output(text, dictionary).with_file_name(&img.file_name)
        })
        .collect();

    Ok(results)
}

/// 1枚分の前処理とOCR
async fn recognize_one(
    idx: usize,
    image: &ImageInfo,
    ocr: &TesseractOcr,
    preprocess_options: Option<PreprocessOptions>,
    work_dir: &Path,
) -> Result<String> {
    let target = match preprocess_options {
        Some(options) => {
            // 再帰スキャンで同名ファイルがあっても衝突しないよう番号を付ける
            let output = work_dir.join(format!("{:04}-{}.png", idx, sanitize_stem(&image.file_name)));
            let input = image.path.clone();
            let out = output.clone();
            // 画像処理はCPUバウンドなのでブロッキングスレッドで
            tokio::task::spawn_blocking(move || preprocess::preprocess_file(&input, &out, &options))
                .await
                .map_err(|e| InciScoutError::ImageLoad(format!("전처리 작업 중단: {}", e)))??;
            output
        }
        None => image.path.clone(),
    };

    ocr.recognize(&target).await
}

/// バッチの完了を待つ
///
/// 中断・パニックしたタスクの画像は `texts` がNoneのまま残り、OCR失敗として扱われる。
async fn join_batch(
    set: &mut JoinSet<(usize, Result<String>)>,
    images: &[ImageInfo],
    texts: &mut [Option<Result<String>>],
    progress: &ProgressBar,
) {
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, text)) => {
                if let Err(e) = &text {
                    tracing::warn!(file = %images[idx].file_name, error = %e, "OCR 실패");
                }
                texts[idx] = Some(text);
            }
            Err(e) => tracing::warn!(error = %e, "OCR 작업이 중단되었습니다"),
        }
        progress.inc(1);
    }
}

fn index_of(images: &[ImageInfo], img: &ImageInfo) -> Option<usize> {
    images.iter().position(|i| i.path == img.path)
}

/// 前処理画像の一時置き場（実行ごとに別フォルダ）
fn work_dir(root: Option<&Path>) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("inci-scout-");
    let dir = match root {
        Some(root) => builder.tempdir_in(root)?,
        None => builder.tempdir()?,
    };
    Ok(dir)
}

/// 一時ファイル名に使えない文字を置換
fn sanitize_stem(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());

    stem.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}") {
        bar.set_style(style);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_stem() {
        assert_eq!(sanitize_stem("front label.jpg"), "front_label");
        assert_eq!(sanitize_stem("성분표-1.png"), "성분표-1");
        assert_eq!(sanitize_stem("a/b"), "b");
    }

    #[test]
    fn test_default_options() {
        let options = AnalyzeOptions::default();
        assert_eq!(options.batch_size, 4);
        assert!(options.preprocess.is_some());
        assert!(options.cache_dir.is_none());
        assert!(options.temp_root.is_none());
    }

    #[test]
    fn test_work_dir_is_unique_and_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let a = work_dir(Some(root.path())).unwrap();
        let b = work_dir(Some(root.path())).unwrap();
        assert_ne!(a.path(), b.path());

        let path = a.path().to_path_buf();
        drop(a);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_aborted_task_does_not_stop_batch() {
        let images = vec![
            ImageInfo { path: PathBuf::from("a.png"), file_name: "a.png".into() },
            ImageInfo { path: PathBuf::from("b.png"), file_name: "b.png".into() },
        ];
        let mut texts: Vec<Option<Result<String>>> = vec![None, None];

        let mut set: JoinSet<(usize, Result<String>)> = JoinSet::new();
        let stuck = set.spawn(std::future::pending());
        set.spawn(async { (1, Ok("글리세린".to_string())) });
        stuck.abort();

        join_batch(&mut set, &images, &mut texts, &ProgressBar::hidden()).await;

        assert!(texts[0].is_none());
        assert!(matches!(&texts[1], Some(Ok(text)) if text == "글리세린"));
    }
}
