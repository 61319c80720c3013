//! OCRエンジン連携モジュール
//!
//! tesseract互換のCLIを子プロセスとして呼び、標準出力を生テキストとして受け取る。
//! 起動失敗・非0終了・タイムアウト・非UTF-8出力はすべてOCR失敗として返す。

use crate::config::Config;
use crate::error::{InciScoutError, Result};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct TesseractOcr {
    command: String,
    language: String,
    page_segmentation_mode: u8,
    timeout: Duration,
}

impl TesseractOcr {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
            page_segmentation_mode: 6,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            command: config.ocr_command(),
            language: config.language.clone(),
            page_segmentation_mode: config.page_segmentation_mode,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// コマンドライン引数（`<image> stdout -l <lang> --psm <n>`）
    fn args(&self, image: &Path) -> Vec<String> {
        vec![
            image.display().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.language.clone(),
            "--psm".to_string(),
            self.page_segmentation_mode.to_string(),
        ]
    }

    /// 画像1枚を認識
    pub async fn recognize(&self, image: &Path) -> Result<String> {
        let started = Instant::now();

        let child = Command::new(&self.command)
            .args(self.args(image))
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| InciScoutError::OcrTimeout(self.timeout.as_secs()))?
            .map_err(|e| InciScoutError::Ocr(format!("{} 실행 실패: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InciScoutError::Ocr(format!(
                "{} 실패 (code {:?}): {}",
                self.command,
                output.status.code(),
                stderr.trim()
            )));
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|e| InciScoutError::Ocr(format!("UTF-8이 아닌 출력: {}", e)))?;

        tracing::debug!(
            image = %image.display(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = text.chars().count(),
            "OCR 완료"
        );

        Ok(text)
    }
}
