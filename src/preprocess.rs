//! OCR前処理モジュール
//!
//! グレースケール化 → 拡大 → 固定閾値で二値化。
//! 小さい成分表の文字をOCRが読める太さ・コントラストにする。

use crate::config::Config;
use crate::error::{InciScoutError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageFormat, ImageReader};
use std::path::Path;

/// 前処理パラメータ
#[derive(Debug, Clone, Copy)]
pub struct PreprocessOptions {
    /// 拡大率
    pub upscale: f32,
    /// この輝度より明るければ白、それ以外は黒
    pub threshold: u8,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            upscale: 2.5,
            threshold: 170,
        }
    }
}

/// 拡大率の許容範囲
pub const UPSCALE_RANGE: std::ops::RangeInclusive<f32> = 1.0..=8.0;

impl PreprocessOptions {
    pub fn validate(&self) -> Result<()> {
        if !UPSCALE_RANGE.contains(&self.upscale) {
            return Err(InciScoutError::Config(format!(
                "upscale은 {}~{} 사이여야 합니다: {}",
                UPSCALE_RANGE.start(),
                UPSCALE_RANGE.end(),
                self.upscale
            )));
        }
        Ok(())
    }
}

impl From<&Config> for PreprocessOptions {
    fn from(config: &Config) -> Self {
        Self {
            upscale: config.upscale,
            threshold: config.threshold,
        }
    }
}

/// 画像を読み込む（拡張子ではなく中身で形式判定）
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(InciScoutError::FileNotFound(path.display().to_string()));
    }

    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| InciScoutError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    reader
        .decode()
        .map_err(|e| InciScoutError::ImageLoad(format!("{}: {}", path.display(), e)))
}

/// 前処理本体
pub fn preprocess(image: &DynamicImage, options: &PreprocessOptions) -> GrayImage {
    let gray = DynamicImage::ImageLuma8(image.to_luma8());

    let width = scaled(gray.width(), options.upscale);
    let height = scaled(gray.height(), options.upscale);
    let mut upscaled = gray.resize_exact(width, height, FilterType::Lanczos3).to_luma8();

    for pixel in upscaled.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > options.threshold { 255 } else { 0 };
    }

    upscaled
}

fn scaled(size: u32, factor: f32) -> u32 {
    ((size as f32 * factor).round() as u32).max(1)
}

/// ファイルを前処理してPNGで保存
///
/// # Returns
/// 出力画像の (幅, 高さ)
pub fn preprocess_file(input: &Path, output: &Path, options: &PreprocessOptions) -> Result<(u32, u32)> {
    options.validate()?;
    let image = load_image(input)?;
    let processed = preprocess(&image, options);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    processed.save_with_format(output, ImageFormat::Png)?;

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        width = processed.width(),
        height = processed.height(),
        "전처리 완료"
    );

    Ok(processed.dimensions())
}
