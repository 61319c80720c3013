use crate::error::{InciScoutError, Result};
use crate::preprocess::PreprocessOptions;
use inci_scout_common::KeywordDictionary;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// OCRコマンドを上書きする環境変数
pub const OCR_COMMAND_ENV: &str = "INCI_SCOUT_OCR_COMMAND";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OCRエンジンのコマンド（tesseract互換）
    pub ocr_command: String,
    /// 言語ヒント
    pub language: String,
    /// tesseractの --psm
    pub page_segmentation_mode: u8,
    /// 前処理の拡大率
    pub upscale: f32,
    /// 二値化の閾値（これより明るければ白）
    pub threshold: u8,
    /// 同時にOCRする枚数
    pub batch_size: usize,
    pub timeout_seconds: u64,
    /// カスタム辞書JSON
    pub dictionary_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ocr_command: "tesseract".into(),
            language: "kor+eng".into(),
            page_segmentation_mode: 6,
            upscale: 2.5,
            threshold: 170,
            batch_size: 4,
            timeout_seconds: 60,
            dictionary_path: None,
            log_level: "warn".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InciScoutError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("inci-scout").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.ocr_command.trim().is_empty() {
            return Err(InciScoutError::Config("ocr_command가 비어 있습니다".into()));
        }
        PreprocessOptions::from(self).validate()?;
        if self.batch_size == 0 {
            return Err(InciScoutError::Config("batch_size는 1 이상이어야 합니다".into()));
        }
        Ok(())
    }

    pub fn ocr_command(&self) -> String {
        // 環境変数を優先
        match std::env::var(OCR_COMMAND_ENV) {
            Ok(cmd) if !cmd.trim().is_empty() => cmd,
            _ => self.ocr_command.clone(),
        }
    }

    pub fn set_ocr_command(&mut self, command: String) -> Result<()> {
        self.ocr_command = command;
        self.validate()?;
        self.save()
    }

    pub fn set_language(&mut self, language: String) -> Result<()> {
        self.language = language;
        self.save()
    }

    /// 辞書を読み込む（指定がなければ組み込み辞書）
    pub fn load_dictionary(&self, override_path: Option<&std::path::Path>) -> Result<KeywordDictionary> {
        match override_path.or(self.dictionary_path.as_deref()) {
            Some(path) => {
                if !path.exists() {
                    return Err(InciScoutError::FileNotFound(path.display().to_string()));
                }
                Ok(KeywordDictionary::from_file(path)?)
            }
            None => Ok(KeywordDictionary::builtin().clone()),
        }
    }
}
