//! INCI Scout
//!
//! 化粧品の成分表写真を前処理・OCRし、`inci_scout_common` のパイプラインで
//! 成分リスト・機能タグ・注意成分・信頼度・おすすめに変換するCLIホスト。

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod ocr;
pub mod preprocess;
pub mod report;
pub mod scanner;
