//! INCI Scout Common Library
//!
//! 成分表OCRテキストを構造化データに変換するパイプライン。
//! CLIなどのホストから呼ばれ、入出力以外の副作用を持たない。

pub mod types;
pub mod error;
pub mod dictionary;
pub mod normalizer;
pub mod extractor;
pub mod tagger;
pub mod confidence;
pub mod recommender;
pub mod pipeline;

pub use types::{
    AnalysisResult, AnalysisStatus, CategoryTag, ConfidenceLevel, ConfidenceVerdict, TagEvidence,
    TagReport,
};
pub use error::{Error, Result};
pub use dictionary::{CategoryKeywords, CautionRule, KeywordDictionary};
pub use normalizer::normalize;
pub use extractor::{extract, extract_with_hints, is_valid_ingredient_token, split_by_hints};
pub use tagger::{tag, tag_with};
pub use confidence::estimate;
pub use recommender::{recommend, recommend_with};
pub use pipeline::{analyze, analyze_ocr_output, analyze_with};
