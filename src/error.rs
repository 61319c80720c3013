use thiserror::Error;

#[derive(Error, Debug)]
pub enum InciScoutError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("폴더를 찾을 수 없습니다: {0}")]
    FolderNotFound(String),

    #[error("이미지가 없습니다: {0}")]
    NoImagesFound(String),

    #[error("이미지 읽기 오류: {0}")]
    ImageLoad(String),

    #[error("OCR 실행 오류: {0}")]
    Ocr(String),

    #[error("OCR 시간 초과 ({0}초)")]
    OcrTimeout(u64),

    #[error("사전 오류: {0}")]
    Dictionary(#[from] inci_scout_common::Error),

    #[error("JSON 처리 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for InciScoutError {
    fn from(e: image::ImageError) -> Self {
        InciScoutError::ImageLoad(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InciScoutError>;
