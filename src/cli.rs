use crate::report::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inci-scout")]
#[command(about = "화장품 성분표 사진 OCR 분석 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 成分表の写真（ファイル/フォルダ）を解析
    Analyze {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        path: PathBuf,

        /// 結果JSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 表示形式 (text/json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// OCR言語ヒント（省略時は設定値）
        #[arg(short, long)]
        lang: Option<String>,

        /// 同時にOCRする枚数（省略時は設定値）
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// 前処理（拡大・二値化）をしない
        #[arg(long)]
        no_preprocess: bool,

        /// OCRキャッシュを使用（再認識をスキップ）
        #[arg(long)]
        use_cache: bool,

        /// カスタム辞書JSON
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// OCR済みテキストを解析（ファイル、`-` で標準入力）
    Text {
        /// テキストファイル（`-` は標準入力）
        #[arg(required = true)]
        input: String,

        /// 表示形式 (text/json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// カスタム辞書JSON
        #[arg(short, long)]
        dictionary: Option<PathBuf>,
    },

    /// 前処理した画像を書き出す
    Preprocess {
        /// 入力画像
        #[arg(required = true)]
        input: PathBuf,

        /// 出力PNG
        #[arg(short, long, required = true)]
        output: PathBuf,

        /// 拡大率（省略時は設定値）
        #[arg(long)]
        upscale: Option<f32>,

        /// 二値化の閾値（省略時は設定値）
        #[arg(long)]
        threshold: Option<u8>,
    },

    /// キーワード辞書を表示/書き出し
    Dictionary {
        /// 辞書の概要を表示
        #[arg(long)]
        show: bool,

        /// 組み込み辞書をJSONで書き出す（カスタム辞書の雛形）
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// OCRコマンドを設定
        #[arg(long)]
        set_ocr_command: Option<String>,

        /// OCR言語を設定
        #[arg(long)]
        set_language: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// OCRキャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}
