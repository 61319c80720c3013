//! ログ初期化
//!
//! `RUST_LOG` があればそれを使い、なければ `--verbose` で debug、
//! それ以外は設定ファイルの `log_level`。進捗表示はstdout、ログはstderrに出す。

use tracing_subscriber::EnvFilter;

/// 使用するフィルタ文字列を決める
pub fn filter_directive(verbose: bool, configured: &str) -> String {
    if verbose {
        "debug".to_string()
    } else if configured.trim().is_empty() {
        "warn".to_string()
    } else {
        configured.to_string()
    }
}

pub fn init_logger(verbose: bool, configured: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, configured)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
