use tracing_subscriber::{fmt, EnvFilter};

/// ログ出力を初期化（`RUST_LOG` があればそちらを優先）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 既に初期化済みなら何もしない
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
