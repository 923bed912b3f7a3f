//! 日志初始化
//!
//! `RUST_LOG` 优先；未设置时默认 info，`verbose` 时为 debug

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("exam_portal_client={}", default_level)));

    // 控制台交互走 stdout，日志统一写到 stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
