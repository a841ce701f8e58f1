use tokio::signal;
use tracing::{info, warn};

/// 等待 Ctrl+C 信号
///
/// 数据库只读且随进程释放，没有需要刷新的状态。
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}
