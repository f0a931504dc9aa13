/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use crate::config::Config;
use crate::models::BatchResponse;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 订阅者
///
/// 优先使用 `RUST_LOG`；否则默认 info，`verbose` 时为 debug。重复调用无副作用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息（不输出令牌内容）
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 会员批量校验模式");
    info!("🌐 校验地址: {}", config.validator_url);
    info!(
        "📊 窗口大小: {} | 请求间隔: {} ms",
        config.window_size, config.request_delay_ms
    );
    info!("🔑 会话令牌长度: {}", config.session_token.trim().len());
    info!("{}", "=".repeat(60));
}

/// 记录会员号加载信息
pub fn log_identifiers_loaded(total: usize, window_size: usize) {
    info!("✓ 找到 {} 个待校验的会员号", total);
    info!("📋 将以每窗口 {} 个的方式处理", window_size);
    info!("💡 会话失效时立即停止\n");
}

/// 记录窗口开始信息
///
/// # 参数
/// - `start`: 窗口起始下标（从0开始）
/// - `end`: 窗口计划结束下标（不含）
/// - `total`: 会员号总数
pub fn log_window_start(start: usize, end: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理窗口: {}-{} / 共 {} 个", start + 1, end, total);
    info!("{}", "=".repeat(60));
}

/// 记录窗口完成信息
pub fn log_window_complete(response: &BatchResponse) {
    let with_data = response.results.iter().filter(|r| r.has_data()).count();
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 窗口完成: 有数据 {}/{} | 游标 {} / {}",
        with_data,
        response.results.len(),
        response.window_end,
        response.total
    );
    if response.session_unhealthy {
        info!(
            "❌ 会话失效，刷新{}",
            if response.escalation_fired {
                "已触发"
            } else {
                "未触发"
            }
        );
    }
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `with_data`: 有数据的记录数
/// - `with_error`: 出错的记录数
/// - `total`: 会员号总数
/// - `output_path`: 结果文件路径
pub fn print_final_stats(with_data: usize, with_error: usize, total: usize, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 有数据: {}/{}", with_data, total);
    info!("❌ 出错: {}", with_error);
    info!("⏭️ 未处理: {}", total.saturating_sub(with_data + with_error));
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
