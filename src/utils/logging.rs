use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{EnvConfig, DEBUG_VAR};

/// 日志配置
pub struct LoggingConfig;

impl LoggingConfig {
    /// 初始化日志系统
    ///
    /// 支持通过环境变量配置：
    /// - RUST_LOG: 设置日志级别（error, warn, info, debug, trace）
    /// - AGENTBUILDER_DEBUG: 启用详细调试输出（target、文件与行号）
    ///
    /// 重复调用时保留第一次安装的订阅者。
    ///
    /// ```no_run
    /// use agentbuilder::utils::LoggingConfig;
    ///
    /// LoggingConfig::init();
    /// tracing::info!("ready");
    /// ```
    pub fn init() {
        let is_debug = Self::is_debug();

        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(Self::default_filter(is_debug))
        });

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(is_debug)
            .with_file(is_debug)
            .with_line_number(is_debug);

        let installed = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .is_ok();

        if installed && is_debug {
            tracing::debug!("{DEBUG_VAR} set, verbose logging enabled");
        }
    }

    /// 初始化日志系统（带自定义过滤器）
    pub fn init_with_filter(filter: &str) {
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::new(filter))
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init();
    }

    pub fn is_debug() -> bool {
        EnvConfig::is_debug_mode()
    }

    fn default_filter(is_debug: bool) -> &'static str {
        if is_debug {
            "agentbuilder=debug,info"
        } else {
            "agentbuilder=info,warn"
        }
    }
}
