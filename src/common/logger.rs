use colored::*;

/// 面向用户的彩色输出，日志走 tracing
pub struct PrettyLogger;

impl PrettyLogger {
    /// 显示警告消息
    pub fn warning(message: impl AsRef<str>) {
        println!("{} {}", "⚠".yellow().bold(), message.as_ref());
    }

    /// 显示错误消息
    pub fn error(message: impl AsRef<str>) {
        println!("{} {}", "✗".red().bold(), message.as_ref());
    }

    /// 启动阶段的致命错误，写到 stderr
    pub fn fatal(message: impl AsRef<str>) {
        eprintln!("{} {}", "✗".red().bold(), message.as_ref().red());
    }
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::warning(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::error(format!($($arg)*))
    };
}
