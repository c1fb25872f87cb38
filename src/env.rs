//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量读取。命令行参数优先于这里的取值。

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    /// 未设置时返回 `None`，设置了但无效时返回错误
    fn get_optional() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(Self::DEFAULT),
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "STYLESTATS_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("warn".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 网络请求相关环境变量
pub mod network {
    use super::*;

    /// 自定义 User-Agent
    pub struct UserAgent;
    impl EnvVar<String> for UserAgent {
        const NAME: &'static str = "STYLESTATS_USER_AGENT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "User-Agent header sent with every request";

        fn parse(value: &str) -> EnvResult<String> {
            if value.trim().is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "User agent must not be empty".to_string(),
                });
            }
            Ok(value.trim().to_string())
        }
    }

    /// 请求超时
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "STYLESTATS_TIMEOUT";
        const DEFAULT: Option<Duration> = None;
        const DESCRIPTION: &'static str = "Request timeout in seconds (unset means no timeout)";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds: u64 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid number of seconds".to_string(),
            })?;

            if seconds == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout must be greater than 0".to_string(),
                });
            }

            Ok(Duration::from_secs(seconds))
        }
    }

    /// 接受无效 TLS 证书
    pub struct Insecure;
    impl EnvVar<bool> for Insecure {
        const NAME: &'static str = "STYLESTATS_INSECURE";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Accept invalid TLS certificates";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 启用压缩传输
    pub struct Compression;
    impl EnvVar<bool> for Compression {
        const NAME: &'static str = "STYLESTATS_COMPRESSION";
        const DEFAULT: Option<bool> = Some(true);
        const DESCRIPTION: &'static str = "Request gzip, brotli and deflate encoded responses";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }
}

/// 辅助函数
fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
    pub insecure: bool,
    pub compression: bool,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,
            user_agent: network::UserAgent::get_optional()?,
            timeout: network::Timeout::get_optional()?,
            insecure: network::Insecure::get()?,
            compression: network::Compression::get()?,
        })
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");

    docs.push_str(&format!(
        "- `{}`: {} (default: \"warn\")\n",
        core::LogLevel::NAME,
        core::LogLevel::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        network::UserAgent::NAME,
        network::UserAgent::DESCRIPTION,
        network::UserAgent::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        network::Timeout::NAME,
        network::Timeout::DESCRIPTION,
        network::Timeout::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        network::Insecure::NAME,
        network::Insecure::DESCRIPTION,
        network::Insecure::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        network::Compression::NAME,
        network::Compression::DESCRIPTION,
        network::Compression::DEFAULT
    ));

    docs
}
