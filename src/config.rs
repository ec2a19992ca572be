//! 実行時の設定
//!
//! すべての値に既定値があり、環境変数で上書きできる。

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// 送信から登録までの疑似レイテンシ
pub const DEFAULT_SUBMISSION_DELAY_MS: u64 = 1300;
/// 同時に保持するトーストの上限
pub const DEFAULT_TOAST_LIMIT: usize = 3;
/// トーストを閉じてから削除するまでの時間
pub const DEFAULT_TOAST_REMOVE_DELAY_MS: u64 = 2000;

pub const SUBMISSION_DELAY_ENV: &str = "BOOKING_SUBMISSION_DELAY_MS";
pub const TOAST_LIMIT_ENV: &str = "TOAST_LIMIT";
pub const TOAST_REMOVE_DELAY_ENV: &str = "TOAST_REMOVE_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// アプリケーションの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub submission_delay: Duration,
    pub toast_limit: usize,
    pub toast_remove_delay: Duration,
}

impl AppConfig {
    /// プロセスの環境変数から読む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー検索関数から読む
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let submission_delay_ms =
            parse_var(&lookup, SUBMISSION_DELAY_ENV, DEFAULT_SUBMISSION_DELAY_MS)?;
        let toast_limit = parse_var(&lookup, TOAST_LIMIT_ENV, DEFAULT_TOAST_LIMIT)?;
        let toast_remove_delay_ms =
            parse_var(&lookup, TOAST_REMOVE_DELAY_ENV, DEFAULT_TOAST_REMOVE_DELAY_MS)?;

        if toast_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: TOAST_LIMIT_ENV,
                value: toast_limit.to_string(),
            });
        }

        Ok(Self {
            submission_delay: Duration::from_millis(submission_delay_ms),
            toast_limit,
            toast_remove_delay: Duration::from_millis(toast_remove_delay_ms),
        })
    }

    /// 待ち時間なしの設定（テスト用）
    pub fn immediate() -> Self {
        Self {
            submission_delay: Duration::ZERO,
            toast_remove_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submission_delay: Duration::from_millis(DEFAULT_SUBMISSION_DELAY_MS),
            toast_limit: DEFAULT_TOAST_LIMIT,
            toast_remove_delay: Duration::from_millis(DEFAULT_TOAST_REMOVE_DELAY_MS),
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}
