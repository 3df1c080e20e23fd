//! Logging setup utilities for the livechat server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The default filter enables `default_log_level` for the calling package, the
/// binary and the server library crate. It can be overridden entirely using
/// the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `package_name` - The package of the caller, usually `env!("CARGO_PKG_NAME")`
/// * `binary_name` - The name of the binary (e.g., "livechat-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use livechat_shared::logger::setup_logger;
///
/// setup_logger("livechat-server", "livechat-server", "debug");
/// ```
pub fn setup_logger(package_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter(package_name, binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
///
/// Crate names in tracing targets use underscores, so dashes are replaced.
fn default_filter(package_name: &str, binary_name: &str, default_log_level: &str) -> String {
    let package = package_name.replace('-', "_");
    let binary = binary_name.replace('-', "_");
    format!(
        "{package}={level},{binary}={level},tower_http={level}",
        level = default_log_level
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_replaces_dashes() {
        // テスト項目: パッケージ名とバイナリ名のダッシュがアンダースコアに置換される
        // given (前提条件):
        let package = "livechat-server";
        let binary = "livechat-server";

        // when (操作):
        let filter = default_filter(package, binary, "debug");

        // then (期待する結果):
        assert_eq!(
            filter,
            "livechat_server=debug,livechat_server=debug,tower_http=debug"
        );
    }

    #[test]
    fn test_default_filter_parses_as_env_filter() {
        // テスト項目: 生成したフィルタ文字列が EnvFilter として解釈できる
        // given (前提条件):
        let filter = default_filter("livechat-server", "server", "info");

        // when (操作):
        let parsed = tracing_subscriber::EnvFilter::try_new(&filter);

        // then (期待する結果):
        assert!(parsed.is_ok());
    }
}
