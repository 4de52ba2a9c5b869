use tracing_subscriber::EnvFilter;

use crate::logging::config::LoggingConfig;

/// Фильтр событий: `RUST_LOG`, если задана, иначе директива из конфигурации.
///
/// Некорректная директива из конфигурации заменяется на `info`.
pub fn build_filter_from_config(config: &LoggingConfig) -> EnvFilter {
    let directive = config.build_filter_directive();

    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => match EnvFilter::try_new(&directive) {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!(
                    "Invalid log filter directive from config ('{directive}'): {e}; falling back to 'info'"
                );
                EnvFilter::new("info")
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        sync::{Arc, Mutex},
    };

    use serial_test::serial;
    use tracing_subscriber::{fmt, prelude::*, registry::Registry};

    use super::*;

    struct VecMakeWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for VecMakeWriter {
        type Writer = VecWriterGuard;

        fn make_writer(&'a self) -> Self::Writer {
            VecWriterGuard(self.0.clone())
        }
    }

    struct VecWriterGuard(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for VecWriterGuard {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture(
        filter: EnvFilter,
        emit: impl FnOnce(),
    ) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let layer = fmt::layer()
            .with_writer(VecMakeWriter(buffer.clone()))
            .with_ansi(false)
            .with_filter(filter);
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::with_default(subscriber, emit);

        let out = buffer.lock().unwrap();
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Тест проверяет фильтрацию по конфигурации: debug отсекается при
    /// уровне info.
    #[test]
    #[serial]
    fn test_config_level_applies() {
        env::remove_var("RUST_LOG");
        let filter = build_filter_from_config(&LoggingConfig::default());

        let s = capture(filter, || {
            tracing::debug!(target: "nbtree", "hidden debug event");
            tracing::info!(target: "nbtree", "visible info event");
        });
        assert!(s.contains("visible info event"));
        assert!(!s.contains("hidden debug event"));
    }

    /// Тест проверяет, что RUST_LOG имеет приоритет над конфигурацией.
    #[test]
    #[serial]
    fn test_env_overrides_config() {
        env::set_var("RUST_LOG", "error");
        let filter = build_filter_from_config(&LoggingConfig::default());
        env::remove_var("RUST_LOG");

        let s = capture(filter, || {
            tracing::info!(target: "nbtree", "info event");
            tracing::error!(target: "nbtree", "error event");
        });
        assert!(s.contains("error event"));
        assert!(!s.contains("info event"));
    }

    /// Тест проверяет, что некорректный уровень заменяется на info.
    #[test]
    #[serial]
    fn test_invalid_directive_falls_back() {
        env::remove_var("RUST_LOG");
        let cfg = LoggingConfig {
            level: "not a level!!".into(),
            ..Default::default()
        };
        let filter = build_filter_from_config(&cfg);

        let s = capture(filter, || {
            tracing::debug!("fallback debug");
            tracing::info!("fallback info");
        });
        assert!(s.contains("fallback info"));
        assert!(!s.contains("fallback debug"));
    }
}
