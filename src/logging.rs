//! Tracing subscriber wiring.
//!
//! Console output always; JSON format and a daily-rotating file layer by
//! configuration. `RUST_LOG` overrides the configured level.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    // `tracing_appender::rolling::daily` panics if it can't create the
    // initial log file, so writability is preflighted first.
    let file_layer = config.dir.as_ref().and_then(|dir| {
        if std::fs::create_dir_all(dir).is_err() {
            eprintln!(
                "Warning: could not create log directory {}, file logging disabled",
                dir.display()
            );
            return None;
        }
        let probe = dir.join(".pennant_write_test");
        match std::fs::OpenOptions::new().create(true).append(true).open(&probe) {
            Ok(_) => {
                let _ = std::fs::remove_file(&probe);

                let appender = tracing_appender::rolling::daily(dir, "pennant.log");
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                // Keep the guard alive for the process lifetime
                Box::leak(Box::new(guard));

                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_target(true),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: could not write to log directory {} ({e}), file logging disabled",
                    dir.display()
                );
                None
            }
        }
    });

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}
