use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, so normal runs pay no
/// formatting cost.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
