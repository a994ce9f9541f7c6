pub mod build_info;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "finance_core=info";

/// Installs the global fmt subscriber. When `RUST_LOG` is set it replaces
/// the default `finance_core=info` filter entirely.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        // Another subscriber may already be installed by the host application.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
            .try_init();
    });
}

fn log_filter(env: Option<&str>) -> EnvFilter {
    env.and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
