pub mod build_info;
pub mod dates;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "crop_keeper=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `RUST_LOG` is honored; the crate defaults to `info`. Output goes to stderr
/// so the shell's stdout stays readable in script mode.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // A subscriber installed by the host application wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
