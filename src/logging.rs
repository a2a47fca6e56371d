use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::formatter;

static SUBSCRIBER_INIT: std::sync::Once = std::sync::Once::new();

/// The filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> String {
    if verbose {
        format!("info,{}=debug", env!("CARGO_CRATE_NAME"))
    } else {
        format!("warn,{}=info", env!("CARGO_CRATE_NAME"))
    }
}

/// Configure and initialize logging for the application.
///
/// `RUST_LOG` overrides the default levels. Calling this more than once has no effect.
pub fn setup_logging(verbose: bool) {
    SUBSCRIBER_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .event_format(formatter::CustomFormatter)
            .with_writer(std::io::stderr);

        // A global subscriber may already exist when embedded; keep it
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .with(ErrorLayer::default())
            .try_init();
    });
}
