//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "EQUIPSCAN_LOG";

/// Directives used when `EQUIPSCAN_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVES: &str = "equipscan_core=info,equipscan_analysis=info";

/// Install the equipscan log subscriber.
///
/// Each engine stage logs under its module path, so `EQUIPSCAN_LOG` can
/// raise one stage without the others:
///
/// | Target | Events |
/// |---|---|
/// | `equipscan_analysis::categorize` | records normalized, primary categories assigned |
/// | `equipscan_analysis::frequency` | profiles and baselines computed |
/// | `equipscan_analysis::outliers` | per-method flag counts, excluded profiles |
/// | `equipscan_analysis::ranking` | scored and ranked counts |
/// | `equipscan_analysis::pipeline` | run start and finish, contract violations |
/// | `equipscan_core::config` | unreadable user config |
///
/// Example: `EQUIPSCAN_LOG=equipscan_analysis::outliers=debug,equipscan_core=warn`.
///
/// Only the first call installs anything, and a subscriber already set by
/// the host application is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .compact(),
            )
            .with(filter)
            .try_init();
    });
}
