//! Logger setup shared by the binaries.

use std::fmt::{self, Write as _};

use tracing_subscriber::{
    EnvFilter,
    fmt::{format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::time::now_jst;

/// Timer that renders event timestamps in JST.
#[derive(Debug, Clone, Copy, Default)]
pub struct JstTimer;

impl FormatTime for JstTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", now_jst().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// Build the filter used by [`setup_logger`].
///
/// `RUST_LOG` wins when set; otherwise `crate_name` logs at `default_level`
/// and `tower_http` at `debug`.
pub fn build_env_filter(crate_name: &str, default_level: &str) -> EnvFilter {
    let crate_target = crate_name.replace('-', "_");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{crate_target}={default_level},tower_http=debug").into()
    })
}

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn setup_logger(crate_name: &str, default_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(crate_name, default_level))
        .with(tracing_subscriber::fmt::layer().with_timer(JstTimer))
        .try_init();
}
