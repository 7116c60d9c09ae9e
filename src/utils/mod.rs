pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber once.
///
/// Logs go to stderr; stdout carries prompts and submission JSON.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "wizard_core=info".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by an embedding app.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
