use crate::Result;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Install the global subscriber, filtered by `RUST_LOG`.
///
/// The terminal layer writes to stderr. With `log_file`, the same events also go
/// to `<log_dir>/<run_id>.log` without colors.
pub fn init_tracing_subscriber(log_file: bool, log_dir: &Path, run_id: &str) -> Result<()> {
    let terminal = fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false);

    let file = log_file.then(|| {
        let appender =
            RollingFileAppender::new(Rotation::NEVER, log_dir, format!("{}.log", run_id));
        fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(false)
    });

    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(terminal)
        .with(file);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::fs;

    // the only test installing a global subscriber in this binary
    #[test]
    fn log_file_written_and_installed_once() {
        let dir = tempfile::tempdir().unwrap();

        init_tracing_subscriber(true, dir.path(), "run_1").unwrap();
        tracing::error!("log file check");

        let content = fs::read_to_string(dir.path().join("run_1.log")).unwrap();
        assert!(content.contains("log file check"));

        assert!(matches!(
            init_tracing_subscriber(false, dir.path(), "run_2"),
            Err(Error::Tracing(_))
        ));
    }
}
