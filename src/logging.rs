use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` when set, otherwise `info`.
pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The log subscriber used for action output.
///
/// Each event is printed as its bare message, with no level, target,
/// timestamp or colour, so the fixed message lines appear verbatim.
pub fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_level(false)
        .with_target(false)
        .without_time()
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::{debug, error, info};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn emit_with(filter: &str, emit: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = subscriber(EnvFilter::new(filter), move || writer.clone());
        tracing::subscriber::with_default(subscriber, emit);
        buffer.contents()
    }

    #[test]
    fn test_messages_are_printed_verbatim() {
        let out = emit_with("info", || {
            info!("Branch name: {}", "feature/update-readme");
            info!("No Jira issue found. Exiting action.");
            error!("GITHUB_TOKEN is not set.");
        });
        assert_eq!(
            out,
            "Branch name: feature/update-readme\nNo Jira issue found. Exiting action.\nGITHUB_TOKEN is not set.\n"
        );
    }

    #[test]
    fn test_debug_hidden_at_info() {
        let out = emit_with("info", || {
            debug!("resolved settings");
            info!("Extracted Jira Issue: TEST-123");
        });
        assert_eq!(out, "Extracted Jira Issue: TEST-123\n");
    }
}
