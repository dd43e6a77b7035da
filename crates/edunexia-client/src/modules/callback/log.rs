use chrono::Utc;
use tracing::debug;

/// Timestamped trail of what the callback page did, kept for operators.
#[derive(Debug, Default, Clone)]
pub(crate) struct DiagnosticLog {
    lines: Vec<String>,
}

impl DiagnosticLog {
    pub(crate) fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(target: "edunexia::callback", "{message}");
        let stamp = Utc::now().format("%H:%M:%S%.3f");
        self.lines.push(format!("[{stamp}] {message}"));
    }

    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_timestamped() {
        let mut log = DiagnosticLog::default();
        log.push("token received");
        assert_eq!(log.lines().len(), 1);
        let line = &log.lines()[0];
        assert!(line.starts_with('['));
        assert!(line.ends_with("] token received"));
    }
}
