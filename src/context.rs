use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::SolverConfig;
use crate::error::{Error, Result};

/// Per-solve state: a label for log lines, the start time, and the optional
/// deadline and cancel flag the solver polls between searches.
pub struct SolveContext {
    label: String,
    start_time: Instant,
    deadline: Option<Instant>,
    cancelled: Option<Arc<AtomicBool>>,
}

impl Default for SolveContext {
    fn default() -> SolveContext {
        SolveContext::new("")
    }
}

impl SolveContext {
    pub fn new(label: &str) -> SolveContext {
        let context = SolveContext {
            label: label.to_string(),
            start_time: Instant::now(),
            deadline: None,
            cancelled: None,
        };
        context.log("->", None);
        context
    }

    pub fn for_config(label: &str, config: &SolverConfig) -> SolveContext {
        let context = SolveContext::new(label);
        match config.timeout() {
            Some(timeout) => context.with_timeout(timeout),
            None => context,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> SolveContext {
        self.deadline = Some(self.start_time + timeout);
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> SolveContext {
        self.cancelled = Some(flag);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Fails once the cancel flag is set or the deadline has passed.
    pub fn check(&self) -> Result<()> {
        if let Some(flag) = &self.cancelled {
            if flag.load(Ordering::Relaxed) {
                self.log_message("Cancelled");
                return Err(Error::Cancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                let elapsed_ms = self.elapsed().as_millis();
                self.log_message(&format!("Deadline exceeded after {elapsed_ms} ms"));
                return Err(Error::DeadlineExceeded { elapsed_ms });
            }
        }
        Ok(())
    }

    fn log(&self, prefix: &str, suffix: Option<&str>) {
        debug!("{prefix} [{}]{}", self.label, suffix.unwrap_or(""));
    }

    pub fn log_message(&self, message: &str) {
        info!("[{}] {}", self.label, message);
    }
}

impl Drop for SolveContext {
    fn drop(&mut self) {
        let duration = self.start_time.elapsed().as_millis();
        self.log("<-", Some(&format!(" (took {duration} ms)")));
    }
}

#[cfg(test)]
mod test {
    use super::SolveContext;
    use crate::error::Error;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn unrestricted() {
        assert!(SolveContext::default().check().is_ok());
    }

    #[test]
    fn cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let context = SolveContext::new("test").with_cancel_flag(flag.clone());
        assert!(context.check().is_ok());
        flag.store(true, Ordering::Relaxed);
        assert!(matches!(context.check(), Err(Error::Cancelled)));
    }

    #[test]
    fn expired_deadline() {
        let context = SolveContext::new("test").with_timeout(Duration::ZERO);
        assert!(matches!(
            context.check(),
            Err(Error::DeadlineExceeded { .. })
        ));
    }
}
