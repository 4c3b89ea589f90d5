use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, interval_at};

/// Status lines shown while an image is being analyzed, in rotation order.
pub const ANALYSIS_STATUSES: [&str; 5] = [
    "Identifying your green friend...",
    "Consulting the botanical archives...",
    "Decoding leaf patterns...",
    "Measuring optimal sunlight needs...",
    "Almost there! Preparing care guide...",
];

/// Time between two status lines.
pub const DEFAULT_STATUS_INTERVAL: Duration = Duration::from_millis(1500);

/// Receives "in progress" status lines while a call is outstanding.
///
/// Implemented for any `Fn(&str) + Send + Sync`, so a closure works:
///
/// ```
/// use flora::ProgressReporter;
///
/// let reporter = |status: &str| println!("{status}");
/// reporter.report("Decoding leaf patterns...");
/// ```
pub trait ProgressReporter: Send + Sync {
    fn report(&self, status: &str);
}

impl<F> ProgressReporter for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, status: &str) {
        self(status)
    }
}

/// Drive `fut` to completion, reporting a rotating status line every `every`.
///
/// The first line is reported immediately, before `fut` is first polled,
/// rather than after one `every` has elapsed; each following line comes one
/// `every` after the previous. Reporting stops as soon as `fut` resolves.
pub(crate) async fn with_rotating_status<F>(
    fut: F,
    reporter: &dyn ProgressReporter,
    every: Duration,
) -> F::Output
where
    F: Future,
{
    let mut statuses = ANALYSIS_STATUSES.iter().cycle();
    if let Some(first) = statuses.next() {
        reporter.report(first);
    }

    // tokio intervals panic on a zero period
    let every = every.max(Duration::from_millis(1));
    let mut ticker = interval_at(Instant::now() + every, every);
    tokio::pin!(fut);

    loop {
        tokio::select! {
            biased;
            output = &mut fut => return output,
            _ = ticker.tick() => {
                if let Some(status) = statuses.next() {
                    reporter.report(status);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test(start_paused = true)]
    async fn test_statuses_rotate_until_completion() {
        let seen = Mutex::new(Vec::new());
        let reporter = |status: &str| seen.lock().unwrap().push(status.to_string());

        let output = with_rotating_status(
            async {
                tokio::time::sleep(Duration::from_millis(4000)).await;
                42
            },
            &reporter,
            DEFAULT_STATUS_INTERVAL,
        )
        .await;

        assert_eq!(output, 42);
        assert_eq!(*seen.lock().unwrap(), ANALYSIS_STATUSES[..3].to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn test_statuses_wrap_around() {
        let seen = Mutex::new(Vec::new());
        let reporter = |status: &str| seen.lock().unwrap().push(status.to_string());

        with_rotating_status(
            tokio::time::sleep(Duration::from_millis(550)),
            &reporter,
            Duration::from_millis(100),
        )
        .await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[5], ANALYSIS_STATUSES[0]);
    }

    #[tokio::test]
    async fn test_immediate_completion_reports_once() {
        let seen = Mutex::new(Vec::new());
        let reporter = |status: &str| seen.lock().unwrap().push(status.to_string());

        with_rotating_status(async {}, &reporter, DEFAULT_STATUS_INTERVAL).await;

        assert_eq!(*seen.lock().unwrap(), vec![ANALYSIS_STATUSES[0].to_string()]);
    }
}
