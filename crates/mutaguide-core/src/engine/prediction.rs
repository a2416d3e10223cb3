use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::models::alignment::Sequence;
use crate::core::models::prediction::Prediction;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};

/// A failure at the transport boundary: network errors, malformed predictor
/// pages, anything the transport could not turn into a typed reply.
///
/// Kept distinct from [`EngineError::PredictionTimeout`] so callers can
/// message "service unreachable" and "try again later" differently.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Opaque handle to one outstanding prediction request. The client holds no
/// state about the job beyond this handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Completed,
}

/// The three-operation contract the engine requires from an external
/// predictor. Page scraping, request encoding, and every other wire-level
/// concern stay behind this seam.
pub trait PredictionTransport {
    fn submit(&self, sequence: &str) -> Result<JobHandle, TransportError>;

    fn check_status(&self, job: &JobHandle) -> Result<JobStatus, TransportError>;

    fn fetch_result(&self, job: &JobHandle) -> Result<Prediction, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Elapsed,
    Cancelled,
}

/// An injectable wait between status checks, so tests can simulate elapsed
/// time and callers can cancel without waiting out the interval.
pub trait Delay {
    fn wait(&self, interval: Duration) -> WaitOutcome;
}

/// Shared cancellation handle for [`CancellableDelay`]. Cloning yields a
/// handle to the same flag; cancelling wakes any in-progress wait.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap_or_else(|e| e.into_inner());
        *cancelled = true;
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Condvar-backed sleep that returns early when its [`CancelFlag`] fires.
/// Never busy-waits.
#[derive(Debug, Clone)]
pub struct CancellableDelay {
    flag: CancelFlag,
}

impl CancellableDelay {
    pub fn new(flag: CancelFlag) -> Self {
        Self { flag }
    }
}

impl Delay for CancellableDelay {
    fn wait(&self, interval: Duration) -> WaitOutcome {
        let (lock, cvar) = &*self.flag.inner;
        let deadline = Instant::now() + interval;
        let mut cancelled = lock.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if *cancelled {
                return WaitOutcome::Cancelled;
            }
            let now = Instant::now();
            if now >= deadline {
                return WaitOutcome::Elapsed;
            }
            let (guard, _) = cvar
                .wait_timeout(cancelled, deadline - now)
                .unwrap_or_else(|e| e.into_inner());
            cancelled = guard;
        }
    }
}

/// Lifecycle of one prediction job as seen by the client. There is no
/// transition out of `Completed` or `TimedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Submitted,
    Queued,
    Completed,
    TimedOut,
}

/// Bounds on the poll loop: one fixed interval between status checks and a
/// hard ceiling on the number of checks. The ceiling guarantees termination;
/// with the defaults the worst-case wait is 9 intervals of 120 s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_checks: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(120),
            max_checks: 10,
        }
    }
}

/// Drives the submit/poll/fetch cycle against an asynchronous predictor.
///
/// The first status check happens immediately after submission; each further
/// check is preceded by one interval wait, up to the configured ceiling.
pub struct PredictionClient<'a, T: PredictionTransport, D: Delay> {
    transport: &'a T,
    delay: &'a D,
    config: PollConfig,
}

impl<'a, T: PredictionTransport, D: Delay> PredictionClient<'a, T, D> {
    pub fn new(transport: &'a T, delay: &'a D, config: PollConfig) -> Self {
        Self {
            transport,
            delay,
            config,
        }
    }

    /// Obtains per-position structure labels and accessibility values for the
    /// full `sequence`, waiting out the predictor's queue within the poll
    /// budget.
    pub fn fetch_predictions(
        &self,
        sequence: &Sequence,
        reporter: &ProgressReporter,
    ) -> Result<Prediction, EngineError> {
        let job = self.transport.submit(&sequence.to_string())?;
        debug!(job = job.id(), "Prediction job submitted.");

        let mut state = JobState::Submitted;
        for check in 1..=self.config.max_checks {
            if check > 1 && self.delay.wait(self.config.interval) == WaitOutcome::Cancelled {
                info!("Prediction wait cancelled before status check {}.", check);
                return Err(EngineError::Cancelled);
            }

            reporter.report(Progress::PollCheck {
                check,
                max_checks: self.config.max_checks,
            });

            match self.transport.check_status(&job)? {
                JobStatus::Completed => {
                    state = JobState::Completed;
                    debug!(check, "Predictor reported completion.");
                    break;
                }
                JobStatus::Queued => {
                    state = JobState::Queued;
                    debug!(check, "Predictor still queued.");
                }
            }
        }

        if state != JobState::Completed {
            warn!(
                checks = self.config.max_checks,
                "Poll budget exhausted without completion."
            );
            return Err(EngineError::PredictionTimeout {
                checks: self.config.max_checks,
            });
        }

        let prediction = self.transport.fetch_result(&job)?;
        validate_prediction_lengths(&prediction, sequence.len())?;
        Ok(prediction)
    }
}

fn validate_prediction_lengths(
    prediction: &Prediction,
    expected: usize,
) -> Result<(), EngineError> {
    if prediction.structure.len() != expected {
        return Err(EngineError::MalformedPrediction {
            field: "structure labels",
            expected,
            found: prediction.structure.len(),
        });
    }
    if prediction.accessibility.len() != expected {
        return Err(EngineError::MalformedPrediction {
            field: "accessibility values",
            expected,
            found: prediction.accessibility.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    struct ScriptedTransport {
        statuses: RefCell<VecDeque<JobStatus>>,
        result: Prediction,
        status_checks: Cell<u32>,
        fail_submit: bool,
    }

    impl ScriptedTransport {
        fn new(statuses: Vec<JobStatus>, result: Prediction) -> Self {
            Self {
                statuses: RefCell::new(statuses.into()),
                result,
                status_checks: Cell::new(0),
                fail_submit: false,
            }
        }

        fn always_queued(result: Prediction) -> Self {
            Self::new(Vec::new(), result)
        }
    }

    impl PredictionTransport for ScriptedTransport {
        fn submit(&self, _sequence: &str) -> Result<JobHandle, TransportError> {
            if self.fail_submit {
                return Err(TransportError::new("connection refused"));
            }
            Ok(JobHandle::new("job-1"))
        }

        fn check_status(&self, _job: &JobHandle) -> Result<JobStatus, TransportError> {
            self.status_checks.set(self.status_checks.get() + 1);
            Ok(self
                .statuses
                .borrow_mut()
                .pop_front()
                .unwrap_or(JobStatus::Queued))
        }

        fn fetch_result(&self, _job: &JobHandle) -> Result<Prediction, TransportError> {
            Ok(self.result.clone())
        }
    }

    struct RecordingDelay {
        waits: RefCell<Vec<Duration>>,
        outcome: WaitOutcome,
    }

    impl RecordingDelay {
        fn elapsing() -> Self {
            Self {
                waits: RefCell::new(Vec::new()),
                outcome: WaitOutcome::Elapsed,
            }
        }

        fn cancelling() -> Self {
            Self {
                waits: RefCell::new(Vec::new()),
                outcome: WaitOutcome::Cancelled,
            }
        }

        fn wait_count(&self) -> usize {
            self.waits.borrow().len()
        }
    }

    impl Delay for RecordingDelay {
        fn wait(&self, interval: Duration) -> WaitOutcome {
            self.waits.borrow_mut().push(interval);
            self.outcome
        }
    }

    fn test_prediction(len: usize) -> Prediction {
        Prediction::from_codes(&"C".repeat(len), vec![0.5; len])
    }

    fn fast_config() -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(1),
            max_checks: 10,
        }
    }

    #[test]
    fn immediate_completion_short_circuits_the_poll_loop() {
        let transport =
            ScriptedTransport::new(vec![JobStatus::Completed], test_prediction(4));
        let delay = RecordingDelay::elapsing();
        let client = PredictionClient::new(&transport, &delay, fast_config());

        let prediction = client
            .fetch_predictions(&Sequence::new("ACDE"), &ProgressReporter::new())
            .unwrap();

        assert_eq!(prediction.structure.len(), 4);
        assert_eq!(transport.status_checks.get(), 1);
        assert_eq!(delay.wait_count(), 0);
    }

    #[test]
    fn always_queued_times_out_after_ten_checks_and_nine_waits() {
        let transport = ScriptedTransport::always_queued(test_prediction(4));
        let delay = RecordingDelay::elapsing();
        let client = PredictionClient::new(&transport, &delay, fast_config());

        let err = client
            .fetch_predictions(&Sequence::new("ACDE"), &ProgressReporter::new())
            .unwrap_err();

        assert!(matches!(err, EngineError::PredictionTimeout { checks: 10 }));
        assert_eq!(transport.status_checks.get(), 10);
        assert_eq!(delay.wait_count(), 9);
    }

    #[test]
    fn mid_poll_completion_stops_checking() {
        let transport = ScriptedTransport::new(
            vec![
                JobStatus::Queued,
                JobStatus::Queued,
                JobStatus::Queued,
                JobStatus::Completed,
            ],
            test_prediction(4),
        );
        let delay = RecordingDelay::elapsing();
        let client = PredictionClient::new(&transport, &delay, fast_config());

        client
            .fetch_predictions(&Sequence::new("ACDE"), &ProgressReporter::new())
            .unwrap();

        assert_eq!(transport.status_checks.get(), 4);
        assert_eq!(delay.wait_count(), 3);
    }

    #[test]
    fn submit_failure_is_a_transport_error() {
        let mut transport = ScriptedTransport::always_queued(test_prediction(4));
        transport.fail_submit = true;
        let delay = RecordingDelay::elapsing();
        let client = PredictionClient::new(&transport, &delay, fast_config());

        let err = client
            .fetch_predictions(&Sequence::new("ACDE"), &ProgressReporter::new())
            .unwrap_err();

        assert!(matches!(err, EngineError::Transport { .. }));
        assert_eq!(transport.status_checks.get(), 0);
    }

    #[test]
    fn cancellation_during_a_wait_aborts_before_the_next_check() {
        let transport = ScriptedTransport::always_queued(test_prediction(4));
        let delay = RecordingDelay::cancelling();
        let client = PredictionClient::new(&transport, &delay, fast_config());

        let err = client
            .fetch_predictions(&Sequence::new("ACDE"), &ProgressReporter::new())
            .unwrap_err();

        assert!(matches!(err, EngineError::Cancelled));
        assert_eq!(transport.status_checks.get(), 1);
        assert_eq!(delay.wait_count(), 1);
    }

    #[test]
    fn length_mismatch_is_a_malformed_prediction() {
        let transport =
            ScriptedTransport::new(vec![JobStatus::Completed], test_prediction(3));
        let delay = RecordingDelay::elapsing();
        let client = PredictionClient::new(&transport, &delay, fast_config());

        let err = client
            .fetch_predictions(&Sequence::new("ACDE"), &ProgressReporter::new())
            .unwrap_err();

        assert!(matches!(
            err,
            EngineError::MalformedPrediction {
                expected: 4,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn poll_checks_are_reported_in_order() {
        let transport = ScriptedTransport::new(
            vec![JobStatus::Queued, JobStatus::Completed],
            test_prediction(4),
        );
        let delay = RecordingDelay::elapsing();
        let client = PredictionClient::new(&transport, &delay, fast_config());

        let seen = std::sync::Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PollCheck { check, .. } = event {
                seen.lock().unwrap().push(check);
            }
        }));

        client
            .fetch_predictions(&Sequence::new("ACDE"), &reporter)
            .unwrap();
        drop(reporter);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn cancel_flag_wakes_a_pending_wait() {
        let flag = CancelFlag::new();
        let delay = CancellableDelay::new(flag.clone());

        let handle = std::thread::spawn(move || delay.wait(Duration::from_secs(60)));
        // Give the waiter a moment to park on the condvar.
        std::thread::sleep(Duration::from_millis(20));
        flag.cancel();

        assert_eq!(handle.join().unwrap(), WaitOutcome::Cancelled);
        assert!(flag.is_cancelled());
    }

    #[test]
    fn uncancelled_delay_elapses() {
        let delay = CancellableDelay::new(CancelFlag::new());
        assert_eq!(delay.wait(Duration::from_millis(5)), WaitOutcome::Elapsed);
    }
}
