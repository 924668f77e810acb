use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use jiff::{SignedDuration, Timestamp};
use parking_lot::Mutex;
use serde::Serialize;

/// Cooperative cancellation flag, issued once per solver run.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    is_cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.is_cancelled.store(true, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SolveProgress {
    pub calculations: u64,
    pub elapsed: SignedDuration,
}

impl SolveProgress {
    pub fn calculations_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.calculations as f64 / seconds
        } else {
            0.0
        }
    }
}

type ProgressHandler = Arc<Mutex<dyn FnMut(&SolveProgress) + Send + 'static>>;

pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1 << 22;

/// Everything a solver run needs besides the matrix: the cancellation token,
/// the calculation counter and an optional progress handler.
#[derive(Clone)]
pub struct SolveContext {
    token: CancellationToken,
    calculations: Arc<AtomicU64>,
    progress_interval: u64,
    on_progress_handler: Option<ProgressHandler>,
}

impl SolveContext {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            calculations: Arc::new(AtomicU64::new(0)),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            on_progress_handler: None,
        }
    }

    /// Calls the progress handler every `interval` calculations.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    pub fn on_progress<F>(&mut self, callback: F)
    where
        F: FnMut(&SolveProgress) + Send + 'static,
    {
        self.on_progress_handler = Some(Arc::new(Mutex::new(callback)));
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    #[inline(always)]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Calculations published by the solver so far. Updated at every progress
    /// interval and exact once the run is over.
    pub fn calculations(&self) -> u64 {
        self.calculations.load(Ordering::Relaxed)
    }

    pub(crate) fn progress_reporter(&self) -> ProgressReporter<'_> {
        ProgressReporter {
            context: self,
            started: Timestamp::now(),
            next_report: self.progress_interval,
        }
    }
}

impl Default for SolveContext {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}

/// Publishes the calculation count of a running solver.
pub(crate) struct ProgressReporter<'a> {
    context: &'a SolveContext,
    started: Timestamp,
    next_report: u64,
}

impl ProgressReporter<'_> {
    #[inline(always)]
    pub fn tick(&mut self, calculations: u64) {
        if calculations >= self.next_report {
            self.report(calculations);
        }
    }

    #[cold]
    fn report(&mut self, calculations: u64) {
        self.next_report = calculations + self.context.progress_interval;
        self.context
            .calculations
            .store(calculations, Ordering::Relaxed);

        if let Some(handler) = &self.context.on_progress_handler {
            let progress = SolveProgress {
                calculations,
                elapsed: Timestamp::now().duration_since(self.started),
            };
            handler.lock()(&progress);
        }
    }

    pub fn finish(self, calculations: u64) {
        self.context
            .calculations
            .store(calculations, Ordering::Relaxed);
    }
}
