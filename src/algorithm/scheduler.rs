//! Timer-driven fill loop
//!
//! Every tick checks for completion and otherwise dispatches one candidate
//! acquisition as its own task. The timer never waits on an acquisition, so
//! slow sources leave several candidates in flight. Each candidate scans the
//! grid under the grid lock, which keeps check-then-set atomic per cell.

use crate::algorithm::assignment::{RepeatPolicy, assign_candidate};
use crate::algorithm::completion::{FillProgress, is_complete};
use crate::analysis::reducer::ColorReducer;
use crate::io::configuration::MosaicConfig;
use crate::io::error::{FailureKind, MosaicError, Result, invalid_parameter};
use crate::io::source::CandidateSource;
use crate::math::color::Rgb;
use crate::math::distance::ColorMatcher;
use crate::spatial::cell::{Assignment, SourceRef};
use crate::spatial::grid::MosaicGrid;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::{Semaphore, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Lifecycle of a fill run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillState {
    /// Ticks are being scheduled
    Running,
    /// Every cell is filled
    Complete,
    /// Stopped on request before completion
    Stopped,
}

/// What happened to one dispatched candidate
#[derive(Debug)]
pub enum CandidateOutcome {
    /// Candidate filled at least one cell
    Placed {
        /// Dominant color of the candidate
        color: Rgb,
        /// Cells filled, in scan order
        assignments: Vec<Assignment>,
    },
    /// No empty cell matched the candidate
    Unmatched {
        /// Dominant color of the candidate
        color: Rgb,
    },
    /// Candidate arrived after the run ended or duplicated a used source
    Discarded {
        /// Source of the dropped candidate
        source: SourceRef,
    },
    /// Acquisition or reduction failed; the grid was not touched
    Failed(MosaicError),
}

impl CandidateOutcome {
    /// Cells filled by this candidate
    pub fn assignments(&self) -> &[Assignment] {
        match self {
            Self::Placed { assignments, .. } => assignments,
            _ => &[],
        }
    }
}

/// Result of a single scheduler tick
#[derive(Debug)]
pub enum Tick {
    /// Grid is complete; no acquisition was issued
    Complete,
    /// Run was stopped; no acquisition was issued
    Stopped,
    /// Admission gate was full; this tick was skipped
    Saturated,
    /// A candidate acquisition is in flight
    Dispatched(JoinHandle<CandidateOutcome>),
}

/// Counters and final state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Terminal state
    pub state: FillState,
    /// Wall time spent in `run`
    pub elapsed: Duration,
    /// Ticks taken, including the terminal one
    pub ticks: usize,
    /// Acquisitions dispatched
    pub dispatched: usize,
    /// Candidates lost to acquisition failures
    pub acquisition_failures: usize,
    /// Candidates lost to reduction failures
    pub reduction_failures: usize,
    /// Candidates that matched no empty cell
    pub unmatched: usize,
    /// Candidates dropped without scanning
    pub discarded: usize,
    /// Cells filled
    pub assignments: usize,
    /// Grid fill level at the end of the run
    pub progress: FillProgress,
}

#[derive(Debug, Default)]
struct Counters {
    ticks: AtomicUsize,
    dispatched: AtomicUsize,
    acquisition_failures: AtomicUsize,
    reduction_failures: AtomicUsize,
    unmatched: AtomicUsize,
    discarded: AtomicUsize,
    assignments: AtomicUsize,
}

fn bump(counter: &AtomicUsize, by: usize) {
    counter.fetch_add(by, Ordering::Relaxed);
}

// State shared with in-flight candidate tasks
struct Session {
    grid: Mutex<MosaicGrid>,
    matcher: ColorMatcher,
    reducer: ColorReducer,
    policy: RepeatPolicy,
    unique_sources: bool,
    finished: AtomicBool,
    listeners: Mutex<Vec<mpsc::UnboundedSender<Assignment>>>,
    counters: Counters,
}

impl Session {
    fn lock_grid(&self) -> MutexGuard<'_, MosaicGrid> {
        self.grid.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn process(&self, source: &dyn CandidateSource) -> CandidateOutcome {
        let candidate = match source.acquire().await {
            Ok(candidate) => candidate,
            Err(error) => return self.fail(error),
        };

        if self.finished.load(Ordering::Acquire) {
            return self.discard(candidate.source, "run already finished");
        }

        let color = match self.reducer.reduce(&candidate.image) {
            Ok(color) => color,
            Err(error) => return self.fail(error),
        };

        let assignments = {
            let mut grid = self.lock_grid();
            if self.finished.load(Ordering::Acquire) || is_complete(&grid) {
                drop(grid);
                return self.discard(candidate.source, "grid already complete");
            }
            if self.unique_sources && grid.contains_source(&candidate.source) {
                drop(grid);
                return self.discard(candidate.source, "source already placed");
            }
            assign_candidate(
                &mut grid,
                color,
                &candidate.source,
                &self.matcher,
                self.policy,
            )
        };

        if assignments.is_empty() {
            bump(&self.counters.unmatched, 1);
            tracing::trace!(source = %candidate.source, %color, "Candidate matched no empty cell");
            return CandidateOutcome::Unmatched { color };
        }

        bump(&self.counters.assignments, assignments.len());
        for assignment in &assignments {
            tracing::debug!(
                row = assignment.row,
                col = assignment.col,
                source = %assignment.source,
                %color,
                "Filled cell"
            );
        }
        self.publish(&assignments);

        CandidateOutcome::Placed { color, assignments }
    }

    fn fail(&self, error: MosaicError) -> CandidateOutcome {
        match error.kind() {
            FailureKind::Acquisition => {
                bump(&self.counters.acquisition_failures, 1);
                tracing::debug!(error = %error, "Candidate acquisition failed");
            }
            _ => {
                bump(&self.counters.reduction_failures, 1);
                tracing::warn!(error = %error, "Candidate reduction failed");
            }
        }
        CandidateOutcome::Failed(error)
    }

    fn discard(&self, source: SourceRef, reason: &'static str) -> CandidateOutcome {
        bump(&self.counters.discarded, 1);
        tracing::trace!(source = %source, reason, "Discarding candidate");
        CandidateOutcome::Discarded { source }
    }

    fn publish(&self, assignments: &[Assignment]) {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|listener| {
            assignments
                .iter()
                .all(|assignment| listener.send(assignment.clone()).is_ok())
        });
    }
}

/// Cloneable handle that ends a run from elsewhere
#[derive(Debug, Clone)]
pub struct StopHandle {
    stop: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// Request the run to stop at its next tick
    pub fn stop(&self) {
        self.stop.send_replace(true);
    }
}

/// Owns one mosaic run: grid, matching parameters and the candidate source
pub struct FillScheduler {
    session: Arc<Session>,
    source: Arc<dyn CandidateSource>,
    tick_interval: Duration,
    admission: Option<Arc<Semaphore>>,
    state: watch::Sender<FillState>,
    stop: Arc<watch::Sender<bool>>,
}

impl FillScheduler {
    /// Create a scheduler over an empty grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration fails validation
    /// - The grid size differs from the configured outer resolution
    pub fn new(
        grid: MosaicGrid,
        source: Arc<dyn CandidateSource>,
        config: &MosaicConfig,
    ) -> Result<Self> {
        config.validate()?;
        if grid.size() != config.outer_resolution {
            return Err(invalid_parameter(
                "outer_resolution",
                &config.outer_resolution,
                &format!("grid has {} cells per side", grid.size()),
            ));
        }

        let matcher = ColorMatcher::new(config.tolerance)?;
        let reducer =
            ColorReducer::new(config.inner_resolution())?.with_min_dominance(config.min_dominance)?;

        let session = Session {
            grid: Mutex::new(grid),
            matcher,
            reducer,
            policy: RepeatPolicy::from_allow_repeats(config.allow_repeats),
            unique_sources: config.unique_sources,
            finished: AtomicBool::new(false),
            listeners: Mutex::new(Vec::new()),
            counters: Counters::default(),
        };

        Ok(Self {
            session: Arc::new(session),
            source,
            tick_interval: config.tick_interval,
            admission: config.max_in_flight.map(|n| Arc::new(Semaphore::new(n))),
            state: watch::channel(FillState::Running).0,
            stop: Arc::new(watch::channel(false).0),
        })
    }

    /// Receive every assignment made from now on
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<Assignment> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.session
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Current lifecycle state
    pub fn state(&self) -> FillState {
        *self.state.borrow()
    }

    /// Observe lifecycle changes
    pub fn watch_state(&self) -> watch::Receiver<FillState> {
        self.state.subscribe()
    }

    /// Handle for stopping the run from another task
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            stop: Arc::clone(&self.stop),
        }
    }

    /// Request the run to stop at its next tick
    pub fn stop(&self) {
        self.stop.send_replace(true);
    }

    /// Current fill level
    pub fn progress(&self) -> FillProgress {
        FillProgress::of(&self.session.lock_grid())
    }

    /// Copy of the grid as it stands
    pub fn snapshot(&self) -> MosaicGrid {
        self.session.lock_grid().clone()
    }

    /// Run one scheduling step
    ///
    /// Must be called from within a tokio runtime when the grid is incomplete.
    pub fn tick(&self) -> Tick {
        bump(&self.session.counters.ticks, 1);

        match self.state() {
            FillState::Complete => return Tick::Complete,
            FillState::Stopped => return Tick::Stopped,
            FillState::Running => {}
        }

        // A full grid is complete even if a stop was requested meanwhile
        if is_complete(&self.session.lock_grid()) {
            self.finish(FillState::Complete);
            return Tick::Complete;
        }

        if *self.stop.borrow() {
            self.finish(FillState::Stopped);
            return Tick::Stopped;
        }

        let permit = match &self.admission {
            Some(gate) => {
                if let Ok(permit) = Arc::clone(gate).try_acquire_owned() {
                    Some(permit)
                } else {
                    tracing::trace!("All acquisition slots busy, skipping tick");
                    return Tick::Saturated;
                }
            }
            None => None,
        };

        bump(&self.session.counters.dispatched, 1);
        let session = Arc::clone(&self.session);
        let source = Arc::clone(&self.source);
        Tick::Dispatched(tokio::spawn(async move {
            let outcome = session.process(source.as_ref()).await;
            drop(permit);
            outcome
        }))
    }

    /// Tick at the configured interval until the grid completes or a stop is requested
    pub async fn run(&self) -> RunSummary {
        let started = Instant::now();
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut stop_requests = self.stop.subscribe();

        let progress = self.progress();
        tracing::info!(
            cells = progress.total,
            filled = progress.filled,
            interval_ms = self.tick_interval.as_millis() as u64,
            "Starting mosaic fill"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = stop_requests.changed() => {}
            }

            match self.tick() {
                Tick::Complete | Tick::Stopped => break,
                Tick::Saturated | Tick::Dispatched(_) => {}
            }
        }

        let summary = self.summary(started.elapsed());
        tracing::info!(
            state = ?summary.state,
            ticks = summary.ticks,
            assignments = summary.assignments,
            failures = summary.acquisition_failures + summary.reduction_failures,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Mosaic fill finished"
        );
        summary
    }

    /// Counters collected so far
    pub fn summary(&self, elapsed: Duration) -> RunSummary {
        let counters = &self.session.counters;
        let load = |counter: &AtomicUsize| counter.load(Ordering::Relaxed);
        RunSummary {
            state: self.state(),
            elapsed,
            ticks: load(&counters.ticks),
            dispatched: load(&counters.dispatched),
            acquisition_failures: load(&counters.acquisition_failures),
            reduction_failures: load(&counters.reduction_failures),
            unmatched: load(&counters.unmatched),
            discarded: load(&counters.discarded),
            assignments: load(&counters.assignments),
            progress: self.progress(),
        }
    }

    fn finish(&self, state: FillState) {
        self.session.finished.store(true, Ordering::Release);
        self.state.send_replace(state);
        tracing::debug!(?state, "Fill scheduler left running state");
    }
}
