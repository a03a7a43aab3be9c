//! Up/down staircase state machine.
//!
//! Purpose
//! -------
//! Implement the classic transformed up/down staircase (PsychoPy's
//! `StairHandler` semantics): step the stimulus down after `n_down`
//! consecutive correct responses, up after `n_up` consecutive incorrect
//! ones, count direction changes as reversals, and stop once both the trial
//! and the reversal targets are met.
//!
//! Key behaviors
//! -------------
//! - The first `next()` returns `start_val`.
//! - With `apply_initial_rule`, every trial before the first reversal steps
//!   by the last response alone (1-up/1-down).
//! - With several step sizes, the step in use after `k` reversals is
//!   `step_sizes[min(k, len − 1)]`.
//! - Steps are additive on the linear scale and multiplicative on log10/dB
//!   scales; the result is clamped to `max_val` when stepping up and to
//!   `min_val` when stepping down.
//!
//! Invariants & assumptions
//! ------------------------
//! - `correct_count > 0` counts consecutive correct responses, `< 0`
//!   consecutive incorrect ones; it resets to 0 after every step.
//! - `next()` mutates the state only once per trial: repeated calls without
//!   an `update` return the same value.
//! - Once finished, `next()` and `update()` return
//!   `StaircaseError::Finished`.

use crate::{
    procedure::{AdaptiveProcedure, TrialHistory},
    staircase::{
        errors::{StaircaseError, StaircaseResult},
        options::StaircaseOptions,
    },
};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Initial,
    Up,
    Down,
}

/// Staircase — a running up/down staircase.
///
/// Fields
/// ------
/// - `options`: validated settings.
/// - `required_reversals`: effective reversal target.
/// - `step_size`: step currently in use.
/// - `next_stimulus`: value returned by the most recent `next()`.
/// - `correct_count`: signed run length of identical responses.
/// - `pending`: a stimulus has been handed out and not yet answered.
#[derive(Debug, Clone)]
pub struct Staircase {
    options: StaircaseOptions,
    required_reversals: usize,
    step_size: f64,
    next_stimulus: f64,
    history: TrialHistory<f64>,
    reversal_count: usize,
    correct_count: i64,
    direction: Direction,
    pending: bool,
    finished: bool,
}

impl Staircase {
    /// Validate `options` and start a staircase at `start_val`.
    ///
    /// Errors
    /// ------
    /// - Any error of [`StaircaseOptions::validate`].
    pub fn new(options: StaircaseOptions) -> StaircaseResult<Self> {
        options.validate()?;
        let required_reversals = options.required_reversals();
        Ok(Staircase {
            required_reversals,
            step_size: options.step_sizes[0],
            next_stimulus: options.start_val,
            history: TrialHistory::with_capacity(options.n_trials),
            reversal_count: 0,
            correct_count: 0,
            direction: Direction::Initial,
            pending: false,
            finished: false,
            options,
        })
    }

    pub fn options(&self) -> &StaircaseOptions {
        &self.options
    }

    pub fn history(&self) -> &TrialHistory<f64> {
        &self.history
    }

    pub fn reversal_count(&self) -> usize {
        self.reversal_count
    }

    pub fn required_reversals(&self) -> usize {
        self.required_reversals
    }

    /// Step size currently in use.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Compute the stimulus for the upcoming trial.
    ///
    /// Errors
    /// ------
    /// - `StaircaseError::Finished` once the stopping criteria were met.
    pub fn next(&mut self) -> StaircaseResult<f64> {
        if self.finished {
            return Err(StaircaseError::Finished);
        }
        if self.pending || self.history.is_empty() {
            self.pending = true;
            return Ok(self.next_stimulus);
        }

        let last_correct = self.history.response_back(0) == Some(1);
        let n_down = self.options.n_down as i64;
        let n_up = self.options.n_up as i64;

        let initial_rule = self.reversal_count == 0 && self.options.apply_initial_rule;
        let mut reversal = false;
        if initial_rule {
            if last_correct {
                reversal = self.direction == Direction::Up;
                self.direction = Direction::Down;
            } else {
                reversal = self.direction == Direction::Down;
                self.direction = Direction::Up;
            }
        } else if self.correct_count >= n_down {
            reversal = self.direction == Direction::Up;
            self.direction = Direction::Down;
        } else if self.correct_count <= -n_up {
            reversal = self.direction == Direction::Down;
            self.direction = Direction::Up;
        }

        if reversal {
            self.reversal_count += 1;
            let steps = &self.options.step_sizes;
            self.step_size = steps[self.reversal_count.min(steps.len() - 1)];
            debug!(
                target: "staircase",
                reversals = self.reversal_count,
                step_size = self.step_size,
                at = self.next_stimulus,
                "reversal"
            );
        }

        if initial_rule {
            self.step(if last_correct { -1.0 } else { 1.0 });
        } else if self.correct_count >= n_down {
            self.step(-1.0);
        } else if self.correct_count <= -n_up {
            self.step(1.0);
        }

        self.pending = true;
        Ok(self.next_stimulus)
    }

    /// Record a response and report whether the staircase continues.
    ///
    /// Parameters
    /// ----------
    /// - `response`: `usize`
    ///   `0` = incorrect, `1` = correct.
    /// - `stimulus`: `Option<f64>`
    ///   Presented value; `None` records the last value from `next()`.
    ///
    /// Returns
    /// -------
    /// `StaircaseResult<bool>`
    ///   `Ok(false)` once at least `required_reversals` reversals and
    ///   `n_trials` trials have been recorded.
    ///
    /// Errors
    /// ------
    /// - `StaircaseError::InvalidResponse` if `response > 1`.
    /// - `StaircaseError::Finished` if the staircase had already finished.
    pub fn update(&mut self, response: usize, stimulus: Option<f64>) -> StaircaseResult<bool> {
        if response > 1 {
            return Err(StaircaseError::InvalidResponse { response });
        }
        if self.finished {
            return Err(StaircaseError::Finished);
        }

        self.history.push(stimulus.unwrap_or(self.next_stimulus), response);
        let repeated = self.history.response_back(1) == Some(response);
        self.correct_count = match (response, repeated) {
            (1, true) => self.correct_count + 1,
            (1, false) => 1,
            (_, true) => self.correct_count - 1,
            (_, false) => -1,
        };
        self.pending = false;

        trace!(
            target: "staircase",
            trial = self.history.len(),
            response,
            correct_count = self.correct_count,
            "staircase updated"
        );

        if self.reversal_count >= self.required_reversals
            && self.history.len() >= self.options.n_trials
        {
            self.finished = true;
            debug!(
                target: "staircase",
                trials = self.history.len(),
                reversals = self.reversal_count,
                "staircase finished"
            );
        }
        Ok(!self.finished)
    }

    fn step(&mut self, sign: f64) {
        let mut value = self.options.stim_scale.apply_step(self.next_stimulus, sign * self.step_size);
        if sign > 0.0 {
            if let Some(max) = self.options.max_val {
                value = value.min(max);
            }
        } else if let Some(min) = self.options.min_val {
            value = value.max(min);
        }
        self.next_stimulus = value;
        self.correct_count = 0;
    }
}

impl AdaptiveProcedure for Staircase {
    type Stimulus = f64;
    type Error = StaircaseError;

    fn next(&mut self) -> StaircaseResult<f64> {
        Staircase::next(self)
    }

    fn update(&mut self, response: usize, stimulus: Option<f64>) -> StaircaseResult<bool> {
        Staircase::update(self, response, stimulus)
    }
}
