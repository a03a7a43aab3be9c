//! procedure — the two-method contract shared by every adaptive procedure.
//!
//! Purpose
//! -------
//! Define the uniform interface through which experiment code drives an
//! adaptive procedure trial by trial, so a staircase and a QUEST+ grid
//! procedure can be swapped without touching the calling loop.
//!
//! Key behaviors
//! -------------
//! - [`AdaptiveProcedure`] exposes `next()` (propose a stimulus) and
//!   `update(response, stimulus)` (record the outcome, report whether to
//!   continue).
//! - [`Stimulus`] abstracts over scalar (`f64`) and fixed-size vector
//!   (`[f64; N]`) stimuli.
//! - [`Scale`] is the stimulus-scale selector shared by grid models and
//!   staircases.
//! - [`TrialHistory`] is the append-only (stimulus, response) log every
//!   procedure keeps.
//!
//! Invariants & assumptions
//! ------------------------
//! - Exactly one trial is in flight at a time: callers alternate `next` and
//!   `update`. Procedures own all of their mutable state and are not meant to
//!   be shared across threads without external locking.
//! - Responses are outcome indices: `0` = incorrect, `1` = correct.
//!
//! Conventions
//! -----------
//! - When `update` receives `None` for the stimulus, the value most recently
//!   returned by `next` is recorded. Passing `Some(s)` records `s` instead
//!   (e.g. when the display had to round the proposed value).
//! - Termination policy belongs to the procedure for staircases and to the
//!   caller for grid procedures, which always report "continue".
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use psydapt::procedure::AdaptiveProcedure;
//!
//! fn run<P: AdaptiveProcedure>(proc_: &mut P, mut observer: impl FnMut(P::Stimulus) -> usize)
//!     -> Result<usize, P::Error> {
//!     let mut trials = 0;
//!     loop {
//!         let stim = proc_.next()?;
//!         trials += 1;
//!         if !proc_.update(observer(stim), None)? || trials == 100 {
//!             return Ok(trials);
//!         }
//!     }
//! }
//! ```

pub mod history;
pub mod scale;
pub mod stimulus;

pub use self::history::TrialHistory;
pub use self::scale::{Scale, ScaleParseError};
pub use self::stimulus::Stimulus;

/// Trial-by-trial interface of an adaptive procedure.
///
/// Required:
/// - `next(&mut self)`: return the stimulus to present on the upcoming trial.
///   Calling it again before `update` returns the same stimulus.
/// - `update(&mut self, response, stimulus)`: record the participant's
///   response to the presented stimulus (defaulting to the last proposed one)
///   and return `Ok(true)` while the procedure should keep running.
pub trait AdaptiveProcedure {
    type Stimulus: Stimulus;
    type Error: std::error::Error;

    fn next(&mut self) -> Result<Self::Stimulus, Self::Error>;

    fn update(
        &mut self, response: usize, stimulus: Option<Self::Stimulus>,
    ) -> Result<bool, Self::Error>;
}
