//! staircase — up/down staircases on linear, log10 and dB scales.
//!
//! Purpose
//! -------
//! Provide the step-based adaptive procedure that shares the
//! [`AdaptiveProcedure`](crate::procedure::AdaptiveProcedure) contract with
//! QUEST+, so experiment code can switch between them freely.
//!
//! Key behaviors
//! -------------
//! - [`StaircaseOptions`] carries the settings (start value, step sizes,
//!   up/down rule, trial and reversal targets, scale, bounds).
//! - [`Staircase`] runs the state machine and decides when to stop.
//!
//! Conventions
//! -----------
//! - Errors are [`StaircaseError`] / [`StaircaseResult`].
//! - Reversals and termination are logged at debug level under the
//!   `staircase` target.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use psydapt::staircase::{Staircase, StaircaseOptions};
//!
//! # fn main() -> Result<(), psydapt::staircase::StaircaseError> {
//! let mut sc = Staircase::new(StaircaseOptions::new(0.8, vec![0.1, 0.01], 20, 1, 3, true))?;
//! let stim = sc.next()?;
//! let keep_going = sc.update(1, Some(stim))?;
//! assert!(keep_going);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod options;
pub mod staircase;

pub use self::errors::{StaircaseError, StaircaseResult};
pub use self::options::StaircaseOptions;
pub use self::staircase::Staircase;
