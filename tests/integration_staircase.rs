//! Integration tests for the up/down staircase.
//!
//! Purpose
//! -------
//! - Validate complete staircase runs on the linear and log10 scales against
//!   recorded stimulus sequences, including step-size changes at reversals,
//!   clamping and termination.
//!
//! Coverage
//! --------
//! - `staircase::Staircase`:
//!   - Initial 1-up/1-down rule, 1-up/3-down rule afterwards, step-size
//!     schedule and the stop signal from `update`.
//! - `staircase::StaircaseOptions`:
//!   - Bounds, reversal target and scale settings.
//!
//! Exclusions
//! ----------
//! - Validation branches and single-step behavior are covered by unit tests.
use approx::assert_relative_eq;
use psydapt::{
    procedure::Scale,
    staircase::{Staircase, StaircaseError, StaircaseOptions},
};

const RESPONSES: [usize; 20] = [1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1];

/// Purpose
/// -------
/// 20-trial 1-up/3-down staircase starting at 0.8, bounded to [0, 1], with
/// the initial rule and a target of four reversals.
fn bounded_options(step_sizes: Vec<f64>, stim_scale: Scale) -> StaircaseOptions {
    StaircaseOptions {
        stim_scale,
        n_reversals: Some(4),
        min_val: Some(0.0),
        max_val: Some(1.0),
        ..StaircaseOptions::new(0.8, step_sizes, 20, 1, 3, true)
    }
}

/// Purpose
/// -------
/// Feed `RESPONSES` into `sc` and return the presented stimuli and the
/// continue flags reported by `update`.
fn run(sc: &mut Staircase) -> (Vec<f64>, Vec<bool>) {
    let mut stimuli = Vec::with_capacity(RESPONSES.len());
    let mut flags = Vec::with_capacity(RESPONSES.len());
    for &response in RESPONSES.iter() {
        let stim = sc.next().expect("next should succeed");
        flags.push(sc.update(response, Some(stim)).expect("update should succeed"));
        stimuli.push(stim);
    }
    (stimuli, flags)
}

#[test]
// Purpose
// -------
// Pin a linear staircase with a three-entry step schedule.
//
// Given
// -----
// - Steps [0.1, 0.01, 0.001] on the linear scale and `RESPONSES`.
//
// Expect
// ------
// - The recorded stimulus sequence.
// - `update` returns `true` for the first 19 trials and `false` on the 20th.
// - Calls after the stop return `Finished`.
fn linear_staircase_follows_reference_trace() {
    // Arrange
    let mut sc = Staircase::new(bounded_options(vec![0.1, 0.01, 0.001], Scale::Linear))
        .expect("valid staircase");
    let expected = [
        0.8, 0.7, 0.6, 0.5, 0.4, 0.41, 0.42, 0.43, 0.44, 0.44, 0.44, 0.439, 0.439, 0.44, 0.441,
        0.442, 0.443, 0.443, 0.443, 0.442,
    ];

    // Act
    let (stimuli, flags) = run(&mut sc);

    // Assert
    for (got, want) in stimuli.iter().zip(expected.iter()) {
        assert_relative_eq!(*got, *want, epsilon = 1e-9);
    }
    assert!(flags[..19].iter().all(|&f| f));
    assert!(!flags[19]);
    assert!(sc.is_finished());
    assert!(sc.reversal_count() >= 4);
    assert_eq!(sc.next(), Err(StaircaseError::Finished));
    assert_eq!(sc.update(1, Some(0.5)), Err(StaircaseError::Finished));
    assert_eq!(sc.history().len(), 20);
}

#[test]
// Purpose
// -------
// Pin a log10 staircase, where steps multiply the stimulus by powers of ten.
//
// Given
// -----
// - Steps [0.02, 0.01, 0.01, 0.005] on the log10 scale and `RESPONSES`.
//
// Expect
// ------
// - The recorded stimulus sequence to within 1e-8.
// - The run stops on the 20th trial.
fn log10_staircase_follows_reference_trace() {
    // Arrange
    let mut sc = Staircase::new(bounded_options(vec![0.02, 0.01, 0.01, 0.005], Scale::Log10))
        .expect("valid staircase");
    let expected = [
        0.8,
        0.763994069,
        0.729608671,
        0.696770872,
        0.665411017,
        0.680910431,
        0.696770872,
        0.713000751,
        0.729608671,
        0.729608671,
        0.729608671,
        0.713000751,
        0.713000751,
        0.72125691,
        0.729608671,
        0.738057142,
        0.746603441,
        0.746603441,
        0.746603441,
        0.738057142,
    ];

    // Act
    let (stimuli, flags) = run(&mut sc);

    // Assert
    for (got, want) in stimuli.iter().zip(expected.iter()) {
        assert_relative_eq!(*got, *want, epsilon = 1e-8);
    }
    assert!(flags[..19].iter().all(|&f| f));
    assert!(!flags[19]);
}

#[test]
// Purpose
// -------
// Ensure bounds clamp the staircase.
//
// Given
// -----
// - Start 0.95, step 0.1, max 1.0, initial rule, all responses incorrect.
//
// Expect
// ------
// - The second stimulus is clamped to 1.0 and stays there.
fn staircase_is_clamped_to_max_val() {
    // Arrange
    let options = StaircaseOptions {
        max_val: Some(1.0),
        ..StaircaseOptions::new(0.95, vec![0.1], 5, 1, 3, true)
    };
    let mut sc = Staircase::new(options).expect("valid staircase");

    // Act
    let mut stimuli = Vec::new();
    for _ in 0..4 {
        let stim = sc.next().expect("next should succeed");
        sc.update(0, None).expect("update should succeed");
        stimuli.push(stim);
    }

    // Assert
    assert_relative_eq!(stimuli[0], 0.95);
    assert!(stimuli[1..].iter().all(|&s| s == 1.0));
}
