//! Integration tests for the QUEST+ procedures.
//!
//! Purpose
//! -------
//! - Validate complete QUEST+ runs through the public API: model
//!   construction, engine setup, stimulus selection and posterior updates
//!   over realistic grids.
//! - Pin the selected-stimulus sequences of fixed response traces so any
//!   change to the likelihood, entropy or tie-breaking arithmetic shows up.
//!
//! Coverage
//! --------
//! - `questplus::models`:
//!   - Weibull on the dB scale, Weibull on the log10 scale and the
//!     three-dimensional CSF model.
//! - `questplus::procedure::QuestPlus`:
//!   - `next`/`update` through the `AdaptiveProcedure` trait, posterior
//!     normalization, determinism, and rejection of invalid responses.
//! - `procedure::AdaptiveProcedure`:
//!   - A generic driver running QUEST+ and a staircase through the same code.
//!
//! Exclusions
//! ----------
//! - Grid-level helpers, prior construction and validation branches are
//!   covered by unit tests.
//! - Python bindings are exercised from the Python side.
use approx::assert_relative_eq;
use psydapt::{
    procedure::{AdaptiveProcedure, Scale},
    questplus::{
        Csf, CsfModel, CsfParams, ParamDomain, QPError, QuestPlusOptions, Weibull, WeibullModel,
        WeibullParams,
    },
    staircase::{Staircase, StaircaseOptions},
};

/// Purpose
/// -------
/// Build `start, start + step, …` with `n` points using integer multiples of
/// `step`, so grid values are exact for dyadic steps.
fn grid(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Purpose
/// -------
/// Weibull model on a 1 dB grid from −40 to 0 dB with a 2AFC-style lower
/// asymptote.
fn weibull_db() -> Weibull {
    let levels = grid(-40.0, 1.0, 41);
    let params = WeibullParams {
        stim_scale: Scale::Decibel,
        slope: ParamDomain::fixed(3.5),
        lower_asymptote: ParamDomain::fixed(0.5),
        lapse_rate: ParamDomain::fixed(0.02),
        ..WeibullParams::new(levels.clone(), levels)
    };
    let model = WeibullModel::new(params).expect("valid Weibull dB model");
    Weibull::new(model, QuestPlusOptions::default()).expect("engine setup should succeed")
}

/// Purpose
/// -------
/// Weibull model on a log10 grid from −3.5 to −0.5 in steps of 0.25 with
/// the default slope, guess and lapse values.
fn weibull_log10() -> Weibull {
    let levels = grid(-3.5, 0.25, 13);
    let model = WeibullModel::new(WeibullParams::new(levels.clone(), levels))
        .expect("valid Weibull log10 model");
    Weibull::new(model, QuestPlusOptions::default()).expect("engine setup should succeed")
}

/// Purpose
/// -------
/// CSF model over contrast (dB), spatial frequency and a single temporal
/// frequency, with free `c0`, `cf` and `min_thresh`.
fn csf_db() -> Csf {
    let params = CsfParams {
        stim_scale: Scale::Decibel,
        slope: ParamDomain::fixed(3.0),
        lower_asymptote: ParamDomain::fixed(0.5),
        lapse_rate: ParamDomain::fixed(0.01),
        ..CsfParams::new(
            grid(-50.0, 2.0, 26),
            grid(0.0, 2.0, 21),
            vec![0.0],
            grid(-60.0, 2.0, 11),
            vec![0.8, 1.0, 1.2, 1.4, 1.6],
            vec![0.0],
            grid(-50.0, 2.0, 11),
        )
    };
    let model = CsfModel::new(params).expect("valid CSF model");
    Csf::new(model, QuestPlusOptions::default()).expect("engine setup should succeed")
}

#[test]
// Purpose
// -------
// Pin the stimulus sequence of a 32-trial Weibull run on the dB scale.
//
// Given
// -----
// - A 41-level dB grid shared by intensity and threshold.
// - A fixed response trace with a handful of errors.
//
// Expect
// ------
// - `next` returns exactly the recorded intensities, trial by trial.
// - The posterior stays a probability distribution throughout.
fn weibull_db_run_follows_reference_trace() {
    // Arrange
    let mut qp = weibull_db();
    let responses = [
        1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1,
        1, 1,
    ];
    let expected = [
        -18.0, -22.0, -25.0, -28.0, -30.0, -22.0, -13.0, -15.0, -16.0, -18.0, -19.0, -20.0,
        -21.0, -22.0, -23.0, -19.0, -20.0, -20.0, -18.0, -18.0, -19.0, -17.0, -17.0, -18.0,
        -18.0, -18.0, -19.0, -19.0, -19.0, -19.0, -19.0, -19.0,
    ];

    // Act + Assert
    for (trial, (&response, &want)) in responses.iter().zip(expected.iter()).enumerate() {
        let stim = qp.next().expect("next should succeed");
        assert_relative_eq!(stim, want, epsilon = 1e-9);
        let keep_going = qp.update(response, Some(stim)).expect("update should succeed");
        assert!(keep_going, "QUEST+ never asks to stop (trial {trial})");
        assert_relative_eq!(qp.posterior().sum(), 1.0, epsilon = 1e-9);
    }
    assert_eq!(qp.history().len(), responses.len());
    assert_eq!(qp.history().responses(), &responses[..]);
}

#[test]
// Purpose
// -------
// Pin the stimulus sequence of a 32-trial CSF run.
//
// Given
// -----
// - The CSF grid from `csf_db` (26 × 21 × 1 stimuli, 11 × 11 × 5
//   free parameter values).
// - A fixed response trace.
//
// Expect
// ------
// - `next` returns the recorded (contrast, spatial frequency) pairs with
//   temporal frequency 0.
fn csf_run_follows_reference_trace() {
    // Arrange
    let mut qp = csf_db();
    let responses = [
        1, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1,
        1, 1,
    ];
    let contrasts = [
        0.0, -4.0, 0.0, 0.0, -38.0, 0.0, -40.0, 0.0, -26.0, -26.0, 0.0, -36.0, -36.0, 0.0, -26.0,
        -26.0, -2.0, -26.0, -6.0, -26.0, 0.0, -26.0, 0.0, -26.0, -32.0, -32.0, -34.0, -34.0, 0.0,
        -26.0, 0.0, -26.0,
    ];
    let spatial_freqs = [
        40.0, 40.0, 34.0, 36.0, 0.0, 38.0, 0.0, 38.0, 18.0, 18.0, 40.0, 0.0, 0.0, 40.0, 20.0,
        20.0, 40.0, 22.0, 40.0, 20.0, 40.0, 18.0, 40.0, 18.0, 0.0, 0.0, 0.0, 0.0, 40.0, 18.0,
        38.0, 18.0,
    ];

    // Act + Assert
    for trial in 0..responses.len() {
        let [contrast, sf, tf] = qp.next().expect("next should succeed");
        assert_relative_eq!(contrast, contrasts[trial], epsilon = 1e-9);
        assert_relative_eq!(sf, spatial_freqs[trial], epsilon = 1e-9);
        assert_eq!(tf, 0.0);
        qp.update(responses[trial], Some([contrast, sf, tf])).expect("update should succeed");
    }
    assert_eq!(qp.history().len(), responses.len());
    assert_relative_eq!(qp.posterior().sum(), 1.0, epsilon = 1e-9);
}

#[test]
// Purpose
// -------
// Run the log10 Weibull against a deterministic step observer whose true
// threshold is −2.0 and who answers wrongly on every seventh trial.
//
// Given
// -----
// - A 13-level log10 grid, default slope/guess/lapse.
// - Observer: correct iff stimulus ≥ −2.0, flipped when `trial % 7 == 6`.
//
// Expect
// ------
// - The recorded stimulus and response sequences, settling one grid step
//   above the true threshold.
// - The first correct answer moves the stimulus down, the first error
//   moves it back up.
fn weibull_log10_tracks_step_observer() {
    // Arrange
    let mut qp = weibull_log10();
    let expected = [
        -2.0, -2.75, -2.25, -2.0, -2.25, -2.25, -2.0, -1.75, -1.75, -1.75, -1.75, -1.75, -1.75,
        -1.75, -1.75, -1.75, -1.75, -1.75, -1.75, -1.75, -1.75, -2.0, -1.75, -1.75, -1.75, -1.75,
        -1.75, -1.75, -2.0, -1.75, -1.75, -1.75,
    ];
    let expected_responses = [
        1, 0, 0, 1, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 1,
        1, 1,
    ];

    // Act
    let mut stimuli = Vec::with_capacity(expected.len());
    let mut responses = Vec::with_capacity(expected.len());
    for trial in 0..expected.len() {
        let stim = qp.next().expect("next should succeed");
        let mut response = usize::from(stim >= -2.0);
        if trial % 7 == 6 {
            response = 1 - response;
        }
        qp.update(response, Some(stim)).expect("update should succeed");
        stimuli.push(stim);
        responses.push(response);
    }

    // Assert
    for (got, want) in stimuli.iter().zip(expected.iter()) {
        assert_relative_eq!(*got, *want, epsilon = 1e-9);
    }
    assert_eq!(responses, expected_responses);
    // Opening moves: harder after a correct answer, easier after an error.
    assert!(stimuli[1] < stimuli[0]);
    assert!(stimuli[2] > stimuli[1]);
    assert_relative_eq!(*stimuli.last().unwrap(), -1.75);
}

#[test]
// Purpose
// -------
// Ensure an out-of-range response is rejected without touching state.
//
// Given
// -----
// - A fresh log10 Weibull run with one valid trial recorded.
//
// Expect
// ------
// - `update(2, …)` returns `InvalidResponse`.
// - Posterior and history are unchanged, and the next selection matches a
//   run that never saw the bad response.
fn invalid_response_leaves_posterior_unchanged() {
    // Arrange
    let mut qp = weibull_log10();
    let mut reference = weibull_log10();
    let stim = qp.next().expect("next should succeed");
    qp.update(1, Some(stim)).expect("valid update");
    let ref_stim = reference.next().expect("next should succeed");
    reference.update(1, Some(ref_stim)).expect("valid update");
    let before = qp.posterior().clone();

    // Act
    let err = qp.update(2, Some(stim)).expect_err("response 2 must be rejected");

    // Assert
    assert!(matches!(err, QPError::InvalidResponse { response: 2, .. }));
    assert_eq!(qp.posterior(), &before);
    assert_eq!(qp.history().len(), 1);
    assert_eq!(qp.next().expect("next"), reference.next().expect("next"));
}

#[test]
// Purpose
// -------
// Check that repeated `next` calls without an update return the same
// stimulus and that identical runs are identical.
//
// Given
// -----
// - Two independently built dB Weibull runs fed the same responses.
//
// Expect
// ------
// - `next` is idempotent between updates.
// - Both runs produce identical stimuli and bit-identical posteriors.
fn selection_is_idempotent_and_deterministic() {
    // Arrange
    let mut a = weibull_db();
    let mut b = weibull_db();

    // Act + Assert
    for response in [1, 0, 1, 1, 0, 1] {
        let first = a.next().expect("next");
        let second = a.next().expect("next");
        assert_eq!(first, second);
        assert_eq!(first, b.next().expect("next"));
        a.update(response, None).expect("update with pending stimulus");
        b.update(response, None).expect("update with pending stimulus");
    }
    assert_eq!(a.posterior(), b.posterior());
    assert_eq!(a.history().stimuli(), b.history().stimuli());
}

/// Purpose
/// -------
/// Drive any adaptive procedure with a fixed response sequence, using the
/// procedure's own suggestions, and return the stimuli presented.
///
/// Notes
/// -----
/// - Stops early if the procedure reports it is finished.
fn run_trace<P: AdaptiveProcedure>(procedure: &mut P, responses: &[usize]) -> Vec<P::Stimulus> {
    let mut presented = Vec::with_capacity(responses.len());
    for &response in responses {
        let stim = procedure.next().expect("next should succeed");
        presented.push(stim);
        match procedure.update(response, Some(stim)) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => panic!("update failed: {e}"),
        }
    }
    presented
}

#[test]
// Purpose
// -------
// Confirm both procedure families run through the same generic driver.
//
// Given
// -----
// - A log10 Weibull QUEST+ run and a 1-up/3-down linear staircase.
//
// Expect
// ------
// - QUEST+ presents one stimulus per response.
// - The staircase starts at its start value and stops after 20 trials.
fn generic_driver_runs_both_procedure_families() {
    // Arrange
    let responses: Vec<usize> = (0..24).map(|i| usize::from(i % 4 != 3)).collect();
    let mut qp = weibull_log10();
    let options = StaircaseOptions {
        n_reversals: Some(1),
        ..StaircaseOptions::new(0.8, vec![0.1], 20, 1, 3, false)
    };
    let mut sc = Staircase::new(options).expect("valid staircase");

    // Act
    let qp_stimuli = run_trace(&mut qp, &responses);
    let sc_stimuli = run_trace(&mut sc, &responses);

    // Assert
    assert_eq!(qp_stimuli.len(), responses.len());
    assert!(qp_stimuli.iter().all(|s| (-3.5..=-0.5).contains(s)));
    assert_relative_eq!(sc_stimuli[0], 0.8);
    assert_eq!(sc_stimuli.len(), 20);
    assert!(sc.is_finished());
}
