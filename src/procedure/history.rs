//! Append-only trial history shared by all procedures.

/// TrialHistory — ordered record of presented stimuli and observed responses.
///
/// Purpose
/// -------
/// Keep the per-trial (stimulus, response) pairs of a running procedure so
/// callers can inspect what was presented and what was answered.
///
/// Invariants
/// ----------
/// - `stimuli().len() == responses().len()` at all times.
/// - Entries are only ever appended; nothing is removed or reordered.
///
/// Notes
/// -----
/// - Grid procedures update their posterior incrementally; the history is
///   bookkeeping only and is never replayed into the posterior.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialHistory<S> {
    stimuli: Vec<S>,
    responses: Vec<usize>,
}

impl<S> TrialHistory<S> {
    /// Empty history.
    pub fn new() -> Self {
        TrialHistory { stimuli: Vec::new(), responses: Vec::new() }
    }

    /// Empty history with room for `capacity` trials.
    pub fn with_capacity(capacity: usize) -> Self {
        TrialHistory { stimuli: Vec::with_capacity(capacity), responses: Vec::with_capacity(capacity) }
    }

    /// Append one completed trial.
    pub fn push(&mut self, stimulus: S, response: usize) {
        self.stimuli.push(stimulus);
        self.responses.push(response);
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn stimuli(&self) -> &[S] {
        &self.stimuli
    }

    pub fn responses(&self) -> &[usize] {
        &self.responses
    }

    /// Most recent (stimulus, response) pair.
    pub fn last(&self) -> Option<(&S, usize)> {
        self.stimuli.last().zip(self.responses.last().copied())
    }

    /// Response recorded `back` trials before the most recent one
    /// (`back = 0` is the most recent).
    pub fn response_back(&self, back: usize) -> Option<usize> {
        self.responses.len().checked_sub(back + 1).map(|i| self.responses[i])
    }
}

impl<S> Default for TrialHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}
