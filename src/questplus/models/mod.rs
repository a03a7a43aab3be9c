//! models — concrete psychometric grid builders for QUEST+.
//!
//! Purpose
//! -------
//! Provide ready-made [`GridModel`](crate::questplus::core::GridModel)
//! implementations for the common psychometric functions:
//!
//! - [`WeibullModel`]: 1-D stimulus, (threshold, slope, lower asymptote,
//!   lapse rate); linear, log10 or dB scale.
//! - [`NormCdfModel`]: 1-D stimulus, (location, scale, lower asymptote, lapse
//!   rate); linear scale only.
//! - [`CsfModel`]: 3-D stimulus (contrast, spatial frequency, temporal
//!   frequency) and seven parameters.
//!
//! Conventions
//! -----------
//! - Each model is configured through a plain params struct whose `new`
//!   fills the conventional defaults (slope `{3.5}`, lower asymptote
//!   `{0.01}`, lapse rate `{0.01}`); override fields with struct-update
//!   syntax.
//! - Model constructors validate every domain and prior, so a model that
//!   constructs successfully only fails engine setup if its parameter values
//!   produce probabilities outside [0, 1].

pub mod csf;
pub mod norm_cdf;
pub mod weibull;

pub use self::csf::{CsfModel, CsfParams};
pub use self::norm_cdf::{NormCdfModel, NormCdfParams, norm_cdf};
pub use self::weibull::{WeibullModel, WeibullParams, weibull_p};
