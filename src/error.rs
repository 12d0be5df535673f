use thiserror::Error;

use crate::rules::Activation;
use crate::terms::{DemandTerm, StockTerm};

/// Why a single membership function's parameters were rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("parameters must be finite")]
    NonFinite,
    #[error("ramp end ({end}) must be greater than its start ({start})")]
    EmptyRamp { start: f64, end: f64 },
    #[error("triangle half width must be positive, got {0}")]
    NonPositiveHalfWidth(f64),
    #[error("trapezoid breakpoints must satisfy a <= b <= c <= d with a < d, got ({a}, {b}, {c}, {d})")]
    UnorderedTrapezoid { a: f64, b: f64, c: f64, d: f64 },
    #[error("rectangle end ({end}) must be greater than its start ({start})")]
    EmptyRectangle { start: f64, end: f64 },
}

/// Rejected engine setup. Raised before any inference runs.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("invalid membership function for `{variable}.{term}`: {source}")]
    InvalidShape {
        variable: String,
        term: &'static str,
        source: ShapeError,
    },
    #[error("variable `{variable}` has no membership function for term `{term}`")]
    MissingTerm { variable: String, term: &'static str },
    #[error("universe of `{variable}` is not a finite range with min < max: [{min}, {max}]")]
    InvertedDomain { variable: String, min: f64, max: f64 },
    #[error("resolution must be at least 2 samples, got {0}")]
    InvalidResolution(usize),
    #[error("no rule covers demand {demand:?} with stock {stock:?}")]
    MissingRule { demand: DemandTerm, stock: StockTerm },
    #[error("more than one rule covers demand {demand:?} with stock {stock:?}")]
    DuplicateRule { demand: DemandTerm, stock: StockTerm },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// Every sample of the aggregated output set is zero, so it has no centroid.
    #[error(
        "aggregated output set is empty (increase = {}, decrease = {}); no crisp value exists",
        .activation.increase,
        .activation.decrease
    )]
    DegenerateAggregation { activation: Activation },
    #[error(
        "activation strengths must lie in [0, 1] (increase = {}, decrease = {})",
        .activation.increase,
        .activation.decrease
    )]
    InvalidActivation { activation: Activation },
    #[error("crisp input for `{variable}` must be finite, got {value}")]
    NonFiniteInput { variable: &'static str, value: f64 },
}
