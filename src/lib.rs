//! Mamdani fuzzy controller recommending a production quantity from the
//! current demand and stock.
//!
//! Crisp inputs are fuzzified against low/medium/high membership functions,
//! a fixed 3×3 rule base is fired with min (AND) and max (OR), the two output
//! terms are clipped and joined, and the centroid of the sampled result is the
//! recommendation.
//!
//! ```
//! use fuzzy_production::{compute_recommended_production, EngineConfig};
//!
//! let production = compute_recommended_production(3000., 500., None).unwrap();
//! assert!((production - 1442.28).abs() < 1.);
//!
//! let config = EngineConfig {
//!     resolution: 10_000,
//!     ..Default::default()
//! };
//! let finer = compute_recommended_production(3000., 500., Some(&config)).unwrap();
//! assert!((finer - production).abs() < 5.);
//! ```

use std::sync::OnceLock;

mod config;
mod defuzz;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod ops;
mod outputs;
mod rules;
mod shape;
mod terms;
mod variable;

pub use config::{EngineConfig, InputTermsConfig, OutputTermsConfig};
pub use defuzz::{defuzzify, AggregatedFuzzySet};
pub use error::{ConfigurationError, Error, ShapeError};
pub use inference::MamdaniInference;
pub use inputs::Inputs;
pub use linspace::Linspace;
pub use ops::{AndOp, DefuzzificationOp, OrOp};
pub use outputs::Outputs;
pub use rules::{Activation, Premise, Rule, RuleBase};
pub use shape::Shape;
pub use terms::{Degrees, DemandTerm, ProductionTerm, StockTerm, Term, Terms};
pub use variable::{LinguisticVariable, Variables};

/// Recommended production for one reading of demand and stock.
///
/// Without a config the reference controller is used; it is built once and
/// shared by every later call.
pub fn compute_recommended_production(demand: f64, stock: f64, config: Option<&EngineConfig>) -> Result<f64, Error> {
    let outputs = match config {
        Some(config) => MamdaniInference::new(config)?.eval(demand, stock)?,
        None => default_engine()?.eval(demand, stock)?,
    };

    Ok(outputs.production())
}

fn default_engine() -> Result<&'static MamdaniInference, ConfigurationError> {
    static ENGINE: OnceLock<Result<MamdaniInference, ConfigurationError>> = OnceLock::new();

    ENGINE
        .get_or_init(|| MamdaniInference::new(&EngineConfig::default()))
        .as_ref()
        .map_err(Clone::clone)
}

#[test]
fn test_compute_recommended_production() {
    let low_stock = compute_recommended_production(6000., 100., None).unwrap();
    let high_stock = compute_recommended_production(1000., 900., None).unwrap();

    assert!((low_stock - 6557.722139931066).abs() < 1e-6, "{low_stock}");
    assert!((high_stock - 1442.2778600689612).abs() < 1e-6, "{high_stock}");
}

#[test]
fn test_compute_with_degenerate_config() {
    // Input terms that never overlap the readings leave every rule unfired
    let mut config = EngineConfig::default();
    config.stock.low = Shape::Rectangle {
        start: 2000.,
        end: 3000.,
    };
    config.stock.medium = Shape::Rectangle {
        start: 2000.,
        end: 3000.,
    };
    config.stock.high = Shape::Rectangle {
        start: 2000.,
        end: 3000.,
    };

    assert_eq!(
        compute_recommended_production(3000., 500., Some(&config)),
        Err(Error::DegenerateAggregation {
            activation: Activation::new(0., 0.),
        })
    );
}
