use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::ops::{AndOp, DefuzzificationOp, OrOp};
use crate::shape::Shape;
use crate::terms::{DemandTerm, ProductionTerm, StockTerm, Term, Terms};
use crate::variable::{LinguisticVariable, Variables};

/// Membership functions of an input variable with low/medium/high labels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputTermsConfig {
    /// Sampling range; crisp inputs outside it are still accepted
    pub universe: (f64, f64),
    pub low: Shape,
    pub medium: Shape,
    pub high: Shape,
}

impl InputTermsConfig {
    fn build<L: Term>(&self, name: &str) -> Result<LinguisticVariable<L>, ConfigurationError> {
        let terms: Terms<L> = L::ALL.iter().copied().zip([self.low, self.medium, self.high]).collect();

        LinguisticVariable::new(name, self.universe.0..=self.universe.1, terms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputTermsConfig {
    pub decrease: Shape,
    pub increase: Shape,
}

/// Everything needed to build a [`MamdaniInference`](crate::MamdaniInference).
///
/// The default reproduces the reference controller. Deserialization fills any
/// missing top level field from the default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub output_domain: (f64, f64),
    /// Number of samples of the output domain, both ends included
    pub resolution: usize,
    pub demand: InputTermsConfig,
    pub stock: InputTermsConfig,
    pub production: OutputTermsConfig,
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub defuzzification: DefuzzificationOp,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_domain: (0., 8000.),
            resolution: 1000,
            demand: InputTermsConfig {
                universe: (0., 7000.),
                low: Shape::FallingRamp { start: 0., end: 3000. },
                medium: Shape::Triangle {
                    center: 3500.,
                    half_width: 1500.,
                },
                high: Shape::RisingRamp { start: 4000., end: 7000. },
            },
            stock: InputTermsConfig {
                universe: (0., 1000.),
                low: Shape::FallingRamp { start: 0., end: 400. },
                medium: Shape::Triangle {
                    center: 500.,
                    half_width: 200.,
                },
                high: Shape::RisingRamp { start: 600., end: 1000. },
            },
            production: OutputTermsConfig {
                decrease: Shape::FallingRamp { start: 0., end: 4000. },
                increase: Shape::RisingRamp { start: 4000., end: 8000. },
            },
            and_op: AndOp::default(),
            or_op: OrOp::default(),
            defuzzification: DefuzzificationOp::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.variables().map(|_| ())
    }

    /// Validates the configuration and builds the three linguistic variables.
    pub fn variables(&self) -> Result<Variables, ConfigurationError> {
        if self.resolution < 2 {
            return Err(ConfigurationError::InvalidResolution(self.resolution));
        }

        let production_terms = Terms::from_iter([
            (ProductionTerm::Decrease, self.production.decrease),
            (ProductionTerm::Increase, self.production.increase),
        ]);
        let (min, max) = self.output_domain;

        Ok(Variables {
            demand: self.demand.build::<DemandTerm>("demand")?,
            stock: self.stock.build::<StockTerm>("stock")?,
            production: LinguisticVariable::new("production", min..=max, production_terms)?,
        })
    }
}

#[test]
fn test_default_is_valid() {
    assert_eq!(EngineConfig::default().validate(), Ok(()));
}

#[test]
fn test_invalid_configurations() {
    use crate::error::ShapeError;

    let config = EngineConfig {
        resolution: 0,
        ..Default::default()
    };

    assert_eq!(config.validate(), Err(ConfigurationError::InvalidResolution(0)));

    let config = EngineConfig {
        output_domain: (8000., 0.),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigurationError::InvertedDomain { ref variable, .. }) if variable == "production"
    ));

    let mut config = EngineConfig::default();
    config.stock.medium = Shape::Triangle {
        center: 500.,
        half_width: -1.,
    };

    assert_eq!(
        config.validate(),
        Err(ConfigurationError::InvalidShape {
            variable: "stock".into(),
            term: "medium",
            source: ShapeError::NonPositiveHalfWidth(-1.),
        })
    );

    let mut config = EngineConfig::default();
    config.demand.high = Shape::RisingRamp { start: 7000., end: 4000. };

    assert!(matches!(
        config.validate(),
        Err(ConfigurationError::InvalidShape { term: "high", .. })
    ));
}
