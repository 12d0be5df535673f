use std::fmt;
use std::ops::RangeInclusive;

use fixed_map::Key as FixedKey;

use crate::error::ConfigurationError;
use crate::linspace::Linspace;
use crate::terms::{DemandTerm, Degrees, ProductionTerm, StockTerm, Term, Terms};

/// A named quantity described by one membership function per label.
///
/// The universe does not bound evaluation, only sampling: degrees saturate
/// for crisp values outside of it.
pub struct LinguisticVariable<L: FixedKey> {
    name: String,
    min_u: f64,
    max_u: f64,
    terms: Terms<L>,
}

impl<L: Term> LinguisticVariable<L> {
    /// Checks that the universe is a proper range and that every label of `L`
    /// has a well-formed membership function.
    pub fn new(
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: Terms<L>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let min_u = *universe_range.start();
        let max_u = *universe_range.end();

        // The span must be finite too, or sampling steps overflow
        if !(min_u < max_u && (max_u - min_u).is_finite()) {
            return Err(ConfigurationError::InvertedDomain {
                variable: name,
                min: min_u,
                max: max_u,
            });
        }

        for &label in L::ALL {
            let Some(shape) = terms.get(label) else {
                return Err(ConfigurationError::MissingTerm {
                    variable: name,
                    term: label.name(),
                });
            };

            if let Err(source) = shape.validate() {
                return Err(ConfigurationError::InvalidShape {
                    variable: name,
                    term: label.name(),
                    source,
                });
            }
        }

        Ok(Self {
            name,
            min_u,
            max_u,
            terms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> RangeInclusive<f64> {
        self.min_u..=self.max_u
    }

    pub fn terms(&self) -> &Terms<L> {
        &self.terms
    }

    /// Degree of membership of `x` in `label`.
    pub fn evaluate(&self, label: L, x: f64) -> f64 {
        self.terms.get(label).map_or(0., |shape| shape.evaluate(x))
    }

    pub fn fuzzify(&self, x: f64) -> Degrees<L> {
        Degrees::from_fn(|label| self.evaluate(label, x))
    }

    /// `n` evenly spaced `(x, degree)` points of one label's curve across the
    /// universe. This is all a plotting front end needs.
    pub fn sample(&self, label: L, n: usize) -> Vec<(f64, f64)> {
        Linspace::new(self.min_u, self.max_u, n)
            .map(|x| (x, self.evaluate(label, x)))
            .collect()
    }
}

impl<L: Term> Clone for LinguisticVariable<L> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            min_u: self.min_u,
            max_u: self.max_u,
            terms: self.terms.clone(),
        }
    }
}

impl<L: Term> fmt::Debug for LinguisticVariable<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinguisticVariable")
            .field("name", &self.name)
            .field("universe", &self.universe())
            .field("terms", &self.terms)
            .finish()
    }
}

/// The two inputs and the output of the production controller.
#[derive(Clone, Debug)]
pub struct Variables {
    pub demand: LinguisticVariable<DemandTerm>,
    pub stock: LinguisticVariable<StockTerm>,
    pub production: LinguisticVariable<ProductionTerm>,
}

#[cfg(test)]
fn demand() -> LinguisticVariable<DemandTerm> {
    use crate::shape::Shape;

    let terms = Terms::from_iter([
        (DemandTerm::Low, Shape::FallingRamp { start: 0., end: 3000. }),
        (
            DemandTerm::Medium,
            Shape::Triangle {
                center: 3500.,
                half_width: 1500.,
            },
        ),
        (DemandTerm::High, Shape::RisingRamp { start: 4000., end: 7000. }),
    ]);

    LinguisticVariable::new("demand", 0. ..=7000., terms).unwrap()
}

#[test]
fn test_fuzzify_boundaries() {
    let demand = demand();

    assert_eq!(demand.fuzzify(0.).to_vec(), vec![1., 0., 0.]);
    assert_eq!(demand.fuzzify(3500.).to_vec(), vec![0., 1., 0.]);
    assert_eq!(demand.fuzzify(7000.).to_vec(), vec![0., 0., 1.]);
    // Outside the universe degrees saturate
    assert_eq!(demand.fuzzify(-100.).to_vec(), vec![1., 0., 0.]);
    assert_eq!(demand.fuzzify(1e7).to_vec(), vec![0., 0., 1.]);
}

#[test]
fn test_sample() {
    let points = demand().sample(DemandTerm::Low, 8);

    assert_eq!(points.len(), 8);
    assert_eq!(points[0], (0., 1.));
    assert_eq!(points[7], (7000., 0.));
    assert!(points.iter().all(|&(_, degree)| (0. ..=1.).contains(&degree)));
}

#[test]
fn test_missing_term() {
    use crate::shape::Shape;

    let terms = Terms::from_iter([(StockTerm::Low, Shape::FallingRamp { start: 0., end: 400. })]);
    let err = LinguisticVariable::new("stock", 0. ..=1000., terms).unwrap_err();

    assert_eq!(
        err,
        ConfigurationError::MissingTerm {
            variable: "stock".into(),
            term: "medium",
        }
    );
}

#[test]
fn test_inverted_universe() {
    let err = LinguisticVariable::new("demand", 10. ..=0., demand().terms().clone()).unwrap_err();

    assert!(matches!(err, ConfigurationError::InvertedDomain { .. }));
}

#[test]
fn test_unbounded_universe() {
    for (min, max) in [(-1e308, 1e308), (0., f64::INFINITY), (f64::NAN, 1.)] {
        let err = LinguisticVariable::new("demand", min..=max, demand().terms().clone()).unwrap_err();

        assert!(matches!(err, ConfigurationError::InvertedDomain { .. }), "[{min}, {max}]");
    }
}
