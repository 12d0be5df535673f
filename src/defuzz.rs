use tracing::warn;

use crate::error::Error;
use crate::linspace::Linspace;
use crate::ops::DefuzzificationOp;
use crate::rules::Activation;
use crate::terms::{ProductionTerm, Term};
use crate::variable::LinguisticVariable;

/// The clipped and max-joined output set, sampled over the output universe.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedFuzzySet {
    universe: Vec<f64>,
    membership: Vec<f64>,
}

impl AggregatedFuzzySet {
    /// Clips every production term at its activation (min) and joins the
    /// clipped curves pointwise (max). `activation` must already be valid.
    pub(crate) fn build(activation: &Activation, output: &LinguisticVariable<ProductionTerm>, resolution: usize) -> Self {
        let range = output.universe();
        let universe: Vec<f64> = Linspace::new(*range.start(), *range.end(), resolution).collect();
        let membership = universe
            .iter()
            .map(|&x| {
                ProductionTerm::ALL.iter().fold(0., |acc: f64, &term| {
                    acc.max(activation.get(term).min(output.evaluate(term, x)))
                })
            })
            .collect();

        Self { universe, membership }
    }

    pub fn universe(&self) -> &[f64] {
        &self.universe
    }

    pub fn membership(&self) -> &[f64] {
        &self.membership
    }

    pub fn total(&self) -> f64 {
        self.membership.iter().sum()
    }

    /// True when no sample carries any membership.
    pub fn is_degenerate(&self) -> bool {
        self.total() == 0.
    }
}

/// Reduces the aggregated output set of `activation` to one crisp value.
///
/// Strengths outside `[0, 1]` (or NaN) are [`Error::InvalidActivation`]. An
/// identically zero aggregated set has no defined centre and is reported as
/// [`Error::DegenerateAggregation`] rather than as 0 or NaN.
pub fn defuzzify(
    activation: Activation,
    output: &LinguisticVariable<ProductionTerm>,
    resolution: usize,
    op: DefuzzificationOp,
) -> Result<f64, Error> {
    let aggregated = aggregate(activation, output, resolution)?;

    op.call(aggregated.universe(), aggregated.membership()).ok_or_else(|| {
        warn!(
            increase = activation.increase,
            decrease = activation.decrease,
            "aggregated output set is empty"
        );

        Error::DegenerateAggregation { activation }
    })
}

/// Checked [`AggregatedFuzzySet::build`].
pub(crate) fn aggregate(
    activation: Activation,
    output: &LinguisticVariable<ProductionTerm>,
    resolution: usize,
) -> Result<AggregatedFuzzySet, Error> {
    if !activation.is_valid() {
        return Err(Error::InvalidActivation { activation });
    }

    Ok(AggregatedFuzzySet::build(&activation, output, resolution))
}

#[cfg(test)]
fn production() -> LinguisticVariable<ProductionTerm> {
    use crate::shape::Shape;
    use crate::terms::Terms;

    let terms = Terms::from_iter([
        (ProductionTerm::Decrease, Shape::FallingRamp { start: 0., end: 4000. }),
        (ProductionTerm::Increase, Shape::RisingRamp { start: 4000., end: 8000. }),
    ]);

    LinguisticVariable::new("production", 0. ..=8000., terms).unwrap()
}

#[test]
fn test_zero_activation_is_degenerate() {
    let activation = Activation::new(0., 0.);
    let result = defuzzify(activation, &production(), 1000, DefuzzificationOp::Centroid);

    assert_eq!(result, Err(Error::DegenerateAggregation { activation }));

    for op in [
        DefuzzificationOp::Bisector,
        DefuzzificationOp::MeanOfMaximum,
        DefuzzificationOp::LargestOfMaximum,
        DefuzzificationOp::SmallestOfMaximum,
    ] {
        assert!(defuzzify(activation, &production(), 1000, op).is_err());
    }
}

#[test]
fn test_out_of_range_activation_is_rejected() {
    for activation in [
        Activation::new(f64::NAN, f64::NAN),
        Activation::new(0., f64::NAN),
        Activation::new(2., 0.),
        Activation::new(0.5, -0.1),
        Activation::new(f64::INFINITY, 0.),
    ] {
        let result = defuzzify(activation, &production(), 1000, DefuzzificationOp::Centroid);

        assert!(matches!(result, Err(Error::InvalidActivation { .. })), "{activation:?}");
    }

    assert!(Activation::new(0., 1.).is_valid());
}

#[test]
fn test_aggregation_clips_and_joins() {
    let aggregated = AggregatedFuzzySet::build(&Activation::new(0.5, 0.25), &production(), 5);

    assert_eq!(aggregated.universe(), &[0., 2000., 4000., 6000., 8000.]);
    assert_eq!(aggregated.membership(), &[0.25, 0.25, 0., 0.5, 0.5]);
    assert!(!aggregated.is_degenerate());
}

#[test]
fn test_centroid_reference() {
    // demand = 3000, stock = 500
    let value = defuzzify(
        Activation::new(0., 2. / 3.),
        &production(),
        1000,
        DefuzzificationOp::Centroid,
    )
    .unwrap();

    assert!((value - 1442.2778600689612).abs() < 1e-6, "{value}");
}

#[test]
fn test_symmetric_activation_centres() {
    let value = defuzzify(
        Activation::new(1., 1.),
        &production(),
        1001,
        DefuzzificationOp::Centroid,
    )
    .unwrap();

    assert!((value - 4000.).abs() < 1e-6, "{value}");
}
