//! Property-based tests for the production controller using proptest

use fuzzy_production::{Activation, EngineConfig, Error, MamdaniInference, Shape};
use proptest::prelude::*;

/// Generate well-formed membership functions of every kind
fn shape_strategy() -> impl Strategy<Value = Shape> {
    let start = -1e4..1e4f64;
    let width = 1e-3..1e4f64;

    prop_oneof![
        (start.clone(), width.clone()).prop_map(|(start, w)| Shape::FallingRamp { start, end: start + w }),
        (start.clone(), width.clone()).prop_map(|(start, w)| Shape::RisingRamp { start, end: start + w }),
        (start.clone(), width.clone()).prop_map(|(center, half_width)| Shape::Triangle { center, half_width }),
        (start.clone(), 0. ..1e3f64, 0. ..1e3f64, 1e-3..1e3f64).prop_map(|(a, w1, w2, w3)| Shape::Trapezoid {
            a,
            b: a + w1,
            c: a + w1 + w2,
            d: a + w1 + w2 + w3,
        }),
        (start, width).prop_map(|(start, w)| Shape::Rectangle { start, end: start + w }),
    ]
}

fn model() -> MamdaniInference {
    MamdaniInference::new(&EngineConfig::default()).unwrap()
}

proptest! {
    #[test]
    fn degrees_stay_in_unit_interval(shape in shape_strategy(), x in -1e7..1e7f64) {
        prop_assert!(shape.validate().is_ok());

        let degree = shape.evaluate(x);

        prop_assert!((0. ..=1.).contains(&degree), "{shape:?} at {x} gave {degree}");
    }

    #[test]
    fn activation_and_production_are_bounded(demand in -1e4..2e4f64, stock in -1e3..3e3f64) {
        let outputs = model().eval(demand, stock).unwrap();
        let activation = outputs.activation();

        prop_assert!((0. ..=1.).contains(&activation.increase));
        prop_assert!((0. ..=1.).contains(&activation.decrease));
        prop_assert!((0. ..=8000.).contains(&outputs.production()));
    }

    #[test]
    fn repeated_evaluation_is_bit_identical(demand in -1e3..1e4f64, stock in -1e2..1.5e3f64) {
        let model = model();
        let first = model.eval(demand, stock).unwrap();
        let second = model.eval(demand, stock).unwrap();

        prop_assert_eq!(first.production().to_bits(), second.production().to_bits());
        prop_assert_eq!(first, second);
    }

    /// Once stock has no "low" membership, only the (high, medium) rule can
    /// fire "increase", and its strength follows high demand upwards
    #[test]
    fn increase_strength_grows_with_demand(
        stock in 400. ..1000f64,
        lower in 3500. ..12_000f64,
        delta in 0. ..5000f64,
    ) {
        let model = model();
        let at = |demand: f64| model.infer(&model.fuzzify_demand(demand), &model.fuzzify_stock(stock));

        prop_assert!(at(lower).increase <= at(lower + delta).increase);
    }

    /// With stock between the "low" and "high" ramps, more demand never lowers
    /// the recommendation
    #[test]
    fn production_grows_with_demand(
        stock in 400. ..600f64,
        lower in 3500. ..12_000f64,
        delta in 0. ..5000f64,
    ) {
        let model = model();
        let low = model.eval(lower, stock).unwrap().production();
        let high = model.eval(lower + delta, stock).unwrap().production();

        prop_assert!(low <= high + 1e-6, "{low} > {high}");
    }

    #[test]
    fn zero_activation_is_always_degenerate(resolution in 2usize..5000) {
        let config = EngineConfig { resolution, ..Default::default() };
        let model = MamdaniInference::new(&config).unwrap();
        let activation = Activation::new(0., 0.);

        prop_assert_eq!(model.defuzzify(activation), Err(Error::DegenerateAggregation { activation }));
    }
}
