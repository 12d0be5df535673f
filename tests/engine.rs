use fuzzy_production::{
    compute_recommended_production, Activation, DefuzzificationOp, DemandTerm, EngineConfig, Error, Inputs,
    MamdaniInference, ProductionTerm, RuleBase, Shape, StockTerm, Term,
};

fn model() -> MamdaniInference {
    MamdaniInference::new(&EngineConfig::default()).unwrap()
}

#[test]
fn test_fuzzify_demand_boundaries() {
    let model = model();

    assert_eq!(model.fuzzify_demand(0.).to_vec(), vec![1., 0., 0.]);
    assert_eq!(model.fuzzify_demand(3500.).to_vec(), vec![0., 1., 0.]);
    assert_eq!(model.fuzzify_demand(7000.).to_vec(), vec![0., 0., 1.]);
    assert_eq!(model.fuzzify_stock(500.).to_vec(), vec![0., 1., 0.]);
}

#[test]
fn test_out_of_universe_inputs_are_not_errors() {
    let model = model();

    for (demand, stock) in [(-500., 500.), (20_000., 500.), (3000., -10.), (3000., 5000.)] {
        let outputs = model.eval(demand, stock).unwrap();

        assert!((0. ..=8000.).contains(&outputs.production()));
    }
}

#[test]
fn test_degenerate_activation() {
    let result = model().defuzzify(Activation::new(0., 0.));

    assert_eq!(
        result,
        Err(Error::DegenerateAggregation {
            activation: Activation::new(0., 0.)
        })
    );
}

#[test]
fn test_repeated_calls_are_bit_identical() {
    let model = model();
    let first = model.eval(4321., 456.).unwrap().production();

    for _ in 0..10 {
        assert_eq!(model.eval(4321., 456.).unwrap().production().to_bits(), first.to_bits());
    }
    assert_eq!(
        compute_recommended_production(4321., 456., None).unwrap().to_bits(),
        first.to_bits()
    );
}

#[test]
fn test_resolution_converges() {
    let at = |resolution| {
        let config = EngineConfig {
            resolution,
            ..Default::default()
        };

        compute_recommended_production(3000., 500., Some(&config)).unwrap()
    };
    let coarse = at(1000);
    let medium = at(10_000);
    let fine = at(100_000);

    assert!((fine - medium).abs() < (medium - coarse).abs());
    assert!((fine - medium).abs() < 0.5);
    assert!((coarse - fine).abs() / fine < 0.005);
}

#[test]
fn test_config_from_json() {
    let config: EngineConfig = serde_json::from_str(
        r#"{
            "resolution": 2000,
            "defuzzification": "mean_of_maximum",
            "production": {
                "decrease": { "shape": "falling_ramp", "start": 0, "end": 4000 },
                "increase": { "shape": "trapezoid", "a": 4000, "b": 6000, "c": 8000, "d": 8000 }
            }
        }"#,
    )
    .unwrap();

    assert_eq!(config.resolution, 2000);
    assert_eq!(config.defuzzification, DefuzzificationOp::MeanOfMaximum);
    assert_eq!(config.demand, EngineConfig::default().demand);
    assert_eq!(
        config.production.increase,
        Shape::Trapezoid {
            a: 4000.,
            b: 6000.,
            c: 8000.,
            d: 8000.
        }
    );

    let model = MamdaniInference::new(&config).unwrap();
    // Only decrease fires at (3000, 500); its clipped plateau spans [0, 4000 / 3]
    let production = model.eval(3000., 500.).unwrap().production();

    assert!((production - 2000. / 3.).abs() < 10., "{production}");
}

#[test]
fn test_config_round_trips_through_json() {
    let config = EngineConfig::default();
    let json = serde_json::to_string(&config).unwrap();

    assert!(json.contains(r#""shape":"triangle""#));
    assert_eq!(serde_json::from_str::<EngineConfig>(&json).unwrap(), config);
}

#[test]
fn test_invalid_config_is_rejected_before_inference() {
    let config: EngineConfig = serde_json::from_str(r#"{ "resolution": 1 }"#).unwrap();

    assert_eq!(
        compute_recommended_production(3000., 500., Some(&config)),
        Err(Error::Configuration(fuzzy_production::ConfigurationError::InvalidResolution(1)))
    );
}

#[test]
fn test_unbounded_output_domain_is_a_configuration_error() {
    let config = EngineConfig {
        output_domain: (-1e308, 1e308),
        ..EngineConfig::default()
    };

    assert!(matches!(
        compute_recommended_production(3000., 500., Some(&config)),
        Err(Error::Configuration(fuzzy_production::ConfigurationError::InvertedDomain { .. }))
    ));
}

#[test]
fn test_invalid_activation_is_rejected() {
    let model = model();

    for activation in [Activation::new(f64::NAN, f64::NAN), Activation::new(2., 0.)] {
        assert!(
            matches!(model.defuzzify(activation), Err(Error::InvalidActivation { .. })),
            "{activation:?}"
        );
    }
}

#[test]
fn test_maximum_based_defuzzification() {
    let maxima = |defuzzification| {
        let config = EngineConfig {
            defuzzification,
            ..Default::default()
        };

        compute_recommended_production(3000., 500., Some(&config)).unwrap()
    };

    assert_eq!(maxima(DefuzzificationOp::SmallestOfMaximum), 0.);
    assert!(maxima(DefuzzificationOp::LargestOfMaximum) <= 4000. / 3.);
    assert!(maxima(DefuzzificationOp::LargestOfMaximum) > 4000. / 3. - 10.);

    let bisector = maxima(DefuzzificationOp::Bisector);

    assert!(bisector > 0. && bisector < 4000., "{bisector}");
}

#[test]
fn test_custom_rule_base() {
    let rules = DemandTerm::ALL
        .iter()
        .flat_map(|&d| StockTerm::ALL.iter().map(move |&s| d.and(s).then(ProductionTerm::Increase)))
        .collect();
    let rules = RuleBase::new(rules).unwrap();
    let model = MamdaniInference::with_rules(&EngineConfig::default(), rules).unwrap();
    let outputs = model.eval(3000., 500.).unwrap();

    assert_eq!(outputs.activation().decrease, 0.);
    // Mirror image of the decrease-only result around the middle of the domain
    assert!((outputs.production() - (8000. - 1442.2778600689612)).abs() < 1e-6);
}

#[test]
fn test_plotting_samples() {
    let model = model();
    let variables = model.variables();
    let curve = variables.demand.sample(DemandTerm::Medium, 1000);

    assert_eq!(curve.len(), 1000);
    assert_eq!(curve.first().unwrap().0, 0.);
    assert_eq!(curve.last().unwrap().0, 7000.);
    assert!(curve.iter().all(|&(_, degree)| (0. ..=1.).contains(&degree)));

    let peak = curve.iter().map(|&(_, degree)| degree).fold(0., f64::max);

    assert!(peak > 0.99);
    assert_eq!(variables.production.sample(ProductionTerm::Increase, 2), vec![(0., 0.), (8000., 1.)]);
}

#[test]
fn test_batch() {
    let inputs = [Inputs::new(3000., 500.), Inputs::new(6000., 100.), Inputs::new(1000., 900.)];
    let results: Vec<f64> = model()
        .eval_batch(&inputs)
        .into_iter()
        .map(|r| r.unwrap().production())
        .collect();

    assert!((results[0] - 1442.2778600689612).abs() < 1e-6);
    assert!((results[1] - 6557.722139931066).abs() < 1e-6);
    assert!((results[2] - 1442.2778600689612).abs() < 1e-6);
}
