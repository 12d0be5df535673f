use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::defuzz::{self, AggregatedFuzzySet};
use crate::error::{ConfigurationError, Error};
use crate::inputs::Inputs;
use crate::ops::{AndOp, DefuzzificationOp, OrOp};
use crate::outputs::Outputs;
use crate::rules::{Activation, RuleBase};
use crate::terms::{Degrees, DemandTerm, StockTerm};
use crate::variable::Variables;

/// Mamdani controller: fuzzify, fire the rule base, clip and aggregate the
/// output terms, defuzzify.
///
/// Immutable once built, so one instance can serve any number of threads.
#[derive(Clone, Debug)]
pub struct MamdaniInference {
    variables: Variables,
    rules: RuleBase,
    and_op: AndOp,
    or_op: OrOp,
    defuzz_op: DefuzzificationOp,
    resolution: usize,
}

impl MamdaniInference {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigurationError> {
        Self::with_rules(config, RuleBase::default())
    }

    pub fn with_rules(config: &EngineConfig, rules: RuleBase) -> Result<Self, ConfigurationError> {
        let variables = config.variables()?;

        debug!(
            resolution = config.resolution,
            output_min = config.output_domain.0,
            output_max = config.output_domain.1,
            and_op = ?config.and_op,
            or_op = ?config.or_op,
            defuzzification = ?config.defuzzification,
            rules = rules.len(),
            "built mamdani inference engine"
        );

        Ok(Self {
            variables,
            rules,
            and_op: config.and_op,
            or_op: config.or_op,
            defuzz_op: config.defuzzification,
            resolution: config.resolution,
        })
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn fuzzify_demand(&self, demand: f64) -> Degrees<DemandTerm> {
        self.variables.demand.fuzzify(demand)
    }

    pub fn fuzzify_stock(&self, stock: f64) -> Degrees<StockTerm> {
        self.variables.stock.fuzzify(stock)
    }

    pub fn infer(&self, demand: &Degrees<DemandTerm>, stock: &Degrees<StockTerm>) -> Activation {
        self.rules.infer(demand, stock, self.and_op, self.or_op)
    }

    /// The clipped and joined output set that `defuzzify` reduces.
    pub fn aggregate(&self, activation: Activation) -> Result<AggregatedFuzzySet, Error> {
        defuzz::aggregate(activation, &self.variables.production, self.resolution)
    }

    pub fn defuzzify(&self, activation: Activation) -> Result<f64, Error> {
        defuzz::defuzzify(activation, &self.variables.production, self.resolution, self.defuzz_op)
    }

    pub fn eval(&self, demand: f64, stock: f64) -> Result<Outputs, Error> {
        if !demand.is_finite() {
            return Err(Error::NonFiniteInput {
                variable: "demand",
                value: demand,
            });
        }
        if !stock.is_finite() {
            return Err(Error::NonFiniteInput {
                variable: "stock",
                value: stock,
            });
        }

        let demand_degrees = self.fuzzify_demand(demand);
        let stock_degrees = self.fuzzify_stock(stock);

        trace!(demand, stock, ?demand_degrees, ?stock_degrees, "fuzzified inputs");

        let activation = self.infer(&demand_degrees, &stock_degrees);
        let production = self.defuzzify(activation)?;

        debug!(
            demand,
            stock,
            increase = activation.increase,
            decrease = activation.decrease,
            production,
            "inferred production"
        );

        Ok(Outputs::new(production, activation, demand_degrees, stock_degrees))
    }

    pub fn eval_inputs(&self, inputs: &Inputs) -> Result<Outputs, Error> {
        self.eval(inputs.demand, inputs.stock)
    }

    /// Evaluates independent inputs in parallel. Results keep input order.
    pub fn eval_batch(&self, inputs: &[Inputs]) -> Vec<Result<Outputs, Error>> {
        inputs.par_iter().map(|i| self.eval_inputs(i)).collect()
    }
}

#[test]
fn test_reference_scenario() {
    let model = MamdaniInference::new(&EngineConfig::default()).unwrap();
    let outputs = model.eval(3000., 500.).unwrap();
    let demand = outputs.demand_degrees().to_vec();

    assert_eq!(demand[0], 0.);
    assert!((demand[1] - 2. / 3.).abs() < 1e-12);
    assert_eq!(demand[2], 0.);
    assert_eq!(outputs.stock_degrees().to_vec(), vec![0., 1., 0.]);

    // Stock of 500 has no "low" membership, so no increase rule fires
    assert_eq!(outputs.activation().increase, 0.);
    assert!((outputs.activation().decrease - 2. / 3.).abs() < 1e-12);

    let reference = 1442.2778600689612;
    assert!((outputs.production() - reference).abs() <= reference * 0.005);
}

#[test]
fn test_pipeline_stages() {
    let config = EngineConfig {
        resolution: 101,
        ..EngineConfig::default()
    };
    let model = MamdaniInference::new(&config).unwrap();

    assert_eq!(model.resolution(), 101);
    assert_eq!(model.rules().len(), 9);
    assert_eq!(model.rules(), &RuleBase::default());

    let activation = model.infer(&model.fuzzify_demand(3000.), &model.fuzzify_stock(500.));
    let aggregated = model.aggregate(activation).unwrap();

    assert_eq!(aggregated.universe().len(), 101);
    assert_eq!(aggregated.universe()[0], 0.);
    assert_eq!(aggregated.universe()[100], 8000.);
    // Decrease clipped at 2/3 up to x = 4000/3, then the falling ramp
    assert!((aggregated.membership()[0] - 2. / 3.).abs() < 1e-12);
    assert_eq!(aggregated.membership()[50], 0.);
    assert!(aggregated.total() > 0.);
    assert_eq!(
        model.defuzzify(activation),
        Ok(DefuzzificationOp::Centroid
            .call(aggregated.universe(), aggregated.membership())
            .unwrap())
    );

    assert!(matches!(
        model.aggregate(Activation::new(1.5, 0.)),
        Err(Error::InvalidActivation { .. })
    ));
}

#[test]
fn test_non_finite_inputs_are_rejected() {
    let model = MamdaniInference::new(&EngineConfig::default()).unwrap();

    assert!(matches!(
        model.eval(f64::NAN, 500.),
        Err(Error::NonFiniteInput { variable: "demand", .. })
    ));
    assert!(matches!(
        model.eval(3000., f64::INFINITY),
        Err(Error::NonFiniteInput { variable: "stock", .. })
    ));
}

#[test]
fn test_batch_matches_sequential() {
    let model = MamdaniInference::new(&EngineConfig::default()).unwrap();
    let inputs: Vec<Inputs> = (0..50)
        .map(|i| Inputs::new(i as f64 * 150., 1000. - i as f64 * 20.))
        .collect();
    let batch = model.eval_batch(&inputs);

    assert_eq!(batch.len(), inputs.len());
    for (input, result) in inputs.iter().zip(batch) {
        assert_eq!(result, model.eval_inputs(input));
    }
}
