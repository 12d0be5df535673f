use crate::error::ConfigurationError;
use crate::ops::{AndOp, OrOp};
use crate::terms::{Degrees, DemandTerm, ProductionTerm, StockTerm, Term};

/// The antecedent of a rule: `demand is <label> and stock is <label>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Premise {
    pub demand: DemandTerm,
    pub stock: StockTerm,
}

impl Premise {
    pub fn then(self, consequence: ProductionTerm) -> Rule {
        Rule {
            demand: self.demand,
            stock: self.stock,
            consequence,
        }
    }
}

impl DemandTerm {
    pub fn and(self, stock: StockTerm) -> Premise {
        Premise { demand: self, stock }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rule {
    pub demand: DemandTerm,
    pub stock: StockTerm,
    pub consequence: ProductionTerm,
}

/// Firing strength of each production label after inference.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Activation {
    pub increase: f64,
    pub decrease: f64,
}

impl Activation {
    pub fn new(increase: f64, decrease: f64) -> Self {
        Self { increase, decrease }
    }

    /// Both strengths are degrees in `[0, 1]`; NaN is not.
    pub fn is_valid(&self) -> bool {
        (0. ..=1.).contains(&self.increase) && (0. ..=1.).contains(&self.decrease)
    }

    pub fn get(&self, term: ProductionTerm) -> f64 {
        match term {
            ProductionTerm::Increase => self.increase,
            ProductionTerm::Decrease => self.decrease,
        }
    }
}

/// An exhaustive table with exactly one rule per (demand, stock) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleBase(Vec<Rule>);

impl RuleBase {
    pub fn new(rules: Vec<Rule>) -> Result<Self, ConfigurationError> {
        for &demand in DemandTerm::ALL {
            for &stock in StockTerm::ALL {
                let matching = rules.iter().filter(|r| r.demand == demand && r.stock == stock).count();

                match matching {
                    0 => return Err(ConfigurationError::MissingRule { demand, stock }),
                    1 => {},
                    _ => return Err(ConfigurationError::DuplicateRule { demand, stock }),
                }
            }
        }

        Ok(RuleBase(rules))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn consequence(&self, demand: DemandTerm, stock: StockTerm) -> Option<ProductionTerm> {
        self.0
            .iter()
            .find(|r| r.demand == demand && r.stock == stock)
            .map(|r| r.consequence)
    }

    /// Fires every rule with `and_op` over its two premise degrees and joins
    /// the rules sharing a consequence with `or_op`.
    pub fn infer(
        &self,
        demand: &Degrees<DemandTerm>,
        stock: &Degrees<StockTerm>,
        and_op: AndOp,
        or_op: OrOp,
    ) -> Activation {
        // Rounding in the algebraic norms may step just outside [0, 1]
        let strengths = |consequence: ProductionTerm| {
            or_op
                .fold(
                    self.0
                        .iter()
                        .filter(|r| r.consequence == consequence)
                        .map(|r| and_op.call(demand.get(r.demand), stock.get(r.stock))),
                )
                .max(0.)
                .min(1.)
        };

        Activation {
            increase: strengths(ProductionTerm::Increase),
            decrease: strengths(ProductionTerm::Decrease),
        }
    }
}

impl Default for RuleBase {
    /// Produce more only while stock is short, or while demand is high and
    /// stock is not.
    fn default() -> Self {
        use crate::terms::DemandTerm as D;
        use crate::terms::ProductionTerm::{Decrease, Increase};
        use crate::terms::StockTerm as S;

        RuleBase(vec![
            D::Low.and(S::Low).then(Increase),
            D::Low.and(S::Medium).then(Decrease),
            D::Low.and(S::High).then(Decrease),
            D::Medium.and(S::Low).then(Increase),
            D::Medium.and(S::Medium).then(Decrease),
            D::Medium.and(S::High).then(Decrease),
            D::High.and(S::Low).then(Increase),
            D::High.and(S::Medium).then(Increase),
            D::High.and(S::High).then(Decrease),
        ])
    }
}

#[cfg(test)]
fn degrees<L: Term>(values: &[f64]) -> Degrees<L> {
    Degrees::from_fn(|label| {
        let i = L::ALL.iter().position(|l| *l == label).unwrap();
        values[i]
    })
}

#[test]
fn test_default_table_is_complete() {
    let rules = RuleBase::default();

    assert_eq!(rules.len(), 9);
    assert_eq!(RuleBase::new(rules.iter().copied().collect()), Ok(rules.clone()));

    let increase: Vec<_> = rules
        .iter()
        .filter(|r| r.consequence == ProductionTerm::Increase)
        .map(|r| (r.demand, r.stock))
        .collect();

    assert_eq!(
        increase,
        vec![
            (DemandTerm::Low, StockTerm::Low),
            (DemandTerm::Medium, StockTerm::Low),
            (DemandTerm::High, StockTerm::Low),
            (DemandTerm::High, StockTerm::Medium),
        ]
    );
    assert_eq!(
        rules.consequence(DemandTerm::High, StockTerm::High),
        Some(ProductionTerm::Decrease)
    );
}

#[test]
fn test_incomplete_and_duplicate_tables() {
    let mut rules: Vec<Rule> = RuleBase::default().iter().copied().collect();
    let last = rules.pop().unwrap();

    assert_eq!(
        RuleBase::new(rules.clone()),
        Err(ConfigurationError::MissingRule {
            demand: DemandTerm::High,
            stock: StockTerm::High,
        })
    );

    rules.push(last);
    rules.push(DemandTerm::Low.and(StockTerm::Low).then(ProductionTerm::Decrease));

    assert_eq!(
        RuleBase::new(rules),
        Err(ConfigurationError::DuplicateRule {
            demand: DemandTerm::Low,
            stock: StockTerm::Low,
        })
    );
}

#[test]
fn test_infer_min_max() {
    let rules = RuleBase::default();
    // demand = 3000, stock = 500
    let demand = degrees::<DemandTerm>(&[0., 2. / 3., 0.]);
    let stock = degrees::<StockTerm>(&[0., 1., 0.]);
    let activation = rules.infer(&demand, &stock, AndOp::Min, OrOp::Max);

    assert_eq!(activation, Activation::new(0., 2. / 3.));

    // demand = 6000, stock = 100
    let demand = degrees::<DemandTerm>(&[0., 0., 2. / 3.]);
    let stock = degrees::<StockTerm>(&[0.75, 0., 0.]);
    let activation = rules.infer(&demand, &stock, AndOp::Min, OrOp::Max);

    assert_eq!(activation, Activation::new(2. / 3., 0.));
}

#[test]
fn test_infer_each_cell() {
    let rules = RuleBase::default();

    for (row, &d) in DemandTerm::ALL.iter().enumerate() {
        for (col, &s) in StockTerm::ALL.iter().enumerate() {
            let mut dv = [0.; 3];
            let mut sv = [0.; 3];
            dv[row] = 1.;
            sv[col] = 1.;

            let activation = rules.infer(&degrees(&dv), &degrees(&sv), AndOp::Min, OrOp::Max);
            let expected = rules.consequence(d, s).unwrap();

            assert_eq!(activation.get(expected), 1.);
            let other = match expected {
                ProductionTerm::Increase => ProductionTerm::Decrease,
                ProductionTerm::Decrease => ProductionTerm::Increase,
            };
            assert_eq!(activation.get(other), 0.);
        }
    }
}
