use crate::rules::Activation;
use crate::terms::{Degrees, DemandTerm, StockTerm};

/// Result of one inference call, with the intermediate stages kept for
/// reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    production: f64,
    activation: Activation,
    demand: Degrees<DemandTerm>,
    stock: Degrees<StockTerm>,
}

impl Outputs {
    pub(crate) fn new(
        production: f64,
        activation: Activation,
        demand: Degrees<DemandTerm>,
        stock: Degrees<StockTerm>,
    ) -> Self {
        Self {
            production,
            activation,
            demand,
            stock,
        }
    }

    /// The recommended crisp production quantity.
    pub fn production(&self) -> f64 {
        self.production
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn demand_degrees(&self) -> &Degrees<DemandTerm> {
        &self.demand
    }

    pub fn stock_degrees(&self) -> &Degrees<StockTerm> {
        &self.stock
    }
}
