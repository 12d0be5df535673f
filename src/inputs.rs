use serde::{Deserialize, Serialize};

/// One pair of crisp readings to run through the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub demand: f64,
    pub stock: f64,
}

impl Inputs {
    pub fn new(demand: f64, stock: f64) -> Self {
        Inputs { demand, stock }
    }
}
