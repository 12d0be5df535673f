use std::iter::Sum;
use std::ops::AddAssign;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::math::interp;

/// And operator method for combining the propositions of a fuzzy rule
/// premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator method for combining the firing strengths of the rules that
/// share a consequence.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }

    /// Folds any number of strengths; zero is the identity of every variant.
    pub fn fold<F: Float>(self, strengths: impl IntoIterator<Item = F>) -> F {
        strengths.into_iter().fold(F::zero(), |acc, s| self.call(acc, s))
    }
}

/// Method for reducing the aggregated output set to one crisp value.
///
/// None of these are defined for an identically zero membership.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Discrete center of gravity, `Σ x·μ(x) / Σ μ(x)` over the samples
    #[default]
    Centroid,
    /// Point splitting the (trapezoid rule) area into two equal halves
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
    /// Largest value for which the membership function is maximum
    LargestOfMaximum,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaximum,
}

impl DefuzzificationOp {
    /// Crisp value of the sampled set, or `None` when no sample carries any
    /// membership.
    pub fn call<F: Float + Sum + AddAssign>(self, universe: &[F], membership: &[F]) -> Option<F> {
        let samples = || universe.iter().copied().zip(membership.iter().copied());
        let maximum = membership.iter().copied().fold(F::zero(), F::max);

        if maximum <= F::zero() {
            return None;
        }

        let value = match self {
            Self::Centroid => {
                let num = samples().map(|(u, m)| u * m).sum::<F>();
                let den = membership.iter().copied().sum::<F>();

                num / den
            },
            Self::Bisector => {
                let two = F::one() + F::one();
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
                    .collect();
                let target = areas.iter().copied().sum::<F>() / two;
                let mut cum_area = F::zero();

                for (i, &area) in areas.iter().enumerate() {
                    if area > F::zero() && cum_area + area >= target {
                        return Some(interp(
                            target,
                            &[(cum_area, universe[i]), (cum_area + area, universe[i + 1])],
                        ));
                    }
                    cum_area += area;
                }

                // A single sample has no area to split
                universe.first().copied()?
            },
            Self::MeanOfMaximum => {
                let (len, sum) = samples()
                    .filter(|&(_, m)| m == maximum)
                    .fold((F::zero(), F::zero()), |(len, accum), (u, _)| (len + F::one(), accum + u));

                sum / len
            },
            Self::LargestOfMaximum => {
                samples()
                    .filter(|&(_, m)| m == maximum)
                    .map(|(u, _)| u)
                    .fold(F::neg_infinity(), F::max)
            },
            Self::SmallestOfMaximum => {
                samples()
                    .filter(|&(_, m)| m == maximum)
                    .map(|(u, _)| u)
                    .fold(F::infinity(), F::min)
            },
        };

        Some(value)
    }
}

#[test]
fn test_and_or_defaults_are_min_max() {
    assert_eq!(AndOp::default().call(0.3, 0.7), 0.3);
    assert_eq!(OrOp::default().call(0.3, 0.7), 0.7);
    assert_eq!(OrOp::Max.fold([0.2, 0.9, 0.4]), 0.9);
    assert_eq!(OrOp::Max.fold(Vec::<f64>::new()), 0.);
}

#[test]
fn test_norm_variants() {
    assert!((AndOp::Prod.call(0.5, 0.4) - 0.2).abs() < 1e-12);
    assert!((AndOp::BoundedProd.call(0.5, 0.4f64)).abs() < 1e-12);
    assert_eq!(AndOp::DrasticProd.call(1., 0.4), 0.4);
    assert_eq!(AndOp::DrasticProd.call(0.4, 1.), 0.4);
    assert_eq!(AndOp::DrasticProd.call(0.5, 0.4), 0.);

    assert!((OrOp::ProbOr.call(0.5, 0.4) - 0.7).abs() < 1e-12);
    assert_eq!(OrOp::BoundedSum.call(0.7, 0.6), 1.);
    assert_eq!(OrOp::DrasticSum.call(0., 0.4), 0.4);
    assert_eq!(OrOp::DrasticSum.call(0.2, 0.4), 1.);
}

#[test]
fn test_defuzzification_ops() {
    let universe = [0., 1., 2., 3., 4.];
    let membership = [0., 0.5, 1., 0.5, 0.];

    assert_eq!(DefuzzificationOp::Centroid.call(&universe, &membership), Some(2.));
    assert_eq!(DefuzzificationOp::Bisector.call(&universe, &membership), Some(2.));
    assert_eq!(DefuzzificationOp::MeanOfMaximum.call(&universe, &membership), Some(2.));

    let plateau = [0., 1., 1., 0.5, 0.];

    assert_eq!(DefuzzificationOp::MeanOfMaximum.call(&universe, &plateau), Some(1.5));
    assert_eq!(DefuzzificationOp::LargestOfMaximum.call(&universe, &plateau), Some(2.));
    assert_eq!(DefuzzificationOp::SmallestOfMaximum.call(&universe, &plateau), Some(1.));
}

#[test]
fn test_defuzzification_of_empty_set() {
    let universe = [0., 1., 2., 3., 4.];
    let empty = [0.; 5];

    for op in [
        DefuzzificationOp::Centroid,
        DefuzzificationOp::Bisector,
        DefuzzificationOp::MeanOfMaximum,
        DefuzzificationOp::LargestOfMaximum,
        DefuzzificationOp::SmallestOfMaximum,
    ] {
        assert_eq!(op.call(&universe, &empty), None, "{op:?}");
        assert_eq!(op.call::<f64>(&[], &[]), None, "{op:?}");
    }
}
