use std::fmt;

use fixed_map::Key as FixedKey;
use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::shape::Shape;

/// A linguistic label of one variable.
///
/// `ALL` lists every label in canonical order (low to high, decrease to
/// increase), which is the order degree vectors are reported in.
pub trait Term: FixedKey + Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn name(self) -> &'static str;
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
pub enum DemandTerm {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
pub enum StockTerm {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
pub enum ProductionTerm {
    Decrease,
    Increase,
}

impl Term for DemandTerm {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Term for StockTerm {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Term for ProductionTerm {
    const ALL: &'static [Self] = &[Self::Decrease, Self::Increase];

    fn name(self) -> &'static str {
        match self {
            Self::Decrease => "decrease",
            Self::Increase => "increase",
        }
    }
}

/// Membership function per label of one variable.
pub struct Terms<L: FixedKey>(pub(crate) FixedMap<L, Shape>);

impl<L: Term> Terms<L> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, label: L, shape: Shape) -> Option<Shape> {
        self.0.insert(label, shape)
    }

    pub fn get(&self, label: L) -> Option<&Shape> {
        self.0.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (L, &Shape)> + '_ {
        self.0.iter()
    }
}

impl<L: Term> Default for Terms<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Term> FromIterator<(L, Shape)> for Terms<L> {
    fn from_iter<It: IntoIterator<Item = (L, Shape)>>(iter: It) -> Self {
        let mut terms = Self::new();

        for (label, shape) in iter {
            terms.insert(label, shape);
        }

        terms
    }
}

impl<L: Term> Clone for Terms<L> {
    fn clone(&self) -> Self {
        self.iter().map(|(label, shape)| (label, *shape)).collect()
    }
}

impl<L: Term> fmt::Debug for Terms<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter().map(|(label, shape)| (label.name(), shape))).finish()
    }
}

/// Degree of membership of one crisp value in each label of a variable.
pub struct Degrees<L: FixedKey>(FixedMap<L, f64>);

impl<L: Term> Degrees<L> {
    pub(crate) fn from_fn(mut degree: impl FnMut(L) -> f64) -> Self {
        let mut map = FixedMap::new();

        for &label in L::ALL {
            map.insert(label, degree(label));
        }

        Self(map)
    }

    /// Degree for `label`; 0 for a label the variable does not define.
    pub fn get(&self, label: L) -> f64 {
        self.0.get(label).copied().unwrap_or(0.)
    }

    pub fn iter(&self) -> impl Iterator<Item = (L, f64)> + '_ {
        L::ALL.iter().map(move |&label| (label, self.get(label)))
    }

    /// Degrees in the canonical label order of `L::ALL`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().map(|(_, degree)| degree).collect()
    }
}

impl<L: Term> Clone for Degrees<L> {
    fn clone(&self) -> Self {
        Self::from_fn(|label| self.get(label))
    }
}

impl<L: Term> PartialEq for Degrees<L> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<L: Term> fmt::Debug for Degrees<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter().map(|(label, degree)| (label.name(), degree))).finish()
    }
}

#[test]
fn test_terms_lookup() {
    let mut terms = Terms::new();

    terms.insert(ProductionTerm::Decrease, Shape::FallingRamp { start: 0., end: 4000. });

    assert!(terms.get(ProductionTerm::Decrease).is_some());
    assert!(terms.get(ProductionTerm::Increase).is_none());
    assert_eq!(terms.iter().count(), 1);
    assert_eq!(terms.clone().iter().count(), 1);
}

#[test]
fn test_degrees_canonical_order() {
    let degrees = Degrees::from_fn(|label: DemandTerm| match label {
        DemandTerm::Low => 0.1,
        DemandTerm::Medium => 0.2,
        DemandTerm::High => 0.3,
    });

    assert_eq!(degrees.to_vec(), vec![0.1, 0.2, 0.3]);
    assert_eq!(degrees.get(DemandTerm::Medium), 0.2);
    assert_eq!(format!("{degrees:?}"), r#"{"low": 0.1, "medium": 0.2, "high": 0.3}"#);
}
