use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::math::interp;

/// A membership function as data: the kind of curve plus its breakpoints.
///
/// Every shape is total over the reals and saturates to a degree in `[0, 1]`
/// outside its breakpoints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// 1 at or below `start`, 0 at or above `end`.
    FallingRamp { start: f64, end: f64 },
    /// 0 at or below `start`, 1 at or above `end`.
    RisingRamp { start: f64, end: f64 },
    /// 1 at `center`, 0 once `|x - center| >= half_width`.
    Triangle { center: f64, half_width: f64 },
    /// 0 outside `[a, d]`, 1 on `[b, c]`, linear flanks in between.
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },
    /// 1 on `[start, end]`, 0 elsewhere.
    Rectangle { start: f64, end: f64 },
}

impl Shape {
    pub fn evaluate(&self, x: f64) -> f64 {
        let degree = match *self {
            Shape::FallingRamp { start, end } => interp(x, &[(start, 1.), (end, 0.)]),
            Shape::RisingRamp { start, end } => interp(x, &[(start, 0.), (end, 1.)]),
            Shape::Triangle { center, half_width } => interp(
                x,
                &[(center - half_width, 0.), (center, 1.), (center + half_width, 0.)],
            ),
            Shape::Trapezoid { a, b, c, d } => interp(x, &[(a, 0.), (b, 1.), (c, 1.), (d, 0.)]),
            Shape::Rectangle { start, end } => interp(x, &[(start, 0.), (start, 1.), (end, 1.), (end, 0.)]),
        };

        // f64::max/min drop a NaN operand, so this also maps NaN to 0
        degree.max(0.).min(1.)
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        let params = match *self {
            Shape::FallingRamp { start, end } | Shape::RisingRamp { start, end } | Shape::Rectangle { start, end } => {
                vec![start, end]
            },
            Shape::Triangle { center, half_width } => vec![center, half_width],
            Shape::Trapezoid { a, b, c, d } => vec![a, b, c, d],
        };

        if !params.iter().all(|p| p.is_finite()) {
            return Err(ShapeError::NonFinite);
        }

        match *self {
            Shape::FallingRamp { start, end } | Shape::RisingRamp { start, end } if end <= start => {
                Err(ShapeError::EmptyRamp { start, end })
            },
            Shape::Triangle { half_width, .. } if half_width <= 0. => Err(ShapeError::NonPositiveHalfWidth(half_width)),
            Shape::Trapezoid { a, b, c, d } if !(a <= b && b <= c && c <= d && a < d) => {
                Err(ShapeError::UnorderedTrapezoid { a, b, c, d })
            },
            Shape::Rectangle { start, end } if end <= start => Err(ShapeError::EmptyRectangle { start, end }),
            _ => Ok(()),
        }
    }
}

#[test]
fn test_ramps() {
    let low = Shape::FallingRamp { start: 0., end: 3000. };
    let high = Shape::RisingRamp { start: 4000., end: 7000. };

    assert_eq!(low.evaluate(-500.), 1.);
    assert_eq!(low.evaluate(0.), 1.);
    assert_eq!(low.evaluate(1500.), 0.5);
    assert_eq!(low.evaluate(3000.), 0.);
    assert_eq!(low.evaluate(9000.), 0.);

    assert_eq!(high.evaluate(0.), 0.);
    assert_eq!(high.evaluate(4000.), 0.);
    assert_eq!(high.evaluate(5500.), 0.5);
    assert_eq!(high.evaluate(7000.), 1.);
    // Saturates instead of growing past 1
    assert_eq!(high.evaluate(70_000.), 1.);
}

#[test]
fn test_triangle() {
    let medium = Shape::Triangle {
        center: 3500.,
        half_width: 1500.,
    };

    assert_eq!(medium.evaluate(3500.), 1.);
    assert!((medium.evaluate(3000.) - 2. / 3.).abs() < 1e-12);
    assert!((medium.evaluate(4000.) - 2. / 3.).abs() < 1e-12);
    assert_eq!(medium.evaluate(2000.), 0.);
    assert_eq!(medium.evaluate(5000.), 0.);
    assert_eq!(medium.evaluate(-1e9), 0.);
}

#[test]
fn test_trapezoid_and_rectangle() {
    let trap = Shape::Trapezoid {
        a: 0.,
        b: 10.,
        c: 20.,
        d: 40.,
    };

    assert_eq!(trap.evaluate(-1.), 0.);
    assert_eq!(trap.evaluate(5.), 0.5);
    assert_eq!(trap.evaluate(15.), 1.);
    assert_eq!(trap.evaluate(30.), 0.5);
    assert_eq!(trap.evaluate(41.), 0.);

    let shoulder = Shape::Trapezoid {
        a: 0.,
        b: 0.,
        c: 20.,
        d: 40.,
    };

    assert_eq!(shoulder.evaluate(0.), 1.);
    assert_eq!(shoulder.evaluate(-0.1), 0.);

    let rect = Shape::Rectangle { start: 1., end: 2. };

    assert_eq!(rect.evaluate(0.99), 0.);
    assert_eq!(rect.evaluate(1.), 1.);
    assert_eq!(rect.evaluate(1.5), 1.);
    assert_eq!(rect.evaluate(2.), 1.);
    assert_eq!(rect.evaluate(2.01), 0.);
}

#[test]
fn test_validate() {
    assert!(Shape::FallingRamp { start: 0., end: 1. }.validate().is_ok());
    assert_eq!(
        Shape::RisingRamp { start: 5., end: 5. }.validate(),
        Err(ShapeError::EmptyRamp { start: 5., end: 5. })
    );
    assert_eq!(
        Shape::Triangle {
            center: 1.,
            half_width: 0.
        }
        .validate(),
        Err(ShapeError::NonPositiveHalfWidth(0.))
    );
    assert!(matches!(
        Shape::Trapezoid {
            a: 0.,
            b: 3.,
            c: 2.,
            d: 4.
        }
        .validate(),
        Err(ShapeError::UnorderedTrapezoid { .. })
    ));
    assert!(matches!(
        Shape::Rectangle { start: 2., end: 1. }.validate(),
        Err(ShapeError::EmptyRectangle { .. })
    ));
    assert_eq!(
        Shape::FallingRamp {
            start: f64::NAN,
            end: 1.
        }
        .validate(),
        Err(ShapeError::NonFinite)
    );
}

#[test]
fn test_nan_input_is_zero() {
    assert_eq!(Shape::RisingRamp { start: 0., end: 1. }.evaluate(f64::NAN), 0.);
}
