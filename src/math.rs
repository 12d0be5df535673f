use num::Float;

/// Similar to numpy.interp, for a single x: saturates at the first and last
/// coordinate. A vertical segment (repeated x coordinate) evaluates to the
/// larger of its two ends so steps are closed on the inside.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (coords.first(), coords.last()) else {
        return F::zero();
    };

    // Base cases
    if x < x_first {
        return y_first;
    }
    if x > x_last {
        return y_last;
    }

    for window in coords.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        if x1 <= x && x <= x2 {
            if x2 == x1 {
                return F::max(y1, y2);
            }

            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    // Only reachable for NaN or a single coordinate
    if coords.len() == 1 {
        y_first
    } else {
        F::nan()
    }
}

#[test]
fn test_interp() {
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();

    assert_eq!(interp(0., &coords), 3.);
    assert_eq!(interp(1., &coords), 3.);
    assert_eq!(interp(1.5, &coords), 2.5);
    assert!((interp(2.72, &coords) - 0.56).abs() < 1e-12);
    assert_eq!(interp(3.24, &coords), 0.);

    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();

    assert_eq!(interp(2.5, &coords), 4.);
    assert_eq!(interp(-1., &coords), 0.);
    assert_eq!(interp(7.5, &coords), 2.);
}

#[test]
fn test_interp_steps() {
    let rect = [(2.0f64, 0.), (2., 1.), (4., 1.), (4., 0.)];

    assert_eq!(interp(1.999, &rect), 0.);
    assert_eq!(interp(2., &rect), 1.);
    assert_eq!(interp(3., &rect), 1.);
    assert_eq!(interp(4., &rect), 1.);
    assert_eq!(interp(4.001, &rect), 0.);
    assert!(interp(f64::NAN, &rect).is_nan());
    assert_eq!(interp::<f64>(1., &[]), 0.);
}
