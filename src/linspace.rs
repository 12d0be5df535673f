/// `n` evenly spaced samples over `[min, max]`, both ends included.
pub struct Linspace {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };
        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            // Calculate the value just like numpy.linspace does, which pins
            // the final sample to the end point
            let i = self.index;
            self.index += 1;
            if self.len > 1 && i == self.len - 1 {
                Some(self.end)
            } else {
                Some(self.start + self.step * i as f64)
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    let samples: Vec<_> = Linspace::new(0., 8000., 5).collect();

    assert_eq!(samples, vec![0., 2000., 4000., 6000., 8000.]);

    let samples: Vec<_> = Linspace::new(0., 1., 1000).collect();

    assert_eq!(samples.len(), 1000);
    assert_eq!(samples[0], 0.);
    assert_eq!(samples[999], 1.);
    assert!(samples.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(Linspace::new(3., 5., 1).collect::<Vec<_>>(), vec![3.]);
    assert_eq!(Linspace::new(3., 5., 0).count(), 0);
}
