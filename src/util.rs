use crate::vec2::Vec2;

/// Cubic Bernstein weights sampled at evenly spaced parameters.
///
/// Entry `k` holds `[(1-t)³, 3t(1-t)², 3t²(1-t), t³]` for `t = k / nb_steps`,
/// for `k` in `0..=nb_steps`.
#[derive(Clone, Debug, Default)]
pub(crate) struct CubicBezierFactors {
    weights: Vec<[f64; 4]>,
}

impl CubicBezierFactors {
    pub(crate) fn new(nb_steps: usize) -> CubicBezierFactors {
        let mut factors = CubicBezierFactors::default();
        factors.fill(nb_steps);
        factors
    }

    pub(crate) fn fill(&mut self, nb_steps: usize) {
        let nb_steps = nb_steps.max(1);
        self.weights.clear();
        self.weights.extend((0..=nb_steps).map(|k| {
            // Hit both ends exactly.
            let t = if k == nb_steps {
                1.0
            } else {
                k as f64 / nb_steps as f64
            };
            let mt = 1.0 - t;
            [mt * mt * mt, 3.0 * t * mt * mt, 3.0 * t * t * mt, t * t * t]
        }));
    }

    pub(crate) fn len(&self) -> usize {
        self.weights.len()
    }

    /// Evaluate the `k`-th sample of the cubic through the four points.
    pub(crate) fn sample(&self, k: usize, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Vec2 {
        let [w0, w1, w2, w3] = self.weights[k];
        Vec2::new(
            w0 * p0.x() + w1 * p1.x() + w2 * p2.x() + w3 * p3.x(),
            w0 * p0.y() + w1 * p1.y() + w2 * p2.y() + w3 * p3.y(),
        )
    }
}
