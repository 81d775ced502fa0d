use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{MlErr, Result};

/// Per-column standardization: `(x - mean) / scale`.
///
/// Only used while solving; the fitted weights are mapped back to raw feature space with
/// `unscale` so the stored model never needs it.
#[derive(Debug, Clone)]
pub struct Standardizer {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl Standardizer {
    /// Learns the mean of every column of `x` and a scale of `sqrt(variance + ridge)`.
    ///
    /// With `ridge == 0.0` this is the population standard deviation. A zero scale becomes
    /// `1.0`.
    ///
    /// # Arguments
    /// * `x` - The samples, one per row.
    /// * `ridge` - Non negative amount added to every column's variance.
    pub fn fit(x: ArrayView2<f64>, ridge: f64) -> Result<Self> {
        let mean = x.mean_axis(Axis(0)).ok_or(MlErr::EmptyDataset)?;
        let scale = x
            .var_axis(Axis(0), 0.0)
            .mapv_into(|var| (var + ridge).sqrt())
            .mapv_into(|s| if s > f64::EPSILON { s } else { 1.0 });

        Ok(Self { mean, scale })
    }

    pub fn scale(&self) -> ArrayView1<'_, f64> {
        self.scale.view()
    }

    pub fn transform(&self, x: ArrayView2<f64>) -> Array2<f64> {
        (&x - &self.mean) / &self.scale
    }

    /// Maps weights learned on standardized columns back to raw columns.
    ///
    /// # Arguments
    /// * `coef` - The weights in standardized space.
    /// * `intercept` - The bias in standardized space.
    ///
    /// # Returns
    /// The `(coef, intercept)` pair that gives the same decision values on raw inputs.
    pub fn unscale(&self, coef: ArrayView1<f64>, intercept: f64) -> (Array1<f64>, f64) {
        let raw = &coef / &self.scale;
        let shift = raw.dot(&self.mean);
        (raw, intercept - shift)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn transform_centers_and_scales() {
        let x = array![[1.0, 10.0], [3.0, 10.0]];
        let scaler = Standardizer::fit(x.view(), 0.0).unwrap();
        let t = scaler.transform(x.view());
        assert_eq!(t, array![[-1.0, 0.0], [1.0, 0.0]]);
    }

    #[test]
    fn unscale_preserves_decision_values() {
        let x = array![[1.0, 200.0], [2.0, 400.0], [4.0, 100.0]];
        let scaler = Standardizer::fit(x.view(), 0.0).unwrap();
        let (w, b) = (array![0.7, -1.3], 0.2);

        let expected = scaler.transform(x.view()).dot(&w) + b;
        let (raw_w, raw_b) = scaler.unscale(w.view(), b);
        let got = x.dot(&raw_w) + raw_b;

        for (e, g) in expected.iter().zip(&got) {
            assert!((e - g).abs() < 1e-12);
        }
    }

    #[test]
    fn ridge_is_added_to_the_variance() {
        let x = array![[0.0, 5.0], [2.0, 5.0]];
        let scaler = Standardizer::fit(x.view(), 0.25).unwrap();
        // variances are 1 and 0
        assert_eq!(scaler.scale(), array![1.25_f64.sqrt(), 0.5]);
    }
}
