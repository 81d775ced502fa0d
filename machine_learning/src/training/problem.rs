use ndarray::{Array1, Array2, ArrayView1, Axis, s};

use super::Standardizer;
use crate::{
    MlErr, Result,
    arch::{LogisticRegression, loss::LossFn, sigmoid},
    dataset::Dataset,
};

/// A binary fitting problem over standardized columns.
///
/// Parameters are laid out as `[w_0, .., w_{d-1}, b]`. The objective is the mean loss plus
/// `alpha / 2 * sum((w_j / scale_j)^2)` with `alpha = 1 / (C n)`, that is, the L2 penalty
/// falls on the raw-space weights `w_j / scale_j` and never on the bias. This has the same
/// minimizer as `C * sum(loss) + ||w_raw||^2 / 2`.
pub(super) struct Problem {
    x: Array2<f64>,
    y: Array1<f64>,
    penalty: Array1<f64>,
    scaler: Standardizer,
    classes: [i64; 2],
}

impl Problem {
    /// Standardizes `dataset` and maps its labels to `0.0` and `1.0`.
    ///
    /// # Arguments
    /// * `dataset` - The training samples, which must contain exactly two classes.
    /// * `c` - Inverse of the L2 regularization strength.
    pub fn new(dataset: &Dataset, c: f64) -> Result<Self> {
        let classes = dataset.classes();
        let &[negative, positive] = classes.as_slice() else {
            return Err(MlErr::ClassCount { got: classes.len() });
        };

        // alpha as variance ridge keeps every alpha / scale^2 below 1
        let alpha = 1.0 / (c * dataset.len() as f64);
        let scaler = Standardizer::fit(dataset.x(), alpha)?;
        let penalty = scaler.scale().mapv(|s| alpha / (s * s));

        Ok(Self {
            x: scaler.transform(dataset.x()),
            y: dataset
                .y()
                .mapv(|label| if label == positive { 1.0 } else { 0.0 }),
            penalty,
            scaler,
            classes: [negative, positive],
        })
    }

    #[inline]
    pub fn n_params(&self) -> usize {
        self.x.ncols() + 1
    }

    fn logits(&self, params: &[f64]) -> Array1<f64> {
        let d = self.x.ncols();
        self.x.dot(&ArrayView1::from(&params[..d])) + params[d]
    }

    /// The objective at `params`, writing its gradient into `grad`.
    pub fn objective<L: LossFn>(&self, loss_fn: &L, params: &[f64], grad: &mut [f64]) -> f64 {
        let d = self.x.ncols();
        let w = ArrayView1::from(&params[..d]);

        let z = self.logits(params);
        let dz = loss_fn.loss_prime(z.view(), self.y.view());
        let dw = self.x.t().dot(&dz) + &self.penalty * &w;

        for (g, v) in grad[..d].iter_mut().zip(&dw) {
            *g = *v;
        }
        grad[d] = dz.sum();

        let reg: f64 = self
            .penalty
            .iter()
            .zip(&w)
            .map(|(p, w)| p * w * w)
            .sum();

        loss_fn.loss(z.view(), self.y.view()) + 0.5 * reg
    }

    /// The Hessian of the objective at `params` when the loss is the log loss.
    pub fn log_loss_hessian(&self, params: &[f64]) -> Array2<f64> {
        let d = self.x.ncols();
        let n = self.x.nrows() as f64;

        let weights = self.logits(params).mapv_into(|z| {
            let p = sigmoid(z);
            p * (1.0 - p) / n
        });
        let weighted = &self.x * &weights.view().insert_axis(Axis(1));
        let cross = weighted.sum_axis(Axis(0));

        let mut hessian = Array2::<f64>::zeros((d + 1, d + 1));
        hessian
            .slice_mut(s![..d, ..d])
            .assign(&self.x.t().dot(&weighted));
        hessian.slice_mut(s![..d, d]).assign(&cross);
        hessian.slice_mut(s![d, ..d]).assign(&cross);
        hessian[[d, d]] = weights.sum();

        for (j, p) in self.penalty.iter().enumerate() {
            hessian[[j, j]] += p;
        }

        hessian
    }

    /// Builds the raw-space model for the solution `params`.
    pub fn into_model(self, params: &[f64]) -> LogisticRegression {
        let d = self.x.ncols();
        let (coef, intercept) = self
            .scaler
            .unscale(ArrayView1::from(&params[..d]), params[d]);

        LogisticRegression::new(coef, intercept, self.classes)
    }
}

/// The largest absolute component of `grad`.
pub(super) fn max_abs(grad: &[f64]) -> f64 {
    grad.iter().fold(0.0_f64, |m, g| m.max(g.abs()))
}
