use ndarray::{Array1, ArrayView1, Zip};

use super::LossFn;
use crate::arch::sigmoid::{sigmoid, softplus};

/// Binary cross entropy of the logistic function's output, averaged over samples.
#[derive(Default, Clone, Copy)]
pub struct LogLoss;

impl LossFn for LogLoss {
    // -[y ln s(z) + (1 - y) ln(1 - s(z))] == softplus(z) - y z
    fn loss(&self, z: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        if z.is_empty() {
            return 0.0;
        }

        let total = Zip::from(&z)
            .and(&y)
            .fold(0.0, |acc, &z, &y| acc + softplus(z) - y * z);

        total / z.len() as f64
    }

    fn loss_prime(&self, z: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64> {
        let n = z.len().max(1) as f64;
        Zip::from(&z)
            .and(&y)
            .map_collect(|&z, &y| (sigmoid(z) - y) / n)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn loss_at_zero_logit_is_ln2() {
        let loss = LogLoss.loss(array![0.0, 0.0].view(), array![0.0, 1.0].view());
        assert!((loss - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn confident_correct_predictions_have_small_loss() {
        let loss = LogLoss.loss(array![-20.0, 20.0].view(), array![0.0, 1.0].view());
        assert!(loss < 1e-8);
    }

    #[test]
    fn loss_prime_matches_finite_differences() {
        let z = array![0.3, -1.2, 2.5];
        let y = array![1.0, 0.0, 0.0];
        let grad = LogLoss.loss_prime(z.view(), y.view());

        let h = 1e-6;
        for i in 0..z.len() {
            let mut up = z.clone();
            let mut down = z.clone();
            up[i] += h;
            down[i] -= h;
            let numeric =
                (LogLoss.loss(up.view(), y.view()) - LogLoss.loss(down.view(), y.view())) / (2. * h);
            assert!((grad[i] - numeric).abs() < 1e-7, "component {i}");
        }
    }
}
