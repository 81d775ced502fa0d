use ndarray::{Array1, ArrayView1};

/// A loss function measured on the raw decision values (logits) of a binary classifier.
pub trait LossFn {
    /// The mean loss over all samples.
    ///
    /// # Arguments
    /// * `z` - The decision value of each sample.
    /// * `y` - The expected target of each sample, `0.0` or `1.0`.
    fn loss(&self, z: ArrayView1<f64>, y: ArrayView1<f64>) -> f64;

    /// The derivative of `loss` with respect to each decision value.
    fn loss_prime(&self, z: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64>;
}
