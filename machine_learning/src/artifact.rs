//! Persistence of fitted models as safetensors files.
//!
//! A model file holds three tensors: `coef` (`F64`, `[1, n_features]`), `intercept`
//! (`F64`, `[1]`) and `classes` (`I64`, `[2]`), plus a `model` metadata entry naming the
//! model kind.

use std::{collections::HashMap, fs, path::Path};

use bytemuck::Pod;
use log::debug;
use ndarray::Array1;
use safetensors::{Dtype, SafeTensors, tensor::TensorView};

use crate::{MlErr, Result, arch::LogisticRegression};

const COEF: &str = "coef";
const INTERCEPT: &str = "intercept";
const CLASSES: &str = "classes";

const MODEL_KEY: &str = "model";
const MODEL_KIND: &str = "logistic_regression";

impl LogisticRegression {
    /// Writes the model to `path`, replacing any file already there.
    ///
    /// # Arguments
    /// * `path` - Where to write the model file.
    ///
    /// # Returns
    /// An error if serialization or the write fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path.as_ref(), &bytes)?;
        debug!("wrote {} bytes to {}", bytes.len(), path.as_ref().display());
        Ok(())
    }

    /// Reads a model previously written by `save`.
    ///
    /// # Arguments
    /// * `path` - The model file.
    ///
    /// # Returns
    /// The model, or an error if the file is missing or doesn't hold a valid model.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Serializes the model into an in-memory safetensors buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let coef = self.coef().to_vec();
        let intercept = [self.intercept()];
        let classes = self.classes();

        let tensors = [
            (
                COEF,
                TensorView::new(Dtype::F64, vec![1, coef.len()], bytemuck::cast_slice(&coef))?,
            ),
            (
                INTERCEPT,
                TensorView::new(Dtype::F64, vec![1], bytemuck::cast_slice(&intercept))?,
            ),
            (
                CLASSES,
                TensorView::new(Dtype::I64, vec![2], bytemuck::cast_slice(&classes))?,
            ),
        ];

        let metadata = Some(HashMap::from([(
            MODEL_KEY.to_string(),
            MODEL_KIND.to_string(),
        )]));

        Ok(safetensors::serialize(tensors, &metadata)?)
    }

    /// Parses a safetensors buffer produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (_, metadata) = SafeTensors::read_metadata(bytes)?;
        let kind = metadata
            .metadata()
            .as_ref()
            .and_then(|entries| entries.get(MODEL_KEY));

        if kind.map(String::as_str) != Some(MODEL_KIND) {
            return Err(MlErr::Artifact(format!(
                "expected a '{MODEL_KIND}' model, found {kind:?}"
            )));
        }

        let tensors = SafeTensors::deserialize(bytes)?;

        let (shape, coef) = read_tensor::<f64>(&tensors, COEF, Dtype::F64)?;
        let &[1, n_features] = shape.as_slice() else {
            return Err(MlErr::Artifact(format!(
                "'{COEF}' must have shape [1, n_features], got {shape:?}"
            )));
        };

        let (shape, intercept) = read_tensor::<f64>(&tensors, INTERCEPT, Dtype::F64)?;
        let &[intercept] = intercept.as_slice() else {
            return Err(MlErr::Artifact(format!(
                "'{INTERCEPT}' must have shape [1], got {shape:?}"
            )));
        };

        let (shape, classes) = read_tensor::<i64>(&tensors, CLASSES, Dtype::I64)?;
        let &[negative, positive] = classes.as_slice() else {
            return Err(MlErr::Artifact(format!(
                "'{CLASSES}' must have shape [2], got {shape:?}"
            )));
        };

        if negative == positive {
            return Err(MlErr::Artifact(format!(
                "'{CLASSES}' must hold two distinct labels, got [{negative}, {positive}]"
            )));
        }

        debug!("decoded a {MODEL_KIND} model with {n_features} features");
        Ok(Self::new(
            Array1::from_vec(coef),
            intercept,
            [negative, positive],
        ))
    }
}

/// Reads the tensor `name`, checking it holds elements of `dtype`.
fn read_tensor<T: Pod>(
    tensors: &SafeTensors<'_>,
    name: &str,
    dtype: Dtype,
) -> Result<(Vec<usize>, Vec<T>)> {
    let view = tensors.tensor(name)?;
    if view.dtype() != dtype {
        return Err(MlErr::Artifact(format!(
            "'{name}' must be {dtype:?}, got {:?}",
            view.dtype()
        )));
    }

    // the buffer is not guaranteed to be aligned for `T`
    let values = bytemuck::pod_collect_to_vec::<u8, T>(view.data());
    Ok((view.shape().to_vec(), values))
}
