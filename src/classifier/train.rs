use tracing::{debug, info};

use super::dataset::LabeledRow;
use super::error::ClassifierError;
use super::model::Classifier;
use crate::constants::{DEFAULT_MAX_FEATURES, DEFAULT_MAX_ITER};
use crate::features::{LexicalVector, Vocabulary};

/// Hyperparameters for [`train`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Vocabulary size cap (most frequent terms are kept).
    pub max_features: usize,
    /// Gradient-descent iteration cap.
    pub max_iter: usize,
    pub learning_rate: f64,
    /// Inverse L2 regularization strength.
    pub c: f64,
    /// Stop once the loss changes by less than this between iterations.
    pub tolerance: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            max_iter: DEFAULT_MAX_ITER,
            learning_rate: 0.5,
            c: 1.0,
            tolerance: 1e-6,
        }
    }
}

/// Fits vocabulary and logistic weights on `rows`.
///
/// Loss is mean log-loss plus `||w||^2 / (2 * C * n)`; the bias is not
/// penalized. Fails on an empty corpus or one containing a single label.
pub fn train(rows: &[LabeledRow], config: &TrainingConfig) -> Result<Classifier, ClassifierError> {
    let first = rows.first().ok_or(ClassifierError::EmptyCorpus)?;
    if rows.iter().all(|r| r.label == first.label) {
        return Err(ClassifierError::SingleClass { label: first.label });
    }

    let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
    let vocabulary = Vocabulary::fit(&texts, config.max_features);

    // Rows with no surviving text still count toward the loss as all-zero features.
    let features: Vec<LexicalVector> = texts
        .iter()
        .map(|t| vocabulary.encode(t).unwrap_or_default())
        .collect();
    let labels: Vec<f64> = rows.iter().map(|r| f64::from(r.label)).collect();

    let (weights, bias, iterations, loss) = gradient_descent(&features, &labels, vocabulary.len(), config);

    info!(
        rows = rows.len(),
        vocabulary = vocabulary.len(),
        iterations,
        loss,
        "Classifier trained"
    );

    Classifier::new(
        vocabulary,
        weights.into_iter().map(|w| w as f32).collect(),
        bias as f32,
    )
}

fn stable_sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}

fn sparse_dot(x: &LexicalVector, w: &[f64]) -> f64 {
    x.entries()
        .iter()
        .map(|&(id, v)| f64::from(v) * w[id as usize])
        .sum()
}

/// Full-batch gradient descent. Returns `(weights, bias, iterations, final_loss)`.
fn gradient_descent(
    features: &[LexicalVector],
    labels: &[f64],
    dim: usize,
    config: &TrainingConfig,
) -> (Vec<f64>, f64, usize, f64) {
    let n = labels.len() as f64;
    let l2 = 1.0 / (config.c * n);
    let eps = 1e-15;

    let mut weights = vec![0.0f64; dim];
    let mut bias = 0.0f64;
    let mut prev_loss = f64::MAX;
    let mut loss = f64::MAX;
    let mut iterations = 0;

    for iter in 0..config.max_iter {
        iterations = iter + 1;
        let mut grad_w = vec![0.0f64; dim];
        let mut grad_b = 0.0f64;
        loss = 0.0;

        for (x, &y) in features.iter().zip(labels) {
            let p = stable_sigmoid(sparse_dot(x, &weights) + bias);
            let err = p - y;
            loss -= y * (p + eps).ln() + (1.0 - y) * (1.0 - p + eps).ln();
            for &(id, v) in x.entries() {
                grad_w[id as usize] += err * f64::from(v);
            }
            grad_b += err;
        }

        let penalty: f64 = weights.iter().map(|w| w * w).sum::<f64>() * l2 / 2.0;
        loss = loss / n + penalty;

        for (w, gw) in weights.iter_mut().zip(&grad_w) {
            *w -= config.learning_rate * (gw / n + l2 * *w);
        }
        bias -= config.learning_rate * grad_b / n;

        if (prev_loss - loss).abs() < config.tolerance {
            debug!(iterations, loss, "Gradient descent converged");
            break;
        }
        prev_loss = loss;
    }

    (weights, bias, iterations, loss)
}
