use crate::*;
use anyhow::Context;
use std::path::Path;

/// A trained function from feature vectors to per-action values.
pub trait Approximator: Sync {
    fn predict(&self, features: &[f32]) -> anyhow::Result<Vec<Utility>>;
}

/// Affine model `y = W·x + b`, loaded from a JSON artifact.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Linear {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

impl Linear {
    pub fn new(weights: Vec<Vec<f32>>, bias: Vec<f32>) -> anyhow::Result<Self> {
        if weights.len() != bias.len() {
            anyhow::bail!("{} weight rows for {} outputs", weights.len(), bias.len());
        }
        Ok(Self { weights, bias })
    }
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening model {}", path.display()))?;
        let model = serde_json::from_reader::<_, Self>(std::io::BufReader::new(file))?;
        Self::new(model.weights, model.bias)
    }
}

impl Approximator for Linear {
    fn predict(&self, features: &[f32]) -> anyhow::Result<Vec<Utility>> {
        self.weights
            .iter()
            .zip(self.bias.iter())
            .map(|(row, b)| match row.len() == features.len() {
                true => Ok(b + row.iter().zip(features).map(|(w, x)| w * x).sum::<f32>()),
                false => Err(anyhow::anyhow!(
                    "model expects {} features, got {}",
                    row.len(),
                    features.len()
                )),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affine() {
        let model = Linear::new(vec![vec![1.0, 0.0], vec![0.5, 2.0]], vec![0.0, 1.0]).unwrap();
        assert_eq!(model.predict(&[2.0, 3.0]).unwrap(), vec![2.0, 8.0]);
        assert!(model.predict(&[1.0]).is_err());
        assert!(Linear::new(vec![vec![1.0]], vec![]).is_err());
    }
}
