use crate::*;
use anyhow::Context;
use rand::rngs::SmallRng;
use std::path::Path;

/// Nearest-cluster lookup over feature vectors.
pub trait Clusterer: Sync {
    /// `None` when no cluster applies.
    fn assign(&self, features: &[f32]) -> Option<usize>;
    fn centroid(&self, id: usize) -> Option<&[f32]>;
}

/// A fixed set of centroids under Manhattan distance.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Centroids(Vec<Vec<f32>>);

impl From<Vec<Vec<f32>>> for Centroids {
    fn from(centers: Vec<Vec<f32>>) -> Self {
        Self(centers)
    }
}

impl Centroids {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn distance(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }

    /// Index of the closest centroid of matching width.
    fn neighbor(&self, x: &[f32]) -> Option<(usize, f32)> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, c)| c.len() == x.len())
            .map(|(i, c)| (i, Self::distance(c, x)))
            .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2))
    }

    /// Lloyd's algorithm, seeded with `k` distinct sample points.
    /// Centers are coordinate means; an empty cluster keeps its center.
    pub fn fit(points: &[Vec<f32>], k: usize, iterations: usize, rng: &mut SmallRng) -> Self {
        let k = k.min(points.len());
        if k == 0 {
            return Self::default();
        }
        let mut kmeans = Self(
            rand::seq::index::sample(rng, points.len(), k)
                .into_iter()
                .map(|i| points[i].clone())
                .collect(),
        );
        let mut labels = vec![usize::MAX; points.len()];
        for t in 0..iterations {
            let next = kmeans.labels(points);
            let moved = next.iter().zip(labels.iter()).filter(|(a, b)| a != b).count();
            labels = next;
            log::debug!("kmeans iteration {:>3}: {:>8} points moved", t, moved);
            if moved == 0 {
                break;
            }
            kmeans = kmeans.recenter(points, &labels);
        }
        kmeans
    }

    fn labels(&self, points: &[Vec<f32>]) -> Vec<usize> {
        #[cfg(feature = "server")]
        use rayon::prelude::*;
        #[cfg(feature = "server")]
        let iter = points.par_iter();
        #[cfg(not(feature = "server"))]
        let iter = points.iter();
        iter.map(|x| self.neighbor(x).map(|(i, _)| i).unwrap_or_default())
            .collect()
    }

    fn recenter(&self, points: &[Vec<f32>], labels: &[usize]) -> Self {
        let mut sums = self.0.iter().map(|c| vec![0.0; c.len()]).collect::<Vec<_>>();
        let mut counts = vec![0usize; self.0.len()];
        for (x, j) in points.iter().zip(labels.iter()) {
            counts[*j] += 1;
            sums[*j].iter_mut().zip(x.iter()).for_each(|(s, v)| *s += v);
        }
        Self(
            sums.into_iter()
                .zip(counts)
                .zip(self.0.iter())
                .map(|((sum, n), old)| match n {
                    0 => old.clone(),
                    n => sum.into_iter().map(|s| s / n as f32).collect(),
                })
                .collect(),
        )
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening centroids {}", path.display()))?;
        let centroids = serde_json::from_reader::<_, Self>(std::io::BufReader::new(file))
            .with_context(|| format!("parsing centroids {}", path.display()))?;
        log::info!("loaded {} centroids from {}", centroids.len(), path.display());
        Ok(centroids)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        use std::io::Write;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating centroids {}", path.display()))?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        log::info!("saved {} centroids to {}", self.len(), path.display());
        Ok(())
    }
}

impl Clusterer for Centroids {
    fn assign(&self, features: &[f32]) -> Option<usize> {
        self.neighbor(features).map(|(i, _)| i)
    }
    fn centroid(&self, id: usize) -> Option<&[f32]> {
        self.0.get(id).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn nearest_by_manhattan() {
        let centroids = Centroids::from(vec![vec![0.0, 0.0], vec![10.0, 0.0], vec![0.0, 3.0, 0.0]]);
        assert_eq!(centroids.assign(&[7.0, 1.0]), Some(1));
        assert_eq!(centroids.assign(&[2.0, 2.0]), Some(0));
        assert_eq!(centroids.assign(&[0.0, 3.0, 0.0]), Some(2));
        assert_eq!(centroids.assign(&[1.0]), None);
        assert_eq!(Centroids::default().assign(&[1.0]), None);
        assert_eq!(centroids.centroid(1), Some(&[10.0, 0.0][..]));
        assert_eq!(centroids.centroid(3), None);
    }

    #[test]
    fn separates_obvious_groups() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let points = (0..40)
            .map(|i| match i % 2 {
                0 => vec![0.0 + (i % 5) as f32 * 0.1, 0.0],
                _ => vec![100.0 + (i % 5) as f32 * 0.1, 100.0],
            })
            .collect::<Vec<_>>();
        let centroids = Centroids::fit(&points, 2, 16, rng);
        assert_eq!(centroids.len(), 2);
        assert_ne!(centroids.assign(&[0.0, 0.0]), centroids.assign(&[100.0, 100.0]));
    }

    #[test]
    fn fewer_points_than_clusters() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let centroids = Centroids::fit(&[vec![1.0], vec![2.0]], 10, 4, rng);
        assert_eq!(centroids.len(), 2);
        assert!(Centroids::fit(&[], 10, 4, rng).is_empty());
    }
}
