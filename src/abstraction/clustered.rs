use crate::abstraction::*;
use crate::cards::*;
use crate::hearts::*;

/// Cluster-id keys from the nearest centroid of the situation's features.
///
/// A centroid repeats the feature layout, so its action slots hold card ids
/// (averaged over the cluster's members). Action `i` is the card in slot `i + 1`.
#[derive(Debug, Clone)]
pub struct ClusterEncoder<C: Clusterer> {
    clusterer: C,
    memory: Memory,
}

impl<C: Clusterer> ClusterEncoder<C> {
    pub fn new(clusterer: C, memory: Memory) -> Self {
        Self { clusterer, memory }
    }
    pub fn clusterer(&self) -> &C {
        &self.clusterer
    }
}

impl<C: Clusterer> Encoder for ClusterEncoder<C> {
    fn encode(&self, situation: &Situation) -> Option<InfoSetKey> {
        let ref features = Features::new(situation, self.memory);
        self.clusterer
            .assign(features.as_slice())
            .map(InfoSetKey::Cluster)
    }
    fn action(&self, key: &InfoSetKey, situation: &Situation, index: usize) -> Option<Card> {
        match key {
            InfoSetKey::Cluster(id) => self
                .clusterer
                .centroid(*id)?
                .get(Features::LEGAL + index)
                .and_then(|x| Card::try_from(*x).ok()),
            _ => situation.legal().get(index).copied(),
        }
    }
}
