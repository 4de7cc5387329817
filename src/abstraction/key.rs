use crate::*;
use std::cmp::Ordering;

/// Abstracted identity of an information set.
///
/// Situations that map to the same key share one table entry.
/// Learned keys carry action values instead of an identity and are never
/// stored; equality, hashing and order over them use the bit patterns of
/// the values so that the type stays a total order.
#[derive(Debug, Clone)]
pub enum InfoSetKey {
    Exact(String),
    Cluster(usize),
    Learned(Vec<Utility>),
}

impl InfoSetKey {
    /// Whether this key addresses a table entry.
    pub fn is_stored(&self) -> bool {
        !matches!(self, InfoSetKey::Learned(_))
    }
    fn tag(&self) -> u8 {
        match self {
            InfoSetKey::Exact(_) => 0,
            InfoSetKey::Cluster(_) => 1,
            InfoSetKey::Learned(_) => 2,
        }
    }
}

impl PartialEq for InfoSetKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for InfoSetKey {}

impl PartialOrd for InfoSetKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for InfoSetKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (InfoSetKey::Exact(a), InfoSetKey::Exact(b)) => a.cmp(b),
            (InfoSetKey::Cluster(a), InfoSetKey::Cluster(b)) => a.cmp(b),
            (InfoSetKey::Learned(a), InfoSetKey::Learned(b)) => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            _ => self.tag().cmp(&other.tag()),
        }
    }
}

impl std::hash::Hash for InfoSetKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
        match self {
            InfoSetKey::Exact(s) => s.hash(state),
            InfoSetKey::Cluster(id) => id.hash(state),
            InfoSetKey::Learned(values) => values
                .iter()
                .map(|v| v.to_bits())
                .for_each(|bits| bits.hash(state)),
        }
    }
}

impl std::fmt::Display for InfoSetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InfoSetKey::Exact(s) => write!(f, "{}", s),
            InfoSetKey::Cluster(id) => write!(f, "{}", id),
            InfoSetKey::Learned(values) => write!(
                f,
                "~{}",
                values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }
}

impl std::str::FromStr for InfoSetKey {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s.starts_with('~') => Ok(InfoSetKey::Learned(
                s[1..]
                    .split(',')
                    .filter(|v| !v.is_empty())
                    .map(|v| v.trim().parse::<Utility>())
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            s if s.contains(':') => Ok(InfoSetKey::Exact(s.to_string())),
            s => s
                .parse::<usize>()
                .map(InfoSetKey::Cluster)
                .map_err(|_| anyhow::anyhow!("unrecognized infoset key {:?}", s)),
        }
    }
}
