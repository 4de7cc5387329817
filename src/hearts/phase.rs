/// Which decision a situation asks for.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Phase {
    Pass,
    Play,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Phase::Pass => write!(f, "pass"),
            Phase::Play => write!(f, "play"),
        }
    }
}
