/// Suits in deck order. Card ids run through the suits in blocks of 13
/// in exactly this order, so the discriminant doubles as the block index.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    #[default]
    Diamond = 0,
    Heart = 1,
    Spade = 2,
    Club = 3,
}

impl Suit {
    pub const MAX: Self = Suit::Club;
    pub const MIN: Self = Suit::Diamond;
    pub const fn all() -> [Self; 4] {
        [Suit::Diamond, Suit::Heart, Suit::Spade, Suit::Club]
    }
}

impl TryFrom<u8> for Suit {
    type Error = anyhow::Error;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Suit::Diamond),
            1 => Ok(Suit::Heart),
            2 => Ok(Suit::Spade),
            3 => Ok(Suit::Club),
            _ => Err(anyhow::anyhow!("invalid suit index {}", n)),
        }
    }
}
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Diamond => "d",
                Suit::Heart => "h",
                Suit::Spade => "s",
                Suit::Club => "c",
            }
        )
    }
}
