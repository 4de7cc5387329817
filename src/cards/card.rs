use super::rank::Rank;
use super::suit::Suit;
use crate::Arbitrary;

/// A playing card encoded as a single byte.
///
/// The 52 cards are mapped to ids `1..=52` in blocks of 13 per suit,
/// in [`Suit`] order (diamonds, hearts, spades, clubs), with ranks ascending
/// from two to ace inside each block. The id is what appears in feature
/// vectors, exact keys and deal logs.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    pub const QUEEN_OF_SPADES: Self = Self(37);
    pub const TWO_OF_CLUBS: Self = Self(40);

    pub fn id(&self) -> u8 {
        self.0
    }
    pub fn suit(&self) -> Suit {
        match (self.0 - 1) / 13 {
            0 => Suit::Diamond,
            1 => Suit::Heart,
            2 => Suit::Spade,
            _ => Suit::Club,
        }
    }
    pub fn rank(&self) -> Rank {
        Rank::try_from((self.0 - 1) % 13).unwrap_or_default()
    }
    pub fn is_heart(&self) -> bool {
        self.suit() == Suit::Heart
    }
    /// Penalty points carried by this card.
    pub fn points(&self) -> u8 {
        match *self {
            Self::QUEEN_OF_SPADES => 13,
            card if card.is_heart() => 1,
            _ => 0,
        }
    }
    /// All 52 cards in id order.
    pub fn deck() -> Vec<Self> {
        (1..=crate::DECK_SIZE as u8).map(Self).collect()
    }
    /// Dissimilarity used when a stored action has to be replaced by a legal one.
    /// Same suit: rank difference. Otherwise the rank difference plus a suit
    /// offset, which is larger when exactly one of the two cards is a heart.
    pub fn distance(&self, other: &Self) -> u8 {
        let ranks = u8::from(self.rank()).abs_diff(u8::from(other.rank()));
        match (self.suit() == other.suit(), self.is_heart() != other.is_heart()) {
            (true, _) => ranks,
            (false, true) => ranks + 15,
            (false, false) => ranks + 5,
        }
    }
    /// Most similar card among the candidates. Ties resolve to the earliest candidate.
    pub fn nearest(&self, candidates: &[Self]) -> Option<Self> {
        candidates
            .iter()
            .copied()
            .min_by_key(|c| self.distance(c))
    }
}

/// (Rank, Suit) isomorphism
impl From<(Rank, Suit)> for Card {
    fn from((r, s): (Rank, Suit)) -> Self {
        Self(u8::from(s) * 13 + u8::from(r) + 1)
    }
}

/// u8 isomorphism
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.0
    }
}
impl TryFrom<u8> for Card {
    type Error = anyhow::Error;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1..=52 => Ok(Self(n)),
            _ => Err(anyhow::anyhow!("card id {} outside 1..=52", n)),
        }
    }
}
/// feature-vector values are card ids or the sentinel
impl TryFrom<f32> for Card {
    type Error = anyhow::Error;
    fn try_from(x: f32) -> Result<Self, Self::Error> {
        match x.round() {
            x if x >= 1.0 && x <= 52.0 => Self::try_from(x as u8),
            _ => Err(anyhow::anyhow!("feature value {} is not a card", x)),
        }
    }
}

impl Arbitrary for Card {
    fn random() -> Self {
        use rand::Rng;
        Self(rand::rng().random_range(1..=crate::DECK_SIZE as u8))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_layout() {
        assert_eq!(Card::from((Rank::Two, Suit::Diamond)).id(), 1);
        assert_eq!(Card::from((Rank::Two, Suit::Heart)).id(), 14);
        assert_eq!(Card::from((Rank::Ace, Suit::Heart)).id(), 26);
        assert_eq!(Card::from((Rank::Queen, Suit::Spade)), Card::QUEEN_OF_SPADES);
        assert_eq!(Card::from((Rank::Two, Suit::Club)), Card::TWO_OF_CLUBS);
        assert_eq!(Card::from((Rank::Ace, Suit::Club)).id(), 52);
    }

    #[test]
    fn bijective_rank_suit() {
        for card in Card::deck() {
            assert_eq!(card, Card::from((card.rank(), card.suit())));
        }
    }

    #[test]
    fn penalty_points() {
        let total = Card::deck().iter().map(Card::points).map(u32::from).sum::<u32>();
        assert_eq!(total, crate::MOON_POINTS as u32);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Card::try_from(0u8).is_err());
        assert!(Card::try_from(53u8).is_err());
        assert!(Card::try_from(crate::SENTINEL).is_err());
        assert_eq!(Card::try_from(37.0f32).ok(), Some(Card::QUEEN_OF_SPADES));
    }

    #[test]
    fn similarity() {
        let c = |n: u8| Card::try_from(n).unwrap();
        // same suit: rank difference
        assert_eq!(c(1).distance(&c(4)), 3);
        // neither is a heart: +5
        assert_eq!(c(1).distance(&c(27)), 5);
        // exactly one is a heart: +15
        assert_eq!(c(1).distance(&c(15)), 16);
        assert_eq!(c(15).distance(&c(1)), 16);
    }

    #[test]
    fn nearest_prefers_same_suit() {
        let c = |n: u8| Card::try_from(n).unwrap();
        let legal = vec![c(14), c(30), c(5)];
        assert_eq!(c(3).nearest(&legal), Some(c(5)));
        assert_eq!(c(20).nearest(&legal), Some(c(14)));
        assert_eq!(c(3).nearest(&[]), None);
    }

    #[test]
    fn serde_as_id() {
        let json = serde_json::to_string(&Card::QUEEN_OF_SPADES).unwrap();
        assert_eq!(json, "37");
        assert!(serde_json::from_str::<Card>("0").is_err());
    }
}
