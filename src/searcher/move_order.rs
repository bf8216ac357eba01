use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Order in which candidate moves are tried.
///
/// Ordering never changes the value a search returns. Among moves of equal
/// value the first one tried wins, so shuffling varies the computer's play
/// between equally good moves.
#[derive(Clone, Debug)]
pub enum MoveOrder {
    Natural,
    Shuffled(StdRng),
}

impl Default for MoveOrder {
    fn default() -> Self {
        MoveOrder::Natural
    }
}

impl MoveOrder {
    pub fn shuffled() -> Self {
        MoveOrder::Shuffled(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        MoveOrder::Shuffled(StdRng::seed_from_u64(seed))
    }

    /// `Shuffled` with the given seed, or seeded from entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::shuffled, Self::seeded)
    }

    #[inline]
    pub fn arrange<T>(&mut self, moves: &mut [T]) {
        if let MoveOrder::Shuffled(rng) = self {
            moves.shuffle(rng);
        }
    }
}
