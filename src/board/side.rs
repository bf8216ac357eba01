use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

/// One of the two competitors. The computer is the maximizing side: every
/// search value is expressed from its point of view.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Human = 1,
    Computer = 2,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Human, Side::Computer];

    pub fn opposite(&self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    pub fn maximize_score(&self) -> bool {
        match self {
            Side::Computer => true,
            Side::Human => false,
        }
    }

    pub fn random() -> Self {
        *Self::ALL.choose(&mut rand::thread_rng()).unwrap()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side_str = match self {
            Side::Human => "human",
            Side::Computer => "computer",
        };
        write!(f, "{}", side_str)
    }
}

// used for parsing cli args
type ParseError = &'static str;
impl FromStr for Side {
    type Err = ParseError;
    fn from_str(side: &str) -> Result<Self, Self::Err> {
        match side {
            "human" => Ok(Side::Human),
            "computer" => Ok(Side::Computer),
            "random" => Ok(Side::random()),
            _ => Err("invalid side; options are: human, computer, random"),
        }
    }
}
