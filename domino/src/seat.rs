use std::str::FromStr;

/// One of the four positions at the table.
///
/// Seats sit in playing order, and opposite seats form a [`Team`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Seat {
    A,
    B,
    C,
    D,
}

/// The two partnerships.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Team {
    /// Seats A and C.
    AC,
    /// Seats B and D.
    BD,
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::A, Seat::B, Seat::C, Seat::D];

    pub fn index(self) -> usize {
        match self {
            Seat::A => 0,
            Seat::B => 1,
            Seat::C => 2,
            Seat::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The seat across the table.
    pub fn partner(self) -> Self {
        match self {
            Seat::A => Seat::C,
            Seat::B => Seat::D,
            Seat::C => Seat::A,
            Seat::D => Seat::B,
        }
    }

    pub fn team(self) -> Team {
        match self {
            Seat::A | Seat::C => Team::AC,
            Seat::B | Seat::D => Team::BD,
        }
    }

    /// Either this seat or its partner.
    pub fn same_side_as(self, other: Seat) -> bool {
        self == other || self.partner() == other
    }

    pub fn name(self) -> &'static str {
        match self {
            Seat::A => "A",
            Seat::B => "B",
            Seat::C => "C",
            Seat::D => "D",
        }
    }
}

impl Team {
    /// The two seats that make up the team.
    pub fn seats(self) -> [Seat; 2] {
        match self {
            Team::AC => [Seat::A, Seat::C],
            Team::BD => [Seat::B, Seat::D],
        }
    }

    pub fn opponents(self) -> Team {
        match self {
            Team::AC => Team::BD,
            Team::BD => Team::AC,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::AC => write!(f, "AC"),
            Team::BD => write!(f, "BD"),
        }
    }
}

/// The error type for the [`FromStr`] instance of [`Seat`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownSeat(pub String);

impl std::error::Error for UnknownSeat {}

impl std::fmt::Display for UnknownSeat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a seat, expected one of A, B, C, D", self.0)
    }
}

impl FromStr for Seat {
    type Err = UnknownSeat;

    /// Accepts the seat name (case-insensitive) or its index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" | "0" => Ok(Seat::A),
            "B" | "b" | "1" => Ok(Seat::B),
            "C" | "c" | "2" => Ok(Seat::C),
            "D" | "d" | "3" => Ok(Seat::D),
            other => Err(UnknownSeat(String::from(other))),
        }
    }
}
