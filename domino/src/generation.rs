/// Identifies one game session on the client.
///
/// Every asynchronous request is tagged with the generation it was issued
/// under, so that its response can be dropped if the session was reset in
/// the meantime.
///
/// ```
/// use domino::Generation;
/// let first = Generation::default();
/// let second = first.next();
/// assert!(second > first);
/// assert_eq!(Generation::from(second.get()), second);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use] // Because users might expect this to be a mutating method
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Generation {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
