//! Strongly-typed identifiers.

use std::fmt;

/// Identifies one unit of the generation alphabet.
///
/// A unit is an extracted pattern (overlapping model) or an oriented tile
/// variant (simple-tiled model). Units are assigned sequential IDs at
/// model construction; `UnitId(n)` is the n-th unit in the model's
/// alphabet order, which is deterministic for a given input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u32);

impl UnitId {
    /// The ID as a `usize` array index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for UnitId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_id_roundtrip() {
        let id = UnitId::from(7u32);
        assert_eq!(id, UnitId(7));
        assert_eq!(id.index(), 7);
        assert_eq!(id.to_string(), "7");
    }
}
