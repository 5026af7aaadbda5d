//! Tile symmetry classes and their orientation-group tables.

use std::str::FromStr;
use weft_core::ConfigError;

/// The symmetry class of a tile, named after the letter shape that has
/// the same symmetries.
///
/// A class determines how many visually distinct orientations the tile
/// has, and how the dihedral group acts on those orientations. The
/// action tables are fixed data resolved here, at model construction —
/// there is no name lookup at generation time.
///
/// Orientation `k` in `0..4` is the tile image rotated `k` times 90°
/// counter-clockwise; orientations `4..8` (class `P` only) are the
/// horizontally mirrored image rotated `k - 4` times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
    /// Fully symmetric: 1 orientation.
    X,
    /// Two-fold rotational with mirror symmetry (a straight piece):
    /// 2 orientations.
    I,
    /// Diagonal mirror symmetry only (a corner piece): 4 orientations.
    L,
    /// One mirror axis (a tee piece): 4 orientations.
    T,
    /// Anti-diagonal stroke: 2 orientations.
    Backslash,
    /// No symmetry: all 8 orientations are distinct.
    P,
}

impl Symmetry {
    /// Number of distinct orientations a tile of this class expands to.
    pub fn orientation_count(self) -> u32 {
        match self {
            Self::X => 1,
            Self::I | Self::Backslash => 2,
            Self::L | Self::T => 4,
            Self::P => 8,
        }
    }

    /// Orientation resulting from one 90° counter-clockwise rotation,
    /// indexed by current orientation.
    pub(crate) fn rotation_map(self) -> &'static [u32] {
        match self {
            Self::X => &[0],
            Self::I | Self::Backslash => &[1, 0],
            Self::L | Self::T => &[1, 2, 3, 0],
            Self::P => &[1, 2, 3, 0, 5, 6, 7, 4],
        }
    }

    /// Orientation resulting from one horizontal mirror, indexed by
    /// current orientation.
    pub(crate) fn reflection_map(self) -> &'static [u32] {
        match self {
            Self::X => &[0],
            Self::I => &[0, 1],
            Self::Backslash => &[1, 0],
            Self::T => &[0, 3, 2, 1],
            Self::L => &[3, 2, 1, 0],
            Self::P => &[4, 7, 6, 5, 0, 3, 2, 1],
        }
    }

    /// The full 8-action table of the dihedral group: `action_map[a][o]`
    /// is the orientation a tile currently at orientation `o` lands on
    /// under action `a`. Actions `0..4` are `a` counter-clockwise
    /// rotations; actions `4..8` are a horizontal mirror followed by
    /// `a - 4` rotations.
    pub(crate) fn action_map(self) -> [Vec<u32>; 8] {
        let rotation = self.rotation_map();
        let reflection = self.reflection_map();
        let count = rotation.len();

        let mut map: [Vec<u32>; 8] = Default::default();
        map[0] = (0..count as u32).collect();
        for a in 1..4 {
            map[a] = map[a - 1].iter().map(|&o| rotation[o as usize]).collect();
        }
        map[4] = reflection.to_vec();
        for a in 5..8 {
            map[a] = map[a - 1].iter().map(|&o| rotation[o as usize]).collect();
        }
        map
    }
}

impl FromStr for Symmetry {
    type Err = ConfigError;

    /// Parse a symmetry class from its conventional one-character name.
    /// The diagonal class is written `"\"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Self::X),
            "I" => Ok(Self::I),
            "L" => Ok(Self::L),
            "T" => Ok(Self::T),
            "\\" => Ok(Self::Backslash),
            "P" => Ok(Self::P),
            other => Err(ConfigError::UnknownSymmetry {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Symmetry; 6] = [
        Symmetry::X,
        Symmetry::I,
        Symmetry::L,
        Symmetry::T,
        Symmetry::Backslash,
        Symmetry::P,
    ];

    #[test]
    fn orientation_counts() {
        assert_eq!(Symmetry::X.orientation_count(), 1);
        assert_eq!(Symmetry::I.orientation_count(), 2);
        assert_eq!(Symmetry::Backslash.orientation_count(), 2);
        assert_eq!(Symmetry::L.orientation_count(), 4);
        assert_eq!(Symmetry::T.orientation_count(), 4);
        assert_eq!(Symmetry::P.orientation_count(), 8);
    }

    #[test]
    fn maps_are_permutations_of_the_orientation_range() {
        for sym in ALL {
            let count = sym.orientation_count() as usize;
            for map in [sym.rotation_map(), sym.reflection_map()] {
                assert_eq!(map.len(), count);
                let mut seen = vec![false; count];
                for &o in map {
                    assert!(!seen[o as usize]);
                    seen[o as usize] = true;
                }
            }
        }
    }

    #[test]
    fn four_rotations_are_identity() {
        for sym in ALL {
            let rot = sym.rotation_map();
            for start in 0..rot.len() as u32 {
                let mut o = start;
                for _ in 0..4 {
                    o = rot[o as usize];
                }
                assert_eq!(o, start);
            }
        }
    }

    #[test]
    fn double_reflection_is_identity() {
        for sym in ALL {
            let refl = sym.reflection_map();
            for start in 0..refl.len() as u32 {
                assert_eq!(refl[refl[start as usize] as usize], start);
            }
        }
    }

    #[test]
    fn action_zero_is_identity() {
        for sym in ALL {
            let map = sym.action_map();
            for o in 0..sym.orientation_count() {
                assert_eq!(map[0][o as usize], o);
            }
        }
    }

    #[test]
    fn parse_known_names() {
        assert_eq!("X".parse::<Symmetry>().unwrap(), Symmetry::X);
        assert_eq!("\\".parse::<Symmetry>().unwrap(), Symmetry::Backslash);
        assert_eq!("P".parse::<Symmetry>().unwrap(), Symmetry::P);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "Q".parse::<Symmetry>().unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownSymmetry {
                name: "Q".to_string()
            }
        );
    }
}
