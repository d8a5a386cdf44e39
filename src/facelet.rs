use std::fmt;

use crate::cubie::CubieCube;
use crate::error::Error;

/// Names the colors of the cube facelets: up, right, front, down, left, back.
#[rustfmt::skip]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Eq, Hash)]
pub enum Color {
    U, R, F, D, L, B,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Cube on the facelet level.
///
/// The facelet representation follows the ordering: U-R-F-D-L-B, nine
/// stickers per face row-major.
///
/// A solved facelet is `UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct FaceCube {
    pub f: [Color; 54],
}

/// Solved cube on the facelet level.
#[rustfmt::skip]
pub const SOLVED_FACE_CUBE: FaceCube = FaceCube {
    f: [
        Color::U, Color::U, Color::U, Color::U, Color::U, Color::U, Color::U, Color::U, Color::U,
        Color::R, Color::R, Color::R, Color::R, Color::R, Color::R, Color::R, Color::R, Color::R,
        Color::F, Color::F, Color::F, Color::F, Color::F, Color::F, Color::F, Color::F, Color::F,
        Color::D, Color::D, Color::D, Color::D, Color::D, Color::D, Color::D, Color::D, Color::D,
        Color::L, Color::L, Color::L, Color::L, Color::L, Color::L, Color::L, Color::L, Color::L,
        Color::B, Color::B, Color::B, Color::B, Color::B, Color::B, Color::B, Color::B, Color::B,
    ],
};

impl Default for FaceCube {
    fn default() -> Self {
        SOLVED_FACE_CUBE
    }
}

/// Read a 54-character facelet string. Any six distinct characters are
/// accepted; the character on each center sticker names that face's
/// color. Wrong length, a character matching no center, or a color
/// appearing on other than nine stickers all reject the string.
impl TryFrom<&str> for FaceCube {
    type Error = Error;
    fn try_from(cube_string: &str) -> Result<Self, Self::Error> {
        let chars: Vec<char> = cube_string.chars().collect();
        if chars.len() != 54 {
            return Err(Error::InvalidFacelet);
        }

        let mut centers = [' '; 6];
        for i in 0..6 {
            centers[i] = chars[i * 9 + 4];
            for j in 0..i {
                if centers[j] == centers[i] {
                    return Err(Error::InvalidFacelet);
                }
            }
        }

        let mut face_cube = FaceCube::default();
        let mut count = [0; 6];
        for (i, c) in chars.iter().enumerate() {
            let face = centers
                .iter()
                .position(|x| x == c)
                .ok_or(Error::InvalidFacelet)?;
            face_cube.f[i] = ALL_COLORS[face];
            count[face] += 1;
        }
        if count.iter().any(|&n| n != 9) {
            return Err(Error::InvalidFacelet);
        }
        Ok(face_cube)
    }
}

/// Gives the facelet representation of a cubie cube, walking each piece
/// identity and orientation through the facelet tables.
impl From<&CubieCube> for FaceCube {
    fn from(cc: &CubieCube) -> Self {
        let mut face = FaceCube::default();
        for (i, corner_faces) in CORNER_FACELET.iter().enumerate() {
            let corner = (cc.ca[i] & 7) as usize;
            let ori = (cc.ca[i] >> 3) as usize;
            for (j, f) in corner_faces.iter().enumerate() {
                face.f[*f as usize] = CORNER_COLOR[corner][(j + 3 - ori) % 3];
            }
        }
        for (i, edge_faces) in EDGE_FACELET.iter().enumerate() {
            let edge = (cc.ea[i] >> 1) as usize;
            let flip = (cc.ea[i] & 1) as usize;
            for (j, f) in edge_faces.iter().enumerate() {
                face.f[*f as usize] = EDGE_COLOR[edge][(j + flip) % 2];
            }
        }
        face
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.f.iter().fold(String::new(), |acc, c| format!("{acc}{c}"));
        write!(f, "{s}")
    }
}

/// The names of the facelet positions of the cube.
///
/// ```text
///             |************|
///             |*U1**U2**U3*|
///             |*U4**U5**U6*|
///             |*U7**U8**U9*|
/// ************|************|************|************|
/// *L1**L2**L3*|*F1**F2**F3*|*R1**R2**R3*|*B1**B2**B3*|
/// *L4**L5**L6*|*F4**F5**F6*|*R4**R5**R6*|*B4**B5**B6*|
/// *L7**L8**L9*|*F7**F8**F9*|*R7**R8**R9*|*B7**B8**B9*|
/// ************|************|************|************|
///             |*D1**D2**D3*|
///             |*D4**D5**D6*|
///             |*D7**D8**D9*|
///             |************|
/// ```
#[rustfmt::skip]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub enum Facelet {
    U1, U2, U3, U4, U5, U6, U7, U8, U9,
    R1, R2, R3, R4, R5, R6, R7, R8, R9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9,
    D1, D2, D3, D4, D5, D6, D7, D8, D9,
    L1, L2, L3, L4, L5, L6, L7, L8, L9,
    B1, B2, B3, B4, B5, B6, B7, B8, B9,
}

pub const ALL_COLORS: [Color; 6] = [Color::U, Color::R, Color::F, Color::D, Color::L, Color::B];

/// Map the corner positions to facelet positions, U or D sticker first.
pub const CORNER_FACELET: [[Facelet; 3]; 8] = [
    [Facelet::U9, Facelet::R1, Facelet::F3], // URF
    [Facelet::U7, Facelet::F1, Facelet::L3], // UFL
    [Facelet::U1, Facelet::L1, Facelet::B3], // ULB
    [Facelet::U3, Facelet::B1, Facelet::R3], // UBR
    [Facelet::D3, Facelet::F9, Facelet::R7], // DFR
    [Facelet::D1, Facelet::L9, Facelet::F7], // DLF
    [Facelet::D7, Facelet::B9, Facelet::L7], // DBL
    [Facelet::D9, Facelet::R9, Facelet::B7], // DRB
];

/// Map the edge positions to facelet positions.
pub const EDGE_FACELET: [[Facelet; 2]; 12] = [
    [Facelet::U6, Facelet::R2], // UR
    [Facelet::U8, Facelet::F2], // UF
    [Facelet::U4, Facelet::L2], // UL
    [Facelet::U2, Facelet::B2], // UB
    [Facelet::D6, Facelet::R8], // DR
    [Facelet::D2, Facelet::F8], // DF
    [Facelet::D4, Facelet::L8], // DL
    [Facelet::D8, Facelet::B8], // DB
    [Facelet::F6, Facelet::R4], // FR
    [Facelet::F4, Facelet::L6], // FL
    [Facelet::B6, Facelet::L4], // BL
    [Facelet::B4, Facelet::R6], // BR
];

/// Map the corner positions to facelet colors.
pub const CORNER_COLOR: [[Color; 3]; 8] = [
    [Color::U, Color::R, Color::F],
    [Color::U, Color::F, Color::L],
    [Color::U, Color::L, Color::B],
    [Color::U, Color::B, Color::R],
    [Color::D, Color::F, Color::R],
    [Color::D, Color::L, Color::F],
    [Color::D, Color::B, Color::L],
    [Color::D, Color::R, Color::B],
];

/// Map the edge positions to facelet colors.
pub const EDGE_COLOR: [[Color; 2]; 12] = [
    [Color::U, Color::R],
    [Color::U, Color::F],
    [Color::U, Color::L],
    [Color::U, Color::B],
    [Color::D, Color::R],
    [Color::D, Color::F],
    [Color::D, Color::L],
    [Color::D, Color::B],
    [Color::F, Color::R],
    [Color::F, Color::L],
    [Color::B, Color::L],
    [Color::B, Color::R],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SOLVED_FACELET;

    #[test]
    fn test_solved_string() {
        let fc = FaceCube::try_from(SOLVED_FACELET).unwrap();
        assert_eq!(fc, SOLVED_FACE_CUBE);
        assert_eq!(fc.to_string(), SOLVED_FACELET);
    }

    #[test]
    fn test_any_alphabet() {
        // colors are keyed off the centers, not the letters themselves
        let s = "WWWWWWWWWOOOOOOOOOGGGGGGGGGYYYYYYYYYRRRRRRRRRBBBBBBBBB";
        let fc = FaceCube::try_from(s).unwrap();
        assert_eq!(fc, SOLVED_FACE_CUBE);
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(FaceCube::try_from("INVALID"), Err(Error::InvalidFacelet));
        // a color on ten stickers
        let s = "UUUUUUUUUURRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
        assert_eq!(FaceCube::try_from(s), Err(Error::InvalidFacelet));
        // duplicate centers
        let s = "UUUUUUUUURRRRURRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
        assert_eq!(FaceCube::try_from(s), Err(Error::InvalidFacelet));
    }
}
