use std::cmp::min;
use std::fmt;

use rand::random;

use crate::constants::{N_PERM, N_TWIST};
use crate::error::Error;
use crate::facelet::{Color, FaceCube, CORNER_COLOR, CORNER_FACELET, EDGE_COLOR, EDGE_FACELET};
use crate::moves::Move;
use crate::symmetry::SYM;

/// Cube on the cubie level, one byte per slot.
///
/// A corner byte packs `identity | orientation << 3`; identity is 0..8 in
/// the order URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB, orientation 0..3
/// counts clockwise twists (plus 3 for the mirrored symmetry cubes).
///
/// An edge byte packs `identity << 1 | flip`; identity is 0..12 in the
/// order UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CubieCube {
    pub ca: [u8; 8],
    pub ea: [u8; 12],
}

/// Solved cube on the cubie level.
pub const SOLVED_CUBIE_CUBE: CubieCube = CubieCube {
    ca: [0, 1, 2, 3, 4, 5, 6, 7],
    ea: [0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22],
};

impl Default for CubieCube {
    fn default() -> Self {
        SOLVED_CUBIE_CUBE
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        for c in 0..8 {
            s.push_str(&format!("({},{})", self.ca[c] & 7, self.ca[c] >> 3));
        }
        for e in 0..12 {
            s.push_str(&format!("({},{})", self.ea[e] >> 1, self.ea[e] & 1));
        }
        write!(f, "{s}")
    }
}

/// Infers the cubie representation of a face cube. Stickers that match
/// no piece leave their slot at the default; `verify` reports those as
/// missing pieces afterwards.
impl From<&FaceCube> for CubieCube {
    fn from(face_cube: &FaceCube) -> Self {
        let mut state = CubieCube::default();

        for i in 0..8 {
            // the U/D-colored sticker of slot i gives the orientation
            let mut ori = 0;
            for index in 0..3 {
                ori = index;
                let col = face_cube.f[CORNER_FACELET[i][ori] as usize];
                if col == Color::U || col == Color::D {
                    break;
                }
            }
            let col1 = face_cube.f[CORNER_FACELET[i][(ori + 1) % 3] as usize];
            let col2 = face_cube.f[CORNER_FACELET[i][(ori + 2) % 3] as usize];
            for j in 0..8 {
                if col1 == CORNER_COLOR[j][1] && col2 == CORNER_COLOR[j][2] {
                    // in corner position i we have corner cubie j
                    state.ca[i] = j as u8 | (ori as u8 % 3) << 3;
                    break;
                }
            }
        }

        for i in 0..12 {
            for j in 0..12 {
                let col0 = face_cube.f[EDGE_FACELET[i][0] as usize];
                let col1 = face_cube.f[EDGE_FACELET[i][1] as usize];
                if col0 == EDGE_COLOR[j][0] && col1 == EDGE_COLOR[j][1] {
                    state.ea[i] = (j as u8) << 1;
                    break;
                }
                if col0 == EDGE_COLOR[j][1] && col1 == EDGE_COLOR[j][0] {
                    state.ea[i] = (j as u8) << 1 | 1;
                    break;
                }
            }
        }
        state
    }
}

impl CubieCube {
    /// prod = self * rhs, corners only, both cubes proper.
    pub fn corner_multiply(&self, rhs: &CubieCube) -> Self {
        let mut prod = *self;
        for corn in 0..8 {
            let ori_a = self.ca[(rhs.ca[corn] & 7) as usize] >> 3;
            let ori_b = rhs.ca[corn] >> 3;
            prod.ca[corn] = self.ca[(rhs.ca[corn] & 7) as usize] & 7 | (ori_a + ori_b) % 3 << 3;
        }
        prod
    }

    /// prod = self * rhs, corners only, mirrored orientations considered.
    pub fn corner_multiply_full(&self, rhs: &CubieCube) -> Self {
        let mut prod = *self;
        for corn in 0..8 {
            let ori_a = self.ca[(rhs.ca[corn] & 7) as usize] >> 3;
            let ori_b = rhs.ca[corn] >> 3;
            let mut ori = ori_a
                + match ori_a < 3 {
                    true => ori_b,
                    false => 6 - ori_b,
                };
            ori = ori % 3
                + match (ori_a < 3) == (ori_b < 3) {
                    true => 0,
                    false => 3,
                };
            prod.ca[corn] = self.ca[(rhs.ca[corn] & 7) as usize] & 7 | ori << 3;
        }
        prod
    }

    /// prod = self * rhs, edges only. The flip bit of rhs merges by xor.
    pub fn edge_multiply(&self, rhs: &CubieCube) -> Self {
        let mut prod = *self;
        for edge in 0..12 {
            prod.ea[edge] = self.ea[(rhs.ea[edge] >> 1) as usize] ^ (rhs.ea[edge] & 1);
        }
        prod
    }

    /// prod = self * rhs, corners and edges.
    pub fn multiply(&self, rhs: &CubieCube) -> Self {
        let mut prod = self.corner_multiply(rhs);
        prod.ea = self.edge_multiply(rhs).ea;
        prod
    }

    /// prod = self * rhs, corners and edges, mirrored cases considered.
    pub fn multiply_full(&self, rhs: &CubieCube) -> Self {
        let mut prod = self.corner_multiply_full(rhs);
        prod.ea = self.edge_multiply(rhs).ea;
        prod
    }

    /// The inverse cube: each piece returns to the slot it came from.
    pub fn inverse_cube(&self) -> Self {
        let mut inv = CubieCube::default();
        for edge in 0..12 {
            inv.ea[(self.ea[edge] >> 1) as usize] = (edge as u8) << 1 | self.ea[edge] & 1;
        }
        for corn in 0..8 {
            inv.ca[(self.ca[corn] & 7) as usize] =
                corn as u8 | 0x20u8 >> (self.ca[corn] >> 3) & 0x18;
        }
        inv
    }

    /// Apply a single face turn.
    pub fn apply_move(&self, m: Move) -> Self {
        self.multiply(&SYM.move_cube[m as usize])
    }

    /// Apply a sequence of face turns.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |acc, &m| acc.apply_move(m))
    }

    /// b = S_idx^-1 * self * S_idx, corners only.
    pub fn corner_conjugate(&self, idx: usize) -> Self {
        let mut b = CubieCube::default();
        let sinv = &SYM.cube_sym[SYM.sym_mult_inv[0][idx] as usize];
        let s = &SYM.cube_sym[idx];
        for corn in 0..8 {
            let moved = self.ca[(s.ca[corn] & 7) as usize];
            let ori_a = sinv.ca[(moved & 7) as usize] >> 3;
            let ori_b = moved >> 3;
            let ori = match ori_a < 3 {
                true => ori_b,
                false => (3 - ori_b) % 3,
            };
            b.ca[corn] = sinv.ca[(moved & 7) as usize] & 7 | ori << 3;
        }
        b
    }

    /// b = S_idx^-1 * self * S_idx, edges only.
    pub fn edge_conjugate(&self, idx: usize) -> Self {
        let mut b = CubieCube::default();
        let sinv = &SYM.cube_sym[SYM.sym_mult_inv[0][idx] as usize];
        let s = &SYM.cube_sym[idx];
        for edge in 0..12 {
            let moved = self.ea[(s.ea[edge] >> 1) as usize];
            b.ea[edge] =
                sinv.ea[(moved >> 1) as usize] ^ (moved & 1) ^ (s.ea[edge] & 1);
        }
        b
    }

    /// self = S_urf^-1 * self * S_urf, rotating the solving frame so the
    /// U/R/F axes cycle.
    pub fn urf_conjugate(&self) -> Self {
        let mut c = CubieCube::default();
        c.ca = SYM.urf2.corner_multiply(self).corner_multiply(&SYM.urf1).ca;
        c.ea = SYM.urf2.edge_multiply(self).edge_multiply(&SYM.urf1).ea;
        c
    }

    /// Bitmask over (urf_inv << 4 | sym) of the frames fixing this cube.
    pub fn symmetry(&self) -> u64 {
        let mut c = *self;
        let mut sym = 0u64;
        let cperm = self.get_cperm_sym() >> 4;
        for urf_inv in 0..6 {
            if c.get_cperm_sym() >> 4 == cperm {
                for i in 0..16 {
                    let d = c.corner_conjugate(SYM.sym_mult_inv[0][i] as usize);
                    if d.ca == self.ca {
                        let d = c.edge_conjugate(SYM.sym_mult_inv[0][i] as usize);
                        if d.ea == self.ea {
                            sym |= 1u64 << min(urf_inv << 4 | i, 48);
                        }
                    }
                }
            }
            c = c.urf_conjugate();
            if urf_inv % 3 == 2 {
                c = c.inverse_cube();
            }
        }
        sym
    }

    /// Parity of a Lehmer-coded permutation index over n elements.
    pub fn get_nparity(idx: usize, n: usize) -> usize {
        let mut p = 0;
        let mut idx = idx;
        for i in (0..=(n - 2)).rev() {
            p ^= idx % (n - i);
            idx /= n - i;
        }
        p & 1
    }

    /// Check this cube for solvability. The error identifies the first
    /// violated invariant in reporting order.
    pub fn verify(&self) -> Result<(), Error> {
        let mut edge_mask = 0u16;
        let mut flip_sum = 0;
        for e in 0..12 {
            edge_mask |= 1 << (self.ea[e] >> 1);
            flip_sum ^= self.ea[e] & 1;
        }
        if edge_mask != 0xfff {
            return Err(Error::MissingEdge);
        }
        if flip_sum != 0 {
            return Err(Error::FlipError);
        }
        let mut corn_mask = 0u8;
        let mut twist_sum = 0u32;
        for c in 0..8 {
            corn_mask |= 1 << (self.ca[c] & 7);
            twist_sum += (self.ca[c] >> 3) as u32;
        }
        if corn_mask != 0xff {
            return Err(Error::MissingCorner);
        }
        if twist_sum % 3 != 0 {
            return Err(Error::TwistError);
        }
        if CubieCube::get_nparity(self.get_eperm_full(), 12)
            != CubieCube::get_nparity(self.get_cperm(), 8)
        {
            return Err(Error::ParityError);
        }
        Ok(())
    }

    /// Resample this cube uniformly over all solvable states: corner
    /// permutation, twist and flip are independent; the edge permutation
    /// is shuffled and one swap corrects a corner/edge parity mismatch.
    pub fn randomize(&mut self) {
        *self = CubieCube::default();
        self.set_cperm(random::<usize>() % N_PERM);
        self.set_twist((random::<usize>() % N_TWIST) as u16);
        for i in (1..12).rev() {
            self.ea.swap(i, random::<usize>() % (i + 1));
        }
        if CubieCube::get_nparity(self.get_eperm_full(), 12)
            != CubieCube::get_nparity(self.get_cperm(), 8)
        {
            self.ea.swap(0, 1);
        }
        self.set_flip((random::<usize>() % 2048) as u16);
    }
}

/// The six basic face turns as permutations plus orientation changes.
#[rustfmt::skip]
pub const MOVE_CUBES: [CubieCube; 6] = [
    // U
    CubieCube {
        ca: [3, 0, 1, 2, 4, 5, 6, 7],
        ea: [6, 0, 2, 4, 8, 10, 12, 14, 16, 18, 20, 22],
    },
    // R
    CubieCube {
        ca: [20, 1, 2, 8, 15, 5, 6, 19],
        ea: [16, 2, 4, 6, 22, 10, 12, 14, 8, 18, 20, 0],
    },
    // F
    CubieCube {
        ca: [9, 21, 2, 3, 16, 12, 6, 7],
        ea: [0, 19, 4, 6, 8, 17, 12, 14, 3, 11, 20, 22],
    },
    // D
    CubieCube {
        ca: [0, 1, 2, 3, 5, 6, 7, 4],
        ea: [0, 2, 4, 6, 10, 12, 14, 8, 16, 18, 20, 22],
    },
    // L
    CubieCube {
        ca: [0, 10, 22, 3, 4, 17, 13, 7],
        ea: [0, 2, 20, 6, 8, 10, 18, 14, 16, 4, 12, 22],
    },
    // B
    CubieCube {
        ca: [0, 1, 11, 23, 4, 5, 18, 14],
        ea: [0, 2, 4, 23, 8, 10, 12, 21, 16, 18, 7, 15],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::parse_moves;
    use crate::moves::Move::*;

    #[test]
    fn test_mult_against_moves() {
        let state = CubieCube::default().apply_move(R);
        assert_eq!(state, MOVE_CUBES[1]);
        let r2 = CubieCube::default().apply_move(R).apply_move(R);
        assert_eq!(r2, MOVE_CUBES[1].multiply(&MOVE_CUBES[1]));
        let r4 = r2.apply_move(R).apply_move(R);
        assert_eq!(r4, CubieCube::default());
    }

    #[test]
    fn test_sexy_move_order() {
        // (R U R' U') has order 6
        let seq = parse_moves("R U R' U'").unwrap();
        let mut cc = CubieCube::default();
        for _ in 0..6 {
            cc = cc.apply_moves(&seq);
        }
        assert_eq!(cc, SOLVED_CUBIE_CUBE);
    }

    #[test]
    fn test_inverse() {
        let cc = CubieCube::default().apply_moves(&parse_moves("R U2 F' D B L2").unwrap());
        let inv = cc.inverse_cube();
        assert_eq!(cc.multiply(&inv), SOLVED_CUBIE_CUBE);
        assert_eq!(inv.inverse_cube(), cc);
    }

    #[test]
    fn test_verify_solved() {
        assert!(CubieCube::default().verify().is_ok());
        let cc = CubieCube::default().apply_moves(&parse_moves("U R U' R' D B D").unwrap());
        assert!(cc.verify().is_ok());
    }

    #[test]
    fn test_verify_rejects_twist() {
        let mut cc = CubieCube::default();
        cc.ca[0] = cc.ca[0] & 7 | 1 << 3;
        assert_eq!(cc.verify(), Err(Error::TwistError));
    }

    #[test]
    fn test_verify_rejects_flip() {
        let mut cc = CubieCube::default();
        cc.ea[0] ^= 1;
        assert_eq!(cc.verify(), Err(Error::FlipError));
    }

    #[test]
    fn test_verify_rejects_parity() {
        let mut cc = CubieCube::default();
        cc.ea.swap(0, 1);
        assert_eq!(cc.verify(), Err(Error::ParityError));
    }

    #[test]
    fn test_facelet_round_trip() {
        let cc = CubieCube::default().apply_moves(&parse_moves("R U R' U' F2 L B D'").unwrap());
        let fc = FaceCube::from(&cc);
        let back = CubieCube::from(&fc);
        assert!(back.verify().is_ok());
        assert_eq!(back, cc);
    }

    #[test]
    fn test_randomize_solvable() {
        let mut cc = CubieCube::default();
        for _ in 0..50 {
            cc.randomize();
            assert!(cc.verify().is_ok());
        }
    }

    #[test]
    fn test_symmetry_of_solved() {
        // the solved cube is fixed by every frame
        let sym = CubieCube::default().symmetry();
        assert_eq!(sym & 0xffff, 0xffff);
    }
}
