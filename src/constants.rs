use crate::moves::Move::{self, *};

/// The solved cube on the facelet level.
pub const SOLVED_FACELET: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

/// All 18 face turns in move-index order (axis * 3 + power).
pub const ALL_MOVES: [Move; 18] = [
    U, U2, U3, R, R2, R3, F, F2, F3, D, D2, D3, L, L2, L3, B, B2, B3,
];

/// number of possible face moves
pub const N_MOVES: usize = 18;
/// number of moves of the phase 2 alphabet <U, U2, U', D, D2, D', R2, L2, F2, B2>
pub const N_MOVES2: usize = 10;

/// 3^7 possible corner orientations in phase 1
pub const N_TWIST: usize = 2187;
pub const N_TWIST_SYM: usize = 324;

/// 2^11 possible edge orientations in phase 1
pub const N_FLIP: usize = 2048;
pub const N_FLIP_SYM: usize = 336;

/// 12 choose 4 positions of the FR, FL, BL, BR edges in phase 1
pub const N_SLICE: usize = 495;

/// 8! permutations of the corners, or of the 8 U/D edges in phase 2
pub const N_PERM: usize = 40320;
pub const N_PERM_SYM: usize = 2768;

/// 4! permutations of the FR, FL, BL, BR edges in phase 2
pub const N_MPERM: usize = 24;
/// 8 choose 4 positions of the URF, UFL, ULB, UBR tetrad in phase 2
pub const N_CCOMB: usize = 70;

/// Folds an edge-permutation symmetry index into the matching
/// corner-permutation symmetry index, per equivalence class.
pub const SYM_E2C_MAGIC: usize = 0x00DDDD00;

pub const MAX_PRE_MOVES: usize = 20;
pub const MIN_P1LENGTH_PRE: usize = 7;
pub const MAX_DEPTH2: usize = 12;

/// Hard cap on the solution length; `solve` clamps its `maxl` here.
pub const MAX_LENGTH: usize = 25;

/// Phase 1 pruning tables are expanded to this depth; entries still at
/// 0xF afterwards mean "12 or more".
pub const P1_PRUN_DEPTH: usize = 12;
/// Phase 2 pruning tables are expanded to this depth.
pub const P2_PRUN_DEPTH: usize = 10;
/// Depth at which the pruning builder switches from forward expansion of
/// the current shell to backward filling of still-empty entries.
pub const PRUN_INV_DEPTH: usize = 9;

/// Verbose bit: separate the phase 1 and phase 2 parts with " . ".
pub const USE_SEPARATOR: usize = 0x1;
/// Verbose bit: emit the inverse sequence (a state generator).
pub const INVERSE_SOLUTION: usize = 0x2;
/// Verbose bit: append a "(Nf)" length tag.
pub const APPEND_LENGTH: usize = 0x4;
