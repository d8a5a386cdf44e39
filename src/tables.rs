use static_init::dynamic;

use crate::constants::{
    N_CCOMB, N_FLIP_SYM, N_MOVES, N_MOVES2, N_MPERM, N_PERM_SYM, N_SLICE, N_TWIST_SYM,
    P1_PRUN_DEPTH, P2_PRUN_DEPTH, PRUN_INV_DEPTH, SYM_E2C_MAGIC,
};
use crate::cubie::CubieCube;
use crate::moves::Move::*;
use crate::symmetry::{SymTables, S2R, SYM};

/// Binomials, the phase-2 move alphabet mapping and its canon masks.
#[derive(Debug)]
pub struct UtilTables {
    pub cnk: [[u16; 13]; 13],
    pub ud2std: [usize; 18],
    pub std2ud: [usize; 18],
    pub ckmv2: [u32; 11],
}

impl UtilTables {
    pub fn new() -> Self {
        let mut cnk = [[0u16; 13]; 13];
        for i in 0..13 {
            cnk[i][0] = 1;
            cnk[i][i] = 1;
            for j in 1..i {
                cnk[i][j] = cnk[i - 1][j - 1] + cnk[i - 1][j];
            }
        }

        // the first ten entries are the phase 2 alphabet
        let ud2std = [
            U as usize,
            U2 as usize,
            U3 as usize,
            R2 as usize,
            F2 as usize,
            D as usize,
            D2 as usize,
            D3 as usize,
            L2 as usize,
            B2 as usize,
            R as usize,
            R3 as usize,
            F as usize,
            F3 as usize,
            L as usize,
            L3 as usize,
            B as usize,
            B3 as usize,
        ];
        let mut std2ud = [0; 18];
        for (i, &m) in ud2std.iter().enumerate() {
            std2ud[m] = i;
        }

        // moves forbidden after each phase 2 move: same axis, or the
        // parallel axis in descending order. Index 10 is the no-last-move
        // sentinel.
        let mut ckmv2 = [0u32; 11];
        for i in 0..10 {
            let ix = ud2std[i] / 3;
            for j in 0..10 {
                let jx = ud2std[j] / 3;
                if ix == jx || (ix % 3 == jx % 3 && ix >= jx) {
                    ckmv2[i] |= 1 << j;
                }
            }
        }
        ckmv2[10] = 0;

        Self {
            cnk,
            ud2std,
            std2ud,
            ckmv2,
        }
    }
}

/// Precomputed coordinate transitions: successor under every move in the
/// coordinate's phase, and conjugation by symmetry for the raw ones.
#[derive(Debug)]
pub struct CoordTables {
    // phase 1
    pub slice_move: Vec<Vec<u16>>,
    pub twist_move: Vec<Vec<u16>>,
    pub flip_move: Vec<Vec<u16>>,
    pub slice_conj: Vec<Vec<u16>>,
    // phase 2
    pub cperm_move: Vec<Vec<u16>>,
    pub eperm_move: Vec<Vec<u16>>,
    pub mperm_move: Vec<Vec<u16>>,
    pub mperm_conj: Vec<Vec<u16>>,
    pub ccomb_move: Vec<Vec<u16>>,
    pub ccomb_conj: Vec<Vec<u16>>,
}

impl CoordTables {
    pub fn new() -> Self {
        let mut slice_move = vec![vec![0u16; N_MOVES]; N_SLICE];
        let mut twist_move = vec![vec![0u16; N_MOVES]; N_TWIST_SYM];
        let mut flip_move = vec![vec![0u16; N_MOVES]; N_FLIP_SYM];
        let mut slice_conj = vec![vec![0u16; 8]; N_SLICE];
        let mut cperm_move = vec![vec![0u16; N_MOVES2]; N_PERM_SYM];
        let mut eperm_move = vec![vec![0u16; N_MOVES2]; N_PERM_SYM];
        let mut mperm_move = vec![vec![0u16; N_MOVES2]; N_MPERM];
        let mut mperm_conj = vec![vec![0u16; 16]; N_MPERM];
        let mut ccomb_move = vec![vec![0u16; N_MOVES2]; N_CCOMB];
        let mut ccomb_conj = vec![vec![0u16; 16]; N_CCOMB];

        let mut c = CubieCube::default();
        for i in 0..N_PERM_SYM {
            c.set_cperm(S2R.eperm_s2r[i] as usize);
            for j in 0..N_MOVES2 {
                let d = c.corner_multiply(&SYM.move_cube[UT.ud2std[j]]);
                cperm_move[i][j] = d.get_cperm_sym() as u16;
            }
        }

        let mut c = CubieCube::default();
        for i in 0..N_PERM_SYM {
            c.set_eperm(S2R.eperm_s2r[i] as usize);
            for j in 0..N_MOVES2 {
                let d = c.edge_multiply(&SYM.move_cube[UT.ud2std[j]]);
                eperm_move[i][j] = d.get_eperm_sym();
            }
        }

        let mut c = CubieCube::default();
        for i in 0..N_MPERM {
            c.set_mperm(i);
            for j in 0..N_MOVES2 {
                let d = c.edge_multiply(&SYM.move_cube[UT.ud2std[j]]);
                mperm_move[i][j] = d.get_mperm() as u16;
            }
            for j in 0..16 {
                let d = c.edge_conjugate(SYM.sym_mult_inv[0][j] as usize);
                mperm_conj[i][j] = d.get_mperm() as u16;
            }
        }

        let mut c = CubieCube::default();
        for i in 0..N_CCOMB {
            c.set_ccomb(i as u16);
            for j in 0..N_MOVES2 {
                let d = c.corner_multiply(&SYM.move_cube[UT.ud2std[j]]);
                ccomb_move[i][j] = d.get_ccomb();
            }
            for j in 0..16 {
                let d = c.corner_conjugate(SYM.sym_mult_inv[0][j] as usize);
                ccomb_conj[i][j] = d.get_ccomb();
            }
        }

        let mut c = CubieCube::default();
        for i in 0..N_FLIP_SYM {
            c.set_flip(S2R.flip_s2r[i]);
            for j in 0..N_MOVES {
                let d = c.edge_multiply(&SYM.move_cube[j]);
                flip_move[i][j] = d.get_flip_sym();
            }
        }

        let mut c = CubieCube::default();
        for i in 0..N_TWIST_SYM {
            c.set_twist(S2R.twist_s2r[i]);
            for j in 0..N_MOVES {
                let d = c.corner_multiply(&SYM.move_cube[j]);
                twist_move[i][j] = d.get_twist_sym();
            }
        }

        let mut c = CubieCube::default();
        for i in 0..N_SLICE {
            c.set_slice(i as u16);
            for j in 0..N_MOVES {
                let d = c.edge_multiply(&SYM.move_cube[j]);
                slice_move[i][j] = d.get_slice();
            }
            for j in 0..8 {
                let d = c.edge_conjugate(SYM.sym_mult_inv[0][j * 2] as usize);
                slice_conj[i][j] = d.get_slice();
            }
        }

        Self {
            slice_move,
            twist_move,
            flip_move,
            slice_conj,
            cperm_move,
            eperm_move,
            mperm_move,
            mperm_conj,
            ccomb_move,
            ccomb_conj,
        }
    }
}

/// Inverse-state helpers for the phase 2 heuristic.
#[derive(Debug)]
pub struct InvTables {
    /// tetrad combination of each permutation class representative
    pub perm2comb: Vec<u8>,
    /// sym coordinate of the inverse of each representative
    pub perm_inv_edge_sym: Vec<u16>,
}

impl InvTables {
    pub fn new() -> Self {
        let mut perm2comb = vec![0u8; N_PERM_SYM];
        let mut perm_inv_edge_sym = vec![0u16; N_PERM_SYM];
        let mut cc = CubieCube::default();
        for i in 0..N_PERM_SYM {
            cc.set_eperm(S2R.eperm_s2r[i] as usize);
            perm2comb[i] = cc.get_comb_edge(0) as u8;
            cc = cc.inverse_cube();
            perm_inv_edge_sym[i] = cc.get_eperm_sym();
        }
        Self {
            perm2comb,
            perm_inv_edge_sym,
        }
    }
}

/// The sym coordinate of the inverse of `class`/`sym`, optionally folded
/// into the corner frame.
pub fn get_perm_sym_inv(idx: usize, sym: usize, is_corner: bool) -> u16 {
    let mut idxi = IT.perm_inv_edge_sym[idx];
    if is_corner {
        idxi = SymTables::esym2csym(idxi as usize) as u16;
    }
    idxi & 0xfff0 | SYM.sym_mult[(idxi & 0xf) as usize][sym] as u16
}

/// Read the 4-bit entry at `index`.
pub fn get_pruning(table: &[u32], index: usize) -> i32 {
    (table[index >> 3] >> ((index & 7) << 2) & 0xf) as i32
}

/// Write the 4-bit entry at `index`. Nibbles alias within a word, so this
/// must read-modify-write the whole word.
pub fn set_pruning(table: &mut [u32], index: usize, value: u32) {
    let sh = (index & 7) << 2;
    table[index >> 3] = table[index >> 3] & !(0xf << sh) | value << sh;
}

/// Read a phase 2 entry. The tables stop expanding at `P2_PRUN_DEPTH`,
/// so 0xF only proves "one past the build depth".
pub fn get_pruning_p2(table: &[u32], index: usize) -> i32 {
    let prun = get_pruning(table, index);
    match prun == 0xf {
        true => P2_PRUN_DEPTH as i32 + 1,
        false => prun,
    }
}

/// Lower bounds on the remaining moves for a coordinate pair, two nibbles
/// per byte. Phase 1 pairs (slice, twist) and (slice, flip); phase 2
/// pairs (mperm, cperm) and (ccomb, eperm).
#[derive(Debug)]
pub struct PruningTables {
    pub slice_twist_prun: Vec<u32>,
    pub slice_flip_prun: Vec<u32>,
    pub mperm_cperm_prun: Vec<u32>,
    pub eperm_ccomb_prun: Vec<u32>,
}

impl PruningTables {
    pub fn new() -> Self {
        let mut slice_twist_prun = vec![0u32; N_SLICE * N_TWIST_SYM / 8 + 1];
        let mut slice_flip_prun = vec![0u32; N_SLICE * N_FLIP_SYM / 8 + 1];
        let mut mperm_cperm_prun = vec![0u32; N_MPERM * N_PERM_SYM / 8 + 1];
        let mut eperm_ccomb_prun = vec![0u32; N_CCOMB * N_PERM_SYM / 8 + 1];

        PruningTables::init_raw_sym_prun(
            &mut slice_twist_prun,
            &CT.slice_move,
            &CT.slice_conj,
            &CT.twist_move,
            &S2R.sym_state_twist,
            3,
            false,
            P1_PRUN_DEPTH,
        );
        PruningTables::init_raw_sym_prun(
            &mut slice_flip_prun,
            &CT.slice_move,
            &CT.slice_conj,
            &CT.flip_move,
            &S2R.sym_state_flip,
            3,
            false,
            P1_PRUN_DEPTH,
        );
        PruningTables::init_raw_sym_prun(
            &mut mperm_cperm_prun,
            &CT.mperm_move,
            &CT.mperm_conj,
            &CT.cperm_move,
            &S2R.sym_state_perm,
            4,
            true,
            P2_PRUN_DEPTH,
        );
        PruningTables::init_raw_sym_prun(
            &mut eperm_ccomb_prun,
            &CT.ccomb_move,
            &CT.ccomb_conj,
            &CT.eperm_move,
            &S2R.sym_state_perm,
            4,
            false,
            P2_PRUN_DEPTH,
        );

        Self {
            slice_twist_prun,
            slice_flip_prun,
            mperm_cperm_prun,
            eperm_ccomb_prun,
        }
    }

    /// Fixed-point expansion of one table. Entries start at 0xF, the
    /// solved pair at 0. Shells expand forward from the current depth;
    /// past the switchover depth the scan flips to the still-empty
    /// entries and pulls them in from the last shell instead. Entries
    /// left at 0xF afterwards read as a (still admissible) bound.
    #[allow(clippy::too_many_arguments)]
    fn init_raw_sym_prun(
        prun_table: &mut [u32],
        raw_move: &[Vec<u16>],
        raw_conj: &[Vec<u16>],
        sym_move: &[Vec<u16>],
        sym_state: &[u16],
        sym_shift: usize,
        use_e2c: bool,
        max_depth: usize,
    ) {
        let sym_mask = (1 << sym_shift) - 1;
        let n_raw = raw_move.len();
        let n_moves = raw_move[0].len();
        let n_size = n_raw * sym_move.len();

        for word in prun_table.iter_mut() {
            *word = 0xffffffff;
        }
        set_pruning(prun_table, 0, 0);

        for depth in 0..max_depth {
            let inv = depth > PRUN_INV_DEPTH;
            let select = match inv {
                true => 0xf,
                false => depth as i32,
            };
            let check = match inv {
                true => depth as i32,
                false => 0xf,
            };
            for i in 0..n_size {
                if get_pruning(prun_table, i) != select {
                    continue;
                }
                let raw = i % n_raw;
                let sym = i / n_raw;
                for m in 0..n_moves {
                    let mut symx = sym_move[sym][m] as usize;
                    let rawx = raw_conj[raw_move[raw][m] as usize][symx & sym_mask] as usize;
                    symx >>= sym_shift;
                    let idx = symx * n_raw + rawx;
                    if get_pruning(prun_table, idx) != check {
                        continue;
                    }
                    if inv {
                        // this entry is one move from the last shell
                        set_pruning(prun_table, i, depth as u32 + 1);
                        break;
                    }
                    set_pruning(prun_table, idx, depth as u32 + 1);
                    let mut symstate = sym_state[symx] >> 1;
                    let mut j = 1;
                    while symstate != 0 {
                        if symstate & 1 == 1 {
                            let jj = match use_e2c {
                                true => j ^ (SYM_E2C_MAGIC >> (j << 1) & 3),
                                false => j,
                            };
                            let idxx = symx * n_raw + raw_conj[rawx][jj] as usize;
                            if get_pruning(prun_table, idxx) == 0xf {
                                set_pruning(prun_table, idxx, depth as u32 + 1);
                            }
                        }
                        symstate >>= 1;
                        j += 1;
                    }
                }
            }
        }
    }
}

#[dynamic(lazy)]
pub static UT: UtilTables = UtilTables::new();

#[dynamic(lazy)]
pub static CT: CoordTables = CoordTables::new();

#[dynamic(lazy)]
pub static IT: InvTables = InvTables::new();

#[dynamic(lazy)]
pub static PT: PruningTables = PruningTables::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnk() {
        assert_eq!(UT.cnk[12][6], 924);
        assert_eq!(UT.cnk[8][4], 70);
        assert_eq!(UT.cnk[11][4], 330);
    }

    #[test]
    fn test_ud2std_round_trip() {
        for i in 0..18 {
            assert_eq!(UT.std2ud[UT.ud2std[i]], i);
        }
    }

    #[test]
    fn test_ckmv2_forbids_same_axis() {
        // after U (index 0), U/U2/U' are all forbidden
        assert_eq!(UT.ckmv2[0] & 0b111, 0b111);
        // the sentinel row allows everything
        assert_eq!(UT.ckmv2[10], 0);
    }

    #[test]
    fn test_nibble_accessors() {
        let mut t = vec![0u32; 2];
        set_pruning(&mut t, 0, 0xf);
        set_pruning(&mut t, 3, 5);
        set_pruning(&mut t, 9, 7);
        assert_eq!(get_pruning(&t, 0), 0xf);
        assert_eq!(get_pruning(&t, 3), 5);
        assert_eq!(get_pruning(&t, 9), 7);
        set_pruning(&mut t, 3, 2);
        assert_eq!(get_pruning(&t, 3), 2);
        assert_eq!(get_pruning(&t, 0), 0xf);
    }

    #[test]
    fn test_solved_entries_are_zero() {
        assert_eq!(get_pruning(&PT.slice_twist_prun, 0), 0);
        assert_eq!(get_pruning(&PT.slice_flip_prun, 0), 0);
        assert_eq!(get_pruning(&PT.mperm_cperm_prun, 0), 0);
        assert_eq!(get_pruning(&PT.eperm_ccomb_prun, 0), 0);
    }

    #[test]
    fn test_prun_neighbor_consistency() {
        // one move away from solved can lower the bound by at most one
        use crate::constants::N_SLICE;
        for m in 0..18 {
            let slice = CT.slice_move[0][m] as usize;
            let twist = CT.twist_move[0][m];
            let tsym = (twist & 7) as usize;
            let tclass = (twist >> 3) as usize;
            let p = get_pruning(
                &PT.slice_twist_prun,
                tclass * N_SLICE + CT.slice_conj[slice][tsym] as usize,
            );
            assert!(p <= 1, "move {} gives pruning {}", m, p);
        }
    }
}
