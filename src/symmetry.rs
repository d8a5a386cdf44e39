use static_init::dynamic;

use crate::constants::{
    N_FLIP, N_FLIP_SYM, N_PERM, N_PERM_SYM, N_TWIST, N_TWIST_SYM, SYM_E2C_MAGIC,
};
use crate::cubie::{CubieCube, MOVE_CUBES};
use crate::tables::UT;

/// Quarter turn of the whole cube about the UD axis.
pub const S_U4: CubieCube = CubieCube {
    ca: [3, 0, 1, 2, 7, 4, 5, 6],
    ea: [6, 0, 2, 4, 14, 8, 10, 12, 23, 17, 19, 21],
};

/// Half turn of the whole cube about the FB axis.
pub const S_F2: CubieCube = CubieCube {
    ca: [5, 4, 7, 6, 1, 0, 3, 2],
    ea: [12, 10, 8, 14, 4, 2, 0, 6, 18, 16, 22, 20],
};

/// Reflection through the RL plane. All corner orientations carry the
/// mirror offset 3.
pub const S_LR2: CubieCube = CubieCube {
    ca: [25, 24, 27, 26, 29, 28, 31, 30],
    ea: [4, 2, 0, 6, 12, 10, 8, 14, 18, 16, 22, 20],
};

/// Third-turn of the whole cube about the URF-DBL diagonal, cycling the
/// U, R and F axes.
pub const S_URF: CubieCube = CubieCube {
    ca: [8, 20, 13, 17, 19, 15, 22, 10],
    ea: [3, 16, 11, 18, 7, 22, 15, 20, 1, 9, 13, 5],
};

/// How each move index reads in each of the six URF frames (three
/// rotated frames, then the same three on the inverse cube).
pub const URF_MOVE: [[u8; 18]; 6] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17],
    [6, 7, 8, 0, 1, 2, 3, 4, 5, 15, 16, 17, 9, 10, 11, 12, 13, 14],
    [3, 4, 5, 6, 7, 8, 0, 1, 2, 12, 13, 14, 15, 16, 17, 9, 10, 11],
    [2, 1, 0, 5, 4, 3, 8, 7, 6, 11, 10, 9, 14, 13, 12, 17, 16, 15],
    [8, 7, 6, 2, 1, 0, 5, 4, 3, 17, 16, 15, 11, 10, 9, 14, 13, 12],
    [5, 4, 3, 8, 7, 6, 2, 1, 0, 14, 13, 12, 17, 16, 15, 11, 10, 9],
];

/// The 18 move cubes, the 16 symmetries of the D4h subgroup with their
/// multiplication tables, and the URF rotation cubes.
#[derive(Debug)]
pub struct SymTables {
    pub move_cube: [CubieCube; 18],
    pub cube_sym: [CubieCube; 16],
    pub sym_mult: [[u8; 16]; 16],
    pub sym_mult_inv: [[u8; 16]; 16],
    pub urf1: CubieCube,
    pub urf2: CubieCube,
}

impl SymTables {
    pub fn new() -> Self {
        let mut move_cube = [CubieCube::default(); 18];
        for axis in 0..6 {
            move_cube[axis * 3] = MOVE_CUBES[axis];
            for p in 0..2 {
                move_cube[axis * 3 + p + 1] = move_cube[axis * 3 + p].multiply(&MOVE_CUBES[axis]);
            }
        }

        // enumerate the 16 symmetries from the three generators
        let mut cube_sym = [CubieCube::default(); 16];
        let mut c = CubieCube::default();
        for i in 0..16 {
            cube_sym[i] = c;
            c = c.multiply_full(&S_U4);
            if i % 4 == 3 {
                c = c.multiply_full(&S_LR2);
            }
            if i % 8 == 7 {
                c = c.multiply_full(&S_F2);
            }
        }

        // multiplication and inverse-multiplication by brute compare
        let mut sym_mult = [[0u8; 16]; 16];
        let mut sym_mult_inv = [[0u8; 16]; 16];
        for i in 0..16 {
            for j in 0..16 {
                let c = cube_sym[i].corner_multiply_full(&cube_sym[j]);
                for k in 0..16 {
                    if cube_sym[k].ca == c.ca {
                        sym_mult[i][j] = k as u8;
                        sym_mult_inv[k][j] = i as u8; // i * j = k  =>  k * j^-1 = i
                        break;
                    }
                }
            }
        }

        let urf1 = S_URF;
        let urf2 = S_URF.multiply(&S_URF);

        Self {
            move_cube,
            cube_sym,
            sym_mult,
            sym_mult_inv,
            urf1,
            urf2,
        }
    }

    /// Fold an edge-permutation symmetry coordinate into the matching
    /// corner-permutation one.
    pub fn esym2csym(idx: usize) -> usize {
        idx ^ (SYM_E2C_MAGIC >> ((idx & 0xf) << 1) & 3)
    }
}

/// How moves transform under conjugation by each symmetry, and which
/// symmetries fix each move cube.
#[derive(Debug)]
pub struct SymMoveTables {
    pub move_cube_sym: [u64; 18],
    pub first_move_sym: [u32; 48],
    pub sym_move: [[u8; 18]; 16],
    pub sym8_move: [u8; 8 * 18],
    pub sym_move_ud: [[u8; 18]; 16],
}

impl SymMoveTables {
    pub fn new() -> Self {
        let mut move_cube_sym = [0u64; 18];
        let mut first_move_sym = [0u32; 48];
        let mut sym_move = [[0u8; 18]; 16];
        let mut sym8_move = [0u8; 8 * 18];
        let mut sym_move_ud = [[0u8; 18]; 16];

        for j in 0..18 {
            for s in 0..16 {
                let c = SYM.move_cube[j].corner_conjugate(SYM.sym_mult_inv[0][s] as usize);
                for m in 0..18 {
                    if SYM.move_cube[m].ca == c.ca {
                        sym_move[s][j] = m as u8;
                        sym_move_ud[s][UT.std2ud[j]] = UT.std2ud[m] as u8;
                        break;
                    }
                }
                if s % 2 == 0 {
                    sym8_move[j << 3 | s >> 1] = sym_move[s][j];
                }
            }
        }

        for i in 0..18 {
            move_cube_sym[i] = SYM.move_cube[i].symmetry();
            let mut j = i;
            for s in 0..48 {
                if (sym_move[s % 16][j] as usize) < i {
                    first_move_sym[s] |= 1 << i;
                }
                if s % 16 == 15 {
                    j = URF_MOVE[2][j] as usize;
                }
            }
        }

        Self {
            move_cube_sym,
            first_move_sym,
            sym_move,
            sym8_move,
            sym_move_ud,
        }
    }
}

/// First moves made redundant by the self-symmetries of the start cube.
pub fn get_skip_moves(ssym: u64) -> u32 {
    let mut ret = 0;
    let mut s = ssym >> 1;
    let mut i = 1;
    while s != 0 {
        if s & 1 == 1 {
            ret |= ST.first_move_sym[i];
        }
        s >>= 1;
        i += 1;
    }
    ret
}

/// Raw coordinate classification: representative per equivalence class,
/// raw-to-(class | sym) packing and per-class self-symmetry masks.
#[derive(Debug)]
pub struct RawSymTables {
    pub flip_s2r: Vec<u16>,
    pub twist_s2r: Vec<u16>,
    pub eperm_s2r: Vec<u16>,
    pub flip_r2s: Vec<u16>,
    pub twist_r2s: Vec<u16>,
    pub eperm_r2s: Vec<u16>,
    pub sym_state_flip: Vec<u16>,
    pub sym_state_twist: Vec<u16>,
    pub sym_state_perm: Vec<u16>,
}

enum RawCoord {
    Flip,
    Twist,
    EPerm,
}

impl RawSymTables {
    pub fn new() -> Self {
        let mut eperm_s2r = vec![0u16; N_PERM_SYM];
        let mut eperm_r2s = vec![0u16; N_PERM];
        let mut sym_state_perm = vec![0u16; N_PERM_SYM];
        RawSymTables::init_sym2raw(
            N_PERM,
            &mut eperm_s2r,
            &mut eperm_r2s,
            &mut sym_state_perm,
            RawCoord::EPerm,
        );

        let mut flip_s2r = vec![0u16; N_FLIP_SYM];
        let mut flip_r2s = vec![0u16; N_FLIP];
        let mut sym_state_flip = vec![0u16; N_FLIP_SYM];
        RawSymTables::init_sym2raw(
            N_FLIP,
            &mut flip_s2r,
            &mut flip_r2s,
            &mut sym_state_flip,
            RawCoord::Flip,
        );

        let mut twist_s2r = vec![0u16; N_TWIST_SYM];
        let mut twist_r2s = vec![0u16; N_TWIST];
        let mut sym_state_twist = vec![0u16; N_TWIST_SYM];
        RawSymTables::init_sym2raw(
            N_TWIST,
            &mut twist_s2r,
            &mut twist_r2s,
            &mut sym_state_twist,
            RawCoord::Twist,
        );

        Self {
            flip_s2r,
            twist_s2r,
            eperm_s2r,
            flip_r2s,
            twist_r2s,
            eperm_r2s,
            sym_state_flip,
            sym_state_twist,
            sym_state_perm,
        }
    }

    fn init_sym2raw(
        n_raw: usize,
        sym2raw: &mut [u16],
        raw2sym: &mut [u16],
        sym_state: &mut [u16],
        coord: RawCoord,
    ) -> usize {
        // flip and twist keep only the 8 even symmetries
        let sym_inc = match coord {
            RawCoord::EPerm => 1,
            _ => 2,
        };
        let is_edge = !matches!(coord, RawCoord::Twist);

        let mut c = CubieCube::default();
        let mut count = 0;
        for i in 0..n_raw {
            if raw2sym[i] != 0 {
                continue;
            }
            match coord {
                RawCoord::Flip => c.set_flip(i as u16),
                RawCoord::Twist => c.set_twist(i as u16),
                RawCoord::EPerm => c.set_eperm(i),
            }
            for s in (0..16).step_by(sym_inc) {
                let d = match is_edge {
                    true => c.edge_conjugate(s),
                    false => c.corner_conjugate(s),
                };
                let idx = match coord {
                    RawCoord::Flip => d.get_flip() as usize,
                    RawCoord::Twist => d.get_twist() as usize,
                    RawCoord::EPerm => d.get_eperm(),
                };
                if idx == i {
                    sym_state[count] |= 1 << (s / sym_inc);
                }
                raw2sym[idx] = ((count << 4 | s) / sym_inc) as u16;
            }
            sym2raw[count] = i as u16;
            count += 1;
        }
        count
    }
}

#[dynamic(lazy)]
pub static SYM: SymTables = SymTables::new();

#[dynamic(lazy)]
pub static ST: SymMoveTables = SymMoveTables::new();

#[dynamic(lazy)]
pub static S2R: RawSymTables = RawSymTables::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sym_group_closure() {
        // identity at index 0, every product lands back in the group
        assert_eq!(SYM.cube_sym[0], CubieCube::default());
        for i in 0..16 {
            assert_eq!(SYM.sym_mult[i][0], i as u8);
            assert_eq!(SYM.sym_mult[0][i], i as u8);
        }
    }

    #[test]
    fn test_sym_inverse() {
        for i in 0..16 {
            let inv = SYM.sym_mult_inv[0][i] as usize;
            assert_eq!(SYM.sym_mult[inv][i], 0);
        }
    }

    #[test]
    fn test_urf_order_three() {
        let id = SYM.urf1.multiply(&SYM.urf2);
        assert_eq!(id.ca, CubieCube::default().ca);
        assert_eq!(id.ea, CubieCube::default().ea);
    }

    #[test]
    fn test_class_counts() {
        // representatives fill the expected symmetry-reduced sizes
        assert_eq!(S2R.flip_s2r.len(), N_FLIP_SYM);
        assert_eq!(S2R.twist_s2r.len(), N_TWIST_SYM);
        assert_eq!(S2R.eperm_s2r.len(), N_PERM_SYM);
        assert_eq!(S2R.flip_r2s[0], 0);
        assert_eq!(S2R.twist_r2s[0], 0);
        // solved coordinates are their own representatives
        assert_eq!(S2R.flip_s2r[0], 0);
        assert_eq!(S2R.twist_s2r[0], 0);
        assert_eq!(S2R.eperm_s2r[0], 0);
    }

    #[test]
    fn test_conjugate_round_trip() {
        let cc = CubieCube::default()
            .apply_moves(&crate::moves::parse_moves("R U F' D2 L B").unwrap());
        for s in 0..16 {
            let d = cc
                .corner_conjugate(s)
                .corner_conjugate(SYM.sym_mult_inv[0][s] as usize);
            // conjugating by s then s^-1 restores the corners
            assert_eq!(d.ca, cc.ca, "sym {}", s);
        }
    }
}
