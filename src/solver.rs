use std::cmp::{max, min};

use crate::constants::{
    MAX_DEPTH2, MAX_LENGTH, MAX_PRE_MOVES, MIN_P1LENGTH_PRE, N_CCOMB, N_MPERM,
};
use crate::coord::Phase1Node;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::facelet::FaceCube;
use crate::moves::Solution;
use crate::symmetry::{get_skip_moves, ST, SYM};
use crate::tables::{get_perm_sym_inv, get_pruning_p2, CT, IT, PT, UT};

/// Two-phase solver. One instance is a private search context; the
/// shared tables behind it are immutable, so independent instances may
/// solve concurrently.
///
/// # Example
/// ```rust
/// use twophase::solver::Solver;
///
/// let mut solver = Solver::default();
/// let s = solver
///     .solve("DUUBULDBFRBFRRULLLBRDFFFBLURDBFDFDRFRULBLUFDURRBLBDUDL", 21, 0)
///     .unwrap();
/// println!("{}", s);
/// ```
#[derive(Debug)]
pub struct Solver {
    moves: [usize; 31],
    nodes: [Phase1Node; 26],
    selfsym: u64,
    conj_mask: u32,
    urf_idx: usize,
    length1: usize,
    depth1: usize,
    max_dep2: usize,
    sol_len: usize,
    solution: Option<Solution>,
    verbose: usize,
    valid1: usize,
    allow_shorter: bool,
    cc: CubieCube,
    urf_cubes: [CubieCube; 6],
    phase1_cubes: [CubieCube; 26],
    premove_cubes: [CubieCube; MAX_PRE_MOVES + 1],
    premoves: [usize; MAX_PRE_MOVES],
    premove_len: usize,
    max_premoves: usize,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            moves: [0; 31],
            nodes: [Phase1Node::default(); 26],
            selfsym: 0,
            conj_mask: 0,
            urf_idx: 0,
            length1: 0,
            depth1: 0,
            max_dep2: 0,
            sol_len: 0,
            solution: None,
            verbose: 0,
            valid1: 0,
            allow_shorter: false,
            cc: CubieCube::default(),
            urf_cubes: [CubieCube::default(); 6],
            phase1_cubes: [CubieCube::default(); 26],
            premove_cubes: [CubieCube::default(); MAX_PRE_MOVES + 1],
            premoves: [0; MAX_PRE_MOVES],
            premove_len: 0,
            max_premoves: 0,
        }
    }
}

impl Solver {
    /// Solve a facelet cube to the solved state within `maxl` moves.
    pub fn solve(&mut self, facelet: &str, maxl: usize, verbose: usize) -> Result<Solution, Error> {
        let fc = FaceCube::try_from(facelet)?;
        let cc = CubieCube::from(&fc);
        cc.verify()?;
        self.solve_cubie(&cc, maxl, verbose)
    }

    /// Solve a verified cubie cube within `maxl` moves.
    pub fn solve_cubie(
        &mut self,
        cc: &CubieCube,
        maxl: usize,
        verbose: usize,
    ) -> Result<Solution, Error> {
        self.cc = *cc;
        // maxl + 1 as an exclusive bound, capped at 25
        self.sol_len = min(MAX_LENGTH, maxl + 1);
        self.verbose = verbose;
        self.solution = None;
        self.valid1 = 0;
        self.init_search();
        self.search()
    }

    fn init_search(&mut self) {
        self.selfsym = self.cc.symmetry();
        // a self-symmetric start makes some URF frames redundant
        self.conj_mask = 0;
        if self.selfsym >> 16 & 0xffff != 0 {
            self.conj_mask |= 0x12;
        }
        if self.selfsym >> 32 & 0xffff != 0 {
            self.conj_mask |= 0x24;
        }
        if self.selfsym >> 48 & 0xffff != 0 {
            self.conj_mask |= 0x38;
        }
        self.selfsym &= 0xffffffffffff;
        self.max_premoves = match self.conj_mask > 7 {
            true => 0,
            false => MAX_PRE_MOVES,
        };
        let mut cc = self.cc;
        for i in 0..6 {
            self.urf_cubes[i] = cc;
            cc = cc.urf_conjugate();
            if i % 3 == 2 {
                cc = cc.inverse_cube();
            }
        }
    }

    fn search(&mut self) -> Result<Solution, Error> {
        self.length1 = 0;
        while self.length1 < self.sol_len {
            self.max_dep2 = min(MAX_DEPTH2, self.sol_len - self.length1 - 1);
            self.urf_idx = 0;
            while self.urf_idx < 6 {
                if self.conj_mask & 1 << self.urf_idx != 0 {
                    self.urf_idx += 1;
                    continue;
                }
                if self.phase1_premoves(
                    self.max_premoves,
                    -30,
                    self.urf_cubes[self.urf_idx],
                    self.selfsym & 0xffff,
                ) == 0
                {
                    return self.solution.take().ok_or(Error::NoSolution);
                }
                self.urf_idx += 1;
            }
            self.length1 += 1;
        }
        self.solution.take().ok_or(Error::NoSolution)
    }

    fn phase1_premoves(&mut self, max1: usize, lm: i32, cc: CubieCube, ssym: u64) -> u32 {
        self.premove_len = self.max_premoves - max1;
        // descend unless the last premove could have been a phase 1 move
        if self.premove_len == 0 || (0x36FB7 >> lm & 1) == 0 {
            self.depth1 = self.length1 - self.premove_len;
            self.phase1_cubes[0] = cc;
            self.allow_shorter = self.depth1 == MIN_P1LENGTH_PRE && self.premove_len != 0;
            let mut node = Phase1Node::default();
            if node.set_with_prun(&cc, self.depth1 as i32)
                && self.phase1(node, ssym, self.depth1, -1) == 0
            {
                return 0;
            }
        }
        if max1 == 0 || self.premove_len + MIN_P1LENGTH_PRE >= self.length1 {
            return 1;
        }

        let mut skip_moves = get_skip_moves(ssym);
        if max1 == 1 || self.premove_len + 1 + MIN_P1LENGTH_PRE >= self.length1 {
            // the last premove must leave an axis-bridging quarter turn
            skip_moves |= 0x36FB7;
        }
        let lm = lm / 3 * 3;
        let mut m: i32 = 0;
        while m < 18 {
            if m == lm || m == lm - 9 || m == lm + 9 {
                m += 3;
                continue;
            }
            if skip_moves & 1 << m != 0 {
                m += 1;
                continue;
            }
            self.premove_cubes[max1] = SYM.move_cube[m as usize].multiply(&cc);
            self.premoves[self.max_premoves - max1] = m as usize;
            if self.phase1_premoves(
                max1 - 1,
                m,
                self.premove_cubes[max1],
                ssym & ST.move_cube_sym[m as usize],
            ) == 0
            {
                return 0;
            }
            m += 1;
        }
        1
    }

    /// 0: found, 1: try next power, 2: try next axis.
    fn phase1(&mut self, node: Phase1Node, ssym: u64, maxl: usize, lm: i32) -> u32 {
        if node.prun == 0 && maxl < 5 {
            if self.allow_shorter || maxl == 0 {
                self.depth1 -= maxl;
                let ret = self.init_phase2_pre();
                self.depth1 += maxl;
                return ret;
            } else {
                return 1;
            }
        }
        let skip_moves = get_skip_moves(ssym);
        for axis in (0..18).step_by(3) {
            let axis = axis as i32;
            if axis == lm || axis == lm - 9 {
                continue;
            }
            for power in 0..3 {
                let m = (axis + power) as usize;
                if skip_moves != 0 && skip_moves & 1 << m != 0 {
                    continue;
                }
                let prun = self.nodes[maxl].do_move_prun(&node, m);
                if prun > maxl as i32 {
                    // a higher power of this axis cannot lower the bound
                    break;
                } else if prun == maxl as i32 {
                    continue;
                }
                self.moves[self.depth1 - maxl] = m;
                self.valid1 = min(self.valid1, self.depth1 - maxl);
                let ret = self.phase1(self.nodes[maxl], ssym & ST.move_cube_sym[m], maxl - 1, axis);
                if ret == 0 {
                    return 0;
                } else if ret >= 2 {
                    break;
                }
            }
        }
        1
    }

    fn init_phase2_pre(&mut self) -> u32 {
        for i in self.valid1..self.depth1 {
            self.phase1_cubes[i + 1] =
                self.phase1_cubes[i].multiply(&SYM.move_cube[self.moves[i]]);
        }
        self.valid1 = self.depth1;

        let cube = self.phase1_cubes[self.depth1];
        let mut corn = cube.get_cperm_sym();
        let csym = corn & 0xf;
        corn >>= 4;
        let mut edge = cube.get_eperm_sym() as usize;
        let esym = edge & 0xf;
        edge >>= 4;
        let mid = cube.get_mperm();
        let edgei = get_perm_sym_inv(edge, esym, false) as usize;
        let corni = get_perm_sym_inv(corn, csym, true) as usize;

        match self.init_phase2(edge, esym, corn, csym, mid, edgei, corni) == 0 {
            true => 0,
            false => 2,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn init_phase2(
        &mut self,
        edge: usize,
        esym: usize,
        corn: usize,
        csym: usize,
        mid: usize,
        edgei: usize,
        corni: usize,
    ) -> u32 {
        let prun = max(
            get_pruning_p2(
                &PT.eperm_ccomb_prun,
                (edgei >> 4) * N_CCOMB
                    + CT.ccomb_conj[IT.perm2comb[corni >> 4] as usize]
                        [SYM.sym_mult_inv[edgei & 0xf][corni & 0xf] as usize]
                        as usize,
            ),
            max(
                get_pruning_p2(
                    &PT.eperm_ccomb_prun,
                    edge * N_CCOMB
                        + CT.ccomb_conj[IT.perm2comb[corn] as usize]
                            [SYM.sym_mult_inv[esym][csym] as usize]
                            as usize,
                ),
                get_pruning_p2(
                    &PT.mperm_cperm_prun,
                    corn * N_MPERM + CT.mperm_conj[mid][csym] as usize,
                ),
            ),
        );
        if prun as usize > self.max_dep2 {
            return (prun as usize - self.max_dep2) as u32;
        }

        let mut depth2 = self.max_dep2 as i32;
        while depth2 >= prun {
            let ret = self.phase2(edge, esym, corn, csym, mid, depth2 as usize, self.depth1, 10);
            if ret < 0 {
                break;
            }
            depth2 -= ret;
            let mut sol = Solution::new();
            sol.set_args(self.verbose, self.urf_idx, self.depth1);
            for i in 0..self.depth1 + depth2 as usize {
                sol.append_sol_move(self.moves[i]);
            }
            for i in (0..self.premove_len).rev() {
                sol.append_sol_move(self.premoves[i]);
            }
            self.sol_len = sol.length;
            self.solution = Some(sol);
            depth2 -= 1;
        }

        if depth2 != self.max_dep2 as i32 {
            self.max_dep2 = min(MAX_DEPTH2, self.sol_len.saturating_sub(self.length1 + 1));
            return 0;
        }
        1
    }

    /// Returns how many moves short of `maxl` the solution came in, -1
    /// for no solution, or less when the inverse-state bound proves the
    /// whole depth unreachable.
    #[allow(clippy::too_many_arguments)]
    fn phase2(
        &mut self,
        edge: usize,
        esym: usize,
        corn: usize,
        csym: usize,
        mid: usize,
        maxl: usize,
        depth: usize,
        lm: usize,
    ) -> i32 {
        if edge == 0 && corn == 0 && mid == 0 {
            return maxl as i32;
        }
        let move_mask = UT.ckmv2[lm];
        let mut m: i32 = 0;
        while m < 10 {
            if move_mask >> m & 1 != 0 {
                m += 0x42 >> m & 3;
                m += 1;
                continue;
            }
            let midx = CT.mperm_move[mid][m as usize] as usize;
            let mut cornx = CT.cperm_move[corn][ST.sym_move_ud[csym][m as usize] as usize] as usize;
            let csymx = SYM.sym_mult[cornx & 0xf][csym] as usize;
            cornx >>= 4;
            let mut edgex = CT.eperm_move[edge][ST.sym_move_ud[esym][m as usize] as usize] as usize;
            let esymx = SYM.sym_mult[edgex & 0xf][esym] as usize;
            edgex >>= 4;

            let edgei = get_perm_sym_inv(edgex, esymx, false) as usize;
            let corni = get_perm_sym_inv(cornx, csymx, true) as usize;
            let prun = get_pruning_p2(
                &PT.eperm_ccomb_prun,
                (edgei >> 4) * N_CCOMB
                    + CT.ccomb_conj[IT.perm2comb[corni >> 4] as usize]
                        [SYM.sym_mult_inv[edgei & 0xf][corni & 0xf] as usize]
                        as usize,
            );
            if prun > maxl as i32 + 1 {
                return maxl as i32 - prun + 1;
            } else if prun >= maxl as i32 {
                m += 0x42 >> m & 3 & (maxl as i32 - prun);
                m += 1;
                continue;
            }
            let prun = max(
                get_pruning_p2(
                    &PT.mperm_cperm_prun,
                    cornx * N_MPERM + CT.mperm_conj[midx][csymx] as usize,
                ),
                get_pruning_p2(
                    &PT.eperm_ccomb_prun,
                    edgex * N_CCOMB
                        + CT.ccomb_conj[IT.perm2comb[cornx] as usize]
                            [SYM.sym_mult_inv[esymx][csymx] as usize]
                            as usize,
                ),
            );
            if prun >= maxl as i32 {
                m += 0x42 >> m & 3 & (maxl as i32 - prun);
                m += 1;
                continue;
            }

            let ret = self.phase2(edgex, esymx, cornx, csymx, midx, maxl - 1, depth + 1, m as usize);
            if ret >= 0 {
                self.moves[depth] = UT.ud2std[m as usize];
                return ret;
            }
            if ret < -1 {
                // the depth is unreachable from here
                break;
            }
            m += 1;
        }
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SOLVED_FACELET;
    use crate::moves::parse_moves;

    fn check_solves(scramble: &str, maxl: usize) {
        let cc = CubieCube::default().apply_moves(&parse_moves(scramble).unwrap());
        let mut solver = Solver::default();
        let sol = solver.solve_cubie(&cc, maxl, 0).unwrap();
        assert!(sol.length <= maxl, "{} moves for {}", sol.length, scramble);
        let solved = cc.apply_moves(&sol.to_moves());
        assert_eq!(solved, CubieCube::default(), "scramble {}", scramble);
    }

    #[test]
    fn test_solves_simple_scrambles() {
        check_solves("R", 21);
        check_solves("R U", 21);
        check_solves("U R U' R' D B D", 21);
    }

    #[test]
    fn test_solves_long_scramble() {
        check_solves("U F' D' F2 D B2 D' R2 U' F2 R2 D2 R2 U' L B L R F' D B'", 21);
    }

    #[test]
    fn test_solved_cube_gives_empty_solution() {
        let mut solver = Solver::default();
        let sol = solver.solve(SOLVED_FACELET, 21, 0).unwrap();
        assert_eq!(sol.length, 0);
        assert_eq!(sol.to_string(), "");
    }

    #[test]
    fn test_tight_length_bound() {
        let cc = CubieCube::default().apply_moves(&parse_moves("U R U' R' D B D").unwrap());
        let mut solver = Solver::default();
        let sol = solver.solve_cubie(&cc, 7, 0).unwrap();
        assert_eq!(sol.length, 7);
        assert_eq!(cc.apply_moves(&sol.to_moves()), CubieCube::default());
    }

    #[test]
    fn test_maxl_zero_rejects_scrambled() {
        let cc = CubieCube::default().apply_moves(&parse_moves("R U F").unwrap());
        let mut solver = Solver::default();
        assert_eq!(solver.solve_cubie(&cc, 0, 0).unwrap_err(), Error::NoSolution);
    }

    #[test]
    fn test_deterministic() {
        let cc = CubieCube::default().apply_moves(&parse_moves("L2 D F' B U R'").unwrap());
        let mut solver = Solver::default();
        let a = solver.solve_cubie(&cc, 21, 0).unwrap().to_string();
        let b = solver.solve_cubie(&cc, 21, 0).unwrap().to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn test_canonical_output() {
        let cc = CubieCube::default()
            .apply_moves(&parse_moves("F2 L' U2 B D R D2 L U' F D2 R2").unwrap());
        let mut solver = Solver::default();
        let sol = solver.solve_cubie(&cc, 21, 0).unwrap();
        let moves = sol.to_moves();
        for w in moves.windows(2) {
            let a = w[0] as usize / 3;
            let b = w[1] as usize / 3;
            assert_ne!(a, b, "consecutive moves share a face in {:?}", moves);
        }
        for w in moves.windows(3) {
            let a = w[0] as usize / 3;
            let b = w[1] as usize / 3;
            let c = w[2] as usize / 3;
            // across a parallel pair the higher axis may not come first
            assert!(!(a == c && a % 3 == b % 3 && a > b), "{:?}", moves);
        }
    }
}
