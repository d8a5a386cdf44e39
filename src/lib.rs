//! # twophase
//! `twophase` - crate for solving the 3x3x3 Rubik's cube with the
//! two-phase algorithm. See [Kociemba's page](http://kociemba.org/cube.htm).
//!
//! Phase 1 brings an arbitrary cube into the subgroup generated by
//! `<U, D, R2, L2, F2, B2>`; phase 2 solves it inside that subgroup.
//! More phase 1 solutions are tried by rotating the start cube through
//! the three URF frames, solving the inverse state, and prefixing
//! pre-moves, which together bring nearly every cube under 21 moves.

pub mod error;
/// Module containing 3x3 cube constants.
pub mod constants;
/// Module for representing a cube on the facelet level.
pub mod facelet;
/// Module for representing a cube on the cubie level.
pub mod cubie;
/// Module for coordinate encodings of a cube.
pub mod coord;
/// Module for the cube symmetry group and symmetry-reduced coordinates.
pub mod symmetry;
/// Module for move, conjugation and pruning tables.
pub mod tables;
/// Module for representing moves and solution sequences.
pub mod moves;
/// Module for the two-phase solver.
pub mod solver;
#[cfg(feature = "term")]
/// Module for printing a facelet cube on the terminal with color.
pub mod printer;

use rand::random;

use crate::constants::ALL_MOVES;
use crate::cubie::CubieCube;
use crate::facelet::FaceCube;
use crate::moves::{moves_to_string, parse_moves};
use crate::solver::Solver;

/// Solve a facelet cube within `maxl` moves (clamped to 25). Returns the
/// space-separated move sequence, or `"Error N"`:
///    1: facelet string malformed
///    2: not all 12 edges exist exactly once
///    3: one edge has to be flipped
///    4: not all 8 corners exist exactly once
///    5: one corner has to be twisted
///    6: two corners or two edges have to be exchanged
///    8: no solution found at or below `maxl`
pub fn solve(facelet: &str, maxl: usize) -> String {
    let mut solver = Solver::default();
    match solver.solve(facelet, maxl, 0) {
        Ok(sol) => sol.to_string(),
        Err(e) => format!("Error {}", e.code()),
    }
}

/// The facelet reached by applying `moves` to the solved cube, or the
/// empty string if `moves` does not parse.
pub fn from_moves(moves: &str) -> String {
    match parse_moves(moves) {
        Ok(seq) => FaceCube::from(&CubieCube::default().apply_moves(&seq)).to_string(),
        Err(_) => String::new(),
    }
}

/// The facelet reached by applying `moves` to `facelet`, or the empty
/// string on any validation or parse error.
pub fn apply_moves(facelet: &str, moves: &str) -> String {
    let fc = match FaceCube::try_from(facelet) {
        Ok(fc) => fc,
        Err(_) => return String::new(),
    };
    let cc = CubieCube::from(&fc);
    if cc.verify().is_err() {
        return String::new();
    }
    match parse_moves(moves) {
        Ok(seq) => FaceCube::from(&cc.apply_moves(&seq)).to_string(),
        Err(_) => String::new(),
    }
}

/// A uniformly distributed solvable facelet.
pub fn random_cube() -> String {
    let mut cc = CubieCube::default();
    cc.randomize();
    FaceCube::from(&cc).to_string()
}

/// A scramble of `n` face turns. A turn never repeats the previous axis,
/// and never follows its parallel axis in descending order.
pub fn random_moves(n: usize) -> String {
    let mut moves = Vec::with_capacity(n);
    let mut last_axis = -3i32;
    while moves.len() < n {
        let axis = (random::<u32>() % 6) as i32;
        if axis == last_axis || axis == last_axis - 3 {
            continue;
        }
        let power = (random::<u32>() % 3) as usize;
        moves.push(ALL_MOVES[axis as usize * 3 + power]);
        last_axis = axis;
    }
    moves_to_string(&moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SOLVED_FACELET;

    #[test]
    fn test_from_moves_scenarios() {
        assert_eq!(from_moves(""), SOLVED_FACELET);
        assert_eq!(
            from_moves("U"),
            "UUUUUUUUUBBBRRRRRRRRRFFFFFFDDDDDDDDDFFFLLLLLLLLLBBBBBB"
        );
        assert_eq!(
            from_moves("R R"),
            "UUDUUDUUDRRRRRRRRRFFBFFBFFBDDUDDUDDULLLLLLLLLFBBFBBFBB"
        );
        assert_eq!(
            from_moves("U R U' R'"),
            "RFUUUUUURDBBRRRRRRFFFFFUFFUDDFDDDDDDULLLLLLLLLRBBBBBBB"
        );
        assert_eq!(from_moves("U X"), "");
    }

    #[test]
    fn test_apply_moves() {
        let f = from_moves("U R");
        // four quarter turns cancel out
        assert_eq!(apply_moves(&f, "R R R R"), f);
        assert_eq!(apply_moves(&f, ""), f);
        assert_eq!(apply_moves(&f, "R' U'"), SOLVED_FACELET);
        assert_eq!(apply_moves("INVALID", "U"), "");
        assert_eq!(apply_moves(&f, "U X"), "");
    }

    #[test]
    fn test_facelet_round_trip() {
        for moves in ["U", "R F' B2", "U R U' R' D B D", "L2 B' D F R U2 B' L'"] {
            let f = from_moves(moves);
            assert_eq!(apply_moves(&f, ""), f);
        }
    }

    #[test]
    fn test_solve_solved_is_empty() {
        assert_eq!(solve(SOLVED_FACELET, 21), "");
    }

    #[test]
    fn test_solve_error_codes() {
        assert_eq!(solve("INVALID", 21), "Error 1");
        // the UR edge flipped in place
        let f = "UUUUURUUURURRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
        assert_eq!(solve(f, 21), "Error 3");
    }

    #[test]
    fn test_solve_seven_mover() {
        let f = from_moves("U R U' R' D B D");
        let sol = solve(&f, 7);
        assert!(!sol.starts_with("Error"), "{}", sol);
        assert_eq!(sol.split_whitespace().count(), 7);
        assert_eq!(apply_moves(&f, &sol), SOLVED_FACELET);
    }

    #[test]
    fn test_solve_scrambles_within_bound() {
        for moves in [
            "R U R' U' F2 D B",
            "U F' D' F2 D B2 D' R2 U' F2 R2 D2 R2 U' L B L R F' D B'",
        ] {
            let f = from_moves(moves);
            let sol = solve(&f, 21);
            assert!(!sol.starts_with("Error"), "{}", sol);
            assert!(sol.split_whitespace().count() <= 21);
            assert_eq!(apply_moves(&f, &sol), SOLVED_FACELET);
        }
    }

    #[test]
    fn test_random_cube_solvable() {
        for _ in 0..50 {
            let f = random_cube();
            let sol = solve(&f, 25);
            assert!(!sol.starts_with("Error"), "{} for {}", sol, f);
            assert_eq!(apply_moves(&f, &sol), SOLVED_FACELET);
        }
    }

    #[test]
    fn test_random_moves_canonical() {
        let s = random_moves(25);
        let moves = parse_moves(&s).unwrap();
        assert_eq!(moves.len(), 25);
        for w in moves.windows(2) {
            let a = w[0] as usize / 3;
            let b = w[1] as usize / 3;
            assert_ne!(a, b, "{}", s);
            assert_ne!(b as i32, a as i32 - 3, "{}", s);
        }
    }
}
