use std::fmt;
use std::str::FromStr;

use crate::constants::{ALL_MOVES, APPEND_LENGTH, INVERSE_SOLUTION, USE_SEPARATOR};
use crate::error::Error;
use crate::symmetry::URF_MOVE;

/// The 18 face turns, indexed `axis * 3 + power` with the axes ordered
/// U, R, F, D, L, B. `$` is clockwise, `$2` a half turn, `$3` (printed
/// `$'`) counter-clockwise.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Move::*;
        match self {
            U3 => write!(f, "U'"),
            R3 => write!(f, "R'"),
            F3 => write!(f, "F'"),
            D3 => write!(f, "D'"),
            L3 => write!(f, "L'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = chars.next().ok_or(Error::InvalidMove)?;
        let power = match chars.next() {
            None | Some('1') | Some('+') => 0,
            Some('2') => 1,
            Some('\'') | Some('-') | Some('3') => 2,
            Some(_) => return Err(Error::InvalidMove),
        };
        if chars.next().is_some() {
            return Err(Error::InvalidMove);
        }
        let axis = match face {
            'U' => 0,
            'R' => 1,
            'F' => 2,
            'D' => 3,
            'L' => 4,
            'B' => 5,
            _ => return Err(Error::InvalidMove),
        };
        Ok(ALL_MOVES[axis * 3 + power])
    }
}

impl Move {
    /// The move undoing this one.
    pub fn inverse(self) -> Self {
        let m = self as usize;
        ALL_MOVES[m / 3 * 3 + (2 - m % 3)]
    }
}

/// Parse a whitespace-tolerant move sequence such as `"U R2 F'"`.
/// Suffixes may also be written `1`/`+` and `-`/`3`; tokens may run
/// together (`"UR2F'"`). Any unknown character is an error.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, Error> {
    let mut moves = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        let axis = match c {
            'U' => 0,
            'R' => 1,
            'F' => 2,
            'D' => 3,
            'L' => 4,
            'B' => 5,
            _ => return Err(Error::InvalidMove),
        };
        let power = match chars.peek() {
            Some('1') | Some('+') => {
                chars.next();
                0
            }
            Some('2') => {
                chars.next();
                1
            }
            Some('\'') | Some('-') | Some('3') => {
                chars.next();
                2
            }
            _ => 0,
        };
        moves.push(ALL_MOVES[axis * 3 + power]);
    }
    Ok(moves)
}

/// Format a move sequence as a space-separated string.
pub fn moves_to_string(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A solution under construction. Appending a move simplifies it against
/// the tail: same-axis moves merge (mod 4), and a move parallel to the
/// last one folds into the slot two back when the axes interleave.
#[derive(Debug)]
pub struct Solution {
    pub length: usize,
    pub depth1: usize,
    pub verbose: usize,
    pub urf_idx: usize,
    pub moves: [usize; 31],
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

impl Solution {
    pub fn new() -> Self {
        Self {
            length: 0,
            depth1: 0,
            verbose: 0,
            urf_idx: 0,
            moves: [0; 31],
        }
    }

    pub fn set_args(&mut self, verbose: usize, urf_idx: usize, depth1: usize) {
        self.verbose = verbose;
        self.urf_idx = urf_idx;
        self.depth1 = depth1;
    }

    pub fn append_sol_move(&mut self, cur_move: usize) {
        if self.length == 0 {
            self.moves[0] = cur_move;
            self.length = 1;
            return;
        }
        let axis_cur = cur_move / 3;
        let axis_last = self.moves[self.length - 1] / 3;
        if axis_cur == axis_last {
            let pow = (cur_move % 3 + self.moves[self.length - 1] % 3 + 1) % 4;
            if pow == 3 {
                self.length -= 1;
            } else {
                self.moves[self.length - 1] = axis_cur * 3 + pow;
            }
            return;
        }
        if self.length > 1
            && axis_cur % 3 == axis_last % 3
            && axis_cur == self.moves[self.length - 2] / 3
        {
            let pow = (cur_move % 3 + self.moves[self.length - 2] % 3 + 1) % 4;
            if pow == 3 {
                self.moves[self.length - 2] = self.moves[self.length - 1];
                self.length -= 1;
            } else {
                self.moves[self.length - 2] = axis_cur * 3 + pow;
            }
            return;
        }
        self.moves[self.length] = cur_move;
        self.length += 1;
    }

    /// The recorded moves mapped back into the caller's frame. For the
    /// three inverted URF frames the order reverses and each move is
    /// remapped to its inverse by the same table.
    pub fn to_moves(&self) -> Vec<Move> {
        let urf = match (self.verbose & INVERSE_SOLUTION) != 0 {
            true => (self.urf_idx + 3) % 6,
            false => self.urf_idx,
        };
        let remap = |s: usize| ALL_MOVES[URF_MOVE[urf][self.moves[s]] as usize];
        if urf < 3 {
            (0..self.length).map(remap).collect()
        } else {
            (0..self.length).rev().map(remap).collect()
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moves = self.to_moves();
        let urf = match (self.verbose & INVERSE_SOLUTION) != 0 {
            true => (self.urf_idx + 3) % 6,
            false => self.urf_idx,
        };
        let mut res = String::new();
        for (i, m) in moves.iter().enumerate() {
            // position of the phase boundary in emission order
            let pos = match urf < 3 {
                true => i,
                false => self.length - i,
            };
            if (self.verbose & USE_SEPARATOR) != 0 && pos == self.depth1 && (urf < 3 || i > 0) {
                res.push_str(". ");
            }
            res.push_str(&m.to_string());
            res.push(' ');
        }
        if (self.verbose & APPEND_LENGTH) != 0 {
            res.push_str(&format!("({}f)", self.length));
        }
        write!(f, "{}", res.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move::*;

    #[test]
    fn test_parse() {
        assert_eq!(parse_moves("U R2 F'").unwrap(), vec![U, R2, F3]);
        assert_eq!(parse_moves("U1 R2 F3").unwrap(), vec![U, R2, F3]);
        assert_eq!(parse_moves("U+ R2 F-").unwrap(), vec![U, R2, F3]);
        assert_eq!(parse_moves("UR2F'").unwrap(), vec![U, R2, F3]);
        assert_eq!(parse_moves("  ").unwrap(), vec![]);
        assert!(parse_moves("U X").is_err());
        assert!(parse_moves("U4").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(U3.to_string(), "U'");
        assert_eq!(R2.to_string(), "R2");
        assert_eq!(moves_to_string(&[D, B3, D3]), "D B' D'");
        assert_eq!("B'".parse::<Move>().unwrap(), B3);
    }

    #[test]
    fn test_inverse() {
        assert_eq!(U.inverse(), U3);
        assert_eq!(U2.inverse(), U2);
        assert_eq!(L3.inverse(), L);
    }

    #[test]
    fn test_append_merges_axis() {
        let mut s = Solution::new();
        for _ in 0..4 {
            s.append_sol_move(R as usize);
        }
        assert_eq!(s.length, 0);
        let mut s = Solution::new();
        s.append_sol_move(R as usize);
        s.append_sol_move(R as usize);
        assert_eq!(s.length, 1);
        assert_eq!(s.moves[0], R2 as usize);
    }

    #[test]
    fn test_append_folds_parallel() {
        // U D U2 collapses to U' D because U and U2 meet across D
        let mut s = Solution::new();
        s.append_sol_move(U as usize);
        s.append_sol_move(D as usize);
        s.append_sol_move(U2 as usize);
        assert_eq!(s.length, 2);
        assert_eq!(s.moves[0], U3 as usize);
        assert_eq!(s.moves[1], D as usize);
    }
}
