use crossterm::style::{Color as TermColor, SetBackgroundColor};

use crate::facelet::{Color, FaceCube};

fn to_term_color(color: Color) -> TermColor {
    match color {
        Color::U => TermColor::White,
        Color::R => TermColor::Red,
        Color::F => TermColor::Green,
        Color::D => TermColor::Yellow,
        Color::L => TermColor::Magenta,
        Color::B => TermColor::Blue,
    }
}

fn row(face: &[Color], r: usize) -> String {
    let mut s = String::new();
    for c in 0..3 {
        s.push_str(&format!("{}  ", SetBackgroundColor(to_term_color(face[3 * r + c]))));
    }
    s.push_str(&format!("{}", SetBackgroundColor(TermColor::Reset)));
    s
}

/// Print a facelet cube as a colored net:
///
/// ```text
///        U
///    Lic Fic R B
///        D
/// ```
pub fn print_facelet(facelet: &FaceCube) -> Result<(), std::io::Error> {
    let f = &facelet.f;
    let pad = "      ";
    println!();
    for r in 0..3 {
        println!("{}{}", pad, row(&f[0..9], r)); // U
    }
    for r in 0..3 {
        println!(
            "{}{}{}{}",
            row(&f[36..45], r), // L
            row(&f[18..27], r), // F
            row(&f[9..18], r),  // R
            row(&f[45..54], r), // B
        );
    }
    for r in 0..3 {
        println!("{}{}", pad, row(&f[27..36], r)); // D
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::CubieCube;
    use crate::moves::parse_moves;

    #[test]
    fn test_printer() {
        let cc = CubieCube::default().apply_moves(&parse_moves("R U R' U'").unwrap());
        let fc = FaceCube::from(&cc);
        let _ = print_facelet(&fc);
    }
}
