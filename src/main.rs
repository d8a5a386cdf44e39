#[cfg(feature = "term")]
use twophase::facelet::FaceCube;
#[cfg(feature = "term")]
use twophase::printer::print_facelet;
use twophase::{from_moves, random_moves, solve};

fn main() {
    let scramble = random_moves(25);
    let facelet = from_moves(&scramble);
    println!("Scramble: {}", scramble);
    #[cfg(feature = "term")]
    {
        let fc = FaceCube::try_from(facelet.as_str()).unwrap();
        let _ = print_facelet(&fc);
    }
    println!("Solution: {}", solve(&facelet, 21));
}
