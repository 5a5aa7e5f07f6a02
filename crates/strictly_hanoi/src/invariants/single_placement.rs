//! Single placement invariant: each piece rests on exactly one peg.

use super::super::level::Level;
use super::Invariant;

/// Invariant: every piece appears in exactly one peg's stack, exactly once.
pub struct SinglePlacementInvariant;

impl Invariant<Level> for SinglePlacementInvariant {
    fn holds(level: &Level) -> bool {
        let mut seen = vec![0usize; level.pieces().len()];
        for peg in level.pegs() {
            for id in peg.stack() {
                match seen.get_mut(id.index()) {
                    Some(count) => *count += 1,
                    None => return false,
                }
            }
        }
        seen.iter().all(|&count| count == 1)
    }

    fn description() -> &'static str {
        "Every piece rests on exactly one peg"
    }
}
