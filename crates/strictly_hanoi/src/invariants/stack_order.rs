//! Stack order invariant: narrower pieces sit on wider ones.

use super::super::level::Level;
use super::Invariant;

/// Invariant: every peg's stack is non-increasing in rank from bottom to top.
pub struct StackOrderInvariant;

impl Invariant<Level> for StackOrderInvariant {
    fn holds(level: &Level) -> bool {
        level.pegs().iter().all(|peg| {
            peg.stack().windows(2).all(|pair| {
                match (level.piece(pair[0]), level.piece(pair[1])) {
                    (Some(below), Some(above)) => above.rank() <= below.rank(),
                    _ => false,
                }
            })
        })
    }

    fn description() -> &'static str {
        "Every stack is ordered widest at the bottom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelConfig;

    #[test]
    fn test_initial_level_holds() {
        let level = Level::new(&LevelConfig::classic()).unwrap();
        assert!(StackOrderInvariant::holds(&level));
    }
}
