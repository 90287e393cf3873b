//! Random prompt draws
//!
//! Prompts are drawn uniformly at random with replacement, so the same
//! prompt may come up more than once in a game.

use crate::catalog::Item;

/// Draws a prompt uniformly at random
///
/// Returns `None` when there is nothing to draw from.
pub fn draw_prompt(candidates: &[Item]) -> Option<&Item> {
    fastrand::choice(candidates)
}

/// Draws a prompt, preferring ones at least `min_length` characters long
///
/// Short draws are retried up to `attempts` times. After that the last draw
/// is accepted even if it is still short, so this never fails on a pool that
/// only holds short prompts.
pub fn draw_prompt_with_min_length(
    candidates: &[Item],
    min_length: usize,
    attempts: usize,
) -> Option<&Item> {
    let mut drawn = draw_prompt(candidates)?;
    for _ in 0..attempts {
        if drawn.text_len() >= min_length {
            break;
        }
        drawn = draw_prompt(candidates)?;
    }
    Some(drawn)
}
