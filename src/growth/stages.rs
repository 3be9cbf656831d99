//! Growth-stage interpolation for the presentation layer.
//!
//! Pure functions of progress — never stored, never incrementally updated,
//! so the right sprite is re-derivable at any time, including on the first
//! frame back from a long offline gap.

use crate::shared::SPROUT_FRACTION;

/// Map growth progress to a sprite-stage index in `0..stage_count`.
///
/// Mirrors the pot's visual timeline: stage 0 (the sprout) holds for the
/// first `SPROUT_FRACTION` of the grow, then stages `1..stage_count` spread
/// linearly over the remainder. Monotone non-decreasing in `progress`.
pub fn stage_index(progress: f32, stage_count: u8) -> u8 {
    if stage_count <= 1 {
        return 0;
    }
    let progress = progress.clamp(0.0, 1.0);
    if progress < SPROUT_FRACTION {
        return 0;
    }
    if progress >= 1.0 {
        return stage_count - 1;
    }

    let later = (progress - SPROUT_FRACTION) / (1.0 - SPROUT_FRACTION);
    let idx = 1 + (later * (stage_count - 1) as f32) as u8;
    idx.min(stage_count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprout_stage_holds_early() {
        assert_eq!(stage_index(0.0, 4), 0);
        assert_eq!(stage_index(0.19, 4), 0);
        assert_eq!(stage_index(0.2, 4), 1);
    }

    #[test]
    fn test_full_progress_is_last_stage() {
        assert_eq!(stage_index(1.0, 4), 3);
        assert_eq!(stage_index(2.0, 4), 3);
        assert_eq!(stage_index(1.0, 2), 1);
    }

    #[test]
    fn test_degenerate_stage_counts() {
        assert_eq!(stage_index(0.5, 0), 0);
        assert_eq!(stage_index(0.5, 1), 0);
    }

    #[test]
    fn test_monotone_non_decreasing() {
        for stage_count in [2u8, 3, 4, 5, 8] {
            let mut last = 0;
            for step in 0..=100 {
                let idx = stage_index(step as f32 / 100.0, stage_count);
                assert!(
                    idx >= last,
                    "stage regressed at progress {} with {} stages",
                    step as f32 / 100.0,
                    stage_count
                );
                assert!(idx < stage_count);
                last = idx;
            }
            assert_eq!(last, stage_count - 1);
        }
    }
}
