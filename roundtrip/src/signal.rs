/*!
    Synthetic PCM input.
*/

pub const DEFAULT_BASE: i16 = 0x1000;
pub const DEFAULT_STEP: i16 = 0x50;

/**
    A linear ramp of `count` samples: `base + i * step`, wrapping on overflow.
*/
pub fn ramp(count: usize, base: i16, step: i16) -> Vec<i16> {
    (0..count)
        .map(|i| base.wrapping_add((i as i16).wrapping_mul(step)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ramp() {
        let pcm = ramp(240, DEFAULT_BASE, DEFAULT_STEP);
        assert_eq!(pcm.len(), 240);
        assert_eq!(pcm[0], 0x1000);
        assert_eq!(pcm[1], 0x1050);
        assert_eq!(pcm[239], 0x1000 + 239 * 0x50);
    }

    #[test]
    fn wraps_like_unsigned_words() {
        let pcm = ramp(3, 0x7fff, 1);
        assert_eq!(pcm, vec![0x7fff, i16::MIN, i16::MIN + 1]);
    }

    #[test]
    fn empty() {
        assert!(ramp(0, DEFAULT_BASE, DEFAULT_STEP).is_empty());
    }
}
