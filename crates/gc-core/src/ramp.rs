/// 10 caractères — du plus dense au plus clair.
pub const RAMP_CLASSIC: &str = "@%#*+=-:. ";

/// Rampe de caractères ordonnée, index 0 = densité d'encre maximale.
///
/// Mappe une brightness normalisée [0.0, 1.0] vers un caractère :
/// `floor(b × (len − 1))`, clampé dans [0, len − 1].
///
/// # Example
/// ```
/// use gc_core::ramp::CharRamp;
/// let ramp = CharRamp::classic();
/// assert_eq!(ramp.map(0.0), '@');
/// assert_eq!(ramp.map(1.0), ' ');
/// ```
pub struct CharRamp {
    chars: Vec<char>,
}

impl CharRamp {
    /// Rampe par défaut (`"@%#*+=-:. "`).
    #[must_use]
    pub fn classic() -> Self {
        Self::new(RAMP_CLASSIC)
    }

    /// Build a ramp from an ordered string, darkest first.
    ///
    /// Falls back to the classic ramp if fewer than 2 characters are
    /// provided, so the non-empty invariant always holds.
    #[must_use]
    pub fn new(ramp: &str) -> Self {
        let chars: Vec<char> = ramp.chars().collect();
        if chars.len() < 2 {
            return Self {
                chars: RAMP_CLASSIC.chars().collect(),
            };
        }
        Self { chars }
    }

    /// Nombre de caractères dans la rampe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false — the constructor enforces at least 2 characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Map a normalized brightness to a ramp character.
    ///
    /// Out-of-range and NaN inputs are clamped to the valid index range.
    ///
    /// # Example
    /// ```
    /// use gc_core::ramp::CharRamp;
    /// let ramp = CharRamp::classic();
    /// // 10 chars: floor(0.5 × 9) = 4 → '+'
    /// assert_eq!(ramp.map(0.5), '+');
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn map(&self, brightness: f32) -> char {
        let last = self.chars.len() - 1;
        // NaN → 0 via the float-to-int cast, negatives saturate to 0.
        let idx = ((brightness * last as f32).floor() as usize).min(last);
        self.chars[idx]
    }
}

impl Default for CharRamp {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_extremes() {
        let ramp = CharRamp::classic();
        assert_eq!(ramp.len(), 10);
        assert_eq!(ramp.map(0.0), '@');
        assert_eq!(ramp.map(1.0), ' ');
    }

    #[test]
    fn map_is_monotonic() {
        let ramp = CharRamp::classic();
        let chars: Vec<char> = RAMP_CLASSIC.chars().collect();
        let mut prev = 0usize;
        for i in 0..=100 {
            let b = i as f32 / 100.0;
            let ch = ramp.map(b);
            let idx = chars.iter().position(|&c| c == ch).unwrap();
            assert!(idx >= prev, "rampe non monotone à brightness {b}");
            prev = idx;
        }
    }

    #[test]
    fn map_clamps_out_of_range() {
        let ramp = CharRamp::classic();
        assert_eq!(ramp.map(-0.5), '@');
        assert_eq!(ramp.map(2.0), ' ');
        assert_eq!(ramp.map(f32::NAN), '@');
    }

    #[test]
    fn short_ramp_falls_back_to_classic() {
        let ramp = CharRamp::new("@");
        assert_eq!(ramp.len(), 10);
    }
}
