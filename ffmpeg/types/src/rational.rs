/*!
    Time bases and frame rates.
*/

use std::fmt;

/**
    A fraction such as a stream time base (`1/90000`) or a frame rate
    (`30000/1001`).

    Kept in the same shape FFmpeg uses so values can be passed through
    without reduction.
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    /// The time base of delivered frame timestamps.
    pub const MICROSECONDS: Self = Self::new(1, 1_000_000);

    /**
        # Panics

        Panics if `den` is zero.
    */
    #[inline]
    pub const fn new(num: i32, den: i32) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        Self { num, den }
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /**
        True for `0/n`, which FFmpeg uses for unknown frame rates.
    */
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.num == 0
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn zero_denominator_panics() {
        Rational::new(1, 0);
    }

    #[test]
    fn ntsc_frame_rate() {
        let rate = Rational::new(30000, 1001);
        assert!((rate.to_f64() - 29.97).abs() < 0.001);
        assert!(!rate.is_zero());
    }

    #[test]
    fn unknown_frame_rate() {
        assert!(Rational::new(0, 1).is_zero());
    }

    #[test]
    fn formats_as_fraction() {
        assert_eq!(Rational::new(1, 90000).to_string(), "1/90000");
        assert_eq!(format!("{:?}", Rational::MICROSECONDS), "1/1000000");
    }
}
