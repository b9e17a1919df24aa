/*!
    Timestamps and durations in stream time base units.
*/

use std::time::Duration;

use crate::Rational;

/**
    A presentation or decode timestamp, counted in ticks of some stream's
    time base. Meaningless without that time base.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pts(pub i64);

impl Pts {
    /**
        Convert to a Duration. Negative timestamps clamp to zero.
    */
    #[inline]
    pub fn to_duration(self, time_base: Rational) -> Duration {
        ticks_to_duration(self.0, time_base)
    }

    /**
        Rescale into another time base.

        Rounds to nearest with halfway cases away from zero, the default
        rounding of `av_rescale_q`.
    */
    #[inline]
    pub fn rescale(self, from: Rational, to: Rational) -> Self {
        Self(rescale_q(self.0, from, to))
    }

    #[inline]
    pub fn to_micros(self, time_base: Rational) -> i64 {
        rescale_q(self.0, time_base, Rational::MICROSECONDS)
    }
}

/**
    A length of time in ticks of a stream's time base.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaDuration(pub i64);

impl MediaDuration {
    /**
        Convert to a Duration. Negative durations clamp to zero.
    */
    #[inline]
    pub fn to_duration(self, time_base: Rational) -> Duration {
        ticks_to_duration(self.0, time_base)
    }
}

fn ticks_to_duration(ticks: i64, time_base: Rational) -> Duration {
    let micros = rescale_q(ticks, time_base, Rational::MICROSECONDS);
    Duration::from_micros(u64::try_from(micros).unwrap_or(0))
}

fn rescale_q(value: i64, from: Rational, to: Rational) -> i64 {
    let mut num = i128::from(value) * i128::from(from.num) * i128::from(to.den);
    let mut den = i128::from(from.den) * i128::from(to.num);
    if den == 0 {
        return i64::MIN;
    }
    if den < 0 {
        num = -num;
        den = -den;
    }
    let half = den / 2;
    let scaled = if num >= 0 {
        (num + half) / den
    } else {
        -((-num + half) / den)
    };
    scaled.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    const TB_1_10: Rational = Rational { num: 1, den: 10 };
    const TB_1_3: Rational = Rational { num: 1, den: 3 };
    const TB_1_90000: Rational = Rational { num: 1, den: 90000 };

    #[test]
    fn frame_index_to_micros() {
        assert_eq!(Pts(0).to_micros(TB_1_10), 0);
        assert_eq!(Pts(7).to_micros(TB_1_10), 700_000);
        assert_eq!(Pts(90000).to_micros(TB_1_90000), 1_000_000);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(Pts(1).to_micros(TB_1_3), 333_333);
        assert_eq!(Pts(2).to_micros(TB_1_3), 666_667);
        assert_eq!(Pts(-2).to_micros(TB_1_3), -666_667);

        let half_tick = Rational::new(1, 2000);
        let millis = Rational::new(1, 1000);
        assert_eq!(Pts(1).rescale(half_tick, millis), Pts(1));
        assert_eq!(Pts(-1).rescale(half_tick, millis), Pts(-1));
    }

    #[test]
    fn ntsc_frame_in_milliseconds() {
        // one 29.97 fps frame
        assert_eq!(Pts(3003).rescale(TB_1_90000, Rational::new(1, 1000)), Pts(33));
    }

    #[test]
    fn large_values_do_not_overflow() {
        let big = Pts(i64::MAX / 2);
        assert_eq!(big.rescale(TB_1_90000, TB_1_90000), big);
    }

    #[test]
    fn durations_clamp_at_zero() {
        assert_eq!(Pts(15).to_duration(TB_1_10), Duration::from_millis(1500));
        assert_eq!(Pts(-15).to_duration(TB_1_10), Duration::ZERO);
        assert_eq!(MediaDuration(3).to_duration(TB_1_3), Duration::from_secs(1));
        assert_eq!(MediaDuration(-1).to_duration(TB_1_3), Duration::ZERO);
    }
}
