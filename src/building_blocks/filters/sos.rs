// generic second-order section
//
// z-domain biquad with the leading denominator term normalized to 1,
// realized in direct form II (two shared delay registers).

#[derive(Clone, Copy, Debug)]
pub struct SOSCoefs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct SOSDelay {
    pub del1: f32,
    pub del2: f32,
}

impl Default for SOSCoefs {
    /// identity section, input passes through unchanged
    fn default() -> Self {
        SOSCoefs {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        }
    }
}

impl Default for SOSDelay {
    fn default() -> Self {
        SOSDelay {
            del1: 0.0,
            del2: 0.0,
        }
    }
}

/// One direct-form-II step. Register shift happens after both taps are
/// read, and samples must be fed strictly in stream order.
#[inline(always)]
pub fn process_sos_sample(coefs: &SOSCoefs, delay: &mut SOSDelay, sample: f32) -> f32 {
    let intermediate = sample - (coefs.a1 * delay.del1) - (coefs.a2 * delay.del2);
    let out = (coefs.b0 * intermediate) + (coefs.b1 * delay.del1) + (coefs.b2 * delay.del2);
    delay.del2 = delay.del1;
    delay.del1 = intermediate;
    out
}

/// Filters the first `frame_size` samples of a block; the rest of the
/// output stays zero. `frame_size` must not exceed BUFSIZE.
pub fn process_sos_block<const BUFSIZE: usize>(
    coefs: &SOSCoefs,
    delay: &mut SOSDelay,
    block: &[f32; BUFSIZE],
    frame_size: usize,
) -> [f32; BUFSIZE] {
    debug_assert!(frame_size <= BUFSIZE);
    let mut out_buf: [f32; BUFSIZE] = [0.0; BUFSIZE];
    for i in 0..frame_size {
        out_buf[i] = process_sos_sample(coefs, delay, block[i]);
    }
    out_buf
}

// TEST TEST TEST
#[cfg(test)]
mod tests {
    // Note this useful idiom: importing names from outer (for mod tests) scope.
    use super::*;

    #[test]
    fn identity_section_passes_through() {
        let coefs = SOSCoefs::default();
        let mut delay = SOSDelay::default();

        let block = [0.3, -0.7, 1.0, 0.0, 0.25, -1.0, 0.5, 0.125];
        let out = process_sos_block::<8>(&coefs, &mut delay, &block, 8);

        for i in 0..8 {
            assert_approx_eq::assert_approx_eq!(out[i], block[i], 0.0000001);
        }
    }

    #[test]
    fn dfii_recurrence_by_hand() {
        let coefs = SOSCoefs {
            b0: 0.5,
            b1: 0.25,
            b2: 0.125,
            a1: -0.5,
            a2: 0.25,
        };
        let mut delay = SOSDelay::default();

        // impulse in, trace the registers by hand:
        // s0 = 1,   y0 = 0.5
        // s1 = 0.5, y1 = 0.5*0.5 + 0.25*1    = 0.5
        // s2 = 0.5*0.5 - 0.25*1 = 0,
        //           y2 = 0 + 0.25*0.5 + 0.125*1 = 0.25
        let block = [1.0, 0.0, 0.0];
        let out = process_sos_block::<3>(&coefs, &mut delay, &block, 3);

        assert_approx_eq::assert_approx_eq!(out[0], 0.5, 0.000001);
        assert_approx_eq::assert_approx_eq!(out[1], 0.5, 0.000001);
        assert_approx_eq::assert_approx_eq!(out[2], 0.25, 0.000001);
    }

    #[test]
    fn frame_size_bounds_the_loop() {
        let coefs = SOSCoefs::default();
        let mut delay = SOSDelay::default();

        let block = [1.0; 8];
        let out = process_sos_block::<8>(&coefs, &mut delay, &block, 4);

        for i in 0..4 {
            assert_approx_eq::assert_approx_eq!(out[i], 1.0, 0.0000001);
        }
        for i in 4..8 {
            assert_approx_eq::assert_approx_eq!(out[i], 0.0, 0.0000001);
        }
    }
}
