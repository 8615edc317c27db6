use crate::building_blocks::filters::sos::*;
use crate::building_blocks::{FilterParameterLabel, RampPolicy};

/// smoothing feedback for both ramp flavors, per block
const RAMP_FBK: f32 = 0.95;

/**
 * Resonant biquad low-pass filter, 12dB/oct, with click-free
 * parameter transitions.
 *
 * Coefficients come from a resonant 2-pole analog prototype pushed
 * through the bilinear transform (cutoff pre-warped with tan), with the
 * passband gain applied to the numerator after discretization.
 *
 * Caller contract, not validated on the hot path: cutoff stays below
 * Nyquist, Q stays positive, `frame_size <= BUFSIZE`. Violations mean
 * undefined numerical behavior; debug builds assert on them.
 */
pub struct RampedLpf12dB<const BUFSIZE: usize> {
    // user parameters, in use vs. requested
    cutoff: f32,
    cutoff_target: f32,
    gain_db: f32,
    gain_db_target: f32,
    q: f32,
    q_target: f32,

    // internal parameters
    coefs: SOSCoefs,
    coefs_target: SOSCoefs,
    delay: SOSDelay,
    samplerate: f32,
    frame_size: usize,
    enabled: bool,
    policy: RampPolicy,
}

impl<const BUFSIZE: usize> Default for RampedLpf12dB<BUFSIZE> {
    /// identity filter (pass-through coefficients), parameters parked
    /// at 1kHz / 0dB / butterworth Q
    fn default() -> Self {
        RampedLpf12dB {
            cutoff: 1000.0,
            cutoff_target: 1000.0,
            gain_db: 0.0,
            gain_db_target: 0.0,
            q: std::f32::consts::FRAC_1_SQRT_2,
            q_target: std::f32::consts::FRAC_1_SQRT_2,
            coefs: SOSCoefs::default(),
            coefs_target: SOSCoefs::default(),
            delay: SOSDelay::default(),
            samplerate: 48000.0,
            frame_size: BUFSIZE,
            enabled: true,
            policy: RampPolicy::ParameterRamp,
        }
    }
}

impl<const BUFSIZE: usize> RampedLpf12dB<BUFSIZE> {
    /// real low-pass at the default 1kHz / 0dB / butterworth Q,
    /// active and target coefficients start out equal
    pub fn new(samplerate: f32, policy: RampPolicy) -> Self {
        let mut lpf = RampedLpf12dB {
            samplerate,
            policy,
            ..Default::default()
        };
        RampedLpf12dB::<BUFSIZE>::generate_coefs(
            &mut lpf.coefs_target,
            lpf.cutoff,
            lpf.gain_db,
            lpf.q,
            samplerate,
        );
        lpf.coefs = lpf.coefs_target;
        lpf
    }

    /// Derive the z-domain coefficients for a resonant 2-pole low-pass:
    /// pre-warp the cutoff, build the warped s-domain prototype
    /// `H(s) = beta / (s^2 + alpha1*s + alpha2)`, bilinear-transform it,
    /// then scale the numerator by the linear passband gain.
    pub fn generate_coefs(
        coefs: &mut SOSCoefs,
        cutoff: f32,
        gain_db: f32,
        q: f32,
        samplerate: f32,
    ) {
        debug_assert!(cutoff > 0.0 && cutoff < 0.5 * samplerate);
        debug_assert!(q > 0.0);

        let omega = ((std::f32::consts::PI * cutoff) / samplerate).tan();

        let beta = omega * omega;
        let alpha1 = omega / q;
        let alpha2 = beta;

        let d = 1.0 + alpha1 + alpha2;
        let b0 = beta / d;

        let gain = 10.0_f32.powf(gain_db / 20.0);
        coefs.b0 = gain * b0;
        coefs.b1 = gain * 2.0 * b0;
        coefs.b2 = gain * b0;
        coefs.a1 = (2.0 * alpha2 - 2.0) / d;
        coefs.a2 = (1.0 - alpha1 + alpha2) / d;
    }

    /// re-derive the target coefficients from the parameters currently
    /// in use; under the parameter ramp they take effect right away
    /// (the parameters themselves already moved smoothly)
    fn recalculate(&mut self) {
        RampedLpf12dB::<BUFSIZE>::generate_coefs(
            &mut self.coefs_target,
            self.cutoff,
            self.gain_db,
            self.q,
            self.samplerate,
        );
        if self.policy == RampPolicy::ParameterRamp {
            self.coefs = self.coefs_target;
        }
    }

    /// Slowly pulls the active coefficients toward the target set.
    /// Call once per processed block under `CoefficientRamp`.
    pub fn ramp_coefficients(&mut self) {
        self.coefs.b0 = RAMP_FBK * self.coefs.b0 + (1.0 - RAMP_FBK) * self.coefs_target.b0;
        self.coefs.b1 = RAMP_FBK * self.coefs.b1 + (1.0 - RAMP_FBK) * self.coefs_target.b1;
        self.coefs.b2 = RAMP_FBK * self.coefs.b2 + (1.0 - RAMP_FBK) * self.coefs_target.b2;
        self.coefs.a1 = RAMP_FBK * self.coefs.a1 + (1.0 - RAMP_FBK) * self.coefs_target.a1;
        self.coefs.a2 = RAMP_FBK * self.coefs.a2 + (1.0 - RAMP_FBK) * self.coefs_target.a2;
    }

    /// Slowly pulls cutoff/gain/Q toward their requested values, then
    /// re-derives the coefficients from the blended triple. Call once
    /// per processed block under `ParameterRamp`. More expensive than
    /// ramping coefficients, but every intermediate state is one a real
    /// parameter triple would produce.
    pub fn ramp_user_parameters(&mut self) {
        self.cutoff = RAMP_FBK * self.cutoff + (1.0 - RAMP_FBK) * self.cutoff_target;
        self.gain_db = RAMP_FBK * self.gain_db + (1.0 - RAMP_FBK) * self.gain_db_target;
        self.q = RAMP_FBK * self.q + (1.0 - RAMP_FBK) * self.q_target;
        self.recalculate();
    }

    /// the per-block smoothing step the instance's policy calls for
    pub fn ramp(&mut self) {
        match self.policy {
            RampPolicy::CoefficientRamp => self.ramp_coefficients(),
            RampPolicy::ParameterRamp => self.ramp_user_parameters(),
        }
    }

    pub fn set_cutoff(&mut self, freq: f32) {
        self.cutoff_target = freq;
        if self.policy == RampPolicy::CoefficientRamp {
            self.cutoff = freq;
            self.recalculate();
        }
    }

    pub fn set_gain(&mut self, gain_db: f32) {
        self.gain_db_target = gain_db;
        if self.policy == RampPolicy::CoefficientRamp {
            self.gain_db = gain_db;
            self.recalculate();
        }
    }

    pub fn set_q(&mut self, q: f32) {
        self.q_target = q;
        if self.policy == RampPolicy::CoefficientRamp {
            self.q = q;
            self.recalculate();
        }
    }

    pub fn set_parameter(&mut self, par: FilterParameterLabel, val: f32) {
        match par {
            FilterParameterLabel::LowpassCutoffFrequency => self.set_cutoff(val),
            FilterParameterLabel::LowpassGain => self.set_gain(val),
            FilterParameterLabel::LowpassQFactor => self.set_q(val),
        }
    }

    /// A sample rate change is a discontinuity point: the coefficients
    /// for the parameters currently in use are recomputed and applied
    /// at once, no ramping. Subsequent parameter changes ramp as usual.
    pub fn set_samplerate(&mut self, fs: f32) {
        self.samplerate = fs;
        RampedLpf12dB::<BUFSIZE>::generate_coefs(
            &mut self.coefs_target,
            self.cutoff,
            self.gain_db,
            self.q,
            fs,
        );
        self.coefs = self.coefs_target;
    }

    /// adjusts the loop bound, nothing else
    pub fn set_frame_size(&mut self, frame_size: usize) {
        debug_assert!(frame_size <= BUFSIZE);
        self.frame_size = frame_size;
    }

    /// flips the bypass; the delay registers keep their values, so
    /// re-enabling resumes from the state at the moment of disabling
    pub fn toggle_enable(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn gain_db(&self) -> f32 {
        self.gain_db
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    pub fn coefs(&self) -> &SOSCoefs {
        &self.coefs
    }

    pub fn target_coefs(&self) -> &SOSCoefs {
        &self.coefs_target
    }

    /// Filters one block in stream order. Sequential calls form one
    /// continuous signal; the delay registers persist between blocks.
    /// When disabled the block passes through verbatim and the
    /// registers stay untouched.
    pub fn process_block(&mut self, block: [f32; BUFSIZE]) -> [f32; BUFSIZE] {
        if self.enabled {
            process_sos_block::<BUFSIZE>(&self.coefs, &mut self.delay, &block, self.frame_size)
        } else {
            block
        }
    }
}
