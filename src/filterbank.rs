pub mod filterbank_controls;
pub mod filterbank_playhead;

// crossbeam for the control queue
use crossbeam::atomic::AtomicCell;
use crossbeam::channel::Receiver;
use crossbeam::channel::Sender;

use std::sync::Arc;

use crate::building_blocks::{FilterParameterLabel, RampPolicy};

pub use crate::filterbank::{filterbank_controls::*, filterbank_playhead::*};

/// what the control thread may ask of the audio thread;
/// parameters address all channels at once (one set of "sliders")
pub(crate) enum ControlMessage {
    SetParameter(FilterParameterLabel, f32),
    SetSamplerate(f32),
    SetFrameSize(usize),
    ToggleEnable,
}

/// Wires up one low-pass filter per output channel, split into the
/// control half (keep it on your UI thread) and the playhead half
/// (owned by the audio callback). The bounded queue between them is
/// the only shared state, so no locking is needed on either side.
pub fn init_filterbank<const BUFSIZE: usize, const NCHAN: usize>(
    samplerate: f32,
    policy: RampPolicy,
) -> (FilterbankControls, FilterbankPlayhead<BUFSIZE, NCHAN>) {
    let (tx, rx): (Sender<ControlMessage>, Receiver<ControlMessage>) =
        crossbeam::channel::bounded(256);

    let samplerate_cell = Arc::new(AtomicCell::<f32>::new(samplerate));

    let controls = FilterbankControls::new(&samplerate_cell, tx);
    let playhead = FilterbankPlayhead::<BUFSIZE, NCHAN>::new(policy, &samplerate_cell, rx);

    (controls, playhead)
}

// TEST TEST TEST
#[cfg(test)]
mod tests {
    // Note this useful idiom: importing names from outer (for mod tests) scope.
    use super::*;
    use assert_no_alloc::assert_no_alloc;

    #[test]
    fn controls_reach_every_channel_before_the_block() {
        let (controls, mut playhead) =
            init_filterbank::<64, 2>(48000.0, RampPolicy::CoefficientRamp);

        controls.set_cutoff(4000.0);
        controls.set_gain(-6.0);
        controls.set_q(2.0);

        playhead.process([[0.0; 64]; 2]);

        for lpf in playhead.filters.iter() {
            assert_approx_eq::assert_approx_eq!(lpf.cutoff(), 4000.0, 0.0001);
            assert_approx_eq::assert_approx_eq!(lpf.gain_db(), -6.0, 0.0001);
            assert_approx_eq::assert_approx_eq!(lpf.q(), 2.0, 0.0001);
        }
    }

    #[test]
    fn samplerate_change_propagates() {
        let (controls, mut playhead) =
            init_filterbank::<64, 2>(44100.0, RampPolicy::ParameterRamp);

        controls.set_samplerate(96000.0);
        assert_approx_eq::assert_approx_eq!(controls.samplerate(), 96000.0, 0.001);

        playhead.process([[0.0; 64]; 2]);
        assert_approx_eq::assert_approx_eq!(playhead.samplerate(), 96000.0, 0.001);
    }

    #[test]
    fn toggle_makes_the_bank_transparent() {
        let (controls, mut playhead) =
            init_filterbank::<32, 2>(48000.0, RampPolicy::ParameterRamp);

        controls.toggle_enable();

        let mut input = [[0.0; 32]; 2];
        for (ch, chan) in input.iter_mut().enumerate() {
            for (i, s) in chan.iter_mut().enumerate() {
                *s = ((ch * 32 + i) as f32 * 0.11).sin();
            }
        }

        let out = playhead.process(input);
        for ch in 0..2 {
            for i in 0..32 {
                assert_approx_eq::assert_approx_eq!(out[ch][i], input[ch][i], 0.0000001);
            }
        }
    }

    #[test]
    fn audio_path_does_not_allocate() {
        let (controls, mut playhead) =
            init_filterbank::<128, 2>(48000.0, RampPolicy::ParameterRamp);

        controls.set_cutoff(250.0);
        controls.set_q(4.0);

        // one block with pending messages, a few without
        for _ in 0..8 {
            assert_no_alloc(|| playhead.process([[0.25; 128]; 2]));
        }
    }

    #[test]
    fn channels_stay_independent() {
        let (controls, mut playhead) =
            init_filterbank::<64, 2>(48000.0, RampPolicy::CoefficientRamp);

        controls.set_cutoff(500.0);

        let mut input = [[0.0; 64]; 2];
        for (i, s) in input[0].iter_mut().enumerate() {
            *s = if i % 2 == 0 { 1.0 } else { -1.0 };
        }
        // channel 1 stays silent

        for _ in 0..10 {
            let out = playhead.process(input);
            for s in out[1] {
                // nothing bleeds over from the busy channel
                assert_approx_eq::assert_approx_eq!(s, 0.0, 0.0000001);
            }
        }
    }
}
