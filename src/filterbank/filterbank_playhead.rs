// crossbeam for the control queue
use crossbeam::atomic::AtomicCell;

use std::sync::Arc;

use crate::building_blocks::{RampPolicy, RampedLpf12dB};
use crate::filterbank::ControlMessage;

/// This is the "playhead", the part you own inside the output callback
/// of your application. One filter per channel, no interaction between
/// channels.
pub struct FilterbankPlayhead<const BUFSIZE: usize, const NCHAN: usize> {
    pub(crate) filters: Vec<RampedLpf12dB<BUFSIZE>>, // crate public for test
    samplerate: f32,
    control_q_rec: crossbeam::channel::Receiver<ControlMessage>,
}

impl<const BUFSIZE: usize, const NCHAN: usize> FilterbankPlayhead<BUFSIZE, NCHAN> {
    pub(crate) fn new(
        policy: RampPolicy,
        samplerate: &Arc<AtomicCell<f32>>,
        rx: crossbeam::channel::Receiver<ControlMessage>,
    ) -> FilterbankPlayhead<BUFSIZE, NCHAN> {
        let sr = samplerate.load();

        let mut filters = Vec::with_capacity(NCHAN);
        for _ in 0..NCHAN {
            filters.push(RampedLpf12dB::<BUFSIZE>::new(sr, policy));
        }

        FilterbankPlayhead {
            filters,
            samplerate: sr,
            control_q_rec: rx,
        }
    }

    pub fn samplerate(&self) -> f32 {
        self.samplerate
    }

    /// One callback's worth of work: drain pending control messages and
    /// apply them to every channel, filter each channel's block, then
    /// advance the ramps. Nothing in here allocates, locks or blocks;
    /// the queue drain is non-blocking and the filters are fixed-size.
    pub fn process(&mut self, input: [[f32; BUFSIZE]; NCHAN]) -> [[f32; BUFSIZE]; NCHAN] {
        for cm in self.control_q_rec.try_iter() {
            match cm {
                ControlMessage::SetParameter(par, val) => {
                    for lpf in self.filters.iter_mut() {
                        lpf.set_parameter(par, val);
                    }
                }
                ControlMessage::SetSamplerate(fs) => {
                    self.samplerate = fs;
                    for lpf in self.filters.iter_mut() {
                        lpf.set_samplerate(fs);
                    }
                }
                ControlMessage::SetFrameSize(frame_size) => {
                    for lpf in self.filters.iter_mut() {
                        lpf.set_frame_size(frame_size);
                    }
                }
                ControlMessage::ToggleEnable => {
                    for lpf in self.filters.iter_mut() {
                        lpf.toggle_enable();
                    }
                }
            }
        }

        let mut out_buf: [[f32; BUFSIZE]; NCHAN] = [[0.0; BUFSIZE]; NCHAN];
        for (ch, lpf) in self.filters.iter_mut().enumerate() {
            out_buf[ch] = lpf.process_block(input[ch]);
            lpf.ramp();
        }

        out_buf
    }
}
