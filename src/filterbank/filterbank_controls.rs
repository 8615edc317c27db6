// crossbeam for the control queue
use crossbeam::atomic::AtomicCell;

use std::sync::Arc;

use crate::building_blocks::FilterParameterLabel;
use crate::filterbank::ControlMessage;

/// These are the controls, the part you keep on your control/UI thread.
/// Every setter posts one message to the audio thread; the change is in
/// effect for the next processed block. Range-limiting the values
/// (cutoff below Nyquist, Q above zero) is the caller's job, typically
/// done by the sliders feeding this.
pub struct FilterbankControls {
    control_q_send: crossbeam::channel::Sender<ControlMessage>,
    samplerate: Arc<AtomicCell<f32>>, // shared reference, written only here
}

impl FilterbankControls {
    pub(crate) fn new(
        samplerate: &Arc<AtomicCell<f32>>,
        tx: crossbeam::channel::Sender<ControlMessage>,
    ) -> FilterbankControls {
        FilterbankControls {
            control_q_send: tx,
            samplerate: Arc::clone(samplerate),
        }
    }

    pub fn set_cutoff(&self, freq: f32) {
        self.control_q_send
            .send(ControlMessage::SetParameter(
                FilterParameterLabel::LowpassCutoffFrequency,
                freq,
            ))
            .unwrap();
    }

    pub fn set_gain(&self, gain_db: f32) {
        self.control_q_send
            .send(ControlMessage::SetParameter(
                FilterParameterLabel::LowpassGain,
                gain_db,
            ))
            .unwrap();
    }

    pub fn set_q(&self, q: f32) {
        self.control_q_send
            .send(ControlMessage::SetParameter(
                FilterParameterLabel::LowpassQFactor,
                q,
            ))
            .unwrap();
    }

    /// bypass on/off for all channels
    pub fn toggle_enable(&self) {
        self.control_q_send
            .send(ControlMessage::ToggleEnable)
            .unwrap();
    }

    /// tell the filters the host renegotiated the sample rate
    pub fn set_samplerate(&self, fs: f32) {
        self.samplerate.store(fs);
        self.control_q_send
            .send(ControlMessage::SetSamplerate(fs))
            .unwrap();
    }

    /// tell the filters the host renegotiated the block length
    pub fn set_frame_size(&self, frame_size: usize) {
        self.control_q_send
            .send(ControlMessage::SetFrameSize(frame_size))
            .unwrap();
    }

    /// the sample rate the filters currently assume
    pub fn samplerate(&self) -> f32 {
        // this might cause locking on platforms where AtomicCell<f32> isn't lockfree
        self.samplerate.load()
    }
}
