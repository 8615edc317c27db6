//! A resonant 12dB/oct low-pass filter with click-free parameter
//! transitions, meant to sit in the audio callback of a host application.
//!
//! The actual DSP lives in [`building_blocks::filters`]; the
//! [`filterbank`] module wraps one filter per output channel and
//! provides a lock-free control half for the UI thread.

pub mod building_blocks;
pub mod filterbank;

pub use crate::building_blocks::{FilterParameterLabel, RampPolicy};
pub use crate::filterbank::init_filterbank;

// the allocation guard only watches scopes wrapped in
// assert_no_alloc::assert_no_alloc, everything else goes straight
// through to the system allocator
#[cfg(test)]
#[global_allocator]
static ALLOC: assert_no_alloc::AllocDisabler = assert_no_alloc::AllocDisabler;
