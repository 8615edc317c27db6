pub mod ramped_lpf_12db;
pub mod sos;

pub use ramped_lpf_12db::*;
pub use sos::*;
