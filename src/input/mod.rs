//! Input plumbing
//!
//! Keyboard state is the shell's problem (it maps keys onto `TickInput`);
//! this module owns the device-orientation side: a bounded event channel
//! and the angle-to-force conversion.

pub mod orientation;

pub use orientation::{
    OrientationEvent, OrientationReceiver, OrientationSender, orientation_channel, tilt_force,
};
