//! Edge TPU object detector configuration.
//!
//! Valid device specifiers are:
//!
//! * `:<N>`: use the N-th Edge TPU
//! * `usb`: use any USB Edge TPU
//! * `usb:<N>`: use the N-th USB Edge TPU
//! * `pci`: use any PCIe Edge TPU
//! * `pci:<N>`: use the N-th PCIe Edge TPU
//! * `cpu`: run on the CPU

mod options;
mod specifier;

pub use options::*;
pub use specifier::*;
