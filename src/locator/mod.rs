//! Locator and device-identifier grammar
//!
//! A locator addresses a device, service, or event topic with the shape
//! `scheme:authority[/service][/ignored]`. The subset `scheme:authority`
//! naming a device (mac/uuid/serial/self) is a [`DeviceId`], held in
//! canonical form: lowercase scheme, normalized MAC authority.

mod device;
mod parse;
mod scheme;

pub use device::DeviceId;
pub use parse::Locator;
pub use scheme::Scheme;
