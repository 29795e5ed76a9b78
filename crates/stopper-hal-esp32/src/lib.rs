//! ESP32 adapters for the stopper UI: button pins, the I²C display bus,
//! the Wi-Fi scanner and the attack order queue.

#![no_std]

pub mod attack;
pub mod input;
pub mod network;
pub mod platform;
