//! # milight_rs
//!
//! An async Rust client for Milight 3.0 / LimitlessLED v6 wifi bridges.
//!
//! This crate provides a **runtime-agnostic** async API that speaks the
//! bridge's binary UDP protocol: it opens a session with a handshake, wraps
//! each command in a checksummed frame tagged with a sequence number, and
//! waits for the bridge to acknowledge it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::time::Duration;
//! use milight_rs::{MilightBridge, TemperaturePreset};
//!
//! async fn control_lights() {
//!     let mut bridge = MilightBridge::new();
//!     if !bridge.setup("192.168.1.50", 5987, Duration::from_secs(5)).await {
//!         return;
//!     }
//!
//!     bridge.turn_on(1).await;
//!     bridge.set_temperature(TemperaturePreset::Daylight.percentage().value().into(), 1).await;
//!     bridge.turn_on_bridge_lamp().await;
//!     println!("bridge mac: {}", bridge.get_mac_address().await);
//!     bridge.close();
//! }
//! ```
//!
//! ## Features
//!
//! - **Zones**: Address zones 1-4 or all of them at once with [`Zone`]
//! - **Colour**: 256 step colour wheel with named [`ColorPreset`]s
//! - **Brightness, Saturation, Temperature**: Clamped [`Percentage`] values
//! - **Disco Modes**: Nine built-in animations via [`DiscoMode`]
//! - **Bridge Lamp**: Control the lamp built into the bridge itself
//! - **Pairing**: Link and unlink lights from a zone
//! - **Diagnostics**: Inspect exchanged frames with [`FrameHistory`]
//!
//! ## Communication
//!
//! All communication with the bridge occurs over UDP, port 5987 by default.
//! Every operation performs its own handshake and waits for a single
//! acknowledgment; a lost datagram or a timeout is reported as `false`,
//! never retried.
//!
//! ## Feature Flags
//!
//! - `runtime-tokio` (default): Use the tokio async runtime
//! - `runtime-async-std`: Use the async-std runtime
//! - `runtime-smol`: Use the smol runtime

mod bridge;
mod command;
mod config;
mod connection;
mod dispatcher;
mod errors;
pub mod frame;
mod history;
pub mod runtime;
mod sequence;
mod session;
mod types;

// Re-export public API
pub use bridge::MilightBridge;
pub use command::{Action, Command, Target};
pub use config::BridgeConfig;
pub use errors::Error;
pub use history::{FrameEntry, FrameHistory, FrameKind, HistorySummary};
pub use sequence::SequenceNumber;
pub use session::{Handshake, Session};
pub use types::{ColorPreset, DiscoMode, Percentage, TemperaturePreset, Zone, color_value};
