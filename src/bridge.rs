//! Named operations on a Milight wifi bridge.

use std::time::Duration;

use log::{debug, warn};
use serde_json::{Value, json};

use crate::command::{Action, Command, Target};
use crate::config::BridgeConfig;
use crate::dispatcher::Dispatcher;
use crate::errors::Error;
use crate::history::FrameHistory;
use crate::session::Handshake;
use crate::types::{DiscoMode, Percentage, Zone, color_value};

type Result<T> = std::result::Result<T, Error>;

/// Client for one Milight 3.0 / LimitlessLED v6 wifi bridge.
///
/// Call [`setup`](Self::setup) before anything else. Every light operation
/// performs its own handshake, sends a single command and waits for the
/// bridge to acknowledge it; the result is `true` only when that
/// acknowledgment arrives and matches. Nothing is retried.
///
/// Zone arguments are raw ids: 1 to 4 address a group and 0 addresses all
/// of them. Anything else fails before touching the network.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use milight_rs::{ColorPreset, MilightBridge};
///
/// # async fn run() {
/// let mut bridge = MilightBridge::new();
/// if bridge.setup("192.168.1.50", 5987, Duration::from_secs(5)).await {
///     bridge.turn_on(1).await;
///     bridge.set_color(ColorPreset::Blue.value().into(), 1).await;
///     bridge.set_brightness(80, 1).await;
/// }
/// bridge.close();
/// # }
/// ```
#[derive(Default)]
pub struct MilightBridge {
    dispatcher: Dispatcher,
}

impl MilightBridge {
    pub fn new() -> Self {
        MilightBridge {
            dispatcher: Dispatcher::new(),
        }
    }

    /// Open a socket to the bridge, closing any previous one first.
    ///
    /// Returns false if the socket cannot be created or the timeout is zero;
    /// no partial state is kept in that case.
    pub async fn setup(&mut self, address: &str, port: u16, timeout: Duration) -> bool {
        let config = BridgeConfig::new(address)
            .with_port(port)
            .with_timeout(timeout);
        self.setup_with(&config).await
    }

    pub async fn setup_with(&mut self, config: &BridgeConfig) -> bool {
        match self.dispatcher.open(config).await {
            Ok(()) => true,
            Err(e) => {
                warn!("unable to set up milight bridge {}: {}", config.peer(), e);
                self.dispatcher.history_mut().record_error(&e.to_string());
                false
            }
        }
    }

    /// Release the socket and reset the sequence number.
    pub fn close(&mut self) {
        self.dispatcher.close();
    }

    pub fn is_initialized(&self) -> bool {
        self.dispatcher.is_open()
    }

    pub fn config(&self) -> Option<&BridgeConfig> {
        self.dispatcher.config()
    }

    /// Run a bare handshake.
    pub async fn start_session(&mut self) -> Handshake {
        self.dispatcher.handshake().await
    }

    /// MAC address of the bridge, or an empty string if the handshake fails.
    pub async fn get_mac_address(&mut self) -> String {
        let mac = self.start_session().await.mac().to_string();
        debug!("bridge mac address: {:?}", mac);
        mac
    }

    /// Send a raw 9 byte command to a zone.
    pub async fn send(&mut self, command: &[u8], zone: u8) -> bool {
        self.dispatcher.send(command, zone).await
    }

    /// Encode and dispatch an action, reporting why it failed.
    pub async fn execute(&mut self, action: Action, target: Target) -> Result<()> {
        let command: Command = action.command(target)?;
        self.dispatcher.dispatch(&command, target.zone_id()).await?;
        Ok(())
    }

    pub async fn turn_on(&mut self, zone: u8) -> bool {
        self.zone_request(Action::On, zone).await
    }

    pub async fn turn_off(&mut self, zone: u8) -> bool {
        self.zone_request(Action::Off, zone).await
    }

    pub async fn set_night_mode(&mut self, zone: u8) -> bool {
        self.zone_request(Action::NightMode, zone).await
    }

    pub async fn set_white_mode(&mut self, zone: u8) -> bool {
        self.zone_request(Action::WhiteMode, zone).await
    }

    /// Set a colour wheel position; only the low byte of `color` is used.
    pub async fn set_color(&mut self, color: i64, zone: u8) -> bool {
        self.zone_request(Action::Color(color_value(color)), zone)
            .await
    }

    /// Brightness percentage, clamped to 0-100.
    pub async fn set_brightness(&mut self, brightness: i32, zone: u8) -> bool {
        self.zone_request(Action::Brightness(Percentage::clamped(brightness)), zone)
            .await
    }

    /// Saturation percentage, clamped to 0-100.
    pub async fn set_saturation(&mut self, saturation: i32, zone: u8) -> bool {
        self.zone_request(Action::Saturation(Percentage::clamped(saturation)), zone)
            .await
    }

    /// White temperature percentage, clamped to 0-100 (0 is 2700K, 100 is
    /// 6500K).
    pub async fn set_temperature(&mut self, temperature: i32, zone: u8) -> bool {
        self.zone_request(Action::Temperature(Percentage::clamped(temperature)), zone)
            .await
    }

    /// Disco mode, clamped to 1-9.
    pub async fn set_disco_mode(&mut self, mode: i32, zone: u8) -> bool {
        self.zone_request(Action::DiscoMode(DiscoMode::clamped(mode)), zone)
            .await
    }

    pub async fn speed_up_disco_mode(&mut self, zone: u8) -> bool {
        self.zone_request(Action::DiscoSpeedUp, zone).await
    }

    pub async fn slow_down_disco_mode(&mut self, zone: u8) -> bool {
        self.zone_request(Action::DiscoSlowDown, zone).await
    }

    /// Pair lights with a zone; must be sent shortly after powering them.
    pub async fn link(&mut self, zone: u8) -> bool {
        self.zone_request(Action::Link, zone).await
    }

    pub async fn unlink(&mut self, zone: u8) -> bool {
        self.zone_request(Action::Unlink, zone).await
    }

    pub async fn turn_on_bridge_lamp(&mut self) -> bool {
        self.request(Action::On, Target::BridgeLamp).await
    }

    pub async fn turn_off_bridge_lamp(&mut self) -> bool {
        self.request(Action::Off, Target::BridgeLamp).await
    }

    pub async fn set_white_mode_bridge_lamp(&mut self) -> bool {
        self.request(Action::WhiteMode, Target::BridgeLamp).await
    }

    pub async fn set_color_bridge_lamp(&mut self, color: i64) -> bool {
        self.request(Action::Color(color_value(color)), Target::BridgeLamp)
            .await
    }

    pub async fn set_brightness_bridge_lamp(&mut self, brightness: i32) -> bool {
        self.request(
            Action::Brightness(Percentage::clamped(brightness)),
            Target::BridgeLamp,
        )
        .await
    }

    pub async fn set_disco_mode_bridge_lamp(&mut self, mode: i32) -> bool {
        self.request(Action::DiscoMode(DiscoMode::clamped(mode)), Target::BridgeLamp)
            .await
    }

    pub async fn speed_up_disco_mode_bridge_lamp(&mut self) -> bool {
        self.request(Action::DiscoSpeedUp, Target::BridgeLamp).await
    }

    pub async fn slow_down_disco_mode_bridge_lamp(&mut self) -> bool {
        self.request(Action::DiscoSlowDown, Target::BridgeLamp)
            .await
    }

    pub fn history(&self) -> &FrameHistory {
        self.dispatcher.history()
    }

    pub fn clear_history(&mut self) {
        self.dispatcher.history_mut().clear();
    }

    /// Returns connection state and frame history without touching the
    /// network.
    pub fn diagnostics(&self) -> Value {
        let config = self.dispatcher.config();
        json!({
            "initialized": self.is_initialized(),
            "address": config.map(|c| c.address.clone()),
            "port": config.map(|c| c.port),
            "timeout_secs": config.map(|c| c.timeout.as_secs_f64()),
            "sequence": self.dispatcher.sequence().value(),
            "history": serde_json::to_value(self.history().summary()).unwrap_or(Value::Null),
        })
    }

    async fn zone_request(&mut self, action: Action, zone: u8) -> bool {
        match Zone::try_from(zone) {
            Ok(zone) => self.request(action, Target::Zone(zone)).await,
            Err(e) => {
                warn!("unable to {}: {}", action, e);
                self.dispatcher.settle(Err(e))
            }
        }
    }

    async fn request(&mut self, action: Action, target: Target) -> bool {
        let result = self.execute(action, target).await;
        if let Err(e) = &result {
            warn!("unable to {} on {}: {}", action, target, e);
        } else {
            debug!("{} on {}: acknowledged", action, target);
        }
        self.dispatcher.settle(result)
    }
}
