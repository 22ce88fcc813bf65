//! CLI application for controlling Milight lights through a wifi bridge.
//!
//! Run with: cargo run --example milight_cli -- --help
//!
//! Set `RUST_LOG=milight_rs=debug` to see every frame exchanged.

use std::str::FromStr;

use clap::{Parser, Subcommand};
use milight_rs::{BridgeConfig, ColorPreset, MilightBridge, TemperaturePreset};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "milight-cli")]
#[command(about = "Control Milight 3.0 lights from the command line", long_about = None)]
struct Cli {
    /// IP address or host name of the wifi bridge
    #[arg(short, long, global = true, default_value = "10.10.100.254")]
    ip: String,

    /// UDP port of the wifi bridge
    #[arg(short, long, global = true, default_value_t = BridgeConfig::DEFAULT_PORT)]
    port: u16,

    /// Seconds to wait for the bridge to answer
    #[arg(short, long, global = true, default_value_t = 5.0)]
    timeout: f64,

    /// Zone to address (0 = all zones, 1-4)
    #[arg(short, long, global = true, default_value_t = 0)]
    zone: u8,

    /// Address the lamp built into the bridge instead of a zone
    #[arg(short = 'b', long, global = true)]
    bridge_lamp: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the MAC address of the bridge
    Mac,

    /// Turn the lights on
    On,

    /// Turn the lights off
    Off,

    /// Switch to white mode
    White,

    /// Switch to night mode
    Night,

    /// Set the colour (0-255 or a preset name such as red, blue, lime)
    Color { color: String },

    /// Set brightness (0-100)
    Brightness { level: i32 },

    /// Set saturation (0-100)
    Saturation { level: i32 },

    /// Set white temperature (0-100, or warm, warmwhite, coolwhite, daylight, cooldaylight)
    Temperature { level: String },

    /// Start a disco mode (1-9)
    Disco { mode: i32 },

    /// Speed up the current disco mode
    SpeedUp,

    /// Slow down the current disco mode
    SlowDown,

    /// Link lights to the zone (power them on right before)
    Link,

    /// Unlink lights from the zone (power them on right before)
    Unlink,
}

fn parse_color(value: &str) -> Result<i64, String> {
    if let Ok(preset) = ColorPreset::from_str(value) {
        return Ok(preset.value().into());
    }
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    };
    parsed.ok_or_else(|| format!("invalid colour: {}", value))
}

fn parse_temperature(value: &str) -> Result<i32, String> {
    let preset = match value.to_lowercase().as_str() {
        "warm" => Some(TemperaturePreset::Warm),
        "warmwhite" => Some(TemperaturePreset::WarmWhite),
        "coolwhite" => Some(TemperaturePreset::CoolWhite),
        "daylight" => Some(TemperaturePreset::Daylight),
        "cooldaylight" => Some(TemperaturePreset::CoolDaylight),
        _ => None,
    };
    match preset {
        Some(preset) => Ok(preset.percentage().value().into()),
        None => value
            .parse()
            .map_err(|_| format!("invalid temperature: {}", value)),
    }
}

/// Reject subcommands the bridge lamp has no opcode for, before any I/O.
fn check_bridge_lamp(cli: &Cli) -> Result<(), String> {
    if !cli.bridge_lamp {
        return Ok(());
    }
    let name = match cli.command {
        Commands::Night => "night",
        Commands::Saturation { .. } => "saturation",
        Commands::Temperature { .. } => "temperature",
        Commands::Link => "link",
        Commands::Unlink => "unlink",
        _ => return Ok(()),
    };
    Err(format!("{} is not supported by the bridge lamp", name))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    check_bridge_lamp(&cli)?;

    let config = BridgeConfig::new(&cli.ip)
        .with_port(cli.port)
        .with_timeout_secs(cli.timeout)?;

    let mut bridge = MilightBridge::new();
    if !bridge.setup_with(&config).await {
        return Err(format!("unable to reach bridge at {}", config.peer()).into());
    }

    let zone = cli.zone;
    let lamp = cli.bridge_lamp;

    let ok = match cli.command {
        Commands::Mac => {
            let mac = bridge.get_mac_address().await;
            if !mac.is_empty() {
                println!("{}", mac);
            }
            !mac.is_empty()
        }
        Commands::On if lamp => bridge.turn_on_bridge_lamp().await,
        Commands::On => bridge.turn_on(zone).await,
        Commands::Off if lamp => bridge.turn_off_bridge_lamp().await,
        Commands::Off => bridge.turn_off(zone).await,
        Commands::White if lamp => bridge.set_white_mode_bridge_lamp().await,
        Commands::White => bridge.set_white_mode(zone).await,
        Commands::Night => bridge.set_night_mode(zone).await,
        Commands::Color { color } => {
            let color = parse_color(&color)?;
            if lamp {
                bridge.set_color_bridge_lamp(color).await
            } else {
                bridge.set_color(color, zone).await
            }
        }
        Commands::Brightness { level } if lamp => bridge.set_brightness_bridge_lamp(level).await,
        Commands::Brightness { level } => bridge.set_brightness(level, zone).await,
        Commands::Saturation { level } => bridge.set_saturation(level, zone).await,
        Commands::Temperature { level } => {
            bridge
                .set_temperature(parse_temperature(&level)?, zone)
                .await
        }
        Commands::Disco { mode } if lamp => bridge.set_disco_mode_bridge_lamp(mode).await,
        Commands::Disco { mode } => bridge.set_disco_mode(mode, zone).await,
        Commands::SpeedUp if lamp => bridge.speed_up_disco_mode_bridge_lamp().await,
        Commands::SpeedUp => bridge.speed_up_disco_mode(zone).await,
        Commands::SlowDown if lamp => bridge.slow_down_disco_mode_bridge_lamp().await,
        Commands::SlowDown => bridge.slow_down_disco_mode(zone).await,
        Commands::Link => bridge.link(zone).await,
        Commands::Unlink => bridge.unlink(zone).await,
    };

    bridge.close();

    if ok {
        println!("OK");
        Ok(())
    } else {
        let reason = bridge
            .history()
            .last_error()
            .unwrap_or("no acknowledgment")
            .to_string();
        Err(format!("bridge did not confirm the command: {}", reason).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("milight-cli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_bridge_lamp_rejects_zone_only_commands() {
        for args in [
            &["-b", "night"][..],
            &["-b", "saturation", "40"],
            &["-b", "temperature", "warm"],
            &["link", "-b"],
            &["--bridge-lamp", "unlink"],
        ] {
            let err = check_bridge_lamp(&parse(args)).unwrap_err();
            assert!(err.ends_with("is not supported by the bridge lamp"), "{}", err);
        }
    }

    #[test]
    fn test_bridge_lamp_allows_lamp_commands() {
        for args in [
            &["-b", "on"][..],
            &["-b", "off"],
            &["-b", "white"],
            &["-b", "color", "blue"],
            &["-b", "brightness", "50"],
            &["-b", "disco", "3"],
            &["-b", "speed-up"],
            &["-b", "slow-down"],
            &["-b", "mac"],
        ] {
            assert!(check_bridge_lamp(&parse(args)).is_ok());
        }
    }

    #[test]
    fn test_zone_commands_pass_without_lamp_flag() {
        assert!(check_bridge_lamp(&parse(&["--zone", "2", "night"])).is_ok());
        assert!(check_bridge_lamp(&parse(&["link"])).is_ok());
    }
}
