//! Value types for light control parameters.

mod color;
mod disco;
mod percentage;
mod temperature;
mod zone;

pub use color::{ColorPreset, color_value};
pub use disco::DiscoMode;
pub use percentage::Percentage;
pub use temperature::TemperaturePreset;
pub use zone::Zone;
