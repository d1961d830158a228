mod aggregate;
mod device;
mod filter;

pub use aggregate::{aggregate, StatusCounts};
pub use device::{DeviceStatus, LogLevel, StatusTheme, UnknownStatus};
pub use filter::{filter_devices, filter_logs, Named, StatusFilter};
