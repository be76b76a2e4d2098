//! Fixed-width telemetry line formatting.

use core::fmt::Write;

use heapless::String;

/// Capacity of a formatted line; the longest line is 26 bytes.
pub const LINE_CAPACITY: usize = 32;

/// One formatted telemetry line.
pub type TelemetryLine = String<LINE_CAPACITY>;

/// Formats `X:<x>, Y:<y>` with 9-wide right-justified fields, terminated by
/// `\n\r`.
pub fn format_line(x: u16, y: u16) -> Result<TelemetryLine, core::fmt::Error> {
    let mut line = TelemetryLine::new();
    write!(line, "X:{:9}, Y:{:9}\n\r", x, y)?;
    Ok(line)
}
