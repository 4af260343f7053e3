use thiserror::Error;

/// Errors related to serial communication with a display.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerialHudError {
    /// The serial port could not be configured.
    #[error("Couldn't configure serial port")]
    Configuration {
        /// The underlying serial error.
        source: serial_core::Error,
    },
}
