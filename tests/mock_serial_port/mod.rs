use serial_core;

use std::io::{self, Read, Write};
use std::time::Duration;

use serial_core::{PortSettings, SerialDevice};

#[allow(dead_code)] // Tests use different subsets of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialFailure {
    None,
    WriteSettings,
    Write,
}

/// Mock serial port implementation that captures written data
/// and rejects reads. Used to verify `SerialHud`.
#[derive(Debug, Clone)]
pub struct MockSerialPort {
    failure: SerialFailure,
    written: Vec<u8>,
    settings: PortSettings,
}

impl MockSerialPort {
    pub fn new(failure: SerialFailure) -> Self {
        MockSerialPort {
            failure,
            written: Vec::new(),
            // Initialize settings to some weird defaults to verify we set them correctly later.
            settings: PortSettings {
                baud_rate: serial_core::BaudRate::Baud110,
                char_size: serial_core::CharSize::Bits7,
                parity: serial_core::Parity::ParityEven,
                stop_bits: serial_core::StopBits::Stop2,
                flow_control: serial_core::FlowControl::FlowSoftware,
            },
        }
    }

    #[allow(dead_code)] // Not used by all tests.
    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl Read for MockSerialPort {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        // The display never talks back; nothing should be reading.
        Err(io::Error::new(io::ErrorKind::Other, "Dummy read error"))
    }
}

impl Write for MockSerialPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.failure {
            SerialFailure::Write => Err(io::Error::new(io::ErrorKind::Other, "Dummy I/O error")),
            _ => {
                self.written.extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SerialDevice for MockSerialPort {
    type Settings = PortSettings;

    fn read_settings(&self) -> serial_core::Result<Self::Settings> {
        Ok(self.settings)
    }

    fn write_settings(&mut self, settings: &Self::Settings) -> serial_core::Result<()> {
        match self.failure {
            SerialFailure::WriteSettings => Err(serial_core::Error::new(
                serial_core::ErrorKind::NoDevice,
                "Dummy serial error",
            )),
            _ => {
                self.settings = *settings;
                Ok(())
            }
        }
    }

    fn timeout(&self) -> Duration {
        unimplemented!();
    }

    fn set_timeout(&mut self, _: Duration) -> serial_core::Result<()> {
        Ok(())
    }

    fn set_rts(&mut self, _: bool) -> serial_core::Result<()> {
        unimplemented!();
    }

    fn set_dtr(&mut self, _: bool) -> serial_core::Result<()> {
        unimplemented!();
    }

    fn read_cts(&mut self) -> serial_core::Result<bool> {
        unimplemented!();
    }

    fn read_dsr(&mut self) -> serial_core::Result<bool> {
        unimplemented!();
    }

    fn read_ri(&mut self) -> serial_core::Result<bool> {
        unimplemented!();
    }

    fn read_cd(&mut self) -> serial_core::Result<bool> {
        unimplemented!();
    }
}
