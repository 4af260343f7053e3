use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::io::Write;

use thiserror::Error;

/// Errors related to encoding/decoding [`Frame`]s of data.
///
/// [`Frame`]: struct.Frame.html
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FrameError {
    /// [`Payload`] length exceeded the maximum of 249 bytes.
    ///
    /// [`Payload`]: struct.Payload.html
    #[error("Maximum payload length is {} bytes, got {}", max, actual)]
    PayloadTooLong {
        /// The maximum payload length.
        max: usize,

        /// The actual length of the payload that was provided.
        actual: usize,
    },

    /// Failed writing a [`Frame`] of data.
    ///
    /// [`Frame`]: struct.Frame.html
    #[error("Failed writing a frame of data")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse data into a [`Frame`].
    ///
    /// [`Frame`]: struct.Frame.html
    #[error("Failed to parse invalid frame data [{}]", bytes_for_error(data))]
    InvalidFrame {
        /// The invalid frame data.
        data: Vec<u8>,
    },

    /// [`Frame`] data didn't match its declared length.
    ///
    /// [`Frame`]: struct.Frame.html
    #[error(
        "Frame data [{}] didn't match declared length: Expected {}, got {}",
        bytes_for_error(data),
        expected,
        actual
    )]
    FrameDataMismatch {
        /// The invalid frame data.
        data: Vec<u8>,

        /// The expected length byte value.
        expected: usize,

        /// The actual length byte value that was provided.
        actual: usize,
    },

    /// [`Frame`] checksum didn't match declared checksum.
    ///
    /// [`Frame`]: struct.Frame.html
    #[error(
        "Frame checksum for [{}] didn't match declared checksum: Expected 0x{:X}, got 0x{:X}",
        bytes_for_error(data),
        expected,
        actual
    )]
    BadChecksum {
        /// The declared checksum.
        expected: u8,

        /// The checksum computed from the data.
        actual: u8,

        /// The invalid frame data.
        data: Vec<u8>,
    },
}

/// The delimiter byte; marks frame boundaries and is escaped when it occurs inside the body.
const DELIMITER: u8 = 0x10;

/// Second header byte, identifying a display update frame.
const START_OF_FRAME: u8 = 0x7B;

/// Second trailer byte, closing the frame.
const END_OF_FRAME: u8 = 0x03;

/// Fixed bytes between the payload-length field and the payload itself.
const PREAMBLE: [u8; 5] = [0x00, 0x00, 0x00, 0x55, 0x15];

/// Maximum payload length such that the length byte (payload + 6) still fits in a `u8`.
pub const MAX_PAYLOAD_LEN: usize = 0xFF - 6;

/// A low-level representation of one framed message on the serial link.
///
/// The display protocol wraps every command payload in a delimited, checksummed
/// envelope. This struct handles producing those raw bytes (and parsing them back),
/// dealing with byte stuffing and the checksum. It makes no attempt to ascribe
/// meaning to the payload (that's [`Command`]'s job).
///
/// Both owned and borrowed payloads are supported.
///
/// # Examples
///
/// ```
/// use navhud_core::{Frame, Payload};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// #
/// let frame = Frame::new(Payload::try_new(vec![0x04, 0x00, 0x00, 0x05])?);
///
/// let bytes = frame.to_bytes();
/// assert_eq!(
///     &[0x10, 0x7B, 0x0A, 0x04, 0x00, 0x00, 0x00, 0x55, 0x15, 0x04, 0x00, 0x00, 0x05, 0x04, 0x10, 0x03],
///     bytes.as_slice()
/// );
///
/// let parsed = Frame::from_bytes(&bytes)?;
/// assert_eq!(parsed, frame);
/// #
/// # Ok(()) }
/// ```
///
/// # Format Details
///
/// ```text
/// ┌────┬────┬────┬ ┄ ┬────┬────┬────┬────┬────┬────┬────┬ ┄ ┬────┬────┬────┬────┐
/// │ 10 │ 7B │Len │(10)│PLen│ 00 │ 00 │ 00 │ 55 │ 15 │ P0 │...│ PN │Chk │ 10 │ 03 │
/// └────┴────┴────┴ ┄ ┴────┴────┴────┴────┴────┴────┴────┴ ┄ ┴────┴────┴────┴────┘
///   ┆ Header ┆              ┆     Fixed preamble     ┆ Stuffed payload ┆ Trailer ┆
/// ```
///
/// `Len` is the raw payload length plus 6. When the raw payload length is exactly
/// `0x0A`, `Len` is `0x10` (the delimiter value) and a duplicate `0x10` follows it,
/// the same escape that applies to payload bytes. `PLen` is the raw payload length.
/// Every `0x10` byte in the payload is followed by a duplicate `0x10` so the receiver
/// never sees an unescaped delimiter inside the frame body. `Chk` is the 8-bit
/// two's-complement negation of the sum of all bytes from `7B` through `PN`, minus
/// `0x10` for each stuffing byte inserted.
///
/// [`Command`]: enum.Command.html
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame<'a> {
    payload: Payload<'a>,
}

impl<'a> Frame<'a> {
    /// Constructs a new `Frame` with the specified payload.
    ///
    /// # Examples
    ///
    /// ```
    /// # use navhud_core::{Frame, Payload};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// #
    /// // some_payload is moved into owning_frame.
    /// let some_payload = vec![0x01, 0x80, 0x00, 0x40];
    /// let owning_frame = Frame::new(Payload::try_new(some_payload)?);
    ///
    /// // other_payload is borrowed.
    /// let other_payload = vec![0x01, 0x80, 0x00, 0x40];
    /// let borrowing_frame = Frame::new(Payload::try_new(other_payload.as_slice())?);
    /// #
    /// # Ok(()) }
    /// ```
    pub fn new(payload: Payload<'a>) -> Self {
        Frame { payload }
    }

    /// Returns a reference to the frame's raw (unstuffed) payload bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use navhud_core::{Frame, Payload};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// #
    /// let frame = Frame::new(Payload::try_new(vec![0x01, 0x80, 0x00, 0x40])?);
    /// assert_eq!(&[0x01, 0x80, 0x00, 0x40], frame.payload().as_ref());
    /// #
    /// # Ok(()) }
    /// ```
    pub fn payload(&self) -> &Cow<'a, [u8]> {
        &self.payload.0
    }

    /// Consumes the frame and returns ownership of its payload.
    pub fn into_payload(self) -> Payload<'a> {
        self.payload
    }

    /// Converts the frame to its wire format.
    ///
    /// Applies the length fields, byte stuffing, checksum, and delimiters.
    ///
    /// # Examples
    ///
    /// ```
    /// # use navhud_core::{Frame, Payload};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// #
    /// // A 0x10 payload byte is escaped by doubling it.
    /// let frame = Frame::new(Payload::try_new(vec![0x01, 0x80, 0x00, 0x10])?);
    /// let bytes = frame.to_bytes();
    /// assert_eq!(
    ///     &[0x10, 0x7B, 0x0A, 0x04, 0x00, 0x00, 0x00, 0x55, 0x15, 0x01, 0x80, 0x00, 0x10, 0x10, 0x7C, 0x10, 0x03],
    ///     bytes.as_slice()
    /// );
    /// #
    /// # Ok(()) }
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload = self.payload.get();

        // Header and length fields, worst-case stuffing, checksum, trailer.
        let mut output = Vec::<u8>::with_capacity(10 + payload.len() * 2 + 3);
        output.push(DELIMITER);
        output.push(START_OF_FRAME);
        output.push(payload.len() as u8 + 6);

        let mut stuffing_count: u32 = 0;

        // A raw payload length of 0x0A makes the length byte 0x10, which collides
        // with the delimiter and gets the same escape treatment as payload bytes.
        if payload.len() == 0x0A {
            output.push(DELIMITER);
            stuffing_count += 1;
        }

        output.push(payload.len() as u8);
        output.extend_from_slice(&PREAMBLE);

        for &byte in payload.iter() {
            output.push(byte);
            if byte == DELIMITER {
                output.push(DELIMITER);
                stuffing_count += 1;
            }
        }

        // Checksum covers everything after the leading delimiter, with the
        // stuffing bytes backed out so the receiver can verify after unstuffing.
        let sum = output[1..].iter().map(|&b| u32::from(b)).sum::<u32>() - stuffing_count * u32::from(DELIMITER);
        output.push((sum as u8).wrapping_neg());

        output.push(DELIMITER);
        output.push(END_OF_FRAME);
        output
    }

    /// Parses the wire format into a new `Frame`.
    ///
    /// # Errors
    ///
    /// Returns an error of kind:
    /// * [`FrameError::InvalidFrame`] if the data is not a well-formed frame.
    /// * [`FrameError::FrameDataMismatch`] if the two length fields disagree.
    /// * [`FrameError::BadChecksum`] if the computed checksum does not match the declared one.
    ///
    /// # Examples
    ///
    /// ```
    /// # use navhud_core::{Frame, Payload};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// #
    /// let bytes = [0x10, 0x7B, 0x0A, 0x04, 0x00, 0x00, 0x00, 0x55, 0x15, 0x04, 0x00, 0x00, 0x05, 0x04, 0x10, 0x03];
    /// let frame = Frame::from_bytes(&bytes)?;
    /// assert_eq!(Frame::new(Payload::try_new(vec![0x04, 0x00, 0x00, 0x05])?), frame);
    /// #
    /// # Ok(()) }
    /// ```
    ///
    /// [`FrameError::InvalidFrame`]: enum.FrameError.html#variant.InvalidFrame
    /// [`FrameError::FrameDataMismatch`]: enum.FrameError.html#variant.FrameDataMismatch
    /// [`FrameError::BadChecksum`]: enum.FrameError.html#variant.BadChecksum
    pub fn from_bytes(bytes: &[u8]) -> Result<Frame<'static>, FrameError> {
        let invalid = || FrameError::InvalidFrame { data: bytes.into() };

        if bytes.len() < 12 || bytes[0] != DELIMITER || bytes[1] != START_OF_FRAME {
            return Err(invalid());
        }
        if bytes[bytes.len() - 2..] != [DELIMITER, END_OF_FRAME] {
            return Err(invalid());
        }

        let declared_len = bytes[2];
        let mut pos = 3;
        let mut stuffing_count: u32 = 0;

        if declared_len == DELIMITER {
            if bytes.get(pos) != Some(&DELIMITER) {
                return Err(invalid());
            }
            pos += 1;
            stuffing_count += 1;
        }

        let payload_len = usize::from(*bytes.get(pos).ok_or_else(invalid)?);
        pos += 1;
        if usize::from(declared_len) != payload_len + 6 {
            return Err(FrameError::FrameDataMismatch {
                data: bytes.into(),
                expected: payload_len + 6,
                actual: usize::from(declared_len),
            });
        }

        if bytes.get(pos..pos + 5) != Some(&PREAMBLE[..]) {
            return Err(invalid());
        }
        pos += 5;

        let mut payload = Vec::<u8>::with_capacity(payload_len);
        while payload.len() < payload_len {
            let byte = *bytes.get(pos).ok_or_else(invalid)?;
            pos += 1;
            if byte == DELIMITER {
                if bytes.get(pos) != Some(&DELIMITER) {
                    return Err(invalid());
                }
                pos += 1;
                stuffing_count += 1;
            }
            payload.push(byte);
        }

        let declared_checksum = *bytes.get(pos).ok_or_else(invalid)?;
        if pos + 1 != bytes.len() - 2 {
            return Err(invalid());
        }

        let sum = bytes[1..pos].iter().map(|&b| u32::from(b)).sum::<u32>() - stuffing_count * u32::from(DELIMITER);
        let computed_checksum = (sum as u8).wrapping_neg();
        if computed_checksum != declared_checksum {
            return Err(FrameError::BadChecksum {
                expected: declared_checksum,
                actual: computed_checksum,
                data: bytes.into(),
            });
        }

        Ok(Frame::new(Payload(Cow::Owned(payload))))
    }

    /// Writes the wire format of the frame to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`FrameError::Io`] if the write fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use navhud_core::{Frame, Payload};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// #
    /// let mut port = serial::open("/dev/rfcomm0")?;
    /// let frame = Frame::new(Payload::try_new(vec![0x04, 0x00, 0x00, 0x05])?);
    /// frame.write(&mut port)?;
    /// #
    /// # Ok(()) }
    /// ```
    ///
    /// [`FrameError::Io`]: enum.FrameError.html#variant.Io
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), FrameError> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }
}

impl Display for Frame<'_> {
    /// Formats the frame in a human-readable way.
    ///
    /// Useful for viewing traffic on the link. All numbers are in hex.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Len {:02X}", self.payload.0.len())?;
        if !self.payload.0.is_empty() {
            write!(f, " | Data")?;
            for byte in self.payload.0.iter() {
                write!(f, " {:02X}", byte)?;
            }
        }
        Ok(())
    }
}

/// Formats supposed frame bytes for display as part of an error message.
fn bytes_for_error(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ")
}

/// Owned or borrowed payload bytes to be placed in a [`Frame`].
///
/// Since the frame's length byte is the payload length plus 6 and must fit in a
/// single byte, the payload length cannot exceed 249. `Payload` is responsible
/// for maintaining this invariant.
///
/// # Examples
///
/// ```
/// use navhud_core::{Frame, Payload};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// #
/// let payload = Payload::try_new(vec![0x01, 0x80, 0x00, 0x40])?; // Ok since length under 249
/// let frame = Frame::new(payload);
/// #
/// # Ok(()) }
/// ```
///
/// [`Frame`]: struct.Frame.html
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Payload<'a>(Cow<'a, [u8]>);

impl<'a> Payload<'a> {
    /// Creates a new `Payload` containing owned or borrowed bytes.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`FrameError::PayloadTooLong`] if the length is greater than 249.
    ///
    /// # Examples
    ///
    /// ```
    /// use navhud_core::Payload;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// #
    /// let payload = Payload::try_new(vec![1, 2, 3])?;
    /// assert_eq!(vec![1, 2, 3], payload.get().as_ref());
    /// #
    /// # Ok(()) }
    /// ```
    ///
    /// This will fail since the passed-in vector is too large:
    ///
    /// ```
    /// # use navhud_core::Payload;
    /// let result = Payload::try_new(vec![0; 1000]);
    /// assert!(result.is_err());
    /// ```
    ///
    /// [`FrameError::PayloadTooLong`]: enum.FrameError.html#variant.PayloadTooLong
    pub fn try_new<T: Into<Cow<'a, [u8]>>>(payload: T) -> Result<Self, FrameError> {
        let payload: Cow<'a, [u8]> = payload.into();
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(FrameError::PayloadTooLong {
                max: MAX_PAYLOAD_LEN,
                actual: payload.len(),
            });
        }
        Ok(Payload(payload))
    }

    /// Returns a reference to the inner [`Cow`]`<[u8]>`.
    ///
    /// [`Cow`]: https://doc.rust-lang.org/std/borrow/enum.Cow.html
    pub fn get(&self) -> &Cow<'a, [u8]> {
        &self.0
    }
}
