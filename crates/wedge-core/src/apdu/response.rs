//! Parsing of reader replies into data bytes plus a status word.

use std::fmt;

use thiserror::Error;

/// Error type for APDU response parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApduError {
    /// The reply was shorter than the mandatory two status bytes.
    #[error("response too short: {0} byte(s), expected at least 2")]
    TooShort(usize),
}

/// The two status bytes (`SW1 SW2`) terminating every APDU response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    pub sw1: u8,
    pub sw2: u8,
}

impl StatusWord {
    /// `90 00`: normal processing, the only status that carries a UID.
    pub const SUCCESS: Self = Self::new(0x90, 0x00);

    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Returns `true` for exactly `90 00`.
    pub const fn is_success(self) -> bool {
        self.sw1 == Self::SUCCESS.sw1 && self.sw2 == Self::SUCCESS.sw2
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {:02X}", self.sw1, self.sw2)
    }
}

/// A decoded APDU response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduResponse {
    /// Response body without the trailing status bytes.
    pub data: Vec<u8>,
    pub status: StatusWord,
}

impl ApduResponse {
    /// Builds a response from already separated parts.
    pub fn new(data: impl Into<Vec<u8>>, sw1: u8, sw2: u8) -> Self {
        Self {
            data: data.into(),
            status: StatusWord::new(sw1, sw2),
        }
    }

    /// Splits a raw reply (`data || SW1 || SW2`) as returned by `SCardTransmit`.
    ///
    /// # Errors
    ///
    /// Returns [`ApduError::TooShort`] if `raw` holds fewer than two bytes.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, ApduError> {
        match raw {
            [data @ .., sw1, sw2] => Ok(Self::new(data, *sw1, *sw2)),
            _ => Err(ApduError::TooShort(raw.len())),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_splits_data_and_status() {
        // Arrange
        let raw = [0x04, 0xA1, 0xB2, 0xC3, 0x90, 0x00];

        // Act
        let resp = ApduResponse::from_bytes(&raw).unwrap();

        // Assert
        assert_eq!(resp.data, vec![0x04, 0xA1, 0xB2, 0xC3]);
        assert_eq!(resp.status, StatusWord::SUCCESS);
        assert!(resp.is_success());
    }

    #[test]
    fn test_from_bytes_accepts_status_only_reply() {
        let resp = ApduResponse::from_bytes(&[0x6A, 0x82]).unwrap();
        assert!(resp.data.is_empty());
        assert_eq!(resp.status, StatusWord::new(0x6A, 0x82));
        assert!(!resp.is_success());
    }

    #[test]
    fn test_from_bytes_rejects_short_reply() {
        assert_eq!(ApduResponse::from_bytes(&[]), Err(ApduError::TooShort(0)));
        assert_eq!(ApduResponse::from_bytes(&[0x90]), Err(ApduError::TooShort(1)));
    }

    #[test]
    fn test_only_9000_is_success() {
        assert!(StatusWord::new(0x90, 0x00).is_success());
        assert!(!StatusWord::new(0x90, 0x01).is_success());
        assert!(!StatusWord::new(0x63, 0x00).is_success());
        assert!(!StatusWord::new(0x6A, 0x81).is_success());
        assert!(!StatusWord::new(0x00, 0x90).is_success());
    }

    #[test]
    fn test_status_word_display_is_spaced_hex() {
        assert_eq!(StatusWord::new(0x6A, 0x82).to_string(), "6A 82");
    }
}
