//! Card identifier (UID / FeliCa IDm).

use std::fmt;

/// A card identifier rendered as uppercase, two-characters-per-byte hex.
///
/// Two reads are the same card iff their renderings are equal, so the
/// rendering is the only thing stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uid(String);

impl Uid {
    /// Renders the raw bytes returned by the reader.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode_upper(bytes))
    }

    /// The uppercase hex rendering, e.g. `"04A1B2C3"`.
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&[u8]> for Uid {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_renders_uppercase_fixed_width_hex() {
        let uid = Uid::from_bytes(&[0x04, 0xA1, 0xB2, 0xC3]);
        assert_eq!(uid.as_hex(), "04A1B2C3");
    }

    #[test]
    fn test_leading_zero_nibbles_are_kept() {
        let uid = Uid::from_bytes(&[0x00, 0x0F, 0x01]);
        assert_eq!(uid.to_string(), "000F01");
    }

    #[test]
    fn test_felica_idm_renders_all_eight_bytes() {
        let idm = [0x01, 0x2E, 0x4C, 0xD3, 0x8F, 0x1A, 0x00, 0x7B];
        assert_eq!(Uid::from_bytes(&idm).as_hex(), "012E4CD38F1A007B");
    }

    #[test]
    fn test_equal_bytes_make_equal_uids() {
        assert_eq!(Uid::from_bytes(&[0xDE, 0xAD]), Uid::from(&[0xDE, 0xAD][..]));
        assert_ne!(Uid::from_bytes(&[0xDE, 0xAD]), Uid::from_bytes(&[0xDE, 0xAE]));
    }

    #[test]
    fn test_empty_reply_renders_empty_uid() {
        let uid = Uid::from_bytes(&[]);
        assert_eq!(uid.as_hex(), "");
        assert_eq!(uid.to_string(), "");
    }
}
