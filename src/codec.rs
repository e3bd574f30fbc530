//! Bech32 text codec (BIP-173).
//!
//! Thin layer over the `bech32` crate that fixes the checksum to classic
//! Bech32 and adds the stricter rules addresses need: a single separator,
//! and zero padding bits in the last data symbol.

use bech32::primitives::decode::{CheckedHrpstring, CheckedHrpstringError, ChecksumError};
use bech32::{Bech32, Fe32, Hrp};
use thiserror::Error;

/// Separates the HRP from the data part.
pub const SEPARATOR: char = '1';

/// Errors produced by [`encode`] and [`decode`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The trailing six symbols do not match the recomputed checksum.
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// The string is not structurally valid Bech32.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),
}

impl CodecError {
    fn malformed(reason: impl ToString) -> Self {
        CodecError::MalformedEncoding(reason.to_string())
    }
}

/// Encodes `payload` under `hrp`.
///
/// The output is always lowercase.
///
/// # Errors
/// Returns [`CodecError::MalformedEncoding`] if the HRP is empty, contains
/// the separator, or has characters outside printable ASCII.
pub fn encode(hrp: &str, payload: &[u8]) -> Result<String, CodecError> {
    if hrp.contains(SEPARATOR) {
        return Err(CodecError::malformed("separator inside human-readable part"));
    }
    let hrp = Hrp::parse(hrp).map_err(CodecError::malformed)?;

    bech32::encode::<Bech32>(hrp, payload).map_err(CodecError::malformed)
}

/// Decodes a Bech32 string into its lowercase HRP and byte payload.
///
/// All-uppercase input is accepted; mixed case is not.
///
/// # Errors
/// - [`CodecError::ChecksumMismatch`] if the checksum does not verify.
/// - [`CodecError::MalformedEncoding`] for anything structurally wrong: mixed
///   case, a missing or repeated separator, an invalid HRP, characters outside
///   the alphabet, a data part shorter than the checksum, or bad padding.
pub fn decode(s: &str) -> Result<(String, Vec<u8>), CodecError> {
    if s.find(SEPARATOR) != s.rfind(SEPARATOR) {
        return Err(CodecError::malformed("more than one separator"));
    }

    let checked = match CheckedHrpstring::new::<Bech32>(s) {
        Ok(checked) => checked,
        Err(CheckedHrpstringError::Checksum(ChecksumError::InvalidResidue)) => {
            return Err(CodecError::ChecksumMismatch);
        }
        Err(e) => return Err(CodecError::malformed(e)),
    };
    check_padding(checked.data_part_ascii_no_checksum())?;

    let hrp = checked.hrp().as_str().to_ascii_lowercase();
    Ok((hrp, checked.byte_iter().collect()))
}

/// The bits left over after regrouping symbols into bytes must number
/// fewer than five and all be zero.
fn check_padding(symbols: &[u8]) -> Result<(), CodecError> {
    let pad_bits = symbols.len() * 5 % 8;
    if pad_bits >= 5 {
        return Err(CodecError::malformed("excess padding"));
    }
    if let Some(&last) = symbols.last() {
        let value = Fe32::from_char(char::from(last))
            .map_err(CodecError::malformed)?
            .to_u8();
        if value & ((1 << pad_bits) - 1) != 0 {
            return Err(CodecError::malformed("non-zero padding"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bech32::Fe32IterExt;

    /// Builds a checksum-valid string from raw 5-bit symbols.
    fn from_symbols(hrp: &str, symbols: &[Fe32]) -> String {
        let hrp = Hrp::parse(hrp).unwrap();
        symbols
            .iter()
            .copied()
            .with_checksum::<Bech32>(&hrp)
            .chars()
            .collect()
    }

    #[test]
    fn bip173_valid_strings() {
        assert_eq!(decode("A12UEL5L").unwrap(), ("a".to_string(), vec![]));
        assert_eq!(decode("a12uel5l").unwrap(), ("a".to_string(), vec![]));
        assert_eq!(decode("?1ezyfcl").unwrap(), ("?".to_string(), vec![]));

        let (hrp, payload) = decode("abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw").unwrap();
        assert_eq!(hrp, "abcdef");
        assert_eq!(
            hex::encode(payload),
            "00443214c74254b635cf84653a56d7c675be77df"
        );
    }

    #[test]
    fn encode_empty_payload() {
        assert_eq!(encode("a", &[]).unwrap(), "a12uel5l");
        assert_eq!(encode("A", &[]).unwrap(), "a12uel5l");
    }

    #[test]
    fn bip173_invalid_strings() {
        let malformed = [
            "\u{7f}1axkwrx",
            " 1nwldj5",
            "\u{80}1eym55h",
            "pzry9x0s0muk",
            "1pzry9x0s0muk",
            "x1b4n0q5v",
            "li1dgmt3",
            "10a06t8",
            "1qzzfhee",
            "a12UEL5L",
            "a1\u{7f}2uel5l",
        ];
        for s in malformed {
            assert!(
                matches!(decode(s), Err(CodecError::MalformedEncoding(_))),
                "{s:?} should be malformed"
            );
        }
        assert_eq!(decode("A1G7SGD8"), Err(CodecError::ChecksumMismatch));
    }

    #[test]
    fn repeated_separator_is_malformed() {
        let s = from_symbols("a1b", &[]);
        assert!(matches!(decode(&s), Err(CodecError::MalformedEncoding(_))));
        assert!(matches!(
            encode("a1b", &[1, 2, 3]),
            Err(CodecError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn invalid_hrp_is_rejected_on_encode() {
        assert!(matches!(encode("", &[0]), Err(CodecError::MalformedEncoding(_))));
        assert!(matches!(
            encode("ad dr", &[0]),
            Err(CodecError::MalformedEncoding(_))
        ));
        assert!(matches!(
            encode("adrés", &[0]),
            Err(CodecError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn excess_padding_is_malformed() {
        // One symbol carries 5 bits: no full byte, too much padding.
        let s = from_symbols("a", &[Fe32::Q]);
        assert!(matches!(decode(&s), Err(CodecError::MalformedEncoding(_))));
    }

    #[test]
    fn non_zero_padding_is_malformed() {
        // 10 bits: one byte plus two padding bits, the last of which is set.
        let s = from_symbols("a", &[Fe32::Q, Fe32::P]);
        assert!(matches!(decode(&s), Err(CodecError::MalformedEncoding(_))));

        let s = from_symbols("a", &[Fe32::Q, Fe32::Q]);
        assert_eq!(decode(&s).unwrap(), ("a".to_string(), vec![0]));
    }

    #[test]
    fn partial_final_symbol_roundtrips() {
        let payloads: [&[u8]; 3] = [&[0xff], &[0x00, 0x01], &[0xde, 0xad, 0xbe]];
        for payload in payloads {
            let encoded = encode("a", payload).unwrap();
            assert_eq!(decode(&encoded).unwrap(), ("a".to_string(), payload.to_vec()));
        }
    }

    #[test]
    fn hrp_is_bound_into_checksum() {
        let s = encode("addr_test", &[0x60; 29]).unwrap();
        let swapped = s.replacen("addr_test", "addr", 1);
        assert_eq!(decode(&swapped), Err(CodecError::ChecksumMismatch));
    }

    #[test]
    fn encode_is_deterministic() {
        let payload = [0x11u8; 29];
        assert_eq!(
            encode("addr", &payload).unwrap(),
            encode("addr", &payload).unwrap()
        );
    }
}
