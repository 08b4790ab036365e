//! # ESC/POS Barcode Commands
//!
//! This module implements the 1D barcode command (`GS k`) and the five-step
//! QR code command sequence (`GS ( k`).
//!
//! ## Supported Symbologies
//!
//! | Symbology | Code | Framing |
//! |-----------|------|---------|
//! | UPC-A | 0x00 | NUL-terminated |
//! | UPC-E | 0x01 | NUL-terminated |
//! | EAN-13 | 0x02 | NUL-terminated |
//! | EAN-8 | 0x03 | NUL-terminated |
//! | Code39 | 0x04 | NUL-terminated |
//! | Code128 | 0x49 | Length byte |
//!
//! `GS k` has two forms. Codes 0–6 (function A) end the data with a NUL byte;
//! codes 65 and above (function B) carry an explicit length byte instead. The
//! framing is picked from the code value alone: below 69 is NUL-terminated,
//! 69 and above is length-prefixed.
//!
//! ## 1D Barcode Usage
//!
//! ```
//! use cinta::protocol::barcode::{barcode, Symbology};
//!
//! let cmd = barcode(Symbology::Code128, b"1234A");
//! assert_eq!(cmd, vec![0x1D, b'k', 0x49, 5, b'1', b'2', b'3', b'4', b'A']);
//! ```
//!
//! ## QR Code Usage
//!
//! ```
//! use cinta::protocol::barcode::qr::{self, QrErrorLevel, QrModel};
//!
//! let cmd = qr::generate(b"https://example.com", QrModel::Model2, 6, QrErrorLevel::M)?;
//! assert!(cmd.ends_with(&[0x1D, b'(', b'k', 3, 0, 49, 81, 48]));
//! # Ok::<(), cinta::CintaError>(())
//! ```
//!
//! Payload content is never checked against the symbology's character set or
//! check digit rules. The printer rejects what it cannot encode.

use std::fmt;
use std::str::FromStr;

use super::commands::GS;
use crate::error::CintaError;

// ============================================================================
// 1D BARCODES (GS k)
// ============================================================================

/// Codes at or above this value use the length-prefixed `GS k` form.
pub const LENGTH_PREFIX_THRESHOLD: u8 = 69;

/// How the barcode payload is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// `GS k m d1...dk NUL`
    NulTerminated,
    /// `GS k m n d1...dn`
    LengthPrefixed,
}

impl Framing {
    /// Framing the printer expects for a raw symbology code.
    #[inline]
    pub const fn for_code(code: u8) -> Self {
        if code < LENGTH_PREFIX_THRESHOLD {
            Framing::NulTerminated
        } else {
            Framing::LengthPrefixed
        }
    }
}

/// Barcode symbologies with a known `GS k` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    /// UPC-A (11 or 12 digits)
    UpcA,
    /// UPC-E (6 to 8 or 11 to 12 digits)
    UpcE,
    /// EAN-13 / JAN-13 (12 or 13 digits)
    Ean13,
    /// EAN-8 / JAN-8 (7 or 8 digits)
    Ean8,
    /// Code39 (A-Z, 0-9, space, -.$/%+)
    Code39,
    /// Code128 (full ASCII, code set chosen by the data's `{A`/`{B`/`{C` prefix)
    Code128,
}

/// One row of the symbology table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbologySpec {
    pub name: &'static str,
    pub code: u8,
    pub framing: Framing,
}

impl Symbology {
    pub const ALL: [Symbology; 6] = [
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::Ean13,
        Symbology::Ean8,
        Symbology::Code39,
        Symbology::Code128,
    ];

    /// The single source of truth for names, codes and framing.
    pub const fn spec(self) -> SymbologySpec {
        let (name, code) = match self {
            Symbology::UpcA => ("upc-a", 0x00),
            Symbology::UpcE => ("upc-e", 0x01),
            Symbology::Ean13 => ("ean13", 0x02),
            Symbology::Ean8 => ("ean8", 0x03),
            Symbology::Code39 => ("code39", 0x04),
            Symbology::Code128 => ("code128", 0x49),
        };
        SymbologySpec {
            name,
            code,
            framing: Framing::for_code(code),
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self.spec().code
    }

    #[inline]
    pub const fn framing(self) -> Framing {
        self.spec().framing
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

impl FromStr for Symbology {
    type Err = CintaError;

    /// Accepts table names case-insensitively, with or without the dash
    /// (`"UPC-A"`, `"upca"`, `"Code128"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        Symbology::ALL
            .into_iter()
            .find(|sym| sym.spec().name.replace('-', "") == wanted)
            .ok_or_else(|| CintaError::InvalidOption(format!("unknown symbology '{}'", s)))
    }
}

/// # Print Barcode (GS k)
///
/// ## Protocol Details
///
/// | Framing | Bytes |
/// |---------|-------|
/// | NUL-terminated | GS k m d1...dk NUL |
/// | Length-prefixed | GS k m n d1...dn |
///
/// ## Example
///
/// ```
/// use cinta::protocol::barcode::{barcode, Symbology};
///
/// let cmd = barcode(Symbology::UpcA, b"123456789012");
/// assert_eq!(cmd[..3], [0x1D, b'k', 0x00]);
/// assert_eq!(*cmd.last().unwrap(), 0x00);
/// ```
pub fn barcode(symbology: Symbology, data: &[u8]) -> Vec<u8> {
    barcode_raw(symbology.code(), data)
}

/// Frame a barcode for an arbitrary `GS k` code.
///
/// Codes outside the table are passed through untouched and framed by the
/// same threshold rule, so printer-specific symbologies (ITF, Codabar,
/// Code93) work without a table entry.
///
/// The length byte of the prefixed form is the payload length truncated to
/// 8 bits.
pub fn barcode_raw(code: u8, data: &[u8]) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(4 + data.len());
    cmd.extend([GS, b'k', code]);
    match Framing::for_code(code) {
        Framing::NulTerminated => {
            cmd.extend_from_slice(data);
            cmd.push(0x00);
        }
        Framing::LengthPrefixed => {
            cmd.push(data.len() as u8);
            cmd.extend_from_slice(data);
        }
    }
    cmd
}

// ============================================================================
// QR CODE COMMANDS (GS ( k)
// ============================================================================

/// QR Code command builders
///
/// Every step is a `GS ( k pL pH cn fn [params]` frame with `cn = 49` (QR
/// code) and `pL + pH * 256` equal to the number of bytes from `cn` onward.
///
/// | Step | fn | Params |
/// |------|----|--------|
/// | Select model | 65 | model, 0 |
/// | Module size | 67 | size (1–16) |
/// | Error correction | 69 | level (48–51) |
/// | Store data | 80 | 48, data... |
/// | Print | 81 | 48 |
pub mod qr {
    use super::GS;
    use crate::error::{CintaError, CintaResult};
    use crate::protocol::commands::split_lh;

    /// Largest payload the store step accepts.
    pub const MAX_PAYLOAD: usize = 7089;

    /// `cn` byte selecting the QR code function group.
    const CN_QR: u8 = 49;

    /// QR Code model selection
    ///
    /// | Model | Max Version | Notes |
    /// |-------|-------------|-------|
    /// | Model 1 | 14 | First QR revision |
    /// | Model 2 | 40 | Alignment patterns, better reading |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[repr(u8)]
    pub enum QrModel {
        Model1 = 49,
        #[default]
        Model2 = 50,
    }

    /// QR error correction level
    ///
    /// | Level | Byte | Recovery |
    /// |-------|------|----------|
    /// | L | 48 | ~7% |
    /// | M | 49 | ~15% |
    /// | Q | 50 | ~25% |
    /// | H | 51 | ~30% |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[repr(u8)]
    pub enum QrErrorLevel {
        L = 48,
        #[default]
        M = 49,
        Q = 50,
        H = 51,
    }

    impl QrErrorLevel {
        /// Map a raw level byte, clamping into 48..=51.
        pub fn from_raw(n: u8) -> Self {
            match n.clamp(48, 51) {
                48 => QrErrorLevel::L,
                49 => QrErrorLevel::M,
                50 => QrErrorLevel::Q,
                _ => QrErrorLevel::H,
            }
        }
    }

    /// Module size bounds, in dots.
    pub const MIN_MODULE_SIZE: u8 = 1;
    pub const MAX_MODULE_SIZE: u8 = 16;

    /// Build a `GS ( k` frame for the QR function group.
    fn frame(function: u8, params: &[u8]) -> Vec<u8> {
        let [pl, ph] = split_lh(2 + params.len());
        let mut cmd = Vec::with_capacity(7 + params.len());
        cmd.extend([GS, b'(', b'k', pl, ph, CN_QR, function]);
        cmd.extend_from_slice(params);
        cmd
    }

    /// # Select Model (fn 65)
    ///
    /// `GS ( k 04 00 31 41 n1 00`
    ///
    /// ```
    /// use cinta::protocol::barcode::qr::{select_model, QrModel};
    ///
    /// assert_eq!(
    ///     select_model(QrModel::Model2),
    ///     vec![0x1D, 0x28, 0x6B, 4, 0, 49, 65, 50, 0]
    /// );
    /// ```
    pub fn select_model(model: QrModel) -> Vec<u8> {
        frame(65, &[model as u8, 0])
    }

    /// # Set Module Size (fn 67)
    ///
    /// `GS ( k 03 00 31 43 n`, with `n` clamped into 1..=16.
    pub fn set_module_size(size: u8) -> Vec<u8> {
        frame(67, &[size.clamp(MIN_MODULE_SIZE, MAX_MODULE_SIZE)])
    }

    /// # Set Error Correction Level (fn 69)
    ///
    /// `GS ( k 03 00 31 45 n`
    pub fn set_error_correction(level: QrErrorLevel) -> Vec<u8> {
        frame(69, &[level as u8])
    }

    /// # Store Data in the Symbol Area (fn 80)
    ///
    /// `GS ( k pL pH 31 50 30 d1...dk`
    ///
    /// `pL + pH * 256 = k + 3`, so the total stays within 4..=7092.
    ///
    /// ```
    /// use cinta::protocol::barcode::qr::store_data;
    ///
    /// let cmd = store_data(&[b'x'; 253])?;
    /// assert_eq!(cmd[3..5], [0, 1]); // 256 = pL 0, pH 1
    /// # Ok::<(), cinta::CintaError>(())
    /// ```
    pub fn store_data(data: &[u8]) -> CintaResult<Vec<u8>> {
        check_payload(data)?;

        let total = data.len() + 3;
        let ph = total / 256;
        let pl = total - 256 * ph;

        let mut cmd = Vec::with_capacity(8 + data.len());
        cmd.extend([GS, b'(', b'k', pl as u8, ph as u8, CN_QR, 80, 48]);
        cmd.extend_from_slice(data);
        Ok(cmd)
    }

    /// # Print the Stored Symbol (fn 81)
    ///
    /// `GS ( k 03 00 31 51 30`
    pub fn print() -> Vec<u8> {
        frame(81, &[48])
    }

    fn check_payload(data: &[u8]) -> CintaResult<()> {
        if data.len() > MAX_PAYLOAD {
            return Err(CintaError::PayloadTooLong {
                len: data.len(),
                max: MAX_PAYLOAD,
            });
        }
        Ok(())
    }

    /// # Complete QR Sequence
    ///
    /// Model, module size, error correction, data, print. The payload length
    /// is checked first; on failure nothing is returned but the error.
    pub fn generate(
        data: &[u8],
        model: QrModel,
        module_size: u8,
        level: QrErrorLevel,
    ) -> CintaResult<Vec<u8>> {
        check_payload(data)?;

        let mut cmd = Vec::with_capacity(45 + data.len());
        cmd.extend(select_model(model));
        cmd.extend(set_module_size(module_size));
        cmd.extend(set_error_correction(level));
        cmd.extend(store_data(data)?);
        cmd.extend(print());
        Ok(cmd)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod barcode_tests {
        use super::*;

        #[test]
        fn test_code128_length_prefixed() {
            assert_eq!(
                barcode(Symbology::Code128, b"1234A"),
                vec![0x1D, b'k', 0x49, 0x05, b'1', b'2', b'3', b'4', b'A']
            );
        }

        #[test]
        fn test_upca_nul_terminated() {
            let mut expected = vec![0x1D, b'k', 0x00];
            expected.extend_from_slice(b"123456789012");
            expected.push(0x00);
            assert_eq!(barcode(Symbology::UpcA, b"123456789012"), expected);
        }

        #[test]
        fn test_table_codes() {
            let codes: Vec<u8> = Symbology::ALL.iter().map(|s| s.code()).collect();
            assert_eq!(codes, vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x49]);
        }

        #[test]
        fn test_table_framing() {
            for sym in Symbology::ALL {
                let expected = if sym == Symbology::Code128 {
                    Framing::LengthPrefixed
                } else {
                    Framing::NulTerminated
                };
                assert_eq!(sym.framing(), expected, "{}", sym);
            }
        }

        #[test]
        fn test_threshold_boundary() {
            assert_eq!(Framing::for_code(68), Framing::NulTerminated);
            assert_eq!(Framing::for_code(69), Framing::LengthPrefixed);
        }

        #[test]
        fn test_raw_code_passthrough() {
            // ITF in function B form (70) is not in the table
            assert_eq!(barcode_raw(70, b"12"), vec![0x1D, b'k', 70, 2, b'1', b'2']);
            // ITF in function A form (5)
            assert_eq!(barcode_raw(5, b"12"), vec![0x1D, b'k', 5, b'1', b'2', 0]);
        }

        #[test]
        fn test_length_byte_truncates() {
            let data = vec![b'7'; 300];
            let cmd = barcode(Symbology::Code128, &data);
            assert_eq!(cmd[3], (300 % 256) as u8);
            assert_eq!(cmd.len(), 4 + 300);
        }

        #[test]
        fn test_empty_payload() {
            assert_eq!(barcode(Symbology::Ean8, b""), vec![0x1D, b'k', 0x03, 0x00]);
            assert_eq!(barcode(Symbology::Code128, b""), vec![0x1D, b'k', 0x49, 0x00]);
        }

        #[test]
        fn test_symbology_from_str() {
            assert_eq!("UPC-A".parse::<Symbology>().unwrap(), Symbology::UpcA);
            assert_eq!("upce".parse::<Symbology>().unwrap(), Symbology::UpcE);
            assert_eq!("Code128".parse::<Symbology>().unwrap(), Symbology::Code128);
            assert_eq!("ean-13".parse::<Symbology>().unwrap(), Symbology::Ean13);
            assert!("pdf417".parse::<Symbology>().is_err());
        }
    }

    mod qr_tests {
        use super::super::qr::*;
        use crate::error::CintaError;

        #[test]
        fn test_select_model() {
            assert_eq!(
                select_model(QrModel::Model1),
                vec![0x1D, 0x28, 0x6B, 4, 0, 49, 65, 49, 0]
            );
            assert_eq!(
                select_model(QrModel::Model2),
                vec![0x1D, 0x28, 0x6B, 4, 0, 49, 65, 50, 0]
            );
        }

        #[test]
        fn test_module_size_clamps() {
            assert_eq!(set_module_size(6), vec![0x1D, 0x28, 0x6B, 3, 0, 49, 67, 6]);
            assert_eq!(set_module_size(0), vec![0x1D, 0x28, 0x6B, 3, 0, 49, 67, 1]);
            assert_eq!(set_module_size(16), vec![0x1D, 0x28, 0x6B, 3, 0, 49, 67, 16]);
            assert_eq!(set_module_size(200), vec![0x1D, 0x28, 0x6B, 3, 0, 49, 67, 16]);
        }

        #[test]
        fn test_error_correction() {
            assert_eq!(
                set_error_correction(QrErrorLevel::L),
                vec![0x1D, 0x28, 0x6B, 3, 0, 49, 69, 48]
            );
            assert_eq!(
                set_error_correction(QrErrorLevel::H),
                vec![0x1D, 0x28, 0x6B, 3, 0, 49, 69, 51]
            );
        }

        #[test]
        fn test_error_level_from_raw_clamps() {
            assert_eq!(QrErrorLevel::from_raw(0), QrErrorLevel::L);
            assert_eq!(QrErrorLevel::from_raw(48), QrErrorLevel::L);
            assert_eq!(QrErrorLevel::from_raw(50), QrErrorLevel::Q);
            assert_eq!(QrErrorLevel::from_raw(51), QrErrorLevel::H);
            assert_eq!(QrErrorLevel::from_raw(255), QrErrorLevel::H);
        }

        #[test]
        fn test_store_data_short() {
            let cmd = store_data(b"ABCDE").unwrap();
            assert_eq!(&cmd[..8], &[0x1D, 0x28, 0x6B, 8, 0, 49, 80, 48]);
            assert_eq!(&cmd[8..], b"ABCDE");
        }

        #[test]
        fn test_store_data_length_split() {
            // 253 + 3 = 256 -> pL 0, pH 1
            let cmd = store_data(&[b'a'; 253]).unwrap();
            assert_eq!(cmd[3], 0);
            assert_eq!(cmd[4], 1);

            // 252 + 3 = 255 -> pL 255, pH 0
            let cmd = store_data(&[b'a'; 252]).unwrap();
            assert_eq!(cmd[3], 255);
            assert_eq!(cmd[4], 0);
        }

        #[test]
        fn test_store_data_max() {
            let cmd = store_data(&vec![b'0'; 7089]).unwrap();
            // 7092 = 0x1BB4
            assert_eq!(cmd[3], 0xB4);
            assert_eq!(cmd[4], 0x1B);
            assert_eq!(cmd.len(), 8 + 7089);
        }

        #[test]
        fn test_store_data_too_long() {
            let err = store_data(&vec![b'0'; 7090]).unwrap_err();
            assert!(matches!(
                err,
                CintaError::PayloadTooLong {
                    len: 7090,
                    max: 7089
                }
            ));
        }

        #[test]
        fn test_print() {
            assert_eq!(print(), vec![0x1D, 0x28, 0x6B, 3, 0, 49, 81, 48]);
        }

        #[test]
        fn test_generate_sequence() {
            let cmd = generate(b"ABCDE", QrModel::Model2, 10, QrErrorLevel::M).unwrap();
            let mut expected = Vec::new();
            expected.extend([0x1D, 0x28, 0x6B, 4, 0, 49, 65, 50, 0]);
            expected.extend([0x1D, 0x28, 0x6B, 3, 0, 49, 67, 10]);
            expected.extend([0x1D, 0x28, 0x6B, 3, 0, 49, 69, 49]);
            expected.extend([0x1D, 0x28, 0x6B, 8, 0, 49, 80, 48]);
            expected.extend(b"ABCDE");
            expected.extend([0x1D, 0x28, 0x6B, 3, 0, 49, 81, 48]);
            assert_eq!(cmd, expected);
        }

        #[test]
        fn test_generate_rejects_before_output() {
            let result = generate(&vec![b'x'; 8000], QrModel::Model2, 4, QrErrorLevel::L);
            assert!(matches!(result, Err(CintaError::PayloadTooLong { .. })));
        }
    }
}
