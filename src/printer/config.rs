//! # Printer Configuration
//!
//! This module defines hardware profiles for ESC/POS thermal printers.
//!
//! ## Supported Profiles
//!
//! | Profile | Paper | Width (dots) | Band Height | QR Module |
//! |---------|-------|--------------|-------------|-----------|
//! | `80mm` | 80mm | 576 | 24 rows | 6 dots |
//! | `58mm` | 58mm | 384 | 24 rows | 4 dots |
//!
//! ## Usage
//!
//! ```
//! use cinta::printer::PrinterConfig;
//!
//! let config = PrinterConfig::PAPER_80MM;
//! println!("Print width: {} dots, bands every {} rows",
//!          config.width_dots,
//!          config.band_height);
//! ```

use std::str::FromStr;

use crate::error::CintaError;

/// # Printer Configuration
///
/// Defines the hardware characteristics of a thermal printer.
///
/// ## Physical Properties
///
/// - **width_dots**: Maximum printable width in dots (pixels)
/// - **band_height**: Vertical step between `ESC *` bands in page mode
///
/// ## Job Defaults
///
/// - **qr_module_size**: Module size used when a QR job doesn't set one
/// - **band_page_height**: Page-mode area height for band jobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrinterConfig {
    /// Profile name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Dots each band moves down from the previous one
    pub band_height: u16,

    /// Default QR module size in dots
    pub qr_module_size: u8,

    /// Page-mode print area height used for band jobs
    pub band_page_height: u16,
}

impl PrinterConfig {
    /// # 80mm Receipt Printer
    ///
    /// ```text
    /// ├── 4mm ──┼────── 72mm printable ──────┼── 4mm ──┤
    /// │ margin  │         576 dots           │ margin  │
    /// ```
    pub const PAPER_80MM: Self = Self {
        name: "80mm",
        width_dots: 576,
        band_height: 24,
        qr_module_size: 6,
        band_page_height: 2400,
    };

    /// # 58mm Receipt Printer
    ///
    /// 48mm printable (384 dots).
    pub const PAPER_58MM: Self = Self {
        name: "58mm",
        width_dots: 384,
        band_height: 24,
        qr_module_size: 4,
        band_page_height: 2400,
    };

    /// All built-in profiles.
    pub const ALL: [Self; 2] = [Self::PAPER_80MM, Self::PAPER_58MM];

    /// Whether an image of `width` dots fits the printable area.
    #[inline]
    pub fn fits(&self, width: usize) -> bool {
        width <= self.width_dots as usize
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::PAPER_80MM
    }
}

impl FromStr for PrinterConfig {
    type Err = CintaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|config| config.name.eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CintaError::InvalidOption(format!(
                    "unknown printer profile '{}'. Use '80mm' or '58mm'",
                    s
                ))
            })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_dimensions() {
        for config in PrinterConfig::ALL {
            assert_eq!(config.width_dots % 8, 0);
            assert_eq!(config.band_height, 24);
        }
    }

    #[test]
    fn test_fits() {
        let config = PrinterConfig::PAPER_58MM;
        assert!(config.fits(384));
        assert!(!config.fits(385));
    }

    #[test]
    fn test_parse_profile() {
        assert_eq!("80MM".parse::<PrinterConfig>().unwrap(), PrinterConfig::PAPER_80MM);
        assert_eq!("58mm".parse::<PrinterConfig>().unwrap(), PrinterConfig::PAPER_58MM);
        assert!("tsp".parse::<PrinterConfig>().is_err());
    }

    #[test]
    fn test_default_is_80mm() {
        assert_eq!(PrinterConfig::default().name, "80mm");
    }
}
