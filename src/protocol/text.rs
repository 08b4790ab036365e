//! # ESC/POS Text Styling Commands
//!
//! This module implements text formatting commands and the toggle state a
//! printer session keeps between lines.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Alignment | ESC a n | Left / center / right |
//! | Font | ESC M n | Font A / B / C |
//! | Size | GS ! n | 1–8× width and height |
//! | Underline | ESC - n | Underlined text |
//! | Emphasize | ESC G n | Double-strike |
//! | Upside down | ESC { n | 180° rotation |
//! | Rotate | ESC R n | See note below |
//! | Reverse | GS B n | White on black |
//! | Smooth | GS b n | Smoothed large characters |
//! | Language | ESC R n | International character set |
//!
//! Rotate and language share `ESC R`. Existing printer integrations send the
//! rotate toggle that way and the bytes are kept as they are.
//!
//! ## Font Size Encoding
//!
//! ```text
//! n = ((width - 1) << 4) | (height - 1)     width, height in 1..=8
//!
//! 1x1 -> 0x00    2x1 -> 0x10    1x2 -> 0x01    8x8 -> 0x77
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::commands::{ESC, GS};
use crate::error::{CintaError, CintaResult};

// ============================================================================
// ALIGNMENT, FONT, LANGUAGE
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl FromStr for Alignment {
    type Err = CintaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(CintaError::InvalidOption(format!(
                "invalid alignment '{}'",
                other
            ))),
        }
    }
}

/// # Select Justification (ESC a n)
///
/// ```
/// use cinta::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

/// Available fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Font {
    #[default]
    A = 0,
    B = 1,
    C = 2,
}

impl FromStr for Font {
    type Err = CintaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Font::A),
            "B" => Ok(Font::B),
            "C" => Ok(Font::C),
            _ => Err(CintaError::InvalidOption(format!("invalid font '{}'", s))),
        }
    }
}

/// # Select Character Font (ESC M n)
pub fn font(font: Font) -> Vec<u8> {
    vec![ESC, b'M', font as u8]
}

/// International character sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En = 0,
    Fr = 1,
    De = 2,
    Uk = 3,
    Da = 4,
    Sv = 5,
    It = 6,
    Es = 7,
    Ja = 8,
    No = 9,
}

impl FromStr for Language {
    type Err = CintaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = match s {
            "en" => Language::En,
            "fr" => Language::Fr,
            "de" => Language::De,
            "uk" => Language::Uk,
            "da" => Language::Da,
            "sv" => Language::Sv,
            "it" => Language::It,
            "es" => Language::Es,
            "ja" => Language::Ja,
            "no" => Language::No,
            other => {
                return Err(CintaError::InvalidOption(format!(
                    "invalid language '{}'",
                    other
                )));
            }
        };
        Ok(lang)
    }
}

/// # Select International Character Set (ESC R n)
pub fn language(lang: Language) -> Vec<u8> {
    vec![ESC, b'R', lang as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// Largest width/height multiplier.
pub const MAX_SCALE: u8 = 8;

/// Character size multiplier, both axes in 1..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSize {
    width: u8,
    height: u8,
}

impl FontSize {
    pub const NORMAL: FontSize = FontSize {
        width: 1,
        height: 1,
    };

    /// Validate a size. Zero or anything above 8 is rejected.
    pub fn new(width: u8, height: u8) -> CintaResult<Self> {
        let valid = 1..=MAX_SCALE;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(CintaError::InvalidOption(format!(
                "invalid font size {} x {}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// The `GS !` parameter byte.
    #[inline]
    pub fn encode(&self) -> u8 {
        ((self.width - 1) << 4) | (self.height - 1)
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// # Select Character Size (GS ! n)
///
/// ```
/// use cinta::protocol::text::{font_size, FontSize};
///
/// let size = FontSize::new(2, 3)?;
/// assert_eq!(font_size(size), vec![0x1D, 0x21, 0x12]);
/// # Ok::<(), cinta::CintaError>(())
/// ```
pub fn font_size(size: FontSize) -> Vec<u8> {
    vec![GS, b'!', size.encode()]
}

// ============================================================================
// TOGGLES
// ============================================================================

/// ESC - n
pub fn underline(n: u8) -> Vec<u8> {
    vec![ESC, b'-', n]
}

/// ESC G n
pub fn emphasize(n: u8) -> Vec<u8> {
    vec![ESC, b'G', n]
}

/// ESC { n
pub fn upside_down(n: u8) -> Vec<u8> {
    vec![ESC, b'{', n]
}

/// ESC R n
pub fn rotate(n: u8) -> Vec<u8> {
    vec![ESC, b'R', n]
}

/// GS B n
pub fn reverse(n: u8) -> Vec<u8> {
    vec![GS, b'B', n]
}

/// GS b n
pub fn smooth(n: u8) -> Vec<u8> {
    vec![GS, b'b', n]
}

/// Current toggle values of a printer session.
///
/// The printer keeps these modes until they are changed or the printer is
/// reset, so a session mirrors them to resend a known state after each feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleState {
    pub size: FontSize,
    pub underline: u8,
    pub emphasize: u8,
    pub upside_down: u8,
    pub rotate: u8,
    pub reverse: u8,
    pub smooth: u8,
}

impl ToggleState {
    /// Back to 1x1, every toggle off.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The sequence sent after a feed to push the current state to the printer.
    ///
    /// Order: emphasize, rotate, smooth, reverse, underline, upside-down,
    /// size, underline. Underline is sent twice.
    pub fn resend(&self) -> Vec<u8> {
        let mut cmd = Vec::with_capacity(24);
        cmd.extend(emphasize(self.emphasize));
        cmd.extend(rotate(self.rotate));
        cmd.extend(smooth(self.smooth));
        cmd.extend(reverse(self.reverse));
        cmd.extend(underline(self.underline));
        cmd.extend(upside_down(self.upside_down));
        cmd.extend(font_size(self.size));
        cmd.extend(underline(self.underline));
        cmd
    }
}

// ============================================================================
// TEXT ENTITIES
// ============================================================================

/// Entities decoded in text payloads. `&amp;` is last so `&amp;lt;` decodes
/// to the literal `&lt;`, not `<`.
const ENTITIES: [(&str, &str); 9] = [
    ("&#9;", "\t"),
    ("&#x9;", "\t"),
    ("&#10;", "\n"),
    ("&#xA;", "\n"),
    ("&apos;", "'"),
    ("&quot;", "\""),
    ("&gt;", ">"),
    ("&lt;", "<"),
    ("&amp;", "&"),
];

/// Decode the XML-style entities that text nodes may carry.
///
/// ```
/// use cinta::protocol::text::replace_entities;
///
/// assert_eq!(replace_entities("a&#9;b&#10;&lt;c&gt;"), "a\tb\n<c>");
/// ```
pub fn replace_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 1]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 2]);
    }

    #[test]
    fn test_alignment_from_str() {
        assert_eq!("center".parse::<Alignment>().unwrap(), Alignment::Center);
        assert!(matches!(
            "middle".parse::<Alignment>(),
            Err(CintaError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_font() {
        assert_eq!(font(Font::B), vec![0x1B, 0x4D, 1]);
        assert_eq!("c".parse::<Font>().unwrap(), Font::C);
        assert!("D".parse::<Font>().is_err());
    }

    #[test]
    fn test_language() {
        assert_eq!(language("ja".parse().unwrap()), vec![0x1B, 0x52, 8]);
        assert_eq!(language(Language::No), vec![0x1B, 0x52, 9]);
        assert!("xx".parse::<Language>().is_err());
    }

    #[test]
    fn test_font_size_encoding() {
        assert_eq!(FontSize::new(1, 1).unwrap().encode(), 0x00);
        assert_eq!(FontSize::new(2, 1).unwrap().encode(), 0x10);
        assert_eq!(FontSize::new(1, 2).unwrap().encode(), 0x01);
        assert_eq!(FontSize::new(8, 8).unwrap().encode(), 0x77);
    }

    #[test]
    fn test_font_size_rejects_out_of_range() {
        assert!(FontSize::new(0, 1).is_err());
        assert!(FontSize::new(1, 9).is_err());
    }

    #[test]
    fn test_toggles() {
        assert_eq!(underline(1), vec![0x1B, 0x2D, 1]);
        assert_eq!(emphasize(1), vec![0x1B, 0x47, 1]);
        assert_eq!(upside_down(1), vec![0x1B, 0x7B, 1]);
        assert_eq!(rotate(1), vec![0x1B, 0x52, 1]);
        assert_eq!(reverse(1), vec![0x1D, 0x42, 1]);
        assert_eq!(smooth(1), vec![0x1D, 0x62, 1]);
    }

    #[test]
    fn test_resend_default_sequence() {
        let state = ToggleState::default();
        assert_eq!(
            state.resend(),
            vec![
                0x1B, 0x47, 0, // emphasize
                0x1B, 0x52, 0, // rotate
                0x1D, 0x62, 0, // smooth
                0x1D, 0x42, 0, // reverse
                0x1B, 0x2D, 0, // underline
                0x1B, 0x7B, 0, // upside down
                0x1D, 0x21, 0, // size
                0x1B, 0x2D, 0, // underline again
            ]
        );
    }

    #[test]
    fn test_resend_carries_state() {
        let state = ToggleState {
            size: FontSize::new(2, 2).unwrap(),
            underline: 1,
            ..Default::default()
        };
        let cmd = state.resend();
        assert_eq!(&cmd[12..15], &[0x1B, 0x2D, 1]);
        assert_eq!(&cmd[18..21], &[0x1D, 0x21, 0x11]);
        assert_eq!(&cmd[21..24], &[0x1B, 0x2D, 1]);
    }

    #[test]
    fn test_reset() {
        let mut state = ToggleState {
            emphasize: 1,
            smooth: 1,
            ..Default::default()
        };
        state.reset();
        assert_eq!(state, ToggleState::default());
    }

    #[test]
    fn test_replace_entities() {
        assert_eq!(replace_entities("&apos;hi&apos; &quot;x&quot;"), "'hi' \"x\"");
        assert_eq!(replace_entities("&#x9;&#xA;"), "\t\n");
        assert_eq!(replace_entities("a &amp; b"), "a & b");
    }

    #[test]
    fn test_replace_entities_amp_last() {
        assert_eq!(replace_entities("&amp;lt;"), "&lt;");
    }
}
