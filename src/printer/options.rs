//! # Job Options
//!
//! Typed options for the print operations of a [`Session`](super::Session).
//!
//! Options arrive in two shapes:
//!
//! - **JSON** via `serde` (a list of [`Node`]s describing a whole job)
//! - **Key/value bags** (`HashMap<String, String>`) from markup-style job
//!   descriptions, parsed once with `from_params`
//!
//! Either way, malformed values surface as [`CintaError::InvalidOption`]
//! before anything is sent to the printer.
//!
//! ## Key/Value Parameters
//!
//! | Operation | Keys |
//! |-----------|------|
//! | text | align, lang, smooth, em, ul, reverse, rotate, font, dw, dh, width, height, x, y |
//! | feed | line, unit |
//! | cut | type (`feed` feeds one line first) |
//! | image | align, width, height |
//!
//! Boolean keys are on when their value is `"true"` or `"1"`.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{CintaError, CintaResult};
use crate::protocol::barcode::qr::{QrErrorLevel, QrModel};
use crate::protocol::text::{Alignment, Font, Language};

/// Key/value parameter bag.
pub type Params = HashMap<String, String>;

fn flag(params: &Params, key: &str) -> bool {
    matches!(params.get(key).map(String::as_str), Some("true" | "1"))
}

fn number<T: FromStr>(params: &Params, key: &str) -> CintaResult<Option<T>> {
    params
        .get(key)
        .map(|value| {
            value.trim().parse::<T>().map_err(|_| {
                CintaError::InvalidOption(format!("invalid {} '{}'", key, value))
            })
        })
        .transpose()
}

fn parsed<T: FromStr<Err = CintaError>>(params: &Params, key: &str) -> CintaResult<Option<T>> {
    params.get(key).map(|value| value.parse::<T>()).transpose()
}

fn required<T: FromStr>(params: &Params, key: &str) -> CintaResult<T> {
    number(params, key)?
        .ok_or_else(|| CintaError::InvalidOption(format!("missing {}", key)))
}

// ============================================================================
// TEXT
// ============================================================================

/// Formatting applied before a block of text.
///
/// Settings are sent in field order. `width`/`height` are applied after
/// `dw`/`dh`, so an explicit size wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub align: Option<Alignment>,
    pub lang: Option<Language>,
    pub smooth: bool,
    pub em: bool,
    pub ul: bool,
    pub reverse: bool,
    pub rotate: bool,
    pub font: Option<Font>,
    pub dw: bool,
    pub dh: bool,
    pub width: Option<u8>,
    pub height: Option<u8>,
    pub x: Option<u16>,
    pub y: Option<u16>,
}

impl TextOptions {
    /// Parse text parameters.
    ///
    /// The `font` value names the font in its sixth character
    /// (`"font_a"`, `"font:b"`); a bare `"a"`/`"b"`/`"c"` works too.
    ///
    /// ```
    /// use cinta::printer::options::{Params, TextOptions};
    /// use cinta::protocol::text::{Alignment, Font};
    ///
    /// let params: Params = [("align", "center"), ("font", "font_b"), ("em", "1")]
    ///     .into_iter()
    ///     .map(|(k, v)| (k.to_string(), v.to_string()))
    ///     .collect();
    ///
    /// let options = TextOptions::from_params(&params)?;
    /// assert_eq!(options.align, Some(Alignment::Center));
    /// assert_eq!(options.font, Some(Font::B));
    /// assert!(options.em);
    /// # Ok::<(), cinta::CintaError>(())
    /// ```
    pub fn from_params(params: &Params) -> CintaResult<Self> {
        let font = params
            .get("font")
            .map(|value| value.get(5..6).unwrap_or(value.as_str()).parse::<Font>())
            .transpose()?;

        Ok(Self {
            align: parsed(params, "align")?,
            lang: parsed(params, "lang")?,
            smooth: flag(params, "smooth"),
            em: flag(params, "em"),
            ul: flag(params, "ul"),
            reverse: flag(params, "reverse"),
            rotate: flag(params, "rotate"),
            font,
            dw: flag(params, "dw"),
            dh: flag(params, "dh"),
            width: number(params, "width")?,
            height: number(params, "height")?,
            x: number(params, "x")?,
            y: number(params, "y")?,
        })
    }
}

// ============================================================================
// FEED / CUT
// ============================================================================

/// Paper feed before the line feed that ends a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedOptions {
    /// Feed this many lines (`ESC d n`)
    pub line: Option<u8>,
    /// Move this many dots vertically (`GS $`)
    pub unit: Option<u16>,
}

impl FeedOptions {
    pub fn from_params(params: &Params) -> CintaResult<Self> {
        Ok(Self {
            line: number(params, "line")?,
            unit: number(params, "unit")?,
        })
    }
}

/// Cut options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CutOptions {
    /// Feed one line before cutting
    pub feed: bool,
}

impl CutOptions {
    pub fn from_params(params: &Params) -> CintaResult<Self> {
        Ok(Self {
            feed: params.get("type").is_some_and(|t| t == "feed"),
        })
    }
}

// ============================================================================
// IMAGE
// ============================================================================

/// Dimensions and alignment of a pre-rasterized image payload.
///
/// `width` and `height` are in dots and describe the row-aligned raster
/// carried (base64-encoded) alongside the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ImageOptions {
    #[serde(default)]
    pub align: Option<Alignment>,
    pub width: usize,
    pub height: usize,
}

impl ImageOptions {
    /// Both `width` and `height` are required.
    pub fn from_params(params: &Params) -> CintaResult<Self> {
        Ok(Self {
            align: parsed(params, "align")?,
            width: required(params, "width")?,
            height: required(params, "height")?,
        })
    }

    /// Bytes a row-aligned raster of these dimensions occupies.
    pub fn expected_len(&self) -> usize {
        self.width.div_ceil(8) * self.height
    }
}

// ============================================================================
// QR
// ============================================================================

/// QR symbol settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
    pub model: QrModel,
    /// Module size in dots, clamped into 1..=16 when framed
    pub module_size: u8,
    pub level: QrErrorLevel,
}

impl QrOptions {
    pub fn with_module_size(module_size: u8) -> Self {
        Self {
            module_size,
            ..Self::default()
        }
    }
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            model: QrModel::default(),
            module_size: 6,
            level: QrErrorLevel::default(),
        }
    }
}

// ============================================================================
// NODES
// ============================================================================

/// One element of a print job.
///
/// In JSON a node is tagged by `"node"`:
///
/// ```
/// use cinta::printer::options::Node;
///
/// let nodes: Vec<Node> = serde_json::from_str(r#"[
///     {"node": "text", "align": "center", "em": true, "data": "Hello"},
///     {"node": "feed", "line": 2},
///     {"node": "cut", "feed": true}
/// ]"#).unwrap();
///
/// assert_eq!(nodes.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum Node {
    Text {
        #[serde(flatten)]
        options: TextOptions,
        #[serde(default)]
        data: String,
    },
    Feed(FeedOptions),
    Cut(CutOptions),
    Pulse,
    Image {
        #[serde(flatten)]
        options: ImageOptions,
        data: String,
    },
}

impl Node {
    /// Build a node from its name, a key/value bag and its character data.
    pub fn from_params(name: &str, params: &Params, data: &str) -> CintaResult<Self> {
        let node = match name {
            "text" => Node::Text {
                options: TextOptions::from_params(params)?,
                data: data.to_string(),
            },
            "feed" => Node::Feed(FeedOptions::from_params(params)?),
            "cut" => Node::Cut(CutOptions::from_params(params)?),
            "pulse" => Node::Pulse,
            "image" => Node::Image {
                options: ImageOptions::from_params(params)?,
                data: data.to_string(),
            },
            other => {
                return Err(CintaError::InvalidOption(format!(
                    "unknown node '{}'",
                    other
                )));
            }
        };
        Ok(node)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Node::Text { .. } => "text",
            Node::Feed(_) => "feed",
            Node::Cut(_) => "cut",
            Node::Pulse => "pulse",
            Node::Image { .. } => "image",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_text_flags() {
        let options = TextOptions::from_params(&params(&[
            ("smooth", "true"),
            ("ul", "1"),
            ("reverse", "yes"),
            ("rotate", "0"),
        ]))
        .unwrap();
        assert!(options.smooth);
        assert!(options.ul);
        assert!(!options.reverse);
        assert!(!options.rotate);
    }

    #[test]
    fn test_text_numbers() {
        let options = TextOptions::from_params(&params(&[
            ("width", "2"),
            ("height", "3"),
            ("x", "300"),
            ("y", "12"),
        ]))
        .unwrap();
        assert_eq!(options.width, Some(2));
        assert_eq!(options.height, Some(3));
        assert_eq!(options.x, Some(300));
        assert_eq!(options.y, Some(12));
    }

    #[test]
    fn test_text_rejects_bad_values() {
        for bad in [
            ("align", "middle"),
            ("lang", "xx"),
            ("font", "font_z"),
            ("width", "wide"),
            ("x", "-1"),
        ] {
            let result = TextOptions::from_params(&params(&[bad]));
            assert!(
                matches!(result, Err(CintaError::InvalidOption(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_text_font_short_value() {
        let options = TextOptions::from_params(&params(&[("font", "c")])).unwrap();
        assert_eq!(options.font, Some(Font::C));
    }

    #[test]
    fn test_feed_options() {
        let options = FeedOptions::from_params(&params(&[("line", "3"), ("unit", "40")])).unwrap();
        assert_eq!(options.line, Some(3));
        assert_eq!(options.unit, Some(40));
        assert_eq!(FeedOptions::from_params(&params(&[])).unwrap(), FeedOptions::default());
    }

    #[test]
    fn test_cut_options() {
        assert!(CutOptions::from_params(&params(&[("type", "feed")])).unwrap().feed);
        assert!(!CutOptions::from_params(&params(&[("type", "full")])).unwrap().feed);
    }

    #[test]
    fn test_image_requires_dimensions() {
        assert!(ImageOptions::from_params(&params(&[("width", "8")])).is_err());
        let options =
            ImageOptions::from_params(&params(&[("width", "12"), ("height", "2")])).unwrap();
        assert_eq!(options.expected_len(), 4);
    }

    #[test]
    fn test_node_from_params() {
        let node = Node::from_params("cut", &params(&[("type", "feed")]), "").unwrap();
        assert_eq!(node, Node::Cut(CutOptions { feed: true }));
        assert_eq!(node.name(), "cut");
        assert!(Node::from_params("beep", &params(&[]), "").is_err());
    }

    #[test]
    fn test_node_json() {
        let node: Node = serde_json::from_str(
            r#"{"node": "image", "align": "right", "width": 16, "height": 1, "data": "//8="}"#,
        )
        .unwrap();
        assert_eq!(
            node,
            Node::Image {
                options: ImageOptions {
                    align: Some(Alignment::Right),
                    width: 16,
                    height: 1,
                },
                data: "//8=".to_string(),
            }
        );

        let node: Node = serde_json::from_str(r#"{"node": "pulse"}"#).unwrap();
        assert_eq!(node, Node::Pulse);
    }

    #[test]
    fn test_qr_defaults() {
        let options = QrOptions::default();
        assert_eq!(options.model, QrModel::Model2);
        assert_eq!(options.level, QrErrorLevel::M);
        assert_eq!(QrOptions::with_module_size(4).module_size, 4);
    }
}
