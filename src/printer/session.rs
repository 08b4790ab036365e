//! # Printer Session
//!
//! A [`Session`] drives one printer over a [`Transport`], tracking the text
//! toggles the printer currently has enabled so they can be restored after
//! each feed.
//!
//! ## Example
//!
//! ```
//! use cinta::printer::{options::TextOptions, Session};
//! use cinta::protocol::barcode::Symbology;
//! use cinta::transport::MemoryTransport;
//!
//! let mut session = Session::new(MemoryTransport::new());
//! session.init()?;
//! session.text(&TextOptions::default(), "Thanks!")?;
//! session.barcode(Symbology::Code128, b"1234A")?;
//! session.cut()?;
//!
//! let bytes = session.into_transport().into_bytes();
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! # Ok::<(), cinta::CintaError>(())
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info, instrument, warn};

use super::config::PrinterConfig;
use super::options::{CutOptions, FeedOptions, ImageOptions, Node, QrOptions, TextOptions};
use crate::error::{CintaError, CintaResult};
use crate::protocol::barcode::{self, Symbology, qr};
use crate::protocol::graphics::{self, BandPlacement};
use crate::protocol::text::{self, Alignment, Font, FontSize, Language, ToggleState};
use crate::protocol::{commands, page};
use crate::render::{self, pixels::PixelSource};
use crate::transport::Transport;

/// Stateful connection to one printer.
pub struct Session<T: Transport> {
    transport: T,
    config: PrinterConfig,
    toggles: ToggleState,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, PrinterConfig::default())
    }

    pub fn with_config(transport: T, config: PrinterConfig) -> Self {
        Self {
            transport,
            config,
            toggles: ToggleState::default(),
        }
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn toggles(&self) -> &ToggleState {
        &self.toggles
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Send raw bytes.
    pub fn write_raw(&mut self, data: &[u8]) -> CintaResult<()> {
        if data.is_empty() {
            debug!("nothing to write");
            return Ok(());
        }
        debug!(len = data.len(), "writing");
        self.transport.write_all(data)
    }

    pub fn flush(&mut self) -> CintaResult<()> {
        self.transport.flush()
    }

    // ========================================================================
    // FIXED COMMANDS
    // ========================================================================

    /// Reset the printer and forget every toggle.
    pub fn init(&mut self) -> CintaResult<()> {
        self.toggles.reset();
        self.write_raw(&commands::init())
    }

    pub fn end(&mut self) -> CintaResult<()> {
        self.write_raw(&commands::end())
    }

    pub fn cut(&mut self) -> CintaResult<()> {
        self.write_raw(&commands::cut_full())
    }

    pub fn cut_partial(&mut self) -> CintaResult<()> {
        self.write_raw(&commands::cut_partial())
    }

    pub fn cash(&mut self) -> CintaResult<()> {
        self.write_raw(&commands::cash_drawer())
    }

    pub fn pulse(&mut self) -> CintaResult<()> {
        self.write_raw(&commands::pulse())
    }

    pub fn linefeed(&mut self) -> CintaResult<()> {
        self.write_raw(&commands::linefeed())
    }

    /// Feed `n` lines.
    pub fn formfeed(&mut self, n: u8) -> CintaResult<()> {
        self.write_raw(&commands::feed_lines(n))
    }

    // ========================================================================
    // TEXT STATE
    // ========================================================================

    pub fn set_align(&mut self, alignment: Alignment) -> CintaResult<()> {
        self.write_raw(&text::align(alignment))
    }

    pub fn set_lang(&mut self, lang: Language) -> CintaResult<()> {
        self.write_raw(&text::language(lang))
    }

    pub fn set_font(&mut self, font: Font) -> CintaResult<()> {
        self.write_raw(&text::font(font))
    }

    /// Validate, remember and send a character size.
    pub fn set_font_size(&mut self, width: u8, height: u8) -> CintaResult<()> {
        let size = FontSize::new(width, height)?;
        self.toggles.size = size;
        self.write_raw(&text::font_size(size))
    }

    pub fn set_underline(&mut self, n: u8) -> CintaResult<()> {
        self.toggles.underline = n;
        self.write_raw(&text::underline(n))
    }

    pub fn set_emphasize(&mut self, n: u8) -> CintaResult<()> {
        self.toggles.emphasize = n;
        self.write_raw(&text::emphasize(n))
    }

    pub fn set_upside_down(&mut self, n: u8) -> CintaResult<()> {
        self.toggles.upside_down = n;
        self.write_raw(&text::upside_down(n))
    }

    pub fn set_rotate(&mut self, n: u8) -> CintaResult<()> {
        self.toggles.rotate = n;
        self.write_raw(&text::rotate(n))
    }

    pub fn set_reverse(&mut self, n: u8) -> CintaResult<()> {
        self.toggles.reverse = n;
        self.write_raw(&text::reverse(n))
    }

    pub fn set_smooth(&mut self, n: u8) -> CintaResult<()> {
        self.toggles.smooth = n;
        self.write_raw(&text::smooth(n))
    }

    // ========================================================================
    // JOB OPERATIONS
    // ========================================================================

    /// Apply `options` and print `data` after entity decoding.
    ///
    /// Size validation happens before anything is sent, so an invalid
    /// width or height leaves the printer untouched.
    pub fn text(&mut self, options: &TextOptions, data: &str) -> CintaResult<()> {
        self.planned_size(options)?;

        if let Some(alignment) = options.align {
            self.set_align(alignment)?;
        }
        if let Some(lang) = options.lang {
            self.set_lang(lang)?;
        }
        if options.smooth {
            self.set_smooth(1)?;
        }
        if options.em {
            self.set_emphasize(1)?;
        }
        if options.ul {
            self.set_underline(1)?;
        }
        if options.reverse {
            self.set_reverse(1)?;
        }
        if options.rotate {
            self.set_rotate(1)?;
        }
        if let Some(font) = options.font {
            self.set_font(font)?;
        }
        if options.dw {
            self.set_font_size(2, self.toggles.size.height())?;
        }
        if options.dh {
            self.set_font_size(self.toggles.size.width(), 2)?;
        }
        if let Some(width) = options.width {
            self.set_font_size(width, self.toggles.size.height())?;
        }
        if let Some(height) = options.height {
            self.set_font_size(self.toggles.size.width(), height)?;
        }
        if let Some(x) = options.x {
            self.write_raw(&commands::move_x(x))?;
        }
        if let Some(y) = options.y {
            self.write_raw(&commands::move_y(y))?;
        }

        let data = text::replace_entities(data);
        self.write_raw(data.as_bytes())
    }

    /// The character size `options` ends up selecting.
    fn planned_size(&self, options: &TextOptions) -> CintaResult<FontSize> {
        let mut size = self.toggles.size;
        if options.dw {
            size = FontSize::new(2, size.height())?;
        }
        if options.dh {
            size = FontSize::new(size.width(), 2)?;
        }
        if let Some(width) = options.width {
            size = FontSize::new(width, size.height())?;
        }
        if let Some(height) = options.height {
            size = FontSize::new(size.width(), height)?;
        }
        Ok(size)
    }

    /// Feed, end the line, then restore every toggle to its default.
    pub fn feed(&mut self, options: &FeedOptions) -> CintaResult<()> {
        if let Some(lines) = options.line {
            self.formfeed(lines)?;
        }
        if let Some(unit) = options.unit {
            self.write_raw(&commands::move_y(unit))?;
        }
        self.linefeed()?;

        self.toggles.reset();
        let reset = self.toggles.resend();
        self.write_raw(&reset)
    }

    pub fn feed_and_cut(&mut self, options: &CutOptions) -> CintaResult<()> {
        if options.feed {
            self.formfeed(1)?;
        }
        self.cut()
    }

    /// Print a centered 1D barcode.
    ///
    /// Toggles are reset (locally) first; the payload is not validated.
    pub fn barcode(&mut self, symbology: Symbology, data: &[u8]) -> CintaResult<()> {
        info!(%symbology, len = data.len(), "printing barcode");
        self.toggles.reset();
        self.set_align(Alignment::Center)?;
        self.write_raw(&barcode::barcode(symbology, data))
    }

    /// Print a QR code.
    ///
    /// An oversized payload fails with [`CintaError::PayloadTooLong`] before
    /// any byte reaches the transport.
    pub fn qr_code(&mut self, data: &[u8], options: &QrOptions) -> CintaResult<()> {
        let cmd = qr::generate(data, options.model, options.module_size, options.level)?;
        info!(len = data.len(), module_size = options.module_size, "printing QR code");
        self.write_raw(&cmd)
    }

    /// Store a base64-encoded row-aligned raster in the graphics buffer and
    /// print it.
    ///
    /// `data` is the raster alone. The `xL xH yL yH` size header is built from
    /// `options.width` and `options.height`, so a payload that already starts
    /// with its own dimensions sends them twice and prints four stray bytes.
    pub fn image(&mut self, options: &ImageOptions, data: &str) -> CintaResult<()> {
        let raster = STANDARD
            .decode(data.trim())
            .map_err(|e| CintaError::Image(format!("invalid base64 image data: {}", e)))?;

        info!(
            len = raster.len(),
            width = options.width,
            height = options.height,
            "printing image"
        );
        if raster.len() != options.expected_len() {
            warn!(
                expected = options.expected_len(),
                actual = raster.len(),
                "image data does not match its dimensions"
            );
        }

        if let Some(alignment) = options.align {
            self.set_align(alignment)?;
        }
        self.write_raw(&graphics::store_graphics(
            options.width,
            options.height,
            &raster,
        ))?;
        self.write_raw(&graphics::print_graphics())
    }

    /// Threshold and print a picture with `GS v 0`.
    pub fn raster_image<S: PixelSource + ?Sized>(&mut self, source: &S) -> CintaResult<()> {
        let (width, height) = source.dimensions();
        self.check_width(width);

        let raster = render::rasterize_simple(source);
        info!(
            width = raster.block.width,
            height = raster.block.height,
            "printing raster image"
        );
        self.write_raw(&graphics::raster_image(&raster))?;
        debug!(source_height = height, "raster image sent");
        Ok(())
    }

    /// Threshold and print a picture as 24-row bands in page mode.
    ///
    /// Rows below the last whole band are dropped.
    pub fn raster_bands<S: PixelSource + ?Sized>(&mut self, source: &S) -> CintaResult<()> {
        let (width, _) = source.dimensions();
        self.check_width(width);

        let raster = render::rasterize_bands(source);
        let placement = BandPlacement::stacked(
            self.config.width_dots as usize,
            self.config.band_page_height as usize,
            self.config.band_height as usize,
        );
        info!(
            width = raster.width,
            height = raster.height,
            bands = raster.bands.len(),
            "printing raster bands"
        );

        let mut cmd = page::page_mode();
        cmd.extend(graphics::raster_bands(&raster, &placement));
        cmd.extend(page::print_page_buffer());
        cmd.extend(page::standard_mode());
        self.write_raw(&cmd)
    }

    fn check_width(&self, width: usize) {
        if !self.config.fits(width) {
            warn!(
                width,
                max = self.config.width_dots,
                "image is wider than the print area"
            );
        }
    }

    /// Request status `n` and read the one-byte reply.
    #[instrument(skip(self))]
    pub fn read_status(&mut self, n: u8) -> CintaResult<u8> {
        self.write_raw(&commands::status_request(n))?;
        self.transport.flush()?;
        let status = self.transport.read_byte()?;
        debug!(status, "status received");
        Ok(status)
    }

    /// Dispatch one job node.
    pub fn write_node(&mut self, node: &Node) -> CintaResult<()> {
        info!(node = node.name(), "write");
        match node {
            Node::Text { options, data } => self.text(options, data),
            Node::Feed(options) => self.feed(options),
            Node::Cut(options) => self.feed_and_cut(options),
            Node::Pulse => self.pulse(),
            Node::Image { options, data } => self.image(options, data),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
