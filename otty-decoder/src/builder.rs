use crate::command::{Handler, Registry, Responder};
use crate::decoder::Decoder;
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::display::Display;
use crate::error::Result;
use crate::options::DecoderOptions;

/// Builder that wires options, collaborators and extra commands into a
/// [`Decoder`].
pub struct DecoderBuilder<D: Display, G: Diagnostics = LogDiagnostics> {
    registry: Registry<D>,
    options: DecoderOptions,
    diagnostics: G,
    responder: Option<Responder>,
}

impl<D: Display> DecoderBuilder<D> {
    pub fn new() -> Self {
        Self {
            registry: Registry::standard(),
            options: DecoderOptions::default(),
            diagnostics: LogDiagnostics,
            responder: None,
        }
    }
}

impl<D: Display> Default for DecoderBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Display, G: Diagnostics> DecoderBuilder<D, G> {
    /// Replace the decoder options.
    pub fn with_options(mut self, options: DecoderOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the diagnostics sink.
    pub fn with_diagnostics<H>(self, diagnostics: H) -> DecoderBuilder<D, H>
    where
        H: Diagnostics,
    {
        DecoderBuilder {
            registry: self.registry,
            options: self.options,
            diagnostics,
            responder: self.responder,
        }
    }

    /// Install the callback receiving response bytes (DSR, DA).
    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: FnMut(u8) + Send + 'static,
    {
        self.responder = Some(Box::new(responder));
        self
    }

    /// Replace the whole command table.
    pub fn with_registry(mut self, registry: Registry<D>) -> Self {
        self.registry = registry;
        self
    }

    /// Add or replace one command on top of the current table.
    pub fn with_command(
        mut self,
        letter: char,
        handler: Handler<D>,
    ) -> Result<Self> {
        self.registry.register(letter, handler)?;
        Ok(self)
    }

    pub fn build(self) -> Decoder<D, G> {
        let DecoderBuilder {
            registry,
            mut options,
            diagnostics,
            responder,
        } = self;

        if options.max_csi_len == 0 {
            options.max_csi_len = DecoderOptions::default().max_csi_len;
        }

        Decoder::from_parts(registry, options, diagnostics, responder)
    }
}
