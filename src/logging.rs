//! Logging setup with sensitive-value masking.
//!
//! The webhook token authorizes posting into the destination channel,
//! and it shows up inside the delivery URL, so every log line passes
//! through a writer that blanks it out before it reaches the console.

use std::io::{self, Write};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MASK: &str = "<masked>";

/// Replace every occurrence of the masked values in a message. Output
/// that bypasses the tracing writer (annotations on stdout) goes
/// through this directly.
pub fn mask_message(masked_values: &[String], message: &str) -> String {
    let mut message = message.to_string();
    for value in masked_values {
        // `replace("")` matches between every character and would
        // shred the message; an empty token masks nothing.
        if value.is_empty() {
            continue;
        }
        message = message.replace(value.as_str(), MASK);
    }
    message
}

/// A `MakeWriter` that masks configured values in everything written
/// to stdout, including values embedded inside URLs.
#[derive(Clone)]
pub struct MaskingWriter {
    masked_values: Vec<String>,
}

impl MaskingWriter {
    pub fn new(masked_values: Vec<String>) -> Self {
        // An empty masked value would match everywhere; drop it.
        Self {
            masked_values: masked_values.into_iter().filter(|v| !v.is_empty()).collect(),
        }
    }
}

impl<'a> MakeWriter<'a> for MaskingWriter {
    type Writer = MaskingStream;

    fn make_writer(&'a self) -> Self::Writer {
        MaskingStream {
            masked_values: self.masked_values.clone(),
            out: io::stdout(),
        }
    }
}

pub struct MaskingStream {
    masked_values: Vec<String>,
    out: io::Stdout,
}

impl Write for MaskingStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let masked = mask_message(&self.masked_values, &text);
        self.out.write_all(masked.as_bytes())?;
        // Report the original length; the caller tracks its own buffer.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Set up the tracing subscriber, masking the given values everywhere.
pub fn init(masked_values: Vec<String>) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(MaskingWriter::new(masked_values)))
        .init();
}
