//! Replay a captured terminal session and print the resulting screen.
//!
//! ```text
//! RUST_LOG=debug cargo run -p otty-screen --example replay -- session.log
//! ```
//!
//! Without a path the session is read from stdin.

use std::io::Read;

use anyhow::Context;
use otty_decoder::{Decoder, DecoderOptions};
use otty_screen::{Screen, ScreenConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut input = String::new();
    match std::env::args().nth(1) {
        Some(path) => {
            input = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {path}"))?;
        },
        None => {
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
        },
    }

    let mut screen = Screen::new(ScreenConfig::default())?;
    let mut decoder = Decoder::builder()
        .with_options(DecoderOptions::default())
        .with_responder(|byte| log::trace!("response byte {byte:#04x}"))
        .build();

    decoder
        .feed_str(&input, &mut screen)
        .context("session addressed a non-text row")?;

    for line in screen.visible_text() {
        println!("{line}");
    }

    Ok(())
}
