//! chime - terminal soundboard
//!
//! Run with: cargo run

mod app;

use app::Soundboard;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    Soundboard::new().run()
}
