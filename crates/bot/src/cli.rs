use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "avatarka")]
#[command(author, version, about = "Telegram bot that composites your photo with a status overlay", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot in long polling mode
    Run,

    /// Compose an avatar locally, without Telegram
    Compose {
        /// Path to the source photo (PNG, JPEG or WebP)
        input: String,

        /// Selection key by asset name: day_off, vacation or
        /// business_trip_<utc|dubai|moscow|ny>
        #[arg(short, long)]
        selection: String,

        /// Output path (defaults to avatar.png)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
