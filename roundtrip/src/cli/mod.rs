use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

mod codecs;
mod frame_check;
mod run;

pub use codecs::CodecsCommand;
pub use frame_check::FrameCheckCommand;
pub use run::RunCommand;

#[derive(Parser, Debug)]
#[command(name = "roundtrip")]
#[command(about = "Encode synthetic PCM through libavcodec and decode it back")]
pub struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a ramp, decode it and dump every buffer (default)
    Run(RunCommand),
    /// Check libavcodec's audio frame buffer sizing
    FrameCheck(FrameCheckCommand),
    /// List supported codecs and whether the linked libavcodec provides them
    Codecs(CodecsCommand),
}

impl Args {
    pub fn run(self) -> Result<()> {
        let command = self
            .command
            .unwrap_or(Command::Run(RunCommand::default()));

        match command {
            Command::Run(cmd) => cmd.run(),
            Command::FrameCheck(cmd) => cmd.run(),
            Command::Codecs(cmd) => cmd.run(),
        }
    }
}
