use anyhow::Result;
use clap::Parser;
use ffmpeg_decode::AudioDecoder;
use ffmpeg_encode::AudioEncoder;
use ffmpeg_types::CodecId;

#[derive(Parser, Debug, Default)]
pub struct CodecsCommand;

impl CodecsCommand {
    pub fn run(self) -> Result<()> {
        println!("Supported codecs:");
        for codec in CodecId::ALL {
            println!("  - {}", describe(codec));
        }
        Ok(())
    }
}

fn describe(codec: CodecId) -> String {
    let frame = match codec.native_frame_size() {
        Some(n) => format!("{} samples/frame", n),
        None => "variable frame".to_string(),
    };
    let availability = |present: bool| if present { "yes" } else { "no" };
    format!(
        "{:<10} {:<18} encoder: {:<3} decoder: {}",
        codec.name(),
        frame,
        availability(AudioEncoder::is_supported(codec)),
        availability(AudioDecoder::is_supported(codec)),
    )
}
