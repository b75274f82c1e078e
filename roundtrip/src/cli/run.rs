use anyhow::{Context, Result, bail};
use clap::Parser;
use ffmpeg_encode::AudioEncoderConfig;
use ffmpeg_types::CodecId;

use crate::codec::AudioCodec;
use crate::dump::hex_join;
use crate::signal::{DEFAULT_BASE, DEFAULT_STEP, ramp};

#[derive(Parser, Debug)]
pub struct RunCommand {
    /// Codec to exercise (g723_1, pcm_mulaw, pcm_alaw)
    #[arg(short, long, default_value = "g723_1")]
    pub codec: CodecId,

    /// Number of source samples to generate
    #[arg(short = 'n', long, default_value = "240")]
    pub samples: usize,

    /// First ramp sample (decimal or 0x-prefixed hex)
    #[arg(long, default_value = "0x1000", value_parser = parse_sample, allow_hyphen_values = true)]
    pub base: i16,

    /// Increment between ramp samples (decimal or 0x-prefixed hex)
    #[arg(long, default_value = "0x50", value_parser = parse_sample, allow_hyphen_values = true)]
    pub step: i16,

    /// Encoder bitrate in bits per second (codec default if omitted)
    #[arg(short, long)]
    pub bitrate: Option<u64>,

    /// Sample rate in Hz (codec default if omitted)
    #[arg(short = 'r', long)]
    pub sample_rate: Option<u32>,

    /// Size of the encoded frame buffer in bytes
    #[arg(long, default_value = "240")]
    pub frame_bytes: usize,

    /// Separator between dumped values
    #[arg(short, long, default_value = "-")]
    pub separator: String,
}

impl Default for RunCommand {
    fn default() -> Self {
        Self {
            codec: CodecId::G723_1,
            samples: 240,
            base: DEFAULT_BASE,
            step: DEFAULT_STEP,
            bitrate: None,
            sample_rate: None,
            frame_bytes: 240,
            separator: "-".to_string(),
        }
    }
}

impl RunCommand {
    pub fn run(self) -> Result<()> {
        println!("Test encode {} audio codec", self.codec);

        let result = self.round_trip();
        println!();
        result
    }

    fn config(&self) -> AudioEncoderConfig {
        let mut config = AudioEncoderConfig::for_codec(self.codec);
        if let Some(bitrate) = self.bitrate {
            config = config.with_bitrate(bitrate);
        }
        if let Some(rate) = self.sample_rate {
            config = config.with_sample_rate(rate);
        }
        config
    }

    fn round_trip(&self) -> Result<()> {
        if self.samples == 0 {
            bail!("sample count must be positive");
        }

        let config = self.config();
        let mut encoder = AudioCodec::encoder(config.clone());
        let mut decoder = AudioCodec::decoder(config);

        let source = ramp(self.samples, self.base, self.step);
        println!("Source speech of {} samples: ", source.len());
        println!("{}", hex_join(&source, &self.separator));

        encoder
            .open()
            .with_context(|| format!("failed to open {} encoder", encoder.codec_id()))?;

        let mut encoded = vec![0u8; self.frame_bytes];
        let bytes = encoder
            .encode(&source, &mut encoded)
            .context("encode failed")?;
        if bytes == 0 {
            tracing::warn!(codec = %encoder.codec_id(), "encoder produced no packet");
            return Ok(());
        }
        println!("Encode frame of {} bytes: ", bytes);
        println!("{}", hex_join(&encoded[..bytes], &self.separator));

        decoder
            .open()
            .with_context(|| format!("failed to open {} decoder", decoder.codec_id()))?;

        let mut decoded = vec![0i16; self.samples];
        let samples = decoder
            .decode(&encoded[..bytes], &mut decoded)
            .context("decode failed")?;
        if samples == 0 {
            tracing::warn!(codec = %decoder.codec_id(), "decoder produced no frame");
            return Ok(());
        }
        println!("Decode frame of {} samples: ", samples);
        println!("{}", hex_join(&decoded[..samples], &self.separator));

        tracing::debug!(
            encoder = ?encoder.direction(),
            decoder = ?decoder.direction(),
            bytes,
            samples,
            "round trip complete"
        );
        Ok(())
    }
}

/**
    Parse a sample value as decimal or `0x`-prefixed hex.

    Hex values are read as 16-bit words, so `0xffff` is -1. Decimal values
    must fit `i16`.
*/
fn parse_sample(s: &str) -> Result<i16, String> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => {
            let word = u16::from_str_radix(hex, 16)
                .map(|v| v as i16)
                .map_err(|e| format!("invalid hex sample '{}': {}", s, e))?;
            Ok(if negative { word.wrapping_neg() } else { word })
        }
        None => {
            // Parse signed as a whole so i16::MIN is reachable
            let value = s
                .parse::<i32>()
                .map_err(|e| format!("invalid sample '{}': {}", s, e))?;
            i16::try_from(value).map_err(|_| {
                format!(
                    "sample '{}' is outside {}..={}",
                    s,
                    i16::MIN,
                    i16::MAX
                )
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sample_forms() {
        assert_eq!(parse_sample("0x1000"), Ok(0x1000));
        assert_eq!(parse_sample("0X50"), Ok(0x50));
        assert_eq!(parse_sample("80"), Ok(80));
        assert_eq!(parse_sample("-16"), Ok(-16));
        assert_eq!(parse_sample("0xffff"), Ok(-1));
        assert_eq!(parse_sample("-0x10"), Ok(-16));
        assert!(parse_sample("0x10000").is_err());
        assert!(parse_sample("ramp").is_err());
    }

    #[test]
    fn parse_sample_decimal_range() {
        assert_eq!(parse_sample("-32768"), Ok(i16::MIN));
        assert_eq!(parse_sample("32767"), Ok(i16::MAX));
        assert!(parse_sample("32768").is_err());
        assert!(parse_sample("-32769").is_err());
        assert!(parse_sample("--5").is_err());
    }

    #[test]
    fn minimum_base_from_command_line() {
        let cmd = RunCommand::try_parse_from(["run", "--base", "-32768", "--step=-1"]).unwrap();
        assert_eq!(cmd.base, i16::MIN);
        assert_eq!(cmd.step, -1);
    }

    #[test]
    fn default_matches_cli_defaults() {
        let parsed = RunCommand::try_parse_from(["run"]).unwrap();
        let default = RunCommand::default();
        assert_eq!(parsed.codec, default.codec);
        assert_eq!(parsed.samples, default.samples);
        assert_eq!(parsed.base, default.base);
        assert_eq!(parsed.step, default.step);
        assert_eq!(parsed.frame_bytes, default.frame_bytes);
        assert_eq!(parsed.separator, default.separator);
    }

    #[test]
    fn config_applies_overrides() {
        let cmd = RunCommand {
            codec: CodecId::PcmMulaw,
            bitrate: Some(64_000),
            sample_rate: Some(16000),
            ..RunCommand::default()
        };
        let config = cmd.config();
        assert_eq!(config.codec, CodecId::PcmMulaw);
        assert_eq!(config.bitrate, Some(64_000));
        assert_eq!(config.sample_rate, 16000);
    }

    #[test]
    fn default_run_succeeds() {
        assert!(RunCommand::default().round_trip().is_ok());
    }

    #[test]
    fn undersized_frame_buffer_fails() {
        let cmd = RunCommand {
            frame_bytes: 4,
            ..RunCommand::default()
        };
        assert!(cmd.round_trip().is_err());
    }

    #[test]
    fn zero_samples_fails() {
        let cmd = RunCommand {
            samples: 0,
            ..RunCommand::default()
        };
        assert!(cmd.round_trip().is_err());
    }
}
