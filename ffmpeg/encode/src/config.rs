/*!
    Encoder configuration types.
*/

use ffmpeg_types::{ChannelLayout, CodecId, SampleFormat};

/**
    Configuration for audio encoding.
*/
#[derive(Clone, Debug, PartialEq)]
pub struct AudioEncoderConfig {
    /// Codec to use.
    pub codec: CodecId,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel layout.
    pub channels: ChannelLayout,
    /// Expected input sample format.
    pub sample_format: SampleFormat,
    /// Target bitrate in bits per second (None = codec default).
    pub bitrate: Option<u64>,
}

impl AudioEncoderConfig {
    /**
        Create a new audio encoder configuration.
    */
    pub fn new(codec: CodecId, sample_rate: u32, channels: ChannelLayout) -> Self {
        Self {
            codec,
            sample_rate,
            channels,
            sample_format: SampleFormat::S16,
            bitrate: None,
        }
    }

    /**
        Create configuration for G.723.1 encoding.

        libavcodec only implements the 6.3 kbit/s rate, at 8 kHz mono.
    */
    pub fn g723_1() -> Self {
        Self::new(CodecId::G723_1, 8000, ChannelLayout::Mono).with_bitrate(6300)
    }

    /**
        Create configuration for G.711 mu-law encoding.
    */
    pub fn pcm_mulaw(sample_rate: u32, channels: ChannelLayout) -> Self {
        Self::new(CodecId::PcmMulaw, sample_rate, channels)
    }

    /**
        Create configuration for G.711 A-law encoding.
    */
    pub fn pcm_alaw(sample_rate: u32, channels: ChannelLayout) -> Self {
        Self::new(CodecId::PcmAlaw, sample_rate, channels)
    }

    /**
        Create the default configuration for a codec.
    */
    pub fn for_codec(codec: CodecId) -> Self {
        match codec {
            CodecId::G723_1 => Self::g723_1(),
            CodecId::PcmMulaw => Self::pcm_mulaw(8000, ChannelLayout::Mono),
            CodecId::PcmAlaw => Self::pcm_alaw(8000, ChannelLayout::Mono),
        }
    }

    /**
        Set the target bitrate in bits per second.
    */
    pub fn with_bitrate(mut self, bitrate: u64) -> Self {
        self.bitrate = Some(bitrate);
        self
    }

    /**
        Set the sample rate in Hz.
    */
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /**
        Set the input sample format.
    */
    pub fn with_sample_format(mut self, format: SampleFormat) -> Self {
        self.sample_format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn g723_1_defaults() {
        let config = AudioEncoderConfig::g723_1();
        assert_eq!(config.codec, CodecId::G723_1);
        assert_eq!(config.sample_rate, 8000);
        assert_eq!(config.channels, ChannelLayout::Mono);
        assert_eq!(config.sample_format, SampleFormat::S16);
        assert_eq!(config.bitrate, Some(6300));
    }

    #[test]
    fn builders_override() {
        let config = AudioEncoderConfig::pcm_mulaw(8000, ChannelLayout::Stereo)
            .with_sample_rate(16000)
            .with_bitrate(128_000);
        assert_eq!(config.codec, CodecId::PcmMulaw);
        assert_eq!(config.sample_rate, 16000);
        assert_eq!(config.channels, ChannelLayout::Stereo);
        assert_eq!(config.bitrate, Some(128_000));
    }

    #[test]
    fn for_codec_matches_presets() {
        assert_eq!(
            AudioEncoderConfig::for_codec(CodecId::G723_1),
            AudioEncoderConfig::g723_1()
        );
        assert_eq!(
            AudioEncoderConfig::for_codec(CodecId::PcmAlaw).codec,
            CodecId::PcmAlaw
        );
    }
}
