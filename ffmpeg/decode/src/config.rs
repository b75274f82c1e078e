/*!
    Decoder configuration types.
*/

use ffmpeg_types::{ChannelLayout, CodecId};

/**
    Configuration for audio decoding.

    Raw speech bitstreams carry no header, so the decoder has to be told the
    sample rate and channel count up front.
*/
#[derive(Clone, Debug, PartialEq)]
pub struct AudioDecoderConfig {
    /// Codec to use.
    pub codec: CodecId,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel layout.
    pub channels: ChannelLayout,
}

impl AudioDecoderConfig {
    pub fn new(codec: CodecId, sample_rate: u32, channels: ChannelLayout) -> Self {
        Self {
            codec,
            sample_rate,
            channels,
        }
    }

    /**
        Create configuration for G.723.1 decoding (8 kHz mono).
    */
    pub fn g723_1() -> Self {
        Self::new(CodecId::G723_1, 8000, ChannelLayout::Mono)
    }

    /**
        Create configuration for G.711 mu-law decoding.
    */
    pub fn pcm_mulaw(sample_rate: u32, channels: ChannelLayout) -> Self {
        Self::new(CodecId::PcmMulaw, sample_rate, channels)
    }

    /**
        Create configuration for G.711 A-law decoding.
    */
    pub fn pcm_alaw(sample_rate: u32, channels: ChannelLayout) -> Self {
        Self::new(CodecId::PcmAlaw, sample_rate, channels)
    }
}
