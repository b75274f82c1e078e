/*!
    Stream information types.
*/

use crate::{ChannelLayout, CodecId, Rational, SampleFormat};

/**
    Information about an opened audio encoder's output stream.
*/
#[derive(Clone, Debug, PartialEq)]
pub struct AudioStreamInfo {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel layout.
    pub channels: ChannelLayout,
    /// Sample format.
    pub sample_format: SampleFormat,
    /// Time base for timestamps.
    pub time_base: Rational,
    /// Codec used.
    pub codec_id: CodecId,
    /// Bitrate in bits per second (if known).
    pub bitrate: Option<u64>,
    /// Samples per channel per frame (None if variable).
    pub frame_size: Option<usize>,
}

impl AudioStreamInfo {
    /**
        Returns the number of channels.
    */
    pub fn channel_count(&self) -> u16 {
        self.channels.channels()
    }

    /**
        Returns the number of bytes per sample per channel.
    */
    pub fn bytes_per_sample(&self) -> usize {
        self.sample_format.bytes_per_sample()
    }

    /**
        Returns the byte size of one full input frame, if the frame size is fixed.
    */
    pub fn frame_bytes(&self) -> Option<usize> {
        self.frame_size
            .map(|n| self.sample_format.buffer_size(self.channel_count(), n))
    }
}
