/*!
    Raw audio frame type.
*/

use crate::{ChannelLayout, Error, Pts, Rational, Result, SampleFormat};

/**
    A block of uncompressed audio.

    Samples are stored packed (interleaved) in native byte order, so
    `data.len()` is `samples * channels * bytes_per_sample`.
*/
#[derive(Clone, Debug, PartialEq)]
pub struct AudioFrame {
    pub data: Vec<u8>,
    /// Samples per channel.
    pub samples: usize,
    pub sample_rate: u32,
    pub channels: ChannelLayout,
    pub format: SampleFormat,
    pub pts: Option<Pts>,
    pub time_base: Rational,
}

impl AudioFrame {
    pub fn new(
        data: Vec<u8>,
        samples: usize,
        sample_rate: u32,
        channels: ChannelLayout,
        format: SampleFormat,
        pts: Option<Pts>,
        time_base: Rational,
    ) -> Self {
        Self {
            data,
            samples,
            sample_rate,
            channels,
            format,
            pts,
            time_base,
        }
    }

    /**
        Build an S16 frame from interleaved samples.

        Trailing samples that do not fill a whole sample period are rejected.
    */
    pub fn from_s16(pcm: &[i16], sample_rate: u32, channels: ChannelLayout) -> Result<Self> {
        let channel_count = channels.channels() as usize;
        if pcm.len() % channel_count != 0 {
            return Err(Error::invalid_data(format!(
                "{} samples do not divide evenly into {} channels",
                pcm.len(),
                channel_count
            )));
        }

        Ok(Self::new(
            bytemuck::cast_slice::<i16, u8>(pcm).to_vec(),
            pcm.len() / channel_count,
            sample_rate,
            channels,
            SampleFormat::S16,
            None,
            Rational::new(1, sample_rate as i32),
        ))
    }

    /**
        Read the frame back as interleaved `i16` samples.
    */
    pub fn to_s16(&self) -> Result<Vec<i16>> {
        if self.format != SampleFormat::S16 {
            return Err(Error::unsupported_format(format!(
                "expected S16 frame, got {:?}",
                self.format
            )));
        }
        let expected = self.byte_len();
        if self.data.len() < expected {
            return Err(Error::invalid_data(format!(
                "frame holds {} bytes, expected {}",
                self.data.len(),
                expected
            )));
        }
        Ok(bytemuck::pod_collect_to_vec(&self.data[..expected]))
    }

    /**
        Number of bytes the frame's samples occupy.
    */
    pub fn byte_len(&self) -> usize {
        self.format.buffer_size(self.channels.channels(), self.samples)
    }

    /**
        Total sample count across all channels.
    */
    pub fn total_samples(&self) -> usize {
        self.samples * self.channels.channels() as usize
    }
}
