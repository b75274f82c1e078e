/*!
    One-direction codec handle with an explicit open/closed lifecycle.
*/

use ffmpeg_decode::{AudioDecoder, AudioDecoderConfig};
use ffmpeg_encode::{AudioEncoder, AudioEncoderConfig};
use ffmpeg_types::{AudioFrame, CodecId, Error, Packet, Result};

/**
    Which way a codec instance converts.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodecDirection {
    Encoder,
    Decoder,
}

impl CodecDirection {
    fn name(self) -> &'static str {
        match self {
            Self::Encoder => "encoder",
            Self::Decoder => "decoder",
        }
    }
}

enum Handle {
    Encoder(AudioEncoder),
    Decoder(AudioDecoder),
}

/**
    An encoder or decoder for a single codec.

    Construction allocates nothing in libavcodec. `open` creates and opens the
    codec context, `close` (or drop) releases it, and a closed codec can be
    opened again with a fresh context.

    The configuration describes the PCM side of the stream. A decoder only
    uses its codec, sample rate and channel layout.
*/
pub struct AudioCodec {
    direction: CodecDirection,
    config: AudioEncoderConfig,
    handle: Option<Handle>,
}

impl AudioCodec {
    /**
        Create a closed codec with the default configuration for `codec`.
    */
    pub fn new(codec: CodecId, direction: CodecDirection) -> Self {
        Self::with_config(AudioEncoderConfig::for_codec(codec), direction)
    }

    pub fn with_config(config: AudioEncoderConfig, direction: CodecDirection) -> Self {
        Self {
            direction,
            config,
            handle: None,
        }
    }

    pub fn encoder(config: AudioEncoderConfig) -> Self {
        Self::with_config(config, CodecDirection::Encoder)
    }

    pub fn decoder(config: AudioEncoderConfig) -> Self {
        Self::with_config(config, CodecDirection::Decoder)
    }

    pub fn codec_id(&self) -> CodecId {
        self.config.codec
    }

    pub fn direction(&self) -> CodecDirection {
        self.direction
    }

    pub fn is_encoder(&self) -> bool {
        self.direction == CodecDirection::Encoder
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /**
        Open the codec context. Opening an already open codec does nothing.

        On failure the codec stays closed.
    */
    pub fn open(&mut self) -> Result<()> {
        if self.handle.is_some() {
            return Ok(());
        }

        let handle = match self.direction {
            CodecDirection::Encoder => Handle::Encoder(AudioEncoder::new(self.config.clone())?),
            CodecDirection::Decoder => Handle::Decoder(AudioDecoder::new(AudioDecoderConfig::new(
                self.config.codec,
                self.config.sample_rate,
                self.config.channels,
            ))?),
        };
        self.handle = Some(handle);

        tracing::debug!(
            codec = %self.config.codec,
            direction = self.direction.name(),
            "codec opened"
        );
        Ok(())
    }

    /**
        Release the codec context. Closing a closed codec does nothing.
    */
    pub fn close(&mut self) {
        if self.handle.take().is_some() {
            tracing::debug!(
                codec = %self.config.codec,
                direction = self.direction.name(),
                "codec closed"
            );
        }
    }

    /**
        Encode one frame of interleaved samples into `out`.

        With a fixed codec frame size only the first `frame_size * channels`
        samples are used. Returns the number of bytes written, or 0 if the
        codec buffered the frame without emitting a packet.
    */
    pub fn encode(&mut self, pcm: &[i16], out: &mut [u8]) -> Result<usize> {
        if !self.is_encoder() {
            return Err(Error::WrongDirection {
                expected: CodecDirection::Encoder.name(),
            });
        }
        let Some(Handle::Encoder(encoder)) = self.handle.as_mut() else {
            return Err(Error::NotOpen);
        };

        if pcm.is_empty() {
            return Err(Error::invalid_data("no samples to encode"));
        }

        let channels = self.config.channels;
        let needed = encoder
            .frame_size()
            .map_or(pcm.len(), |n| n * channels.channels() as usize);
        if pcm.len() < needed {
            return Err(Error::invalid_data(format!(
                "{} needs {} samples per frame, got {}",
                self.config.codec,
                needed,
                pcm.len()
            )));
        }

        let frame = AudioFrame::from_s16(&pcm[..needed], self.config.sample_rate, channels)?;
        let packets = encoder.encode(&frame)?;

        let total: usize = packets.iter().map(Packet::len).sum();
        if total > out.len() {
            return Err(Error::BufferTooSmall {
                needed: total,
                available: out.len(),
            });
        }

        let mut written = 0;
        for packet in &packets {
            out[written..written + packet.len()].copy_from_slice(&packet.data);
            written += packet.len();
        }
        Ok(written)
    }

    /**
        Decode one encoded frame into `pcm`.

        Returns the number of samples written, truncated to `pcm.len()`, or 0
        if the codec produced no output for this input.
    */
    pub fn decode(&mut self, frame: &[u8], pcm: &mut [i16]) -> Result<usize> {
        if self.is_encoder() {
            return Err(Error::WrongDirection {
                expected: CodecDirection::Decoder.name(),
            });
        }
        let Some(Handle::Decoder(decoder)) = self.handle.as_mut() else {
            return Err(Error::NotOpen);
        };

        let packet = Packet::from_bytes(frame, decoder.time_base());
        let mut written = 0;
        for decoded in decoder.decode(&packet)? {
            let samples = decoded.to_s16()?;
            let count = samples.len().min(pcm.len() - written);
            pcm[written..written + count].copy_from_slice(&samples[..count]);
            written += count;
        }
        Ok(written)
    }
}

impl std::fmt::Debug for AudioCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioCodec")
            .field("codec", &self.config.codec)
            .field("direction", &self.direction)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use ffmpeg_types::ChannelLayout;

    use super::*;
    use crate::signal::{DEFAULT_BASE, DEFAULT_STEP, ramp};

    fn g723_pair() -> (AudioCodec, AudioCodec) {
        let mut encoder = AudioCodec::new(CodecId::G723_1, CodecDirection::Encoder);
        let mut decoder = AudioCodec::new(CodecId::G723_1, CodecDirection::Decoder);
        encoder.open().unwrap();
        decoder.open().unwrap();
        (encoder, decoder)
    }

    #[test]
    fn starts_closed() {
        let codec = AudioCodec::new(CodecId::G723_1, CodecDirection::Encoder);
        assert!(!codec.is_open());
        assert!(codec.is_encoder());
        assert_eq!(codec.codec_id(), CodecId::G723_1);
    }

    #[test]
    fn open_is_idempotent_and_close_reopens() {
        let mut codec = AudioCodec::new(CodecId::G723_1, CodecDirection::Decoder);
        codec.open().unwrap();
        codec.open().unwrap();
        assert!(codec.is_open());

        codec.close();
        assert!(!codec.is_open());
        codec.close();

        codec.open().unwrap();
        assert!(codec.is_open());
    }

    #[test]
    fn failed_open_leaves_codec_closed() {
        let config = AudioEncoderConfig::g723_1().with_sample_rate(16000);
        let mut codec = AudioCodec::encoder(config);
        assert!(matches!(codec.open(), Err(Error::Codec(_))));
        assert!(!codec.is_open());

        let pcm = ramp(240, DEFAULT_BASE, DEFAULT_STEP);
        let mut out = [0u8; 240];
        assert_eq!(codec.encode(&pcm, &mut out), Err(Error::NotOpen));
    }

    #[test]
    fn closed_codec_refuses_work() {
        let mut encoder = AudioCodec::new(CodecId::G723_1, CodecDirection::Encoder);
        let pcm = ramp(240, DEFAULT_BASE, DEFAULT_STEP);
        let mut out = [0u8; 240];
        assert_eq!(encoder.encode(&pcm, &mut out), Err(Error::NotOpen));

        let mut decoder = AudioCodec::new(CodecId::G723_1, CodecDirection::Decoder);
        let mut pcm_out = [0i16; 240];
        assert_eq!(decoder.decode(&out[..24], &mut pcm_out), Err(Error::NotOpen));
    }

    #[test]
    fn direction_is_enforced() {
        let (mut encoder, mut decoder) = g723_pair();
        let mut pcm = [0i16; 240];
        let mut out = [0u8; 240];

        assert!(matches!(
            encoder.decode(&out, &mut pcm),
            Err(Error::WrongDirection { expected: "decoder" })
        ));
        assert!(matches!(
            decoder.encode(&pcm, &mut out),
            Err(Error::WrongDirection { expected: "encoder" })
        ));
    }

    #[test]
    fn g723_1_round_trip() {
        let (mut encoder, mut decoder) = g723_pair();
        let pcm = ramp(240, DEFAULT_BASE, DEFAULT_STEP);

        let mut encoded = [0u8; 240];
        let bytes = encoder.encode(&pcm, &mut encoded).unwrap();
        assert_eq!(bytes, 24);

        let mut decoded = [0i16; 240];
        let samples = decoder.decode(&encoded[..bytes], &mut decoded).unwrap();
        assert_eq!(samples, 240);
    }

    #[test]
    fn decode_truncates_to_output_buffer() {
        let (mut encoder, mut decoder) = g723_pair();
        let pcm = ramp(240, DEFAULT_BASE, DEFAULT_STEP);
        let mut encoded = [0u8; 24];
        let bytes = encoder.encode(&pcm, &mut encoded).unwrap();

        let mut decoded = [0i16; 100];
        assert_eq!(decoder.decode(&encoded[..bytes], &mut decoded), Ok(100));
    }

    #[test]
    fn encode_uses_only_one_frame_of_input() {
        let (mut encoder, _) = g723_pair();
        let pcm = ramp(480, DEFAULT_BASE, DEFAULT_STEP);
        let mut encoded = [0u8; 240];
        assert_eq!(encoder.encode(&pcm, &mut encoded), Ok(24));
    }

    #[test]
    fn short_input_is_rejected() {
        let (mut encoder, _) = g723_pair();
        let pcm = ramp(100, DEFAULT_BASE, DEFAULT_STEP);
        let mut encoded = [0u8; 240];
        assert!(matches!(
            encoder.encode(&pcm, &mut encoded),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            encoder.encode(&[], &mut encoded),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn small_output_buffer_is_rejected() {
        let (mut encoder, _) = g723_pair();
        let pcm = ramp(240, DEFAULT_BASE, DEFAULT_STEP);
        let mut encoded = [0u8; 8];
        assert_eq!(
            encoder.encode(&pcm, &mut encoded),
            Err(Error::BufferTooSmall {
                needed: 24,
                available: 8
            })
        );
    }

    #[test]
    fn alaw_round_trip_keeps_length() {
        let config = AudioEncoderConfig::pcm_alaw(8000, ChannelLayout::Mono);
        let mut encoder = AudioCodec::encoder(config.clone());
        let mut decoder = AudioCodec::decoder(config);
        encoder.open().unwrap();
        decoder.open().unwrap();

        let pcm = ramp(80, DEFAULT_BASE, DEFAULT_STEP);
        let mut encoded = [0u8; 80];
        assert_eq!(encoder.encode(&pcm, &mut encoded), Ok(80));

        let mut decoded = [0i16; 80];
        assert_eq!(decoder.decode(&encoded, &mut decoded), Ok(80));
    }
}
