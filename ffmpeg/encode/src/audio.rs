/*!
    Audio encoder implementation.
*/

use ffmpeg_next::{
    ChannelLayout as FFmpegChannelLayout,
    codec::{self, Id as CodecIdFFmpeg, encoder::Audio as AudioEncoderFFmpeg},
    ffi,
    util::frame::audio::Audio as AudioFrameFFmpeg,
};

use ffmpeg_types::{
    AudioFrame, AudioStreamInfo, ChannelLayout, CodecId, Error, MediaDuration, Packet, Pts,
    Rational, Result, SampleFormat,
};

use crate::config::AudioEncoderConfig;

/**
    Audio encoder.

    Encodes raw audio frames into compressed packets. The underlying codec
    context is opened on construction and closed when the encoder is dropped.
*/
pub struct AudioEncoder {
    encoder: AudioEncoderFFmpeg,
    config: AudioEncoderConfig,
    time_base: Rational,
    sample_count: i64,
}

impl AudioEncoder {
    /**
        Create and open a new audio encoder with the given configuration.
    */
    pub fn new(config: AudioEncoderConfig) -> Result<Self> {
        ffmpeg_next::init().map_err(|e| Error::codec(e.to_string()))?;

        // Find the codec
        let codec_id = codec_id_to_ffmpeg(config.codec);
        let codec = ffmpeg_next::encoder::find(codec_id).ok_or_else(|| {
            Error::unsupported_format(format!("encoder for {} not found", config.codec))
        })?;

        // Create encoder context
        let encoder_ctx = codec::context::Context::new_with_codec(codec);
        let mut encoder = encoder_ctx
            .encoder()
            .audio()
            .map_err(|e| Error::codec(e.to_string()))?;

        encoder.set_format(sample_format_to_ffmpeg(config.sample_format)?);
        encoder.set_rate(config.sample_rate as i32);
        encoder.set_channel_layout(channel_layout_to_ffmpeg(config.channels));

        // Set time base (1/sample_rate is standard for audio)
        encoder.set_time_base(ffmpeg_next::Rational::new(1, config.sample_rate as i32));

        if let Some(bitrate) = config.bitrate {
            encoder.set_bit_rate(bitrate as usize);
        }

        let encoder = encoder.open().map_err(|e| {
            Error::codec(format!("failed to open {} encoder: {}", config.codec, e))
        })?;

        let time_base = Rational::new(1, config.sample_rate as i32);

        tracing::debug!(
            codec = %config.codec,
            sample_rate = config.sample_rate,
            frame_size = encoder.frame_size(),
            "opened audio encoder"
        );

        Ok(Self {
            encoder,
            config,
            time_base,
            sample_count: 0,
        })
    }

    /**
        Returns true if the linked libavcodec provides an encoder for `codec`.
    */
    pub fn is_supported(codec: CodecId) -> bool {
        ffmpeg_next::init().is_ok()
            && ffmpeg_next::encoder::find(codec_id_to_ffmpeg(codec)).is_some()
    }

    /**
        Get the configuration the encoder was opened with.
    */
    pub fn config(&self) -> &AudioEncoderConfig {
        &self.config
    }

    /**
        Get the time base for encoded packets.
    */
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /**
        Get the frame size expected by the encoder.

        Some codecs require a specific number of samples per frame.
        Returns None if the codec accepts variable frame sizes.
    */
    pub fn frame_size(&self) -> Option<usize> {
        let size = self.encoder.frame_size() as usize;
        if size == 0 { None } else { Some(size) }
    }

    /**
        Get stream info for the opened encoder.
    */
    pub fn stream_info(&self) -> AudioStreamInfo {
        let bitrate = unsafe {
            let ctx_ptr = self.encoder.as_ptr();
            if (*ctx_ptr).bit_rate > 0 {
                Some((*ctx_ptr).bit_rate as u64)
            } else {
                None
            }
        };

        AudioStreamInfo {
            sample_rate: self.encoder.rate(),
            channels: self.config.channels,
            sample_format: self.config.sample_format,
            time_base: self.time_base,
            codec_id: self.config.codec,
            bitrate,
            frame_size: self.frame_size(),
        }
    }

    /**
        Encode an audio frame, returning encoded packets.

        May return zero, one, or multiple packets depending on encoder buffering.
    */
    pub fn encode(&mut self, frame: &AudioFrame) -> Result<Vec<Packet>> {
        if let Some(expected) = self.frame_size() {
            if frame.samples != expected {
                return Err(Error::invalid_data(format!(
                    "{} encoder needs {} samples per frame, got {}",
                    self.config.codec, expected, frame.samples
                )));
            }
        }

        // Create FFmpeg frame
        let sample_format = sample_format_to_ffmpeg(frame.format)?;
        let channel_layout = channel_layout_to_ffmpeg(frame.channels);
        let mut ffmpeg_frame = AudioFrameFFmpeg::new(sample_format, frame.samples, channel_layout);
        ffmpeg_frame.set_rate(frame.sample_rate);

        copy_data_to_ffmpeg_frame(&mut ffmpeg_frame, frame)?;

        let pts = frame.pts.map_or(self.sample_count, |p| p.0);
        ffmpeg_frame.set_pts(Some(pts));
        self.sample_count += frame.samples as i64;

        self.encoder
            .send_frame(&ffmpeg_frame)
            .map_err(|e| Error::codec(e.to_string()))?;

        let packets = self.receive_packets()?;
        tracing::trace!(
            samples = frame.samples,
            packets = packets.len(),
            "encoded audio frame"
        );
        Ok(packets)
    }

    /**
        Flush the encoder to get any remaining buffered packets.

        Call this at end of stream.
    */
    pub fn flush(&mut self) -> Result<Vec<Packet>> {
        match self.encoder.send_eof() {
            Ok(()) | Err(ffmpeg_next::Error::Eof) => {}
            Err(e) => return Err(Error::codec(e.to_string())),
        }

        self.receive_packets()
    }

    /**
        Receive all available packets from the encoder.
    */
    fn receive_packets(&mut self) -> Result<Vec<Packet>> {
        let mut packets = Vec::new();
        let mut encoded_pkt = ffmpeg_next::Packet::empty();

        loop {
            match self.encoder.receive_packet(&mut encoded_pkt) {
                Ok(()) => packets.push(self.convert_packet(&encoded_pkt)),
                Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => break,
                Err(ffmpeg_next::Error::Eof) => break,
                Err(e) => return Err(Error::codec(e.to_string())),
            }
        }

        Ok(packets)
    }

    /**
        Convert an FFmpeg packet to our Packet type.
    */
    fn convert_packet(&self, pkt: &ffmpeg_next::Packet) -> Packet {
        Packet {
            data: pkt.data().map(|d| d.to_vec()).unwrap_or_default(),
            pts: pkt.pts().map(Pts),
            dts: pkt.dts().map(Pts),
            duration: MediaDuration(pkt.duration()),
            time_base: self.time_base,
            is_keyframe: pkt.is_key(),
        }
    }
}

/**
    Convert our CodecId to FFmpeg's codec ID.
*/
fn codec_id_to_ffmpeg(codec: CodecId) -> CodecIdFFmpeg {
    match codec {
        CodecId::G723_1 => CodecIdFFmpeg::G723_1,
        CodecId::PcmMulaw => CodecIdFFmpeg::PCM_MULAW,
        CodecId::PcmAlaw => CodecIdFFmpeg::PCM_ALAW,
    }
}

/**
    Convert our SampleFormat to FFmpeg's packed Sample format.
*/
fn sample_format_to_ffmpeg(format: SampleFormat) -> Result<ffmpeg_next::format::Sample> {
    use ffmpeg_next::format::Sample;
    use ffmpeg_next::format::sample::Type;

    match format {
        SampleFormat::F32 => Ok(Sample::F32(Type::Packed)),
        SampleFormat::F64 => Ok(Sample::F64(Type::Packed)),
        SampleFormat::S16 => Ok(Sample::I16(Type::Packed)),
        SampleFormat::S32 => Ok(Sample::I32(Type::Packed)),
        SampleFormat::U8 => Ok(Sample::U8(Type::Packed)),
        _ => Err(Error::unsupported_format(format!(
            "sample format {:?} not supported",
            format
        ))),
    }
}

/**
    Convert our ChannelLayout to FFmpeg's ChannelLayout.
*/
fn channel_layout_to_ffmpeg(layout: ChannelLayout) -> FFmpegChannelLayout {
    match layout {
        ChannelLayout::Mono => FFmpegChannelLayout::MONO,
        ChannelLayout::Stereo => FFmpegChannelLayout::STEREO,
        ChannelLayout::Surround5_1 => FFmpegChannelLayout::_5POINT1,
        ChannelLayout::Surround7_1 => FFmpegChannelLayout::_7POINT1,
        _ => FFmpegChannelLayout::STEREO,
    }
}

/**
    Copy data from our AudioFrame into an FFmpeg frame.
*/
fn copy_data_to_ffmpeg_frame(dst: &mut AudioFrameFFmpeg, src: &AudioFrame) -> Result<()> {
    let total_bytes = src.byte_len();
    if src.data.len() < total_bytes {
        return Err(Error::invalid_data(format!(
            "frame holds {} bytes, expected {}",
            src.data.len(),
            total_bytes
        )));
    }

    // For packed format, copy to plane 0
    let dst_data = dst.data_mut(0);
    if dst_data.len() < total_bytes {
        return Err(Error::BufferTooSmall {
            needed: total_bytes,
            available: dst_data.len(),
        });
    }

    dst_data[..total_bytes].copy_from_slice(&src.data[..total_bytes]);
    Ok(())
}

impl std::fmt::Debug for AudioEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioEncoder")
            .field("codec", &self.config.codec)
            .field("sample_rate", &self.encoder.rate())
            .field("time_base", &self.time_base)
            .finish_non_exhaustive()
    }
}
