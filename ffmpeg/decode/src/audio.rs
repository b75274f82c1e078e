/*!
    Audio decoder implementation.
*/

use ffmpeg_next::{
    codec::{self, Id as CodecIdFFmpeg, decoder::Audio as AudioDecoderFFmpeg},
    ffi,
    packet::Mut as PacketMut,
    util::frame::audio::Audio as AudioFrameFFmpeg,
};

use ffmpeg_types::{
    AudioFrame, ChannelLayout, CodecId, Error, Packet, Pts, Rational, Result, SampleFormat,
};

use crate::config::AudioDecoderConfig;

/**
    Audio decoder.

    Decodes audio packets into frames. The codec context is opened on
    construction and closed when the decoder is dropped.
*/
pub struct AudioDecoder {
    decoder: AudioDecoderFFmpeg,
    codec: CodecId,
    time_base: Rational,
}

impl AudioDecoder {
    /**
        Create and open a new audio decoder.
    */
    pub fn new(config: AudioDecoderConfig) -> Result<Self> {
        ffmpeg_next::init().map_err(|e| Error::codec(e.to_string()))?;

        let codec = ffmpeg_next::decoder::find(codec_id_to_ffmpeg(config.codec)).ok_or_else(
            || Error::unsupported_format(format!("decoder for {} not found", config.codec)),
        )?;

        let mut decoder_ctx = codec::context::Context::new_with_codec(codec);

        // Headerless speech codecs refuse to open with zero channels.
        unsafe {
            let ctx_ptr = decoder_ctx.as_mut_ptr();
            (*ctx_ptr).sample_rate = config.sample_rate as i32;
            ffi::av_channel_layout_default(
                &mut (*ctx_ptr).ch_layout,
                config.channels.channels() as i32,
            );
        }

        let decoder = decoder_ctx.decoder().audio().map_err(|e| {
            Error::codec(format!("failed to open {} decoder: {}", config.codec, e))
        })?;

        tracing::debug!(
            codec = %config.codec,
            sample_rate = config.sample_rate,
            channels = config.channels.channels(),
            "opened audio decoder"
        );

        Ok(Self {
            decoder,
            codec: config.codec,
            time_base: Rational::new(1, config.sample_rate as i32),
        })
    }

    /**
        Returns true if the linked libavcodec provides a decoder for `codec`.
    */
    pub fn is_supported(codec: CodecId) -> bool {
        ffmpeg_next::init().is_ok()
            && ffmpeg_next::decoder::find(codec_id_to_ffmpeg(codec)).is_some()
    }

    /**
        Get the codec this decoder was opened for.
    */
    pub fn codec(&self) -> CodecId {
        self.codec
    }

    /**
        Get the time base for this decoder.
    */
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /**
        Get the sample rate of the decoded audio.
    */
    pub fn sample_rate(&self) -> u32 {
        self.decoder.rate()
    }

    /**
        Get the number of channels.
    */
    pub fn channels(&self) -> u16 {
        self.decoder.channels() as u16
    }

    /**
        Decode a packet, returning decoded frames.

        May return zero, one, or multiple frames depending on codec.
    */
    pub fn decode(&mut self, packet: &Packet) -> Result<Vec<AudioFrame>> {
        // An empty packet becomes a null-data packet, which libavcodec reads as a drain request
        let mut ffmpeg_pkt = if packet.data.is_empty() {
            ffmpeg_next::Packet::empty()
        } else {
            ffmpeg_next::Packet::copy(&packet.data)
        };

        // Set timing info
        unsafe {
            let pkt_ptr = ffmpeg_pkt.as_mut_ptr();
            if let Some(pts) = packet.pts {
                (*pkt_ptr).pts = pts.0;
            }
            if let Some(dts) = packet.dts {
                (*pkt_ptr).dts = dts.0;
            }
            (*pkt_ptr).duration = packet.duration.0;
        }

        // EAGAIN means the decoder's output is full: drain, then retry once
        match self.decoder.send_packet(&ffmpeg_pkt) {
            Ok(()) => {}
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                let mut all_frames = self.receive_frames()?;
                match self.decoder.send_packet(&ffmpeg_pkt) {
                    Ok(()) => all_frames.extend(self.receive_frames()?),
                    // Still full: keep what was drained, the packet is lost
                    Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                        tracing::warn!(codec = %self.codec, "decoder still full, packet dropped");
                    }
                    Err(e) => return Err(Error::codec(e.to_string())),
                }
                return Ok(all_frames);
            }
            Err(e) => return Err(Error::codec(e.to_string())),
        }

        // A speech frame decodes to exactly one output frame
        self.receive_frames()
    }

    /**
        Flush the decoder to get any remaining buffered frames.

        Call this at end of stream.
    */
    pub fn flush(&mut self) -> Result<Vec<AudioFrame>> {
        // First drain any pending frames
        let mut all_frames = self.receive_frames()?;

        // Send EOF. EAGAIN here means more frames must be drained first;
        // Eof means the decoder was already flushed.
        match self.decoder.send_eof() {
            Ok(()) | Err(ffmpeg_next::Error::Eof) => {}
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                all_frames.extend(self.receive_frames()?);
                let _ = self.decoder.send_eof(); // ignored on retry
            }
            Err(e) => return Err(Error::codec(e.to_string())),
        }

        // Receive remaining frames after EOF
        all_frames.extend(self.receive_frames()?);
        Ok(all_frames)
    }

    /**
        Reset the decoder, discarding any buffered state.

        The context stays open, so decoding can resume with the next packet.
        Speech codecs also lose their inter-frame predictor state here.
    */
    pub fn reset(&mut self) {
        self.decoder.flush();
    }

    /**
        Receive all available frames from the decoder.
    */
    fn receive_frames(&mut self) -> Result<Vec<AudioFrame>> {
        let mut frames = Vec::new();
        let mut decoded_frame = AudioFrameFFmpeg::empty();

        loop {
            match self.decoder.receive_frame(&mut decoded_frame) {
                Ok(()) => match self.convert_frame(&decoded_frame) {
                    Ok(frame) => frames.push(frame),
                    Err(e) => {
                        tracing::warn!(
                            codec = %self.codec,
                            error = %e,
                            "skipping undecodable frame"
                        );
                    }
                },
                Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => break,
                Err(ffmpeg_next::Error::Eof) => break,
                Err(e) => return Err(Error::codec(e.to_string())),
            }
        }

        Ok(frames)
    }

    /**
        Convert an FFmpeg audio frame to our AudioFrame type.
    */
    fn convert_frame(&self, frame: &AudioFrameFFmpeg) -> Result<AudioFrame> {
        let samples = frame.samples();
        let channel_count = frame.channels() as u16;

        if samples == 0 {
            return Err(Error::invalid_data("audio frame has zero samples"));
        }
        // Check that the frame actually has data planes allocated
        if frame.planes() == 0 {
            return Err(Error::invalid_data("audio frame has no data planes"));
        }

        let ffmpeg_format = frame.format();
        let format = sample_format_from_ffmpeg(ffmpeg_format).ok_or_else(|| {
            Error::unsupported_format(format!("unsupported sample format: {:?}", ffmpeg_format))
        })?;

        // Packed output regardless of how the decoder laid out its planes
        let data = copy_audio_data(frame, format, samples, channel_count)?;

        Ok(AudioFrame::new(
            data,
            samples,
            frame.rate(),
            ChannelLayout::from_count(channel_count),
            format,
            frame.pts().map(Pts),
            self.time_base,
        ))
    }
}

/**
    Copy audio data from an FFmpeg frame, interleaving planar layouts.

    In FFmpeg planar audio, linesize[0] holds the size of every plane and
    linesize[1..] may be 0, so plane pointers are read directly.
*/
fn copy_audio_data(
    frame: &AudioFrameFFmpeg,
    format: SampleFormat,
    samples: usize,
    channels: u16,
) -> Result<Vec<u8>> {
    let bytes_per_sample = format.bytes_per_sample();
    let total_bytes = format.buffer_size(channels, samples);
    let expected_plane_bytes = samples * bytes_per_sample;

    // Planar: one plane per channel, interleaved here sample by sample
    if frame.is_planar() && frame.planes() >= channels as usize {
        let mut output = vec![0u8; total_bytes];

        let plane_size = frame.data(0).len();
        if plane_size < expected_plane_bytes {
            return Err(Error::invalid_data(format!(
                "audio plane size {} is less than expected {} bytes for {} samples",
                plane_size, expected_plane_bytes, samples
            )));
        }

        for ch in 0..channels as usize {
            // frame.data(ch) sizes the slice from linesize[ch], which is 0
            // for ch > 0; every plane has plane 0's size instead.
            let plane_data = unsafe {
                let ptr = (*frame.as_ptr()).data[ch];
                std::slice::from_raw_parts(ptr, plane_size)
            };

            for s in 0..samples {
                let src_offset = s * bytes_per_sample;
                let dst_offset = (s * channels as usize + ch) * bytes_per_sample;
                output[dst_offset..dst_offset + bytes_per_sample]
                    .copy_from_slice(&plane_data[src_offset..src_offset + bytes_per_sample]);
            }
        }

        Ok(output)
    } else {
        // Packed/interleaved format - all data in plane 0
        let plane0_data = frame.data(0);
        if plane0_data.len() < total_bytes {
            return Err(Error::invalid_data(format!(
                "packed audio data has {} bytes, expected at least {}",
                plane0_data.len(),
                total_bytes
            )));
        }
        Ok(plane0_data[..total_bytes].to_vec())
    }
}

fn codec_id_to_ffmpeg(codec: CodecId) -> CodecIdFFmpeg {
    match codec {
        CodecId::G723_1 => CodecIdFFmpeg::G723_1,
        CodecId::PcmMulaw => CodecIdFFmpeg::PCM_MULAW,
        CodecId::PcmAlaw => CodecIdFFmpeg::PCM_ALAW,
    }
}

fn sample_format_from_ffmpeg(format: ffmpeg_next::format::Sample) -> Option<SampleFormat> {
    use ffmpeg_next::format::Sample;

    match format {
        Sample::F32(_) => Some(SampleFormat::F32),
        Sample::F64(_) => Some(SampleFormat::F64),
        Sample::I16(_) => Some(SampleFormat::S16),
        Sample::I32(_) => Some(SampleFormat::S32),
        Sample::U8(_) => Some(SampleFormat::U8),
        _ => None,
    }
}

impl std::fmt::Debug for AudioDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioDecoder")
            .field("codec", &self.codec)
            .field("time_base", &self.time_base)
            .field("sample_rate", &self.decoder.rate())
            .field("channels", &self.decoder.channels())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use ffmpeg_encode::{AudioEncoder, AudioEncoderConfig};

    use super::*;

    fn encode_ramp(config: AudioEncoderConfig, count: usize) -> Vec<Packet> {
        let pcm: Vec<i16> = (0..count).map(|i| 0x1000 + i as i16 * 0x50).collect();
        let frame = AudioFrame::from_s16(&pcm, config.sample_rate, config.channels).unwrap();
        let mut encoder = AudioEncoder::new(config).unwrap();
        encoder.encode(&frame).unwrap()
    }

    #[test]
    fn g723_1_round_trip_yields_one_frame() {
        let packets = encode_ramp(AudioEncoderConfig::g723_1(), 240);
        let mut decoder = AudioDecoder::new(AudioDecoderConfig::g723_1()).unwrap();
        assert_eq!(decoder.channels(), 1);

        let frames = decoder.decode(&packets[0]).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].samples, 240);
        assert_eq!(frames[0].format, SampleFormat::S16);
        assert_eq!(frames[0].to_s16().unwrap().len(), 240);
    }

    #[test]
    fn mulaw_round_trip_is_close() {
        let config = AudioEncoderConfig::pcm_mulaw(8000, ChannelLayout::Mono);
        let packets = encode_ramp(config.clone(), 64);
        let mut decoder = AudioDecoder::new(AudioDecoderConfig::new(
            config.codec,
            config.sample_rate,
            config.channels,
        ))
        .unwrap();

        let decoded: Vec<i16> = packets
            .iter()
            .flat_map(|p| decoder.decode(p).unwrap())
            .flat_map(|f| f.to_s16().unwrap())
            .collect();
        assert_eq!(decoded.len(), 64);

        // mu-law keeps roughly 13 bits of precision near these amplitudes
        for (i, sample) in decoded.iter().enumerate() {
            let original = 0x1000 + i as i32 * 0x50;
            let error = (*sample as i32 - original).abs();
            assert!(error <= original / 16, "sample {} off by {}", i, error);
        }
    }

    #[test]
    fn reports_configured_sample_rate() {
        let decoder = AudioDecoder::new(AudioDecoderConfig::g723_1()).unwrap();
        assert_eq!(decoder.sample_rate(), 8000);
        assert_eq!(decoder.codec(), CodecId::G723_1);
        assert_eq!(decoder.time_base(), Rational::new(1, 8000));

        let alaw = AudioDecoderConfig::pcm_alaw(16000, ChannelLayout::Stereo);
        let decoder = AudioDecoder::new(alaw).unwrap();
        assert_eq!(decoder.sample_rate(), 16000);
        assert_eq!(decoder.channels(), 2);
    }

    #[test]
    fn decoding_resumes_after_reset() {
        let packets = encode_ramp(AudioEncoderConfig::g723_1(), 240);
        let mut decoder = AudioDecoder::new(AudioDecoderConfig::g723_1()).unwrap();

        let before = decoder.decode(&packets[0]).unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].samples, 240);

        decoder.reset();

        let after = decoder.decode(&packets[0]).unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].samples, 240);
        assert_eq!(after[0].sample_rate, 8000);
    }

    #[test]
    fn flush_on_idle_decoder_is_empty() {
        let mut decoder = AudioDecoder::new(AudioDecoderConfig::g723_1()).unwrap();
        assert!(decoder.flush().unwrap().is_empty());
    }
}
