/*!
    Audio encoding over libavcodec.

    This crate turns raw PCM frames into compressed packets. It's the inverse
    of decode: taking interleaved samples and producing G.723.1 or G.711
    bitstreams.

    # Audio Encoding

    ```ignore
    use ffmpeg_encode::{AudioEncoder, AudioEncoderConfig};
    use ffmpeg_types::{AudioFrame, ChannelLayout};

    // G.723.1 at 6.3 kbit/s, 8 kHz mono
    let mut encoder = AudioEncoder::new(AudioEncoderConfig::g723_1())?;

    // One 30 ms frame
    let frame = AudioFrame::from_s16(&pcm[..240], 8000, ChannelLayout::Mono)?;
    for packet in encoder.encode(&frame)? {
        // 24 bytes per frame
    }

    // Flush remaining packets
    let final_packets = encoder.flush()?;
    ```

    # Frame Requirements

    Some codecs consume a fixed number of samples per frame:

    - **G.723.1**: exactly 240 samples, S16, 8 kHz mono
    - **G.711 (mu-law / A-law)**: any number of S16 samples

    `AudioEncoder::frame_size` reports the requirement after opening.
*/

pub use ffmpeg_types::{
    AudioFrame, AudioStreamInfo, ChannelLayout, CodecId, Error, Packet, Rational, Result,
    SampleFormat,
};

mod audio;
mod config;

pub use audio::AudioEncoder;
pub use config::AudioEncoderConfig;
