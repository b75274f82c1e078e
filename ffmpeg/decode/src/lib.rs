/*!
    Audio decoding over libavcodec.

    This crate turns compressed packets back into raw PCM frames. Planar
    decoder output is interleaved, so every frame handed out is packed.
*/

pub use ffmpeg_types::{AudioFrame, ChannelLayout, CodecId, Error, Packet, Result, SampleFormat};

mod audio;
mod config;

pub use audio::AudioDecoder;
pub use config::AudioDecoderConfig;
