/*!
    Shared types for the audio codec round-trip crates.

    This crate defines the vocabulary that crosses crate boundaries: sample
    formats, channel layouts, codec identifiers, frames, packets and errors.
    It has no dependency on FFmpeg, so the wrapper and its tests can reason
    about buffers without linking libavcodec.
*/

mod codec;
mod error;
mod format;
mod frame;
mod packet;
mod stream;

pub use self::codec::CodecId;
pub use self::error::{Error, ParseError, Result};
pub use self::format::{ChannelLayout, SampleFormat};
pub use self::frame::AudioFrame;
pub use self::packet::{MediaDuration, Packet, Pts, Rational};
pub use self::stream::AudioStreamInfo;
