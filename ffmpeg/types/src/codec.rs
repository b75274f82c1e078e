/*!
    Codec identifiers.
*/

use std::{fmt, str::FromStr};

use crate::error::ParseError;

/**
    Audio codecs the round-trip crates know how to configure.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodecId {
    /// ITU-T G.723.1 dual-rate speech codec (8 kHz mono, 30 ms frames)
    G723_1,
    /// ITU-T G.711 mu-law
    PcmMulaw,
    /// ITU-T G.711 A-law
    PcmAlaw,
}

impl CodecId {
    pub const ALL: [CodecId; 3] = [Self::G723_1, Self::PcmMulaw, Self::PcmAlaw];

    /**
        Returns the canonical lower-case name, as accepted by `FromStr`.
    */
    pub const fn name(self) -> &'static str {
        match self {
            Self::G723_1 => "g723_1",
            Self::PcmMulaw => "pcm_mulaw",
            Self::PcmAlaw => "pcm_alaw",
        }
    }

    /**
        Returns the number of samples per channel the codec consumes per
        frame, or `None` if it accepts any frame length.
    */
    pub const fn native_frame_size(self) -> Option<usize> {
        match self {
            Self::G723_1 => Some(240),
            Self::PcmMulaw | Self::PcmAlaw => None,
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::G723_1 => "G723_1",
            Self::PcmMulaw => "PCM_MULAW",
            Self::PcmAlaw => "PCM_ALAW",
        };
        f.write_str(label)
    }
}

impl FromStr for CodecId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "g723_1" | "g723.1" | "g7231" => Ok(Self::G723_1),
            "pcm_mulaw" | "mulaw" | "ulaw" => Ok(Self::PcmMulaw),
            "pcm_alaw" | "alaw" => Ok(Self::PcmAlaw),
            _ => Err(ParseError {
                kind: "codec",
                value: s.to_string(),
            }),
        }
    }
}
