//! Server-to-client WebSocket frames.
//!
//! Every frame starts with a tag byte:
//! - `0`: survey snapshot or update, followed by an encoded survey
//! - `1`: presence count, followed by a big-endian `u32`

use super::error::FrameError;

pub const SURVEY_UPDATE_TAG: u8 = 0;
pub const PRESENCE_TAG: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Encoded survey, forwarded as-is.
    SurveyUpdate(Vec<u8>),
    /// Number of registered connections.
    Presence(u32),
}

impl Frame {
    pub fn tag(&self) -> u8 {
        match self {
            Frame::SurveyUpdate(_) => SURVEY_UPDATE_TAG,
            Frame::Presence(_) => PRESENCE_TAG,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![self.tag()];
        match self {
            Frame::SurveyUpdate(survey) => buf.extend_from_slice(survey),
            Frame::Presence(count) => buf.extend_from_slice(&count.to_be_bytes()),
        }
        buf
    }

    pub fn decode(data: &[u8]) -> Result<Self, FrameError> {
        let Some((&tag, body)) = data.split_first() else {
            return Err(FrameError::Empty);
        };
        match tag {
            SURVEY_UPDATE_TAG => Ok(Frame::SurveyUpdate(body.to_vec())),
            PRESENCE_TAG => {
                let count: [u8; 4] = body
                    .try_into()
                    .map_err(|_| FrameError::InvalidPresenceLength(body.len()))?;
                Ok(Frame::Presence(u32::from_be_bytes(count)))
            }
            other => Err(FrameError::UnknownTag(other)),
        }
    }
}

/// Encoded presence frame for `count` connections, saturating at `u32::MAX`.
pub fn presence_frame(count: usize) -> Vec<u8> {
    Frame::Presence(u32::try_from(count).unwrap_or(u32::MAX)).encode()
}
