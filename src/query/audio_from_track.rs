//! AudioFromTrack query

use crate::graphql::{Operation, OperationKind};
use serde::{Deserialize, Serialize};

/// Query for the playable audio of a track
#[derive(Debug, Clone, Copy)]
pub struct AudioFromTrack;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFromTrackVariables {
    pub track_id: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioFromTrackData {
    pub audio_from_track: Option<TrackAudio>,
}

/// Nulled fields mean their resolver failed; see the response `errors`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackAudio {
    pub id: Option<String>,
    /// Length in seconds
    pub duration: Option<f64>,
    /// Full audio, only present once revealed to the caller
    pub audio: Option<AudioMedia>,
    /// Preview clip
    pub audio_preview: Option<AudioMedia>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioMedia {
    pub id: Option<String>,
    pub url: Option<String>,
}

impl Operation for AudioFromTrack {
    const NAME: &'static str = "AudioFromTrack";
    const KIND: OperationKind = OperationKind::Query;
    const DOCUMENT: &'static str = r"query AudioFromTrack($trackId: UUID!) {
  audioFromTrack(trackId: $trackId) {
    id
    duration
    audio {
      id
      url
    }
    audioPreview {
      id
      url
    }
  }
}";

    type Variables = AudioFromTrackVariables;
    type Data = AudioFromTrackData;
}
