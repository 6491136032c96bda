//! ReleaseInfo query
//!
//! Looks up a release by its edition contract address, optionally narrowed to
//! one edition id on multi-edition contracts.

use crate::graphql::{Operation, OperationKind};
use serde::{Deserialize, Serialize};

/// Query for release metadata by contract address
#[derive(Debug, Clone, Copy)]
pub struct ReleaseInfo;

/// Variables for [`ReleaseInfo`]
///
/// `editionId` is always sent, as `null` when not given.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseInfoVariables {
    pub contract_address: String,
    pub edition_id: Option<String>,
}

impl ReleaseInfoVariables {
    pub fn new(contract_address: impl Into<String>) -> Self {
        ReleaseInfoVariables {
            contract_address: contract_address.into(),
            edition_id: None,
        }
    }

    pub fn with_edition_id(mut self, edition_id: impl Into<String>) -> Self {
        self.edition_id = Some(edition_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseInfoData {
    /// `None` when no release exists for the contract
    pub release: Option<Release>,
}

/// Release as selected by [`ReleaseInfo`]
///
/// Every field is optional: a field whose resolver failed comes back `null`
/// next to an entry in `errors`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Release {
    pub id: Option<String>,
    pub title: Option<String>,
    pub behind_the_music: Option<String>,
    pub contract_address: Option<String>,
    pub edition_id: Option<String>,
    pub external_url: Option<String>,
    pub cover_image: Option<MediaImage>,
    pub artist: Option<ArtistSummary>,
    pub track: Option<TrackSummary>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaImage {
    pub id: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub sound_handle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackSummary {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Length in seconds
    pub duration: Option<f64>,
}

impl Operation for ReleaseInfo {
    const NAME: &'static str = "ReleaseInfo";
    const KIND: OperationKind = OperationKind::Query;
    const DOCUMENT: &'static str = r"query ReleaseInfo($contractAddress: Address!, $editionId: String) {
  release: releaseFromContract(contractAddress: $contractAddress, editionId: $editionId) {
    id
    title
    behindTheMusic
    contractAddress
    editionId
    externalUrl
    coverImage {
      id
      url
    }
    artist {
      id
      name
      soundHandle
    }
    track {
      id
      title
      duration
    }
  }
}";

    type Variables = ReleaseInfoVariables;
    type Data = ReleaseInfoData;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_edition_id_sent_as_null() {
        let vars = ReleaseInfoVariables::new("0xcontract");
        assert_eq!(
            serde_json::to_value(vars).unwrap(),
            json!({ "contractAddress": "0xcontract", "editionId": null })
        );
    }

    #[test]
    fn test_edition_id_sent_when_given() {
        let vars = ReleaseInfoVariables::new("0xcontract").with_edition_id("3");
        assert_eq!(
            serde_json::to_value(vars).unwrap(),
            json!({ "contractAddress": "0xcontract", "editionId": "3" })
        );
    }

    #[test]
    fn test_data_with_sparse_release() {
        let data: ReleaseInfoData = serde_json::from_value(json!({
            "release": {
                "id": "r1",
                "title": "Night Drive",
                "artist": { "id": "a1", "name": "Nova" },
                "track": { "id": "t1", "title": "Night Drive", "duration": 212 }
            }
        }))
        .unwrap();

        let release = data.release.unwrap();
        assert_eq!(release.title.as_deref(), Some("Night Drive"));
        assert!(release.cover_image.is_none());
        assert_eq!(release.artist.unwrap().name.as_deref(), Some("Nova"));
        assert_eq!(release.track.unwrap().duration, Some(212.0));
    }

    #[test]
    fn test_nulled_fields_are_tolerated() {
        let data: ReleaseInfoData = serde_json::from_value(json!({
            "release": { "id": "r1", "title": null, "artist": { "id": "a1", "name": null } }
        }))
        .unwrap();

        let release = data.release.unwrap();
        assert_eq!(release.id.as_deref(), Some("r1"));
        assert!(release.title.is_none());
        assert!(release.artist.unwrap().name.is_none());
    }

    #[test]
    fn test_missing_release() {
        let data: ReleaseInfoData = serde_json::from_value(json!({ "release": null })).unwrap();
        assert!(data.release.is_none());
    }
}
