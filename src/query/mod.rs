//! GraphQL queries exposed by the client
//!
//! Each query is a unit struct implementing [`Operation`], pairing the
//! document with its variables and data types.

use crate::graphql::{GraphQLError, Operation, OperationKind};
use serde::Serialize;
use serde_json::{Map, Value};

pub mod audio_from_track;
pub mod release_info;

pub use audio_from_track::{AudioFromTrack, AudioFromTrackData, AudioFromTrackVariables, AudioMedia, TrackAudio};
pub use release_info::{
    ArtistSummary, MediaImage, Release, ReleaseInfo, ReleaseInfoData, ReleaseInfoVariables,
    TrackSummary,
};

/// Health check; any successful envelope means the API is reachable
#[derive(Debug, Clone, Copy)]
pub struct Test;

/// `Test` takes no variables
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoVariables {}

impl Operation for Test {
    const NAME: &'static str = "Test";
    const KIND: OperationKind = OperationKind::Query;
    const DOCUMENT: &'static str = r"query Test {
  __typename
}";

    type Variables = NoVariables;
    type Data = Map<String, Value>;
}

/// Errors reported by the health check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckErrors {
    pub errors: Vec<GraphQLError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared_as_query<O: Operation>() -> bool {
        O::KIND == OperationKind::Query
            && O::DOCUMENT
                .trim_start()
                .starts_with(&format!("query {}", O::NAME))
    }

    #[test]
    fn test_documents_are_named_queries() {
        assert!(declared_as_query::<Test>());
        assert!(declared_as_query::<ReleaseInfo>());
        assert!(declared_as_query::<AudioFromTrack>());
    }
}
