//! External collaborators: face-attribute service and health-data source

use crate::{AnalysisError, FaceAttributes, HeartRateReading};

/// Face-attribute detection service
#[trait_variant::make(FaceAttributeProvider: Send)]
pub trait LocalFaceAttributeProvider {
    /// Provider name, used in logs and errors
    fn name(&self) -> &str;

    /// Detect faces in an encoded image; zero records when no face is found
    async fn detect(&self, image: &[u8]) -> Result<Vec<FaceAttributes>, AnalysisError>;
}

/// Health-data source
#[trait_variant::make(HeartRateSource: Send)]
pub trait LocalHeartRateSource {
    fn name(&self) -> &str;

    /// Most recent reading, `None` when the user has no data
    async fn latest(&self) -> Result<Option<HeartRateReading>, AnalysisError>;
}
