use swing_domain::{GolferProfile, MetadataFeatures, SwingMetadata};
use swing_registry::{GolferRegistry, GolferStore, RegistryError};
use tracing::warn;

/// Combines a recording's sidecar with the registered golfer's profile.
pub struct MetadataJoiner<'a, S: GolferStore> {
    registry: &'a GolferRegistry<S>,
}

impl<'a, S: GolferStore> MetadataJoiner<'a, S> {
    pub fn new(registry: &'a GolferRegistry<S>) -> Self {
        Self { registry }
    }

    /// Unknown golfers get [`GolferProfile::fallback`] and a warning; only a
    /// failing registry is an error.
    pub fn join(&self, metadata: &SwingMetadata) -> Result<MetadataFeatures, RegistryError> {
        let profile = match metadata.golfer_id.as_deref() {
            Some(golfer_id) => self.registry.lookup(golfer_id)?,
            None => None,
        };
        let profile = profile.unwrap_or_else(|| {
            warn!(
                golfer_id = metadata.golfer_id.as_deref().unwrap_or("<none>"),
                swing_id = %metadata.swing_id,
                "no golfer data, using default profile"
            );
            GolferProfile::fallback()
        });
        Ok(MetadataFeatures::from_parts(&profile, metadata))
    }
}
