use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// Records identified by a unique, immutable name
pub trait Named {
    fn name(&self) -> &str;
}

/// Reference data seeded from bundled resources
pub trait DefaultEntity:
    Named + Validate + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Label used in logs and repository tree names
    const KIND: &'static str;

    /// Persistence identity
    fn id(&self) -> Uuid;

    /// Copy every field of `incoming` onto `self`, keeping `self`'s identity.
    fn overwrite_with(&mut self, incoming: Self);
}
