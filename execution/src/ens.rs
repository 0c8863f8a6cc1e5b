use bearcave_types::Address;
use std::future::Future;

/// Reverse lookup of a display name for an address. This is cosmetic
/// enrichment only: resolution failures are logged and swallowed by the
/// caller, and accounting never waits on or rolls back for a name.
pub trait NameResolver {
    /// `Ok(None)` means the address has no name set; `Err` means the
    /// lookup itself failed.
    fn resolve(&self, address: &Address)
        -> impl Future<Output = Result<Option<String>, String>>;
}

/// Resolver for deployments without a name service.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResolver;

impl NameResolver for NoResolver {
    async fn resolve(&self, _: &Address) -> Result<Option<String>, String> {
        Ok(None)
    }
}
