//! Capability trait for values that own an external resource.

/// A value that exclusively owns a separately allocated resource and can
/// release it on demand.
///
/// [`ChainedHashMap::release_all`](crate::ChainedHashMap::release_all) is
/// bounded on this trait, so the bulk-release path exists only for value
/// types that declare ownership; calling it on a plain scalar value type is
/// a compile error rather than a caller obligation.
///
/// `release` consumes the handle. It must perform whatever cleanup plain
/// `drop` would not: closing a raw FFI handle, returning an id to an
/// external registry, and so on. Implementations for types whose `Drop`
/// already frees the resource (like [`Box`]) are empty.
pub trait OwnedHandle {
    /// Release the owned resource exactly once.
    fn release(self);
}

/// Dropping a `Box` is the release.
impl<T: ?Sized> OwnedHandle for Box<T> {
    fn release(self) {}
}
