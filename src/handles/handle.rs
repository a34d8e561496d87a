use crate::framework::{Owned, OwnershipError, Resource};

/// Trait for resource-specific handles to inherit standard accessors.
///
/// This trait reduces boilerplate by providing default implementations for
/// the operations every handle supports (emptiness checks, borrowing the
/// resource with a typed error, early release) on top of two accessors the
/// handle supplies.
pub trait Handle {
    /// The resource type behind this handle.
    type Resource: Resource;

    /// The handle-specific error type.
    type Error: From<OwnershipError>;

    /// Access the inner generic wrapper.
    fn owned(&self) -> &Owned<Self::Resource>;

    /// Mutably access the inner generic wrapper.
    fn owned_mut(&mut self) -> &mut Owned<Self::Resource>;

    /// True when the handle holds no resource (moved-from or released).
    fn is_empty(&self) -> bool {
        self.owned().is_empty()
    }

    /// Borrows the resource, failing with the domain's own error when empty.
    fn resource(&self) -> Result<&Self::Resource, Self::Error> {
        self.owned().get().ok_or_else(|| OwnershipError::Empty.into())
    }

    /// Mutably borrows the resource, failing when empty.
    fn resource_mut(&mut self) -> Result<&mut Self::Resource, Self::Error> {
        self.owned_mut()
            .get_mut()
            .ok_or_else(|| OwnershipError::Empty.into())
    }

    /// Releases the resource now instead of waiting for drop. No-op when empty.
    fn release_now(&mut self) {
        self.owned_mut().release_now();
    }
}
