use crate::errors::ServiceError;

/// Hands out increasing ids for one entity type.
///
/// Seeded from the highest id present when the table is loaded; deleting a
/// record never lowers the counter, so an id is not handed out twice while
/// the process lives. The counter never wraps: once it cannot advance past
/// `i64::MAX`, allocation fails instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next: i64,
}

impl IdAllocator {
    pub fn seeded<I: IntoIterator<Item = i64>>(ids: I) -> Result<Self, ServiceError> {
        let next = match ids.into_iter().max() {
            Some(max) => max.checked_add(1).ok_or(ServiceError::IdOverflow { last: max })?,
            None => 1,
        };
        Ok(Self { next })
    }

    /// The id the next `allocate` call will return.
    pub fn peek(&self) -> i64 {
        self.next
    }

    /// Return the next id and advance; leaves the counter untouched on failure.
    pub fn allocate(&mut self) -> Result<i64, ServiceError> {
        let id = self.next;
        self.next = id.checked_add(1).ok_or(ServiceError::IdOverflow { last: id })?;
        Ok(id)
    }
}
