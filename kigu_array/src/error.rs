use thiserror::Error;

/// Error types for `RawArray` and `Array` operations
///
/// Every fail-fast operation has a `try_*` sibling that reports these
/// instead of panicking.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ArrayError {
    /// The allocator returned no memory for the requested block
    #[error("Failed to allocate memory: {bytes} bytes requested")]
    AllocationFailed {
        /// Size of the header plus payload block that was requested
        bytes: usize,
    },
    /// The requested capacity does not fit in the address space
    #[error("Capacity overflow: {space} slots of {element_size} bytes")]
    CapacityOverflow {
        /// Number of slots requested
        space: usize,
        /// Size of one slot in bytes
        element_size: usize,
    },
    /// Index is beyond the current array length
    #[error("Index out of bounds: index {index} is beyond array length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Current length of the array
        length: usize,
    },
    /// Operation attempted on an empty array
    #[error("Operation on empty array")]
    EmptyArray,
    /// A slot layout or capacity parameter was rejected
    #[error("Invalid array configuration: {parameter} = {value}")]
    InvalidConfiguration {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Provided value
        value: usize,
    },
}
