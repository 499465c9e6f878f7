//! Common type aliases used throughout the runtime.

/// Unix timestamp in seconds
pub type Timestamp = i64;

/// Byte offset in a log file
pub type ByteOffset = u64;

/// Version tag carried by persisted records and state blobs
pub type SchemaVersion = u16;
