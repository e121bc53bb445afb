//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys read back by the test capture layer
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

// Cache outcome for reconstruct-from-row ("hit" refreshes, "miss" inserts)
pub const CACHE_HIT: &str = "hit";
pub const CACHE_MISS: &str = "miss";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
