//! Domain layer - Entities, value objects, and business rules.
//!
//! Pure logic with no I/O: month-precision dates, the subscription entity,
//! and the filter and patch types the persistence ports accept.

pub mod foundation;
pub mod subscription;
