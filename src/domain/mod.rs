//! Domain types and pure logic: records, claims, validation, and the
//! display-state derivation.

pub mod claim;
pub mod ports;
pub mod registration;
