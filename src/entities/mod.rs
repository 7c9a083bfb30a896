//! Persisted record types, as Sea-ORM entities.
//!
//! The admin layer never issues SQL of its own; everything goes through
//! these entities and the query builder.

pub mod assignment_history;
pub mod audit_log;
pub mod employee;
pub mod kinds;
pub mod leave_request;
pub mod leave_type;
pub mod patient;
pub mod procedure;
pub mod procedure_type;
pub mod shift_template;
pub mod work_calendar;
pub mod work_location;
