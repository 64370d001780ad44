//! Command handlers organized by operation family.
//!
//! | Module | Commands | Store calls |
//! |--------|----------|-------------|
//! | `document` | Read, Insert, Update, UpdateField, Delete | get, insert, replace, remove |
//! | `scan` | Scan, ScanField | none |

pub mod document;
pub mod scan;
