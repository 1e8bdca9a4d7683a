//! Subjects, study sessions and the weekly progress calculator.
//!
//! No HTTP or database code lives here. The API, the SQLite store and the
//! terminal client all report progress through [`progress`].

// `StudyStore` spells out `Send` futures itself.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod memory;
pub mod progress;
pub mod session;
pub mod store;
pub mod subject;

pub use error::{Error, Result};
