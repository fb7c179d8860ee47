// src/specs/mod.rs
//! # Page specs
//!
//! Pure readers for the roster site's pages. Each spec knows *where the
//! ground truth lives in the HTML* of one page and turns a [`Document`]
//! into typed data. Nothing here touches the browser, sleeps or logs above
//! `debug`; the assembler decides when pages are captured and what to do
//! with a failed read.
//!
//! - `month`: calendar month page → [`MonthShifts`](crate::roster::MonthShifts).
//! - `postback`: hidden WebForms state fields, for transports that post
//!   forms directly instead of driving a browser.
//!
//! Specs are testable offline against saved HTML.
//!
//! [`Document`]: crate::core::Document
pub mod month;
pub mod postback;
