// src/specs/mod.rs
//! # Page readers
//!
//! One module per ISODISTORT page the pipeline has to read. Each one knows
//! *where the next request's fields live in that page* and turns the page
//! into a [`FormData`](crate::core::form::FormData) (or a filename / message).
//!
//! ## What lives here
//! - **Pure text functions** over a response body. No I/O, no logging beyond
//!   a warning when a page looks emptier than it should.
//! - **Marker choice**: which line opens and closes the region a step scrapes
//!   (`Method 3` … `Method 4`, `<FORM ACTION` … `<br>`, …).
//! - **Merging** of scraped fields with the user's choices for that step.
//!
//! ## What does **not** live here
//! - **Requests and ordering**: `runner` decides what to send where.
//! - **Persistence**: `file` writes outputs and archives.
//!
//! ## Typical call chain
//! ```text
//! runner::run → transport.post_form(..) → specs::<page>::collect(doc, ..)
//!                                       ↘ FormData for the next POST
//! ```
//!
//! ## Conventions
//! - Markers are matched **case-insensitively**, on whole lines: a region is
//!   the lines *after* the line holding the opening marker, *through* the
//!   line holding the closing one.
//! - Missing opening markers are errors (`MarkerNotFound`), never silently
//!   empty forms.
//! - Test offline against synthetic snippets and the saved pages in
//!   `tests/fixtures`.
pub mod display;
pub mod distort;
pub mod method;
pub mod subgroup;
pub mod upload;
