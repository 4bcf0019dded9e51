//! Request handlers, grouped by page.

pub mod pages;
