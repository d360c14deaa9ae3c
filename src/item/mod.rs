#[cfg(feature = "logger")]
/// This module provides an item observer logging every parsed item.
pub mod logger;
