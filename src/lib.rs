//! # pos
//!
//! A parser for the pos trajectory format.
//!
//! Pos files are line-oriented trajectory dumps produced by particle
//! simulation tools: per-frame `data` blocks (terminated by `done`) carrying
//! per-particle observables, and per-frame `box` blocks (terminated by `eof`)
//! carrying cell geometry and `def` shape declarations. Files are append-only
//! and frequently truncated mid-write, so the parser indexes and repairs the
//! tag structure before materializing anything.
//!
//! The pipeline is: tag scan (byte offsets of every structural line) ->
//! stream alignment (repairing mismatched open/close tags) -> frame index ->
//! dense zero-padded extraction. See `pos::file::PosFile` for the entry
//! point.

pub mod pos;
