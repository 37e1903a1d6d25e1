// src/core/mod.rs

pub mod grid;
pub mod net;
pub mod sanitize;
pub mod tokenizer;

pub use grid::{Cell, Document, Row, Table};
