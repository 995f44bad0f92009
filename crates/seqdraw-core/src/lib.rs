#![forbid(unsafe_code)]

//! Sequence diagram model and geometry (headless).
//!
//! This crate holds everything the layout engine consumes but does not compute: the diagram
//! model handed over by a front-end, processing-instruction directives, and the integer geometry
//! primitives shared by layout and drawing.

pub mod directives;
pub mod error;
pub mod geom;
pub mod model;

pub use directives::Directives;
pub use error::{Error, Result};
pub use model::{
    Actor, Arrow, ArrowDirection, ArrowHead, ArrowStem, BlockSegment, BlockStart, Diagram, Divider,
    DividerType, Event, Message, Note, NotePosition, ProcessingInstruction,
};

#[cfg(test)]
mod tests;
