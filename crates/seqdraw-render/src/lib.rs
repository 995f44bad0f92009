#![forbid(unsafe_code)]

//! Headless layout and SVG rendering for sequence diagrams.
//!
//! A render is one synchronous pass:
//! 1. [`sequence::layout_sequence_diagram`] places every element of a [`Diagram`] on a
//!    [`grid::Grid`] and resolves the grid lines from the elements' size constraints.
//! 2. [`sequence::SequenceDiagramLayout::draw`] asks each element to draw itself at its
//!    resolved anchor, producing a [`canvas::Canvas`].
//! 3. [`svg`] serializes the canvas.
//!
//! Nothing is shared between renders; every call builds its own grid and canvas.

pub mod canvas;
pub mod graphbox;
pub mod grid;
pub mod sequence;
pub mod styles;
pub mod svg;
pub mod text;

use crate::sequence::SequenceDiagramLayout;
use crate::styles::DiagramStyles;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use seqdraw_core::Diagram;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] seqdraw_core::Error),
    #[error("failed to write SVG: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    /// Repeat the actor row below the last event.
    pub mirror_actors: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            mirror_actors: false,
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("mirror_actors", &self.mirror_actors)
            .finish_non_exhaustive()
    }
}

pub fn layout_diagram(
    diagram: &Diagram,
    styles: &DiagramStyles,
    options: &LayoutOptions,
) -> Result<SequenceDiagramLayout> {
    sequence::layout_sequence_diagram(diagram, styles, options)
}
