use crate::model::ProcessingInstruction;

/// Instruction prefix that redirects the rendered document to another target.
pub const TARGET_PREFIX: &str = "seqdraw";
/// Instruction prefix that selects one of the named style tables.
pub const STYLE_PREFIX: &str = "seqdraw-style";

/// Diagram-level settings carried by processing instructions.
///
/// When the same prefix appears more than once the last instruction wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    pub output_target: Option<String>,
    /// Style name as written; validated by whoever owns the style tables.
    pub style: Option<String>,
}

impl Directives {
    pub fn from_instructions(instructions: &[ProcessingInstruction]) -> Self {
        let mut out = Self::default();
        for pi in instructions {
            let value = pi.value.trim();
            if value.is_empty() {
                tracing::warn!(prefix = %pi.prefix, "ignoring processing instruction with empty value");
                continue;
            }
            match pi.prefix.trim() {
                TARGET_PREFIX => out.output_target = Some(value.to_string()),
                STYLE_PREFIX => out.style = Some(value.to_string()),
                other => {
                    tracing::warn!(prefix = %other, "ignoring unknown processing instruction");
                }
            }
        }
        tracing::debug!(?out, "expanded processing instructions");
        out
    }
}
