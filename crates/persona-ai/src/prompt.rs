//! System prompt assembly.

use persona_common::defaults::DEFAULT_PREAMBLE;

use crate::records::Instruction;

const INSTRUCTIONS_HEADER: &str = "\n\nFollow these specific instructions:\n- ";
const BULLET_SEPARATOR: &str = "\n- ";

/// Builds the system prompt from the persona preamble and the current instructions.
#[derive(Debug, Clone)]
pub struct SystemPromptBuilder {
    preamble: String,
}

impl SystemPromptBuilder {
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
        }
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Preamble alone when no instruction has text, otherwise the preamble
    /// followed by one bullet per instruction in the order given.
    pub fn build(&self, instructions: &[Instruction]) -> String {
        let texts: Vec<&str> = instructions
            .iter()
            .map(|i| i.instruction_text.trim())
            .filter(|t| !t.is_empty())
            .collect();

        if texts.is_empty() {
            return self.preamble.clone();
        }

        format!(
            "{}{INSTRUCTIONS_HEADER}{}",
            self.preamble,
            texts.join(BULLET_SEPARATOR)
        )
    }
}

impl Default for SystemPromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PREAMBLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instruction(id: i64, text: &str) -> Instruction {
        Instruction {
            id,
            instruction_text: text.into(),
        }
    }

    #[test]
    fn no_instructions_yields_preamble() {
        let builder = SystemPromptBuilder::new("You are Luis.");
        assert_eq!(builder.build(&[]), "You are Luis.");
    }

    #[test]
    fn instructions_are_bulleted_in_order() {
        let builder = SystemPromptBuilder::new("You are Luis.");
        let prompt = builder.build(&[
            instruction(1, "Speak Spanish"),
            instruction(2, "Keep it short"),
        ]);
        assert_eq!(
            prompt,
            "You are Luis.\n\nFollow these specific instructions:\n- Speak Spanish\n- Keep it short"
        );
    }

    #[test]
    fn blank_instructions_are_skipped() {
        let builder = SystemPromptBuilder::new("P");
        assert_eq!(builder.build(&[instruction(1, "  ")]), "P");
        assert_eq!(
            builder.build(&[instruction(1, " "), instruction(2, " Be kind ")]),
            "P\n\nFollow these specific instructions:\n- Be kind"
        );
    }

    #[test]
    fn default_uses_builtin_preamble() {
        assert_eq!(SystemPromptBuilder::default().preamble(), DEFAULT_PREAMBLE);
    }
}
