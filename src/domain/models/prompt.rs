//! Bounded prompt sent to the generative model.

use std::fmt::Write as _;

/// A file selected for inclusion in a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFile {
    pub path: String,
    pub content: String,
}

/// Instruction plus the budget-bounded subset of project files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    /// Natural-language task description
    pub instruction: String,

    /// Selected files in inclusion order
    pub files: Vec<PromptFile>,

    /// Sum of selected content sizes (never above `budget`)
    pub total_size: usize,

    /// Budget the selection was made under
    pub budget: usize,

    /// Paths left out of the prompt, sorted
    pub omitted: Vec<String>,
}

impl AssembledPrompt {
    /// Render selected files as tagged blocks.
    pub fn tagged_files(&self) -> String {
        let mut out = String::with_capacity(self.total_size + self.files.len() * 32);
        for file in &self.files {
            let _ = writeln!(out, "<file path=\"{}\">", file.path);
            out.push_str(&file.content);
            if !file.content.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("</file>\n");
        }
        out
    }

    /// Full user message: instruction followed by the tagged files.
    pub fn user_message(&self) -> String {
        let mut message = self.instruction.clone();
        message.push_str("\n\n<project>\n");
        message.push_str(&self.tagged_files());
        message.push_str("</project>");
        if !self.omitted.is_empty() {
            let _ = write!(
                message,
                "\n\n{} file(s) were omitted to stay within the size budget.",
                self.omitted.len()
            );
        }
        message
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> AssembledPrompt {
        AssembledPrompt {
            instruction: "Fix it.".to_string(),
            files: vec![
                PromptFile {
                    path: "package.json".to_string(),
                    content: "{}".to_string(),
                },
                PromptFile {
                    path: "src/index.js".to_string(),
                    content: "console.log(1);\n".to_string(),
                },
            ],
            total_size: 18,
            budget: 100,
            omitted: vec!["big.json".to_string()],
        }
    }

    #[test]
    fn test_tagged_files() {
        let tagged = prompt().tagged_files();
        assert!(tagged.starts_with("<file path=\"package.json\">\n{}\n</file>\n"));
        assert!(tagged.contains("<file path=\"src/index.js\">\nconsole.log(1);\n</file>\n"));
    }

    #[test]
    fn test_user_message_mentions_omissions() {
        let message = prompt().user_message();
        assert!(message.starts_with("Fix it."));
        assert!(message.contains("<project>"));
        assert!(message.contains("1 file(s) were omitted"));
    }
}
