//! Prompt assembly under a content budget.
//!
//! Two passes fill the budget:
//!
//! 1. Well-known manifest and config files, in [`PRIORITY_FILES`] order.
//!    A file that does not fit the remaining budget is skipped and the pass
//!    moves on to the next name.
//! 2. Source-like files in lexicographic order, excluding every priority name.
//!    The first file that does not fit ends the pass, even if later
//!    candidates are smaller.
//!
//! Content is never truncated. Sizes are measured in bytes.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::domain::models::{AssembledPrompt, ProjectFileSet, PromptFile};

/// Default content budget per prompt.
pub const DEFAULT_PROMPT_BUDGET: usize = 200_000;

/// Manifest and config files included before anything else.
pub const PRIORITY_FILES: &[&str] = &[
    ".replit",
    "replit.nix",
    "package.json",
    "requirements.txt",
    "pyproject.toml",
    "Pipfile",
    "setup.py",
    "poetry.lock",
    "go.mod",
    "Cargo.toml",
    "Gemfile",
    "composer.json",
    "pom.xml",
    "build.gradle",
    "Dockerfile",
    "docker-compose.yml",
    "Procfile",
    "render.yaml",
    "runtime.txt",
    ".python-version",
    ".nvmrc",
    "tsconfig.json",
    "vite.config.js",
    "vite.config.ts",
    "next.config.js",
    "next.config.mjs",
];

const SOURCE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "py", "go", "rs", "rb", "php", "java", "kt", "cs",
    "json", "toml", "yaml", "yml", "html", "css", "scss", "vue", "svelte", "sh", "nix", "cfg",
    "ini",
];

const BUILD_OUTPUT_DIRS: &[&str] = &[
    "dist", "build", "out", ".next", ".nuxt", ".output", "target", "coverage", ".cache",
];

const DEPENDENCY_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    "venv",
    ".venv",
    "__pycache__",
    ".pythonlibs",
    ".upm",
    ".git",
    "bower_components",
];

const TEST_DIRS: &[&str] = &["test", "tests", "__tests__", "spec", "__mocks__"];

const INSTRUCTION: &str = "\
You are preparing a Replit project for deployment on Render.

Do two things:

1. Find and fix every issue that would stop this project from building or \
starting on Render. Typical problems: servers bound to localhost or a fixed \
port instead of 0.0.0.0 and the PORT environment variable, missing or \
incomplete dependency manifests, Replit-only configuration, missing start \
scripts, hard-coded paths. For every file you change or create, return its \
COMPLETE corrected content in `fixedFiles` (never a diff or a fragment). \
Use paths relative to the project root exactly as shown below. If nothing \
needs changing, return an empty `fixedFiles` array.

2. Write a `render.yaml` blueprint for the project as it will look AFTER your \
fixes are applied, together with the build command, the start command (empty \
if not applicable), a short classification of the project type and a concise \
explanation of what you found and changed.

Respond only through the `submit_deployment_plan` tool.";

/// Selects the files sent to the model on each iteration.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    budget: usize,
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_BUDGET)
    }
}

impl PromptAssembler {
    pub fn new(budget: usize) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Build the bounded prompt for `files`. Does not modify the set.
    pub fn assemble(&self, files: &ProjectFileSet) -> AssembledPrompt {
        let mut selected: Vec<PromptFile> = Vec::new();
        let mut included: HashSet<&str> = HashSet::new();
        let mut remaining = self.budget;

        for &name in PRIORITY_FILES {
            let Some(content) = files.get(name) else {
                continue;
            };
            if content.len() > remaining {
                debug!(path = name, size = content.len(), remaining, "priority file skipped");
                continue;
            }
            remaining -= content.len();
            included.insert(name);
            selected.push(PromptFile {
                path: name.to_string(),
                content: content.to_string(),
            });
        }

        // ProjectFileSet iterates in sorted order
        for (path, content) in files.iter() {
            // priority names had their turn, fitted or not
            if PRIORITY_FILES.contains(&path) || !is_source_candidate(path) {
                continue;
            }
            if content.len() > remaining {
                debug!(path, size = content.len(), remaining, "budget reached");
                break;
            }
            remaining -= content.len();
            included.insert(path);
            selected.push(PromptFile {
                path: path.to_string(),
                content: content.to_string(),
            });
        }

        let omitted: Vec<String> = files
            .paths()
            .filter(|p| !included.contains(p))
            .map(str::to_string)
            .collect();

        AssembledPrompt {
            instruction: INSTRUCTION.to_string(),
            files: selected,
            total_size: self.budget - remaining,
            budget: self.budget,
            omitted,
        }
    }
}

/// Whether `path` is eligible for the source pass.
pub fn is_source_candidate(path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').collect();
    let Some((file_name, dirs)) = segments.split_last() else {
        return false;
    };

    if dirs.iter().any(|d| {
        BUILD_OUTPUT_DIRS.contains(d) || DEPENDENCY_DIRS.contains(d) || TEST_DIRS.contains(d)
    }) {
        return false;
    }

    if is_test_file(file_name) || is_license_or_readme(file_name) {
        return false;
    }

    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn is_test_file(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    lower.contains(".test.")
        || lower.contains(".spec.")
        || lower.starts_with("test_")
        || lower.ends_with("_test.go")
        || lower.ends_with("_test.py")
        || lower.ends_with("_test.rs")
}

fn is_license_or_readme(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    lower.starts_with("license") || lower.starts_with("licence") || lower.starts_with("readme")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(entries: &[(&str, &str)]) -> ProjectFileSet {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_priority_files_come_first_in_list_order() {
        let set = files(&[
            ("app.py", "print(1)"),
            ("requirements.txt", "flask"),
            (".replit", "run = \"python app.py\""),
        ]);

        let prompt = PromptAssembler::default().assemble(&set);
        let paths: Vec<&str> = prompt.paths().collect();
        assert_eq!(paths, vec![".replit", "requirements.txt", "app.py"]);
    }

    #[test]
    fn test_oversized_priority_file_is_skipped_not_truncated() {
        let big = "x".repeat(50);
        let set = files(&[
            ("package.json", big.as_str()),
            ("requirements.txt", "flask"),
        ]);

        let prompt = PromptAssembler::new(20).assemble(&set);
        let paths: Vec<&str> = prompt.paths().collect();
        assert_eq!(paths, vec!["requirements.txt"]);
        assert_eq!(prompt.omitted, vec!["package.json".to_string()]);
    }

    #[test]
    fn test_skipped_priority_file_does_not_end_source_pass() {
        let manifest = "m".repeat(150);
        let set = files(&[
            (".replit", "run"),
            ("package.json", manifest.as_str()),
            ("server.js", "listen()"),
            ("src/app.js", "1+1"),
        ]);

        let prompt = PromptAssembler::new(100).assemble(&set);
        let paths: Vec<&str> = prompt.paths().collect();
        assert_eq!(paths, vec![".replit", "server.js", "src/app.js"]);
        assert_eq!(prompt.total_size, 14);
        assert_eq!(prompt.omitted, vec!["package.json".to_string()]);
    }

    #[test]
    fn test_source_pass_stops_at_first_misfit() {
        let set = files(&[
            ("a.py", "1234"),
            ("b.py", "123456789"),
            ("c.py", "1"),
        ]);

        let prompt = PromptAssembler::new(10).assemble(&set);
        let paths: Vec<&str> = prompt.paths().collect();
        // c.py would fit but greedy selection stops at b.py
        assert_eq!(paths, vec!["a.py"]);
        assert_eq!(prompt.total_size, 4);
    }

    #[test]
    fn test_excluded_locations() {
        assert!(!is_source_candidate("node_modules/express/index.js"));
        assert!(!is_source_candidate("dist/bundle.js"));
        assert!(!is_source_candidate("src/__tests__/app.js"));
        assert!(!is_source_candidate("tests/test_app.py"));
        assert!(!is_source_candidate("src/app.test.ts"));
        assert!(!is_source_candidate("README.md"));
        assert!(!is_source_candidate("LICENSE"));
        assert!(!is_source_candidate("assets/logo.png"));
        assert!(is_source_candidate("src/server.ts"));
        assert!(is_source_candidate("config/settings.YAML"));
    }

    #[test]
    fn test_non_priority_non_source_files_are_omitted() {
        let set = files(&[("notes.txt", "hi"), ("main.go", "package main")]);
        let prompt = PromptAssembler::default().assemble(&set);
        assert_eq!(prompt.paths().collect::<Vec<_>>(), vec!["main.go"]);
        assert_eq!(prompt.omitted, vec!["notes.txt".to_string()]);
    }

    #[test]
    fn test_budget_is_never_exceeded() {
        let chunk = "y".repeat(70_000);
        let set = files(&[
            ("package.json", chunk.as_str()),
            ("src/a.js", chunk.as_str()),
            ("src/b.js", chunk.as_str()),
            ("src/c.js", chunk.as_str()),
        ]);

        let prompt = PromptAssembler::default().assemble(&set);
        assert!(prompt.total_size <= DEFAULT_PROMPT_BUDGET);
        assert_eq!(prompt.files.len(), 2);
        assert_eq!(prompt.files[0].path, "package.json");
    }

    #[test]
    fn test_instruction_describes_both_tasks() {
        let prompt = PromptAssembler::default().assemble(&ProjectFileSet::new());
        assert!(prompt.instruction.contains("fixedFiles"));
        assert!(prompt.instruction.contains("render.yaml"));
        assert!(prompt.files.is_empty());
    }
}
