//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shipwright::domain::errors::ModelError;
use shipwright::domain::models::{AssembledPrompt, FixedFile, ModelAnalysis, ProjectFileSet};
use shipwright::domain::ports::DeploymentModel;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Model double that replays a fixed script and records every prompt.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<ModelAnalysis, ModelError>>>,
    prompts: Mutex<Vec<AssembledPrompt>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<Result<ModelAnalysis, ModelError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<AssembledPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeploymentModel for ScriptedModel {
    async fn analyze(&self, prompt: &AssembledPrompt) -> Result<ModelAnalysis, ModelError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Transport("script exhausted".to_string())))
    }

    async fn diagnose(&self, _raw: &str, _repo: &str) -> Result<String, ModelError> {
        Ok("diagnosis".to_string())
    }
}

/// A plan whose explanation is `tag`, proposing `fixes`.
pub fn analysis(tag: &str, fixes: &[(&str, &str)]) -> ModelAnalysis {
    ModelAnalysis {
        project_type: "Python (Flask)".to_string(),
        render_yaml: format!(
            "services:\n  - type: web\n    name: {tag}\n    runtime: python\n    buildCommand: pip install -r requirements.txt\n    startCommand: gunicorn app:app\n"
        ),
        build_command: "pip install -r requirements.txt".to_string(),
        start_command: "gunicorn app:app".to_string(),
        explanation: tag.to_string(),
        fixed_files: fixes
            .iter()
            .map(|(name, content)| FixedFile {
                file_name: (*name).to_string(),
                file_content: (*content).to_string(),
            })
            .collect(),
    }
}

pub fn python_project() -> ProjectFileSet {
    [
        (".replit", "run = \"python app.py\"\n"),
        ("app.py", "print(1)"),
    ]
    .into_iter()
    .collect()
}

/// Build an in-memory zip from `(name, bytes)` entries; names ending in `/` are directories.
pub fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}
