use regex::{Captures, Regex};
use std::fmt;

/// Redacts credentials from text before it is logged or sent to the model
///
/// Provider error bodies and diagnosis inputs can echo request headers or
/// tokens back; everything that leaves the process through logs or a model
/// prompt goes through [`SecretScrubber::scrub`] first.
#[derive(Clone)]
pub struct SecretScrubber {
    anthropic_pattern: Regex,
    github_pattern: Regex,
    render_pattern: Regex,
    bearer_pattern: Regex,
    field_pattern: Regex,
    literals: Vec<String>,
}

impl SecretScrubber {
    /// Create a scrubber with the built-in token patterns
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // Anthropic API keys: sk-ant-api03-...
            anthropic_pattern: Regex::new(r"sk-ant-[A-Za-z0-9_-]{10,}")?,
            // Classic and fine-grained GitHub tokens
            github_pattern: Regex::new(r"\b(?:gh[pousr]_[A-Za-z0-9]{20,}|github_pat_[A-Za-z0-9_]{20,})")?,
            // Render API keys
            render_pattern: Regex::new(r"\brnd_[A-Za-z0-9]{10,}")?,
            // Authorization header values
            bearer_pattern: Regex::new(r"Bearer\s+[A-Za-z0-9\-_.=]+")?,
            // key/value pairs such as "token": "..." or api_key=...
            field_pattern: Regex::new(
                r#"(["']?(?:api_key|apikey|x-api-key|token|secret|password)["']?\s*[:=]\s*)["']?[^"'\s,}]{8,}["']?"#,
            )?,
            literals: Vec::new(),
        })
    }

    /// Also redact these exact values, e.g. the credentials of this session
    #[must_use]
    pub fn with_literals<I, S>(mut self, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.literals.extend(
            literals
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| s.len() >= 8),
        );
        self
    }

    /// Return `message` with every recognised secret replaced
    pub fn scrub(&self, message: &str) -> String {
        let mut scrubbed = message.to_string();
        for literal in &self.literals {
            scrubbed = scrubbed.replace(literal.as_str(), "[REDACTED]");
        }

        scrubbed = self
            .anthropic_pattern
            .replace_all(&scrubbed, "[API_KEY_REDACTED]")
            .into_owned();
        scrubbed = self
            .github_pattern
            .replace_all(&scrubbed, "[GITHUB_TOKEN_REDACTED]")
            .into_owned();
        scrubbed = self
            .render_pattern
            .replace_all(&scrubbed, "[RENDER_KEY_REDACTED]")
            .into_owned();
        scrubbed = self
            .bearer_pattern
            .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]")
            .into_owned();
        self.field_pattern
            .replace_all(&scrubbed, |caps: &Captures| format!("{}[REDACTED]", &caps[1]))
            .into_owned()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber")
            .field("literals", &self.literals.len())
            .finish()
    }
}
