//! Request model and provider roles
//!
//! `InvokeRequest` is the validated shape accepted by `POST /invoke`.
//! Deserialization is the validation step: unknown task kinds, modes or
//! image backends, and negative token counts, are rejected by serde.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Task Kind
// ============================================================================

/// Kind of work requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Code generation and modification
    Code,
    /// Reasoning over long inputs
    ReasoningLong,
    /// Reasoning where cost matters more than latency
    ReasoningCostSensitive,
    /// General conversation
    ChatGeneral,
    /// Image generation
    ImageGenerate,
}

impl TaskKind {
    /// All task kinds, in declaration order
    pub const ALL: [TaskKind; 5] = [
        Self::Code,
        Self::ReasoningLong,
        Self::ReasoningCostSensitive,
        Self::ChatGeneral,
        Self::ImageGenerate,
    ];

    /// Wire name of this task kind
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::ReasoningLong => "reasoning_long",
            Self::ReasoningCostSensitive => "reasoning_cost_sensitive",
            Self::ChatGeneral => "chat_general",
            Self::ImageGenerate => "image_generate",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown task kind: {s}"))
    }
}

/// Reasoning mode hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Spend more effort reasoning
    Think,
    /// Answer quickly
    Fast,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "think" => Ok(Self::Think),
            "fast" => Ok(Self::Fast),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

// ============================================================================
// Image Backend
// ============================================================================

/// Image generation backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageBackend {
    /// Google Vertex AI (default)
    #[default]
    Vertex,
    /// Stability AI
    Stability,
    /// OpenAI images
    Openai,
}

impl ImageBackend {
    /// All image backends
    pub const ALL: [ImageBackend; 3] = [Self::Vertex, Self::Stability, Self::Openai];

    /// Wire name of this backend
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Stability => "stability",
            Self::Openai => "openai",
        }
    }
}

impl fmt::Display for ImageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|backend| backend.as_str() == s)
            .ok_or_else(|| format!("unknown image backend: {s}"))
    }
}

// ============================================================================
// Request
// ============================================================================

fn default_image_size() -> String {
    "1024x1024".to_string()
}

/// Image generation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    /// Requested backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ImageBackend>,
    /// Output size
    #[serde(default = "default_image_size")]
    pub size: String,
    /// Image prompt (falls back to `input` when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            provider: None,
            size: default_image_size(),
            prompt: None,
        }
    }
}

/// Optional tuning knobs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvokeOptions {
    /// Estimated token count of the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u64>,
    /// Reasoning mode hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Image options (only meaningful for `image_generate`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageOptions>,
}

/// A validated invocation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeRequest {
    /// Kind of work
    pub task: TaskKind,
    /// Input payload
    pub input: String,
    /// Optional tuning knobs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<InvokeOptions>,
}

impl InvokeRequest {
    /// Create a request without options
    #[must_use]
    pub fn new(task: TaskKind, input: impl Into<String>) -> Self {
        Self {
            task,
            input: input.into(),
            options: None,
        }
    }

    /// Set the estimated token count
    #[must_use]
    pub fn with_tokens(mut self, tokens: u64) -> Self {
        self.options.get_or_insert_with(Default::default).tokens = Some(tokens);
        self
    }

    /// Set the reasoning mode
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.options.get_or_insert_with(Default::default).mode = Some(mode);
        self
    }

    /// Set the image backend
    #[must_use]
    pub fn with_image_backend(mut self, backend: ImageBackend) -> Self {
        self.options
            .get_or_insert_with(Default::default)
            .image
            .get_or_insert_with(Default::default)
            .provider = Some(backend);
        self
    }

    /// Estimated token count, zero when absent
    #[must_use]
    pub fn tokens(&self) -> u64 {
        self.options.as_ref().and_then(|o| o.tokens).unwrap_or(0)
    }

    /// Raw token estimate, if the caller supplied one
    #[must_use]
    pub fn declared_tokens(&self) -> Option<u64> {
        self.options.as_ref().and_then(|o| o.tokens)
    }

    /// Reasoning mode, if any
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.options.as_ref().and_then(|o| o.mode)
    }

    /// Requested image backend, if any
    #[must_use]
    pub fn image_backend(&self) -> Option<ImageBackend> {
        self.options
            .as_ref()
            .and_then(|o| o.image.as_ref())
            .and_then(|i| i.provider)
    }
}

// ============================================================================
// Role
// ============================================================================

/// Provider role assigned by the classifier
///
/// A closed set: the four text roles plus one role per image backend.
/// Serialized as its string form (`"gpt5"`, `"vertex"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    /// Fast coder
    Gpt5,
    /// Long-context reasoner
    Gemini,
    /// Cost-sensitive reasoner
    Deepseek,
    /// General chat
    Claude,
    /// Image generation backend
    Image(ImageBackend),
}

impl Role {
    /// Text roles, in decision-table order
    pub const TEXT: [Role; 4] = [Self::Gpt5, Self::Gemini, Self::Deepseek, Self::Claude];

    /// Stable name of this role
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt5 => "gpt5",
            Self::Gemini => "gemini",
            Self::Deepseek => "deepseek",
            Self::Claude => "claude",
            Self::Image(backend) => backend.as_str(),
        }
    }

    /// Whether this is an image backend role
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gpt5" => Ok(Self::Gpt5),
            "gemini" => Ok(Self::Gemini),
            "deepseek" => Ok(Self::Deepseek),
            "claude" => Ok(Self::Claude),
            other => other
                .parse::<ImageBackend>()
                .map(Self::Image)
                .map_err(|_| format!("unknown provider role: {other}")),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}
