//! Task classifier
//!
//! Maps a request to the provider role that should serve it. The rules are
//! a priority cascade evaluated top to bottom; the first match wins, so a
//! request that satisfies several rules lands on the earliest one.
//!
//! | # | Condition                                           | Role       |
//! |---|-----------------------------------------------------|------------|
//! | 1 | `task == code`                                      | `gpt5`     |
//! | 2 | `task == reasoning_long` or `tokens > 200_000`      | `gemini`   |
//! | 3 | `task == reasoning_cost_sensitive` or `mode == think` | `deepseek` |
//! | 4 | `task == chat_general`                              | `claude`   |
//! | 5 | `task == image_generate`                            | requested image backend (`vertex` if unset) |
//! | 6 | anything else                                       | `claude`   |

use crate::request::{InvokeRequest, Mode, Role, TaskKind};
use serde::Serialize;

/// Token count above which a request is treated as long-context
pub const LONG_CONTEXT_THRESHOLD: u64 = 200_000;

/// Decision-table rule that produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Rule 1: code task
    CodeTask,
    /// Rule 2: long reasoning task or oversized input
    LongContext,
    /// Rule 3: cost-sensitive reasoning or think mode
    CostSensitive,
    /// Rule 4: general chat
    GeneralChat,
    /// Rule 5: image generation
    ImageBackend,
    /// Rule 6: nothing matched
    Default,
}

/// Result of classifying a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Role that should serve the request
    pub role: Role,
    /// Rule that fired
    pub rule: Rule,
}

/// Classify a request, keeping track of which rule fired
#[must_use]
pub fn classify_with_rule(request: &InvokeRequest) -> Classification {
    let task = request.task;
    let tokens = request.tokens();
    let mode = request.mode();

    let (role, rule) = if task == TaskKind::Code {
        (Role::Gpt5, Rule::CodeTask)
    } else if task == TaskKind::ReasoningLong || tokens > LONG_CONTEXT_THRESHOLD {
        (Role::Gemini, Rule::LongContext)
    } else if task == TaskKind::ReasoningCostSensitive || mode == Some(Mode::Think) {
        (Role::Deepseek, Rule::CostSensitive)
    } else if task == TaskKind::ChatGeneral {
        (Role::Claude, Rule::GeneralChat)
    } else if task == TaskKind::ImageGenerate {
        let backend = request.image_backend().unwrap_or_default();
        (Role::Image(backend), Rule::ImageBackend)
    } else {
        (Role::Claude, Rule::Default)
    };

    Classification { role, rule }
}

/// Classify a request to a provider role
#[must_use]
pub fn classify(request: &InvokeRequest) -> Role {
    classify_with_rule(request).role
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ImageBackend;

    #[test]
    fn test_code_always_gpt5() {
        let cases = [
            InvokeRequest::new(TaskKind::Code, "write a sort function"),
            InvokeRequest::new(TaskKind::Code, "x").with_tokens(5_000_000),
            InvokeRequest::new(TaskKind::Code, "x").with_mode(Mode::Think),
            InvokeRequest::new(TaskKind::Code, "x")
                .with_tokens(300_000)
                .with_mode(Mode::Think),
        ];
        for req in &cases {
            let c = classify_with_rule(req);
            assert_eq!(c.role, Role::Gpt5);
            assert_eq!(c.rule, Rule::CodeTask);
        }
    }

    #[test]
    fn test_large_token_count_goes_to_gemini() {
        for task in [
            TaskKind::ChatGeneral,
            TaskKind::ReasoningCostSensitive,
            TaskKind::ImageGenerate,
            TaskKind::ReasoningLong,
        ] {
            let req = InvokeRequest::new(task, "x").with_tokens(200_001);
            assert_eq!(classify(&req), Role::Gemini, "task {task}");
        }
    }

    #[test]
    fn test_token_threshold_is_exclusive() {
        let req = InvokeRequest::new(TaskKind::ChatGeneral, "x").with_tokens(LONG_CONTEXT_THRESHOLD);
        assert_eq!(classify(&req), Role::Claude);
    }

    #[test]
    fn test_reasoning_long_goes_to_gemini() {
        let req = InvokeRequest::new(TaskKind::ReasoningLong, "...").with_tokens(500_000);
        assert_eq!(classify(&req), Role::Gemini);

        let req = InvokeRequest::new(TaskKind::ReasoningLong, "...").with_mode(Mode::Think);
        assert_eq!(classify(&req), Role::Gemini);
    }

    #[test]
    fn test_think_mode_beats_general_chat() {
        let req = InvokeRequest::new(TaskKind::ChatGeneral, "hello").with_mode(Mode::Think);
        let c = classify_with_rule(&req);
        assert_eq!(c.role, Role::Deepseek);
        assert_eq!(c.rule, Rule::CostSensitive);
    }

    #[test]
    fn test_cost_sensitive_goes_to_deepseek() {
        let req = InvokeRequest::new(TaskKind::ReasoningCostSensitive, "x");
        assert_eq!(classify(&req), Role::Deepseek);

        let req = InvokeRequest::new(TaskKind::ReasoningCostSensitive, "x").with_mode(Mode::Fast);
        assert_eq!(classify(&req), Role::Deepseek);
    }

    #[test]
    fn test_general_chat_goes_to_claude() {
        let req = InvokeRequest::new(TaskKind::ChatGeneral, "hello");
        let c = classify_with_rule(&req);
        assert_eq!(c.role, Role::Claude);
        assert_eq!(c.rule, Rule::GeneralChat);

        let req = InvokeRequest::new(TaskKind::ChatGeneral, "hello").with_mode(Mode::Fast);
        assert_eq!(classify(&req), Role::Claude);
    }

    #[test]
    fn test_image_uses_requested_backend() {
        let req = InvokeRequest::new(TaskKind::ImageGenerate, "a cat")
            .with_image_backend(ImageBackend::Stability);
        let c = classify_with_rule(&req);
        assert_eq!(c.role, Role::Image(ImageBackend::Stability));
        assert_eq!(c.rule, Rule::ImageBackend);
    }

    #[test]
    fn test_image_defaults_to_vertex() {
        let req = InvokeRequest::new(TaskKind::ImageGenerate, "a cat");
        assert_eq!(classify(&req), Role::Image(ImageBackend::Vertex));
    }

    #[test]
    fn test_image_with_think_mode_goes_to_deepseek() {
        let req = InvokeRequest::new(TaskKind::ImageGenerate, "a cat").with_mode(Mode::Think);
        assert_eq!(classify(&req), Role::Deepseek);
    }

    #[test]
    fn test_classification_is_stable() {
        let req = InvokeRequest::new(TaskKind::ChatGeneral, "same")
            .with_tokens(12)
            .with_mode(Mode::Fast);
        let first = classify_with_rule(&req);
        let second = classify_with_rule(&req);
        assert_eq!(first, second);
    }
}
