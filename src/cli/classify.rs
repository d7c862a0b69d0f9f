//! `switchyard classify`

use anyhow::{Context, Result};
use switchyard_llm::{classify_with_rule, ImageBackend, InvokeRequest, Mode, TaskKind};

/// Print the classification of a request built from CLI flags
pub fn run(
    task: TaskKind,
    tokens: Option<u64>,
    mode: Option<Mode>,
    image_provider: Option<ImageBackend>,
) -> Result<()> {
    let request = build_request(task, tokens, mode, image_provider);
    let classification = classify_with_rule(&request);
    let json =
        serde_json::to_string_pretty(&classification).context("Failed to serialize classification")?;
    println!("{json}");
    Ok(())
}

fn build_request(
    task: TaskKind,
    tokens: Option<u64>,
    mode: Option<Mode>,
    image_provider: Option<ImageBackend>,
) -> InvokeRequest {
    let mut request = InvokeRequest::new(task, "");
    if let Some(tokens) = tokens {
        request = request.with_tokens(tokens);
    }
    if let Some(mode) = mode {
        request = request.with_mode(mode);
    }
    if let Some(backend) = image_provider {
        request = request.with_image_backend(backend);
    }
    request
}
