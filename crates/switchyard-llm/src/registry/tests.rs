use super::*;
use crate::providers::Deadline;
use crate::request::{InvokeRequest, TaskKind};
use mockall::predicate::eq;

fn no_credentials() -> MockCredentialSource {
    let mut creds = MockCredentialSource::new();
    creds.expect_get().returning(|_| None);
    creds
}

fn instant_settings() -> RegistrySettings {
    RegistrySettings {
        simulated: SimulatedSettings {
            min_latency_ms: 0,
            max_latency_ms: 0,
            ..SimulatedSettings::default()
        },
        ..RegistrySettings::default()
    }
}

#[test]
fn test_register_and_get() {
    let mut registry = Registry::new(ImageBackend::Vertex);
    assert!(!registry.has_provider(Role::Gpt5));

    registry.register(Role::Gpt5, Arc::new(SimulatedProvider::new("gpt5")));
    assert!(registry.has_provider(Role::Gpt5));
    assert_eq!(registry.get(Role::Gpt5).unwrap().name(), "gpt5");
    assert!(registry.get(Role::Claude).is_none());
    assert_eq!(registry.list_roles(), vec![Role::Gpt5]);
}

#[test]
fn test_resolve_unregistered_text_role() {
    let registry = Registry::default();
    let provider = registry.resolve(Role::Deepseek);
    assert_eq!(provider.name(), "deepseek");
    assert!(provider.is_simulated());
}

#[test]
fn test_resolve_image_uses_default_backend() {
    let mut registry = Registry::new(ImageBackend::Vertex);
    registry.register(
        Role::Image(ImageBackend::Vertex),
        Arc::new(SimulatedProvider::new("vertex")),
    );

    let provider = registry.resolve(Role::Image(ImageBackend::Stability));
    assert_eq!(provider.name(), "vertex");
}

#[test]
fn test_resolve_image_without_default_is_simulated() {
    let registry = Registry::new(ImageBackend::Vertex);
    let provider = registry.resolve(Role::Image(ImageBackend::Openai));
    assert_eq!(provider.name(), "openai");
    assert!(provider.is_simulated());
}

#[test]
fn test_from_settings_without_credentials() {
    let registry = Registry::from_settings(&RegistrySettings::default(), &no_credentials()).unwrap();

    assert_eq!(registry.list_roles().len(), Role::TEXT.len() + ImageBackend::ALL.len());
    for role in registry.list_roles() {
        let provider = registry.get(role).unwrap();
        assert!(provider.is_simulated(), "role {role}");
        assert_eq!(provider.name(), role.as_str());
    }
    assert!(registry.premium().is_none());
}

#[test]
fn test_from_settings_registers_live_provider() {
    let mut settings = RegistrySettings::default();
    settings.providers.insert(
        Role::Gpt5,
        ProviderSettings {
            model: Some("gpt-4.1".to_string()),
            ..ProviderSettings::from_env_var("GPT5_API_KEY")
        },
    );
    settings.providers.insert(Role::Claude, ProviderSettings::from_env_var("CLAUDE_API_KEY"));

    let mut creds = MockCredentialSource::new();
    creds
        .expect_get()
        .with(eq("GPT5_API_KEY"))
        .returning(|_| Some("sk-gpt5-0123456789".to_string()));
    creds.expect_get().returning(|_| None);

    let registry = Registry::from_settings(&settings, &creds).unwrap();

    let gpt5 = registry.get(Role::Gpt5).unwrap();
    assert!(!gpt5.is_simulated());
    assert_eq!(gpt5.name(), "gpt5");
    assert_eq!(gpt5.fallback_role(), Some(Role::Claude));

    let claude = registry.get(Role::Claude).unwrap();
    assert!(claude.is_simulated());
}

#[test]
fn test_live_providers_fall_back_to_claude() {
    let mut settings = RegistrySettings::default();
    settings.providers.insert(Role::Claude, ProviderSettings::from_env_var("CLAUDE_API_KEY"));
    settings.providers.insert(Role::Gemini, ProviderSettings::from_env_var("GEMINI_API_KEY"));

    let mut creds = MockCredentialSource::new();
    creds.expect_get().returning(|_| Some("sk-live-0123456789".to_string()));

    let registry = Registry::from_settings(&settings, &creds).unwrap();
    for role in [Role::Claude, Role::Gemini] {
        let provider = registry.get(role).unwrap();
        assert!(!provider.is_simulated(), "role {role}");
        assert_eq!(provider.fallback_role(), Some(Role::Claude), "role {role}");
    }
}

#[test]
fn test_live_fallback_override() {
    let mut settings = RegistrySettings::default();
    settings.providers.insert(
        Role::Claude,
        ProviderSettings {
            fallback: Some(Role::Gpt5),
            ..ProviderSettings::from_env_var("CLAUDE_API_KEY")
        },
    );

    let mut creds = MockCredentialSource::new();
    creds.expect_get().returning(|_| Some("sk-claude-0123456789".to_string()));

    let registry = Registry::from_settings(&settings, &creds).unwrap();
    assert_eq!(registry.get(Role::Claude).unwrap().fallback_role(), Some(Role::Gpt5));
}

#[test]
fn test_from_settings_premium_requires_credential() {
    let settings = RegistrySettings {
        premium: Some(ProviderSettings::from_env_var("OPENAI_API_KEY")),
        ..RegistrySettings::default()
    };

    let registry = Registry::from_settings(&settings, &no_credentials()).unwrap();
    assert!(registry.premium().is_none());

    let mut creds = MockCredentialSource::new();
    creds
        .expect_get()
        .with(eq("OPENAI_API_KEY"))
        .times(1)
        .returning(|_| Some("sk-openai-0123456789".to_string()));
    let registry = Registry::from_settings(&settings, &creds).unwrap();

    let premium = registry.premium().unwrap();
    assert_eq!(premium.name(), PREMIUM_PROVIDER_NAME);
    assert_eq!(premium.fallback_role(), Some(Role::Claude));
}

#[test]
fn test_from_settings_default_image() {
    let settings = RegistrySettings {
        default_image: ImageBackend::Stability,
        ..RegistrySettings::default()
    };
    let registry = Registry::from_settings(&settings, &no_credentials()).unwrap();
    assert_eq!(registry.default_image(), ImageBackend::Stability);
}

#[tokio::test(start_paused = true)]
async fn test_fail_marker_applies_to_configured_roles_only() {
    let registry = Registry::from_settings(&instant_settings(), &no_credentials()).unwrap();
    let req = InvokeRequest::new(TaskKind::Code, "hello [fail]");
    let deadline = Deadline::after(Duration::from_secs(3));

    assert!(registry.resolve(Role::Gpt5).invoke(&req, &deadline).await.is_err());
    assert!(registry.resolve(Role::Claude).invoke(&req, &deadline).await.is_ok());
}

#[test]
fn test_settings_deserialize() {
    let json = serde_json::json!({
        "default_image": "stability",
        "simulated": {"min_latency_ms": 10, "max_latency_ms": 20, "fail_roles": ["claude"]},
        "providers": {
            "gemini": {"api_key_env": "GEMINI_API_KEY", "base_url": "http://localhost:8080/v1", "fallback": "claude"}
        },
        "premium": {"api_key_env": "OPENAI_API_KEY", "base_url_env": "OPENAI_BASE_URL"}
    });
    let settings: RegistrySettings = serde_json::from_value(json).unwrap();

    assert_eq!(settings.default_image, ImageBackend::Stability);
    assert_eq!(settings.simulated.fail_roles, vec![Role::Claude]);
    assert_eq!(settings.simulated.fail_marker.as_deref(), Some("[fail]"));
    let gemini = &settings.providers[&Role::Gemini];
    assert_eq!(gemini.fallback, Some(Role::Claude));
    assert_eq!(
        settings.premium.unwrap().base_url_env.as_deref(),
        Some("OPENAI_BASE_URL")
    );
}

#[test]
fn test_settings_reject_unknown_role() {
    let json = serde_json::json!({"providers": {"llama": {"api_key_env": "X"}}});
    assert!(serde_json::from_value::<RegistrySettings>(json).is_err());
}
