#[cfg(test)]
mod tests {
    use crate::config::{Config, LLMConfig, LLMProvider, ServerConfig};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.server.session_idle_minutes, 120);
        assert_eq!(config.download_file_name, "study_sheet.md");
    }

    #[test]
    fn test_llm_provider_default() {
        let provider = LLMProvider::default();
        assert_eq!(provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!(
            "openai".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            "DeepSeek".parse::<LLMProvider>().unwrap(),
            LLMProvider::DeepSeek
        );
        assert_eq!(
            "openrouter".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenRouter
        );
        assert_eq!(
            "anthropic".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );

        assert!("gemini".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display() {
        assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
        assert_eq!(LLMProvider::DeepSeek.to_string(), "deepseek");
        assert_eq!(LLMProvider::OpenRouter.to_string(), "openrouter");
        assert_eq!(LLMProvider::Anthropic.to_string(), "anthropic");
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        assert_eq!(config.provider, LLMProvider::OpenAI);
        assert_eq!(config.api_base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "o3-mini");
        assert!(config.max_tokens.is_none());
        assert!(config.temperature.is_none());
        assert!(config.timeout_seconds.is_none());
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 9000,
                ..Default::default()
            },
            ..Default::default()
        };

        let addr = config.bind_address().unwrap();
        assert_eq!(addr.port(), 9000);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_bind_address_invalid_host() {
        let mut config = Config::default();
        config.server.host = "not a host".to_string();

        assert!(config.bind_address().is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("studysheet.toml");

        let content = r#"download_file_name = "notes.md"

[server]
port = 3000
session_idle_minutes = 15

[llm]
provider = "deepseek"
model = "deepseek-chat"
temperature = 0.3
"#;
        std::fs::write(&config_path, content).unwrap();

        let config = Config::from_file(&config_path).unwrap();

        assert_eq!(config.download_file_name, "notes.md");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.session_idle_minutes, 15);
        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.model, "deepseek-chat");
        assert_eq!(config.llm.temperature, Some(0.3));
        assert!(config.llm.max_tokens.is_none());
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file(&PathBuf::from("/nonexistent/studysheet.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("studysheet.toml");
        std::fs::write(&config_path, "[server\nport = ").unwrap();

        assert!(Config::from_file(&config_path).is_err());
    }

    #[test]
    fn test_config_roundtrip_keeps_no_credential() {
        let serialized = toml::to_string(&Config::default()).unwrap();

        assert!(!serialized.contains("api_key"));
        assert!(serialized.contains("o3-mini"));
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../studysheet.toml.example")).unwrap();

        assert_eq!(config.server.port, 8501);
        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        assert_eq!(config.llm.model, "o3-mini");
        assert!(config.llm.timeout_seconds.is_none());
    }
}
