#[cfg(test)]
mod tests {
    use crate::config::{
        Config, LLMConfig, LLMProvider, PipelineConfig, is_credential_configured,
    };
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert!(config.output_path.is_none());
        assert!(!config.verbose);
        assert_eq!(config.llm.provider, LLMProvider::Gemini);
        assert_eq!(config.pipeline.stage_timeout_seconds, 60);
    }

    #[test]
    fn test_llm_provider_default() {
        let provider = LLMProvider::default();
        assert_eq!(provider, LLMProvider::Gemini);
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
            "mistral".parse::<LLMProvider>().unwrap(),
            LLMProvider::Mistral
        );
        assert_eq!(
            "anthropic".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );
        assert_eq!(
            "gemini".parse::<LLMProvider>().unwrap(),
            LLMProvider::Gemini
        );
        assert_eq!(
            "ollama".parse::<LLMProvider>().unwrap(),
            LLMProvider::Ollama
        );

        assert!("invalid".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display() {
        assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
        assert_eq!(LLMProvider::DeepSeek.to_string(), "deepseek");
        assert_eq!(LLMProvider::Mistral.to_string(), "mistral");
        assert_eq!(LLMProvider::Anthropic.to_string(), "anthropic");
        assert_eq!(LLMProvider::Gemini.to_string(), "gemini");
        assert_eq!(LLMProvider::Ollama.to_string(), "ollama");
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        // api_key may be empty if env var is not set
        assert!(!config.api_base_url.is_empty());
        assert_eq!(config.model_efficient, "gemini-2.0-flash");
        assert!(!config.model_powerful.is_empty());
        assert_eq!(config.max_tokens, 8192);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_delay_ms, 2000);
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_pipeline_config_default() {
        let config = PipelineConfig::default();

        assert_eq!(config.python, "python3");
        assert_eq!(config.scripts_dir, PathBuf::from("ml_model"));
        assert_eq!(config.collect_script, "collect_data_for_ml.py");
        assert_eq!(config.features_script, "features.py");
        assert_eq!(config.rank_script, "train_and_rank.py");
        assert_eq!(config.stage_timeout(), Duration::from_secs(60));
        assert_eq!(config.max_videos, 5);
        assert_eq!(config.min_duration_minutes, 120.0);
    }

    #[test]
    fn test_fetch_counts() {
        let mut config = PipelineConfig::default();
        assert_eq!(config.full_fetch_count(), 50);
        assert_eq!(config.simple_fetch_count(), 50);

        config.max_videos = 2;
        assert_eq!(config.full_fetch_count(), 50);
        assert_eq!(config.simple_fetch_count(), 20);

        config.max_videos = 8;
        assert_eq!(config.full_fetch_count(), 80);
    }

    #[test]
    fn test_credential_placeholders_are_not_configured() {
        assert!(!is_credential_configured(""));
        assert!(!is_credential_configured("   "));
        assert!(!is_credential_configured("your_youtube_api_key_here"));
        assert!(is_credential_configured("AIzaSyRealLookingKey"));
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config = LLMConfig {
            provider: LLMProvider::Ollama,
            api_key: String::new(),
            ..Default::default()
        };
        assert!(config.is_configured());

        let config = LLMConfig {
            provider: LLMProvider::Mistral,
            api_key: String::new(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn test_config_from_file_partial() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("smartlearn.toml");
        fs::write(
            &config_path,
            r#"
verbose = true

[llm]
provider = "mistral"
api_key = "abc"
model_efficient = "mistral-small-latest"

[pipeline]
python = "python"
stage_timeout_seconds = 30
"#,
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert!(config.verbose);
        assert_eq!(config.llm.provider, LLMProvider::Mistral);
        assert_eq!(config.llm.api_key, "abc");
        assert_eq!(config.llm.model_efficient, "mistral-small-latest");
        // 未出现的字段使用默认值
        assert_eq!(config.llm.retry_attempts, 3);
        assert_eq!(config.pipeline.python, "python");
        assert_eq!(config.pipeline.stage_timeout_seconds, 30);
        assert_eq!(config.pipeline.max_videos, 5);
    }

    #[test]
    fn test_config_from_missing_file() {
        let result = Config::from_file(&PathBuf::from("/definitely/not/here.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "this is = = not toml").unwrap();

        assert!(Config::from_file(&config_path).is_err());
    }
}
