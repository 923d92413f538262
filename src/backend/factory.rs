// Backend factory
//
// Creates the chat backend selected by configuration.

use anyhow::Result;

use super::{AutogenBackend, ChatBackend, OpenAiBackend};
use crate::config::{BackendConfig, Config};

/// Create the configured `ChatBackend`.
pub fn create_backend(config: &Config) -> Result<Box<dyn ChatBackend>> {
    match &config.backend {
        BackendConfig::Openai {
            api_key,
            org_id,
            model,
            base_url,
        } => {
            let mut backend = OpenAiBackend::new(api_key.clone())?;
            if let Some(org) = org_id {
                backend = backend.with_org(org.clone());
            }
            if let Some(m) = model {
                backend = backend.with_model(m.clone());
            }
            if let Some(url) = base_url {
                backend = backend.with_base_url(url.clone());
            }
            Ok(Box::new(backend))
        }

        BackendConfig::Autogen { url } => Ok(Box::new(AutogenBackend::new(url.clone())?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::DEFAULT_AUTOGEN_URL;

    #[test]
    fn test_create_openai_backend() {
        let config = Config::with_api_key("test-key".to_string());
        let backend = create_backend(&config).unwrap();
        assert_eq!(backend.name(), "openai");
    }

    #[test]
    fn test_create_autogen_backend() {
        let mut config = Config::with_api_key("unused".to_string());
        config.backend = BackendConfig::Autogen {
            url: DEFAULT_AUTOGEN_URL.to_string(),
        };
        let backend = create_backend(&config).unwrap();
        assert_eq!(backend.name(), "autogen");
    }
}
