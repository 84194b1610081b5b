//! API key acquisition: flags and env first, then config, then a masked prompt.

use console::Style;
use dialoguer::Password;
use marketmap_core::{Config, Credentials};

use super::theme::marketmap_theme;

/// The two keys a run needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKey {
    OpenAi,
    Crunchbase,
}

impl ApiKey {
    fn label(self) -> &'static str {
        match self {
            ApiKey::OpenAi => "OpenAI",
            ApiKey::Crunchbase => "Crunchbase",
        }
    }

    fn env_var(self) -> &'static str {
        match self {
            ApiKey::OpenAi => "OPENAI_API_KEY",
            ApiKey::Crunchbase => "CRUNCHBASE_API_KEY",
        }
    }
}

/// Keys still missing, OpenAI first.
pub fn missing(credentials: &Credentials) -> Vec<ApiKey> {
    let mut keys = Vec::new();
    if credentials.openai_api_key.is_none() {
        keys.push(ApiKey::OpenAi);
    }
    if credentials.crunchbase_api_key.is_none() {
        keys.push(ApiKey::Crunchbase);
    }
    keys
}

/// Merge keys given on the command line with the configured secret store.
pub fn resolve(
    openai_flag: Option<String>,
    crunchbase_flag: Option<String>,
    config: &Config,
) -> Credentials {
    Credentials::new(openai_flag, crunchbase_flag)
        .or(Credentials::from_config(&config.credentials))
}

/// Prompt for any missing key when `interactive`; otherwise leave it missing.
///
/// Keys entered here are used for this run only and never written anywhere.
pub fn fill_missing(
    mut credentials: Credentials,
    interactive: bool,
) -> anyhow::Result<Credentials> {
    let todo = missing(&credentials);
    if todo.is_empty() || !interactive {
        return Ok(credentials);
    }

    let theme = marketmap_theme();
    let warn = Style::new().for_stderr().yellow();

    for key in todo {
        eprintln!("  {}", warn.apply_to(format!("{} not set.", key.env_var())));
        let entered = Password::with_theme(&theme)
            .with_prompt(format!("Enter your {} API Key", key.label()))
            .allow_empty_password(true)
            .interact();

        let value = match entered {
            Ok(v) if !v.trim().is_empty() => Some(v),
            Ok(_) => None,
            Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => None,
            Err(e) => return Err(e.into()),
        };

        match key {
            ApiKey::OpenAi => credentials.openai_api_key = value,
            ApiKey::Crunchbase => credentials.crunchbase_api_key = value,
        }
    }

    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketmap_core::config::CredentialsConfig;

    fn config_with(openai: &str, crunchbase: &str) -> Config {
        let mut config = Config::default();
        config.credentials = CredentialsConfig {
            openai_api_key: openai.to_string(),
            crunchbase_api_key: crunchbase.to_string(),
        };
        config
    }

    #[test]
    fn flags_take_precedence_over_config() {
        let config = config_with("cfg-oa", "cfg-cb");
        let creds = resolve(Some("flag-oa".into()), None, &config);
        assert_eq!(creds.openai_api_key.as_deref(), Some("flag-oa"));
        assert_eq!(creds.crunchbase_api_key.as_deref(), Some("cfg-cb"));
        assert!(missing(&creds).is_empty());
    }

    #[test]
    fn unset_env_reference_counts_as_missing() {
        let config = config_with("${MARKETMAP_TEST_UNSET_OA}", "");
        let creds = resolve(None, None, &config);
        assert_eq!(missing(&creds), vec![ApiKey::OpenAi, ApiKey::Crunchbase]);
    }

    #[test]
    fn non_interactive_leaves_keys_missing() {
        let creds = Credentials::new(Some("oa".into()), None);
        let filled = fill_missing(creds.clone(), false).unwrap();
        assert_eq!(filled, creds);
        assert_eq!(missing(&filled), vec![ApiKey::Crunchbase]);
    }

    #[test]
    fn complete_credentials_skip_prompting() {
        let creds = Credentials::new(Some("oa".into()), Some("cb".into()));
        // Would block on a prompt if it tried to ask.
        let filled = fill_missing(creds.clone(), true).unwrap();
        assert_eq!(filled, creds);
    }
}
