use crate::error::RuntimeError;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_types::{region::Region, Credentials, SdkConfig};
use std::fmt;

const ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY_ID";
const SECRET_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";
const SESSION_TOKEN_ENV: &str = "AWS_SESSION_TOKEN";

/// Options used to build the AWS session for a program run.
#[derive(Clone, Default, PartialEq)]
pub struct SessionOptions {
    /// Explicit access key id, only used together with `secret_key`
    pub access_key: Option<String>,
    /// Explicit secret access key, only used together with `access_key`
    pub secret_key: Option<String>,
    /// Named profile from the shared AWS config files
    pub profile: Option<String>,
    /// Region every client is configured for
    pub region: String,
}

impl fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("access_key", &self.access_key.as_ref().map(|_| "** redacted **"))
            .field("secret_key", &self.secret_key.as_ref().map(|_| "** redacted **"))
            .field("profile", &self.profile)
            .field("region", &self.region)
            .finish()
    }
}

/// Where the credentials for a session come from.
#[derive(Clone, PartialEq)]
pub enum CredentialSource {
    /// Access key pair passed on the command line
    Explicit {
        /// access key id
        access_key: String,
        /// secret access key
        secret_key: String,
    },
    /// Access key pair read from `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY`,
    /// with the `AWS_SESSION_TOKEN` of temporary credentials when set
    Environment {
        /// access key id
        access_key: String,
        /// secret access key
        secret_key: String,
        /// session token
        session_token: Option<String>,
    },
    /// Named profile
    Profile(String),
    /// Whatever the default provider chain resolves
    Default,
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Explicit { .. } => f.write_str("Explicit(** redacted **)"),
            CredentialSource::Environment { .. } => f.write_str("Environment(** redacted **)"),
            CredentialSource::Profile(name) => f.debug_tuple("Profile").field(name).finish(),
            CredentialSource::Default => f.write_str("Default"),
        }
    }
}

impl SessionOptions {
    /// Pick the credential source, in order: explicit keys, environment keys,
    /// profile, and finally the default chain.
    ///
    /// `env` looks up environment variables; [`std::env::var`] in production.
    pub fn credential_source<F>(&self, env: F) -> CredentialSource
    where
        F: Fn(&str) -> Option<String>,
    {
        if let (Some(access_key), Some(secret_key)) = (&self.access_key, &self.secret_key) {
            return CredentialSource::Explicit {
                access_key: access_key.clone(),
                secret_key: secret_key.clone(),
            };
        }

        let from_env = |name: &str| env(name).filter(|v| !v.is_empty());
        if let (Some(access_key), Some(secret_key)) =
            (from_env(ACCESS_KEY_ENV), from_env(SECRET_KEY_ENV))
        {
            return CredentialSource::Environment {
                access_key,
                secret_key,
                session_token: from_env(SESSION_TOKEN_ENV),
            };
        }

        match &self.profile {
            Some(profile) => CredentialSource::Profile(profile.clone()),
            None => CredentialSource::Default,
        }
    }

    /// Human readable description of the chosen branch. Never includes secrets.
    pub fn describe(&self, source: &CredentialSource) -> String {
        match source {
            CredentialSource::Explicit { .. } => {
                format!("Using AWS region: {}, provided access key and secret key", self.region)
            }
            CredentialSource::Environment { .. } => format!(
                "Using AWS region: {}, access key from {}",
                self.region, ACCESS_KEY_ENV
            ),
            CredentialSource::Profile(profile) => {
                format!("Using AWS region: {}, profile: {}", self.region, profile)
            }
            CredentialSource::Default => {
                format!("Using AWS region: {}, default credentials", self.region)
            }
        }
    }
}

/// Build the shared AWS configuration for this run.
///
/// The credentials themselves are validated lazily by the SDK on the first call,
/// this only fails when no provider could be configured at all.
pub async fn load_config(options: &SessionOptions) -> Result<SdkConfig, RuntimeError> {
    load_config_with_env(options, |name| std::env::var(name).ok()).await
}

#[tracing::instrument(skip(env))]
async fn load_config_with_env<F>(
    options: &SessionOptions,
    env: F,
) -> Result<SdkConfig, RuntimeError>
where
    F: Fn(&str) -> Option<String>,
{
    let source = options.credential_source(env);
    println!("{}", options.describe(&source));

    let region = Region::new(options.region.clone());
    let loader = aws_config::from_env().region(region);

    let config = match source {
        CredentialSource::Explicit {
            access_key,
            secret_key,
        } => {
            tracing::info!("loading static credentials");
            loader
                .credentials_provider(Credentials::from_keys(access_key, secret_key, None))
                .load()
                .await
        }
        CredentialSource::Environment {
            access_key,
            secret_key,
            session_token,
        } => {
            tracing::info!(
                temporary = session_token.is_some(),
                "loading environment credentials"
            );
            loader
                .credentials_provider(Credentials::from_keys(
                    access_key,
                    secret_key,
                    session_token,
                ))
                .load()
                .await
        }
        CredentialSource::Profile(profile) => {
            tracing::info!(%profile, "loading profile credentials");
            let provider = ProfileFileCredentialsProvider::builder()
                .profile_name(profile)
                .build();
            loader.credentials_provider(provider).load().await
        }
        CredentialSource::Default => {
            tracing::info!("loading default credential chain");
            loader.load().await
        }
    };

    if config.credentials_provider().is_none() {
        return Err(RuntimeError::MissingCredentials);
    }

    Ok(config)
}

#[cfg(test)]
mod test {
    use super::*;
    use aws_types::credentials::ProvideCredentials;
    use std::collections::HashMap;

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn options() -> SessionOptions {
        SessionOptions {
            region: "ap-northeast-1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_explicit_keys_win_over_profile_and_environment() {
        let options = SessionOptions {
            access_key: Some("AKIDCLI".into()),
            secret_key: Some("cli-secret".into()),
            profile: Some("dev".into()),
            ..options()
        };
        let env = env_of(&[(ACCESS_KEY_ENV, "AKIDENV"), (SECRET_KEY_ENV, "env-secret")]);

        assert_eq!(
            CredentialSource::Explicit {
                access_key: "AKIDCLI".into(),
                secret_key: "cli-secret".into(),
            },
            options.credential_source(env)
        );
    }

    #[test]
    fn test_environment_keys_win_over_profile() {
        let options = SessionOptions {
            profile: Some("dev".into()),
            ..options()
        };
        let env = env_of(&[(ACCESS_KEY_ENV, "AKIDENV"), (SECRET_KEY_ENV, "env-secret")]);

        assert_eq!(
            CredentialSource::Environment {
                access_key: "AKIDENV".into(),
                secret_key: "env-secret".into(),
                session_token: None,
            },
            options.credential_source(env)
        );
    }

    #[test]
    fn test_environment_keys_keep_session_token() {
        let env = env_of(&[
            (ACCESS_KEY_ENV, "ASIAENV"),
            (SECRET_KEY_ENV, "env-secret"),
            (SESSION_TOKEN_ENV, "env-token"),
        ]);

        assert_eq!(
            CredentialSource::Environment {
                access_key: "ASIAENV".into(),
                secret_key: "env-secret".into(),
                session_token: Some("env-token".into()),
            },
            options().credential_source(env)
        );
    }

    #[tokio::test]
    async fn test_load_config_with_temporary_environment_credentials() -> Result<(), RuntimeError> {
        let env = env_of(&[
            (ACCESS_KEY_ENV, "ASIAENV"),
            (SECRET_KEY_ENV, "env-secret"),
            (SESSION_TOKEN_ENV, "env-token"),
        ]);

        let config = load_config_with_env(&options(), env).await?;

        let credentials = config
            .credentials_provider()
            .expect("credentials provider")
            .provide_credentials()
            .await
            .expect("static credentials");
        assert_eq!("ASIAENV", credentials.access_key_id());
        assert_eq!("env-secret", credentials.secret_access_key());
        assert_eq!(Some("env-token"), credentials.session_token());
        Ok(())
    }

    #[test]
    fn test_incomplete_environment_falls_through_to_profile() {
        let options = SessionOptions {
            profile: Some("dev".into()),
            ..options()
        };
        let env = env_of(&[(ACCESS_KEY_ENV, "AKIDENV"), (SECRET_KEY_ENV, "")]);

        assert_eq!(
            CredentialSource::Profile("dev".into()),
            options.credential_source(env)
        );
    }

    #[test]
    fn test_default_chain_without_any_input() {
        assert_eq!(
            CredentialSource::Default,
            options().credential_source(env_of(&[]))
        );
    }

    #[test]
    fn test_secrets_are_never_formatted() {
        let options = SessionOptions {
            access_key: Some("AKIDCLI".into()),
            secret_key: Some("cli-secret".into()),
            ..options()
        };
        let source = options.credential_source(env_of(&[]));

        for text in [
            format!("{:?}", options),
            format!("{:?}", source),
            options.describe(&source),
        ] {
            assert!(!text.contains("cli-secret"), "leaked secret in {text}");
            assert!(!text.contains("AKIDCLI"), "leaked key in {text}");
        }
        assert_eq!(
            "Using AWS region: ap-northeast-1, provided access key and secret key",
            options.describe(&source)
        );
    }

    #[tokio::test]
    async fn test_load_config_with_explicit_keys() -> Result<(), RuntimeError> {
        let options = SessionOptions {
            access_key: Some("AKIDCLI".into()),
            secret_key: Some("cli-secret".into()),
            region: "eu-west-1".into(),
            ..Default::default()
        };

        let config = load_config(&options).await?;

        assert_eq!(Some(&Region::new("eu-west-1")), config.region());
        assert!(config.credentials_provider().is_some());
        Ok(())
    }
}
