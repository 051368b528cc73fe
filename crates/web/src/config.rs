use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;
const MAX_SESSION_TTL_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub session_ttl_secs: i64,
    pub cookie_secure: bool,
    pub admin_username: String,
    pub admin_password: Option<String>,
    pub cloudinary: Option<CloudinaryConfig>,
}

#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub signature_algorithm: SignatureAlgorithm,
}

/// Digest used to sign Cloudinary API calls. SHA-256 signatures are only
/// accepted by accounts configured for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl std::str::FromStr for SignatureAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            other => Err(format!("unknown signature algorithm '{other}'")),
        }
    }
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("signature_algorithm", &self.signature_algorithm)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source. Blank
    /// values count as unset, since some hosts export empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL")
            .or_else(|| var("POSTGRES_URL"))
            .context("Cannot load DATABASE_URL (or POSTGRES_URL) env variable")?;

        let port = match var("PORT") {
            Some(port) => port.trim().parse().context("PORT must be a number")?,
            None => DEFAULT_PORT,
        };

        let session_ttl_secs = match var("SESSION_TTL_SECS") {
            Some(ttl) => ttl
                .trim()
                .parse()
                .context("SESSION_TTL_SECS must be a number of seconds")?,
            None => DEFAULT_SESSION_TTL_SECS,
        };
        anyhow::ensure!(
            (1..=MAX_SESSION_TTL_SECS).contains(&session_ttl_secs),
            "SESSION_TTL_SECS must be between 1 and {MAX_SESSION_TTL_SECS}"
        );

        let cookie_secure = match var("COOKIE_SECURE") {
            Some(flag) => parse_flag(&flag).context("COOKIE_SECURE must be true or false")?,
            None => false,
        };

        let cloudinary = match var("CLOUDINARY_CLOUD_NAME") {
            Some(cloud_name) => Some(CloudinaryConfig {
                cloud_name,
                api_key: var("CLOUDINARY_API_KEY")
                    .context("CLOUDINARY_API_KEY is required when CLOUDINARY_CLOUD_NAME is set")?,
                api_secret: var("CLOUDINARY_API_SECRET").context(
                    "CLOUDINARY_API_SECRET is required when CLOUDINARY_CLOUD_NAME is set",
                )?,
                signature_algorithm: match var("CLOUDINARY_SIGNATURE_ALGORITHM") {
                    Some(algorithm) => algorithm
                        .parse()
                        .map_err(anyhow::Error::msg)
                        .context("CLOUDINARY_SIGNATURE_ALGORITHM must be sha1 or sha256")?,
                    None => SignatureAlgorithm::default(),
                },
            }),
            None => None,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            upload_dir: var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static/uploads")),
            session_ttl_secs,
            cookie_secure,
            admin_username: var("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
            admin_password: var("ADMIN_PASSWORD"),
            cloudinary,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/scores")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.upload_dir, PathBuf::from("static/uploads"));
        assert_eq!(config.session_ttl_secs, 86400);
        assert!(!config.cookie_secure);
        assert_eq!(config.admin_username, "admin");
        assert!(config.admin_password.is_none());
        assert!(config.cloudinary.is_none());
    }

    #[test]
    fn test_postgres_url_fallback_and_blank_values() {
        let config = config_from(&[
            ("DATABASE_URL", ""),
            ("POSTGRES_URL", "postgres://db/scores"),
            ("ADMIN_PASSWORD", "  "),
        ])
        .unwrap();

        assert_eq!(config.database_url, "postgres://db/scores");
        assert!(config.admin_password.is_none());
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        assert!(config_from(&[("PORT", "8080")]).is_err());
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(config_from(&[("DATABASE_URL", "postgres://db"), ("PORT", "http")]).is_err());
    }

    #[test]
    fn test_cloudinary_requires_credentials() {
        assert!(
            config_from(&[
                ("DATABASE_URL", "postgres://db"),
                ("CLOUDINARY_CLOUD_NAME", "demo"),
            ])
            .is_err()
        );

        let config = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "key"),
            ("CLOUDINARY_API_SECRET", "secret"),
            ("COOKIE_SECURE", "true"),
        ])
        .unwrap();

        let cloudinary = config.cloudinary.unwrap();
        assert_eq!(cloudinary.cloud_name, "demo");
        assert_eq!(cloudinary.signature_algorithm, SignatureAlgorithm::Sha1);
        assert!(!format!("{cloudinary:?}").contains("secret\""));
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_cloudinary_signature_algorithm() {
        let vars = [
            ("DATABASE_URL", "postgres://db"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "key"),
            ("CLOUDINARY_API_SECRET", "secret"),
        ];

        let mut with_sha256 = vars.to_vec();
        with_sha256.push(("CLOUDINARY_SIGNATURE_ALGORITHM", "SHA256"));
        let config = config_from(&with_sha256).unwrap();
        assert_eq!(
            config.cloudinary.unwrap().signature_algorithm,
            SignatureAlgorithm::Sha256
        );

        let mut with_md5 = vars.to_vec();
        with_md5.push(("CLOUDINARY_SIGNATURE_ALGORITHM", "md5"));
        assert!(config_from(&with_md5).is_err());
    }

    #[test]
    fn test_session_ttl_is_bounded() {
        let ttl = |value: &str| {
            config_from(&[("DATABASE_URL", "postgres://db"), ("SESSION_TTL_SECS", value)])
        };

        assert!(ttl("0").is_err());
        assert!(ttl("-60").is_err());
        assert!(ttl("1000000000000000").is_err());

        let config = ttl("31536000").unwrap();
        let expires =
            chrono::Utc::now().checked_add_signed(chrono::Duration::seconds(config.session_ttl_secs));
        assert!(expires.is_some());
    }
}
