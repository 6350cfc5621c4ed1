use chrono_tz::Tz;
use gemschihub_utils::create_random_secret;
use tracing::{info, warn};

const DEFAULT_PORT: usize = 5000;
const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Zurich;

/// Credentials for the FCM HTTP v1 api
#[derive(Debug, Clone)]
pub struct FcmConfig {
    pub project_id: String,
    /// OAuth2 bearer token with the `firebase.messaging` scope
    pub access_token: String,
    /// Overrides the api base url, used when testing against a local fake
    pub endpoint: Option<url::Url>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Postgres connection string. In-memory repositories are used without it.
    pub database_url: Option<String>,
    /// Timezone the club calendar lives in. Event dates and times are local to it.
    pub timezone: Tz,
    /// HS256 secret used to verify the bearer tokens issued by the auth provider
    pub jwt_secret: String,
    /// Subjects that are allowed to call privileged endpoints
    pub admin_user_ids: Vec<String>,
    /// Push delivery credentials. Pushes are only logged when absent.
    pub fcm: Option<FcmConfig>,
    /// Seconds between two runs of the reminder job
    pub reminder_interval_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                warn!("Did not find JWT_SECRET environment variable. Going to create one.");
                warn!("No issued bearer token will be accepted until JWT_SECRET is configured.");
                create_random_secret(32)
            }
        };

        let port = match std::env::var("PORT") {
            Ok(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, DEFAULT_PORT
                    );
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };

        let timezone = match std::env::var("GEMSCHIHUB_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given GEMSCHIHUB_TIMEZONE: {} is not valid, falling back to: {}.",
                        tz, DEFAULT_TIMEZONE
                    );
                    DEFAULT_TIMEZONE
                }
            },
            Err(_) => DEFAULT_TIMEZONE,
        };

        let admin_user_ids = std::env::var("ADMIN_USER_IDS")
            .map(|ids| parse_id_list(&ids))
            .unwrap_or_default();
        if admin_user_ids.is_empty() {
            info!("ADMIN_USER_IDS is empty, privileged endpoints are disabled.");
        }

        Self {
            port,
            database_url: std::env::var("DATABASE_URL").ok(),
            timezone,
            jwt_secret,
            admin_user_ids,
            fcm: fcm_config_from_env(),
            reminder_interval_secs: 5 * 60,
        }
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_user_ids.iter().any(|id| id == user_id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn fcm_config_from_env() -> Option<FcmConfig> {
    let project_id = std::env::var("FCM_PROJECT_ID").ok()?;
    let access_token = match std::env::var("FCM_ACCESS_TOKEN") {
        Ok(token) => token,
        Err(_) => {
            warn!("FCM_PROJECT_ID is set but FCM_ACCESS_TOKEN is missing. Pushes are only logged.");
            return None;
        }
    };
    let endpoint = match std::env::var("FCM_ENDPOINT") {
        Ok(endpoint) => match url::Url::parse(&endpoint) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Ignoring malformed FCM_ENDPOINT: {}. Error: {:?}", endpoint, e);
                None
            }
        },
        Err(_) => None,
    };
    Some(FcmConfig {
        project_id,
        access_token,
        endpoint,
    })
}

pub(crate) fn parse_id_list(ids: &str) -> Vec<String> {
    ids.split(',')
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use serial_test::serial;

    #[test]
    fn parses_admin_allowlist() {
        assert_eq!(
            parse_id_list(" uid-1, uid-2 ,,"),
            vec!["uid-1".to_string(), "uid-2".to_string()]
        );
        assert!(parse_id_list("").is_empty());
    }

    #[test]
    #[serial]
    fn checks_admins() {
        let mut config = Config::new();
        config.admin_user_ids = vec!["captain".into()];
        assert!(config.is_admin("captain"));
        assert!(!config.is_admin("player"));
    }

    #[test]
    #[serial]
    fn invalid_values_fall_back_to_defaults() {
        std::env::set_var("PORT", "eighty");
        std::env::set_var("GEMSCHIHUB_TIMEZONE", "Alps/Gemsberg");
        let config = Config::new();
        std::env::remove_var("PORT");
        std::env::remove_var("GEMSCHIHUB_TIMEZONE");

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.timezone, chrono_tz::Europe::Zurich);
    }

    #[test]
    #[serial]
    fn fcm_needs_project_and_token() {
        std::env::set_var("FCM_PROJECT_ID", "gemschihub");
        std::env::remove_var("FCM_ACCESS_TOKEN");
        assert!(fcm_config_from_env().is_none());

        std::env::set_var("FCM_ACCESS_TOKEN", "ya29.token");
        std::env::set_var("FCM_ENDPOINT", "not a url");
        let fcm = fcm_config_from_env();
        std::env::remove_var("FCM_PROJECT_ID");
        std::env::remove_var("FCM_ACCESS_TOKEN");
        std::env::remove_var("FCM_ENDPOINT");

        let fcm = fcm.unwrap();
        assert_eq!(fcm.project_id, "gemschihub");
        assert_eq!(fcm.access_token, "ya29.token");
        assert!(fcm.endpoint.is_none());
    }
}
