//! Bot settings loaded via OrthoConfig from `ARENA_BOT_*` variables.

use ortho_config::OrthoConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ARENA_BOT")]
pub struct BotSettings {
    /// Gateway token for the bot account.
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BotConfigError {
    #[error("ARENA_BOT_TOKEN must be set")]
    MissingToken,
}

impl BotSettings {
    /// The configured token, rejecting absent or blank values.
    pub fn token(&self) -> Result<&str, BotConfigError> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(BotConfigError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load() -> BotSettings {
        BotSettings::load_from_iter([OsString::from("arena-bot")]).expect("settings should load")
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   "))]
    fn missing_token_is_rejected(#[case] raw: Option<&str>) {
        let _guard = lock_env([("ARENA_BOT_TOKEN", raw.map(str::to_owned))]);
        assert_eq!(load().token(), Err(BotConfigError::MissingToken));
    }

    #[rstest]
    fn token_is_read_from_environment() {
        let _guard = lock_env([("ARENA_BOT_TOKEN", Some("secret-token".to_owned()))]);
        assert_eq!(load().token(), Ok("secret-token"));
    }
}
