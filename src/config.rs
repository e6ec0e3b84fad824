use std::{env, path::PathBuf};

const DEFAULT_DECK_PATH: &str = "data/players.json";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum Error {
    #[error("Expected DISCORD_TOKEN in the environment")]
    MissingToken,
    #[error("GUILD_ID must be a non-zero number, got `{0}`")]
    InvalidGuildId(String),
}

/// Settings read from the environment (and `.env`, when present).
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Config {
    pub token: String,
    /// Where the player document lives. `DECK_PATH`, or `data/players.json`.
    pub deck_path: PathBuf,
    /// Register commands in this guild only. Commands are registered globally without it.
    pub guild_id: Option<u64>,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::MissingToken)?;

        let deck_path = lookup("DECK_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DECK_PATH.to_string())
            .into();

        let guild_id = match lookup("GUILD_ID").filter(|g| !g.trim().is_empty()) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(id) if id != 0 => Some(id),
                _ => return Err(Error::InvalidGuildId(raw)),
            },
            None => None,
        };

        Ok(Config {
            token,
            deck_path,
            guild_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn token_is_required() {
        assert_eq!(config(&[]), Err(Error::MissingToken));
        assert_eq!(config(&[("DISCORD_TOKEN", " ")]), Err(Error::MissingToken));
    }

    #[test]
    fn defaults() {
        let config = config(&[("DISCORD_TOKEN", "abc")]).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.deck_path, PathBuf::from("data/players.json"));
        assert_eq!(config.guild_id, None);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("DISCORD_TOKEN", "abc"),
            ("DECK_PATH", "/var/lib/deck/players.json"),
            ("GUILD_ID", "1234"),
        ])
        .unwrap();
        assert_eq!(config.deck_path, PathBuf::from("/var/lib/deck/players.json"));
        assert_eq!(config.guild_id, Some(1234));
    }

    #[test]
    fn bad_guild_id() {
        for raw in ["guild", "0", "-5"] {
            assert_eq!(
                config(&[("DISCORD_TOKEN", "abc"), ("GUILD_ID", raw)]),
                Err(Error::InvalidGuildId(raw.to_string()))
            );
        }
    }
}
