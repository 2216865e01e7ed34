use std::env;
use std::str::FromStr;

/// How repeated ingestion treats a medication whose name is already stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestPolicy {
    /// Always insert a new row; repeated passes accumulate duplicates
    #[default]
    Append,
    /// Update the first row with the same exact name, insert otherwise
    UpsertByName,
}

impl FromStr for IngestPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "append" => Ok(IngestPolicy::Append),
            "upsert" | "upsert_by_name" => Ok(IngestPolicy::UpsertByName),
            other => Err(format!("unknown ingest policy '{}'", other)),
        }
    }
}

/// External medication feed settings
#[derive(Debug, Clone)]
pub struct FeedSource {
    /// No feed pass runs when unset
    pub url: Option<String>,
    pub limit: u32,
    pub timeout_secs: u64,
}

impl Default for FeedSource {
    fn default() -> Self {
        Self {
            url: None,
            limit: 100,
            timeout_secs: 15,
        }
    }
}

/// Raw feed key (dotted path) supplying each medication field.
///
/// Defaults follow the openFDA drug label layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    pub name: String,
    pub description: String,
    pub side_effects: String,
    pub dosage: String,
    pub indications: String,
    pub contraindications: String,
    pub pharmacokinetics: String,
    pub interactions: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            name: "openfda.brand_name".to_string(),
            description: "description".to_string(),
            side_effects: "adverse_reactions".to_string(),
            dosage: "dosage_and_administration".to_string(),
            indications: "indications_and_usage".to_string(),
            contraindications: "contraindications".to_string(),
            pharmacokinetics: "pharmacokinetics".to_string(),
            interactions: "drug_interactions".to_string(),
        }
    }
}

impl FieldMap {
    /// Apply `MEDIMATE_FIELD_<NAME>` overrides, e.g. `MEDIMATE_FIELD_SIDE_EFFECTS=warnings`.
    fn with_env_overrides(mut self) -> Self {
        let slots: [(&str, &mut String); 8] = [
            ("NAME", &mut self.name),
            ("DESCRIPTION", &mut self.description),
            ("SIDE_EFFECTS", &mut self.side_effects),
            ("DOSAGE", &mut self.dosage),
            ("INDICATIONS", &mut self.indications),
            ("CONTRAINDICATIONS", &mut self.contraindications),
            ("PHARMACOKINETICS", &mut self.pharmacokinetics),
            ("INTERACTIONS", &mut self.interactions),
        ];
        for (suffix, slot) in slots {
            if let Ok(key) = env::var(format!("MEDIMATE_FIELD_{}", suffix)) {
                if !key.trim().is_empty() {
                    *slot = key.trim().to_string();
                }
            }
        }
        self
    }
}

#[derive(Clone)]
pub struct Config {
    pub bind_host: String,
    pub port: u16,
    pub database_url: String,
    /// Treat any non-command text as a medication search
    pub implicit_search_enabled: bool,
    pub seed_sample_data: bool,
    pub ingest_policy: IngestPolicy,
    pub feed: FeedSource,
    pub field_map: FieldMap,
    /// Chat transport credential; injected only, never defaulted
    pub bot_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_host: "127.0.0.1".to_string(),
            port: 9110,
            database_url: "./medibot.db".to_string(),
            implicit_search_enabled: false,
            seed_sample_data: true,
            ingest_policy: IngestPolicy::Append,
            feed: FeedSource::default(),
            field_map: FieldMap::default(),
            bot_token: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            bind_host: env::var("MEDIMATE_HOST").unwrap_or(defaults.bind_host),
            port: parse_var("MEDIMATE_PORT", defaults.port),
            database_url: env::var("MEDIMATE_DB_PATH").unwrap_or(defaults.database_url),
            implicit_search_enabled: parse_flag(
                "MEDIMATE_IMPLICIT_SEARCH",
                defaults.implicit_search_enabled,
            ),
            seed_sample_data: parse_flag("MEDIMATE_SEED", defaults.seed_sample_data),
            ingest_policy: parse_var("MEDIMATE_INGEST_POLICY", defaults.ingest_policy),
            feed: FeedSource {
                url: env::var("MEDIMATE_FEED_URL")
                    .ok()
                    .filter(|u| !u.trim().is_empty()),
                limit: parse_var("MEDIMATE_FEED_LIMIT", defaults.feed.limit),
                timeout_secs: parse_var("MEDIMATE_FEED_TIMEOUT_SECS", defaults.feed.timeout_secs),
            },
            field_map: FieldMap::default().with_env_overrides(),
            bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
        }
    }
}

// Token is redacted
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_host", &self.bind_host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("implicit_search_enabled", &self.implicit_search_enabled)
            .field("seed_sample_data", &self.seed_sample_data)
            .field("ingest_policy", &self.ingest_policy)
            .field("feed", &self.feed)
            .field("field_map", &self.field_map)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{}='{}' is not valid, using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}

fn parse_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                log::warn!("{}='{}' is not a boolean, using default", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}
