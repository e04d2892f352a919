use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "p9s", about = "k9s-style terminal UI for playbook runs")]
pub struct Cli {
    /// Server base URL (scheme://host[:port])
    #[arg(long, env = "P9S_URL", default_value = "http://localhost:8065")]
    pub url: String,

    /// Personal access token used as the bearer token
    #[arg(long, env = "P9S_TOKEN")]
    pub token: Option<String>,

    /// Team to scope the run list to
    #[arg(long, env = "P9S_TEAM")]
    pub team: Option<String>,

    /// How user names are rendered: username, full_name, or nickname_full_name
    #[arg(long, env = "P9S_NAME_DISPLAY")]
    pub name_display: Option<String>,

    /// Polling interval in seconds
    #[arg(long, default_value = "3")]
    pub poll_interval: u64,

    /// Log file path
    #[arg(long, env = "P9S_LOG_FILE")]
    pub log_file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub token: Option<String>,
    pub team: Option<String>,
    pub name_display: Option<String>,
    pub poll_interval: Option<u64>,
}

impl ConfigFile {
    pub fn load() -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        let config_path = config_dir.join("p9s").join("config.toml");
        let content = std::fs::read_to_string(config_path).ok()?;
        toml::from_str(&content).ok()
    }
}
