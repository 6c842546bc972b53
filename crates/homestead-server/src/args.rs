use clap::Parser;
use homestead_server::config::ServerConfig;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "homestead-server")]
#[command(about = "Serve customer records from a YAML file over HTTP", long_about = None)]
pub struct Cli {
    /// Config file (default: ./homestead.toml, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Customer document to serve
    #[arg(short, long)]
    pub data_file: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long, env = "HOMESTEAD_LOG_JSON")]
    pub log_json: bool,
}

impl Cli {
    /// Flags given on the command line override loaded configuration.
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(path) = &self.data_file {
            config.store.data_file = path.clone();
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}
