//! Command Line Interface (CLI) arguments.

use clap::Parser;

/// KYC registry command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// The IP address on which the server should listen
    #[arg(long, default_value = "0.0.0.0", env = "KYC_REGISTRY_HOST")]
    pub host: String,
    /// The port to which the server should bind
    #[arg(long, default_value_t = 3000, env = "KYC_REGISTRY_PORT")]
    pub port: u16,
    /// Path to the JSON file holding the client records
    #[arg(long, default_value = "data/clients.json", env = "KYC_REGISTRY_DATA_FILE")]
    pub data_file: String,
    /// Optional directory of static assets served for paths outside the API
    #[arg(long, env = "KYC_REGISTRY_PUBLIC_DIR")]
    pub public_dir: Option<String>,
    /// Flag indicating whether HTTPS should be used
    #[arg(long, default_value_t = false, env = "KYC_REGISTRY_HTTPS")]
    pub https: bool,
    /// Path to the certificate file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/kyc-registry/certs/cert.pem",
        env = "KYC_REGISTRY_CERT_FILE"
    )]
    pub cert_file: String,
    /// Path to the key file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/kyc-registry/certs/key.pem",
        env = "KYC_REGISTRY_KEY_FILE"
    )]
    pub key_file: String,
    /// Maximum time in seconds to wait for requests to complete upon receiving `ctrl+c` signal.
    #[arg(long, default_value_t = 60, env = "KYC_REGISTRY_SHUTDOWN_TIMEOUT")]
    pub graceful_shutdown_timeout: u64,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
