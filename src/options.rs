use super::*;

#[derive(Clone, Default, Debug, Parser)]
#[command(group(
  ArgGroup::new("networks")
    .required(false)
    .args(&["network_argument", "regnet", "simnet", "testnet"]),
))]
pub struct Options {
  #[arg(long, help = "Load configuration from <CONFIG>.")]
  pub(crate) config: Option<PathBuf>,
  #[arg(long, help = "Load configuration from <CONFIG_DIR>.")]
  pub(crate) config_dir: Option<PathBuf>,
  #[arg(long, help = "Pay <FEE_RATE> atoms per kilobyte. [default: 10000]")]
  pub(crate) fee_rate: Option<FeeRate>,
  #[arg(long, short, help = "Specify output format. [default: json]")]
  pub(crate) format: Option<OutputFormat>,
  #[arg(long = "network", value_enum, help = "Use <NETWORK>. [default: mainnet]")]
  pub(crate) network_argument: Option<Network>,
  #[arg(long, short, help = "Use regnet. Equivalent to `--network regnet`.")]
  pub(crate) regnet: bool,
  #[arg(long, short, help = "Use simnet. Equivalent to `--network simnet`.")]
  pub(crate) simnet: bool,
  #[arg(long, short, help = "Use testnet. Equivalent to `--network testnet`.")]
  pub(crate) testnet: bool,
  #[arg(
    long,
    help = "Trust the wallet JSON-RPC TLS certificate at <WALLET_RPC_CERT>."
  )]
  pub(crate) wallet_rpc_cert: Option<PathBuf>,
  #[arg(
    long,
    help = "Authenticate to the wallet JSON-RPC with <WALLET_RPC_PASSWORD>."
  )]
  pub(crate) wallet_rpc_password: Option<String>,
  #[arg(
    long,
    help = "Abandon wallet requests after <WALLET_RPC_TIMEOUT>, e.g. `10s`. [default: 5s]"
  )]
  pub(crate) wallet_rpc_timeout: Option<humantime::Duration>,
  #[arg(long, help = "Connect to the wallet JSON-RPC at <WALLET_RPC_URL>.")]
  pub(crate) wallet_rpc_url: Option<String>,
  #[arg(
    long,
    help = "Authenticate to the wallet JSON-RPC as <WALLET_RPC_USERNAME>."
  )]
  pub(crate) wallet_rpc_username: Option<String>,
}
