use super::*;

/// Effective configuration. Each value comes from, in order of precedence,
/// the command line, a `DCRDRAFT_*` environment variable, the config file, or
/// a default.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Settings {
  fee_rate: FeeRate,
  network: Network,
  wallet_rpc_cert: Option<PathBuf>,
  wallet_rpc_password: Option<String>,
  wallet_rpc_timeout: Duration,
  wallet_rpc_url: Option<String>,
  wallet_rpc_username: Option<String>,
}

impl Settings {
  const ENV_PREFIX: &'static str = "DCRDRAFT_";

  pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

  pub fn load(options: Options) -> SnafuResult<Self> {
    let config = match &options.config {
      Some(path) => Config::load(path)?,
      None => match &options.config_dir {
        Some(dir) if dir.join(Config::FILE_NAME).exists() => {
          Config::load(&dir.join(Config::FILE_NAME))?
        }
        Some(_) | None => Config::default(),
      },
    };

    Self::merge(options, &Self::from_env()?, config)
  }

  fn from_env() -> SnafuResult<BTreeMap<String, String>> {
    let mut env = BTreeMap::new();

    for (variable, value) in env::vars_os() {
      let Some(variable) = variable.to_str() else {
        continue;
      };

      let Some(key) = variable.strip_prefix(Self::ENV_PREFIX) else {
        continue;
      };

      let value = value.into_string().map_err(|value| {
        error::EnvVarUnicode {
          value,
          variable: variable.to_string(),
        }
        .build()
      })?;

      env.insert(key.into(), value);
    }

    Ok(env)
  }

  pub(crate) fn merge(
    options: Options,
    env: &BTreeMap<String, String>,
    config: Config,
  ) -> SnafuResult<Self> {
    let network = Self::setting_typed(
      options
        .testnet
        .then_some(Network::Testnet)
        .or(options.simnet.then_some(Network::Simnet))
        .or(options.regnet.then_some(Network::Regnet))
        .or(options.network_argument),
      env,
      "NETWORK",
      config.network,
    )?
    .unwrap_or_default();

    let fee_rate = Self::setting_typed(options.fee_rate, env, "FEE_RATE", config.fee_rate)?
      .unwrap_or_default();

    let wallet_rpc_timeout = Self::setting_typed(
      options.wallet_rpc_timeout,
      env,
      "WALLET_RPC_TIMEOUT",
      config.wallet_rpc_timeout,
    )?
    .map(Duration::from)
    .unwrap_or(Self::DEFAULT_TIMEOUT);

    Ok(Self {
      fee_rate,
      network,
      wallet_rpc_cert: Self::setting(
        options.wallet_rpc_cert.map(|path| path.display().to_string()),
        env,
        "WALLET_RPC_CERT",
        config.wallet_rpc_cert.map(|path| path.display().to_string()),
      )
      .map(PathBuf::from),
      wallet_rpc_password: Self::setting(
        options.wallet_rpc_password,
        env,
        "WALLET_RPC_PASSWORD",
        config.wallet_rpc_password,
      ),
      wallet_rpc_timeout,
      wallet_rpc_url: Self::setting(
        options.wallet_rpc_url,
        env,
        "WALLET_RPC_URL",
        config.wallet_rpc_url,
      ),
      wallet_rpc_username: Self::setting(
        options.wallet_rpc_username,
        env,
        "WALLET_RPC_USERNAME",
        config.wallet_rpc_username,
      ),
    })
  }

  pub fn network(&self) -> Network {
    self.network
  }

  pub fn fee_policy(&self) -> FeePolicy {
    FeePolicy::new(self.fee_rate)
  }

  pub fn draft_builder(&self) -> DraftBuilder {
    DraftBuilder::new(self.network, self.fee_policy())
  }

  pub(crate) fn wallet_rpc_url(&self) -> String {
    self
      .wallet_rpc_url
      .clone()
      .unwrap_or_else(|| format!("127.0.0.1:{}", self.network.default_wallet_rpc_port()))
  }

  /// The configured certificate, or the wallet's own if it exists.
  pub(crate) fn wallet_rpc_cert(&self) -> Result<Option<PathBuf>> {
    if let Some(path) = &self.wallet_rpc_cert {
      return Ok(Some(path.clone()));
    }

    let dir = if cfg!(target_os = "linux") {
      dirs::home_dir()
        .ok_or_else(|| anyhow!("failed to get wallet certificate path: could not get home dir"))?
        .join(".dcrwallet")
    } else {
      dirs::data_local_dir()
        .ok_or_else(|| anyhow!("failed to get wallet certificate path: could not get data dir"))?
        .join("Dcrwallet")
    };

    let path = dir.join("rpc.cert");

    Ok(path.is_file().then_some(path))
  }

  pub fn wallet(&self) -> Result<JsonRpcWallet> {
    let username = self
      .wallet_rpc_username
      .clone()
      .context("no wallet RPC username specified")?;

    let password = self
      .wallet_rpc_password
      .clone()
      .context("no wallet RPC password specified")?;

    let certificate = self.wallet_rpc_cert()?;

    if let Some(certificate) = &certificate {
      log::info!(
        "Trusting wallet certificate at `{}`",
        certificate.display()
      );
    }

    JsonRpcWallet::new(
      &self.wallet_rpc_url(),
      username,
      password,
      certificate.as_deref(),
      self.wallet_rpc_timeout,
      self.network,
    )
  }

  fn setting_typed<T>(
    arg_value: Option<T>,
    env: &BTreeMap<String, String>,
    env_key: &str,
    config_value: Option<T>,
  ) -> Result<Option<T>>
  where
    T: FromStr,
    T::Err: Display,
  {
    if let Some(arg_value) = arg_value {
      return Ok(Some(arg_value));
    }

    if let Some(env_value) = env.get(env_key) {
      return env_value.parse().map(Some).map_err(|err| {
        anyhow!(
          "failed to parse environment variable {}{env_key} with value `{env_value}`: {err}",
          Self::ENV_PREFIX
        )
      });
    }

    Ok(config_value)
  }

  fn setting(
    arg_value: Option<String>,
    env: &BTreeMap<String, String>,
    env_key: &str,
    config_value: Option<String>,
  ) -> Option<String> {
    arg_value
      .or_else(|| env.get(env_key).cloned())
      .or(config_value)
  }
}
