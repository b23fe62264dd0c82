use {super::*, serde_with::DisplayFromStr};

#[serde_with::serde_as]
#[derive(Deserialize, Default, PartialEq, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
  pub(crate) fee_rate: Option<FeeRate>,
  pub(crate) network: Option<Network>,
  pub(crate) wallet_rpc_cert: Option<PathBuf>,
  pub(crate) wallet_rpc_password: Option<String>,
  #[serde_as(as = "Option<DisplayFromStr>")]
  pub(crate) wallet_rpc_timeout: Option<humantime::Duration>,
  pub(crate) wallet_rpc_url: Option<String>,
  pub(crate) wallet_rpc_username: Option<String>,
}

impl Config {
  pub(crate) const FILE_NAME: &'static str = "dcrdraft.yaml";

  pub(crate) fn load(path: &Path) -> Result<Self> {
    serde_yaml::from_reader(
      File::open(path).with_context(|| format!("failed to open config `{}`", path.display()))?,
    )
    .with_context(|| format!("failed to parse config `{}`", path.display()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_config_is_default() {
    assert_eq!(serde_yaml::from_str::<Config>("{}").unwrap(), Config::default());
  }

  #[test]
  fn fields() {
    let config = serde_yaml::from_str::<Config>(
      "
fee_rate: 20000
network: testnet
wallet_rpc_timeout: 1m 30s
wallet_rpc_url: 127.0.0.1:19110
",
    )
    .unwrap();

    assert_eq!(
      config,
      Config {
        fee_rate: Some(FeeRate::from_atoms_per_kb(20_000)),
        network: Some(Network::Testnet),
        wallet_rpc_timeout: Some(Duration::from_secs(90).into()),
        wallet_rpc_url: Some("127.0.0.1:19110".into()),
        ..default()
      },
    );
  }

  #[test]
  fn unknown_fields_are_rejected() {
    assert!(serde_yaml::from_str::<Config>("hidden: []").is_err());
  }

  #[test]
  fn invalid_values_are_rejected() {
    assert!(serde_yaml::from_str::<Config>("fee_rate: 0").is_err());
    assert!(serde_yaml::from_str::<Config>("wallet_rpc_timeout: soon").is_err());
  }

  #[test]
  fn example_config_file_is_valid() {
    Config::load(Path::new("dcrdraft.yaml")).unwrap();
  }
}
