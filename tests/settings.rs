use super::*;

#[test]
fn config_file_in_config_dir() {
  let output = CommandBuilder::new("policy")
    .write("dcrdraft.yaml", "fee_rate: 4000\nnetwork: regnet\n")
    .run_and_deserialize_output::<Policy>();

  assert_eq!(output.fee_rate.atoms_per_kb(), 4000);
  assert_eq!(output.network, Network::Regnet);
}

#[test]
fn explicit_config_file() {
  let tempdir = TempDir::new().unwrap();
  let config = tempdir.path().join("custom.yaml");
  fs::write(&config, "fee_rate: 3000\n").unwrap();

  let output = CommandBuilder::new(vec![
    "--config".to_string(),
    config.to_str().unwrap().to_string(),
    "policy".to_string(),
  ])
  .run_and_deserialize_output::<Policy>();

  assert_eq!(output.fee_rate.atoms_per_kb(), 3000);
}

#[test]
fn environment_overrides_config_file() {
  let output = CommandBuilder::new("policy")
    .write("dcrdraft.yaml", "fee_rate: 4000\nnetwork: regnet\n")
    .env("DCRDRAFT_FEE_RATE", "5000")
    .run_and_deserialize_output::<Policy>();

  assert_eq!(output.fee_rate.atoms_per_kb(), 5000);
  assert_eq!(output.network, Network::Regnet);
}

#[test]
fn arguments_override_environment() {
  let output = CommandBuilder::new("--fee-rate 6000 --testnet policy")
    .env("DCRDRAFT_FEE_RATE", "5000")
    .env("DCRDRAFT_NETWORK", "simnet")
    .run_and_deserialize_output::<Policy>();

  assert_eq!(output.fee_rate.atoms_per_kb(), 6000);
  assert_eq!(output.network, Network::Testnet);
}

#[test]
fn invalid_config_file() {
  CommandBuilder::new("policy")
    .write("dcrdraft.yaml", "fee_rate: fast\n")
    .expected_exit_code(1)
    .stderr_regex("error: failed to parse config `.*dcrdraft.yaml`\n\nbecause:\n- .*")
    .run_and_extract_stdout();
}

#[test]
fn invalid_environment_variable() {
  CommandBuilder::new("policy")
    .env("DCRDRAFT_NETWORK", "moon")
    .expected_exit_code(1)
    .expected_stderr(
      "error: failed to parse environment variable DCRDRAFT_NETWORK with value `moon`: invalid network `moon`\n",
    )
    .run_and_extract_stdout();
}

#[test]
fn wallet_credentials_from_environment() {
  let wallet = MockWallet::spawn();

  let utxo = wallet.credit(100_000_000);

  let output = CommandBuilder::new(format!(
    "build --utxo {utxo} --dest {} --amount 0.5",
    destination(1)
  ))
  .env("DCRDRAFT_WALLET_RPC_URL", wallet.url())
  .env("DCRDRAFT_WALLET_RPC_USERNAME", MockWallet::USERNAME)
  .env("DCRDRAFT_WALLET_RPC_PASSWORD", MockWallet::PASSWORD)
  .run_and_deserialize_output::<Build>();

  assert_eq!(output.fee, Amount::from_atoms(2530));
}

#[test]
fn wallet_credentials_from_config_file() {
  let wallet = MockWallet::spawn();

  let utxo = wallet.credit(100_000_000);

  let output = CommandBuilder::new(format!(
    "build --utxo {utxo} --dest {} --amount 0.5",
    destination(1)
  ))
  .write(
    "dcrdraft.yaml",
    format!(
      "wallet_rpc_url: {}\nwallet_rpc_username: {}\nwallet_rpc_password: {}\nwallet_rpc_timeout: 10s\n",
      wallet.url(),
      MockWallet::USERNAME,
      MockWallet::PASSWORD,
    ),
  )
  .run_and_deserialize_output::<Build>();

  assert_eq!(output.fee, Amount::from_atoms(2530));
}
