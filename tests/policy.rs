use super::*;

#[test]
fn default_policy() {
  pretty_assert_eq!(
    CommandBuilder::new("policy").run_and_deserialize_output::<Policy>(),
    Policy {
      change_output_size: 36,
      dust_limit: Amount::from_atoms(2000),
      fee_rate: "10000".parse().unwrap(),
      input_signature_overhead: 108,
      network: Network::Mainnet,
    }
  );
}

#[test]
fn fee_rate_flag() {
  let output = CommandBuilder::new("--fee-rate 2500 --simnet policy")
    .run_and_deserialize_output::<Policy>();

  assert_eq!(output.fee_rate.atoms_per_kb(), 2500);
  assert_eq!(output.dust_limit, Amount::from_atoms(500));
  assert_eq!(output.network, Network::Simnet);
}

#[test]
fn minified_output() {
  CommandBuilder::new("--format minify policy")
    .expected_stdout(
      r#"{"change_output_size":36,"dust_limit":2000,"fee_rate":10000,"input_signature_overhead":108,"network":"mainnet"}
"#,
    )
    .run_and_extract_stdout();
}

#[test]
fn yaml_output() {
  CommandBuilder::new("--format yaml policy")
    .expected_stdout(
      "change_output_size: 36
dust_limit: 2000
fee_rate: 10000
input_signature_overhead: 108
network: mainnet

",
    )
    .run_and_extract_stdout();
}

#[test]
fn zero_fee_rate_is_rejected() {
  CommandBuilder::new("--fee-rate 0 policy")
    .expected_exit_code(2)
    .stderr_regex(".*fee rate must be greater than zero.*")
    .run_and_extract_stdout();
}
