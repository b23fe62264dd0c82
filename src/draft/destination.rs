use super::*;

/// An address and decimal DCR amount to pay, exactly as supplied by the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
  pub address: String,
  pub amount: String,
}

impl Destination {
  /// Pairs addresses with amounts positionally.
  pub fn pair(addresses: Vec<String>, amounts: Vec<String>) -> SnafuResult<Vec<Self>> {
    if addresses.len() != amounts.len() {
      return error::MismatchedCounts {
        addresses: addresses.len(),
        amounts: amounts.len(),
      }
      .fail();
    }

    Ok(
      addresses
        .into_iter()
        .zip(amounts)
        .map(|(address, amount)| Self { address, amount })
        .collect(),
    )
  }

  pub(crate) fn assemble(&self, network: Network) -> SnafuResult<TxOut> {
    let address = self
      .address
      .parse::<Address>()
      .and_then(|address| address.require_network(network))
      .snafu_context(error::AddressParse {
        input: &self.address,
      })?;

    let amount = self
      .amount
      .parse::<Amount>()
      .snafu_context(error::InvalidAmount {
        input: &self.amount,
      })?;

    let script = address
      .script_pubkey()
      .snafu_context(error::UnsupportedAddressType {
        address: &self.address,
      })?;

    Ok(TxOut::new(amount, script))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pair() {
    assert_eq!(
      Destination::pair(vec!["a".into(), "b".into()], vec!["1".into(), "2".into()]).unwrap(),
      vec![
        Destination {
          address: "a".into(),
          amount: "1".into(),
        },
        Destination {
          address: "b".into(),
          amount: "2".into(),
        },
      ],
    );
  }

  #[test]
  fn mismatched_counts() {
    assert_matches!(
      Destination::pair(vec!["a".into(), "b".into()], vec!["1".into()]),
      Err(SnafuError::MismatchedCounts {
        addresses: 2,
        amounts: 1
      })
    );
  }

  #[test]
  fn assemble() {
    let output = destination(1, "0.5").assemble(Network::Mainnet).unwrap();

    assert_eq!(output.value, Amount::from_atoms(50_000_000));
    assert_eq!(output.version, 0);
    assert_eq!(output.pk_script, script::pay_to_pubkey_hash(&[1; 20]));
  }

  #[test]
  fn assemble_script_hash() {
    let output = Destination {
      address: "Dcur2mcGjmENx4DhNqDctW5wJCVyT3Qeqkx".into(),
      amount: "1".into(),
    }
    .assemble(Network::Mainnet)
    .unwrap();

    assert_eq!(
      hex::encode(output.pk_script),
      "a914f5916158e3e2c4551c1796708db8367207ed13bb87"
    );
  }

  #[test]
  fn invalid_address() {
    assert_matches!(
      Destination {
        address: "0OIl".into(),
        amount: "1".into(),
      }
      .assemble(Network::Mainnet),
      Err(SnafuError::AddressParse { input, source: address::Error::Base58 }) if input == "0OIl"
    );
  }

  #[test]
  fn wrong_network() {
    assert_matches!(
      destination(1, "1").assemble(Network::Testnet),
      Err(SnafuError::AddressParse {
        source: address::Error::Network {
          actual: Network::Mainnet,
          expected: Network::Testnet,
        },
        ..
      })
    );
  }

  #[test]
  fn invalid_amount() {
    for amount in ["", "-1", "1.000000001", "abc", "21000001", "99999999999999999999"] {
      let err = destination(1, amount)
        .assemble(Network::Mainnet)
        .unwrap_err();

      assert_eq!(err.kind(), ErrorKind::Validation);
      assert_matches!(err, SnafuError::InvalidAmount { input, .. } if input == amount);
    }
  }

  #[test]
  fn pubkey_address_is_unsupported() {
    assert_matches!(
      Destination {
        address: "DkM6VbuFFEkoJrCA3WF5cTiRr4FQrcytH6cm3DaPCKFhgREkV1Fi6".into(),
        amount: "1".into(),
      }
      .assemble(Network::Mainnet),
      Err(SnafuError::UnsupportedAddressType { .. })
    );
  }
}
