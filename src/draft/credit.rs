use super::*;

/// A credit owned by the wallet, resolved from a [`UtxoReference`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credit {
  pub reference: UtxoReference,
  pub amount: Amount,
  pub output_script: Vec<u8>,
  pub tree: Tree,
}

impl Credit {
  pub(crate) fn resolve<W: WalletService + ?Sized>(
    wallet: &W,
    reference: UtxoReference,
  ) -> SnafuResult<Self> {
    let record = wallet
      .lookup(&reference)?
      .snafu_context(error::NotFound { reference })?;

    let tree = record.category.tree();

    let expected = match tree {
      Tree::Regular => script::PUBKEY_HASH_LEN,
      Tree::Stake => script::STAKE_PUBKEY_HASH_LEN,
    };

    if record.output_script.len() != expected {
      return error::UnsupportedScript {
        expected,
        length: record.output_script.len(),
        reference,
        tree,
      }
      .fail();
    }

    Ok(Self {
      reference,
      amount: record.amount,
      output_script: record.output_script,
      tree,
    })
  }

  pub(crate) fn input(&self) -> TxIn {
    TxIn::new(
      OutPoint {
        hash: self.reference.hash,
        index: self.reference.index,
        tree: self.tree,
      },
      self.amount,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolve_regular() {
    let wallet = FakeWallet::with_credits([(reference(1, 0), regular_credit(1000))]);

    let credit = Credit::resolve(&wallet, reference(1, 0)).unwrap();

    assert_eq!(credit.amount, Amount::from_atoms(1000));
    assert_eq!(credit.tree, Tree::Regular);
    assert_eq!(
      credit.input(),
      TxIn::new(
        OutPoint {
          hash: txid(1),
          index: 0,
          tree: Tree::Regular,
        },
        Amount::from_atoms(1000),
      ),
    );
  }

  #[test]
  fn resolve_stake() {
    for category in [
      TransactionCategory::TicketPurchase,
      TransactionCategory::Vote,
      TransactionCategory::Revocation,
    ] {
      let wallet = FakeWallet::with_credits([(reference(1, 0), stake_credit(1000, category))]);

      let credit = Credit::resolve(&wallet, reference(1, 0)).unwrap();

      assert_eq!(credit.tree, Tree::Stake);
      assert_eq!(credit.input().previous_output.tree, Tree::Stake);
    }
  }

  #[test]
  fn not_found() {
    let wallet = FakeWallet::with_credits([(reference(1, 0), regular_credit(1000))]);

    assert_matches!(
      Credit::resolve(&wallet, reference(1, 1)),
      Err(SnafuError::NotFound { reference: r }) if r == reference(1, 1)
    );
  }

  #[test]
  fn script_length_must_match_tree() {
    #[track_caller]
    fn case(length: usize, category: TransactionCategory, expected: usize) {
      let wallet = FakeWallet::with_credits([(
        reference(1, 0),
        CreditRecord {
          amount: Amount::ONE_DCR,
          output_script: vec![0; length],
          category,
        },
      )]);

      let err = Credit::resolve(&wallet, reference(1, 0)).unwrap_err();

      assert_eq!(err.kind(), ErrorKind::Validation);
      assert_matches!(
        err,
        SnafuError::UnsupportedScript { expected: e, length: l, .. } if e == expected && l == length
      );
    }

    case(24, TransactionCategory::Regular, 25);
    case(26, TransactionCategory::Regular, 25);
    case(27, TransactionCategory::Regular, 25);
    case(23, TransactionCategory::Regular, 25);
    case(0, TransactionCategory::Regular, 25);
    case(25, TransactionCategory::Vote, 26);
    case(27, TransactionCategory::TicketPurchase, 26);
  }

  #[test]
  fn unsupported_script_message() {
    let wallet = FakeWallet::with_credits([(
      reference(1, 0),
      CreditRecord {
        amount: Amount::ONE_DCR,
        output_script: vec![0; 23],
        category: TransactionCategory::Regular,
      },
    )]);

    assert_eq!(
      Credit::resolve(&wallet, reference(1, 0))
        .unwrap_err()
        .to_string(),
      format!(
        "output script of {}:0 is 23 bytes, only 25-byte pay-to-pubkey-hash scripts are supported in the regular tree",
        "01".repeat(32)
      ),
    );
  }
}
