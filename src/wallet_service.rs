use super::*;

pub use self::json_rpc::JsonRpcWallet;

mod json_rpc;

/// Kind of transaction a credit was received in, as reported by the wallet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionCategory {
  Regular,
  TicketPurchase,
  Vote,
  Revocation,
}

impl TransactionCategory {
  pub fn from_wallet_type(kind: &str) -> Self {
    match kind {
      "ticket" => Self::TicketPurchase,
      "vote" => Self::Vote,
      "revocation" => Self::Revocation,
      _ => Self::Regular,
    }
  }

  pub fn tree(self) -> Tree {
    match self {
      Self::Regular => Tree::Regular,
      Self::TicketPurchase | Self::Vote | Self::Revocation => Tree::Stake,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditRecord {
  pub amount: Amount,
  pub output_script: Vec<u8>,
  pub category: TransactionCategory,
}

/// Operations the draft builder and the sign/publish flow need from a wallet.
pub trait WalletService {
  /// Returns `None` if the wallet has no credit at `reference`.
  fn lookup(&self, reference: &UtxoReference) -> SnafuResult<Option<CreditRecord>>;

  fn validate_ownership(&self, address: &Address) -> SnafuResult<bool>;

  /// Fresh address from the internal chain of `account`.
  fn derive_change_address(&self, account: &str) -> SnafuResult<Address>;

  fn sign(&self, unsigned: &[u8], passphrase: &str) -> SnafuResult<Vec<u8>>;

  fn broadcast(&self, signed: &[u8]) -> SnafuResult<TxHash>;
}
