use super::*;

/// Caller-supplied `<TXID>:<INDEX>` naming a credit to spend.
#[derive(
  Debug,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Copy,
  Clone,
  Hash,
  DeserializeFromStr,
  SerializeDisplay,
)]
pub struct UtxoReference {
  pub hash: TxHash,
  pub index: u32,
}

impl Display for UtxoReference {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}:{}", self.hash, self.index)
  }
}

impl FromStr for UtxoReference {
  type Err = SnafuError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.split_once(':')
      .and_then(|(hash, index)| {
        Some(Self {
          hash: hash.parse().ok()?,
          index: index.parse().ok()?,
        })
      })
      .snafu_context(error::MalformedReference { input: s })
  }
}
