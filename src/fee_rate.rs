use super::*;

/// Fee rate in atoms per kilobyte.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct FeeRate(u64);

impl FeeRate {
  pub const DEFAULT: Self = Self(10_000);

  /// Serialized size of the smallest output worth creating.
  const DUST_SIZE: usize = 200;

  pub const fn from_atoms_per_kb(rate: u64) -> Self {
    Self(rate)
  }

  pub const fn atoms_per_kb(self) -> u64 {
    self.0
  }

  /// Fee for `size` bytes, truncated toward zero.
  pub fn fee(self, size: usize) -> SnafuResult<Amount> {
    u64::try_from(size)
      .ok()
      .and_then(|size| size.checked_mul(self.0))
      .map(|fee| fee / 1000)
      .and_then(|fee| i64::try_from(fee).ok())
      .map(Amount::from_atoms)
      .snafu_context(error::ValueOverflow)
  }

  pub fn dust_limit(self) -> SnafuResult<Amount> {
    self.fee(Self::DUST_SIZE)
  }
}

impl Default for FeeRate {
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl Display for FeeRate {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for FeeRate {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::try_from(
      s.parse::<u64>()
        .with_context(|| format!("invalid fee rate `{s}`, expected atoms per kilobyte"))?,
    )
  }
}

impl TryFrom<u64> for FeeRate {
  type Error = Error;

  fn try_from(rate: u64) -> Result<Self, Self::Error> {
    ensure!(rate > 0, "fee rate must be greater than zero");
    Ok(Self(rate))
  }
}

impl From<FeeRate> for u64 {
  fn from(rate: FeeRate) -> Self {
    rate.0
  }
}
