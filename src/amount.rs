use super::*;

const ATOMS_PER_COIN: u64 = 100_000_000;
const DECIMAL_PLACES: usize = 8;

#[derive(Debug, PartialEq)]
pub enum Error {
  Empty,
  ExcessivePrecision,
  InvalidDigit,
  OutOfRange,
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Empty => write!(f, "empty amount"),
      Self::ExcessivePrecision => write!(
        f,
        "excessive precision, amounts have at most {DECIMAL_PLACES} decimal places"
      ),
      Self::InvalidDigit => write!(f, "invalid digit found in amount"),
      Self::OutOfRange => write!(f, "amount exceeds maximum of {}", Amount::MAX),
    }
  }
}

impl std::error::Error for Error {}

/// A signed count of atoms, the smallest unit of the ledger.
#[derive(
  Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Default, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
  pub const ZERO: Self = Self(0);
  pub const ONE_DCR: Self = Self(100_000_000);
  pub const MAX: Self = Self(21_000_000 * 100_000_000);

  pub const fn from_atoms(atoms: i64) -> Self {
    Self(atoms)
  }

  pub const fn to_atoms(self) -> i64 {
    self.0
  }

  pub fn checked_add(self, other: Self) -> Option<Self> {
    self.0.checked_add(other.0).map(Self)
  }

  pub fn checked_sub(self, other: Self) -> Option<Self> {
    self.0.checked_sub(other.0).map(Self)
  }

  pub fn checked_sum(amounts: impl IntoIterator<Item = Self>) -> Option<Self> {
    amounts
      .into_iter()
      .try_fold(Self::ZERO, |total, amount| total.checked_add(amount))
  }
}

impl Display for Amount {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let atoms = self.0.unsigned_abs();

    if self.0 < 0 {
      write!(f, "-")?;
    }

    write!(f, "{}", atoms / ATOMS_PER_COIN)?;

    let mut fraction = atoms % ATOMS_PER_COIN;

    if fraction > 0 {
      let mut width = DECIMAL_PLACES;

      while fraction % 10 == 0 {
        fraction /= 10;
        width -= 1;
      }

      write!(f, ".{fraction:0>width$}")?;
    }

    write!(f, " DCR")
  }
}

impl FromStr for Amount {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (integer, fraction) = s.split_once('.').unwrap_or((s, ""));

    if integer.is_empty() && fraction.is_empty() {
      return Err(Error::Empty);
    }

    if !integer
      .chars()
      .chain(fraction.chars())
      .all(|c| c.is_ascii_digit())
    {
      return Err(Error::InvalidDigit);
    }

    let fraction = fraction.trim_end_matches('0');

    if fraction.len() > DECIMAL_PLACES {
      return Err(Error::ExcessivePrecision);
    }

    let integer = if integer.is_empty() {
      0
    } else {
      integer.parse::<u64>().map_err(|_| Error::OutOfRange)?
    };

    let fraction = if fraction.is_empty() {
      0
    } else {
      format!("{fraction:0<DECIMAL_PLACES$}")
        .parse::<u64>()
        .map_err(|_| Error::InvalidDigit)?
    };

    let atoms = integer
      .checked_mul(ATOMS_PER_COIN)
      .and_then(|atoms| atoms.checked_add(fraction))
      .and_then(|atoms| i64::try_from(atoms).ok())
      .ok_or(Error::OutOfRange)?;

    if atoms > Self::MAX.0 {
      return Err(Error::OutOfRange);
    }

    Ok(Self(atoms))
  }
}
