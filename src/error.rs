use super::*;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ErrorKind {
  Validation,
  InsufficientFunds,
  Upstream,
  Entropy,
  Other,
}

impl ErrorKind {
  pub fn exit_code(self) -> i32 {
    match self {
      Self::Other => 1,
      Self::Validation => 2,
      Self::InsufficientFunds => 3,
      Self::Upstream => 4,
      Self::Entropy => 5,
    }
  }
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum SnafuError {
  #[snafu(display("{err}"))]
  Anyhow { err: anyhow::Error },
  #[snafu(display("invalid address `{input}`"))]
  AddressParse {
    input: String,
    source: address::Error,
  },
  #[snafu(display("invalid amount `{input}`"))]
  InvalidAmount {
    input: String,
    source: amount::Error,
  },
  #[snafu(display("wallet request `{method}` was cancelled"))]
  Cancelled { method: String },
  #[snafu(display("failed to decode transaction"))]
  Decode { source: consensus_encode::Error },
  #[snafu(display("utxo {reference} specified more than once"))]
  DuplicateReference { reference: UtxoReference },
  #[snafu(display("failed to draw randomness for input ordering"))]
  EntropyUnavailable { source: rand::Error },
  #[snafu(display(
    "environment variable `{variable}` not valid unicode: `{}`",
    value.to_string_lossy()
  ))]
  EnvVarUnicode {
    backtrace: Backtrace,
    value: OsString,
    variable: String,
  },
  #[snafu(display(
    "cannot send {outputs} from {inputs} without change due to dust limit of {dust_limit}"
  ))]
  InsufficientFunds {
    dust_limit: Amount,
    inputs: Amount,
    outputs: Amount,
  },
  #[snafu(display("change address {address} is not owned by the wallet"))]
  InvalidChangeAddress { address: Address },
  #[snafu(display("invalid utxo `{input}`, expected <TXID>:<INDEX>"))]
  MalformedReference { input: String },
  #[snafu(display(
    "number of destination addresses ({addresses}) and amounts ({amounts}) differ"
  ))]
  MismatchedCounts { addresses: usize, amounts: usize },
  #[snafu(display("no destination addresses specified"))]
  NoDestinations,
  #[snafu(display("no utxos specified"))]
  NoUtxos,
  #[snafu(display("could not find utxo {reference} in wallet"))]
  NotFound { reference: UtxoReference },
  #[snafu(display("--publish requires --sign"))]
  PublishWithoutSign,
  #[snafu(display("wallet failed to sign transaction: {message}"))]
  Signing { message: String },
  #[snafu(display("cannot derive a spending script for address {address}"))]
  UnsupportedAddressType { address: String },
  #[snafu(display(
    "output script of {reference} is {length} bytes, only {expected}-byte pay-to-pubkey-hash scripts are supported in the {tree} tree"
  ))]
  UnsupportedScript {
    expected: usize,
    length: usize,
    reference: UtxoReference,
    tree: Tree,
  },
  #[snafu(display("wallet request `{method}` failed: {message} (code {code})"))]
  Upstream {
    code: i64,
    message: String,
    method: String,
  },
  #[snafu(display("wallet returned unexpected data for `{method}`: {message}"))]
  UpstreamResponse { message: String, method: String },
  #[snafu(display(
    "wallet request `{method}` timed out after {}",
    humantime::format_duration(*timeout)
  ))]
  UpstreamTimeout { method: String, timeout: Duration },
  #[snafu(display("wallet request `{method}` failed"))]
  UpstreamTransport {
    method: String,
    source: reqwest::Error,
  },
  #[snafu(display("arithmetic overflow calculating value"))]
  ValueOverflow,
}

impl SnafuError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::AddressParse { .. }
      | Self::InvalidAmount { .. }
      | Self::Decode { .. }
      | Self::DuplicateReference { .. }
      | Self::InvalidChangeAddress { .. }
      | Self::MalformedReference { .. }
      | Self::MismatchedCounts { .. }
      | Self::NoDestinations
      | Self::NoUtxos
      | Self::NotFound { .. }
      | Self::PublishWithoutSign
      | Self::UnsupportedAddressType { .. }
      | Self::UnsupportedScript { .. }
      | Self::ValueOverflow => ErrorKind::Validation,
      Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
      Self::Cancelled { .. }
      | Self::Signing { .. }
      | Self::Upstream { .. }
      | Self::UpstreamResponse { .. }
      | Self::UpstreamTimeout { .. }
      | Self::UpstreamTransport { .. } => ErrorKind::Upstream,
      Self::EntropyUnavailable { .. } => ErrorKind::Entropy,
      Self::Anyhow { .. } | Self::EnvVarUnicode { .. } => ErrorKind::Other,
    }
  }
}

impl From<Error> for SnafuError {
  fn from(err: Error) -> SnafuError {
    Self::Anyhow { err }
  }
}

/// `anyhow::Context::{context, with_context}` shadow the methods of
/// `snafu::ResultExt`, so typed errors are attached through this trait
/// instead.
pub(crate) trait ResultExt<T, E>: Sized {
  fn snafu_context<C, E2>(self, context: C) -> Result<T, E2>
  where
    C: snafu::IntoError<E2, Source = E>,
    E2: std::error::Error + snafu::ErrorCompat;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E> {
  fn snafu_context<C, E2>(self, context: C) -> Result<T, E2>
  where
    C: snafu::IntoError<E2, Source = E>,
    E2: std::error::Error + snafu::ErrorCompat,
  {
    use snafu::ResultExt;
    self.context(context)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exit_codes_are_distinct_per_kind() {
    let codes = [
      ErrorKind::Validation,
      ErrorKind::InsufficientFunds,
      ErrorKind::Upstream,
      ErrorKind::Entropy,
      ErrorKind::Other,
    ]
    .into_iter()
    .map(ErrorKind::exit_code)
    .collect::<BTreeSet<i32>>();

    assert_eq!(codes.len(), 5);
    assert!(!codes.contains(&0));
  }

  #[test]
  fn insufficient_funds_names_triggering_quantities() {
    assert_eq!(
      SnafuError::InsufficientFunds {
        dust_limit: Amount::from_atoms(2000),
        inputs: Amount::from_atoms(100_000),
        outputs: Amount::from_atoms(99_000),
      }
      .to_string(),
      "cannot send 0.00099 DCR from 0.001 DCR without change due to dust limit of 0.00002 DCR",
    );
  }

  #[test]
  fn kinds() {
    assert_eq!(SnafuError::NoUtxos.kind(), ErrorKind::Validation);
    assert_eq!(
      SnafuError::UpstreamTimeout {
        method: "gettransaction".into(),
        timeout: Duration::from_secs(5),
      }
      .kind(),
      ErrorKind::Upstream
    );
    assert_eq!(
      SnafuError::EntropyUnavailable {
        source: rand::Error::new(io::Error::other("exhausted")),
      }
      .kind(),
      ErrorKind::Entropy
    );
    assert_eq!(
      SnafuError::from(anyhow!("config")).kind(),
      ErrorKind::Other
    );
  }
}
