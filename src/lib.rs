#![allow(clippy::result_large_err, clippy::too_many_arguments)]
#![deny(
  clippy::cast_lossless,
  clippy::cast_possible_truncation,
  clippy::cast_possible_wrap,
  clippy::cast_sign_loss
)]

use {
  self::{
    arguments::Arguments,
    config::Config,
    error::ResultExt,
    option_ext::OptionExt,
    options::Options,
    settings::Settings,
    subcommand::{OutputFormat, Subcommand, SubcommandResult},
  },
  anyhow::{anyhow, bail, ensure, Context, Error},
  bitcoin::consensus::{
    self,
    encode::{self as consensus_encode, VarInt},
    Decodable, Encodable,
  },
  clap::{ArgGroup, Parser},
  rand::{CryptoRng, RngCore},
  serde::{Deserialize, Serialize},
  serde_with::{DeserializeFromStr, SerializeDisplay},
  snafu::{Backtrace, ErrorCompat, Snafu},
  std::{
    backtrace::BacktraceStatus,
    collections::{BTreeMap, BTreeSet},
    env,
    ffi::OsString,
    fmt::{self, Display, Formatter},
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    process,
    str::FromStr,
    sync::atomic::{self, AtomicBool},
    time::Duration,
  },
};

pub use self::{
  address::Address,
  amount::Amount,
  draft::{
    ChangeTarget, Credit, Destination, DraftBuilder, FeePolicy, UnsignedDraft, UtxoReference,
  },
  error::{ErrorKind, SnafuError},
  fee_rate::FeeRate,
  hash::TxHash,
  network::Network,
  wallet_service::{CreditRecord, JsonRpcWallet, TransactionCategory, WalletService},
  wire::{OutPoint, Transaction, Tree, TxIn, TxOut},
};


#[cfg(test)]
use self::test::*;

pub mod address;
pub mod amount;
mod arguments;
mod config;
pub mod draft;
mod error;
mod fee_rate;
pub mod hash;
mod macros;
pub mod network;
mod option_ext;
pub mod options;
pub mod script;
pub mod settings;
pub mod subcommand;
pub mod wallet_service;
pub mod wire;

type Result<T = (), E = Error> = std::result::Result<T, E>;
type SnafuResult<T = (), E = SnafuError> = std::result::Result<T, E>;

static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);

fn shutting_down() -> bool {
  SHUTTING_DOWN.load(atomic::Ordering::Relaxed)
}

fn default<T: Default>() -> T {
  Default::default()
}

pub fn main() {
  env_logger::init();

  ctrlc::set_handler(move || {
    if SHUTTING_DOWN.fetch_or(true, atomic::Ordering::Relaxed) {
      process::exit(1);
    }

    eprintln!("Cancelling at the next wallet call. Press <CTRL-C> again to exit immediately.");
  })
  .expect("Error setting <CTRL-C> handler");

  let args = Arguments::parse();

  let format = args.options.format;

  match args.run() {
    Err(err) => {
      eprintln!("error: {err}");

      if let SnafuError::Anyhow { err } = &err {
        for (i, err) in err.chain().skip(1).enumerate() {
          if i == 0 {
            eprintln!();
            eprintln!("because:");
          }

          eprintln!("- {err}");
        }

        if env::var_os("RUST_BACKTRACE")
          .map(|val| val == "1")
          .unwrap_or_default()
        {
          eprintln!("{}", err.backtrace());
        }
      } else {
        for (i, err) in err.iter_chain().skip(1).enumerate() {
          if i == 0 {
            eprintln!();
            eprintln!("because:");
          }

          eprintln!("- {err}");
        }

        if let Some(backtrace) = err.backtrace() {
          if backtrace.status() == BacktraceStatus::Captured {
            eprintln!("backtrace:");
            eprintln!("{backtrace}");
          }
        }
      }

      process::exit(err.kind().exit_code());
    }
    Ok(output) => {
      if let Some(output) = output {
        output.print(format.unwrap_or_default());
      }
    }
  }
}
