use {super::*, rand::rngs::OsRng, std::io::BufRead, zeroize::Zeroizing};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
  pub address: Address,
  pub amount: Amount,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
  pub change: Option<Change>,
  pub fee: Amount,
  pub hex: String,
  pub published: Option<TxHash>,
  pub signed: bool,
  pub size: usize,
  pub txid: TxHash,
}

#[derive(Debug, Parser)]
#[command(group(
  ArgGroup::new("change")
    .required(false)
    .args(&["change_address", "change_account"]),
))]
pub(crate) struct Build {
  #[arg(
    long = "amount",
    value_name = "DCR",
    allow_hyphen_values = true,
    help = "Send <DCR> to the destination at the same position."
  )]
  amounts: Vec<String>,
  #[arg(long, help = "Derive change from <CHANGE_ACCOUNT>. [default: default]")]
  change_account: Option<String>,
  #[arg(long, help = "Send change to <CHANGE_ADDRESS>, which the wallet must own.")]
  change_address: Option<String>,
  #[arg(long = "dest", value_name = "ADDRESS", help = "Pay <ADDRESS>.")]
  destinations: Vec<String>,
  #[arg(long, help = "Broadcast the signed transaction. Requires --sign.")]
  publish: bool,
  #[arg(
    long,
    help = "Sign with the wallet, reading its passphrase from standard input."
  )]
  sign: bool,
  #[arg(long = "utxo", value_name = "TXID:INDEX", help = "Spend <TXID:INDEX>.")]
  utxos: Vec<String>,
}

impl Build {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    if self.publish && !self.sign {
      return error::PublishWithoutSign.fail();
    }

    let references = self
      .utxos
      .iter()
      .map(|utxo| utxo.parse())
      .collect::<SnafuResult<Vec<UtxoReference>>>()?;

    let destinations = Destination::pair(self.destinations, self.amounts)?;

    let change = match (self.change_address, self.change_account) {
      (Some(address), _) => ChangeTarget::Address(address),
      (None, Some(account)) => ChangeTarget::Account(account),
      (None, None) => ChangeTarget::default(),
    };

    let wallet = settings.wallet()?;

    let draft = settings.draft_builder().build(
      &wallet,
      &references,
      &destinations,
      &change,
      &mut OsRng,
    )?;

    log::info!("Drafted transaction {} of {} bytes", draft.txid, draft.size);

    let mut output = Output {
      change: draft
        .change
        .map(|(address, amount)| Change { address, amount }),
      fee: draft.fee,
      hex: hex::encode(&draft.bytes),
      published: None,
      signed: false,
      size: draft.size,
      txid: draft.txid,
    };

    if !self.sign {
      return Ok(Some(Box::new(output)));
    }

    let passphrase = read_passphrase(io::stdin().lock())?;

    let signed = wallet.sign(&draft.bytes, &passphrase)?;

    drop(passphrase);

    output.hex = hex::encode(&signed);
    output.signed = true;

    if self.publish {
      let txid = wallet.broadcast(&signed)?;
      log::info!("Published transaction {txid}");
      output.published = Some(txid);
    }

    Ok(Some(Box::new(output)))
  }
}

/// Reads one line, without its terminator. The buffer is wiped on drop.
fn read_passphrase(mut reader: impl BufRead) -> Result<Zeroizing<String>> {
  let mut line = Zeroizing::new(String::with_capacity(256));

  reader
    .read_line(&mut line)
    .context("failed to read wallet passphrase from stdin")?;

  let len = line.trim_end_matches(['\r', '\n']).len();
  line.truncate(len);

  ensure!(!line.is_empty(), "no wallet passphrase provided on stdin");

  Ok(line)
}
