use super::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Input {
  pub block_height: u32,
  pub block_index: u32,
  pub previous_output: OutPoint,
  pub sequence: u32,
  pub signature_script: String,
  pub value_in: Amount,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutput {
  pub address: Option<Address>,
  pub script: String,
  pub value: Amount,
  pub version: u16,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
  pub expiry: u32,
  pub inputs: Vec<Input>,
  pub lock_time: u32,
  pub outputs: Vec<TransactionOutput>,
  pub size: usize,
  pub txid: TxHash,
  pub version: u16,
}

#[derive(Debug, Parser)]
pub(crate) struct Decode {
  #[arg(help = "Decode serialized transaction <HEX>.")]
  hex: String,
}

impl Decode {
  pub(crate) fn run(self, network: Network) -> SubcommandResult {
    Ok(Some(Box::new(Self::decode(&self.hex, network)?)))
  }

  fn decode(hex: &str, network: Network) -> SnafuResult<Output> {
    let bytes = hex::decode(hex.trim()).context("invalid transaction hex")?;

    let transaction = Transaction::deserialize(&bytes).snafu_context(error::Decode)?;

    Ok(Output {
      expiry: transaction.expiry,
      inputs: transaction
        .inputs
        .iter()
        .map(|input| Input {
          block_height: input.block_height,
          block_index: input.block_index,
          previous_output: input.previous_output,
          sequence: input.sequence,
          signature_script: hex::encode(&input.signature_script),
          value_in: input.value_in,
        })
        .collect(),
      lock_time: transaction.lock_time,
      outputs: transaction
        .outputs
        .iter()
        .map(|output| TransactionOutput {
          address: Address::from_script_pubkey(network, &output.pk_script),
          script: hex::encode(&output.pk_script),
          value: output.value,
          version: output.version,
        })
        .collect(),
      size: bytes.len(),
      txid: transaction.txid(),
      version: transaction.version,
    })
  }
}
