use super::*;

/// Fee and change parameters, fixed for the lifetime of a builder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
  pub fee_rate: FeeRate,
  pub input_signature_overhead: usize,
  pub change_output_size: usize,
}

/// Outcome of settling fee and change for an assembled transaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Settlement {
  pub change: Option<Amount>,
  pub dust_limit: Amount,
  pub fee: Amount,
  pub size: usize,
}

impl Default for FeePolicy {
  fn default() -> Self {
    Self::new(FeeRate::DEFAULT)
  }
}

impl FeePolicy {
  /// Largest signature push plus compressed public key push.
  pub const INPUT_SIGNATURE_OVERHEAD: usize = 1 + 73 + 1 + 33;

  /// Value, script version, and a length-prefixed 25-byte script.
  pub const CHANGE_OUTPUT_SIZE: usize = 8 + 2 + 1 + 25;

  pub fn new(fee_rate: FeeRate) -> Self {
    Self {
      fee_rate,
      input_signature_overhead: Self::INPUT_SIGNATURE_OVERHEAD,
      change_output_size: Self::CHANGE_OUTPUT_SIZE,
    }
  }

  pub fn dust_limit(&self) -> SnafuResult<Amount> {
    self.fee_rate.dust_limit()
  }

  /// Decides the fee and whether a change output is worth creating.
  ///
  /// `transaction` holds every input, with its amount, and every destination
  /// output but no change output. Signatures are not yet known, so each
  /// input is charged the largest possible signature script. The resulting
  /// size is never an underestimate.
  ///
  /// Change is created only when what is left over after paying the fee of
  /// the larger transaction exceeds the dust limit. Otherwise the whole
  /// leftover goes to the fee, provided it is at least the dust limit above
  /// the fee of the transaction without change.
  pub fn settle(&self, transaction: &Transaction) -> SnafuResult<Settlement> {
    let inputs = Amount::checked_sum(transaction.inputs.iter().map(|input| input.value_in))
      .snafu_context(error::ValueOverflow)?;

    let outputs = Amount::checked_sum(transaction.outputs.iter().map(|output| output.value))
      .snafu_context(error::ValueOverflow)?;

    let size = transaction
      .inputs
      .len()
      .checked_mul(self.input_signature_overhead)
      .and_then(|overhead| overhead.checked_add(transaction.serialize_size()))
      .snafu_context(error::ValueOverflow)?;

    let size_with_change = size
      .checked_add(self.change_output_size)
      .snafu_context(error::ValueOverflow)?;

    let fee_without_change = self.fee_rate.fee(size)?;
    let fee_with_change = self.fee_rate.fee(size_with_change)?;
    let dust_limit = self.dust_limit()?;

    let leftover = inputs
      .checked_sub(outputs)
      .snafu_context(error::ValueOverflow)?;

    tprintln!(
      "settling {inputs} in, {outputs} out, size {size}, fees {fee_without_change}/{fee_with_change}, dust {dust_limit}"
    );

    if leftover
      .checked_sub(fee_without_change)
      .snafu_context(error::ValueOverflow)?
      < dust_limit
    {
      return error::InsufficientFunds {
        dust_limit,
        inputs,
        outputs,
      }
      .fail();
    }

    let change = leftover
      .checked_sub(fee_with_change)
      .snafu_context(error::ValueOverflow)?;

    if change > dust_limit {
      log::info!("adding change of {change} with fee {fee_with_change}");

      Ok(Settlement {
        change: Some(change),
        dust_limit,
        fee: fee_with_change,
        size: size_with_change,
      })
    } else {
      log::info!("leftover {leftover} too small for change, paying it as fee");

      Ok(Settlement {
        change: None,
        dust_limit,
        fee: leftover,
        size,
      })
    }
  }
}
