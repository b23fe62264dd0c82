use super::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
  pub change_output_size: usize,
  pub dust_limit: Amount,
  pub fee_rate: FeeRate,
  pub input_signature_overhead: usize,
  pub network: Network,
}

pub(crate) fn run(settings: Settings) -> SubcommandResult {
  Ok(Some(Box::new(output(&settings)?)))
}

fn output(settings: &Settings) -> SnafuResult<Output> {
  let policy = settings.fee_policy();

  Ok(Output {
    change_output_size: policy.change_output_size,
    dust_limit: policy.dust_limit()?,
    fee_rate: policy.fee_rate,
    input_signature_overhead: policy.input_signature_overhead,
    network: settings.network(),
  })
}
