//! Unsigned transaction drafting.
//!
//! `DraftBuilder::build` turns caller-chosen credits and destinations into an
//! unsigned transaction ready for an external signer. It runs in stages, each
//! of which either hands the draft to the next stage or aborts the build:
//!
//! 1. Change resolution: the change address is validated or derived before
//!    any fee arithmetic, since its script is needed to add change.
//! 2. Credit resolution: each reference is looked up in the wallet and its
//!    output script is checked against the single supported shape for its
//!    tree.
//! 3. Output assembly: destinations are decoded into outputs, in the order
//!    given.
//! 4. Settlement: the fee is estimated from the signed size of the
//!    transaction, and change is added only if it clears the dust limit.
//! 5. Shuffle: inputs are put in a uniformly random order so that the order
//!    references were supplied in is not revealed. Outputs are never
//!    reordered.
//! 6. Serialization, after the draft is checked against its invariants.
//!
//! Every invariant checked in the final stage has a test exercising the
//! behavior it guards.

use {self::shuffle::shuffle, super::*};

pub use self::{
  credit::Credit,
  destination::Destination,
  fee_policy::{FeePolicy, Settlement},
  utxo_reference::UtxoReference,
};

mod credit;
mod destination;
mod fee_policy;
mod shuffle;
mod utxo_reference;

/// Where change goes if there is any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeTarget {
  /// An address, which must belong to the wallet.
  Address(String),
  /// A fresh internal address of the named account.
  Account(String),
}

impl Default for ChangeTarget {
  fn default() -> Self {
    Self::Account("default".into())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedDraft {
  pub bytes: Vec<u8>,
  pub change: Option<(Address, Amount)>,
  pub credits: Vec<Credit>,
  pub fee: Amount,
  /// Estimated size once signed.
  pub size: usize,
  pub transaction: Transaction,
  pub txid: TxHash,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DraftBuilder {
  network: Network,
  policy: FeePolicy,
}

struct Draft<'a, W: ?Sized> {
  change_address: Address,
  change_script: Vec<u8>,
  credits: Vec<Credit>,
  destinations: usize,
  network: Network,
  policy: FeePolicy,
  settlement: Option<Settlement>,
  transaction: Transaction,
  wallet: &'a W,
}

impl DraftBuilder {
  pub fn new(network: Network, policy: FeePolicy) -> Self {
    Self { network, policy }
  }

  pub fn network(&self) -> Network {
    self.network
  }

  pub fn policy(&self) -> FeePolicy {
    self.policy
  }

  pub fn build<W, R>(
    &self,
    wallet: &W,
    references: &[UtxoReference],
    destinations: &[Destination],
    change: &ChangeTarget,
    rng: &mut R,
  ) -> SnafuResult<UnsignedDraft>
  where
    W: WalletService + ?Sized,
    R: RngCore + CryptoRng + ?Sized,
  {
    Self::preflight(references, destinations)?;

    let (change_address, change_script) = self.resolve_change(wallet, change)?;

    Draft {
      change_address,
      change_script,
      credits: Vec::new(),
      destinations: 0,
      network: self.network,
      policy: self.policy,
      settlement: None,
      transaction: Transaction::default(),
      wallet,
    }
    .resolve_credits(references)?
    .assemble_outputs(destinations)?
    .settle()?
    .shuffle_inputs(rng)?
    .serialize()
  }

  fn preflight(references: &[UtxoReference], destinations: &[Destination]) -> SnafuResult {
    if references.is_empty() {
      return error::NoUtxos.fail();
    }

    if destinations.is_empty() {
      return error::NoDestinations.fail();
    }

    let mut seen = BTreeSet::new();
    for reference in references {
      if !seen.insert(reference) {
        return error::DuplicateReference {
          reference: *reference,
        }
        .fail();
      }
    }

    Ok(())
  }

  fn resolve_change<W: WalletService + ?Sized>(
    &self,
    wallet: &W,
    change: &ChangeTarget,
  ) -> SnafuResult<(Address, Vec<u8>)> {
    let address = match change {
      ChangeTarget::Address(input) => {
        let address = input
          .parse::<Address>()
          .and_then(|address| address.require_network(self.network))
          .snafu_context(error::AddressParse { input })?;

        if !wallet.validate_ownership(&address)? {
          return error::InvalidChangeAddress { address }.fail();
        }

        address
      }
      ChangeTarget::Account(account) => {
        let address = wallet.derive_change_address(account)?;
        log::debug!("derived change address {address} from account `{account}`");
        address
      }
    };

    let script = address
      .script_pubkey()
      .snafu_context(error::UnsupportedAddressType {
        address: address.to_string(),
      })?;

    Ok((address, script))
  }
}

impl<W: WalletService + ?Sized> Draft<'_, W> {
  fn resolve_credits(mut self, references: &[UtxoReference]) -> SnafuResult<Self> {
    for reference in references {
      let credit = Credit::resolve(self.wallet, *reference)?;

      log::debug!(
        "resolved {} worth {} in the {} tree",
        credit.reference,
        credit.amount,
        credit.tree
      );

      self.transaction.inputs.push(credit.input());
      self.credits.push(credit);
    }

    log::info!("resolved {} credits", self.credits.len());

    Ok(self)
  }

  fn assemble_outputs(mut self, destinations: &[Destination]) -> SnafuResult<Self> {
    for destination in destinations {
      let output = destination.assemble(self.network)?;

      tprintln!("paying {} to {}", output.value, destination.address);

      self.transaction.outputs.push(output);
    }

    self.destinations = self.transaction.outputs.len();

    Ok(self)
  }

  fn settle(mut self) -> SnafuResult<Self> {
    assert!(
      self.settlement.is_none(),
      "invariant: draft is settled once"
    );

    let settlement = self.policy.settle(&self.transaction)?;

    if let Some(change) = settlement.change {
      self
        .transaction
        .outputs
        .push(TxOut::new(change, self.change_script.clone()));
    }

    self.settlement = Some(settlement);

    Ok(self)
  }

  fn shuffle_inputs<R: RngCore + CryptoRng + ?Sized>(mut self, rng: &mut R) -> SnafuResult<Self> {
    shuffle(&mut self.credits, rng)?;
    self.transaction.inputs = self.credits.iter().map(Credit::input).collect();
    Ok(self)
  }

  fn serialize(self) -> SnafuResult<UnsignedDraft> {
    let Some(settlement) = self.settlement else {
      panic!("invariant: draft is settled before serialization");
    };

    let inputs = Amount::checked_sum(self.transaction.inputs.iter().map(|input| input.value_in))
      .snafu_context(error::ValueOverflow)?;

    let outputs = Amount::checked_sum(self.transaction.outputs.iter().map(|output| output.value))
      .snafu_context(error::ValueOverflow)?;

    assert_eq!(
      outputs.checked_add(settlement.fee),
      Some(inputs),
      "invariant: inputs equal outputs plus fee"
    );

    assert!(
      settlement.fee >= Amount::ZERO,
      "invariant: fee is not negative"
    );

    assert!(
      settlement.change.map_or(true, |change| change > settlement.dust_limit),
      "invariant: change exceeds dust limit"
    );

    assert_eq!(
      self.transaction.outputs.len(),
      self.destinations + usize::from(settlement.change.is_some()),
      "invariant: outputs are destinations plus optional change"
    );

    assert!(
      self
        .transaction
        .inputs
        .iter()
        .all(|input| input.signature_script.is_empty()),
      "invariant: inputs are unsigned"
    );

    assert_eq!(
      self
        .transaction
        .inputs
        .iter()
        .map(|input| input.previous_output)
        .collect::<Vec<OutPoint>>(),
      self
        .credits
        .iter()
        .map(|credit| credit.input().previous_output)
        .collect::<Vec<OutPoint>>(),
      "invariant: inputs spend exactly the resolved credits"
    );

    let bytes = self.transaction.serialize();
    let txid = self.transaction.txid();

    log::info!(
      "drafted {txid} with fee {} and estimated signed size {}",
      settlement.fee,
      settlement.size
    );

    Ok(UnsignedDraft {
      bytes,
      change: settlement
        .change
        .map(|amount| (self.change_address, amount)),
      credits: self.credits,
      fee: settlement.fee,
      size: settlement.size,
      transaction: self.transaction,
      txid,
    })
  }
}
