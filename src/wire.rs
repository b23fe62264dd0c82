//! Decred transaction wire format.
//!
//! A full serialization is the transaction prefix (inputs without signature
//! data, outputs, lock time, expiry) followed by the witness (input values,
//! block locations, and signature scripts). The transaction hash commits to
//! the prefix only.

use super::*;

const SERIALIZE_FULL: u32 = 0;
const SERIALIZE_NO_WITNESS: u32 = 1;

pub const TX_VERSION: u16 = 1;
pub const MAX_SEQUENCE: u32 = u32::MAX;
pub const NULL_BLOCK_HEIGHT: u32 = 0;
pub const NULL_BLOCK_INDEX: u32 = u32::MAX;

#[derive(
  Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Tree {
  #[default]
  Regular,
  Stake,
}

impl Tree {
  fn to_u8(self) -> u8 {
    match self {
      Self::Regular => 0,
      Self::Stake => 1,
    }
  }

  fn from_u8(tree: u8) -> Option<Self> {
    match tree {
      0 => Some(Self::Regular),
      1 => Some(Self::Stake),
      _ => None,
    }
  }
}

impl Display for Tree {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Regular => write!(f, "regular"),
      Self::Stake => write!(f, "stake"),
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutPoint {
  pub hash: TxHash,
  pub index: u32,
  pub tree: Tree,
}

impl Display for OutPoint {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}:{}", self.hash, self.index)
  }
}

impl Encodable for OutPoint {
  fn consensus_encode<W: bitcoin::io::Write + ?Sized>(
    &self,
    writer: &mut W,
  ) -> Result<usize, bitcoin::io::Error> {
    Ok(
      self.hash.consensus_encode(writer)?
        + self.index.consensus_encode(writer)?
        + self.tree.to_u8().consensus_encode(writer)?,
    )
  }
}

impl Decodable for OutPoint {
  fn consensus_decode<R: bitcoin::io::Read + ?Sized>(
    reader: &mut R,
  ) -> Result<Self, consensus_encode::Error> {
    Ok(Self {
      hash: TxHash::consensus_decode(reader)?,
      index: u32::consensus_decode(reader)?,
      tree: Tree::from_u8(u8::consensus_decode(reader)?)
        .ok_or(consensus_encode::Error::ParseFailed("invalid transaction tree"))?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
  pub previous_output: OutPoint,
  pub sequence: u32,
  pub value_in: Amount,
  pub block_height: u32,
  pub block_index: u32,
  pub signature_script: Vec<u8>,
}

impl TxIn {
  pub fn new(previous_output: OutPoint, value_in: Amount) -> Self {
    Self {
      previous_output,
      sequence: MAX_SEQUENCE,
      value_in,
      block_height: NULL_BLOCK_HEIGHT,
      block_index: NULL_BLOCK_INDEX,
      signature_script: Vec::new(),
    }
  }

  fn encode_prefix<W: bitcoin::io::Write + ?Sized>(
    &self,
    writer: &mut W,
  ) -> Result<usize, bitcoin::io::Error> {
    Ok(self.previous_output.consensus_encode(writer)? + self.sequence.consensus_encode(writer)?)
  }

  fn encode_witness<W: bitcoin::io::Write + ?Sized>(
    &self,
    writer: &mut W,
  ) -> Result<usize, bitcoin::io::Error> {
    Ok(
      self.value_in.to_atoms().consensus_encode(writer)?
        + self.block_height.consensus_encode(writer)?
        + self.block_index.consensus_encode(writer)?
        + self.signature_script.consensus_encode(writer)?,
    )
  }

  fn decode_witness<R: bitcoin::io::Read + ?Sized>(
    &mut self,
    reader: &mut R,
  ) -> Result<(), consensus_encode::Error> {
    self.value_in = Amount::from_atoms(i64::consensus_decode(reader)?);
    self.block_height = u32::consensus_decode(reader)?;
    self.block_index = u32::consensus_decode(reader)?;
    self.signature_script = Vec::<u8>::consensus_decode(reader)?;
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
  pub value: Amount,
  pub version: u16,
  pub pk_script: Vec<u8>,
}

impl TxOut {
  pub fn new(value: Amount, pk_script: Vec<u8>) -> Self {
    Self {
      value,
      version: 0,
      pk_script,
    }
  }

  pub fn serialize_size(&self) -> usize {
    8 + 2 + VarInt::from(self.pk_script.len()).size() + self.pk_script.len()
  }
}

impl Encodable for TxOut {
  fn consensus_encode<W: bitcoin::io::Write + ?Sized>(
    &self,
    writer: &mut W,
  ) -> Result<usize, bitcoin::io::Error> {
    Ok(
      self.value.to_atoms().consensus_encode(writer)?
        + self.version.consensus_encode(writer)?
        + self.pk_script.consensus_encode(writer)?,
    )
  }
}

impl Decodable for TxOut {
  fn consensus_decode<R: bitcoin::io::Read + ?Sized>(
    reader: &mut R,
  ) -> Result<Self, consensus_encode::Error> {
    Ok(Self {
      value: Amount::from_atoms(i64::consensus_decode(reader)?),
      version: u16::consensus_decode(reader)?,
      pk_script: Vec::<u8>::consensus_decode(reader)?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
  pub version: u16,
  pub inputs: Vec<TxIn>,
  pub outputs: Vec<TxOut>,
  pub lock_time: u32,
  pub expiry: u32,
}

impl Default for Transaction {
  fn default() -> Self {
    Self {
      version: TX_VERSION,
      inputs: Vec::new(),
      outputs: Vec::new(),
      lock_time: 0,
      expiry: 0,
    }
  }
}

impl Transaction {
  pub fn serialize(&self) -> Vec<u8> {
    consensus::serialize(self)
  }

  pub fn deserialize(bytes: &[u8]) -> Result<Self, consensus_encode::Error> {
    consensus::deserialize(bytes)
  }

  /// Length of the full serialization.
  pub fn serialize_size(&self) -> usize {
    let inputs = VarInt::from(self.inputs.len()).size();

    4 + inputs
      + self.inputs.len() * (32 + 4 + 1 + 4)
      + VarInt::from(self.outputs.len()).size()
      + self.outputs.iter().map(TxOut::serialize_size).sum::<usize>()
      + 4
      + 4
      + inputs
      + self
        .inputs
        .iter()
        .map(|input| {
          8 + 4
            + 4
            + VarInt::from(input.signature_script.len()).size()
            + input.signature_script.len()
        })
        .sum::<usize>()
  }

  pub fn txid(&self) -> TxHash {
    let mut prefix = Vec::new();
    self
      .encode_prefix(&mut prefix, SERIALIZE_NO_WITNESS)
      .expect("in-memory writers don't error");
    TxHash::hash(&prefix)
  }

  fn encode_prefix<W: bitcoin::io::Write + ?Sized>(
    &self,
    writer: &mut W,
    serialization: u32,
  ) -> Result<usize, bitcoin::io::Error> {
    let mut len = (u32::from(self.version) | (serialization << 16)).consensus_encode(writer)?;

    len += VarInt::from(self.inputs.len()).consensus_encode(writer)?;
    for input in &self.inputs {
      len += input.encode_prefix(writer)?;
    }

    len += VarInt::from(self.outputs.len()).consensus_encode(writer)?;
    for output in &self.outputs {
      len += output.consensus_encode(writer)?;
    }

    len += self.lock_time.consensus_encode(writer)?;
    len += self.expiry.consensus_encode(writer)?;

    Ok(len)
  }
}

impl Encodable for Transaction {
  fn consensus_encode<W: bitcoin::io::Write + ?Sized>(
    &self,
    writer: &mut W,
  ) -> Result<usize, bitcoin::io::Error> {
    let mut len = self.encode_prefix(writer, SERIALIZE_FULL)?;

    len += VarInt::from(self.inputs.len()).consensus_encode(writer)?;
    for input in &self.inputs {
      len += input.encode_witness(writer)?;
    }

    Ok(len)
  }
}

fn decode_count<R: bitcoin::io::Read + ?Sized>(
  reader: &mut R,
) -> Result<usize, consensus_encode::Error> {
  usize::try_from(VarInt::consensus_decode(reader)?.0)
    .map_err(|_| consensus_encode::Error::ParseFailed("count out of range"))
}

impl Decodable for Transaction {
  fn consensus_decode<R: bitcoin::io::Read + ?Sized>(
    reader: &mut R,
  ) -> Result<Self, consensus_encode::Error> {
    let version = u16::consensus_decode(reader)?;

    if u32::from(u16::consensus_decode(reader)?) != SERIALIZE_FULL {
      return Err(consensus_encode::Error::ParseFailed(
        "only full transaction serializations are supported",
      ));
    }

    let count = decode_count(reader)?;
    let mut inputs = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
      let previous_output = OutPoint::consensus_decode(reader)?;
      let mut input = TxIn::new(previous_output, Amount::ZERO);
      input.sequence = u32::consensus_decode(reader)?;
      inputs.push(input);
    }

    let count = decode_count(reader)?;
    let mut outputs = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
      outputs.push(TxOut::consensus_decode(reader)?);
    }

    let lock_time = u32::consensus_decode(reader)?;
    let expiry = u32::consensus_decode(reader)?;

    if decode_count(reader)? != inputs.len() {
      return Err(consensus_encode::Error::ParseFailed(
        "witness count does not match input count",
      ));
    }

    for input in &mut inputs {
      input.decode_witness(reader)?;
    }

    Ok(Self {
      version,
      inputs,
      outputs,
      lock_time,
      expiry,
    })
  }
}
