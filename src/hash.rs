use {super::*, blake_hash::Digest};

pub fn blake256(data: &[u8]) -> [u8; 32] {
  blake_hash::Blake256::digest(data).into()
}

/// Transaction hash. Like the reference client, hashes are displayed and
/// parsed with their bytes reversed.
#[derive(
  Debug,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Copy,
  Clone,
  Default,
  Hash,
  DeserializeFromStr,
  SerializeDisplay,
)]
pub struct TxHash([u8; 32]);

impl TxHash {
  pub const fn from_byte_array(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }

  pub const fn to_byte_array(self) -> [u8; 32] {
    self.0
  }

  pub fn hash(data: &[u8]) -> Self {
    Self(blake256(data))
  }
}

impl Display for TxHash {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let mut reversed = self.0;
    reversed.reverse();
    write!(f, "{}", hex::encode(reversed))
  }
}

impl FromStr for TxHash {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ensure!(
      s.len() == 64,
      "transaction hash must be 64 hex characters, got {}",
      s.len()
    );

    let mut bytes = [0; 32];
    hex::decode_to_slice(s, &mut bytes)?;
    bytes.reverse();

    Ok(Self(bytes))
  }
}

impl Encodable for TxHash {
  fn consensus_encode<W: bitcoin::io::Write + ?Sized>(
    &self,
    writer: &mut W,
  ) -> Result<usize, bitcoin::io::Error> {
    self.0.consensus_encode(writer)
  }
}

impl Decodable for TxHash {
  fn consensus_decode<R: bitcoin::io::Read + ?Sized>(
    reader: &mut R,
  ) -> Result<Self, consensus_encode::Error> {
    Ok(Self(<[u8; 32]>::consensus_decode(reader)?))
  }
}
