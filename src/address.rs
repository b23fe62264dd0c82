use {super::*, crate::script::SignatureType};

const CHECKSUM_LEN: usize = 4;
const HASH_LEN: usize = 20;

/// Prefixes of secp256k1 pay-to-pubkey addresses. They decode, but no
/// spending script is produced for them.
const PUBKEY_PREFIXES: [(Network, [u8; 2]); 4] = [
  (Network::Mainnet, [0x13, 0x86]),
  (Network::Testnet, [0x28, 0xf7]),
  (Network::Simnet, [0x27, 0x6f]),
  (Network::Regnet, [0x25, 0xe5]),
];

#[derive(Debug, PartialEq)]
pub enum Error {
  Base58,
  Checksum,
  Length(usize),
  Network { actual: Network, expected: Network },
  UnknownPrefix([u8; 2]),
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Base58 => write!(f, "invalid base58 encoding"),
      Self::Checksum => write!(f, "checksum mismatch"),
      Self::Length(length) => write!(f, "unexpected payload length {length}"),
      Self::Network { actual, expected } => {
        write!(f, "address is for {actual} but {expected} is in use")
      }
      Self::UnknownPrefix(prefix) => write!(f, "unknown address prefix {}", hex::encode(prefix)),
    }
  }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Payload {
  PubKey(Vec<u8>),
  PubKeyHash {
    hash: [u8; HASH_LEN],
    signature_type: Option<SignatureType>,
  },
  ScriptHash([u8; HASH_LEN]),
}

#[derive(Debug, Clone, PartialEq, Eq, DeserializeFromStr, SerializeDisplay)]
pub struct Address {
  network: Network,
  payload: Payload,
}

impl Address {
  pub fn p2pkh(network: Network, hash: [u8; HASH_LEN]) -> Self {
    Self {
      network,
      payload: Payload::PubKeyHash {
        hash,
        signature_type: None,
      },
    }
  }

  pub fn p2pkh_alt(network: Network, hash: [u8; HASH_LEN], signature_type: SignatureType) -> Self {
    Self {
      network,
      payload: Payload::PubKeyHash {
        hash,
        signature_type: Some(signature_type),
      },
    }
  }

  pub fn p2sh(network: Network, hash: [u8; HASH_LEN]) -> Self {
    Self {
      network,
      payload: Payload::ScriptHash(hash),
    }
  }

  pub fn network(&self) -> Network {
    self.network
  }

  pub fn require_network(self, expected: Network) -> Result<Self, Error> {
    if self.network == expected {
      Ok(self)
    } else {
      Err(Error::Network {
        actual: self.network,
        expected,
      })
    }
  }

  /// The script paying this address, if one can be produced.
  pub fn script_pubkey(&self) -> Option<Vec<u8>> {
    match &self.payload {
      Payload::PubKey(_) => None,
      Payload::PubKeyHash {
        hash,
        signature_type: None,
      } => Some(script::pay_to_pubkey_hash(hash)),
      Payload::PubKeyHash {
        hash,
        signature_type: Some(signature_type),
      } => Some(script::pay_to_alt_pubkey_hash(hash, *signature_type)),
      Payload::ScriptHash(hash) => Some(script::pay_to_script_hash(hash)),
    }
  }

  /// The address a pay-to-pubkey-hash or pay-to-script-hash script pays,
  /// with any stake tag ignored.
  pub fn from_script_pubkey(network: Network, script: &[u8]) -> Option<Self> {
    use crate::script::opcodes::*;

    let script = match script {
      [OP_SSTX..=OP_SSTXCHANGE, rest @ ..] => rest,
      _ => script,
    };

    match script {
      [OP_DUP, OP_HASH160, OP_DATA_20, hash @ .., OP_EQUALVERIFY, OP_CHECKSIG] => {
        Some(Self::p2pkh(network, hash.try_into().ok()?))
      }
      [OP_HASH160, OP_DATA_20, hash @ .., OP_EQUAL] => {
        Some(Self::p2sh(network, hash.try_into().ok()?))
      }
      _ => None,
    }
  }

  fn prefix(&self) -> [u8; 2] {
    let prefixes = self.network.address_prefixes();

    match self.payload {
      Payload::PubKey(_) => PUBKEY_PREFIXES
        .iter()
        .find(|(network, _)| *network == self.network)
        .map(|(_, prefix)| *prefix)
        .unwrap_or_default(),
      Payload::PubKeyHash {
        signature_type: None,
        ..
      } => prefixes.pubkey_hash,
      Payload::PubKeyHash {
        signature_type: Some(SignatureType::Ed25519),
        ..
      } => prefixes.pubkey_hash_ed25519,
      Payload::PubKeyHash {
        signature_type: Some(SignatureType::SchnorrSecp256k1),
        ..
      } => prefixes.pubkey_hash_schnorr,
      Payload::ScriptHash(_) => prefixes.script_hash,
    }
  }

  fn data(&self) -> &[u8] {
    match &self.payload {
      Payload::PubKey(key) => key,
      Payload::PubKeyHash { hash, .. } | Payload::ScriptHash(hash) => hash,
    }
  }

  fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = hash::blake256(&hash::blake256(payload));
    [digest[0], digest[1], digest[2], digest[3]]
  }

  fn decode_payload(prefix: [u8; 2], data: &[u8]) -> Result<(Network, Payload), Error> {
    if let Some((network, _)) = PUBKEY_PREFIXES.iter().find(|(_, p)| *p == prefix) {
      return Ok((*network, Payload::PubKey(data.to_vec())));
    }

    let hash: [u8; HASH_LEN] = data
      .try_into()
      .map_err(|_| Error::Length(data.len()))?;

    for network in Network::ALL {
      let prefixes = network.address_prefixes();

      let payload = if prefix == prefixes.pubkey_hash {
        Payload::PubKeyHash {
          hash,
          signature_type: None,
        }
      } else if prefix == prefixes.pubkey_hash_ed25519 {
        Payload::PubKeyHash {
          hash,
          signature_type: Some(SignatureType::Ed25519),
        }
      } else if prefix == prefixes.pubkey_hash_schnorr {
        Payload::PubKeyHash {
          hash,
          signature_type: Some(SignatureType::SchnorrSecp256k1),
        }
      } else if prefix == prefixes.script_hash {
        Payload::ScriptHash(hash)
      } else {
        continue;
      };

      return Ok((network, payload));
    }

    Err(Error::UnknownPrefix(prefix))
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let mut payload = self.prefix().to_vec();
    payload.extend_from_slice(self.data());
    let checksum = Self::checksum(&payload);
    payload.extend_from_slice(&checksum);
    write!(f, "{}", bitcoin::base58::encode(&payload))
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let decoded = bitcoin::base58::decode(s).map_err(|_| Error::Base58)?;

    if decoded.len() < 2 + CHECKSUM_LEN {
      return Err(Error::Length(decoded.len()));
    }

    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);

    if Self::checksum(payload) != checksum {
      return Err(Error::Checksum);
    }

    let (network, payload) = Self::decode_payload([payload[0], payload[1]], &payload[2..])?;

    Ok(Self { network, payload })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_script_pubkey() {
    assert_eq!(
      Address::from_script_pubkey(Network::Mainnet, &script::pay_to_pubkey_hash(&[1; 20])),
      Some(Address::p2pkh(Network::Mainnet, [1; 20])),
    );
    assert_eq!(
      Address::from_script_pubkey(
        Network::Testnet,
        &script::stake_pay_to_pubkey_hash(script::StakeTag::Revocation, &[2; 20])
      ),
      Some(Address::p2pkh(Network::Testnet, [2; 20])),
    );
    assert_eq!(
      Address::from_script_pubkey(Network::Mainnet, &script::pay_to_script_hash(&[3; 20])),
      Some(Address::p2sh(Network::Mainnet, [3; 20])),
    );
    assert_eq!(
      Address::from_script_pubkey(
        Network::Mainnet,
        &script::pay_to_alt_pubkey_hash(&[4; 20], SignatureType::Ed25519)
      ),
      None,
    );
    assert_eq!(Address::from_script_pubkey(Network::Mainnet, &[]), None);

    let mut truncated = script::pay_to_pubkey_hash(&[5; 20]);
    truncated.remove(10);
    assert_eq!(Address::from_script_pubkey(Network::Mainnet, &truncated), None);
  }

  #[test]
  fn encode() {
    #[track_caller]
    fn case(address: Address, expected: &str) {
      assert_eq!(address.to_string(), expected);
      assert_eq!(expected.parse::<Address>().unwrap(), address);
    }

    case(
      Address::p2pkh(Network::Mainnet, [1; 20]),
      "DsR4DNNmB7mSSSWFfbqzKswQJWRr6DLsnXh",
    );
    case(
      Address::p2pkh(Network::Mainnet, [0xff; 20]),
      "DspJWUYDimq3AsTmnRfCX1iB99FBkQJuZGP",
    );
    case(
      Address::p2sh(Network::Mainnet, [1; 20]),
      "DcXYtwMjWr6J2BU6ThKfXwJLCDmKBuzwVtW",
    );
    case(
      Address::p2pkh_alt(Network::Mainnet, [1; 20], SignatureType::Ed25519),
      "DeYEuruDxPzcQGdntpRL8Mvh8NHbuTV9Tb5",
    );
    case(
      Address::p2pkh_alt(Network::Mainnet, [1; 20], SignatureType::SchnorrSecp256k1),
      "DSU6pKeHK6ai7jdcJ5qLZpAXXV9scAFZnu9",
    );
    case(
      Address::p2pkh(Network::Testnet, [1; 20]),
      "TsR7SMWGZupYYoBcUzU9USxftcPmetmfNLM",
    );
    case(
      Address::p2sh(Network::Testnet, [1; 20]),
      "TcXc7vVEue9Q8Y9TH5wpgWKbnKjEkZobFZD",
    );
    case(
      Address::p2pkh(Network::Simnet, [1; 20]),
      "SsUSaZsM5fqpP2mY1U4BacuUbykfpTh2DRU",
    );
    case(
      Address::p2pkh(Network::Regnet, [1; 20]),
      "Rs8S7o88JigdLSvKSvDtNJj1XicK3Pdjzmq",
    );
  }

  #[test]
  fn decode_mainnet_script_hash() {
    let address = "Dcur2mcGjmENx4DhNqDctW5wJCVyT3Qeqkx"
      .parse::<Address>()
      .unwrap();

    assert_eq!(address.network(), Network::Mainnet);
    assert_eq!(
      hex::encode(address.script_pubkey().unwrap()),
      "a914f5916158e3e2c4551c1796708db8367207ed13bb87",
    );
  }

  #[test]
  fn pubkey_addresses_have_no_script() {
    let address = "DkM6VbuFFEkoJrCA3WF5cTiRr4FQrcytH6cm3DaPCKFhgREkV1Fi6"
      .parse::<Address>()
      .unwrap();

    assert_eq!(address.network(), Network::Mainnet);
    assert_eq!(address.script_pubkey(), None);
    assert_eq!(
      address.to_string(),
      "DkM6VbuFFEkoJrCA3WF5cTiRr4FQrcytH6cm3DaPCKFhgREkV1Fi6"
    );
  }

  #[test]
  fn script_lengths() {
    assert_eq!(
      Address::p2pkh(Network::Mainnet, [0; 20])
        .script_pubkey()
        .unwrap()
        .len(),
      script::PUBKEY_HASH_LEN,
    );
    assert_eq!(
      Address::p2sh(Network::Mainnet, [0; 20])
        .script_pubkey()
        .unwrap()
        .len(),
      23,
    );
  }

  #[test]
  fn decode_errors() {
    assert_eq!("0OIl".parse::<Address>().unwrap_err(), Error::Base58);
    assert_eq!(
      "DsR4DNNmB7mSSSWFfbqzKswQJWRr6DNMmp3"
        .parse::<Address>()
        .unwrap_err(),
      Error::Checksum
    );
    assert_eq!(
      "3v7MfbkSsKkbmHCcVgcZvfjESGH43EHBiZ"
        .parse::<Address>()
        .unwrap_err(),
      Error::Length(19)
    );
    assert_eq!(
      "ZL679FxrJgoE6RJLfFeHJ5dt2wPY2MPFCMe"
        .parse::<Address>()
        .unwrap_err(),
      Error::UnknownPrefix([0x12, 0x34])
    );
    assert_eq!("1".parse::<Address>().unwrap_err(), Error::Length(1));
  }

  #[test]
  fn require_network() {
    let address = Address::p2pkh(Network::Testnet, [1; 20]);

    assert_eq!(
      address.clone().require_network(Network::Testnet).unwrap(),
      address
    );
    assert_eq!(
      address.require_network(Network::Mainnet).unwrap_err(),
      Error::Network {
        actual: Network::Testnet,
        expected: Network::Mainnet,
      }
    );
  }

  #[test]
  fn serde() {
    let address = Address::p2pkh(Network::Mainnet, [1; 20]);
    let json = serde_json::to_string(&address).unwrap();
    assert_eq!(json, "\"DsR4DNNmB7mSSSWFfbqzKswQJWRr6DLsnXh\"");
    assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), address);
  }
}
