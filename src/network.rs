use {super::*, clap::ValueEnum};

#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
  #[default]
  #[clap(alias("main"))]
  Mainnet,
  #[clap(alias("test"))]
  Testnet,
  #[clap(alias("sim"))]
  Simnet,
  #[clap(alias("reg"))]
  Regnet,
}

/// Two-byte prefixes identifying the kind of an encoded address.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct AddressPrefixes {
  pub(crate) pubkey_hash: [u8; 2],
  pub(crate) pubkey_hash_ed25519: [u8; 2],
  pub(crate) pubkey_hash_schnorr: [u8; 2],
  pub(crate) script_hash: [u8; 2],
}

impl Network {
  pub const ALL: [Self; 4] = [Self::Mainnet, Self::Testnet, Self::Simnet, Self::Regnet];

  pub(crate) fn address_prefixes(self) -> AddressPrefixes {
    match self {
      Self::Mainnet => AddressPrefixes {
        pubkey_hash: [0x07, 0x3f],
        pubkey_hash_ed25519: [0x07, 0x1f],
        pubkey_hash_schnorr: [0x07, 0x01],
        script_hash: [0x07, 0x1a],
      },
      Self::Testnet => AddressPrefixes {
        pubkey_hash: [0x0f, 0x21],
        pubkey_hash_ed25519: [0x0f, 0x01],
        pubkey_hash_schnorr: [0x0e, 0xe3],
        script_hash: [0x0e, 0xfc],
      },
      Self::Simnet => AddressPrefixes {
        pubkey_hash: [0x0e, 0x91],
        pubkey_hash_ed25519: [0x0e, 0x71],
        pubkey_hash_schnorr: [0x0e, 0x53],
        script_hash: [0x0e, 0x6c],
      },
      Self::Regnet => AddressPrefixes {
        pubkey_hash: [0x0e, 0x00],
        pubkey_hash_ed25519: [0x0d, 0xe0],
        pubkey_hash_schnorr: [0x0d, 0xc2],
        script_hash: [0x0d, 0xdb],
      },
    }
  }

  pub fn default_wallet_rpc_port(self) -> u16 {
    match self {
      Self::Mainnet => 9110,
      Self::Testnet => 19110,
      Self::Simnet => 19557,
      Self::Regnet => 19567,
    }
  }
}

impl Display for Network {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Self::Mainnet => "mainnet",
        Self::Testnet => "testnet",
        Self::Simnet => "simnet",
        Self::Regnet => "regnet",
      }
    )
  }
}

impl FromStr for Network {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "mainnet" | "main" => Ok(Self::Mainnet),
      "testnet" | "test" => Ok(Self::Testnet),
      "simnet" | "sim" => Ok(Self::Simnet),
      "regnet" | "reg" => Ok(Self::Regnet),
      _ => bail!("invalid network `{s}`"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_str() {
    assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
    assert_eq!("main".parse::<Network>().unwrap(), Network::Mainnet);
    assert_eq!("testnet".parse::<Network>().unwrap(), Network::Testnet);
    assert_eq!("simnet".parse::<Network>().unwrap(), Network::Simnet);
    assert_eq!("reg".parse::<Network>().unwrap(), Network::Regnet);
    assert_eq!(
      "foo".parse::<Network>().unwrap_err().to_string(),
      "invalid network `foo`"
    );
  }

  #[test]
  fn display_round_trips_through_from_str() {
    for network in Network::ALL {
      assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
    }
  }

  #[test]
  fn prefixes_are_unique() {
    let mut prefixes = BTreeSet::new();

    for network in Network::ALL {
      let p = network.address_prefixes();
      for prefix in [
        p.pubkey_hash,
        p.pubkey_hash_ed25519,
        p.pubkey_hash_schnorr,
        p.script_hash,
      ] {
        assert!(prefixes.insert(prefix), "duplicate prefix {prefix:?}");
      }
    }
  }
}
