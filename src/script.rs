//! Output scripts. Only the handful of templates needed to pay addresses and
//! recognise spendable credits are supported.

pub mod opcodes {
  pub const OP_1: u8 = 0x51;
  pub const OP_2: u8 = 0x52;
  pub const OP_DATA_20: u8 = 0x14;
  pub const OP_DUP: u8 = 0x76;
  pub const OP_EQUAL: u8 = 0x87;
  pub const OP_EQUALVERIFY: u8 = 0x88;
  pub const OP_HASH160: u8 = 0xa9;
  pub const OP_CHECKSIG: u8 = 0xac;
  pub const OP_SSTX: u8 = 0xba;
  pub const OP_SSGEN: u8 = 0xbb;
  pub const OP_SSRTX: u8 = 0xbc;
  pub const OP_SSTXCHANGE: u8 = 0xbd;
  pub const OP_CHECKSIGALT: u8 = 0xbe;
}

use self::opcodes::*;

/// Length of a regular-tree pay-to-pubkey-hash script.
pub const PUBKEY_HASH_LEN: usize = 25;

/// Length of a stake-tree pay-to-pubkey-hash script, which carries a leading
/// stake opcode.
pub const STAKE_PUBKEY_HASH_LEN: usize = 26;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SignatureType {
  Ed25519,
  SchnorrSecp256k1,
}

impl SignatureType {
  fn opcode(self) -> u8 {
    match self {
      Self::Ed25519 => OP_1,
      Self::SchnorrSecp256k1 => OP_2,
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StakeTag {
  Submission,
  Generation,
  Revocation,
  Change,
}

impl StakeTag {
  fn opcode(self) -> u8 {
    match self {
      Self::Submission => OP_SSTX,
      Self::Generation => OP_SSGEN,
      Self::Revocation => OP_SSRTX,
      Self::Change => OP_SSTXCHANGE,
    }
  }
}

pub fn pay_to_pubkey_hash(hash: &[u8; 20]) -> Vec<u8> {
  let mut script = Vec::with_capacity(PUBKEY_HASH_LEN);
  script.extend([OP_DUP, OP_HASH160, OP_DATA_20]);
  script.extend_from_slice(hash);
  script.extend([OP_EQUALVERIFY, OP_CHECKSIG]);
  script
}

pub fn pay_to_alt_pubkey_hash(hash: &[u8; 20], signature_type: SignatureType) -> Vec<u8> {
  let mut script = Vec::with_capacity(26);
  script.extend([OP_DUP, OP_HASH160, OP_DATA_20]);
  script.extend_from_slice(hash);
  script.extend([OP_EQUALVERIFY, signature_type.opcode(), OP_CHECKSIGALT]);
  script
}

pub fn pay_to_script_hash(hash: &[u8; 20]) -> Vec<u8> {
  let mut script = Vec::with_capacity(23);
  script.extend([OP_HASH160, OP_DATA_20]);
  script.extend_from_slice(hash);
  script.push(OP_EQUAL);
  script
}

pub fn stake_pay_to_pubkey_hash(tag: StakeTag, hash: &[u8; 20]) -> Vec<u8> {
  let mut script = Vec::with_capacity(STAKE_PUBKEY_HASH_LEN);
  script.push(tag.opcode());
  script.extend(pay_to_pubkey_hash(hash));
  script
}
