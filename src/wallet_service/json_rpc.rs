use {
  super::*,
  serde::de::DeserializeOwned,
  serde_json::{json, Value},
  zeroize::Zeroize,
};

/// Returned by `gettransaction` for transactions the wallet knows nothing
/// about.
const NO_TRANSACTION_INFO: i64 = -5;

const UNLOCK_SECONDS: u64 = 60;

#[derive(Serialize)]
struct JsonRequest<'a> {
  jsonrpc: &'a str,
  id: u64,
  method: &'a str,
  params: &'a Value,
}

#[derive(Deserialize, Debug)]
struct JsonResponse<T> {
  error: Option<JsonError>,
  id: u64,
  result: Option<T>,
}

#[derive(Deserialize, Debug)]
struct JsonError {
  code: i64,
  message: String,
}

#[derive(Deserialize, Debug)]
struct GetTransactionResult {
  #[serde(default)]
  details: Vec<TransactionDetail>,
  hex: String,
  #[serde(default, rename = "type")]
  kind: Option<String>,
}

#[derive(Deserialize, Debug)]
struct TransactionDetail {
  category: String,
  vout: u32,
}

#[derive(Deserialize, Debug)]
struct ValidateAddressResult {
  isvalid: bool,
  #[serde(default)]
  ismine: bool,
}

#[derive(Deserialize, Debug)]
struct SignRawTransactionResult {
  complete: bool,
  hex: String,
}

/// Wallet reached over dcrwallet-style JSON-RPC.
#[derive(Debug)]
pub struct JsonRpcWallet {
  client: reqwest::blocking::Client,
  network: Network,
  password: String,
  timeout: Duration,
  url: String,
  username: String,
}

/// Locks the wallet when dropped, whichever way signing exits.
struct Unlocked<'a>(&'a JsonRpcWallet);

impl Drop for Unlocked<'_> {
  fn drop(&mut self) {
    if let Err(err) = self.0.send::<Value>("walletlock", &json!([])) {
      log::warn!("failed to lock wallet: {err}");
    }
  }
}

impl JsonRpcWallet {
  pub fn new(
    url: &str,
    username: String,
    password: String,
    certificate: Option<&Path>,
    timeout: Duration,
    network: Network,
  ) -> Result<Self> {
    let mut builder = reqwest::blocking::Client::builder().timeout(timeout);

    if let Some(path) = certificate {
      let pem = fs::read(path)
        .with_context(|| format!("failed to read wallet certificate `{}`", path.display()))?;

      builder = builder.add_root_certificate(
        reqwest::Certificate::from_pem(&pem)
          .with_context(|| format!("invalid wallet certificate `{}`", path.display()))?,
      );
    }

    let url = if url.contains("://") {
      url.to_string()
    } else if certificate.is_some() {
      format!("https://{url}")
    } else {
      format!("http://{url}")
    };

    log::debug!("connecting to wallet at {url}");

    Ok(Self {
      client: builder.build().context("failed to build wallet client")?,
      network,
      password,
      timeout,
      url,
      username,
    })
  }

  fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> SnafuResult<T> {
    self
      .call_optional(method, &params)?
      .snafu_context(error::UpstreamResponse {
        method,
        message: "null result",
      })
  }

  fn call_optional<T: DeserializeOwned>(
    &self,
    method: &str,
    params: &Value,
  ) -> SnafuResult<Option<T>> {
    if shutting_down() {
      return error::Cancelled { method }.fail();
    }

    self.send(method, params)
  }

  fn send<T: DeserializeOwned>(&self, method: &str, params: &Value) -> SnafuResult<Option<T>> {
    log::debug!("wallet request: {method}");

    let response = self
      .client
      .post(&self.url)
      .basic_auth(&self.username, Some(&self.password))
      .json(&JsonRequest {
        jsonrpc: "2.0",
        id: 0,
        method,
        params,
      })
      .send()
      .map_err(|err| self.transport_error(method, err))?;

    let status = response.status();

    let body = response
      .text()
      .map_err(|err| self.transport_error(method, err))?;

    let response = serde_json::from_str::<JsonResponse<T>>(&body).map_err(|err| {
      SnafuError::UpstreamResponse {
        method: method.into(),
        message: if status.is_success() {
          err.to_string()
        } else {
          format!("HTTP {status}")
        },
      }
    })?;

    if response.id != 0 {
      return error::UpstreamResponse {
        method,
        message: format!("unexpected response id {}", response.id),
      }
      .fail();
    }

    if let Some(JsonError { code, message }) = response.error {
      return error::Upstream {
        code,
        message,
        method,
      }
      .fail();
    }

    Ok(response.result)
  }

  fn transport_error(&self, method: &str, err: reqwest::Error) -> SnafuError {
    if err.is_timeout() {
      SnafuError::UpstreamTimeout {
        method: method.into(),
        timeout: self.timeout,
      }
    } else {
      SnafuError::UpstreamTransport {
        method: method.into(),
        source: err,
      }
    }
  }
}

impl WalletService for JsonRpcWallet {
  fn lookup(&self, reference: &UtxoReference) -> SnafuResult<Option<CreditRecord>> {
    const METHOD: &str = "gettransaction";

    let result = match self.call::<GetTransactionResult>(METHOD, json!([reference.hash])) {
      Ok(result) => result,
      Err(SnafuError::Upstream {
        code: NO_TRANSACTION_INFO,
        ..
      }) => return Ok(None),
      Err(err) => return Err(err),
    };

    if !result
      .details
      .iter()
      .any(|detail| detail.vout == reference.index && detail.category != "send")
    {
      return Ok(None);
    }

    let transaction = hex::decode(&result.hex)
      .ok()
      .and_then(|bytes| Transaction::deserialize(&bytes).ok())
      .snafu_context(error::UpstreamResponse {
        method: METHOD,
        message: "invalid transaction hex",
      })?;

    if transaction.txid() != reference.hash {
      return error::UpstreamResponse {
        method: METHOD,
        message: format!("returned transaction {}", transaction.txid()),
      }
      .fail();
    }

    let output = usize::try_from(reference.index)
      .ok()
      .and_then(|index| transaction.outputs.get(index))
      .snafu_context(error::UpstreamResponse {
        method: METHOD,
        message: format!("transaction has no output {}", reference.index),
      })?;

    Ok(Some(CreditRecord {
      amount: output.value,
      output_script: output.pk_script.clone(),
      category: result
        .kind
        .as_deref()
        .map(TransactionCategory::from_wallet_type)
        .unwrap_or(TransactionCategory::Regular),
    }))
  }

  fn validate_ownership(&self, address: &Address) -> SnafuResult<bool> {
    let result = self.call::<ValidateAddressResult>("validateaddress", json!([address]))?;
    Ok(result.isvalid && result.ismine)
  }

  fn derive_change_address(&self, account: &str) -> SnafuResult<Address> {
    const METHOD: &str = "getrawchangeaddress";

    let address = self.call::<String>(METHOD, json!([account]))?;

    address
      .parse::<Address>()
      .and_then(|address| address.require_network(self.network))
      .map_err(|err| SnafuError::UpstreamResponse {
        method: METHOD.into(),
        message: format!("invalid change address `{address}`: {err}"),
      })
  }

  fn sign(&self, unsigned: &[u8], passphrase: &str) -> SnafuResult<Vec<u8>> {
    const METHOD: &str = "signrawtransaction";

    // a timed out unlock may still have taken effect
    let _unlocked = Unlocked(self);

    let mut params = json!([passphrase, UNLOCK_SECONDS]);

    let unlock = self.call_optional::<Value>("walletpassphrase", &params);

    if let Some(Value::String(passphrase)) = params.get_mut(0) {
      passphrase.zeroize();
    }

    unlock?;

    let result = self.call::<SignRawTransactionResult>(METHOD, json!([hex::encode(unsigned)]))?;

    if !result.complete {
      return error::Signing {
        message: "wallet could not provide every signature",
      }
      .fail();
    }

    hex::decode(&result.hex).ok().snafu_context(error::UpstreamResponse {
      method: METHOD,
      message: "invalid transaction hex",
    })
  }

  fn broadcast(&self, signed: &[u8]) -> SnafuResult<TxHash> {
    const METHOD: &str = "sendrawtransaction";

    let txid = self.call::<String>(METHOD, json!([hex::encode(signed)]))?;

    txid.parse().map_err(|err| SnafuError::UpstreamResponse {
      method: METHOD.into(),
      message: format!("invalid transaction hash `{txid}`: {err}"),
    })
  }
}
