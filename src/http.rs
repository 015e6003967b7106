// ----- standard library imports
// ----- extra library imports
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
// ----- local imports
use crate::error::{Error, Result};
use crate::keys::{KeysetId, KeysetInfo, MintKeys};
use crate::transport::{
    CheckStateRequest, CheckStateResponse, MeltQuoteRequest, MeltQuoteResponse, MeltRequest,
    MeltResponse, MintConnector, MintInfo, MintQuoteRequest, MintQuoteResponse, MintRequest,
    MintResponse, RestoreRequest, RestoreResponse, SwapRequest, SwapResponse,
};
pub use reqwest::Url;

// ----- end imports

/// `MintConnector` over the mint's v1 REST interface.
#[derive(Debug, Clone)]
pub struct HttpClient {
    cl: reqwest::Client,
    base: reqwest::Url,
}

impl HttpClient {
    pub fn new(base: reqwest::Url) -> Self {
        Self {
            cl: reqwest::Client::new(),
            base,
        }
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let body = response.text().await.unwrap_or_default();
        #[derive(Deserialize)]
        struct MintErrorBody {
            #[serde(default)]
            code: Option<i32>,
            #[serde(default)]
            detail: Option<String>,
            #[serde(default)]
            error: Option<String>,
        }
        let (code, detail) = match serde_json::from_str::<MintErrorBody>(&body) {
            Ok(parsed) => (
                parsed.code.unwrap_or(i32::from(status.as_u16())),
                parsed.detail.or(parsed.error).unwrap_or(body),
            ),
            Err(_) => (i32::from(status.as_u16()), body),
        };
        Err(Error::Mint { code, detail })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base.join(path).expect("relative path");
        let response = self.cl.get(url).send().await?;
        Self::parse(response).await
    }

    async fn post<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.base.join(path).expect("relative path");
        let response = self.cl.post(url).json(body).send().await?;
        Self::parse(response).await
    }
}

#[derive(Deserialize)]
struct KeysResponse {
    keysets: Vec<MintKeys>,
}

#[derive(Deserialize)]
struct KeysetsResponse {
    keysets: Vec<KeysetInfo>,
}

#[async_trait]
impl MintConnector for HttpClient {
    async fn get_info(&self) -> Result<MintInfo> {
        self.get("v1/info").await
    }

    async fn get_keys(&self, kid: Option<KeysetId>) -> Result<Vec<MintKeys>> {
        let path = match &kid {
            Some(kid) => format!("v1/keys/{}", kid),
            None => String::from("v1/keys"),
        };
        let response: KeysResponse = self.get(&path).await?;
        Ok(response.keysets)
    }

    async fn get_keysets(&self) -> Result<Vec<KeysetInfo>> {
        let response: KeysetsResponse = self.get("v1/keysets").await?;
        Ok(response.keysets)
    }

    async fn mint_quote(&self, request: MintQuoteRequest) -> Result<MintQuoteResponse> {
        self.post("v1/mint/quote/bolt11", &request).await
    }

    async fn mint(&self, request: MintRequest) -> Result<MintResponse> {
        self.post("v1/mint/bolt11", &request).await
    }

    async fn melt_quote(&self, request: MeltQuoteRequest) -> Result<MeltQuoteResponse> {
        self.post("v1/melt/quote/bolt11", &request).await
    }

    async fn melt(&self, request: MeltRequest) -> Result<MeltResponse> {
        self.post("v1/melt/bolt11", &request).await
    }

    async fn swap(&self, request: SwapRequest) -> Result<SwapResponse> {
        self.post("v1/swap", &request).await
    }

    async fn check(&self, request: CheckStateRequest) -> Result<CheckStateResponse> {
        self.post("v1/checkstate", &request).await
    }

    async fn restore(&self, request: RestoreRequest) -> Result<RestoreResponse> {
        self.post("v1/restore", &request).await
    }
}
