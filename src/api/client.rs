use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::api::backend::NoteBackend;
use crate::api::types::{Ack, ApiResponse, Note, User};
use crate::config::ApiConfig;

const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";

/// NoteVault API client over HTTP/JSON
#[derive(Clone)]
pub struct HttpBackend {
  client: reqwest::Client,
  prefix: String,
}

impl HttpBackend {
  pub fn new(config: &ApiConfig) -> Result<Self> {
    let mut headers = HeaderMap::new();
    if let Some(token) = &config.access_token {
      let value = HeaderValue::from_str(token)
        .map_err(|e| eyre!("Access token is not a valid header value: {}", e))?;
      headers.insert(ACCESS_TOKEN_HEADER, value);
    }

    let client = reqwest::Client::builder()
      .timeout(config.timeout())
      .default_headers(headers)
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      client,
      prefix: config.prefix().to_string(),
    })
  }

  fn users_url(&self, path: &str) -> String {
    format!("{}/users/{}", self.prefix, path)
  }

  fn notes_url(&self, path: &str) -> String {
    format!("{}/notes/{}", self.prefix, path)
  }

  fn request(&self, method: Method, url: &str) -> RequestBuilder {
    self.client.request(method, url)
  }

  /// Send a request and decode the response envelope.
  async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiResponse<T>> {
    let response = request
      .send()
      .await
      .map_err(|e| eyre!("Request failed: {}", e))?;

    let status = response.status();
    if !status.is_success() {
      return Err(eyre!("{} returned {}", response.url(), status));
    }

    response
      .json::<ApiResponse<T>>()
      .await
      .map_err(|e| eyre!("Failed to parse response: {}", e))
  }
}

#[async_trait]
impl NoteBackend for HttpBackend {
  async fn login(&self, user: &User) -> Result<ApiResponse<User>> {
    let url = self.users_url("login");
    self.send(self.request(Method::POST, &url).json(user)).await
  }

  async fn register(&self, user: &User) -> Result<ApiResponse<User>> {
    let url = self.users_url("register");
    self.send(self.request(Method::POST, &url).json(user)).await
  }

  async fn create_note(&self, note: &Note) -> Result<ApiResponse<Note>> {
    let url = self.notes_url("create");
    self.send(self.request(Method::POST, &url).json(note)).await
  }

  async fn list_notes(&self, owner_id: u64) -> Result<ApiResponse<Vec<Note>>> {
    let url = self.notes_url(&format!("user/{}", owner_id));
    self.send(self.request(Method::GET, &url)).await
  }

  async fn update_note(&self, note_id: u64, note: &Note) -> Result<ApiResponse<Note>> {
    let url = self.notes_url(&format!("update/{}", note_id));
    self.send(self.request(Method::PUT, &url).json(note)).await
  }

  async fn delete_note(&self, note_id: u64) -> Result<ApiResponse<Ack>> {
    let url = self.notes_url(&format!("delete/{}", note_id));
    self.send(self.request(Method::DELETE, &url)).await
  }
}
