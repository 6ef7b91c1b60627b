use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use leptos::logging::{log, warn};
use leptos::prelude::Callable;
use leptos::prelude::Callback;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::form_urlencoded;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestCredentials, RequestInit, Response};
use crate::config::ConsoleConfig;
use crate::error::ApiError;
use crate::types::{CaptchaInfo, Channel, ChannelListing, ChannelRequest, Credential, ServerConfig};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Ordered `application/x-www-form-urlencoded` body. `None` values are left out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormBody {
    pairs: Vec<(String, Option<String>)>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.pairs.push((key.to_string(), Some(value.into())));
        self
    }

    pub fn optional(mut self, key: &str, value: Option<String>) -> Self {
        self.pairs.push((key.to_string(), value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn encode(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            if let Some(value) = value {
                ser.append_pair(key, value);
            }
        }
        ser.finish()
    }
}

impl From<&ChannelRequest> for FormBody {
    fn from(req: &ChannelRequest) -> Self {
        FormBody::new()
            .optional("id", req.id.clone())
            .field("url", &req.url)
            .field("name", &req.name)
            .field("proxy", req.proxy.to_string())
            .field("parser", &req.parser)
            .field("proxyurl", &req.proxy_url)
            .field("tsproxy", &req.ts_proxy)
            .field("category", &req.category)
    }
}

impl From<&ServerConfig> for FormBody {
    fn from(cfg: &ServerConfig) -> Self {
        FormBody::new()
            .field("cmd", &cfg.cmd)
            .field("args", &cfg.args)
            .field("baseurl", &cfg.baseurl)
            .field("proxyurl", &cfg.proxyurl)
            .field("secret", &cfg.secret)
            .field("apikey", &cfg.apikey)
    }
}

impl From<&Credential> for FormBody {
    fn from(c: &Credential) -> Self {
        FormBody::new()
            .field("password", &c.password)
            .field("answer", &c.answer)
            .field("captcha_id", &c.captcha_id)
            .field("type", "ajax")
            .field("crsf", &c.crsf)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
    Ok,
    Unauthorized,
    Failed(u16),
}

/// Only 200 counts as success.
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200 => StatusClass::Ok,
        401 => StatusClass::Unauthorized,
        other => StatusClass::Failed(other),
    }
}

/// Maps a finished response to the caller's result. A 401 runs
/// `on_unauthorized` once before the error is returned.
pub fn settle_response(status: u16, body: String, on_unauthorized: impl FnOnce()) -> Result<String, ApiError> {
    match classify_status(status) {
        StatusClass::Ok => Ok(body),
        StatusClass::Unauthorized => {
            on_unauthorized();
            Err(ApiError::Unauthorized)
        }
        StatusClass::Failed(status) => Err(ApiError::Status { status, body }),
    }
}

/// Bodies are JSON documents that are themselves JSON-encoded as a string.
/// Plain JSON is accepted too.
pub fn decode_payload<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body.trim())?;
    match value {
        Value::String(inner) => Ok(serde_json::from_str(&inner)?),
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Thin client for the LiveTV! backend.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u32,
    on_unauthorized: Option<Callback<()>>,
}

impl ApiClient {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            timeout_ms: config.request_timeout_ms,
            on_unauthorized: None,
        }
    }

    /// Invoked on every 401 before the error reaches the caller.
    pub fn with_unauthorized_handler(mut self, handler: Callback<()>) -> Self {
        self.on_unauthorized = Some(handler);
        self
    }

    pub fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if !params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params.iter())
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    async fn send(&self, method: &str, url: String, body: Option<&FormBody>) -> Result<String, ApiError> {
        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;

        let controller = AbortController::new()?;
        let init = RequestInit::new();
        init.set_method(method);
        init.set_credentials(RequestCredentials::Include);
        init.set_signal(Some(&controller.signal()));
        if let Some(body) = body {
            init.set_body(&JsValue::from_str(&body.encode()));
        }

        let request = Request::new_with_str_and_init(&url, &init)?;
        if body.is_some() {
            request.headers().set("Content-Type", FORM_CONTENT_TYPE)?;
        }

        let fetch = JsFuture::from(window.fetch_with_request(&request));
        let timeout = TimeoutFuture::new(self.timeout_ms);
        futures::pin_mut!(fetch, timeout);

        let response = match select(fetch, timeout).await {
            Either::Left((res, _)) => res?,
            Either::Right(_) => {
                controller.abort();
                warn!("{} {} timed out after {}ms", method, url, self.timeout_ms);
                return Err(ApiError::Timeout);
            }
        };
        let response: Response = response.dyn_into()?;
        let status = response.status();
        let text = JsFuture::from(response.text()?).await?.as_string().unwrap_or_default();

        let result = settle_response(status, text, || {
            if let Some(handler) = &self.on_unauthorized {
                handler.run(());
            }
        });
        match &result {
            Err(ApiError::Unauthorized) => log!("{} {} -> 401, sent to login", method, url),
            Err(e) => warn!("{} {} -> {}", method, url, e),
            Ok(_) => {}
        }
        result
    }

    pub async fn get_text(&self, path: &str, params: &[(&str, &str)]) -> Result<String, ApiError> {
        self.send("GET", self.endpoint(path, params), None).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.get_text(path, &[]).await?;
        decode_payload(&body).map_err(|e| {
            warn!("GET {} returned an unreadable body: {}", path, e);
            e
        })
    }

    pub async fn post_form(&self, path: &str, body: &FormBody) -> Result<String, ApiError> {
        self.send("POST", self.endpoint(path, &[]), Some(body)).await
    }

    // --- SESSION ---

    pub async fn check_auth(&self) -> Result<(), ApiError> {
        self.get_text("/auth", &[]).await.map(|_| ())
    }

    pub async fn fetch_captcha(&self) -> Result<CaptchaInfo, ApiError> {
        self.get_json("/captcha").await
    }

    pub async fn fetch_crsf(&self) -> Result<String, ApiError> {
        self.get_text("/crsf", &[]).await
    }

    pub async fn login(&self, credential: &Credential) -> Result<(), ApiError> {
        self.post_form("/login", &credential.into()).await.map(|_| ())
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.get_text("/logout", &[]).await.map(|_| ())
    }

    // --- CHANNELS ---

    pub async fn list_channels(&self) -> Result<ChannelListing, ApiError> {
        let records: Option<Vec<Channel>> = self.get_json("/channels").await?;
        Ok(ChannelListing::from_records(records.unwrap_or_default()))
    }

    pub async fn create_channel(&self, req: &ChannelRequest) -> Result<(), ApiError> {
        self.post_form("/newchannel", &req.into()).await.map(|_| ())
    }

    pub async fn update_channel(&self, req: &ChannelRequest) -> Result<(), ApiError> {
        self.post_form("/updatechannel", &req.into()).await.map(|_| ())
    }

    pub async fn delete_channel(&self, id: &str) -> Result<(), ApiError> {
        self.get_text("/delchannel", &[("id", id)]).await.map(|_| ())
    }

    pub async fn list_plugins(&self) -> Result<Vec<String>, ApiError> {
        let plugins: Option<Vec<String>> = self.get_json("/plugins").await?;
        Ok(plugins.unwrap_or_default())
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        let categories: Option<Vec<String>> = self.get_json("/category").await?;
        Ok(categories.unwrap_or_default())
    }

    // --- OPTIONS ---

    pub async fn get_config(&self) -> Result<ServerConfig, ApiError> {
        self.get_json("/getconfig").await
    }

    pub async fn update_config(&self, cfg: &ServerConfig) -> Result<(), ApiError> {
        self.post_form("/updconfig", &cfg.into()).await.map(|_| ())
    }

    /// Sends both fields; the backend re-checks that they match.
    pub async fn change_password(&self, password: &str, password2: &str) -> Result<(), ApiError> {
        let body = FormBody::new()
            .field("password", password)
            .field("password2", password2);
        self.post_form("/changepwd", &body).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(200), StatusClass::Ok);
        assert_eq!(classify_status(401), StatusClass::Unauthorized);
        assert_eq!(classify_status(204), StatusClass::Failed(204));
        assert_eq!(classify_status(500), StatusClass::Failed(500));
    }

    #[test]
    fn test_unauthorized_runs_handler_once() {
        let mut calls = 0;
        let res = settle_response(401, String::new(), || calls += 1);
        assert_eq!(res, Err(ApiError::Unauthorized));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_other_statuses_skip_handler() {
        let mut calls = 0;
        let res = settle_response(500, "db locked".to_string(), || calls += 1);
        assert_eq!(res, Err(ApiError::Status { status: 500, body: "db locked".to_string() }));

        let res = settle_response(200, "ok".to_string(), || calls += 1);
        assert_eq!(res, Ok("ok".to_string()));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_decode_double_encoded_body() {
        let inner = serde_json::json!([{ "ID": "", "M3U8": "http://tv/lives.m3u" }]).to_string();
        let body = serde_json::to_string(&inner).unwrap();

        let records: Vec<Channel> = decode_payload(&body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].m3u8, "http://tv/lives.m3u");
    }

    #[test]
    fn test_decode_plain_body() {
        let plugins: Vec<String> = decode_payload(r#"["http","youtube"]"#).unwrap();
        assert_eq!(plugins, vec!["http", "youtube"]);

        let none: Option<Vec<String>> = decode_payload("null").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let res: Result<Vec<String>, _> = decode_payload("<html>");
        assert!(matches!(res, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_endpoint_joins_and_encodes() {
        let api = ApiClient::new(&ConsoleConfig::default());
        assert_eq!(api.endpoint("/channels", &[]), "/api/channels");
        assert_eq!(api.endpoint("delchannel", &[("id", "a b&c")]), "/api/delchannel?id=a+b%26c");
    }

    #[test]
    fn test_form_body_skips_missing_values() {
        let body = FormBody::new()
            .optional("id", None)
            .field("name", "CCTV 1")
            .field("url", "http://x/?a=1");
        assert_eq!(body.encode(), "name=CCTV+1&url=http%3A%2F%2Fx%2F%3Fa%3D1");
        assert_eq!(body.get("id"), None);
    }

    #[test]
    fn test_login_body_fields() {
        let c = Credential {
            password: "pw".into(),
            answer: "1234".into(),
            captcha_id: "cid".into(),
            crsf: "tok".into(),
        };
        let body = FormBody::from(&c);
        assert_eq!(body.get("type"), Some("ajax"));
        assert_eq!(body.get("crsf"), Some("tok"));
        assert_eq!(body.get("captcha_id"), Some("cid"));
    }
}
