//! Plain-`fetch` REST client. Every call replays the session bearer token;
//! a 401/403 response feeds `Message::SessionExpired` back into the dispatch
//! loop instead of surfacing as a generic error.

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, RequestMode, Response};

use crate::messages::Message;
use crate::state::{dispatch_global_message, APP_STATE};

#[derive(Deserialize)]
struct TokenOut {
    token: String,
}

#[derive(Deserialize)]
struct UploadOut {
    #[serde(rename = "fileUrl")]
    file_url: Option<String>,
    url: Option<String>,
}

/// What a 401/403 response means for the session. Most calls carry a token
/// whose rejection ends the session; a failed login attempt is just a wrong
/// password and stays with the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthFailure {
    ExpireSession,
    Surface,
}

fn ends_session(status: u16, policy: AuthFailure) -> bool {
    policy == AuthFailure::ExpireSession && (status == 401 || status == 403)
}

pub struct ApiClient;

impl ApiClient {
    fn base_url() -> String {
        super::api_base_url()
    }

    // ---------------- Auth ----------------

    /// Exchange credentials for a bearer token. The caller stores it via
    /// `Message::LoggedIn`.
    pub async fn login(username: &str, password: &str) -> Result<String, JsValue> {
        let url = format!("{}/login", Self::base_url());
        let payload = serde_json::json!({ "username": username, "password": password });
        let body = Self::request_json(
            &url,
            "POST",
            Some(&payload.to_string()),
            AuthFailure::Surface,
        )
        .await?;
        let token_out: TokenOut = serde_json::from_str(&body)
            .map_err(|e| JsValue::from_str(&format!("Unexpected login response: {}", e)))?;
        Ok(token_out.token)
    }

    // ---------------- Workflows ----------------

    pub async fn get_workflows() -> Result<String, JsValue> {
        let url = format!("{}/workflow", Self::base_url());
        Self::fetch_json(&url, "GET", None).await
    }

    pub async fn create_workflow(payload: &str) -> Result<String, JsValue> {
        let url = format!("{}/workflow", Self::base_url());
        Self::fetch_json(&url, "POST", Some(payload)).await
    }

    pub async fn update_workflow(workflow_id: &str, payload: &str) -> Result<String, JsValue> {
        let url = format!("{}/workflow/{}", Self::base_url(), workflow_id);
        Self::fetch_json(&url, "PUT", Some(payload)).await
    }

    pub async fn delete_workflow(workflow_id: &str) -> Result<(), JsValue> {
        let url = format!("{}/workflow/{}", Self::base_url(), workflow_id);
        let _ = Self::fetch_json(&url, "DELETE", None).await?;
        Ok(())
    }

    /// Upload a node icon (multipart field `file`); returns the served URL.
    /// The backend has answered with both `fileUrl` and `url` over time, so
    /// either key is accepted.
    pub async fn upload_icon(file: &web_sys::File) -> Result<String, JsValue> {
        let url = format!("{}/upload-icon", Self::base_url());
        let form = FormData::new()?;
        form.append_with_blob("file", file)?;
        let body = Self::fetch_multipart(&url, "POST", &form).await?;
        let out: UploadOut = serde_json::from_str(&body)
            .map_err(|e| JsValue::from_str(&format!("Unexpected upload response: {}", e)))?;
        out.file_url
            .or(out.url)
            .ok_or_else(|| JsValue::from_str("Upload response carried no file URL"))
    }

    // ---------------- Content families ----------------

    pub async fn get_articles() -> Result<String, JsValue> {
        let url = format!("{}/articles", Self::base_url());
        Self::fetch_json(&url, "GET", None).await
    }

    pub async fn create_article(form: &FormData) -> Result<String, JsValue> {
        let url = format!("{}/articles", Self::base_url());
        Self::fetch_multipart(&url, "POST", form).await
    }

    pub async fn update_article(article_id: &str, form: &FormData) -> Result<String, JsValue> {
        let url = format!("{}/articles/{}", Self::base_url(), article_id);
        Self::fetch_multipart(&url, "PUT", form).await
    }

    pub async fn delete_article(article_id: &str) -> Result<(), JsValue> {
        let url = format!("{}/articles/{}", Self::base_url(), article_id);
        let _ = Self::fetch_json(&url, "DELETE", None).await?;
        Ok(())
    }

    pub async fn get_videos() -> Result<String, JsValue> {
        let url = format!("{}/videos", Self::base_url());
        Self::fetch_json(&url, "GET", None).await
    }

    pub async fn create_video(form: &FormData) -> Result<String, JsValue> {
        let url = format!("{}/videos", Self::base_url());
        Self::fetch_multipart(&url, "POST", form).await
    }

    pub async fn update_video(video_id: &str, form: &FormData) -> Result<String, JsValue> {
        let url = format!("{}/videos/{}", Self::base_url(), video_id);
        Self::fetch_multipart(&url, "PUT", form).await
    }

    pub async fn delete_video(video_id: &str) -> Result<(), JsValue> {
        let url = format!("{}/videos/{}", Self::base_url(), video_id);
        let _ = Self::fetch_json(&url, "DELETE", None).await?;
        Ok(())
    }

    pub async fn get_banners() -> Result<String, JsValue> {
        let url = format!("{}/banners", Self::base_url());
        Self::fetch_json(&url, "GET", None).await
    }

    pub async fn create_banner(form: &FormData) -> Result<String, JsValue> {
        let url = format!("{}/banners", Self::base_url());
        Self::fetch_multipart(&url, "POST", form).await
    }

    pub async fn update_banner(banner_id: &str, form: &FormData) -> Result<String, JsValue> {
        let url = format!("{}/banners/{}", Self::base_url(), banner_id);
        Self::fetch_multipart(&url, "PUT", form).await
    }

    pub async fn delete_banner(banner_id: &str) -> Result<(), JsValue> {
        let url = format!("{}/banners/{}", Self::base_url(), banner_id);
        let _ = Self::fetch_json(&url, "DELETE", None).await?;
        Ok(())
    }

    pub async fn get_home_sections() -> Result<String, JsValue> {
        let url = format!("{}/home-content", Self::base_url());
        Self::fetch_json(&url, "GET", None).await
    }

    pub async fn update_home_section(section_id: &str, payload: &str) -> Result<String, JsValue> {
        let url = format!("{}/home-content/{}", Self::base_url(), section_id);
        Self::fetch_json(&url, "PUT", Some(payload)).await
    }

    // ---------------- Transport ----------------

    pub async fn fetch_json(url: &str, method: &str, body: Option<&str>) -> Result<String, JsValue> {
        Self::request_json(url, method, body, AuthFailure::ExpireSession).await
    }

    async fn request_json(
        url: &str,
        method: &str,
        body: Option<&str>,
        policy: AuthFailure,
    ) -> Result<String, JsValue> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new()?;
        if let Some(token) = current_token() {
            headers.append("Authorization", &format!("Bearer {}", token))?;
        }
        if let Some(data) = body {
            opts.set_body(&JsValue::from_str(data));
            headers.append("Content-Type", "application/json")?;
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)?;
        Self::run(request, policy).await
    }

    /// Multipart request. Content-Type is left to the browser so the
    /// boundary gets set correctly.
    pub async fn fetch_multipart(
        url: &str,
        method: &str,
        form: &FormData,
    ) -> Result<String, JsValue> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new()?;
        if let Some(token) = current_token() {
            headers.append("Authorization", &format!("Bearer {}", token))?;
        }
        opts.set_headers(&headers);
        opts.set_body(form);

        let request = Request::new_with_str_and_init(url, &opts)?;
        Self::run(request, AuthFailure::ExpireSession).await
    }

    async fn run(request: Request, policy: AuthFailure) -> Result<String, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            let status = resp.status();
            if ends_session(status, policy) {
                dispatch_global_message(Message::SessionExpired);
            }
            return Err(JsValue::from_str(&format!(
                "{} {}",
                status,
                resp.status_text()
            )));
        }

        let text = JsFuture::from(resp.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }
}

fn current_token() -> Option<String> {
    APP_STATE.with(|state| state.borrow().session.token().map(str::to_string))
}

pub(crate) fn describe_error(e: &JsValue) -> String {
    e.as_string()
        .unwrap_or_else(|| format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_tokens_end_the_session() {
        assert!(ends_session(401, AuthFailure::ExpireSession));
        assert!(ends_session(403, AuthFailure::ExpireSession));
        assert!(!ends_session(500, AuthFailure::ExpireSession));
        assert!(!ends_session(404, AuthFailure::ExpireSession));
    }

    #[test]
    fn a_failed_login_is_not_an_expired_session() {
        // Wrong credentials come back as 401; the login form reports that
        // inline instead of bouncing through the session-expired path.
        assert!(!ends_session(401, AuthFailure::Surface));
        assert!(!ends_session(403, AuthFailure::Surface));
    }
}
