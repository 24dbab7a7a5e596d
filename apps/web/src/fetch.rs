use uni_map_core::{BackendRecord, FetchError, HealthStatus};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, AbortSignal, DomException, Request, RequestInit, RequestMode, Response,
    UrlSearchParams, Window,
};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Backend base URL, taken from `?api=` when the page sets it.
pub fn api_base(window: &Window) -> String {
    window
        .location()
        .search()
        .ok()
        .and_then(|search| UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("api"))
        .map(|base| base.trim().trim_end_matches('/').to_string())
        .filter(|base| !base.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Aborts `controller` when the page is hidden for good.
pub fn abort_on_pagehide(window: &Window, controller: AbortController) -> Result<(), JsValue> {
    let on_pagehide = Closure::<dyn FnMut()>::new(move || controller.abort());
    window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())?;
    // Lives as long as the page does.
    on_pagehide.forget();
    Ok(())
}

/// `GET {base}/health`. The status code is not checked; only the body counts.
pub async fn fetch_health(window: &Window, base: &str) -> Result<HealthStatus, FetchError> {
    let response = send(window, &format!("{base}/health"), None).await?;
    let body = JsFuture::from(response.json().map_err(js_error)?)
        .await
        .map_err(|e| FetchError::Decode(describe(&e)))?;
    serde_wasm_bindgen::from_value(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// `GET {base}/universities`, cancelled through `signal`.
pub async fn fetch_universities(
    window: &Window,
    base: &str,
    signal: Option<&AbortSignal>,
) -> Result<Vec<BackendRecord>, FetchError> {
    let response = send(window, &format!("{base}/universities"), signal).await?;
    if !response.ok() {
        return Err(FetchError::Status {
            status: response.status(),
            reason: response.status_text(),
        });
    }

    // Read as text so numeric ids keep their JSON spelling.
    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    let text = text
        .as_string()
        .ok_or_else(|| FetchError::Decode("response body is not text".into()))?;
    serde_json::from_str(&text).map_err(|e| FetchError::Decode(e.to_string()))
}

async fn send(window: &Window, url: &str, signal: Option<&AbortSignal>) -> Result<Response, FetchError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    opts.set_signal(signal);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    value
        .dyn_into::<Response>()
        .map_err(|_| FetchError::Network("fetch did not return a Response".into()))
}

fn js_error(error: JsValue) -> FetchError {
    if error
        .dyn_ref::<DomException>()
        .is_some_and(|exception| exception.name() == "AbortError")
    {
        return FetchError::Aborted;
    }
    FetchError::Network(describe(&error))
}

fn describe(error: &JsValue) -> String {
    if let Some(exception) = error.dyn_ref::<DomException>() {
        return format!("{}: {}", exception.name(), exception.message());
    }
    if let Some(js_error) = error.dyn_ref::<js_sys::Error>() {
        return String::from(js_error.message());
    }
    error.as_string().unwrap_or_else(|| format!("{error:?}"))
}
