//! Browser transport: `fetch` driven by `wasm_bindgen_futures`.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use parcels::StoreError;

use crate::rest::{RestRequest, RestResponse};
use crate::{Completion, Transport};

#[derive(Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn execute(&self, request: RestRequest, done: Completion) {
        wasm_bindgen_futures::spawn_local(async move {
            done(fetch(request).await);
        });
    }
}

fn js_error(context: &str, err: JsValue) -> StoreError {
    StoreError::Transport(format!("{context}: {err:?}"))
}

async fn fetch(request: RestRequest) -> Result<RestResponse, StoreError> {
    let window = web_sys::window()
        .ok_or_else(|| StoreError::Transport("window not available".to_string()))?;

    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    init.set_mode(RequestMode::Cors);
    if let Some(body) = &request.body {
        init.set_body(&JsValue::from_str(body));
    }

    let js_request = Request::new_with_str_and_init(&request.url, &init)
        .map_err(|e| js_error("building request", e))?;
    for (name, value) in &request.headers {
        js_request
            .headers()
            .set(name, value)
            .map_err(|e| js_error("setting header", e))?;
    }

    let response_value = JsFuture::from(window.fetch_with_request(&js_request))
        .await
        .map_err(|e| js_error("fetch failed", e))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|_| StoreError::Transport("failed to cast fetch response".to_string()))?;

    let status = response.status();
    let text_promise = response
        .text()
        .map_err(|e| js_error("response.text() failed", e))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| js_error("await response text failed", e))?;

    Ok(RestResponse {
        status,
        body: text.as_string().unwrap_or_default(),
    })
}
