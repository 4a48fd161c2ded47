// ============================================================================
// BROWSER TRANSPORT - fetch() through gloo-net
// ============================================================================

use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, Blob, BlobPropertyBag, FormData};

use crate::error::ApiError;
use crate::services::api_client::{encode_form, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody};
use crate::services::multipart::MultipartForm;

#[derive(Default, Clone, Copy)]
pub struct BrowserTransport;

fn js_error(context: &str, value: JsValue) -> ApiError {
    ApiError::Network(format!("{}: {:?}", context, value))
}

fn form_data(form: &MultipartForm) -> Result<FormData, ApiError> {
    let data = FormData::new().map_err(|e| js_error("FormData", e))?;
    for (name, value) in &form.fields {
        data.append_with_str(name, value)
            .map_err(|e| js_error("FormData field", e))?;
    }
    for (name, part) in &form.files {
        let bytes = js_sys::Uint8Array::from(part.bytes.as_slice());
        let chunks = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&part.content_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
            .map_err(|e| js_error("Blob", e))?;
        data.append_with_blob_and_filename(name, &blob, &part.file_name)
            .map_err(|e| js_error("FormData file", e))?;
    }
    Ok(data)
}

async fn read_response(prepared: Request) -> Result<HttpResponse, ApiError> {
    let response = prepared.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("Could not read response body: {}", e)))?;
    Ok(HttpResponse { status, body })
}

impl HttpTransport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let controller = AbortController::new().map_err(|e| js_error("AbortController", e))?;
        let signal = controller.signal();

        let mut builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = builder.abort_signal(Some(&signal));

        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(json) => builder.body(json.clone()),
            RequestBody::Form(fields) => builder.body(encode_form(fields)),
            RequestBody::Multipart(form) => builder.body(form_data(form)?),
        }
        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?;

        // The bound covers headers and body; aborting also fails the body stream
        let timeout = Timeout::new(request.timeout_ms, move || controller.abort());
        let result = read_response(prepared).await;
        timeout.cancel();
        result
    }
}
