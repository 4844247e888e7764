//! fetch によるAPI呼び出し
//!
//! `ApiRequest` を送信し、ステータスと本文をそのまま返す。
//! 本文の解釈は呼び出し側（コントローラー）が行う。

use js_sys::{Array, Uint8Array};
use resume_ai_common::api::{ApiRequest, Body, Outcome, Part, RawResponse};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

/// リクエストを送信する。通信自体が失敗した場合はErrに理由を入れる
pub async fn execute(base_url: &str, request: &ApiRequest) -> Outcome {
    match send(base_url, request).await {
        Ok(response) => {
            tracing::debug!("{} {} -> {}", request.method().as_str(), request.path(), response.status);
            Ok(response)
        }
        Err(e) => {
            let reason = describe(&e);
            tracing::warn!("{} {} failed: {}", request.method().as_str(), request.path(), reason);
            Err(reason)
        }
    }
}

async fn send(base_url: &str, request: &ApiRequest) -> Result<RawResponse, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(request.method().as_str());
    opts.set_mode(RequestMode::Cors);

    let body = request
        .body()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let is_json = matches!(body, Body::Json(_));
    match body {
        Body::Empty => {}
        Body::Json(value) => opts.set_body(&JsValue::from_str(&value.to_string())),
        // Content-Type はブラウザが boundary 付きで設定する
        Body::Multipart(parts) => opts.set_body(&form_data(&parts)?.into()),
    }

    let fetch_request = Request::new_with_str_and_init(&request.url(base_url), &opts)?;
    if is_json {
        fetch_request.headers().set("Content-Type", "application/json")?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&fetch_request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;
    Ok(RawResponse::new(resp.status(), text.as_string().unwrap_or_default()))
}

fn form_data(parts: &[Part]) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for part in parts {
        match part {
            Part::Text { name, value } => form.append_with_str(name, value)?,
            Part::File { name, file } => {
                let bytes = Uint8Array::from(file.bytes.as_slice());
                let props = BlobPropertyBag::new();
                props.set_type(&file.content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&Array::of1(&bytes), &props)?;
                form.append_with_blob_and_filename(name, &blob, &file.file_name)?;
            }
        }
    }
    Ok(form)
}

fn describe(error: &JsValue) -> String {
    if let Some(e) = error.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}
