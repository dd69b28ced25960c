//! Browser transport backed by `gloo-net` (fetch API).

use gloo_net::http::{Method as GlooMethod, RequestBuilder};

use super::http::{ApiError, ApiRequest, ApiResponse, Method, RequestBody, Transport};

/// Fetch-based [`Transport`] used by the hydrated app.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

fn gloo_method(method: Method) -> GlooMethod {
    match method {
        Method::Get => GlooMethod::GET,
        Method::Post => GlooMethod::POST,
        Method::Put => GlooMethod::PUT,
        Method::Patch => GlooMethod::PATCH,
        Method::Delete => GlooMethod::DELETE,
    }
}

impl Transport for GlooTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = request.full_url();
        let mut builder = RequestBuilder::new(&url).method(gloo_method(request.method));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart { field, file } => {
                let form = web_sys::FormData::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;
                form.append_with_blob_and_filename(&field, &file, &file.name())
                    .map_err(|e| ApiError::Network(format!("{e:?}")))?;
                builder.body(form)
            }
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::debug!("{} {url} -> {status}", request.method.as_str());
        Ok(ApiResponse { status, body })
    }
}
