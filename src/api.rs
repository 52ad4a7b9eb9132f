//! HTTP client for the taxonomy REST service. One generic `call` entry
//! point plus typed wrappers per endpoint; no retries, no timeouts, no
//! auth.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::config::AppConfig;
use crate::model::{Label, LabelValueRecord};

/// How a call against the service can fail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
	/// The request never produced a usable response.
	#[error("network error: {0}")]
	Network(String),
	/// The server answered with anything but 200/204; the message is the
	/// raw response body text.
	#[error("{0}")]
	Status(String),
}

/// Outcome of a successful call: a JSON payload or the bare 204 marker.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse {
	/// 204 No Content, the service's success sentinel for deletes.
	NoContent,
	Json(Value),
}

impl ApiResponse {
	/// What a 204 stands for.
	pub const OK_MARKER: &'static str = "OK";

	/// The success marker, for responses that carry no payload.
	pub fn marker(&self) -> Option<&'static str> {
		match self {
			ApiResponse::NoContent => Some(Self::OK_MARKER),
			ApiResponse::Json(_) => None,
		}
	}

	fn into_payload<T: DeserializeOwned>(self) -> Result<T, ApiError> {
		match self {
			ApiResponse::Json(value) => {
				serde_json::from_value(value).map_err(|e| ApiError::Network(e.to_string()))
			}
			ApiResponse::NoContent => Err(ApiError::Network("missing response body".to_owned())),
		}
	}
}

/// Map a raw status/body pair to the call outcome. 204 is success with no
/// payload, 200 is success with a JSON payload, everything else fails with
/// the body text as the message.
pub fn decode_response(status: u16, body: &str) -> Result<ApiResponse, ApiError> {
	match status {
		204 => Ok(ApiResponse::NoContent),
		200 => serde_json::from_str(body)
			.map(ApiResponse::Json)
			.map_err(|e| ApiError::Network(e.to_string())),
		_ => Err(ApiError::Status(body.to_owned())),
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
	Put,
	Delete,
}

fn labels_url(base: &str) -> String {
	format!("{base}/labels")
}

fn label_url(base: &str, key: &str) -> String {
	format!("{base}/labels/{key}")
}

fn values_url(base: &str, key: &str) -> String {
	format!("{base}/labels/{key}/values")
}

fn values_query_url(base: &str, key: &str, value_prefix: &str, partial_name: &str) -> String {
	format!("{base}/labels/{key}/values?valuePrefix={value_prefix}&partialName={partial_name}")
}

fn value_url(base: &str, key: &str, value: &str) -> String {
	format!("{base}/labels/{key}/values/{value}")
}

fn value_update_url(base: &str, key: &str, value: &str, update_children: bool) -> String {
	format!("{base}/labels/{key}/values/{value}?updateChildren={update_children}")
}

/// Thin client over the service's REST surface.
#[derive(Clone, Debug)]
pub struct ApiClient {
	base_url: String,
}

impl ApiClient {
	pub fn new(config: &AppConfig) -> Self {
		Self {
			base_url: config.base_url.trim_end_matches('/').to_owned(),
		}
	}

	/// Every request goes through here. GET/DELETE carry no body; POST/PUT
	/// send JSON, or a literal `null` payload when no body is given.
	pub async fn call(
		&self,
		url: &str,
		method: Method,
		body: Option<&Value>,
	) -> Result<ApiResponse, ApiError> {
		let request = match method {
			Method::Get => Request::get(url).build(),
			Method::Delete => Request::delete(url).build(),
			Method::Post | Method::Put => {
				let builder = match method {
					Method::Post => Request::post(url),
					_ => Request::put(url),
				};
				match body {
					Some(body) => builder.json(body),
					None => builder
						.header("Content-Type", "application/json")
						.body("null"),
				}
			}
		}
		.map_err(|e| ApiError::Network(e.to_string()))?;

		let response = request
			.send()
			.await
			.map_err(|e| ApiError::Network(e.to_string()))?;
		let status = response.status();
		let body = response
			.text()
			.await
			.map_err(|e| ApiError::Network(e.to_string()))?;
		decode_response(status, &body)
	}

	/// GET /labels
	pub async fn labels(&self) -> Result<Vec<Label>, ApiError> {
		self.call(&labels_url(&self.base_url), Method::Get, None)
			.await?
			.into_payload()
	}

	/// POST /labels
	pub async fn create_label(&self, label: &Label) -> Result<Label, ApiError> {
		let body = to_body(label)?;
		self.call(&labels_url(&self.base_url), Method::Post, Some(&body))
			.await?
			.into_payload()
	}

	/// PUT /labels/{key}
	pub async fn update_label(&self, key: &str, label: &Label) -> Result<Label, ApiError> {
		let body = to_body(label)?;
		self.call(&label_url(&self.base_url, key), Method::Put, Some(&body))
			.await?
			.into_payload()
	}

	/// DELETE /labels/{key}
	pub async fn delete_label(&self, key: &str) -> Result<(), ApiError> {
		self.call(&label_url(&self.base_url, key), Method::Delete, None)
			.await
			.map(|_| ())
	}

	/// GET /labels/{key}/values with both query filters always present.
	pub async fn label_values(
		&self,
		key: &str,
		value_prefix: &str,
		partial_name: &str,
	) -> Result<Vec<LabelValueRecord>, ApiError> {
		let url = values_query_url(&self.base_url, key, value_prefix, partial_name);
		self.call(&url, Method::Get, None).await?.into_payload()
	}

	/// POST /labels/{key}/values
	pub async fn create_value(
		&self,
		key: &str,
		record: &LabelValueRecord,
	) -> Result<LabelValueRecord, ApiError> {
		let body = to_body(record)?;
		self.call(&values_url(&self.base_url, key), Method::Post, Some(&body))
			.await?
			.into_payload()
	}

	/// PUT /labels/{key}/values/{value}?updateChildren=bool
	pub async fn update_value(
		&self,
		key: &str,
		value: &str,
		update_children: bool,
		record: &LabelValueRecord,
	) -> Result<LabelValueRecord, ApiError> {
		let body = to_body(record)?;
		let url = value_update_url(&self.base_url, key, value, update_children);
		self.call(&url, Method::Put, Some(&body)).await?.into_payload()
	}

	/// DELETE /labels/{key}/values/{value}
	pub async fn delete_value(&self, key: &str, value: &str) -> Result<(), ApiError> {
		self.call(&value_url(&self.base_url, key, value), Method::Delete, None)
			.await
			.map(|_| ())
	}
}

fn to_body<T: serde::Serialize>(payload: &T) -> Result<Value, ApiError> {
	serde_json::to_value(payload).map_err(|e| ApiError::Network(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn no_content_yields_the_ok_marker() {
		let response = decode_response(204, "").unwrap();
		assert_eq!(response, ApiResponse::NoContent);
		assert_eq!(response.marker(), Some("OK"));
	}

	#[test]
	fn ok_yields_parsed_json() {
		let response = decode_response(200, r#"{"key":"cat","name":"Category"}"#).unwrap();
		let ApiResponse::Json(value) = &response else {
			panic!("expected a JSON payload");
		};
		assert_eq!(value["key"], "cat");
		assert_eq!(response.marker(), None);
	}

	#[test]
	fn other_statuses_fail_with_the_body_text() {
		let err = decode_response(404, "not found").unwrap_err();
		assert_eq!(err, ApiError::Status("not found".to_owned()));
		assert_eq!(err.to_string(), "not found");
	}

	#[test]
	fn malformed_ok_body_is_a_network_error() {
		assert!(matches!(
			decode_response(200, "no json here"),
			Err(ApiError::Network(_))
		));
	}

	#[test]
	fn urls_follow_the_rest_surface() {
		let base = "https://localhost:5021";
		assert_eq!(labels_url(base), "https://localhost:5021/labels");
		assert_eq!(label_url(base, "cat"), "https://localhost:5021/labels/cat");
		assert_eq!(
			values_query_url(base, "cat", "a/", "Cat"),
			"https://localhost:5021/labels/cat/values?valuePrefix=a/&partialName=Cat"
		);
		// Both filters ride along even when empty.
		assert_eq!(
			values_query_url(base, "cat", "", ""),
			"https://localhost:5021/labels/cat/values?valuePrefix=&partialName="
		);
		assert_eq!(
			value_update_url(base, "cat", "a/b", true),
			"https://localhost:5021/labels/cat/values/a/b?updateChildren=true"
		);
	}

	#[test]
	fn trailing_base_slash_is_trimmed() {
		let client = ApiClient::new(&AppConfig {
			base_url: "https://localhost:5021/".to_owned(),
			..Default::default()
		});
		assert_eq!(client.base_url, "https://localhost:5021");
	}
}
