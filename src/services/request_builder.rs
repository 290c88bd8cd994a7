use std::collections::{BTreeMap, HashMap};

use reqwest::Url;
use serde::Serialize;
use serde_json::{json, Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{fields, find_endpoint, EndpointDescriptor, EndpointKind, HttpMethod};

/// Field name -> value as entered by the user
pub type FieldValues = HashMap<String, String>;

/// Fully-formed HTTP request ready to be sent
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BuiltRequest {
    pub endpoint: String,
    pub method: HttpMethod,
    pub url: String,
    /// Path after placeholder substitution, percent-encoded as sent
    pub path: String,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// Build a request for a catalog endpoint from user-entered field values
pub fn build_request(base_url: &str, endpoint_id: &str, values: &FieldValues) -> AppResult<BuiltRequest> {
    let endpoint = find_endpoint(endpoint_id)
        .ok_or_else(|| AppError::UnknownEndpoint(endpoint_id.to_string()))?;
    let form = Form {
        endpoint: &endpoint,
        values,
    };

    let (url, path) = resolve_url(base_url, endpoint.path, &form)?;
    let headers = build_headers(&form);

    let body = if endpoint.method.has_body() {
        let builder: fn(&Form<'_>) -> AppResult<Value> = match endpoint.kind {
            EndpointKind::IndexRepository => index_repository_body,
            EndpointKind::QueryRepo => query_repo_body,
            EndpointKind::GetRepositoryInfo => empty_body,
        };
        Some(builder(&form)?)
    } else {
        None
    };

    Ok(BuiltRequest {
        endpoint: endpoint.id.to_string(),
        method: endpoint.method,
        url: url.to_string(),
        path,
        headers,
        body,
    })
}

/// Read-only view of the user's values, resolved against field defaults
struct Form<'a> {
    endpoint: &'a EndpointDescriptor,
    values: &'a FieldValues,
}

impl Form<'_> {
    /// Trimmed value, or the declared default when empty
    fn get(&self, name: &str) -> Option<String> {
        self.values
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.endpoint
                    .field(name)
                    .and_then(|f| f.default)
                    .map(str::to_string)
            })
    }

    fn string(&self, name: &str) -> String {
        self.get(name).unwrap_or_default()
    }

    fn boolean(&self, name: &str) -> AppResult<bool> {
        match self.get(name) {
            None => Ok(false),
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::Validation(format!("{} must be \"true\" or \"false\", got {:?}", name, raw))
            }),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Join the path template onto the base URL.
///
/// Each template segment has its `{name}` placeholders replaced and is then
/// percent-encoded as a single segment, so values cannot add segments, a query
/// or a fragment. Returns the URL and the path below the base URL.
fn resolve_url(base_url: &str, template: &str, form: &Form<'_>) -> AppResult<(Url, String)> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::Internal(format!("Invalid API base URL {:?}: {}", base_url, e)))?;
    let base_len = url.path().trim_end_matches('/').len();

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| AppError::Internal(format!("API base URL cannot have a path: {}", base_url)))?;
        segments.pop_if_empty();
        for segment in template.trim_start_matches('/').split('/') {
            segments.push(&substitute_segment(segment, template, form)?);
        }
    }

    let path = url.path()[base_len..].to_string();
    Ok((url, path))
}

/// Replace every `{name}` in one template segment with the matching field value
fn substitute_segment(segment: &str, template: &str, form: &Form<'_>) -> AppResult<String> {
    let mut resolved = String::with_capacity(segment.len());
    let mut rest = segment;

    while let Some(start) = rest.find('{') {
        let end = rest[start..]
            .find('}')
            .map(|offset| start + offset)
            .ok_or_else(|| AppError::Internal(format!("Malformed path template: {}", template)))?;
        let name = &rest[start + 1..end];
        let value = form
            .get(name)
            .ok_or_else(|| AppError::Validation(format!("Missing path parameter: {}", name)))?;

        resolved.push_str(&rest[..start]);
        resolved.push_str(&value);
        rest = &rest[end + 1..];
    }
    resolved.push_str(rest);

    // Dot segments are dropped by URL normalization and would change the target
    if resolved == "." || resolved == ".." {
        return Err(AppError::Validation(format!(
            "Path parameter cannot be {:?}",
            resolved
        )));
    }

    Ok(resolved)
}

fn build_headers(form: &Form<'_>) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    if let Some(token) = form.get(fields::AUTHORIZATION) {
        let value = if token.starts_with("Bearer ") {
            token
        } else {
            format!("Bearer {}", token)
        };
        headers.insert("Authorization".to_string(), value);
    }

    if form.endpoint.field(fields::GITHUB_TOKEN).is_some() {
        if let Some(token) = form.get(fields::GITHUB_TOKEN) {
            headers.insert("X-GitHub-Token".to_string(), token);
        }
    }

    headers
}

fn empty_body(_form: &Form<'_>) -> AppResult<Value> {
    Ok(Value::Object(Map::new()))
}

fn index_repository_body(form: &Form<'_>) -> AppResult<Value> {
    Ok(json!({
        "remote": form.string(fields::REMOTE),
        "repository": form.string(fields::REPOSITORY),
        "branch": form.string(fields::BRANCH),
        "reload": form.boolean(fields::RELOAD)?,
        "notify": form.boolean(fields::NOTIFY)?,
    }))
}

fn query_repo_body(form: &Form<'_>) -> AppResult<Value> {
    let message_id = form
        .get(fields::MESSAGE_ID)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut body = json!({
        "messages": [{
            "id": message_id,
            "content": form.string(fields::CONTENT),
            "role": form.string(fields::ROLE),
        }],
        "repositories": [{
            "remote": form.string(fields::REMOTE),
            "branch": form.string(fields::BRANCH),
            "repository": form.string(fields::REPOSITORY),
        }],
        "stream": form.boolean(fields::STREAM)?,
        "genius": form.boolean(fields::GENIUS)?,
    });

    if let Some(session_id) = form.get(fields::SESSION_ID) {
        body["sessionId"] = Value::String(session_id);
    }

    Ok(body)
}
