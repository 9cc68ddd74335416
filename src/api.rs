//! Backend API Wrappers
//!
//! Typed async bindings over browser `fetch`: form-encoded POSTs for
//! mutations, JSON GETs for reads. Endpoints that answer with the uniform
//! `{success, error?, message?}` envelope are converted to `Result` here so
//! callers only see `ApiError`.

use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, RequestInit, Response, UrlSearchParams};

use crate::config;
use crate::error::ApiError;
use crate::models::{
    ActiveTimeLog, ApiOutcome, Task, TaskAttachment, TaskStatus, UploadOutcome, User,
};

fn js_detail(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

async fn send(path: &str, init: &RequestInit) -> Result<Response, ApiError> {
    let url = format!("{}{}", config::api_base(), path);
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let fetched = JsFuture::from(window.fetch_with_str_and_init(&url, init))
        .await
        .map_err(|e| ApiError::Network(js_detail(&e)))?;
    let response: Response = fetched
        .dyn_into()
        .map_err(|_| ApiError::Network("fetch returned a non-Response value".to_string()))?;
    if !response.ok() {
        return Err(ApiError::Http {
            status: response.status(),
        });
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let promise = response.json().map_err(|e| ApiError::Decode(js_detail(&e)))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| ApiError::Decode(js_detail(&e)))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let init = RequestInit::new();
    init.set_method("GET");
    decode(send(path, &init).await?).await
}

fn form_body(fields: &[(&str, &str)]) -> Result<UrlSearchParams, ApiError> {
    let params = UrlSearchParams::new().map_err(|e| ApiError::Network(js_detail(&e)))?;
    for (name, value) in fields {
        params.append(name, value);
    }
    Ok(params)
}

async fn post_form(path: &str, fields: &[(&str, &str)]) -> Result<Response, ApiError> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from(form_body(fields)?));
    send(path, &init).await
}

fn verdict(outcome: ApiOutcome) -> Result<Option<String>, ApiError> {
    if outcome.success {
        Ok(outcome.message)
    } else {
        Err(ApiError::Rejected(outcome.error.unwrap_or_else(|| {
            "The server rejected the request.".to_string()
        })))
    }
}

/// POST a form and interpret the JSON verdict envelope.
/// Ok carries the server's optional success message.
async fn post_form_verdict(path: &str, fields: &[(&str, &str)]) -> Result<Option<String>, ApiError> {
    verdict(decode(post_form(path, fields).await?).await?)
}

// ========================
// Board Data
// ========================

pub async fn fetch_tasks() -> Result<Vec<Task>, ApiError> {
    get_json("/api/tasks").await
}

pub async fn fetch_users() -> Result<Vec<User>, ApiError> {
    get_json("/api/users").await
}

// ========================
// Task Mutations
// ========================

/// The drag-and-drop status change. One request per drop, no retry.
pub async fn update_task_status(task_id: &str, status: TaskStatus) -> Result<(), ApiError> {
    post_form_verdict(
        &format!("/update_task/{task_id}"),
        &[("status", status.as_str())],
    )
    .await
    .map(|_| ())
}

/// Full edit-form payload for `POST /update_task/{task_id}`.
/// Empty strings mean "field cleared"; the backend treats them as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskEdit {
    pub title: String,
    pub description: String,
    pub assignee_id: String,
    pub priority: String,
    pub complexity: String,
    pub task_status: String,
    pub team_id: String,
    pub estimated_hours: String,
    pub started_at: String,
    pub due_date: String,
    pub completed_at: String,
}

/// Full task update. The server answers this form with a page redirect,
/// so any 2xx counts as success and the body is ignored.
pub async fn update_task_details(task_id: &str, edit: &TaskEdit) -> Result<(), ApiError> {
    post_form(
        &format!("/update_task/{task_id}"),
        &[
            ("title", edit.title.as_str()),
            ("description", edit.description.as_str()),
            ("assignee_id", edit.assignee_id.as_str()),
            ("priority", edit.priority.as_str()),
            ("complexity", edit.complexity.as_str()),
            ("task_status", edit.task_status.as_str()),
            ("team_id", edit.team_id.as_str()),
            ("estimated_hours", edit.estimated_hours.as_str()),
            ("started_at", edit.started_at.as_str()),
            ("due_date", edit.due_date.as_str()),
            ("completed_at", edit.completed_at.as_str()),
        ],
    )
    .await
    .map(|_| ())
}

pub async fn create_task(
    title: &str,
    description: &str,
    assignee_id: &str,
    priority: &str,
) -> Result<(), ApiError> {
    post_form(
        "/create_task",
        &[
            ("title", title),
            ("description", description),
            ("assignee_id", assignee_id),
            ("priority", priority),
        ],
    )
    .await
    .map(|_| ())
}

pub async fn delete_task(task_id: &str) -> Result<(), ApiError> {
    post_form(&format!("/delete_task/{task_id}"), &[])
        .await
        .map(|_| ())
}

pub async fn update_task_estimate(task_id: &str, hours: f64) -> Result<Option<String>, ApiError> {
    let hours = hours.to_string();
    post_form_verdict(
        &format!("/task/estimate/{task_id}"),
        &[("estimated_hours", hours.as_str())],
    )
    .await
}

// ========================
// Time Tracking
// ========================

pub async fn active_time_log() -> Result<ActiveTimeLog, ApiError> {
    get_json("/time/active").await
}

pub async fn start_time_tracking(
    task_id: &str,
    description: &str,
) -> Result<Option<String>, ApiError> {
    post_form_verdict(
        &format!("/time/start/{task_id}"),
        &[("description", description)],
    )
    .await
}

pub async fn stop_time_tracking(time_log_id: &str) -> Result<Option<String>, ApiError> {
    post_form_verdict(&format!("/time/stop/{time_log_id}"), &[]).await
}

// ========================
// Attachments
// ========================

pub async fn fetch_attachments(task_id: &str) -> Result<Vec<TaskAttachment>, ApiError> {
    get_json(&format!("/task/attachments/{task_id}")).await
}

pub async fn upload_attachment(task_id: &str, file: &File) -> Result<TaskAttachment, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Network(js_detail(&e)))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| ApiError::Network(js_detail(&e)))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from(form));

    let response = send(&format!("/upload_attachment/{task_id}"), &init).await?;
    let outcome: UploadOutcome = decode(response).await?;
    if outcome.success {
        outcome
            .attachment
            .ok_or_else(|| ApiError::Decode("upload response missing attachment".to_string()))
    } else {
        Err(ApiError::Rejected(
            outcome
                .error
                .unwrap_or_else(|| "Upload failed.".to_string()),
        ))
    }
}

// ========================
// Team
// ========================

pub async fn update_user_role(user_id: &str, role: &str) -> Result<Option<String>, ApiError> {
    post_form_verdict(&format!("/update_user_role/{user_id}"), &[("role", role)]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_success_carries_message() {
        let outcome = ApiOutcome {
            success: true,
            error: None,
            message: Some("Time tracking started".to_string()),
        };
        assert_eq!(
            verdict(outcome).unwrap().as_deref(),
            Some("Time tracking started")
        );
    }

    #[test]
    fn test_verdict_failure_becomes_rejection() {
        let outcome = ApiOutcome {
            success: false,
            error: Some("Permission denied".to_string()),
            message: None,
        };
        assert_eq!(
            verdict(outcome).unwrap_err(),
            ApiError::Rejected("Permission denied".to_string())
        );
    }

    #[test]
    fn test_verdict_failure_without_reason_gets_generic_text() {
        let outcome = ApiOutcome::default();
        let ApiError::Rejected(reason) = verdict(outcome).unwrap_err() else {
            panic!("expected rejection");
        };
        assert_eq!(reason, "The server rejected the request.");
    }
}
