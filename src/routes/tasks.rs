use crate::{
    error::AppError,
    models::{NewTask, TaskPatch},
    store::TaskStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}

/// The `/tasks` scope with every task route registered.
pub fn scope() -> actix_web::Scope {
    web::scope("/tasks")
        .service(list_tasks)
        .service(create_task)
        .service(update_task)
        .service(delete_task)
}

/// Lists every task, newest first.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks (possibly empty).
/// - `500 Internal Server Error`: storage failure.
#[get("")]
pub async fn list_tasks(tasks: web::Data<dyn TaskStore>) -> Result<impl Responder, AppError> {
    let tasks = tasks.list_tasks().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task from `{"text": ...}`.
///
/// The text is trimmed before it is stored and the task starts incomplete.
///
/// ## Responses:
/// - `201 Created`: the stored task.
/// - `400 Bad Request`: `text` missing or blank.
#[post("")]
pub async fn create_task(
    tasks: web::Data<dyn TaskStore>,
    body: web::Json<NewTask>,
) -> Result<impl Responder, AppError> {
    let text = body.into_inner().into_text()?;
    let task = tasks.create_task(&text).await?;
    log::info!("Created task {}", task.id);
    Ok(HttpResponse::Created().json(task))
}

/// Updates `text` and/or `completed`; fields absent from the body keep their value.
///
/// An unknown id is reported as `404` even when the body is unusable.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`: neither field supplied, `text` blank, or a malformed body.
/// - `404 Not Found`: no task with this id.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<dyn TaskStore>,
    task_id: web::Path<i32>,
    body: Result<web::Json<TaskPatch>, actix_web::Error>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    let changes = body
        .map_err(|_| AppError::BadRequest("Invalid request body".into()))
        .and_then(|body| body.into_inner().into_changes());

    let changes = match changes {
        Ok(changes) => changes,
        Err(err) => {
            return match tasks.get_task(task_id).await? {
                Some(_) => Err(err),
                None => Err(task_not_found()),
            };
        }
    };

    let task = tasks
        .update_task(task_id, &changes)
        .await?
        .ok_or_else(task_not_found)?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task and echoes the removed row.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task deleted successfully", "task": {...}}`.
/// - `404 Not Found`: no task with this id.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<dyn TaskStore>,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .delete_task(task_id.into_inner())
        .await?
        .ok_or_else(task_not_found)?;
    log::info!("Deleted task {}", task.id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully",
        "task": task
    })))
}
