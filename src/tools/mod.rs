pub mod create_task;
pub mod get_task_details;
pub mod get_task_status;
pub mod get_time_logs;
pub mod update_task;
pub mod validate;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::kaiten::error::ApiError;
use crate::kaiten::CardSource;
use create_task::CreateTaskParams;
use get_task_details::GetTaskDetailsParams;
use get_task_status::GetTaskStatusParams;
use get_time_logs::GetTimeLogsParams;
use update_task::UpdateTaskParams;

pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ToolError::InvalidArguments(msg.into())
    }

    /// The only text a caller ever sees. Unexpected failures are logged and
    /// replaced by a generic message.
    pub fn caller_message(&self) -> String {
        match self {
            ToolError::InvalidArguments(_) => self.to_string(),
            ToolError::Api(err) if err.is_expected() => err.message.clone(),
            ToolError::Api(err) => {
                error!(
                    path = %err.path,
                    status = err.status,
                    cause = %err.message,
                    "unexpected Kaiten failure"
                );
                INTERNAL_ERROR.to_string()
            }
            ToolError::Internal(err) => {
                error!(cause = %format!("{err:#}"), "internal tool failure");
                INTERNAL_ERROR.to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// What a tool hands back to the transport: JSON text on success, a single
/// message with `isError` set on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<TextContent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    fn text(text: String, is_error: bool) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text".into(),
                text,
            }],
            is_error,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::text(message.into(), true)
    }

    pub fn from_outcome<T: Serialize>(outcome: Result<T, ToolError>) -> Self {
        let json = outcome.and_then(|value| {
            serde_json::to_string(&value).map_err(|e| ToolError::Internal(e.into()))
        });
        match json {
            Ok(text) => Self::text(text, false),
            Err(err) => Self::error(err.caller_message()),
        }
    }

    pub fn message(&self) -> &str {
        self.content.first().map_or("", |c| c.text.as_str())
    }
}

pub struct ToolInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const TOOLS: &[ToolInfo] = &[
    ToolInfo {
        name: "get-task-details",
        title: "Get Task Details",
        description: "Get a Kaiten card with its description, metadata, members and tags. \
            Comments are included by default and paginated with comments_limit (1-100, \
            default 20) and comments_offset. Errors are reported as English messages such as \
            \"Card not found\".",
    },
    ToolInfo {
        name: "get-time-logs",
        title: "Get Time Logs",
        description: "Get the time logged on a card with the total in minutes. \
            group_by: none lists entries, user groups by user, date groups by day.",
    },
    ToolInfo {
        name: "get-task-status",
        title: "Get Task Status",
        description: "Get the current status of 1-50 cards in one call. Each item has \
            card_id, title, board_id, column_id, state and updated_at, or card_id and error \
            when the card is missing or inaccessible. state is \"active\" for Kaiten state 1 \
            and \"unknown_N\" otherwise. An authentication failure aborts the whole request. \
            Error texts are in English, e.g. \"Card not found\" or \"Access to the card is \
            denied\".",
    },
    ToolInfo {
        name: "create-task",
        title: "Create Task",
        description: "Create a card. Required: title (1-500 characters), board_id, column_id. \
            Optional: description (plain text, up to 50000 characters), lane_id, position \
            (1 = top of column, 2 = bottom) and up to 20 tag ids.",
    },
    ToolInfo {
        name: "update-task",
        title: "Update Task",
        description: "Update fields of an existing card. Only the fields you pass are changed: \
            title, description, column_id, lane_id, owner_id, members (up to 20 user ids), \
            tags (up to 20 tag ids). Cards cannot be moved between boards. Returns the full \
            card as stored after the update.",
    },
];

/// The five Kaiten operations behind one uniform result type.
pub struct TaskTools {
    source: Box<dyn CardSource>,
}

impl TaskTools {
    pub fn new(source: Box<dyn CardSource>) -> Self {
        Self { source }
    }

    pub async fn get_task_details(&self, params: GetTaskDetailsParams) -> ToolResult {
        ToolResult::from_outcome(get_task_details::run(self.source.as_ref(), params).await)
    }

    pub async fn get_time_logs(&self, params: GetTimeLogsParams) -> ToolResult {
        ToolResult::from_outcome(get_time_logs::run(self.source.as_ref(), params).await)
    }

    pub async fn get_task_status(&self, params: GetTaskStatusParams) -> ToolResult {
        ToolResult::from_outcome(get_task_status::run(self.source.as_ref(), params).await)
    }

    pub async fn create_task(&self, params: CreateTaskParams) -> ToolResult {
        ToolResult::from_outcome(create_task::run(self.source.as_ref(), params).await)
    }

    pub async fn update_task(&self, params: UpdateTaskParams) -> ToolResult {
        ToolResult::from_outcome(update_task::run(self.source.as_ref(), params).await)
    }

    /// Run a tool by catalogue name with raw JSON arguments.
    pub async fn call(&self, name: &str, arguments: Value) -> ToolResult {
        match name {
            "get-task-details" => match parse_args(arguments) {
                Ok(params) => self.get_task_details(params).await,
                Err(err) => ToolResult::error(err.caller_message()),
            },
            "get-time-logs" => match parse_args(arguments) {
                Ok(params) => self.get_time_logs(params).await,
                Err(err) => ToolResult::error(err.caller_message()),
            },
            "get-task-status" => match parse_args(arguments) {
                Ok(params) => self.get_task_status(params).await,
                Err(err) => ToolResult::error(err.caller_message()),
            },
            "create-task" => match parse_args(arguments) {
                Ok(params) => self.create_task(params).await,
                Err(err) => ToolResult::error(err.caller_message()),
            },
            "update-task" => match parse_args(arguments) {
                Ok(params) => self.update_task(params).await,
                Err(err) => ToolResult::error(err.caller_message()),
            },
            other => ToolResult::error(format!("Unknown tool: {other}")),
        }
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid(e.to_string()))
}
