use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum SnaplinkError {
    InvalidInput(String),
    NotFound(String),
    Conflict(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Metrics(String),
}

impl SnaplinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidInput(_) => "E001",
            SnaplinkError::NotFound(_) => "E002",
            SnaplinkError::Conflict(_) => "E003",
            SnaplinkError::DatabaseConfig(_) => "E004",
            SnaplinkError::DatabaseConnection(_) => "E005",
            SnaplinkError::DatabaseOperation(_) => "E006",
            SnaplinkError::Metrics(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidInput(_) => "Invalid Input",
            SnaplinkError::NotFound(_) => "Resource Not Found",
            SnaplinkError::Conflict(_) => "Short Code Conflict",
            SnaplinkError::DatabaseConfig(_) => "Database Configuration Error",
            SnaplinkError::DatabaseConnection(_) => "Database Connection Error",
            SnaplinkError::DatabaseOperation(_) => "Database Operation Error",
            SnaplinkError::Metrics(_) => "Metrics Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            SnaplinkError::InvalidInput(msg)
            | SnaplinkError::NotFound(msg)
            | SnaplinkError::Conflict(msg)
            | SnaplinkError::DatabaseConfig(msg)
            | SnaplinkError::DatabaseConnection(msg)
            | SnaplinkError::DatabaseOperation(msg)
            | SnaplinkError::Metrics(msg) => msg,
        }
    }

    /// HTTP status for the boundary layer.
    ///
    /// A code collision is not something the client can fix, so it is
    /// reported like any other internal failure.
    pub fn http_status(&self) -> StatusCode {
        match self {
            SnaplinkError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SnaplinkError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.http_status() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SnaplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SnaplinkError {}

// 便捷的构造函数
impl SnaplinkError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::InvalidInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Conflict(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DatabaseOperation(msg.into())
    }

    pub fn metrics<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Metrics(msg.into())
    }
}

impl From<sea_orm::DbErr> for SnaplinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        SnaplinkError::DatabaseOperation(err.to_string())
    }
}

impl From<prometheus::Error> for SnaplinkError {
    fn from(err: prometheus::Error) -> Self {
        SnaplinkError::Metrics(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnaplinkError>;
