use std::fmt;

/// Result type for dbferry-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the pipeline layer
#[derive(Debug)]
pub enum Error {
    /// Core/configuration layer error
    Core(dbferry_core::Error),

    /// Database connection or query failed
    Database(postgres::Error),

    /// CSV serialization failed
    Csv(csv::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// SSH/SFTP session error
    Ssh(ssh2::Error),

    /// Configured table/column pair is not present in the database catalog
    UnknownColumn { table: String, column: String },

    /// Invalid operation or state
    InvalidOperation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Core(err) => write!(f, "Core error: {}", err),
            Error::Database(err) => write!(f, "Database error: {}", err),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Ssh(err) => write!(f, "SFTP error: {}", err),
            Error::UnknownColumn { table, column } => write!(
                f,
                "Column {}.{} not found in the database catalog; check backup.tables and backup.time_column",
                table, column
            ),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Core(err) => Some(err),
            Error::Database(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Ssh(err) => Some(err),
            Error::UnknownColumn { .. } | Error::InvalidOperation(_) => None,
        }
    }
}

impl From<dbferry_core::Error> for Error {
    fn from(err: dbferry_core::Error) -> Self {
        Error::Core(err)
    }
}

impl From<postgres::Error> for Error {
    fn from(err: postgres::Error) -> Self {
        Error::Database(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<ssh2::Error> for Error {
    fn from(err: ssh2::Error) -> Self {
        Error::Ssh(err)
    }
}
