//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the daemon core
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration error (simple form)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Configuration error (with source)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database-related error
    #[error("Database error: {message}")]
    Database {
        /// Description of the database error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A row disappeared between write and read-back
    #[error("Storage consistency error: {message}")]
    StorageConsistency {
        /// Description of the inconsistency
        message: String,
    },

    /// Schema migration failed; startup must abort
    #[error("Migration {version} failed: {message}")]
    Migration {
        /// The migration version that failed
        version: u32,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// MCP connection to a named server could not be established
    #[error("Transport connect error for '{server}': {message}")]
    TransportConnect {
        /// Server name
        server: String,
        /// Description of the connect failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// MCP stream closed mid-call
    #[error("Transport closed for '{server}'")]
    TransportClosed {
        /// Server name
        server: String,
    },

    /// No such MCP server is registered
    #[error("Unknown MCP server: {server}")]
    UnknownServer {
        /// Server name
        server: String,
    },

    /// Call attempted on a connection that is not connected
    #[error("MCP server '{server}' is not connected")]
    NotConnected {
        /// Server name
        server: String,
    },

    /// A tool call failed after routing/reconnect
    #[error("Tool call failed for '{server}.{tool}': {message}")]
    CallFailed {
        /// Server name
        server: String,
        /// Tool name
        tool: String,
        /// Description of the failure
        message: String,
    },

    /// Webhook dispatch failed
    #[error("Webhook '{endpoint}' failed: {message}")]
    WebhookFailure {
        /// Endpoint name
        endpoint: String,
        /// Description of the failure
        message: String,
    },

    /// Workflow action dispatch error (unknown action, bad params, handler panic)
    #[error("Workflow action error: {message}")]
    WorkflowAction {
        /// Description of the action error
        message: String,
    },

    /// Plugin failed to load
    #[error("Plugin load error for '{plugin}': {message}")]
    PluginLoad {
        /// Plugin name or path
        plugin: String,
        /// Description of the failure
        message: String,
    },

    /// Plugin raised during a hook handler
    #[error("Plugin runtime error for '{plugin}': {message}")]
    PluginRuntime {
        /// Plugin name or path
        plugin: String,
        /// Description of the failure
        message: String,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Memory/skill registry storage error
    #[error("Memory storage error: {message}")]
    MemoryStorage {
        /// Description of the memory storage error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// I/O error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error (simple)
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Database error creation methods
impl Error {
    /// Create a database error
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// Create a database error with source
    pub fn database_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a storage consistency error (a row disappeared between write and read-back)
    pub fn storage_consistency<S: Into<String>>(message: S) -> Self {
        Self::StorageConsistency {
            message: message.into(),
        }
    }
}

// Migration error creation methods
impl Error {
    /// Create a migration failure error
    pub fn migration<S: Into<String>>(version: u32, message: S) -> Self {
        Self::Migration {
            version,
            message: message.into(),
            source: None,
        }
    }

    /// Create a migration failure error with source
    pub fn migration_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        version: u32,
        message: S,
        source: E,
    ) -> Self {
        Self::Migration {
            version,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Transport/MCP error creation methods
impl Error {
    /// Create a transport connect error
    pub fn transport_connect<S: Into<String>>(server: S, message: S) -> Self {
        Self::TransportConnect {
            server: server.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport connect error with source
    pub fn transport_connect_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        server: S,
        message: S,
        source: E,
    ) -> Self {
        Self::TransportConnect {
            server: server.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a transport closed error
    pub fn transport_closed<S: Into<String>>(server: S) -> Self {
        Self::TransportClosed {
            server: server.into(),
        }
    }

    /// Create an unknown server error
    pub fn unknown_server<S: Into<String>>(server: S) -> Self {
        Self::UnknownServer {
            server: server.into(),
        }
    }

    /// Create a not-connected error
    pub fn not_connected<S: Into<String>>(server: S) -> Self {
        Self::NotConnected {
            server: server.into(),
        }
    }

    /// Create a call-failed error
    pub fn call_failed<S: Into<String>>(server: S, tool: S, message: S) -> Self {
        Self::CallFailed {
            server: server.into(),
            tool: tool.into(),
            message: message.into(),
        }
    }
}

// Webhook/workflow/plugin error creation methods
impl Error {
    /// Create a webhook failure error
    pub fn webhook_failure<S: Into<String>>(endpoint: S, message: S) -> Self {
        Self::WebhookFailure {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a workflow action error
    pub fn workflow_action<S: Into<String>>(message: S) -> Self {
        Self::WorkflowAction {
            message: message.into(),
        }
    }

    /// Create a plugin load error
    pub fn plugin_load<S: Into<String>>(plugin: S, message: S) -> Self {
        Self::PluginLoad {
            plugin: plugin.into(),
            message: message.into(),
        }
    }

    /// Create a plugin runtime error
    pub fn plugin_runtime<S: Into<String>>(plugin: S, message: S) -> Self {
        Self::PluginRuntime {
            plugin: plugin.into(),
            message: message.into(),
        }
    }
}

// Memory registry error creation methods
impl Error {
    /// Create a memory storage error
    pub fn memory<S: Into<String>>(message: S) -> Self {
        Self::MemoryStorage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a memory storage error with source
    pub fn memory_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::MemoryStorage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Network error creation methods
impl Error {
    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Note: OS-specific and external crate error conversions are excluded for domain purity.
// The infrastructure layer is responsible for these conversions.
