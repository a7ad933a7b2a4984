//! Running the learner's program
//!
//! - [`ExecutionGateway`]: the request/response contract (source text in,
//!   output or error out)
//! - [`process`]: a gateway that pipes the source into a local interpreter
//! - [`dispatcher`]: keeps at most one call in flight, cancelling the previous
//!   one whenever a new call is issued
//! - [`output`]: the output view's line buffer
//! - [`source`]: assembling the request text from a worksheet

pub mod dispatcher;
pub mod output;
pub mod process;
pub mod source;

pub use dispatcher::{DispatchUpdate, ExecutionDispatcher};
pub use output::OutputLog;
pub use process::ProcessGateway;
pub use source::{assemble_source, SourceMode};

use std::fmt;
use std::future::Future;
use std::io;
use std::time::Duration;

/// What the executor reported for a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResponse {
    Success { output: String },
    Failure { error: String },
}

impl ExecutionResponse {
    /// Whether this is a successful run whose output lines equal `expected`.
    ///
    /// Trailing whitespace on each line is ignored.
    pub fn matches_expected(&self, expected: &[String]) -> bool {
        match self {
            ExecutionResponse::Success { output } => {
                let lines: Vec<&str> = output.lines().map(str::trim_end).collect();
                lines.len() == expected.len()
                    && lines.iter().zip(expected).all(|(got, want)| *got == want.trim_end())
            }
            ExecutionResponse::Failure { .. } => false,
        }
    }
}

/// The call itself could not be completed.
#[derive(Debug)]
pub enum GatewayError {
    /// No interpreter command configured
    EmptyCommand,

    /// The interpreter process could not be started
    Spawn { program: String, source: io::Error },

    /// Talking to the interpreter failed
    Io(io::Error),

    /// The run took longer than allowed
    Timeout(Duration),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::EmptyCommand => write!(f, "no interpreter command configured"),
            GatewayError::Spawn { program, source } => {
                write!(f, "cannot start '{}': {}", program, source)
            }
            GatewayError::Io(err) => write!(f, "interpreter I/O failed: {}", err),
            GatewayError::Timeout(limit) => {
                write!(f, "run timed out after {} ms", limit.as_millis())
            }
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GatewayError::Spawn { source, .. } => Some(source),
            GatewayError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for GatewayError {
    fn from(err: io::Error) -> Self {
        GatewayError::Io(err)
    }
}

/// Executes assembled source text.
///
/// Implementations must be cancel-safe: the returned future may be dropped at
/// any await point when a newer request supersedes it.
pub trait ExecutionGateway: Send + Sync + 'static {
    fn execute(
        &self,
        source: String,
    ) -> impl Future<Output = Result<ExecutionResponse, GatewayError>> + Send;
}
