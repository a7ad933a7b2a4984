//! Gateway backed by a local interpreter process
//!
//! The source is written to the child's stdin (e.g. `python3 -`). The child
//! is spawned with `kill_on_drop`, so aborting the request also kills the
//! process.

use super::{ExecutionGateway, ExecutionResponse, GatewayError};
use std::future::Future;
use std::io;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct ProcessGateway {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessGateway {
    /// `command` is the interpreter argv; its first element is the program.
    pub fn new(command: &[String], timeout: Duration) -> Result<Self, GatewayError> {
        let (program, args) = command.split_first().ok_or(GatewayError::EmptyCommand)?;
        Ok(ProcessGateway {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ExecutionGateway for ProcessGateway {
    fn execute(
        &self,
        source: String,
    ) -> impl Future<Output = Result<ExecutionResponse, GatewayError>> + Send {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        let program = self.program.clone();
        let timeout = self.timeout;

        async move {
            let mut child = command
                .spawn()
                .map_err(|source| GatewayError::Spawn { program, source })?;

            let stdin = child.stdin.take();
            let run = async move {
                if let Some(mut stdin) = stdin {
                    match stdin.write_all(source.as_bytes()).await {
                        // The child may exit without reading all of its input.
                        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
                        _ => {}
                    }
                    // Dropping stdin closes the pipe so the interpreter sees EOF.
                }
                child.wait_with_output().await
            };

            let output = tokio::time::timeout(timeout, run)
                .await
                .map_err(|_| GatewayError::Timeout(timeout))??;

            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            if output.status.success() {
                Ok(ExecutionResponse::Success { output: stdout })
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                let error = if stderr.trim().is_empty() {
                    format!("{}exited with {}", stdout, output.status)
                } else {
                    stderr
                };
                Ok(ExecutionResponse::Failure { error })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_is_rejected() {
        let err = ProcessGateway::new(&[], Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, GatewayError::EmptyCommand));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_program_from_stdin() {
        let gateway =
            ProcessGateway::new(&["sh".to_string()], Duration::from_secs(5)).unwrap();
        let response = gateway.execute("echo hi\n".to_string()).await.unwrap();
        assert_eq!(
            response,
            ExecutionResponse::Success {
                output: "hi\n".to_string()
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_reports_stderr() {
        let gateway =
            ProcessGateway::new(&["sh".to_string()], Duration::from_secs(5)).unwrap();
        let response = gateway
            .execute("echo oops >&2\nexit 3\n".to_string())
            .await
            .unwrap();
        assert_eq!(
            response,
            ExecutionResponse::Failure {
                error: "oops\n".to_string()
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_child_ignoring_stdin_still_reports_output() {
        let command = ["sh", "-c", "echo done"].map(String::from);
        let gateway = ProcessGateway::new(&command, Duration::from_secs(5)).unwrap();
        let response = gateway.execute("x".repeat(1 << 20)).await.unwrap();
        assert_eq!(
            response,
            ExecutionResponse::Success {
                output: "done\n".to_string()
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stalled_stdin_write_times_out() {
        let command = ["sh", "-c", "sleep 5"].map(String::from);
        let gateway = ProcessGateway::new(&command, Duration::from_millis(200)).unwrap();
        let err = gateway.execute("x".repeat(1 << 20)).await.unwrap_err();
        assert!(matches!(err, GatewayError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_missing_program_is_transport_error() {
        let gateway = ProcessGateway::new(
            &["codesheet-no-such-interpreter".to_string()],
            Duration::from_secs(1),
        )
        .unwrap();
        let err = gateway.execute(String::new()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Spawn { .. }));
    }
}
