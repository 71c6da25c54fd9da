//! # Process Invocation Module / 进程调用模块
//!
//! Spawns the external runner with an explicit working directory and
//! environment, and captures its exit code and output.
//!
//! 使用显式的工作目录和环境变量派生外部运行器，并捕获其退出码和输出。

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::core::error::HarnessError;
use crate::core::models::Invocation;

/// Output captured from a finished child process.
/// 从已结束的子进程捕获的输出。
#[derive(Debug)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Spawns a command and captures its stdout and stderr.
/// The two streams are drained concurrently so a chatty child cannot block
/// on a full pipe while we wait for it to exit.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
/// * `program` - The program name, used to label errors.
///
/// # Returns
/// The exit status with both streams. Failing to start the process and
/// losing track of it afterwards are reported as different errors.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 两个输出流被并发读取，避免子进程因管道写满而阻塞。
pub async fn spawn_and_capture(
    mut cmd: Command,
    program: &str,
) -> Result<CapturedOutput, HarnessError> {
    let working_dir_exists = cmd
        .as_std()
        .get_current_dir()
        .is_none_or(|dir| dir.is_dir());

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| spawn_error(program, working_dir_exists, source))?;

    let wait_error = |source: io::Error| HarnessError::Wait {
        program: program.to_string(),
        source,
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| wait_error(io::Error::other("failed to capture stdout")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| wait_error(io::Error::other("failed to capture stderr")))?;

    let stdout_handle = tokio::spawn(read_to_eof(stdout));
    let stderr_handle = tokio::spawn(read_to_eof(stderr));

    // Wait for the process to exit.
    // 等待进程退出。
    let status = child.wait().await.map_err(wait_error)?;

    // Make sure everything written before exit has been collected.
    // 确保退出前写入的所有内容都已收集。
    let stdout = stdout_handle
        .await
        .map_err(|e| wait_error(io::Error::other(e)))?
        .map_err(wait_error)?;
    let stderr = stderr_handle
        .await
        .map_err(|e| wait_error(io::Error::other(e)))?
        .map_err(wait_error)?;

    Ok(CapturedOutput {
        status,
        stdout,
        stderr,
    })
}

fn spawn_error(program: &str, working_dir_exists: bool, source: io::Error) -> HarnessError {
    let program = program.to_string();
    // A missing working directory also surfaces as NotFound; keep the OS error then.
    if source.kind() == io::ErrorKind::NotFound && working_dir_exists {
        HarnessError::BinaryNotFound { program }
    } else {
        HarnessError::Spawn { program, source }
    }
}

/// Drains a pipe to EOF. Bytes that are not valid UTF-8 are replaced, never
/// a reason to stop reading: a closed pipe would kill the child with SIGPIPE.
async fn read_to_eof<R: AsyncRead + Unpin>(mut stream: R) -> io::Result<String> {
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Runs `program` with `args` inside `working_dir` and returns its exit code.
///
/// `env` is layered on top of the inherited environment. The child is killed
/// if the returned future is dropped, which is how the suite deadline stops it.
///
/// A missing binary, a refused spawn and a signal-terminated process are
/// reported as distinct [`HarnessError`]s, never as an exit code.
///
/// 在 `working_dir` 中使用 `args` 运行 `program` 并返回其退出码。
/// 缺失的二进制文件、被拒绝的派生以及被信号终止的进程都会报告为不同的错误，
/// 而不会被当作退出码。
pub async fn invoke(
    program: &str,
    args: &[String],
    working_dir: &Path,
    env: &BTreeMap<String, String>,
) -> Result<Invocation, HarnessError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .envs(env)
        .current_dir(working_dir)
        .kill_on_drop(true);

    let start_time = Instant::now();
    let captured = spawn_and_capture(cmd, program).await?;
    let duration = start_time.elapsed();

    let exit_code = captured.status.code().ok_or_else(|| HarnessError::Terminated {
        program: program.to_string(),
    })?;

    Ok(Invocation {
        exit_code,
        stdout: captured.stdout,
        stderr: captured.stderr,
        duration,
    })
}

/// Renders a program and its arguments the way a POSIX shell would accept them.
/// 以 POSIX shell 可接受的形式渲染程序及其参数。
pub fn render_command_line(program: &str, args: &[String]) -> String {
    let words = std::iter::once(program).chain(args.iter().map(String::as_str));
    shlex::try_join(words).unwrap_or_else(|_| {
        // Only fails on interior NUL bytes; fall back to a plain join.
        std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    })
}
