/*!
 * Console exit reader
 *
 * Prompts for the literal command `exit` and raises the shutdown signal when
 * it arrives. Anything else is answered with "invalid input".
 */

use linkwatch_core_signals::ShutdownSignal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::Result;

pub const PROMPT: &str = "Type exit to exit.";
pub const EXIT_COMMAND: &str = "exit";

/// How the exit reader stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user typed `exit`
    Command,
    /// Input was closed
    EndOfInput,
    /// Shutdown was raised elsewhere
    Shutdown,
}

/// Read commands from `input` until `exit`, end of input or shutdown.
///
/// Both `exit` and end of input raise `shutdown`: a closed console can never
/// type the command.
pub async fn run_exit_reader<R, W>(
    input: R,
    mut output: W,
    shutdown: &ShutdownSignal,
) -> Result<ExitReason>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = shutdown.requested() => return Ok(ExitReason::Shutdown),
        };

        match line {
            Some(line) if line.trim_end_matches('\r') == EXIT_COMMAND => {
                debug!("user requested exit");
                shutdown.request();
                return Ok(ExitReason::Command);
            }
            Some(_) => {
                output.write_all(b"invalid input\n").await?;
            }
            None => {
                debug!("console input closed");
                shutdown.request();
                return Ok(ExitReason::EndOfInput);
            }
        }
    }
}
