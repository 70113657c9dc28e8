use std::future::Future;
use std::io::Write;

use anyhow::Result;
use cryptobuddy_agents::{is_exit_command, CryptoBuddy, ASSISTANT_NAME, RECOVERY_REPLY};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

pub const RULE_WIDTH: usize = 60;

pub fn separator() -> String {
    "─".repeat(RULE_WIDTH)
}

pub fn write_banner<W: Write>(buddy: &mut CryptoBuddy, output: &mut W) -> Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(output, "{rule}")?;
    writeln!(output, "🤖 CRYPTOBUDDY - Your AI Crypto Advisor")?;
    writeln!(output, "{rule}")?;
    writeln!(output, "{}", buddy.greet())?;
    writeln!(output, "\n{}", separator())?;
    Ok(())
}

/// Runs an interactive session until an exit keyword, end of input or
/// `interrupt` resolves; each of those ends with a farewell. A turn that
/// fails is reported with the recovery line and the session keeps going.
pub async fn run_chat<R, W, F>(
    buddy: &mut CryptoBuddy,
    input: R,
    output: &mut W,
    interrupt: F,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    F: Future<Output = ()>,
{
    write_banner(buddy, output)?;

    let separator = separator();
    let mut lines = input.lines();
    tokio::pin!(interrupt);

    loop {
        write!(output, "\n💬 You: ")?;
        output.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = &mut interrupt => {
                writeln!(output, "\n\n🤖 {ASSISTANT_NAME}: {}", buddy.farewell())?;
                break;
            }
        };

        let message = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                writeln!(output, "\n🤖 {ASSISTANT_NAME}: {}", buddy.farewell())?;
                break;
            }
            Err(err) => {
                warn!(error = %err, "failed reading input");
                writeln!(output, "\n🤖 {ASSISTANT_NAME}: {RECOVERY_REPLY}")?;
                continue;
            }
        };

        let message = message.trim();
        if is_exit_command(message) {
            writeln!(output, "\n🤖 {ASSISTANT_NAME}: {}", buddy.farewell())?;
            break;
        }

        if let Err(err) = write_turn(buddy, message, &separator, output) {
            warn!(error = %err, "failed writing reply");
            writeln!(output, "\n🤖 {ASSISTANT_NAME}: {RECOVERY_REPLY}")?;
        }
    }

    output.flush()?;
    Ok(())
}

fn write_turn<W: Write>(
    buddy: &mut CryptoBuddy,
    message: &str,
    separator: &str,
    output: &mut W,
) -> Result<()> {
    let reply = buddy.handle(message);
    writeln!(output, "\n🤖 {ASSISTANT_NAME}: {}", reply.text)?;
    writeln!(output, "{separator}")?;
    output.flush()?;
    Ok(())
}
