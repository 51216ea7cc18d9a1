use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use tracing::debug;

pub fn show(text: &str, command: &[String]) -> Result<()> {
    let (program, args) = command
        .split_first()
        .context("pager: command is empty")?;

    debug!(program = program.as_str(), bytes = text.len(), "opening pager");
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("pager: start {program}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(text.as_bytes()) {
            // Quitting the pager before reading everything closes the pipe.
            Err(err) if err.kind() == ErrorKind::BrokenPipe => {}
            result => result.context("pager: write text")?,
        }
    }

    let status = child.wait().context("pager: wait for exit")?;
    if !status.success() {
        bail!("pager: {program} exited with {status}");
    }
    Ok(())
}
