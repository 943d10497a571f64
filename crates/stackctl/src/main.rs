use clap::{Parser, Subcommand};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

const SOCKET_PATH: &str = "/tmp/photostack.sock";

#[derive(Parser, Debug)]
#[command(name = "stackctl", version, about = "Drive a running photostack viewer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Socket the viewer listens on
    #[arg(short, long, default_value = SOCKET_PATH)]
    socket: PathBuf,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Bring the next photo from the above arc to the top
    Up,
    /// Move the top photo down and show the next one
    Down,
    /// Restore the initial arrangement
    Reset,
    /// Print the current ring as JSON
    Status,
}

impl Commands {
    fn line(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Reset => "reset",
            Self::Status => "status",
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let reply = send_command(&cli.socket, cli.command)?;
    if let Some(reply) = reply {
        println!("{}", reply);
    }
    Ok(())
}

/// Sends one command. Only `status` waits for a reply.
fn send_command(socket: &Path, command: Commands) -> anyhow::Result<Option<String>> {
    let mut stream = UnixStream::connect(socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to photostack at {}: {}. Is the viewer running?",
            socket.display(),
            e
        )
    })?;
    log::debug!("Sending '{}' to {}", command.line(), socket.display());
    writeln!(stream, "{}", command.line())?;

    if command != Commands::Status {
        return Ok(None);
    }

    let mut reply = String::new();
    BufReader::new(stream).read_line(&mut reply)?;
    if reply.is_empty() {
        anyhow::bail!("photostack closed the connection without answering");
    }
    Ok(Some(reply.trim_end().to_string()))
}
