use crate::events::AppEvent;
use crate::sys::status::SharedStatus;
use async_channel::Sender;
use stackring::Direction;
use std::str::FromStr;
use strum::EnumString;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

pub const SOCKET_PATH: &str = "/tmp/photostack.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Command {
    Up,
    Down,
    Reset,
    Status,
}

impl Command {
    /// The event to forward to the GUI, if any. `status` is answered here.
    pub fn event(self) -> Option<AppEvent> {
        match self {
            Self::Up => Some(AppEvent::Rotate(Direction::Up)),
            Self::Down => Some(AppEvent::Rotate(Direction::Down)),
            Self::Reset => Some(AppEvent::Reset),
            Self::Status => None,
        }
    }
}

pub async fn run_server(tx: Sender<AppEvent>, status: SharedStatus) {
    // Cleanup old socket if it exists
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", SOCKET_PATH, e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                let status = status.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_client(stream, tx, status).await {
                        log::warn!("Client connection failed: {}", e);
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn handle_client(
    stream: UnixStream,
    tx: Sender<AppEvent>,
    status: SharedStatus,
) -> std::io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Ok(command) = Command::from_str(line) else {
            log::warn!("Ignoring unknown command '{}'", line);
            continue;
        };

        match command.event() {
            Some(event) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            None => {
                let reply = status.read().to_line();
                writer.write_all(reply.as_bytes()).await?;
            }
        }
    }
    Ok(())
}
