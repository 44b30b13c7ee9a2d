//! Whiteboard command-line client.
//!
//! Four ways to stand on the wire: `listen` prints every relayed event,
//! `stroke` drives a real [`Session`] through one pointer trace, `tool`
//! broadcasts a toolbar change, and `mirror` maintains a full session —
//! applying every relayed event the way a canvas client would — and can
//! write the resulting raster to a PNG on exit.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use cli::session::Session;
use futures_util::{SinkExt, StreamExt};
use strokes::{ColorToken, Event, ShapeKind, decode_event, encode_event};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{info, warn};

type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket send failed: {0}")]
    WsSend(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("unknown shape `{0}` (expected rectangle, circle, triangle, or heart)")]
    UnknownShape(String),
    #[error("invalid point `{0}` (expected `x,y`)")]
    InvalidPoint(String),
    #[error("snapshot encode failed: {0}")]
    Snapshot(#[from] canvas::snapshot::SnapshotError),
    #[error("writing image failed: {0}")]
    Io(#[from] std::io::Error),
}

/// An `x,y` coordinate pair argument.
#[derive(Debug, Clone, Copy)]
struct PointArg {
    x: f64,
    y: f64,
}

impl FromStr for PointArg {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((x, y)) = s.split_once(',') else {
            return Err(CliError::InvalidPoint(s.to_owned()));
        };
        let Ok(x) = x.trim().parse() else {
            return Err(CliError::InvalidPoint(s.to_owned()));
        };
        let Ok(y) = y.trim().parse() else {
            return Err(CliError::InvalidPoint(s.to_owned()));
        };
        Ok(Self { x, y })
    }
}

#[derive(Parser, Debug)]
#[command(name = "whiteboard-cli", about = "Whiteboard relay client")]
struct Cli {
    /// Relay hub websocket URL.
    #[arg(long, env = "BOARD_SERVER_URL", default_value = "ws://127.0.0.1:3000/ws")]
    server_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every event relayed by the hub.
    Listen,
    /// Emit one stroke through a real client session.
    Stroke {
        /// Stroke start as `x,y`.
        #[arg(long)]
        from: PointArg,
        /// Stroke end as `x,y`.
        #[arg(long)]
        to: PointArg,
        #[arg(long, default_value = "blue")]
        color: String,
        #[arg(long, default_value_t = 3.0)]
        width: f64,
        /// Draw a shape (rectangle, circle, triangle, heart) instead of
        /// freehand ink.
        #[arg(long)]
        shape: Option<String>,
        /// Freehand interpolation steps between the endpoints.
        #[arg(long, default_value_t = 12)]
        segments: u32,
    },
    /// Broadcast a toolbar change so every client's toolbar follows.
    Tool {
        #[command(subcommand)]
        tool: ToolCommand,
    },
    /// Maintain a full client session and optionally write the final canvas
    /// as a PNG.
    Mirror {
        #[arg(long, default_value_t = canvas::consts::DEFAULT_VIEWPORT_WIDTH)]
        width: u32,
        #[arg(long, default_value_t = canvas::consts::DEFAULT_VIEWPORT_HEIGHT)]
        height: u32,
        /// Output PNG path.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Stop after this many seconds (default: run until the hub closes).
        #[arg(long)]
        duration_secs: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
enum ToolCommand {
    /// Activate the pencil everywhere.
    Pencil,
    /// Activate the eraser everywhere, optionally syncing its width.
    Eraser {
        #[arg(long)]
        width: Option<f64>,
    },
    /// Open the shared shape picker with the given kind.
    Shape { kind: String },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Listen => listen(&cli.server_url).await,
        Command::Stroke { from, to, color, width, shape, segments } => {
            stroke(&cli.server_url, from, to, &color, width, shape.as_deref(), segments).await
        }
        Command::Tool { tool } => tool_change(&cli.server_url, &tool).await,
        Command::Mirror { width, height, out, duration_secs } => {
            mirror(&cli.server_url, width, height, out, duration_secs).await
        }
    }
}

async fn connect(url: &str) -> Result<Socket, CliError> {
    let (socket, _) = connect_async(url)
        .await
        .map_err(|e| CliError::WsConnect(Box::new(e)))?;
    Ok(socket)
}

async fn send_events(socket: &mut Socket, events: &[Event]) -> Result<(), CliError> {
    for event in events {
        socket
            .send(Message::Text(encode_event(event).into()))
            .await
            .map_err(|e| CliError::WsSend(Box::new(e)))?;
    }
    Ok(())
}

async fn close_quietly(mut socket: Socket) {
    if let Err(e) = socket.close(None).await {
        warn!(error = %e, "close handshake failed");
    }
}

async fn listen(url: &str) -> Result<(), CliError> {
    let mut socket = connect(url).await?;
    info!(%url, "listening");

    while let Some(msg) = socket.next().await {
        let Ok(msg) = msg else { break };
        match msg {
            Message::Text(text) => match decode_event(text.as_str()) {
                Ok(event) => println!("{:<16} {text}", event.name()),
                Err(e) => warn!(error = %e, "ignoring malformed frame"),
            },
            Message::Close(_) => break,
            _ => {}
        }
    }
    Ok(())
}

/// Drive a session through one pointer trace and emit what it produces.
async fn stroke(
    url: &str,
    from: PointArg,
    to: PointArg,
    color: &str,
    width: f64,
    shape: Option<&str>,
    segments: u32,
) -> Result<(), CliError> {
    let shape = match shape {
        Some(name) => parse_shape(name)?,
        None => ShapeKind::None,
    };

    let mut session = Session::default();
    session.set_pen_color(ColorToken::from(color));
    session.set_pen_width(width);

    let mut events = Vec::new();
    if shape.is_shape() {
        // Put every client's picker into shape mode for the duration. The
        // session applies its own toggle immediately rather than waiting for
        // the echo, so the pointer trace below previews the shape.
        let open = session.toggle_shape_picker(shape);
        session.apply(&open);
        events.push(open);
    }

    events.push(session.pointer_down(from.x, from.y));
    if shape.is_shape() {
        // Shape previews only care about the final pointer position.
        events.extend(session.pointer_move(to.x, to.y));
    } else {
        for i in 1..=segments.max(1) {
            let t = f64::from(i) / f64::from(segments.max(1));
            let x = from.x + (to.x - from.x) * t;
            let y = from.y + (to.y - from.y) * t;
            events.extend(session.pointer_move(x, y));
        }
    }
    session.pointer_up();

    if shape.is_shape() {
        let close = session.toggle_shape_picker(ShapeKind::None);
        session.apply(&close);
        events.push(close);
    }

    let mut socket = connect(url).await?;
    send_events(&mut socket, &events).await?;
    info!(count = events.len(), "stroke emitted");
    close_quietly(socket).await;
    Ok(())
}

async fn tool_change(url: &str, tool: &ToolCommand) -> Result<(), CliError> {
    let session = Session::default();
    let events = match tool {
        ToolCommand::Pencil => vec![session.select_pencil()],
        ToolCommand::Eraser { width } => {
            let mut events = vec![session.select_eraser()];
            if let Some(width) = width {
                events.push(session.set_eraser_width(*width));
            }
            events
        }
        ToolCommand::Shape { kind } => {
            let kind = parse_shape(kind)?;
            vec![session.toggle_shape_picker(kind), session.pick_shape(kind)]
        }
    };

    let mut socket = connect(url).await?;
    send_events(&mut socket, &events).await?;
    info!(count = events.len(), "tool change emitted");
    close_quietly(socket).await;
    Ok(())
}

async fn mirror(
    url: &str,
    width: u32,
    height: u32,
    out: Option<PathBuf>,
    duration_secs: Option<u64>,
) -> Result<(), CliError> {
    let mut session = Session::new(width, height);
    let mut socket = connect(url).await?;
    info!(%url, width, height, "mirroring");

    let drain = async {
        while let Some(msg) = socket.next().await {
            let Ok(msg) = msg else { break };
            match msg {
                Message::Text(text) => match decode_event(text.as_str()) {
                    Ok(event) => session.apply(&event),
                    Err(e) => warn!(error = %e, "ignoring malformed frame"),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    };

    match duration_secs {
        Some(secs) => {
            let window = tokio::time::Duration::from_secs(secs);
            if tokio::time::timeout(window, drain).await.is_err() {
                info!(secs, "mirror window elapsed");
            }
        }
        None => drain.await,
    }

    if let Some(path) = out {
        let png = canvas::snapshot::encode_png(session.machine().raster())?;
        std::fs::write(&path, png)?;
        info!(path = %path.display(), "wrote canvas image");
    }
    Ok(())
}

fn parse_shape(name: &str) -> Result<ShapeKind, CliError> {
    match name.to_ascii_lowercase().as_str() {
        "rectangle" => Ok(ShapeKind::Rectangle),
        "circle" => Ok(ShapeKind::Circle),
        "triangle" => Ok(ShapeKind::Triangle),
        "heart" => Ok(ShapeKind::Heart),
        "" | "none" => Ok(ShapeKind::None),
        other => Err(CliError::UnknownShape(other.to_owned())),
    }
}
