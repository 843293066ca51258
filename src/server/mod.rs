//! Preview server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::commands::generate::watched_paths;
use crate::Site;

/// Live reload script injected before `</body>`
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        } else if (msg.data.indexOf('error:') === 0) {
            console.error('hachenotes: ' + msg.data.slice(6));
        }
    };
    ws.onclose = function() {
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    output_dir: PathBuf,
    rebuilds: broadcast::Sender<Rebuild>,
    live_reload: bool,
}

/// Serve the output directory, rebuilding on change when `watch` is set
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool) -> Result<()> {
    let (rebuilds, _) = broadcast::channel::<Rebuild>(16);

    let state = Arc::new(ServerState {
        output_dir: site.output_dir.clone(),
        rebuilds: rebuilds.clone(),
        live_reload: watch,
    });

    let app = Router::new()
        .route("/__livereload", get(livereload_handler))
        .fallback(fallback_handler)
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("Serving {:?} at http://{}:{}", site.output_dir, ip, port);

    if watch {
        let site = site.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(&site, rebuilds) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Outcome of a rebuild, broadcast to every open page
#[derive(Debug, Clone, PartialEq)]
enum Rebuild {
    Done,
    Failed(String),
}

impl Rebuild {
    /// Frame sent to the page: `reload`, or `error:` followed by the cause
    fn frame(&self) -> String {
        match self {
            Rebuild::Done => "reload".to_string(),
            Rebuild::Failed(cause) => format!("error:{}", cause),
        }
    }
}

/// Editor droppings and VCS internals do not trigger a rebuild
fn triggers_rebuild(path: &Path) -> bool {
    let path = path.to_string_lossy();
    !path.contains(".git") && !path.contains(".DS_Store") && !path.ends_with('~')
}

/// Rebuild on change and broadcast the outcome
fn watch_and_reload(site: &Site, rebuilds: broadcast::Sender<Rebuild>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for path in watched_paths(site) {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };
        if !events.iter().any(|e| triggers_rebuild(&e.path)) {
            continue;
        }

        // the configuration may have changed too
        let outcome = match Site::new(&site.base_dir).and_then(|site| site.generate()) {
            Ok(()) => {
                tracing::info!("Regenerated");
                Rebuild::Done
            }
            Err(e) => {
                tracing::error!("Generation failed: {}", e);
                Rebuild::Failed(e.to_string())
            }
        };
        // no receivers just means no open page
        let _ = rebuilds.send(outcome);
    }

    Ok(())
}

async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let rebuilds = state.rebuilds.subscribe();
    ws.on_upgrade(move |socket| forward_rebuilds(socket, rebuilds))
}

/// Push rebuild outcomes to one page until either side goes away
async fn forward_rebuilds(mut socket: WebSocket, mut rebuilds: broadcast::Receiver<Rebuild>) {
    tracing::debug!("Live reload client connected");

    loop {
        let frame = tokio::select! {
            outcome = rebuilds.recv() => match outcome {
                Ok(outcome) => Message::Text(outcome.frame()),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!("Live reload client skipped {} rebuilds", skipped);
                    Message::Text(Rebuild::Done.frame())
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Ping(data))) => Message::Pong(data),
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => continue,
            },
        };

        if socket.send(frame).await.is_err() {
            break;
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serve files, injecting the reload script into HTML pages
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path();
    if path.split('/').any(|segment| segment == "..") {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }
    let candidate = state.output_dir.join(path.trim_start_matches('/'));
    let file_path = if candidate.is_dir() {
        candidate.join("index.html")
    } else {
        candidate
    };

    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        let mut service = ServeDir::new(&state.output_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", LIVE_RELOAD_SCRIPT, 1)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body><p>x</p></body></html>");
        assert!(html.contains("/__livereload"));
        assert!(html.ends_with("</body>\n</html>"));
        assert_eq!(html.matches("</body>").count(), 1);

        let bare = inject_live_reload("<p>x</p>");
        assert!(bare.starts_with("<p>x</p>"));
        assert!(bare.contains("/__livereload"));
    }

    #[test]
    fn test_rebuild_frames() {
        assert_eq!(Rebuild::Done.frame(), "reload");
        assert_eq!(
            Rebuild::Failed("_config.yml: invalid url".to_string()).frame(),
            "error:_config.yml: invalid url"
        );
    }

    #[test]
    fn test_triggers_rebuild() {
        assert!(triggers_rebuild(Path::new("/site/blog/post.md")));
        assert!(triggers_rebuild(Path::new("/site/_config.yml")));
        assert!(!triggers_rebuild(Path::new("/site/.git/index")));
        assert!(!triggers_rebuild(Path::new("/site/blog/.DS_Store")));
        assert!(!triggers_rebuild(Path::new("/site/blog/post.md~")));
    }
}
