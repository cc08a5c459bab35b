//! Interactive terminal console for an LSM key-value storage service.

use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use lsm_console::{Config, Console};

/// Operator console for an LSM key-value storage service.
#[derive(Parser, Debug)]
#[command(name = "lsm-console")]
#[command(about = "Issue PUT/GET requests, watch store stats, and browse keys")]
struct Args {
    /// Path to the configuration file (optional).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Storage service base URL; overrides the config file.
    #[arg(short, long, env = "LSM_CONSOLE_URL")]
    url: Option<String>,
}

const HELP: &str = "\
commands:
  put <key> <value>   store a pair
  get <key>           look a key up
  stats               refresh the stats panels
  keys                reload the key listing
  filter [text]       set the listing filter (empty clears) and reload
  next / prev         page through the listing
  refresh             alias for keys
  compact             record a client-side COMPACT marker
  recent              show the recent-activity log
  show                render the whole console
  help                this text
  quit                exit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(url) = args.url {
        config.service.url = url;
    }

    tracing::info!(url = %config.service.url, "connecting to storage service");

    let mut console = Console::new(&config);
    console.initial_load().await;

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("{}\n{HELP}\n", console.render()).as_bytes())
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (line, ""),
        };

        let output = match command {
            "put" => {
                let (key, value) = match rest.split_once(char::is_whitespace) {
                    Some((key, value)) => (key, value.trim()),
                    None => (rest, ""),
                };
                console.put(key, value).await;
                render_put(&console)
            }
            "get" => {
                console.get(rest).await;
                render_get(&console)
            }
            "stats" => {
                console.refresh_stats().await;
                render_stats(&console)
            }
            "keys" | "refresh" => {
                console.reload_keys().await;
                render_keys(&console)
            }
            "filter" => {
                console.set_filter_and_load(rest).await;
                render_keys(&console)
            }
            "next" => {
                console.next_page().await;
                render_keys(&console)
            }
            "prev" => {
                console.prev_page().await;
                render_keys(&console)
            }
            "compact" => {
                console.simulate_compaction();
                render_recent(&console)
            }
            "recent" => render_recent(&console),
            "show" => console.render(),
            "help" => HELP.to_string(),
            "quit" | "exit" => break,
            other => format!("unknown command: {other} (try 'help')"),
        };
        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    Ok(())
}

fn render_put(console: &Console) -> String {
    let view = console.view();
    if view.put_status.is_empty() {
        view.put_result.clone()
    } else {
        format!("{}\n{}", view.put_status, view.put_result)
    }
}

fn render_get(console: &Console) -> String {
    let view = console.view();
    if view.get_not_found {
        format!("[!] Key not found\n{}", view.get_result)
    } else {
        view.get_result.clone()
    }
}

fn render_stats(console: &Console) -> String {
    let main = console.stats_main();
    format!(
        "memtable size: {}  SST files: {}",
        main.memtable_size, main.num_sst_files
    )
}

fn render_keys(console: &Console) -> String {
    use lsm_console::ListingView;
    match console.listing().view() {
        ListingView::Pending => "(loading)".to_string(),
        ListingView::Rows { rows, page } => {
            let mut out = format!("page {page}");
            if rows.is_empty() {
                out.push_str("\n(no rows)");
            }
            for row in rows {
                out.push('\n');
                out.push_str(&row.key);
                out.push('\t');
                out.push_str(row.value.as_deref().unwrap_or(""));
            }
            out
        }
        ListingView::Failed(message) => format!("Error: {message}"),
    }
}

fn render_recent(console: &Console) -> String {
    if console.activity().is_empty() {
        return "(none)".to_string();
    }
    console
        .activity()
        .iter_newest_first()
        .map(|entry| format!("- {entry}"))
        .collect::<Vec<_>>()
        .join("\n")
}
