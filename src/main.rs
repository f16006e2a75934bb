use anyhow::Context as _;
use dictapad::api::{TemplateClient, TranscriptionClient};
use dictapad::command::{Command, HELP_TEXT};
use dictapad::widget::{TerminalNotifier, Workbench};
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

const DEFAULT_API_BASE: &str = "http://localhost:3001";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let api_base =
        std::env::var("DICTAPAD_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    info!("Using transcription service at {}", api_base);

    let transcriber = TranscriptionClient::new(&api_base);
    let completer = TemplateClient::new(&api_base);
    let mut workbench = Workbench::new(
        Box::new(transcriber),
        Box::new(completer),
        Box::new(TerminalNotifier),
    );

    println!("dictapad, a transcription workspace (type 'help' for commands)");
    println!("{}", workbench.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        let command = match Command::parse(&line) {
            None => continue,
            Some(Err(err)) => {
                println!("{}", err);
                continue;
            }
            Some(Ok(command)) => command,
        };

        match command {
            Command::OpenDialog => {
                workbench.open_dialog();
                println!("{}", workbench.view());
            }
            Command::CloseDialog => {
                workbench.close_dialog();
                println!("{}", workbench.view());
            }
            Command::Pick(path) => match workbench.select_file(&path).await {
                Ok(info) => println!("Selected: {}", info),
                Err(err) => println!("⚠️  {}", err),
            },
            Command::Submit => {
                workbench.transcribe_selected().await;
                println!("{}", workbench.view());
            }
            Command::TogglePanel => {
                workbench.toggle_panel();
                println!("{}", workbench.view());
            }
            Command::Merge => {
                workbench.merge_template().await;
                println!("{}", workbench.view());
            }
            Command::Notes(Some(text)) => workbench.set_notes(&text),
            Command::Notes(None) => {
                let text = read_block(&mut lines).await?;
                workbench.set_notes(&text);
            }
            Command::Template(Some(text)) => workbench.set_template(&text),
            Command::Template(None) => {
                let text = read_block(&mut lines).await?;
                workbench.set_template(&text);
            }
            Command::Show => println!("{}", workbench.view()),
            Command::Status => workbench.report_status().await,
            Command::Help => println!("{}", HELP_TEXT),
            Command::Quit => break,
        }
    }

    info!("Session closed");
    Ok(())
}

/// Collect lines until a lone `.`, for multi-line pane edits.
async fn read_block(lines: &mut Lines<BufReader<Stdin>>) -> anyhow::Result<String> {
    println!("(enter lines, finish with a single '.')");
    let mut collected: Vec<String> = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "." {
            break;
        }
        collected.push(line);
    }
    Ok(collected.join("\n"))
}
