//! Interactive chatbot REPL for trying the support responder locally.

use tokio::io::{AsyncBufReadExt, BufReader};

use bizreg::chatbot::{ChatRole, ChatSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let role_tag = std::env::var("BIZREG_CHAT_ROLE").unwrap_or_else(|_| "GUEST".to_string());
    let role = ChatRole::from_tag(&role_tag);

    eprintln!("bizreg chat v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Role: {role:?} (set BIZREG_CHAT_ROLE=CLIENT|AGENT|GUEST)");
    eprintln!("   Type a message and press Enter. /quit to exit.\n");

    let mut session = ChatSession::new(role);
    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }

        let reply = session.send(&line).await;
        // The transcript stores rendered HTML; print the plain rendering here.
        let plain = reply
            .text
            .replace("<br/>", "\n")
            .replace("<b>", "")
            .replace("</b>", "");
        println!("\n{plain}\n");
        eprint!("> ");
    }

    Ok(())
}
