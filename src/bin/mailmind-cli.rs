#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for the MailMind mailbox session (live or demo backend)

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use mailmind_client::{
    AssistantTask, Category, ClientConfig, DemoBackend, Filter, HttpBackend, MailBackend,
    MailboxSession, Message, Tone, Urgency,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mailmind-cli")]
#[command(about = "Mailbox and assistant CLI for the MailMind backend")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Use the in-memory demo backend instead of the live service
    #[arg(long, global = true)]
    demo: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh and list messages
    List {
        /// Show only this category
        #[arg(long)]
        category: Option<String>,

        /// Show only high-urgency messages
        #[arg(long)]
        urgent: bool,

        /// Maximum number of messages to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show per-category totals and the unread count
    Stats,

    /// Delete messages by remote id
    Delete {
        /// Remote ids to delete
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Summarize a message body
    Summarize {
        /// Remote id of the message
        id: String,
    },

    /// Extract action items from a message body
    Actions {
        /// Remote id of the message
        id: String,
    },

    /// Rewrite draft text in a tone
    Rewrite {
        /// Draft text to rewrite
        text: String,

        /// Tone: Professional, Friendly, Concise, or any custom label
        #[arg(long, default_value = "Professional")]
        tone: String,
    },

    /// Draft a reply from a free-form prompt
    Reply {
        /// What the reply should say
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = ClientConfig::from_env()?;

    if args.demo || config.demo_mode {
        let mut session = MailboxSession::new(DemoBackend::new());
        run(&mut session, &args).await
    } else {
        let mut session = MailboxSession::new(HttpBackend::new(&config)?);
        run(&mut session, &args).await
    }
}

async fn run<B: MailBackend>(
    session: &mut MailboxSession<B>,
    args: &Args,
) -> anyhow::Result<()> {
    match &args.command {
        Command::List {
            category,
            urgent,
            limit,
        } => cmd_list(session, args, category.as_deref(), *urgent, *limit).await,
        Command::Stats => cmd_stats(session, args).await,
        Command::Delete { ids } => cmd_delete(session, ids).await,
        Command::Summarize { id } => {
            cmd_assistant_on_message(session, args, id, |body| AssistantTask::Summarize {
                prompt: body,
            })
            .await
        }
        Command::Actions { id } => {
            cmd_assistant_on_message(session, args, id, |body| AssistantTask::ExtractActions {
                prompt: body,
            })
            .await
        }
        Command::Rewrite { text, tone } => {
            let task = AssistantTask::Rewrite {
                text: text.clone(),
                tone: Tone::from(tone.as_str()),
            };
            let reply = session.assistant(&task).await?;
            print_reply(args, &reply)
        }
        Command::Reply { prompt } => {
            let task = AssistantTask::DraftReply {
                prompt: prompt.clone(),
            };
            let reply = session.assistant(&task).await?;
            print_reply(args, &reply)
        }
    }
}

async fn cmd_list<B: MailBackend>(
    session: &mut MailboxSession<B>,
    args: &Args,
    category: Option<&str>,
    urgent: bool,
    limit: usize,
) -> anyhow::Result<()> {
    session.refresh().await.context("refresh failed")?;

    let filter = if urgent {
        Filter::Urgent
    } else if let Some(label) = category {
        Filter::Category(Category::from(label))
    } else {
        Filter::Inbox
    };

    let messages: Vec<&Message> = session.filtered(&filter).into_iter().take(limit).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
    } else {
        print_message_table(&messages);
    }

    Ok(())
}

async fn cmd_stats<B: MailBackend>(
    session: &mut MailboxSession<B>,
    args: &Args,
) -> anyhow::Result<()> {
    session.refresh().await.context("refresh failed")?;

    let mut counts: Vec<(String, usize)> = session
        .category_counts()
        .into_iter()
        .map(|(category, count)| (category.as_str().to_string(), count))
        .collect();
    counts.sort();

    if args.json {
        let map: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(label, count)| (label.clone(), serde_json::json!(count)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (label, count) in &counts {
            println!("{label:<12} {count}");
        }
        println!();
        println!("{} total, {} unread", session.messages().len(), session.unread_count());
    }

    Ok(())
}

async fn cmd_delete<B: MailBackend>(
    session: &mut MailboxSession<B>,
    ids: &[String],
) -> anyhow::Result<()> {
    session.refresh().await.context("refresh failed")?;

    for id in ids {
        session.toggle_select(id.clone());
    }
    let deleted = session.delete_selected().await.context("delete failed")?;

    println!("Deleted {deleted} message(s)");
    Ok(())
}

async fn cmd_assistant_on_message<B: MailBackend>(
    session: &mut MailboxSession<B>,
    args: &Args,
    id: &str,
    make_task: impl FnOnce(String) -> AssistantTask,
) -> anyhow::Result<()> {
    session.refresh().await.context("refresh failed")?;

    let Some(message) = session.messages().iter().find(|m| m.remote_id == id) else {
        bail!("No message with id {id}");
    };
    let task = make_task(message.body.clone());

    let reply = session.assistant(&task).await?;
    print_reply(args, &reply)
}

fn print_reply(args: &Args, reply: &str) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "reply": reply }))?);
    } else {
        println!("{reply}");
    }
    Ok(())
}

fn print_message_table(messages: &[&Message]) {
    if messages.is_empty() {
        println!("No messages found.");
        return;
    }

    let header = format!(
        "{:<10} {:<25} {:<12} {:<6} {}",
        "ID", "From", "Category", "Urg", "Subject"
    );
    println!("{header}");
    println!("{}", "-".repeat(100));

    for message in messages {
        println!(
            "{:<10} {:<25} {:<12} {:<6} {}",
            truncate(&message.remote_id, 10),
            truncate(&message.from_address, 23),
            message.category,
            match message.urgency {
                Urgency::High => "High",
                Urgency::Normal => "-",
            },
            truncate(&message.subject, 40),
        );
    }

    println!("\n{} message(s)", messages.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
