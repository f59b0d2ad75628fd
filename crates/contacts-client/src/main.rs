//! `contacts` – command-line front end for the contacts service.

use std::str::FromStr;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use contacts_client::{
    ContactApp, ContactsApi, Field, FileKv, KeyValueStore, ListState, MemoryKv, SubmitOutcome,
    ThemeId, ThemeSettings, DEFAULT_BASE_URL,
};
use contacts_types::Contact;

#[derive(Debug, Parser)]
#[command(name = "contacts", version, about = "List and add contacts")]
struct Cli {
    /// Base URL of the contacts API.
    #[arg(long, env = "CONTACTS_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every contact, newest first.
    List,
    /// Add a contact.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: Option<String>,
    },
    /// Show one contact in full.
    Show { id: String },
    /// Print the current theme, or switch to another.
    Theme { id: Option<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::List => list(connect(&cli.url)?).await,
        Command::Add {
            name,
            email,
            phone,
            message,
        } => {
            let mut app = connect(&cli.url)?;
            app.form.set(Field::Name, name);
            app.form.set(Field::Email, email);
            app.form.set(Field::Phone, phone);
            app.form.set(Field::Message, message.unwrap_or_default());
            add(app).await
        }
        Command::Show { id } => show(connect(&cli.url)?, &id).await,
        Command::Theme { id } => run_theme(id.as_deref()),
    }
}

fn connect(url: &str) -> anyhow::Result<ContactApp> {
    Ok(ContactApp::new(ContactsApi::new(url)?))
}

async fn list(mut app: ContactApp) -> anyhow::Result<()> {
    let contacts = loaded(app.start().await)?;
    if contacts.is_empty() {
        println!("No contacts yet");
    }
    for c in contacts {
        println!("{}  {:<24} {:<28} {}", c.id, c.name, c.email, c.phone);
    }
    Ok(())
}

async fn add(mut app: ContactApp) -> anyhow::Result<()> {
    match app.submit().await {
        SubmitOutcome::Created(contact) => {
            println!("{}", app.form.success_message().unwrap_or("Contact added"));
            print_detail(&contact);
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => {
            for (field, message) in errors {
                eprintln!("{field}: {message}");
            }
            bail!("contact not submitted")
        }
        SubmitOutcome::Failed(message) => bail!(message),
    }
}

async fn show(mut app: ContactApp, id: &str) -> anyhow::Result<()> {
    loaded(app.start().await)?;
    if !app.select(id) {
        bail!("no contact with id {id}");
    }
    if let Some(contact) = app.detail.selected() {
        print_detail(contact);
    }
    Ok(())
}

fn loaded(state: &ListState) -> anyhow::Result<&[Contact]> {
    match state {
        ListState::Loaded(contacts) => Ok(contacts),
        ListState::Failed(message) => bail!("{message}"),
        ListState::Loading => bail!("contact list did not load"),
    }
}

fn print_detail(c: &Contact) {
    println!("id:       {}", c.id);
    println!("name:     {}", c.name);
    println!("email:    {}", c.email);
    println!("phone:    {}", c.phone);
    println!("joined:   {}", c.created_at.format("%b %-d, %Y"));
    if let Some(message) = &c.message {
        println!("message:  {message}");
    }
}

fn run_theme(id: Option<&str>) -> anyhow::Result<()> {
    let _ = match FileKv::default_location() {
        Some(kv) => apply_theme(ThemeSettings::load(kv), id)?,
        None => {
            tracing::warn!("no config directory; theme will not persist");
            apply_theme(ThemeSettings::load(MemoryKv::default()), id)?
        }
    };
    Ok(())
}

fn apply_theme<S: KeyValueStore>(
    mut settings: ThemeSettings<S>,
    id: Option<&str>,
) -> anyhow::Result<ThemeId> {
    if let Some(id) = id {
        let theme = ThemeId::from_str(id).with_context(|| {
            let known: Vec<String> = ThemeId::all().map(|t| t.to_string()).collect();
            format!("unknown theme '{id}' (expected one of: {})", known.join(", "))
        })?;
        settings.change(theme)?;
    }
    let current = settings.current();
    println!("{current} ({})", current.display_name());
    Ok(current)
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            std::env::var("CONTACTS_LOG")
                .unwrap_or_else(|_| "warn".to_owned())
                .parse::<tracing_subscriber::EnvFilter>()
        })
        .unwrap_or_else(|e| {
            eprintln!("WARN: invalid log filter ({e}); falling back to 'warn'");
            tracing_subscriber::EnvFilter::new("warn")
        });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod test {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use clap::CommandFactory;
    use contacts_server::{AppState, Config, ContactStore, SqliteStore};
    use contacts_types::NewContact;
    use tokio::net::TcpListener;

    use super::*;

    async fn serve() -> (SocketAddr, Arc<AppState>) {
        let store = SqliteStore::in_memory().await.unwrap();
        let state = Arc::new(AppState::new(Config::default(), store));
        let app = contacts_server::app(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, state)
    }

    #[test]
    fn parses_every_subcommand() {
        let cli = Cli::try_parse_from(["contacts", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));

        let cli = Cli::try_parse_from([
            "contacts", "add", "--name", "Alex", "--email", "alex@example.com", "--phone", "555",
        ])
        .unwrap();
        match cli.command {
            Command::Add {
                name,
                email,
                phone,
                message,
            } => {
                assert_eq!(name, "Alex");
                assert_eq!(email, "alex@example.com");
                assert_eq!(phone, "555");
                assert_eq!(message, None);
            }
            other => panic!("expected add, got {other:?}"),
        }

        let cli = Cli::try_parse_from(["contacts", "show", "abc"]).unwrap();
        assert!(matches!(cli.command, Command::Show { id } if id == "abc"));

        let cli = Cli::try_parse_from(["contacts", "theme"]).unwrap();
        assert!(matches!(cli.command, Command::Theme { id: None }));
        let cli = Cli::try_parse_from(["contacts", "theme", "ocean"]).unwrap();
        assert!(matches!(cli.command, Command::Theme { id: Some(id) } if id == "ocean"));
    }

    #[test]
    fn add_requires_name_email_and_phone() {
        let err = Cli::try_parse_from(["contacts", "add", "--name", "Alex"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn url_flag_is_global_and_reads_env() {
        let cli =
            Cli::try_parse_from(["contacts", "list", "--url", "http://api.test:9000"]).unwrap();
        assert_eq!(cli.url, "http://api.test:9000");

        let command = Cli::command();
        let url = command
            .get_arguments()
            .find(|a| a.get_id() == "url")
            .unwrap();
        assert_eq!(url.get_env().and_then(|e| e.to_str()), Some("CONTACTS_API_URL"));
        let defaults: Vec<_> = url.get_default_values().iter().map(|v| v.to_str()).collect();
        assert_eq!(defaults, [Some(DEFAULT_BASE_URL)]);
    }

    #[test]
    fn loaded_turns_failure_into_error() {
        let err = loaded(&ListState::Failed("Failed to fetch contacts".to_owned())).unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch contacts");
        assert!(loaded(&ListState::Loading).is_err());
        assert!(loaded(&ListState::Loaded(Vec::new())).unwrap().is_empty());
    }

    #[test]
    fn apply_theme_rejects_unknown_id_and_lists_known_ones() {
        let err =
            apply_theme(ThemeSettings::load(MemoryKv::default()), Some("neon")).unwrap_err();
        let text = format!("{err:#}");
        assert!(text.contains("unknown theme 'neon'"));
        for theme in ThemeId::all() {
            assert!(text.contains(&theme.to_string()));
        }
    }

    #[test]
    fn apply_theme_switches_and_persists() {
        let settings = ThemeSettings::load(MemoryKv::default());
        assert_eq!(apply_theme(settings, None).unwrap(), ThemeId::default());

        let kv = MemoryKv::default();
        let mut settings = ThemeSettings::load(kv);
        settings.change(ThemeId::Light).unwrap();
        let kv = settings.into_store();
        let theme = apply_theme(ThemeSettings::load(kv), Some("ocean")).unwrap();
        assert_eq!(theme, ThemeId::Ocean);
    }

    #[tokio::test]
    async fn show_fails_for_unknown_id() {
        let (addr, state) = serve().await;
        let stored = state
            .store
            .insert(NewContact {
                name: "Alex".to_owned(),
                email: "alex@example.com".to_owned(),
                phone: "555-0100".to_owned(),
                message: None,
            })
            .await
            .unwrap();
        let url = format!("http://{addr}");

        show(connect(&url).unwrap(), &stored.id).await.unwrap();
        let err = show(connect(&url).unwrap(), "missing").await.unwrap_err();
        assert_eq!(err.to_string(), "no contact with id missing");
    }

    #[tokio::test]
    async fn add_with_blank_fields_is_not_submitted() {
        let (addr, state) = serve().await;
        let mut app = connect(&format!("http://{addr}")).unwrap();
        app.form.set(Field::Name, "Alex");
        let err = add(app).await.unwrap_err();
        assert_eq!(err.to_string(), "contact not submitted");
        assert!(state.store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_reports_unreachable_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = list(connect(&format!("http://{addr}")).unwrap()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch contacts");
    }
}
