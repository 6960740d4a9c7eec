//! Command execution against the client core.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::NaiveDateTime;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use eventos_client::EventosClient;
use eventos_client::api::models::{EventCreateRequest, EventUpdateRequest};
use eventos_client::config::ClientConfig;
use eventos_client::credentials::FileCredentialStore;
use eventos_client::resource::ImageAsset;
use eventos_client::session::SessionView;

use crate::cli::{Args, Commands, EventCommands};

pub struct CommandExecutor {
    client: EventosClient,
}

impl CommandExecutor {
    /// Wire up the client: config from flags/env, file-backed session
    /// store under the data directory, image cache beside it.
    pub async fn new(args: &Args) -> anyhow::Result<Self> {
        let data_dir = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        debug!(data_dir = %data_dir.display(), "Using data directory");

        let config = match &args.api_base {
            Some(base) => ClientConfig::new(base)?,
            None => ClientConfig::from_env()?,
        }
        .with_image_cache_dir(data_dir.join("images"));

        let store = Arc::new(FileCredentialStore::new(data_dir.join("session")));
        let client = EventosClient::new(config, store)?;

        client.session().initialize().await?;
        Ok(Self { client })
    }

    pub async fn run(&self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Register {
                name,
                email,
                password,
            } => self.register(&name, &email, &password).await,
            Commands::Login {
                email,
                password,
                remember,
            } => self.login(email, &password, remember).await,
            Commands::Logout => self.logout().await,
            Commands::Whoami => self.whoami(),
            Commands::Events(command) => self.events(command).await,
            Commands::Image { reference, out } => self.image(&reference, out).await,
        }
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> anyhow::Result<()> {
        let profile = self.client.session().register(name, email, password).await?;
        println!("Registered administrator {} <{}>", profile.name, profile.email);
        Ok(())
    }

    async fn login(
        &self,
        email: Option<String>,
        password: &str,
        remember: bool,
    ) -> anyhow::Result<()> {
        let email = match email {
            Some(email) => email,
            // Fall back to the remembered email from a previous --remember.
            None => self
                .client
                .session()
                .remembered_email()
                .await?
                .context("no email given and none remembered; pass --email")?,
        };

        let profile = self.client.session().login(&email, password).await?;
        if remember {
            self.client.session().remember_email(&email).await?;
        }

        println!("Signed in as {} <{}>", profile.name, profile.email);
        Ok(())
    }

    async fn logout(&self) -> anyhow::Result<()> {
        self.client.session().logout().await;
        println!("Signed out");
        Ok(())
    }

    fn whoami(&self) -> anyhow::Result<()> {
        match self.client.session().snapshot().view() {
            SessionView::SignedIn(profile) => {
                println!("{} <{}> (id {})", profile.name, profile.email, profile.id);
                Ok(())
            }
            SessionView::SignedOut => bail!("not signed in"),
            SessionView::Pending => bail!("session not initialized"),
        }
    }

    /// The signed-in administrator, or an error telling the user to log in.
    fn require_admin(&self) -> anyhow::Result<eventos_client::credentials::AdminProfile> {
        match self.client.session().snapshot().view() {
            SessionView::SignedIn(profile) => Ok(profile),
            _ => bail!("not signed in; run `eventos login` first"),
        }
    }

    async fn events(&self, command: EventCommands) -> anyhow::Result<()> {
        let admin = self.require_admin()?;

        match command {
            EventCommands::List => {
                let events = self.client.api().list_events(admin.id).await?;
                if events.is_empty() {
                    println!("No events");
                    return Ok(());
                }
                for event in events {
                    println!(
                        "#{:<4} {}  {}  {}  {}",
                        event.id,
                        event.date,
                        event.name,
                        event.location,
                        event.image_ref.as_deref().unwrap_or("-")
                    );
                }
            }
            EventCommands::Create {
                name,
                date,
                location,
                image_url,
                image_file,
            } => {
                let request = EventCreateRequest {
                    name,
                    date: parse_date(&date)?,
                    location,
                    image_url,
                };

                let event = match image_file {
                    Some(path) => {
                        let bytes = tokio::fs::read(&path)
                            .await
                            .with_context(|| format!("reading {}", path.display()))?;
                        let file_name = path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("imagem")
                            .to_owned();
                        self.client
                            .api()
                            .create_event_with_upload(&request, &file_name, bytes)
                            .await?
                    }
                    None => self.client.api().create_event_with_url(&request).await?,
                };
                println!("Created event #{} ({})", event.id, event.name);
            }
            EventCommands::Update { id, date, location } => {
                let update = EventUpdateRequest {
                    date: parse_date(&date)?,
                    location,
                };
                let event = self.client.api().update_event(id, &update).await?;
                println!("Updated event #{} ({})", event.id, event.name);
            }
            EventCommands::Delete { id } => {
                self.client.api().delete_event(id).await?;
                println!("Deleted event #{id}");
            }
        }
        Ok(())
    }

    async fn image(&self, reference: &str, out: PathBuf) -> anyhow::Result<()> {
        self.require_admin()?;

        let cancel = CancellationToken::new();
        match self.client.images().resolve(Some(reference), &cancel).await {
            ImageAsset::Remote(url) => println!("External image: {url}"),
            ImageAsset::Cached(image) => {
                let bytes = image.read().await?;
                tokio::fs::write(&out, &bytes).await?;
                println!("Saved {} bytes to {}", bytes.len(), out.display());
            }
            ImageAsset::Placeholder => bail!("image could not be retrieved"),
        }
        Ok(())
    }
}

fn parse_date(input: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M"))
        .with_context(|| format!("invalid date `{input}`; expected 2026-09-01T19:30:00"))
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir().context("no platform data directory available")?;
    Ok(base.join("eventos"))
}
