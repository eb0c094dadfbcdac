use error_stack::{report, ResultExt};
use serde::{de::DeserializeOwned, Serialize};
use sheets_inventory::{
    adapters::drive::{
        file_url::{direct_url, thumbnail_url, DEFAULT_THUMBNAIL_SIZE},
        mime::guess_mime_type,
    },
    application::service::InventoryApplicationService,
    domain::{
        activity::{ActivityAction, ActivityLog},
        asset::{Asset, DeletedAsset, NewAsset},
        reporting::{DashboardStats, FilterOptions},
        user::{User, UserUpdate},
    },
    ports::{
        command_handler::{Command, CommandError, CommandHandler, OutputFormat},
        image_store::ImageUpload,
    },
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, instrument};

const EMAIL_VAR: &str = "INVENTORY_EMAIL";
const PIN_VAR: &str = "INVENTORY_PIN";

const USAGE: &str = "\
usage: inventory [--json] <command>

  login
  dashboard
  filters
  assets list | show <N> | add <file.json> | update <N> <file.json>
         | delete <N> | attach-image <N> <image>
  users list | update <ID> <file.json>
  history activity [ACTION] | deleted
  images delete <url> | thumbnail <url> [size] | direct <url>
  health

Credentials are read from INVENTORY_EMAIL and INVENTORY_PIN.";

pub struct CliAdapter {
    application_service: Arc<InventoryApplicationService>,
    public_base: String,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("application_service", &"<InventoryApplicationService>")
            .field("public_base", &self.public_base)
            .finish()
    }
}

impl CliAdapter {
    pub fn new(application_service: Arc<InventoryApplicationService>, public_base: String) -> Self {
        Self {
            application_service,
            public_base,
        }
    }

    #[instrument(skip(args))]
    pub async fn run(&self, args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
        let (command, format) = parse_args(&args).map_err(|e| format!("{}\n\n{}", e, USAGE))?;

        match self.handle(command, format).await {
            Ok(result) => {
                println!("{}", result);
                Ok(())
            }
            Err(report) => {
                error!("Command failed: {:?}", report);
                Err(format!("Command failed: {}", report.current_context()).into())
            }
        }
    }

    /// Authenticates the caller from the environment. Only `login` itself leaves a
    /// trace in the activity log.
    async fn actor(&self, record_login: bool) -> error_stack::Result<User, CommandError> {
        let email = std::env::var(EMAIL_VAR)
            .map_err(|_| report!(CommandError::invalid(format!("{} is not set", EMAIL_VAR))))?;
        let pin = std::env::var(PIN_VAR)
            .map_err(|_| report!(CommandError::invalid(format!("{} is not set", PIN_VAR))))?;

        let auth = &self.application_service.auth;
        let result = if record_login {
            auth.login(&email, &pin).await
        } else {
            auth.authenticate(&email, &pin).await
        };
        result.change_context_lazy(|| CommandError::failed(format!("Could not sign in as {}", email)))
    }
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, CommandError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| CommandError::invalid(format!("{} required", name)))
}

fn number(args: &[String], index: usize, name: &str) -> Result<u32, CommandError> {
    let value = arg(args, index, name)?;
    value
        .parse()
        .map_err(|_| CommandError::invalid(format!("{} must be a positive number, got '{}'", name, value)))
}

/// Parses `inventory [--json] <command> ...`. `--json` may appear anywhere.
pub fn parse_args(args: &[String]) -> Result<(Command, OutputFormat), CommandError> {
    let format = if args.iter().any(|arg| arg == "--json") {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let args = args
        .iter()
        .skip(1)
        .filter(|arg| *arg != "--json")
        .cloned()
        .collect::<Vec<_>>();

    let word = |index: usize| args.get(index).map(String::as_str);
    let command = match (word(0), word(1)) {
        (Some("login"), _) => Command::Login,
        (Some("dashboard"), _) => Command::Dashboard,
        (Some("filters"), _) => Command::FilterOptions,
        (Some("health"), _) => Command::HealthCheck,

        (Some("assets"), None | Some("list")) => Command::ListAssets,
        (Some("assets"), Some("show")) => Command::ShowAsset {
            numero: number(&args, 2, "Asset number")?,
        },
        (Some("assets"), Some("add")) => Command::AddAsset {
            payload: PathBuf::from(arg(&args, 2, "Asset JSON file")?),
        },
        (Some("assets"), Some("update")) => Command::UpdateAsset {
            numero: number(&args, 2, "Asset number")?,
            payload: PathBuf::from(arg(&args, 3, "Asset JSON file")?),
        },
        (Some("assets"), Some("delete")) => Command::DeleteAsset {
            numero: number(&args, 2, "Asset number")?,
        },
        (Some("assets"), Some("attach-image")) => Command::AttachImage {
            numero: number(&args, 2, "Asset number")?,
            image: PathBuf::from(arg(&args, 3, "Image file")?),
        },

        (Some("users"), None | Some("list")) => Command::ListUsers,
        (Some("users"), Some("update")) => Command::UpdateUser {
            id: number(&args, 2, "User id")?,
            payload: PathBuf::from(arg(&args, 3, "User JSON file")?),
        },

        (Some("history"), None | Some("activity")) => Command::ActivityLog {
            action: word(2).map(str::to_owned),
        },
        (Some("history"), Some("deleted")) => Command::DeletedAssets,

        (Some("images"), Some("delete")) => Command::DeleteImage {
            url: arg(&args, 2, "Image URL")?.to_owned(),
        },
        (Some("images"), Some("thumbnail")) => Command::ThumbnailUrl {
            url: arg(&args, 2, "Image URL")?.to_owned(),
            size: match word(3) {
                Some(_) => number(&args, 3, "Thumbnail size")?,
                None => DEFAULT_THUMBNAIL_SIZE,
            },
        },
        (Some("images"), Some("direct")) => Command::DirectUrl {
            url: arg(&args, 2, "Image URL")?.to_owned(),
        },

        (Some(group), Some(sub)) => {
            return Err(CommandError::invalid(format!("Unknown command '{} {}'", group, sub)))
        }
        (Some(other), None) => return Err(CommandError::invalid(format!("Unknown command '{}'", other))),
        (None, _) => return Err(CommandError::invalid("No command given")),
    };

    Ok((command, format))
}

async fn read_payload<T: DeserializeOwned>(path: &Path) -> error_stack::Result<T, CommandError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .change_context_lazy(|| CommandError::invalid(format!("Cannot read {}", path.display())))?;
    serde_json::from_str(&contents)
        .change_context_lazy(|| CommandError::invalid(format!("{} is not a valid payload", path.display())))
}

async fn read_image(path: &Path) -> error_stack::Result<ImageUpload, CommandError> {
    let bytes = tokio::fs::read(path)
        .await
        .change_context_lazy(|| CommandError::invalid(format!("Cannot read {}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| report!(CommandError::invalid(format!("{} is not a file", path.display()))))?;

    Ok(ImageUpload {
        bytes,
        mime_type: guess_mime_type(&file_name),
        file_name,
    })
}

fn render<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> error_stack::Result<String, CommandError> {
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .change_context(CommandError::failed("Could not serialize output")),
    }
}

fn asset_line(asset: &Asset) -> String {
    format!(
        "#{:<4} {:<12} {:<28} x{:<4} {:<8} {:>12.2}",
        asset.numero,
        asset.code,
        asset.name,
        asset.quantity,
        asset.condition,
        asset.total_value()
    )
}

fn asset_details(asset: &Asset) -> String {
    [
        format!("Número:    {}", asset.numero),
        format!("Código:    {}", asset.code),
        format!("Nombre:    {}", asset.name),
        format!("Marca:     {}", asset.brand),
        format!("Cantidad:  {}", asset.quantity),
        format!("Estado:    {}", asset.condition),
        format!("Dueño:     {}", asset.owner),
        format!("Ingreso:   {}", asset.entry_date),
        format!("Grupo:     {}", asset.group),
        format!("Zona:      {}", asset.zone),
        format!("Notas:     {}", asset.notes),
        format!("Valor:     {:.2}", asset.value),
        format!("Imagen:    {}", asset.image_url),
    ]
    .join("\n")
}

fn assets_text(assets: &[Asset]) -> String {
    if assets.is_empty() {
        return "No assets".to_string();
    }
    assets.iter().map(asset_line).collect::<Vec<_>>().join("\n")
}

fn dashboard_text(stats: &DashboardStats) -> String {
    let mut output = format!(
        "Total: {}  Nuevo: {}  Usado: {}  Dañado: {}\nValor total: {:.2}\n\nIngresos (15 días):\n",
        stats.total_assets,
        stats.new_assets,
        stats.used_assets,
        stats.damaged_assets,
        stats.total_value
    );
    for day in &stats.per_day {
        output.push_str(&format!("  {} {}\n", day.label, "█".repeat(day.count)));
    }
    output.push_str("\nRecientes:\n");
    for asset in &stats.recent {
        output.push_str(&format!("  {}\n", asset_line(asset)));
    }
    output
}

fn filters_text(options: &FilterOptions) -> String {
    format!(
        "Grupos: {}\nZonas: {}\nEstados: {}",
        options.groups.join(", "),
        options.zones.join(", "),
        options.conditions.join(", ")
    )
}

fn user_line(user: &User) -> String {
    format!("{:<3} {:<28} {:<24} {}", user.id, user.email, user.name, user.role)
}

fn users_text(users: &[User]) -> String {
    users.iter().map(user_line).collect::<Vec<_>>().join("\n")
}

fn activity_text(entries: &[ActivityLog]) -> String {
    if entries.is_empty() {
        return "No activity".to_string();
    }
    entries
        .iter()
        .map(|entry| {
            format!(
                "{} {} {:<20} {:<16} {}",
                entry.date,
                entry.time,
                entry.user,
                entry.action.label(),
                entry.detail
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn deleted_text(deleted: &[DeletedAsset]) -> String {
    if deleted.is_empty() {
        return "No deleted assets".to_string();
    }
    deleted
        .iter()
        .map(|entry| format!("{}  {}", entry.deleted_at, asset_line(&entry.asset)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait::async_trait]
impl CommandHandler for CliAdapter {
    #[instrument(skip(self))]
    async fn handle(
        &self,
        command: Command,
        format: OutputFormat,
    ) -> error_stack::Result<String, CommandError> {
        let app = &self.application_service;
        match command {
            Command::Login => {
                let user = self.actor(true).await?;
                info!(user = %user.email, "Signed in");
                render(format, &user, |user| {
                    format!("✅ Signed in as {} ({})", user.display_name(), user.role)
                })
            }
            Command::Dashboard => {
                self.actor(false).await?;
                let today = chrono::Local::now().date_naive();
                let stats = app
                    .reporting
                    .dashboard_stats(today)
                    .await
                    .change_context(CommandError::failed("Failed to compute dashboard"))?;
                render(format, &stats, dashboard_text)
            }
            Command::FilterOptions => {
                self.actor(false).await?;
                let options = app
                    .reporting
                    .filter_options()
                    .await
                    .change_context(CommandError::failed("Failed to load filter options"))?;
                render(format, &options, filters_text)
            }
            Command::ListAssets => {
                self.actor(false).await?;
                let assets = app
                    .inventory
                    .list_assets()
                    .await
                    .change_context(CommandError::failed("Failed to list assets"))?;
                render(format, &assets, |assets| assets_text(assets))
            }
            Command::ShowAsset { numero } => {
                self.actor(false).await?;
                let asset = app
                    .inventory
                    .get_asset(numero)
                    .await
                    .change_context_lazy(|| CommandError::failed(format!("Failed to load asset {}", numero)))?;
                render(format, &asset, asset_details)
            }
            Command::AddAsset { payload } => {
                let actor = self.actor(false).await?;
                let new_asset: NewAsset = read_payload(&payload).await?;
                let asset = app
                    .inventory
                    .create_asset(&actor, new_asset)
                    .await
                    .change_context(CommandError::failed("Failed to create asset"))?;
                render(format, &asset, |asset| format!("✅ Created {}", asset_line(asset)))
            }
            Command::UpdateAsset { numero, payload } => {
                let actor = self.actor(false).await?;
                let details: NewAsset = read_payload(&payload).await?;
                let current = app
                    .inventory
                    .get_asset(numero)
                    .await
                    .change_context_lazy(|| CommandError::failed(format!("Failed to load asset {}", numero)))?;

                let mut asset = details.with_numero(numero);
                if asset.image_url.is_empty() {
                    asset.image_url = current.image_url;
                }
                let asset = app
                    .inventory
                    .update_asset(&actor, asset)
                    .await
                    .change_context_lazy(|| CommandError::failed(format!("Failed to update asset {}", numero)))?;
                render(format, &asset, |asset| format!("✅ Updated {}", asset_line(asset)))
            }
            Command::DeleteAsset { numero } => {
                let actor = self.actor(false).await?;
                let asset = app
                    .inventory
                    .delete_asset(&actor, numero)
                    .await
                    .change_context_lazy(|| CommandError::failed(format!("Failed to delete asset {}", numero)))?;
                render(format, &asset, |asset| format!("🗑️  Deleted {}", asset_line(asset)))
            }
            Command::AttachImage { numero, image } => {
                let actor = self.actor(false).await?;
                let upload = read_image(&image).await?;
                let asset = app
                    .inventory
                    .attach_image(&actor, numero, upload)
                    .await
                    .change_context_lazy(|| {
                        CommandError::failed(format!("Failed to attach image to asset {}", numero))
                    })?;
                render(format, &asset, |asset| {
                    format!("✅ Image attached to #{}: {}", asset.numero, asset.image_url)
                })
            }
            Command::ListUsers => {
                let actor = self.actor(false).await?;
                let users = app
                    .users
                    .list_users(&actor)
                    .await
                    .change_context(CommandError::failed("Failed to list users"))?;
                render(format, &users, |users| users_text(users))
            }
            Command::UpdateUser { id, payload } => {
                let actor = self.actor(false).await?;
                let update: UserUpdate = read_payload(&payload).await?;
                let user = app
                    .users
                    .update_user(&actor, id, update)
                    .await
                    .change_context_lazy(|| CommandError::failed(format!("Failed to update user {}", id)))?;
                render(format, &user, |user| format!("✅ Updated {}", user_line(user)))
            }
            Command::ActivityLog { action } => {
                let actor = self.actor(false).await?;
                let filter = action.as_deref().map(ActivityAction::from);
                let entries = app
                    .history
                    .activity_logs(&actor, filter)
                    .await
                    .change_context(CommandError::failed("Failed to load activity log"))?;
                render(format, &entries, |entries| activity_text(entries))
            }
            Command::DeletedAssets => {
                let actor = self.actor(false).await?;
                let deleted = app
                    .history
                    .deleted_assets(&actor)
                    .await
                    .change_context(CommandError::failed("Failed to load deleted assets"))?;
                render(format, &deleted, |deleted| deleted_text(deleted))
            }
            Command::DeleteImage { url } => {
                let actor = self.actor(false).await?;
                app.inventory
                    .delete_image(&actor, &url)
                    .await
                    .change_context_lazy(|| CommandError::failed(format!("Failed to delete {}", url)))?;
                render(format, &url, |url| format!("🗑️  Deleted {}", url))
            }
            Command::ThumbnailUrl { url, size } => {
                let thumbnail = thumbnail_url(&url, size);
                render(format, &thumbnail, String::clone)
            }
            Command::DirectUrl { url } => {
                let direct = direct_url(&url, &self.public_base);
                render(format, &direct, String::clone)
            }
            Command::HealthCheck => app
                .health_check()
                .await
                .change_context(CommandError::failed("Health check failed")),
        }
    }
}
