use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use client::app::{App, StartupError};
use client::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_SESSION_FILE};
use client::net::api::ApiError;
use client::net::types::Item;
use client::pages::dashboard::logout_and_notify;
use client::pages::list::{ListPage, ListUpdate, ViewMode};
use client::router::{Navigation, Page, Route};
use client::util::item_meta::{Category, item_category, item_icon};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("login rejected")]
    LoginRejected,
    #[error("not logged in; run `login` first")]
    NotAuthenticated,
    #[error("failed to load items: {0}")]
    LoadFailed(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mock-api-cli", about = "Client for the mock item API")]
struct Cli {
    #[arg(long, env = "MOCK_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "MOCK_API_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    session_file: PathBuf,

    /// Log debug output to stderr.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the API is up.
    Health,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    /// Navigate to a route through the auth guard and show the result.
    Open { path: String },
    Items(ItemsArgs),
}

#[derive(Args, Debug)]
struct ItemsArgs {
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    category: Option<Category>,

    #[arg(long, default_value = "grid")]
    view: ViewMode,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    let config = ClientConfig { base_url: cli.base_url, session_file: cli.session_file };
    let mut app = App::from_config(&config)?;

    let result = match cli.command {
        Command::Health => run_health(&app).await,
        Command::Login { email, password } => run_login(&app, email, password).await,
        Command::Logout => {
            logout_and_notify(app.auth(), app.notifier());
            Ok(())
        }
        Command::Whoami => {
            run_whoami(&app);
            Ok(())
        }
        Command::Open { path } => run_open(&app, &path).await,
        Command::Items(args) => run_items(&app, args).await,
    };

    for notification in app.drain_notifications() {
        eprintln!("[{}] {}", notification.action, notification.message);
    }
    result
}

async fn run_health(app: &App) -> Result<(), CliError> {
    let health = app.health().await?;
    print_json(&serde_json::to_value(&health)?)
}

async fn run_login(app: &App, email: String, password: String) -> Result<(), CliError> {
    let Page::Login(mut page) = app.navigate_to(Route::Login).page else {
        return Err(CliError::NotAuthenticated);
    };
    page.email = email;
    page.password = password;
    match page.submit().await {
        Some(route) => {
            run_whoami(app);
            println!("-> {route}");
            Ok(())
        }
        None => Err(CliError::LoginRejected),
    }
}

fn run_whoami(app: &App) {
    match app.auth().get_user() {
        Some(user) => println!("{}", user.email),
        None if app.auth().is_authenticated() => println!("(authenticated, unknown user)"),
        None => println!("not logged in"),
    }
}

async fn run_open(app: &App, path: &str) -> Result<(), CliError> {
    let nav = app.navigate(path);
    println!("{}", describe_navigation(&nav));
    match nav.page {
        Page::Login(_) => println!("login form: email, password"),
        Page::Dashboard(page) => println!("{}", page.greeting()),
        Page::List(mut page) => {
            let settled = page.wait_until_loaded().await;
            if let Some(error) = settled.error {
                return Err(CliError::LoadFailed(error));
            }
            print!("{}", render_items(page.filtered_items(), page.view_mode()));
        }
    }
    Ok(())
}

async fn run_items(app: &App, args: ItemsArgs) -> Result<(), CliError> {
    let nav = app.navigate_to(Route::List);
    let Page::List(mut page) = nav.page else {
        return Err(CliError::NotAuthenticated);
    };

    let settled = page.wait_until_loaded().await;
    if let Some(error) = settled.error {
        return Err(CliError::LoadFailed(error));
    }
    apply_filters(&mut page, &args).await;
    print!("{}", render_items(page.filtered_items(), page.view_mode()));
    Ok(())
}

async fn apply_filters(page: &mut ListPage, args: &ItemsArgs) {
    page.set_view_mode(args.view);
    if let Some(category) = args.category {
        page.filter_by_category(category);
    }
    if let Some(search) = &args.search {
        page.on_search_change(search.clone());
        while let Some(update) = page.next_update().await {
            if matches!(update, ListUpdate::Searched(_)) {
                break;
            }
        }
    }
}

fn describe_navigation(nav: &Navigation) -> String {
    if nav.redirected {
        format!("{} -> {} (redirected)", display_path(&nav.requested), nav.route)
    } else {
        nav.route.to_string()
    }
}

fn display_path(path: &str) -> String {
    format!("/{}", path.trim().trim_matches('/'))
}

fn render_items(items: &[Item], view: ViewMode) -> String {
    if items.is_empty() {
        return "no items match\n".to_owned();
    }
    let mut out = String::new();
    for item in items {
        let line = match view {
            ViewMode::Grid => format!("[{}] {} ({})\n", item_icon(&item.name), item.name, item_category(&item.name)),
            ViewMode::List => format!(
                "{:>3}  {:<12} {:<10} {}\n",
                item.id,
                item.name,
                item_category(&item.name).as_str(),
                item.description
            ),
        };
        out.push_str(&line);
    }
    out
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
