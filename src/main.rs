use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod branding;
mod browser;
mod controller;
mod domain;
mod inputter;
mod model;
mod navigation;
mod record;
mod resource;
mod session;
mod source;
mod ui;

use controller::Controller;
use domain::{DEFAULT_PAGE_SIZE, SVConfig, SVError};
use model::{Model, Status};
use navigation::navigation_tree;
use resource::Resource;
use session::{Session, SessionStore};
use ui::TableUI;

#[derive(Parser)]
#[command(
    name = "schedview",
    version,
    about = "A tui based browser for university scheduling records."
)]
struct Cli {
    /// Where the session (token, user type, position, department) is stored
    #[arg(long, default_value = "~/.schedview/session.json")]
    session: String,

    /// Log file, the terminal belongs to the table view
    #[arg(long, default_value = "~/.schedview/schedview.log")]
    log_file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse the exported collections in DATA_DIR
    Browse {
        #[arg(default_value = ".")]
        data_dir: String,

        /// Rows per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// View to open first, e.g. "rooms" or "audit logs"
        #[arg(long)]
        view: Option<Resource>,
    },
    /// Store a session token and the attributes that pick the navigation and theme
    Login {
        #[arg(long)]
        token: String,
        #[arg(long, default_value = "admin")]
        user_type: String,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        department: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the role, theme and views of the stored session
    Whoami,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Err(e) => {
            error!("Exiting with error: {e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn expand(path: &str) -> Result<PathBuf, SVError> {
    shellexpand::full(path)
        .map(|p| PathBuf::from(p.into_owned()))
        .map_err(|e| SVError::LoadingFailed(format!("cannot expand {path}: {e}")))
}

fn init_tracing(log_file: &Path) -> Result<(), SVError> {
    if let Some(parent) = log_file.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(log_file)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<(), SVError> {
    init_tracing(&expand(&cli.log_file)?)?;
    let store = SessionStore::new(expand(&cli.session)?);

    match cli.command {
        Command::Login {
            token,
            user_type,
            position,
            department,
        } => {
            let session = Session::new(Some(token), Some(user_type), position, department);
            store.save(&session)?;
            println!(
                "Logged in as {} ({})",
                session.role().title(),
                session.branding().display_name
            );
            Ok(())
        }
        Command::Logout => {
            store.clear()?;
            println!("Logged out");
            Ok(())
        }
        Command::Whoami => whoami(&store.load()?),
        Command::Browse {
            data_dir,
            page_size,
            view,
        } => {
            let config = SVConfig::default()
                .with_data_dir(expand(&data_dir)?)
                .with_default_page_size(page_size)
                .with_initial_view(view);
            browse(&config, store.load()?)
        }
    }
}

fn whoami(session: &Session) -> Result<(), SVError> {
    if !session.is_authenticated() {
        return Err(SVError::NotAuthenticated);
    }
    let entry = session.branding();
    println!("Role:       {}", session.role().title());
    println!("User type:  {}", session.user_type().unwrap_or("-"));
    println!("Position:   {}", session.position().unwrap_or("-"));
    println!(
        "Department: {} ({})",
        entry.display_name,
        session.department().unwrap_or("-")
    );
    println!("Accent:     {}", branding::accent_color(entry.code));
    println!("Logo:       {}", branding::logo_path(entry.code));
    println!("Views:");
    for group in navigation_tree(session.role()) {
        let items: Vec<&str> = group.items.iter().map(|r| r.title()).collect();
        println!("  {:<15} {}", group.title, items.join(", "));
    }
    Ok(())
}

fn browse(config: &SVConfig, session: Session) -> Result<(), SVError> {
    info!("Starting schedview on {:?}", config.data_dir);
    let mut model = Model::init(config, session)?;
    let mut ui = TableUI::new(config);
    let controller = Controller::new(config);

    let mut terminal = ratatui::init();
    info!(
        "Browsing as {} with {:?}",
        model.session().role().title(),
        model.session().user_type()
    );
    let result = (|| -> Result<(), SVError> {
        while model.status != Status::QUITTING {
            // Render the current view
            terminal.draw(|f| ui.draw(&model, f))?;

            // Handle events and map to a Message
            if let Some(message) = controller.handle_event(&model)? {
                model.update(Some(message))?;
            };
        }
        Ok(())
    })();
    ratatui::restore();
    info!("Leaving schedview");
    result
}
