use std::{
    error::Error,
    io::{self, BufRead as _, Write as _},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt as _,
    util::SubscriberInitExt as _,
};

use laundry_link::{
    api::{
        ticket::{self, ItemCounts, Status},
        user::{
            Credentials, Gender, Role, StaffRegistration, StudentRegistration,
        },
        Ticket,
    },
    auth,
    dashboard::{BannerKind, Confirm, Outcome},
    session,
    store::{self, RemoteStore},
    view::{self, Section, SortOrder, StatusFilter},
    Config, Dashboard,
};

#[derive(Parser)]
#[command(name = "laundry-link", version, about = "Laundry pickup tracking")]
struct Cli {
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Log requests and state changes to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a student or staff account.
    #[command(subcommand)]
    Register(Register),

    /// Log in and store the session.
    Login {
        role: Role,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the stored session.
    Logout,

    /// List tickets.
    Tickets {
        #[arg(long, default_value = "dashboard")]
        section: Section,
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
    },

    /// Show ticket counts per status.
    Summary,

    /// Request a pickup (students).
    Create {
        #[arg(long, default_value_t = 0)]
        shirts: u32,
        #[arg(long, default_value_t = 0)]
        bottoms: u32,
        #[arg(long, default_value_t = 0)]
        towels: u32,
        #[arg(long, default_value_t = 0)]
        bedsheets: u32,
        #[arg(long, default_value_t = 0)]
        others: u32,
    },

    /// Set the status of a ticket (staff).
    Status { id: u64, status: Status },

    /// Confirm a washed ticket was collected (students).
    PickedUp {
        id: u64,
        #[arg(long)]
        yes: bool,
    },

    /// Report an issue on a ticket; empty text clears it.
    Issue {
        id: u64,
        #[arg(default_value = "")]
        text: String,
    },

    /// Delete one of your tickets (students).
    Delete {
        id: u64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum Register {
    Student {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        bag_number: String,
        #[arg(long)]
        gender: Gender,
    },
    Staff {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(LevelFilter::from_level(level))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = Config::load(&cli.config).await?;
    let storage = session::Storage::new(&config.session.path);

    let command = match cli.command {
        Command::Register(form) => {
            let auth = auth::Client::new(&config.api, &config.registration)?;
            return register(&auth, form).await;
        }
        Command::Login {
            role,
            email,
            password,
        } => {
            let auth = auth::Client::new(&config.api, &config.registration)?;
            let session =
                auth.login(role, &Credentials { email, password }).await?;
            storage.save(&session).await?;
            println!("Logged in as {role}.");
            return Ok(());
        }
        Command::Logout => {
            storage.clear().await?;
            println!("Logged out.");
            return Ok(());
        }
        command => command,
    };

    let session = storage
        .load()
        .await?
        .ok_or("not logged in, run `laundry-link login` first")?;
    let role = session.role;
    let store = store::http::Client::new(&config.api, session)?;
    let mut dashboard = Dashboard::new(store, role, &config.dashboard);
    dashboard.refresh().await?;

    execute(&mut dashboard, command).await?;
    if let Some(banner) = dashboard.banner() {
        if banner.kind == BannerKind::Success {
            println!("{}", banner.text);
        }
    }
    Ok(())
}

async fn register(
    auth: &auth::Client,
    form: Register,
) -> Result<(), Box<dyn Error>> {
    match form {
        Register::Student {
            name,
            email,
            password,
            confirm_password,
            bag_number,
            gender,
        } => {
            let registration = StudentRegistration {
                name,
                email,
                password,
                bag_number,
                gender,
            };
            auth.register_student(&registration, &confirm_password)
                .await?;
        }
        Register::Staff {
            name,
            email,
            password,
            confirm_password,
        } => {
            let registration = StaffRegistration {
                name,
                email,
                password,
            };
            auth.register_staff(&registration, &confirm_password).await?;
        }
    }
    println!("Registration successful! Please login.");
    Ok(())
}

async fn execute<S: RemoteStore>(
    dashboard: &mut Dashboard<S>,
    command: Command,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Tickets {
            section,
            status,
            search,
            sort,
        } => {
            dashboard.selection.section = section;
            dashboard.selection.status = status;
            dashboard.selection.query = search;
            dashboard.selection.sort = sort;
            print_tickets(&dashboard.view(), dashboard.role());
        }
        Command::Summary => {
            let summary = dashboard.summary();
            for status in Status::ALL {
                println!("{:<10} {}", status.label(), summary.count(status));
            }
            println!("{:<10} {}", "TOTAL", summary.total);
        }
        Command::Create {
            shirts,
            bottoms,
            towels,
            bedsheets,
            others,
        } => {
            let items = ItemCounts {
                shirts,
                bottoms,
                towels,
                bedsheets,
                others,
            };
            dashboard.create(items).await?;
        }
        Command::Status { id, status } => {
            dashboard.set_status(ticket::Id::from(id), status).await?;
        }
        Command::PickedUp { id, yes } => {
            let outcome = dashboard
                .confirm_pickup(ticket::Id::from(id), &mut Prompt { yes })
                .await?;
            if outcome == Outcome::Declined {
                println!("Cancelled.");
            }
        }
        Command::Issue { id, text } => {
            dashboard.set_issue(ticket::Id::from(id), &text).await?;
        }
        Command::Delete { id, yes } => {
            let outcome = dashboard
                .delete(ticket::Id::from(id), &mut Prompt { yes })
                .await?;
            if outcome == Outcome::Declined {
                println!("Cancelled.");
            }
        }
        Command::Register(_) | Command::Login { .. } | Command::Logout => {}
    }
    Ok(())
}

fn print_tickets(tickets: &[&Ticket], role: Role) {
    if tickets.is_empty() {
        println!("No laundry tickets found.");
        return;
    }
    for ticket in tickets {
        let owner = match role {
            Role::Staff => ticket.student.name().unwrap_or("N/A"),
            Role::Student => "",
        };
        println!(
            "#{:<5} bag {:<8} {:<10} {:>3} items  {:<10} {} {}",
            ticket.id,
            ticket.bag_number,
            ticket.status.label(),
            ticket.total_items(),
            view::short_date(ticket.pickup_date),
            owner,
            ticket.issue.as_deref().unwrap_or(""),
        );
    }
}

/// Asks on the terminal unless `--yes` was given.
struct Prompt {
    yes: bool,
}

impl Confirm for Prompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.yes {
            return true;
        }
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}
