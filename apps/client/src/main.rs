use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use client::controllers::{gate, Activation, MutationOutcome, ResourceListController, Route, Surface};
use client::entities::{BookingRequest, Event, EventDraft, FieldErrors};
use client::services::{BookingsApi, EventSearch, EventsApi};
use client::{AuthorizedClient, ClientConfig, ClientError, SessionStatus, SessionStore};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

mod telemetry;

/// Token directory used when `EVENTS_TOKEN_DIR` is not set.
const DEFAULT_TOKEN_DIR: &str = ".events-client";

#[derive(Parser, Debug)]
#[command(name = "client", about = "Event booking client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a token issued by the login endpoint
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the stored token
    Logout,
    /// Show what the stored token claims
    Whoami,
    /// List upcoming events
    Events,
    /// Search events
    Search(SearchArgs),
    /// Book seats for an event
    Book {
        event_id: String,
        #[arg(long, default_value_t = 1)]
        seats: u32,
    },
    /// Manage the event catalog
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// List every event
    Events,
    /// Create an event
    Create(DraftArgs),
    /// Edit an event
    Edit {
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete an event
    Delete { id: String },
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long)]
    text: Option<String>,
    /// RFC 3339 instant
    #[arg(long)]
    from: Option<String>,
    /// RFC 3339 instant
    #[arg(long)]
    to: Option<String>,
    #[arg(long)]
    min_seats: Option<u32>,
}

#[derive(Args, Debug)]
struct DraftArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    /// RFC 3339 instant, e.g. 2030-03-15T14:00:00Z
    #[arg(long)]
    date: String,
    #[arg(long)]
    location: String,
    #[arg(long)]
    capacity: u32,
}

enum Exit {
    Ok,
    Failed,
    Redirect(Route),
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        match exit {
            Exit::Ok => ExitCode::SUCCESS,
            Exit::Failed => ExitCode::from(1),
            Exit::Redirect(route) => {
                println!("-> {route}");
                ExitCode::from(2)
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) if config.token_dir.is_none() => config.with_token_dir(DEFAULT_TOKEN_DIR),
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::from(1);
        }
    };
    let session = SessionStore::from_config(&config);
    let client = match AuthorizedClient::with_reqwest(config, session) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::from(1);
        }
    };

    match run(cli.command, client).await {
        Ok(exit) => exit.into(),
        Err(e) => {
            eprintln!("❌ [{}] {e}", e.code());
            ExitCode::from(1)
        }
    }
}

async fn run(command: Command, client: AuthorizedClient) -> Result<Exit, ClientError> {
    let session = client.session().clone();
    match command {
        Command::Login { token } => {
            session.establish(&token)?;
            if session.status() == SessionStatus::Absent {
                println!("Token stored, but it could not be decoded");
            } else {
                println!("Logged in");
            }
            Ok(Exit::Ok)
        }
        Command::Logout => {
            session.invalidate();
            println!("Logged out");
            Ok(Exit::Ok)
        }
        Command::Whoami => {
            whoami(&session);
            Ok(Exit::Ok)
        }
        Command::Events => {
            if let Err(route) = gate(&session, Surface::User) {
                return Ok(Exit::Redirect(route));
            }
            let list = ResourceListController::events(client);
            Ok(show_list(&list).await)
        }
        Command::Search(args) => {
            let search = EventSearch {
                text: args.text,
                start_date: args.from.as_deref().map(parse_instant).transpose()?,
                end_date: args.to.as_deref().map(parse_instant).transpose()?,
                min_seats: args.min_seats,
            };
            match EventsApi::new(client).search_events(&search).await {
                Ok(events) => {
                    print_events(&events);
                    Ok(Exit::Ok)
                }
                Err(e) if e.is_unauthorized() => Ok(Exit::Redirect(Surface::User.unauthorized_route())),
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    Ok(Exit::Failed)
                }
            }
        }
        Command::Book { event_id, seats } => {
            let request = BookingRequest::new(event_id, seats);
            if let Err(errors) = request.validate() {
                print_field_errors(&errors);
                return Ok(Exit::Failed);
            }
            match BookingsApi::new(client).create_booking(&request).await {
                Ok(booking) => {
                    println!("Booked {} seat(s), booking {}", booking.seats, booking.id);
                    Ok(Exit::Ok)
                }
                Err(e) if e.is_unauthorized() => Ok(Exit::Redirect(Surface::User.unauthorized_route())),
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    print_field_errors(&e.field_errors());
                    Ok(Exit::Failed)
                }
            }
        }
        Command::Admin(admin) => run_admin(admin, client).await,
    }
}

async fn run_admin(command: AdminCommand, client: AuthorizedClient) -> Result<Exit, ClientError> {
    if let Err(route) = gate(client.session(), Surface::Admin) {
        return Ok(Exit::Redirect(route));
    }
    let list = ResourceListController::admin_events(client);

    if let AdminCommand::Events = command {
        return Ok(show_list(&list).await);
    }

    // Mutations act on the loaded catalog.
    match list.activate().await {
        Activation::Loaded { .. } => {}
        Activation::Redirect(route) => return Ok(Exit::Redirect(route)),
        Activation::Errored { message } => {
            eprintln!("{message}");
            return Ok(Exit::Failed);
        }
        Activation::Superseded => return Ok(Exit::Failed),
    }

    let outcome = match command {
        AdminCommand::Events => return Ok(Exit::Ok),
        AdminCommand::Create(args) => {
            let draft = args.into_draft()?;
            if let Err(errors) = draft.validate() {
                print_field_errors(&errors);
                return Ok(Exit::Failed);
            }
            list.create(&draft.trimmed()).await
        }
        AdminCommand::Edit { id, draft } => {
            let draft = draft.into_draft()?;
            if let Err(errors) = draft.validate() {
                print_field_errors(&errors);
                return Ok(Exit::Failed);
            }
            list.update(&id, &draft.trimmed()).await
        }
        AdminCommand::Delete { id } => list.delete(&id).await,
    };

    Ok(match outcome {
        MutationOutcome::Applied { message } => {
            println!("{message}");
            print_events(&list.items());
            Exit::Ok
        }
        MutationOutcome::Failed {
            message,
            field_errors,
        } => {
            eprintln!("{message}");
            print_field_errors(&field_errors);
            Exit::Failed
        }
        MutationOutcome::Redirect(route) => Exit::Redirect(route),
    })
}

async fn show_list(list: &ResourceListController<Event>) -> Exit {
    match list.activate().await {
        Activation::Loaded { count: 0 } => {
            println!("No events found.");
            Exit::Ok
        }
        Activation::Loaded { .. } => {
            print_events(&list.items());
            Exit::Ok
        }
        Activation::Errored { message } => {
            eprintln!("{message}");
            Exit::Failed
        }
        Activation::Redirect(route) => Exit::Redirect(route),
        Activation::Superseded => Exit::Failed,
    }
}

fn whoami(session: &SessionStore) {
    let status = session.status();
    println!("status: {status:?}");
    if let Some(claims) = session.claims() {
        if let Some(user_id) = claims.user_id() {
            println!("user: {user_id}");
        }
        if let Some(role) = claims.role() {
            println!("role: {role}");
        }
        if let Some(expires_at) = claims.expires_at() {
            let rendered = expires_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| expires_at.to_string());
            println!("expires: {rendered} (advisory)");
        }
    }
}

fn print_events(events: &[Event]) {
    for event in events {
        let date = event
            .date
            .format(&Rfc3339)
            .unwrap_or_else(|_| event.date.to_string());
        println!(
            "{}\t{}\t{}\t{}\t{}",
            event.id, date, event.title, event.location, event.capacity
        );
    }
}

fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors {
        eprintln!("  {field}: {message}");
    }
}

fn parse_instant(raw: &str) -> Result<OffsetDateTime, ClientError> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|e| ClientError::input(format!("'{raw}' is not an RFC 3339 instant: {e}")))
}

impl DraftArgs {
    fn into_draft(self) -> Result<EventDraft, ClientError> {
        Ok(EventDraft {
            title: self.title,
            description: self.description,
            date: parse_instant(&self.date)?,
            location: self.location,
            capacity: self.capacity,
        })
    }
}
