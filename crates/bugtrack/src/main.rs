use anyhow::{bail, Context, Result};
use bugtrack::actions::{bugs, ApiAction};
use bugtrack::client::{ApiError, HttpTransport, Transport, Value};
use bugtrack::{
    configure_store, logger, Action, BoxFuture, Bug, BugSelectors, Middleware, NewBug, Next,
    Settings, Store, StoreApi, StoreError,
};
use clap::{Parser, Subcommand};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Parser, Debug)]
#[command(name = "bugtrack", version, about = "Track bugs against a bug tracker API")]
struct Cli {
    /// API base address, overrides config and environment
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the bug list
    List {
        /// Only bugs that are not resolved
        #[arg(long)]
        unresolved: bool,
        /// Only bugs assigned to this user
        #[arg(long, conflicts_with = "unresolved")]
        user: Option<u64>,
    },
    /// Report a new bug
    Add { description: String },
    /// Mark a bug as resolved
    Resolve { id: u64 },
    /// Assign a bug to a user
    Assign { id: u64, user: u64 },
}

/// Which part of the list the listener renders
#[derive(Debug, Clone, Copy)]
enum View {
    All,
    Unresolved,
    User(u64),
}

impl Command {
    fn view(&self) -> View {
        match self {
            Command::List {
                unresolved: true, ..
            } => View::Unresolved,
            Command::List {
                user: Some(user), ..
            } => View::User(*user),
            _ => View::All,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let mut settings = Settings::load();
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    log::debug!("Settings: {:?}", settings);

    let transport = HttpTransport::new(&settings.base_url, settings.request_timeout())
        .context("Failed to create HTTP client")?;
    let (store, replies) = build_store(settings, Arc::new(transport));

    let subscription = store.subscribe(render_on_change(store.clone(), cli.command.view()));
    let result = run(&store, &replies, cli.command).await;
    subscription.unsubscribe();
    result
}

fn build_store(settings: Settings, transport: Arc<dyn Transport>) -> (Store, LastReply) {
    let store = configure_store(settings, transport);
    let replies = LastReply::default();
    store.add_middleware(replies.clone());
    (store, replies)
}

/// Remembers the outcome of the most recent API call
#[derive(Clone, Default)]
struct LastReply(Arc<Mutex<Option<Result<Value, ApiError>>>>);

impl LastReply {
    fn take(&self) -> Option<Result<Value, ApiError>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    /// The body of the last call, or why there is none
    fn body(&self, what: &str) -> Result<Value> {
        match self.take() {
            Some(Ok(body)) => Ok(body),
            Some(Err(e)) => bail!("Failed to {}: {}", what, e),
            None => bail!("Failed to {}: no reply from the server", what),
        }
    }
}

impl Middleware for LastReply {
    fn handle<'a>(
        &'a self,
        _api: &'a StoreApi,
        action: Action,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let outcome = match &action {
                Action::Api(ApiAction::CallSuccess(body)) => Some(Ok(body.clone())),
                Action::Api(ApiAction::CallFailed(e)) => Some(Err(e.clone())),
                _ => None,
            };
            if let Some(outcome) = outcome {
                *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
            }
            next.run(action).await
        })
    }
}

/// Listener printing the selected view whenever the bug list changes by reference
fn render_on_change(store: Store, view: View) -> impl Fn() + Send + Sync + 'static {
    let selectors = BugSelectors::new();
    let rendered = Mutex::new(None::<Arc<Vec<Bug>>>);
    move || {
        let state = store.state();
        let mut rendered = rendered.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = rendered.as_ref() {
            if Arc::ptr_eq(previous, &state.entities.bugs.list) {
                return;
            }
        }
        *rendered = Some(Arc::clone(&state.entities.bugs.list));

        match view {
            View::All => render(&state.entities.bugs.list),
            View::Unresolved => render(&selectors.unresolved.select(&state)),
            View::User(user) => render(&selectors.by_user.select(&state, &user)),
        }
    }
}

fn render(bugs: &[Bug]) {
    if bugs.is_empty() {
        println!("No bugs.");
        return;
    }
    for bug in bugs {
        let status = if bug.resolved { "x" } else { " " };
        match bug.user_id {
            Some(user) => println!("[{}] #{:<4} {} (user {})", status, bug.id, bug.description, user),
            None => println!("[{}] #{:<4} {}", status, bug.id, bug.description),
        }
    }
    println!();
}

async fn run(store: &Store, replies: &LastReply, command: Command) -> Result<()> {
    store
        .dispatch(bugs::load_bugs())
        .await
        .context("Failed to load bugs")?;
    if store.state().entities.bugs.last_fetch.is_none() {
        bail!("Could not load bugs from {}", store.settings().base_url);
    }
    replies.take();

    match command {
        Command::List { .. } => {}
        Command::Add { description } => {
            store
                .dispatch(bugs::add_bug(NewBug::new(description)))
                .await
                .context("Failed to add bug")?;
            let body = replies.body("add bug")?;
            let id = body
                .get("id")
                .and_then(Value::as_u64)
                .context("The server reply has no bug id")?;
            if store.state().entities.bugs.find(id).is_none() {
                bail!("Bug {} is missing from the list", id);
            }
            log::info!("Added bug #{}", id);
        }
        Command::Resolve { id } => {
            store
                .dispatch(bugs::resolve_bug(id))
                .await
                .context("Failed to resolve bug")?;
            replies.body("resolve bug")?;
            let resolved = store.state().entities.bugs.find(id).is_some_and(|b| b.resolved);
            if !resolved {
                bail!("Bug {} was not resolved", id);
            }
        }
        Command::Assign { id, user } => {
            store
                .dispatch(bugs::assign_bug_to_user(id, user))
                .await
                .context("Failed to assign bug")?;
            replies.body("assign bug")?;
            let assigned = store
                .state()
                .entities
                .bugs
                .find(id)
                .is_some_and(|b| b.user_id == Some(user));
            if !assigned {
                bail!("Bug {} was not assigned to user {}", id, user);
            }
        }
    }
    Ok(())
}
