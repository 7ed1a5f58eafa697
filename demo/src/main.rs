//! warden — authorization engine demo CLI
//!
//! Walks through three scenarios, each wiring real warden components (the
//! in-memory store, the access manager, gates) around a small cast of
//! callers and roles.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- blog
//!   cargo run -p demo -- newsroom
//!   cargo run -p demo -- conditions

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use warden_contracts::{condition::from_fn, error::WardenResult, scope::Scope};
use warden_core::AccessManager;
use warden_store::MemoryStore;

// ── CLI definition ────────────────────────────────────────────────────────────

/// warden — in-process authorization engine demo.
///
/// Each subcommand runs one or all of the scenarios, demonstrating
/// specificity precedence, role fallback, aliases, and conditions.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "warden authorization engine demo",
    long_about = "Runs warden demo scenarios showing resource-scoped permissions,\n\
                  wildcard actions, role inheritance, aliases, and runtime conditions."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: Blog permissions (scoping, wildcard, instance override).
    Blog,
    /// Scenario 2: Newsroom roles (assignment, inheritance, own-record override).
    Newsroom,
    /// Scenario 3: Conditional permissions (runtime predicates).
    Conditions,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Structured logging; set RUST_LOG=debug to watch resolution decisions.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::Blog => run_blog(),
        Command::Newsroom => run_newsroom(),
        Command::Conditions => run_conditions(),
    };

    match result {
        Ok(()) => println!("\nAll selected scenarios completed."),
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all() -> WardenResult<()> {
    run_blog()?;
    run_newsroom()?;
    run_conditions()
}

// ── Scenario 1: blog ──────────────────────────────────────────────────────────

/// Resource scoping, the wildcard action, and an instance-level override of
/// a type-level deny.
fn run_blog() -> WardenResult<()> {
    println!("\n=== Scenario 1: Blog permissions ===");

    let manager = AccessManager::new(Arc::new(MemoryStore::new()));
    let alice = manager.caller("user", "alice");

    // Alice owns the posts section outright.
    alice.allow(&["all"], Scope::of("posts"))?;
    // Comments are moderated: she may not update them in general, except
    // the one pinned comment she authored.
    alice.deny(&["update"], Scope::of("comments"))?;
    alice.allow(&["update"], Scope::item("comments", "17"))?;

    report(alice.can(&["create"], Scope::of("posts"))?, "alice creates a post");
    report(alice.can(&["delete"], Scope::item("posts", "3"))?, "alice deletes post 3");
    report(alice.can(&["update"], Scope::of("comments"))?, "alice updates comments at large");
    report(alice.can(&["update"], Scope::item("comments", "17"))?, "alice updates comment 17");
    report(alice.can(&["create"], Scope::of("events"))?, "alice creates an event");

    Ok(())
}

// ── Scenario 2: newsroom ──────────────────────────────────────────────────────

/// Role assignment and inheritance: a staff role inherits from editor and
/// admin, and an explicit caller-level deny overrides what the roles grant.
fn run_newsroom() -> WardenResult<()> {
    println!("\n=== Scenario 2: Newsroom roles ===");

    let manager = AccessManager::new(Arc::new(MemoryStore::new()));

    // staff inherits editor and admin.
    manager.role("staff").set_role(&["editor", "admin"])?;
    manager.role("staff").allow(&["create"], Scope::of("pages"))?;
    manager.role("editor").allow(&["publish"], Scope::of("pages"))?;
    manager.role("admin").allow(&["publish", "delete"], Scope::of("pages"))?;

    let bob = manager.caller("user", "bob");
    bob.set_role(&["staff"])?;

    report(bob.can(&["create", "publish"], Scope::of("pages"))?, "bob creates and publishes");
    report(bob.can(&["delete"], Scope::of("pages"))?, "bob deletes a page (via admin)");

    // An incident: bob loses publishing rights, whatever his roles say.
    bob.deny(&["publish"], Scope::Any)?;
    report(bob.can(&["publish"], Scope::of("pages"))?, "bob publishes after the deny");
    report(bob.can(&["create"], Scope::of("pages"))?, "bob still creates");

    Ok(())
}

// ── Scenario 3: conditions ────────────────────────────────────────────────────

/// Records guarded by runtime predicates, combined with an alias.
fn run_conditions() -> WardenResult<()> {
    println!("\n=== Scenario 3: Conditional permissions ===");

    let manager = AccessManager::new(Arc::new(MemoryStore::new()));
    manager.alias("manage", &["create", "read", "update", "delete"]);

    let carol = manager.caller("user", "carol");

    // Managing articles is allowed on drafts only; the id encodes the
    // state here to keep the predicate pure.
    let drafts_only = from_fn(|_caller, _action, scope: &Scope| {
        matches!(scope, Scope::Instance(_, id) if id.starts_with("draft-"))
    });
    carol.allow_when(&["manage"], Scope::of("articles"), vec![drafts_only])?;

    report(
        carol.can(&["update"], Scope::item("articles", "draft-9"))?,
        "carol updates draft-9",
    );
    report(
        carol.can(&["update"], Scope::item("articles", "live-9"))?,
        "carol updates live-9",
    );
    report(
        carol.can(&["read", "update"], Scope::item("articles", "draft-2"))?,
        "carol reads and updates draft-2",
    );

    Ok(())
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn report(allowed: bool, what: &str) {
    let verdict = if allowed { "ALLOW" } else { "DENY " };
    println!("  [{}] {}", verdict, what);
}
