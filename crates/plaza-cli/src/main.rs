//! `plaza` — command-line client for the Plaza community store.
//!
//! Operates directly on the local SQLite snapshot file, playing the role
//! of the single interactive user.
//!
//! # Usage
//!
//! ```
//! plaza --user u1 create-group "Rust Leipzig" --closed
//! plaza --user u2 join <group-id>
//! plaza --user u1 requests <group-id>
//! plaza --user u1 resolve <request-id>
//! plaza --user u2 nudge u3
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plaza_core::{CommunityStore, group::NewGroup, profile::PlaceholderProfiles};
use plaza_store_sqlite::SqliteSnapshots;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "plaza", about = "CLI for the Plaza community store")]
struct Args {
  /// Path to the SQLite snapshot file.
  #[arg(
    long,
    env = "PLAZA_STORE",
    default_value = "~/.local/share/plaza/community.db"
  )]
  store: PathBuf,

  /// Acting user id. The store trusts this as-is.
  #[arg(short, long, env = "PLAZA_USER", default_value = "me")]
  user: String,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create a group administered by the acting user.
  CreateGroup {
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    category: String,
    /// Gate joining behind admin approval.
    #[arg(long)]
    closed: bool,
  },
  /// List all groups.
  Groups,
  /// Show one group in detail.
  Show { group_id: Uuid },
  /// Join a group (or file a join request if it is closed).
  Join { group_id: Uuid },
  /// List pending join requests for a group.
  Requests { group_id: Uuid },
  /// Approve (default) or decline a join request.
  Resolve {
    request_id: Uuid,
    #[arg(long)]
    decline: bool,
  },
  /// Like another user.
  Like { to_user: String },
  /// Nudge another user (quota-limited).
  Nudge { to_user: String },
  /// Show the remaining nudge quota.
  Quota,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  let store_path = expand_tilde(&args.store);
  if let Some(parent) = store_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating {}", parent.display()))?;
  }

  let snapshots = SqliteSnapshots::open(&store_path)
    .await
    .with_context(|| format!("opening store at {}", store_path.display()))?;
  let mut store = CommunityStore::init(snapshots, PlaceholderProfiles).await;

  match args.command {
    Command::CreateGroup { name, description, category, closed } => {
      let group = store
        .create_group(NewGroup {
          name,
          description,
          category,
          cover_image: String::new(),
          is_open: !closed,
          admin_ids: vec![args.user.clone()],
          subgroups: Vec::new(),
        })
        .await?;
      println!("created group {} ({})", group.name, group.id);
    }

    Command::Groups => {
      for group in store.groups() {
        let policy = if group.is_open { "open" } else { "closed" };
        println!(
          "{}  {:<30}  {:<6}  {} member(s)",
          group.id, group.name, policy, group.member_count
        );
      }
    }

    Command::Show { group_id } => match store.group(group_id) {
      Some(group) => {
        println!("{}  ({})", group.name, group.id);
        if !group.description.is_empty() {
          println!("  {}", group.description);
        }
        if !group.category.is_empty() {
          println!("  category: {}", group.category);
        }
        println!("  policy:   {}", if group.is_open { "open" } else { "closed" });
        println!("  admins:   {}", group.admin_ids.join(", "));
        println!("  members:  {}", group.member_ids.join(", "));
        println!("  created:  {}", group.created_at);
      }
      None => println!("group {group_id} not found"),
    },

    Command::Join { group_id } => {
      if store.group(group_id).is_none() {
        println!("group {group_id} not found");
      } else {
        store.join_group(group_id, &args.user).await;
        if store.is_group_member(group_id, &args.user) {
          println!("joined {group_id}");
        } else {
          println!("join request pending for {group_id}");
        }
      }
    }

    Command::Requests { group_id } => {
      let pending = store.pending_requests(group_id);
      if pending.is_empty() {
        println!("no pending requests");
      }
      for request in pending {
        println!(
          "{}  {}  requested {}",
          request.id, request.requester_name, request.requested_at
        );
      }
    }

    Command::Resolve { request_id, decline } => {
      store.handle_join_request(request_id, !decline).await;
      match store.request(request_id) {
        Some(request) => println!("{request_id} is now {:?}", request.status),
        None => println!("request {request_id} not found"),
      }
    }

    Command::Like { to_user } => {
      store.like_user(&args.user, &to_user).await;
      println!("liked {to_user}");
    }

    Command::Nudge { to_user } => match store.nudge_user(&args.user, &to_user).await {
      Ok(()) => println!(
        "nudged {to_user} ({} left this period)",
        store.nudges_remaining()
      ),
      Err(plaza_core::Error::QuotaExceeded) => {
        println!("nudge quota exhausted; it replenishes 30 days after the last reset");
      }
      Err(e) => return Err(e.into()),
    },

    Command::Quota => {
      let quota = store.quota();
      println!(
        "{} nudge(s) remaining, last reset {}",
        quota.count, quota.last_reset
      );
    }
  }

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
