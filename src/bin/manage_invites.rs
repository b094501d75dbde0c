//! CLI tool to mint and inspect invite codes directly in the database.
//!
//! Usage:
//!   cargo run --bin manage-invites -- create --count 5 --role student
//!   cargo run --bin manage-invites -- show --code inv_...

use std::env;

use exam_portal_lib::config::Config;
use exam_portal_lib::db::DbPool;
use exam_portal_lib::models::Role;
use exam_portal_lib::services::invites::{InviteIssuer, mint_invites};
use exam_portal_lib::store::PortalStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    // Initialize database
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::new(&config).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        eprintln!("Error running migrations: {}", e);
        std::process::exit(1);
    }

    match command {
        "create" => create_invites(&pool, &args[2..]).await,
        "show" => match flag_value(&args[2..], &["--code", "-c"]) {
            Some(code) => show_invite(&pool, &code).await,
            None => {
                eprintln!("Error: --code is required");
                std::process::exit(1);
            }
        },
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn flag_value(args: &[String], names: &[&str]) -> Option<String> {
    args.iter()
        .position(|a| names.contains(&a.as_str()))
        .and_then(|i| args.get(i + 1))
        .cloned()
}

async fn create_invites(pool: &DbPool, args: &[String]) {
    let count = match flag_value(args, &["--count", "-n"]) {
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: --count must be a positive number");
                std::process::exit(1);
            }
        },
        None => 1,
    };

    let role = match flag_value(args, &["--role", "-r"]) {
        Some(raw) => match Role::parse(&raw) {
            Some(r) => r,
            None => {
                eprintln!(
                    "Error: Invalid role '{}'. Must be: student, moderator, elite_moderator, super_user",
                    raw
                );
                std::process::exit(1);
            }
        },
        None => Role::Student,
    };

    let codes = match mint_invites(pool, InviteIssuer::AdminKey, count, role).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error creating invites: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("════════════════════════════════════════════════════════════════");
    println!("  {} invite code(s) granting {}", codes.len(), role);
    println!("════════════════════════════════════════════════════════════════");
    println!();
    for code in &codes {
        println!("  {}", code);
    }
    println!();
    println!("  Each code can be redeemed exactly once.");
    println!("════════════════════════════════════════════════════════════════");
    println!();
}

async fn show_invite(pool: &DbPool, code: &str) {
    let invite = match pool.find_invite(code).await {
        Ok(Some(i)) => i,
        Ok(None) => {
            eprintln!("Invite code not found: {}", code);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error looking up invite: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("  Code:     {}", invite.code);
    println!("  Role:     {}", invite.role);
    println!("  Created:  {}", invite.created_at.to_rfc3339());
    match (invite.used_by, invite.used_at) {
        (Some(user), Some(at)) => {
            println!("  Used by:  {}", user);
            println!("  Used at:  {}", at.to_rfc3339());
        }
        _ => println!("  Status:   unused"),
    }
    println!();
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage: manage-invites <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  create             Mint new invite codes");
    eprintln!("    --count, -n      Number of codes (default: 1, max: 50)");
    eprintln!("    --role, -r       Role granted on redemption (default: student)");
    eprintln!("  show               Show an invite code and whether it was used");
    eprintln!("    --code, -c       The invite code");
    eprintln!("  help               Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  manage-invites create --count 10");
    eprintln!("  manage-invites create --role super_user");
    eprintln!("  manage-invites show --code inv_0123abcd");
    eprintln!();
}
