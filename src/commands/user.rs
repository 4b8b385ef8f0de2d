use barapp_core::{KeyValueStore, Repository, User};
use clap::{Args, Subcommand};
use std::io;

use super::{delete_record, resolve, truncate, CommandResult, OutputFormat};

#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand)]
pub enum UserSubcommand {
    /// Register a user
    Add {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,
    },

    /// List all users
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a user's details
    Show {
        /// User ID or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit an existing user
    Edit {
        /// User ID or name
        identifier: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a user
    Delete {
        /// User ID or name
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl UserCommand {
    pub async fn run<S: KeyValueStore>(&self, repo: &Repository<User, S>) -> CommandResult {
        match &self.command {
            UserSubcommand::Add { name, email } => {
                let created = repo.create(User::new(name.as_str(), email.as_str())).await?;
                println!("Created user: {}", created);
                println!("  id: {}", created.id);
                Ok(())
            }

            UserSubcommand::List { format } => {
                let users = repo.list().await?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&users)?);
                    }
                    OutputFormat::Text => {
                        if users.is_empty() {
                            println!("No users found");
                            return Ok(());
                        }

                        println!("{:<15}  {:<30}  EMAIL", "ID", "NAME");
                        println!("{}", "-".repeat(80));
                        for user in &users {
                            println!(
                                "{:<15}  {:<30}  {}",
                                user.id,
                                truncate(&user.name, 30),
                                user.email
                            );
                        }
                        println!("\nTotal: {} user(s)", users.len());
                    }
                }
                Ok(())
            }

            UserSubcommand::Show { identifier, format } => {
                let user = resolve(repo, identifier).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&user)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", user.name);
                        println!("{}", "=".repeat(user.name.chars().count()));
                        println!("ID: {}", user.id);
                        println!("Email: {}", user.email);
                    }
                }
                Ok(())
            }

            UserSubcommand::Edit {
                identifier,
                name,
                email,
            } => {
                if name.is_none() && email.is_none() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let user = resolve(repo, identifier).await?;
                let updated = repo
                    .update(&user.id, |u| {
                        if let Some(name) = name {
                            u.name = name.clone();
                        }
                        if let Some(email) = email {
                            u.email = email.clone();
                        }
                    })
                    .await?;

                println!("Updated user: {}", updated);
                Ok(())
            }

            UserSubcommand::Delete { identifier, force } => {
                delete_record(repo, identifier, *force, &mut io::stdin().lock()).await
            }
        }
    }
}
