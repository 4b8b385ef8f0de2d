use barapp_core::{Drink, KeyValueStore, Repository};
use clap::{Args, Subcommand};
use std::io;

use super::{delete_record, non_blank, resolve, truncate, CommandResult, OutputFormat};

#[derive(Args)]
pub struct DrinkCommand {
    #[command(subcommand)]
    pub command: DrinkSubcommand,
}

#[derive(Subcommand)]
pub enum DrinkSubcommand {
    /// Add a drink to the menu
    Add {
        /// Name of the drink
        #[arg(long)]
        name: String,

        /// Short description
        #[arg(long)]
        description: String,

        /// How to prepare it
        #[arg(long)]
        preparation: Option<String>,
    },

    /// List all drinks
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a drink's details
    Show {
        /// Drink ID or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit an existing drink
    Edit {
        /// Drink ID or name
        identifier: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New preparation (empty to clear)
        #[arg(long)]
        preparation: Option<String>,
    },

    /// Delete a drink
    Delete {
        /// Drink ID or name
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl DrinkCommand {
    pub async fn run<S: KeyValueStore>(&self, repo: &Repository<Drink, S>) -> CommandResult {
        match &self.command {
            DrinkSubcommand::Add {
                name,
                description,
                preparation,
            } => {
                let mut drink = Drink::new(name.trim(), description.trim());
                drink.preparation = preparation.as_deref().and_then(non_blank);

                let created = repo.create(drink).await?;
                println!("Created drink:");
                println!("{}", created);
                Ok(())
            }

            DrinkSubcommand::List { format } => {
                let drinks = repo.list().await?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&drinks)?);
                    }
                    OutputFormat::Text => {
                        if drinks.is_empty() {
                            println!("No drinks found");
                            return Ok(());
                        }

                        println!("{:<15}  {:<30}  DESCRIPTION", "ID", "NAME");
                        println!("{}", "-".repeat(80));
                        for drink in &drinks {
                            println!(
                                "{:<15}  {:<30}  {}",
                                drink.id,
                                truncate(&drink.name, 30),
                                truncate(&drink.description, 40)
                            );
                        }
                        println!("\nTotal: {} drink(s)", drinks.len());
                    }
                }
                Ok(())
            }

            DrinkSubcommand::Show { identifier, format } => {
                let drink = resolve(repo, identifier).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&drink)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", drink);
                    }
                }
                Ok(())
            }

            DrinkSubcommand::Edit {
                identifier,
                name,
                description,
                preparation,
            } => {
                if name.is_none() && description.is_none() && preparation.is_none() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let drink = resolve(repo, identifier).await?;
                let updated = repo
                    .update(&drink.id, |d| {
                        if let Some(name) = name {
                            d.name = name.trim().to_string();
                        }
                        if let Some(description) = description {
                            d.description = description.trim().to_string();
                        }
                        if let Some(preparation) = preparation {
                            d.preparation = non_blank(preparation);
                        }
                    })
                    .await?;

                println!("Updated drink:");
                println!("{}", updated);
                Ok(())
            }

            DrinkSubcommand::Delete { identifier, force } => {
                delete_record(repo, identifier, *force, &mut io::stdin().lock()).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::memory_inventory;

    fn add(name: &str, description: &str) -> DrinkCommand {
        DrinkCommand {
            command: DrinkSubcommand::Add {
                name: name.to_string(),
                description: description.to_string(),
                preparation: Some("  ".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_add_trims_and_drops_blank_preparation() {
        let inv = memory_inventory();

        add("  Caipirinha ", "Clássico").run(&inv.drinks).await.unwrap();

        let drinks = inv.drinks.list().await.unwrap();
        assert_eq!(drinks.len(), 1);
        let drink = &drinks.as_slice()[0];
        assert_eq!(drink.name, "Caipirinha");
        assert!(drink.preparation.is_none());
    }

    #[tokio::test]
    async fn test_add_blank_description_fails() {
        let inv = memory_inventory();

        let err = add("Caipirinha", "   ").run(&inv.drinks).await.unwrap_err();

        assert_eq!(err.to_string(), "Drink description cannot be empty");
        assert!(inv.drinks.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_changes_only_given_fields() {
        let inv = memory_inventory();
        let original = inv
            .drinks
            .create(Drink::new("Caipirinha", "Clássico"))
            .await
            .unwrap();

        let edit = DrinkCommand {
            command: DrinkSubcommand::Edit {
                identifier: "caipirinha".to_string(),
                name: None,
                description: None,
                preparation: Some("Amasse o limão com açúcar.".to_string()),
            },
        };
        edit.run(&inv.drinks).await.unwrap();

        let stored = inv.drinks.get(&original.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Caipirinha");
        assert_eq!(stored.description, "Clássico");
        assert_eq!(
            stored.preparation.as_deref(),
            Some("Amasse o limão com açúcar.")
        );
    }

    #[tokio::test]
    async fn test_edit_without_options_fails() {
        let inv = memory_inventory();
        let edit = DrinkCommand {
            command: DrinkSubcommand::Edit {
                identifier: "anything".to_string(),
                name: None,
                description: None,
                preparation: None,
            },
        };

        let err = edit.run(&inv.drinks).await.unwrap_err();
        assert!(err.to_string().contains("Nothing to update"));
    }
}
