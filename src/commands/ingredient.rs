use barapp_core::{Ingredient, KeyValueStore, Repository};
use clap::{Args, Subcommand};
use std::io;

use super::{delete_record, resolve, truncate, CommandResult, OutputFormat};

#[derive(Args)]
pub struct IngredientCommand {
    #[command(subcommand)]
    pub command: IngredientSubcommand,
}

#[derive(Subcommand)]
pub enum IngredientSubcommand {
    /// Add an ingredient to the stock
    Add {
        /// Ingredient name
        #[arg(long)]
        name: String,

        /// Quantity (amount)
        #[arg(long, allow_negative_numbers = true)]
        quantity: f64,

        /// Unit of measurement
        #[arg(long, default_value = "g")]
        unit: String,
    },

    /// List all ingredients
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show an ingredient's details
    Show {
        /// Ingredient ID or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit an existing ingredient
    Edit {
        /// Ingredient ID or name
        identifier: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New quantity
        #[arg(long, allow_negative_numbers = true)]
        quantity: Option<f64>,

        /// New unit
        #[arg(long)]
        unit: Option<String>,
    },

    /// Delete an ingredient
    Delete {
        /// Ingredient ID or name
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl IngredientCommand {
    pub async fn run<S: KeyValueStore>(
        &self,
        repo: &Repository<Ingredient, S>,
    ) -> CommandResult {
        match &self.command {
            IngredientSubcommand::Add {
                name,
                quantity,
                unit,
            } => {
                let ingredient = Ingredient::new(name.trim(), *quantity, unit.trim());
                let created = repo.create(ingredient).await?;
                println!("Created ingredient: {}", created);
                println!("  id: {}", created.id);
                Ok(())
            }

            IngredientSubcommand::List { format } => {
                let ingredients = repo.list().await?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&ingredients)?);
                    }
                    OutputFormat::Text => {
                        if ingredients.is_empty() {
                            println!("No ingredients found");
                            return Ok(());
                        }

                        println!("{:<15}  {:<30}  {:>10}  UNIT", "ID", "NAME", "QUANTITY");
                        println!("{}", "-".repeat(70));
                        for ingredient in &ingredients {
                            println!(
                                "{:<15}  {:<30}  {:>10}  {}",
                                ingredient.id,
                                truncate(&ingredient.name, 30),
                                ingredient.quantity,
                                ingredient.unit
                            );
                        }
                        println!("\nTotal: {} ingredient(s)", ingredients.len());
                    }
                }
                Ok(())
            }

            IngredientSubcommand::Show { identifier, format } => {
                let ingredient = resolve(repo, identifier).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&ingredient)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", ingredient.name);
                        println!("{}", "=".repeat(ingredient.name.chars().count()));
                        println!("ID: {}", ingredient.id);
                        println!("Quantity: {} {}", ingredient.quantity, ingredient.unit);
                    }
                }
                Ok(())
            }

            IngredientSubcommand::Edit {
                identifier,
                name,
                quantity,
                unit,
            } => {
                if name.is_none() && quantity.is_none() && unit.is_none() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let ingredient = resolve(repo, identifier).await?;
                let updated = repo
                    .update(&ingredient.id, |i| {
                        if let Some(name) = name {
                            i.name = name.trim().to_string();
                        }
                        if let Some(quantity) = quantity {
                            i.quantity = *quantity;
                        }
                        if let Some(unit) = unit {
                            i.unit = unit.trim().to_string();
                        }
                    })
                    .await?;

                println!("Updated ingredient: {}", updated);
                Ok(())
            }

            IngredientSubcommand::Delete { identifier, force } => {
                delete_record(repo, identifier, *force, &mut io::stdin().lock()).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::memory_inventory;

    fn add(name: &str, quantity: f64, unit: &str) -> IngredientCommand {
        IngredientCommand {
            command: IngredientSubcommand::Add {
                name: name.to_string(),
                quantity,
                unit: unit.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_add_ingredient() {
        let inv = memory_inventory();

        add("Limão", 3.0, "un").run(&inv.ingredients).await.unwrap();

        let stored = inv.ingredients.find("limão").await.unwrap().unwrap();
        assert_eq!(stored.quantity, 3.0);
        assert_eq!(stored.unit, "un");
    }

    #[tokio::test]
    async fn test_add_zero_quantity_fails() {
        let inv = memory_inventory();

        let err = add("Limão", 0.0, "un").run(&inv.ingredients).await.unwrap_err();

        assert!(err.to_string().contains("positive"));
        assert!(inv.ingredients.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_quantity() {
        let inv = memory_inventory();
        add("Gelo", 200.0, "g").run(&inv.ingredients).await.unwrap();

        let edit = IngredientCommand {
            command: IngredientSubcommand::Edit {
                identifier: "Gelo".to_string(),
                name: None,
                quantity: Some(500.0),
                unit: None,
            },
        };
        edit.run(&inv.ingredients).await.unwrap();

        let stored = inv.ingredients.find("gelo").await.unwrap().unwrap();
        assert_eq!(stored.quantity, 500.0);
        assert_eq!(stored.unit, "g");
    }

    #[tokio::test]
    async fn test_edit_negative_quantity_keeps_old_value() {
        let inv = memory_inventory();
        add("Gelo", 200.0, "g").run(&inv.ingredients).await.unwrap();

        let edit = IngredientCommand {
            command: IngredientSubcommand::Edit {
                identifier: "Gelo".to_string(),
                name: None,
                quantity: Some(-5.0),
                unit: None,
            },
        };
        assert!(edit.run(&inv.ingredients).await.is_err());

        let stored = inv.ingredients.find("gelo").await.unwrap().unwrap();
        assert_eq!(stored.quantity, 200.0);
    }
}
