mod config_cmd;
mod drink;
mod ingredient;
mod user;

pub use config_cmd::ConfigCommand;
pub use drink::DrinkCommand;
pub use ingredient::IngredientCommand;
#[cfg(test)]
pub use ingredient::IngredientSubcommand;
pub use user::UserCommand;

use barapp_core::{KeyValueStore, Record, Repository};
use clap::ValueEnum;
use std::io::{self, BufRead, Write};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Asks a yes/no question, reading the answer from `input`. Anything but
/// "y"/"yes" declines.
pub fn confirm(prompt: &str, input: &mut impl BufRead) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(input: &str) -> bool {
    let answer = input.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Finds a record by id or name, failing with a "not found" error.
pub async fn resolve<R, S>(
    repo: &Repository<R, S>,
    identifier: &str,
) -> Result<R, Box<dyn std::error::Error>>
where
    R: Record,
    S: KeyValueStore,
{
    repo.find(identifier)
        .await?
        .ok_or_else(|| format!("{} not found: {}", R::COLLECTION.label(), identifier).into())
}

/// Deletes a record after confirmation read from `input`, unless `force`
/// skips the prompt.
pub async fn delete_record<R, S>(
    repo: &Repository<R, S>,
    identifier: &str,
    force: bool,
    input: &mut impl BufRead,
) -> CommandResult
where
    R: Record,
    S: KeyValueStore,
{
    let record = resolve(repo, identifier).await?;
    let label = R::COLLECTION.label().to_lowercase();

    // Confirm deletion unless --force is used
    if !force && !confirm(&format!("Delete {} '{}'?", label, record.name()), input)? {
        println!("Deletion cancelled.");
        return Ok(());
    }

    repo.delete(record.id()).await?;
    println!("Deleted {}: {}", label, record.name());
    Ok(())
}

/// Shortens `text` to `width` characters, marking the cut with "...".
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

/// Trims user input; blank values become `None`.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use barapp_core::{Collection, CollectionStore, Drink, Inventory, MemoryStore, TimestampIds};
    use std::sync::Arc;

    pub(crate) fn memory_inventory() -> Inventory<MemoryStore> {
        let store = CollectionStore::new(Arc::new(MemoryStore::new()));
        Inventory::new(store, Arc::new(TimestampIds::new()))
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Caipirinha", 30), "Caipirinha");
        assert_eq!(truncate("Clássico brasileiro com limão", 10), "Clássic...");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  Mojito "), Some("Mojito".to_string()));
        assert_eq!(non_blank("   "), None);
    }

    #[tokio::test]
    async fn test_resolve_by_name_and_id() {
        let inv = memory_inventory();
        let drink = inv
            .drinks
            .create(Drink::new("Caipirinha", "Clássico"))
            .await
            .unwrap();

        assert_eq!(resolve(&inv.drinks, "CAIPIRINHA").await.unwrap(), drink);
        assert_eq!(resolve(&inv.drinks, &drink.id).await.unwrap(), drink);

        let err = resolve(&inv.drinks, "Mojito").await.unwrap_err();
        assert_eq!(err.to_string(), "Drink not found: Mojito");
    }

    #[tokio::test]
    async fn test_forced_delete() {
        let inv = memory_inventory();
        inv.drinks
            .create(Drink::new("Caipirinha", "Clássico"))
            .await
            .unwrap();

        let mut no_input = io::empty();
        delete_record(&inv.drinks, "caipirinha", true, &mut no_input)
            .await
            .unwrap();
        assert!(inv.drinks.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_declined_delete_keeps_record() {
        let inv = memory_inventory();
        let drink = inv
            .drinks
            .create(Drink::new("Caipirinha", "Clássico"))
            .await
            .unwrap();

        for answer in ["n\n", "\n", ""] {
            let mut input = answer.as_bytes();
            delete_record(&inv.drinks, "caipirinha", false, &mut input)
                .await
                .unwrap();
            assert_eq!(
                inv.drinks.list().await.unwrap(),
                Collection::from_records(vec![drink.clone()])
            );
        }
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_record() {
        let inv = memory_inventory();
        inv.drinks
            .create(Drink::new("Caipirinha", "Clássico"))
            .await
            .unwrap();
        let mojito = inv
            .drinks
            .create(Drink::new("Mojito", "Hortelã"))
            .await
            .unwrap();

        let mut input = "y\n".as_bytes();
        delete_record(&inv.drinks, "caipirinha", false, &mut input)
            .await
            .unwrap();
        assert_eq!(
            inv.drinks.list().await.unwrap(),
            Collection::from_records(vec![mojito])
        );
    }
}
