//! Interactive numbered menu over a [`SocialStore`].
//!
//! The loop is generic over the store, so the same session code drives both
//! Neo4j and in-memory runs. One line of input selects an action; each
//! action prompts inline for its fields and prints a one-line result. Store
//! errors propagate out and terminate the session; invalid selections are
//! reported and the loop continues.

use colored::Colorize;
use dialoguer::Input;

use sociograph_core::AttributeName;
use sociograph_graph::SocialStore;

pub async fn run_session<S: SocialStore>(store: &S) -> anyhow::Result<()> {
    loop {
        print_menu(store.attribute());
        let choice: String = Input::new().with_prompt("Option").interact_text()?;
        match choice.trim() {
            "0" => break,
            "1" => add_person(store).await?,
            "2" => list_persons(store).await?,
            "3" => find_person(store).await?,
            "4" => create_friendship(store).await?,
            "5" => list_friends(store).await?,
            "6" => delete_friendship(store).await?,
            "7" => recommend_by_city(store).await?,
            "8" => recommend_by_attribute(store).await?,
            "9" => stats(store).await?,
            "10" => delete_person(store).await?,
            other => println!("{} Invalid option: {other}", "✗".red()),
        }
    }
    Ok(())
}

fn print_menu(attribute: &AttributeName) {
    println!();
    println!("{}", "=== SOCIOGRAPH ===".bold());
    println!(" 1. Add person");
    println!(" 2. List all persons");
    println!(" 3. Find person");
    println!(" 4. Create friendship");
    println!(" 5. List friends of a person");
    println!(" 6. Delete friendship");
    println!(" 7. Recommendations by city");
    println!(" 8. Recommendations by {attribute}");
    println!(" 9. Statistics");
    println!("10. Delete person");
    println!(" 0. Exit");
}

fn prompt(label: &str) -> anyhow::Result<String> {
    let value: String = Input::new().with_prompt(label).interact_text()?;
    Ok(value.trim().to_string())
}

async fn add_person<S: SocialStore>(store: &S) -> anyhow::Result<()> {
    let name = prompt("Name")?;
    let city = prompt("City")?;
    let custom = prompt(store.attribute().as_str())?;
    if store.upsert_person(&name, &city, &custom).await? {
        println!("{} Saved", "✓".green());
    } else {
        println!("{} Not saved", "✗".red());
    }
    Ok(())
}

async fn list_persons<S: SocialStore>(store: &S) -> anyhow::Result<()> {
    let persons = store.list_persons().await?;
    if persons.is_empty() {
        println!("No persons yet");
        return Ok(());
    }
    let attribute = store.attribute();
    for person in persons {
        println!(
            "- {} | {} | {attribute}={}",
            person.name.cyan(),
            person.city,
            person.custom
        );
    }
    Ok(())
}

async fn find_person<S: SocialStore>(store: &S) -> anyhow::Result<()> {
    let name = prompt("Name")?;
    match store.get_person(&name).await? {
        Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
        None => println!("Not found"),
    }
    Ok(())
}

async fn create_friendship<S: SocialStore>(store: &S) -> anyhow::Result<()> {
    let a = prompt("Person A")?;
    let b = prompt("Person B")?;
    if store.create_friendship(&a, &b).await? {
        println!("{} Friendship created", "✓".green());
    } else {
        println!("{} Not created", "✗".red());
    }
    Ok(())
}

async fn list_friends<S: SocialStore>(store: &S) -> anyhow::Result<()> {
    let name = prompt("Name")?;
    let friends = store.list_friends(&name).await?;
    if friends.is_empty() {
        println!("No friends");
    } else {
        println!("Friends: {}", friends.join(", "));
    }
    Ok(())
}

async fn delete_friendship<S: SocialStore>(store: &S) -> anyhow::Result<()> {
    let a = prompt("Person A")?;
    let b = prompt("Person B")?;
    let removed = store.delete_friendship(&a, &b).await?;
    println!("Friendships removed: {removed}");
    Ok(())
}

async fn recommend_by_city<S: SocialStore>(store: &S) -> anyhow::Result<()> {
    let name = prompt("Name")?;
    print_suggestions(store.recommend_by_city(&name).await?);
    Ok(())
}

async fn recommend_by_attribute<S: SocialStore>(store: &S) -> anyhow::Result<()> {
    let name = prompt("Name")?;
    print_suggestions(store.recommend_by_attribute(&name).await?);
    Ok(())
}

fn print_suggestions(suggestions: Vec<String>) {
    if suggestions.is_empty() {
        println!("No suggestions");
    } else {
        println!("Suggestions: {}", suggestions.join(", "));
    }
}

async fn stats<S: SocialStore>(store: &S) -> anyhow::Result<()> {
    let stats = store.stats().await?;
    println!(
        "Persons={} | Friendships={}",
        stats.persons, stats.friendships
    );
    Ok(())
}

async fn delete_person<S: SocialStore>(store: &S) -> anyhow::Result<()> {
    let name = prompt("Name")?;
    if store.delete_person(&name).await? == 1 {
        println!("{} Deleted", "✓".green());
    } else {
        println!("No such person");
    }
    Ok(())
}
