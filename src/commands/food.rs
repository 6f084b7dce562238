use clap::{Args, Subcommand};
use foodstock_core::{
    format_price, FieldErrors, FileStorage, FoodFilters, FoodForm, FoodPatch, FoodStore, Lookup,
    FOOD_CATEGORIES,
};

use super::{confirm, require_login, truncate, OutputFormat};

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// List foods, filtered and paginated
    List {
        /// Case-insensitive text to find in name or description
        #[arg(long, short, default_value = "")]
        search: String,

        /// Exact category, or "all"
        #[arg(long, default_value = "all")]
        category: String,

        /// Page number (1-based)
        #[arg(long, short, default_value_t = 1)]
        page: usize,

        /// Items per page (defaults to page_size from config)
        #[arg(long, short)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a food's details
    Show {
        /// Food ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a new food
    Create {
        /// Name of the food
        name: String,

        /// Category (Indonesian, Italian, American, Japanese, Thai, Chinese, Other)
        #[arg(long)]
        category: String,

        /// Price in whole Rupiah
        #[arg(long)]
        price: String,

        /// Description
        #[arg(long)]
        description: String,

        /// Image URL
        #[arg(long)]
        image: String,
    },

    /// Update an existing food
    Update {
        /// Food ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New category
        #[arg(long)]
        category: Option<String>,

        /// New price
        #[arg(long)]
        price: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Delete a food
    Delete {
        /// Food ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// List the categories in use
    Categories,
}

impl FoodCommand {
    pub fn run(
        &self,
        storage: &FileStorage,
        page_size: usize,
    ) -> Result<(), Box<dyn std::error::Error>> {
        require_login(storage)?;
        let mut store = FoodStore::open(storage.clone())?;

        match &self.command {
            FoodSubcommand::List {
                search,
                category,
                page,
                limit,
                format,
            } => {
                let filters = FoodFilters::default()
                    .with_search(search.trim())
                    .with_category(category.as_str())
                    .with_page(*page)
                    .with_limit(limit.unwrap_or(page_size));
                let result = store.query(&filters);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    }
                    OutputFormat::Text => {
                        if result.items.is_empty() {
                            if result.total == 0 {
                                println!("No foods found");
                            } else {
                                println!(
                                    "Page {} is empty ({} page(s) available)",
                                    result.page, result.total_pages
                                );
                            }
                            return Ok(());
                        }

                        println!(
                            "{:<16}  {:<28}  {:<12}  {:>12}",
                            "ID", "NAME", "CATEGORY", "PRICE"
                        );
                        println!("{}", "-".repeat(74));
                        for food in &result.items {
                            println!(
                                "{:<16}  {:<28}  {:<12}  {:>12}",
                                food.id,
                                truncate(&food.name, 28),
                                truncate(&food.category, 12),
                                format!("Rp {}", format_price(food.price))
                            );
                        }
                        println!(
                            "\nPage {} of {} ({} food(s) total)",
                            result.page, result.total_pages, result.total
                        );
                        if result.has_previous() {
                            println!("Previous: --page {}", result.page - 1);
                        }
                        if result.has_next() {
                            println!("Next: --page {}", result.page + 1);
                        }
                    }
                }
                Ok(())
            }

            FoodSubcommand::Show { id, format } => {
                let food = match store.lookup(id) {
                    Lookup::Found(food) => food,
                    Lookup::NotFound | Lookup::Pending => {
                        return Err(format!("Food '{}' not found", id).into())
                    }
                };

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(food)?),
                    OutputFormat::Text => print!("{}", food),
                }
                Ok(())
            }

            FoodSubcommand::Create {
                name,
                category,
                price,
                description,
                image,
            } => {
                let form = FoodForm {
                    name: name.clone(),
                    category: category.clone(),
                    price: price.clone(),
                    description: description.clone(),
                    image: image.clone(),
                };
                let draft = form.validate().map_err(invalid_form)?;
                warn_unknown_category(&draft.category);

                let created = store.add(draft)?;
                println!("Created food:");
                print!("{}", created);
                Ok(())
            }

            FoodSubcommand::Update {
                id,
                name,
                category,
                price,
                description,
                image,
            } => {
                let existing = match store.lookup(id) {
                    Lookup::Found(food) => food,
                    Lookup::NotFound | Lookup::Pending => {
                        return Err(format!("Food '{}' not found", id).into())
                    }
                };

                if name.is_none()
                    && category.is_none()
                    && price.is_none()
                    && description.is_none()
                    && image.is_none()
                {
                    return Err("Nothing to update. Pass at least one field.".into());
                }

                // Edit on top of the stored values, like a prefilled form
                let mut form = FoodForm::from_item(existing);
                if let Some(name) = name {
                    form.name = name.clone();
                }
                if let Some(category) = category {
                    form.category = category.clone();
                }
                if let Some(price) = price {
                    form.price = price.clone();
                }
                if let Some(description) = description {
                    form.description = description.clone();
                }
                if let Some(image) = image {
                    form.image = image.clone();
                }

                let draft = form.validate().map_err(invalid_form)?;
                warn_unknown_category(&draft.category);

                match store.update(id, FoodPatch::from(draft))? {
                    Some(updated) => {
                        println!("Updated food:");
                        print!("{}", updated);
                        Ok(())
                    }
                    None => Err(format!("Food '{}' not found", id).into()),
                }
            }

            FoodSubcommand::Delete { id, force } => {
                let name = match store.get_by_id(id) {
                    Some(food) => food.name.clone(),
                    None => return Err(format!("Food '{}' not found", id).into()),
                };

                if !force && !confirm(&format!("Delete food '{}'?", name))? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                store.delete(id)?;
                println!("Deleted food: {}", name);
                Ok(())
            }

            FoodSubcommand::Categories => {
                let categories = store.distinct_categories();
                if categories.is_empty() {
                    println!("No categories yet");
                    return Ok(());
                }
                for category in &categories {
                    println!("{}", category);
                }
                Ok(())
            }
        }
    }
}

fn invalid_form(errors: FieldErrors) -> Box<dyn std::error::Error> {
    let lines: Vec<String> = errors
        .iter()
        .map(|(field, message)| format!("  {}: {}", field, message))
        .collect();
    format!("Food not saved:\n{}", lines.join("\n")).into()
}

fn warn_unknown_category(category: &str) {
    if !FOOD_CATEGORIES.contains(&category) {
        eprintln!(
            "Note: '{}' is not one of the usual categories ({})",
            category,
            FOOD_CATEGORIES.join(", ")
        );
    }
}
