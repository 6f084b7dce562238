use clap::Args;
use foodstock_core::{format_price, DashboardStats, FileStorage, FoodStore};

use super::{require_login, OutputFormat};

#[derive(Args)]
pub struct StatsCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl StatsCommand {
    pub fn run(&self, storage: &FileStorage) -> Result<(), Box<dyn std::error::Error>> {
        let (_, user) = require_login(storage)?;
        let store = FoodStore::open(storage.clone())?;
        let stats = DashboardStats::compute(store.foods());

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            OutputFormat::Text => {
                println!("Welcome back, {}!\n", user.full_name);
                println!("Total foods:      {}", stats.total_foods);
                println!("Categories:       {}", stats.total_categories);
                println!("Average price:    Rp {}", format_price(stats.average_price));

                println!("\nRecent foods:");
                if stats.recent_foods.is_empty() {
                    println!("  (none yet)");
                }
                for food in &stats.recent_foods {
                    println!(
                        "  - {} [{}] Rp {}",
                        food.name,
                        food.category,
                        format_price(food.price)
                    );
                }
            }
        }
        Ok(())
    }
}
