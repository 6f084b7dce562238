//! The default collection written on first run or after a corrupt snapshot.

use chrono::{DateTime, Utc};

use crate::models::{FoodDraft, FoodItem};

pub const SEED_SIZE: usize = 5;

/// Returns the five seed items, ids "1" through "5", stamped with `now`.
pub fn seed_foods(now: DateTime<Utc>) -> Vec<FoodItem> {
    let drafts = [
        FoodDraft::new("Nasi Goreng Spesial", "Indonesian", 25000)
            .with_description("Nasi goreng dengan telur, ayam, dan sayuran segar")
            .with_image("https://cdn1-production-images-kly.akamaized.net/LDRjBxjUH3gyrzEAUFrCi_XisTs=/0x148:1920x1230/800x450/filters:quality(75):strip_icc():format(webp)/kly-media-production/medias/3093328/original/069244600_1585909700-fried-2509089_1920.jpg"),
        FoodDraft::new("Spaghetti Carbonara", "Italian", 45000)
            .with_description("Pasta dengan saus krim, bacon, dan keju parmesan")
            .with_image("https://static01.nyt.com/images/2021/02/14/dining/carbonara-horizontal/carbonara-horizontal-mediumSquareAt3X-v2.jpg"),
        FoodDraft::new("Burger Beef Deluxe", "American", 35000)
            .with_description("Burger daging sapi dengan keju, lettuce, dan tomat")
            .with_image("https://asset.kompas.com/crops/zbmx5CMyQLbONPHVHv3Ip4Ax9lg=/12x51:892x637/1200x800/data/photo/2022/03/05/622358ed771fb.jpg"),
        FoodDraft::new("Sushi Salmon Roll", "Japanese", 55000)
            .with_description("Sushi roll dengan salmon segar dan nori")
            .with_image("https://www.tiger-corporation.com/wp-content/uploads/2023/02/hero-img-recipe-salmon-roll-22a44bc8993e779162aa80766bda8751.jpg"),
        FoodDraft::new("Tom Yum Goong", "Thai", 40000)
            .with_description("Sup pedas asam dengan udang dan jamur")
            .with_image("https://hot-thai-kitchen.com/wp-content/uploads/2013/03/tom-yum-goong-blog.jpg"),
    ];

    drafts
        .into_iter()
        .enumerate()
        .map(|(i, draft)| FoodItem::from_draft((i + 1).to_string(), draft, now))
        .collect()
}
