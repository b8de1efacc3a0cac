//! Example inventory inserted on first start against an empty database.
//!
//! The seed runs in a single transaction guarded by an emptiness check on
//! `trees`: either every seed row is written or none is.

use sqlx::SqliteConnection;

use crate::models::status::NewStatusRecord;
use crate::models::tree::NewTree;
use crate::repositories::{StatusRepo, TreeRepo};
use crate::{begin_write, DbPool};

struct SeedTree {
    latitude: f64,
    longitude: f64,
    species: &'static str,
    address: &'static str,
    diameter: f64,
    height: f64,
    status: &'static str,
    notes: &'static str,
}

struct SeedComment {
    /// Index into [`SEED_TREES`].
    tree: usize,
    user_name: &'static str,
    text: &'static str,
    contact_email: &'static str,
}

const SEED_TREES: &[SeedTree] = &[
    SeedTree {
        latitude: 55.7558,
        longitude: 37.6176,
        species: "Дуб",
        address: "Красная площадь, 1",
        diameter: 85.5,
        height: 25.0,
        status: "excellent",
        notes: "Дерево в отличном состоянии",
    },
    SeedTree {
        latitude: 55.7520,
        longitude: 37.6175,
        species: "Береза",
        address: "ул. Тверская, 10",
        diameter: 45.2,
        height: 18.5,
        status: "good",
        notes: "Небольшие повреждения коры",
    },
    SeedTree {
        latitude: 55.7500,
        longitude: 37.6200,
        species: "Сосна",
        address: "Парк Горького, центральная аллея",
        diameter: 92.1,
        height: 30.2,
        status: "satisfactory",
        notes: "Требуется санитарная обрезка",
    },
    SeedTree {
        latitude: 55.7490,
        longitude: 37.6150,
        species: "Клен",
        address: "ул. Большая Дмитровка, 15",
        diameter: 32.8,
        height: 12.3,
        status: "poor",
        notes: "Признаки заболевания",
    },
    SeedTree {
        latitude: 55.7475,
        longitude: 37.6225,
        species: "Липа",
        address: "Чистопрудный бульвар",
        diameter: 68.7,
        height: 22.1,
        status: "critical",
        notes: "Сильное повреждение ствола",
    },
];

const SEED_COMMENTS: &[SeedComment] = &[
    SeedComment {
        tree: 0,
        user_name: "Иван Петров",
        text: "Заметил, что у дерева появились сухие ветки на верхушке",
        contact_email: "ivan@example.com",
    },
    SeedComment {
        tree: 1,
        user_name: "Мария Сидорова",
        text: "Дерево выглядит здоровым, но есть повреждения коры внизу",
        contact_email: "maria@example.com",
    },
    SeedComment {
        tree: 2,
        user_name: "Аноним",
        text: "Около дерева появились грибы, возможно, это признак болезни",
        contact_email: "",
    },
];

/// Number of trees the seed inserts.
pub const SEED_TREE_COUNT: usize = SEED_TREES.len();

/// Number of (pre-reviewed) comments the seed inserts.
pub const SEED_COMMENT_COUNT: usize = SEED_COMMENTS.len();

/// Insert the example inventory if `trees` is empty. Returns whether rows
/// were written.
pub async fn seed_if_empty(pool: &DbPool) -> Result<bool, sqlx::Error> {
    let mut tx = begin_write(pool).await?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trees")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tracing::debug!(existing, "Trees present, skipping seed");
        return Ok(false);
    }

    let mut tree_ids = Vec::with_capacity(SEED_TREES.len());
    for seed in SEED_TREES {
        let tree = TreeRepo::insert(&mut tx, &new_tree(seed)).await?;
        let initial =
            NewStatusRecord::observed_today(seed.status.to_string(), Some(seed.notes.to_string()));
        StatusRepo::insert(&mut tx, tree.id, &initial).await?;
        tree_ids.push(tree.id);
    }

    for seed in SEED_COMMENTS {
        insert_reviewed_comment(&mut tx, tree_ids[seed.tree], seed).await?;
    }

    tx.commit().await?;

    tracing::info!(
        trees = SEED_TREES.len(),
        comments = SEED_COMMENTS.len(),
        "Seeded example inventory"
    );
    Ok(true)
}

fn new_tree(seed: &SeedTree) -> NewTree {
    NewTree {
        latitude: seed.latitude,
        longitude: seed.longitude,
        species: seed.species.to_string(),
        address: Some(seed.address.to_string()),
        diameter: Some(seed.diameter),
        height: Some(seed.height),
        status: seed.status.to_string(),
        notes: Some(seed.notes.to_string()),
    }
}

/// Seed comments are published immediately, unlike user submissions.
async fn insert_reviewed_comment(
    conn: &mut SqliteConnection,
    tree_id: i64,
    seed: &SeedComment,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO comments (tree_id, user_name, text, contact_email, is_reviewed)
         VALUES (?, ?, ?, ?, 1)",
    )
    .bind(tree_id)
    .bind(seed.user_name)
    .bind(seed.text)
    .bind(seed.contact_email)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
