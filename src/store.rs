use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};

use crate::{
    entities::{movie, user},
    error::{AppError, AppResult},
};

pub const SEED_USER: &str = "AWSL";

pub const SEED_MOVIES: [(&str, &str); 7] = [
    ("My Neighbor Totoro", "1988"),
    ("Dead Poets Society", "1989"),
    ("A Perfect World", "1993"),
    ("Leon", "1994"),
    ("Mahjong", "1996"),
    ("Swallowtail Butterfly", "1996"),
    ("King of Comedy", "1999"),
];

/// Persistence for users and movies. Every write runs in its own transaction.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn create_schema(&self) -> AppResult<()> {
        crate::db::create_schema(&self.db).await
    }

    pub async fn insert_user(&self, name: &str) -> AppResult<user::Model> {
        let txn = self.db.begin().await?;
        let user = user::ActiveModel { id: Default::default(), name: Set(name.to_string()) }
            .insert(&txn)
            .await?;
        txn.commit().await?;
        Ok(user)
    }

    pub async fn insert_movie(&self, title: &str, year: &str) -> AppResult<movie::Model> {
        let txn = self.db.begin().await?;
        let movie = new_movie(title, year).insert(&txn).await?;
        txn.commit().await?;
        Ok(movie)
    }

    /// The lowest-id user is the one shown on every page.
    pub async fn first_user(&self) -> AppResult<Option<user::Model>> {
        let user = user::Entity::find().order_by_asc(user::Column::Id).one(&self.db).await?;
        Ok(user)
    }

    pub async fn list_movies(&self) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        Ok(movies)
    }

    pub async fn get_movie(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound)
    }

    pub async fn update_movie(&self, id: i32, title: &str, year: &str) -> AppResult<movie::Model> {
        let txn = self.db.begin().await?;

        let existing = movie::Entity::find_by_id(id).one(&txn).await?.ok_or(AppError::NotFound)?;
        let mut active: movie::ActiveModel = existing.into();
        active.title = Set(title.to_string());
        active.year = Set(year.to_string());
        let movie = active.update(&txn).await?;

        txn.commit().await?;
        Ok(movie)
    }

    pub async fn delete_movie(&self, id: i32) -> AppResult<movie::Model> {
        let txn = self.db.begin().await?;

        let existing = movie::Entity::find_by_id(id).one(&txn).await?.ok_or(AppError::NotFound)?;
        movie::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(existing)
    }

    /// Inserts the sample user and movies in one transaction. Running it twice
    /// inserts the rows twice.
    pub async fn seed(&self) -> AppResult<()> {
        let txn = self.db.begin().await?;

        user::ActiveModel { id: Default::default(), name: Set(SEED_USER.to_string()) }
            .insert(&txn)
            .await?;

        movie::Entity::insert_many(SEED_MOVIES.iter().map(|(title, year)| new_movie(title, year)))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(user = SEED_USER, movies = SEED_MOVIES.len(), "seeded sample data");
        Ok(())
    }
}

fn new_movie(title: &str, year: &str) -> movie::ActiveModel {
    movie::ActiveModel {
        id: Default::default(),
        title: Set(title.to_string()),
        year: Set(year.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    async fn open_store() -> (TempDir, MovieStore) {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("store.db").display());
        let store = MovieStore::new(crate::db::connect(&url).await.unwrap());
        store.create_schema().await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn empty_store_has_no_user() {
        let (_dir, store) = open_store().await;
        assert!(store.first_user().await.unwrap().is_none());
        assert!(store.list_movies().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_schema_is_repeatable() {
        let (_dir, store) = open_store().await;
        store.insert_movie("Leon", "1994").await.unwrap();
        store.create_schema().await.unwrap();
        assert_eq!(store.list_movies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn lists_movies_in_insertion_order() {
        let (_dir, store) = open_store().await;
        store.insert_movie("Mahjong", "1996").await.unwrap();
        store.insert_movie("A Perfect World", "1993").await.unwrap();

        let titles: Vec<_> =
            store.list_movies().await.unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, ["Mahjong", "A Perfect World"]);
    }

    #[tokio::test]
    async fn first_user_is_lowest_id() {
        let (_dir, store) = open_store().await;
        let first = store.insert_user("AWSL").await.unwrap();
        store.insert_user("Other").await.unwrap();
        assert_eq!(store.first_user().await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn update_touches_only_target_row() {
        let (_dir, store) = open_store().await;
        let leon = store.insert_movie("Leon", "1994").await.unwrap();
        let other = store.insert_movie("Mahjong", "1996").await.unwrap();

        let updated = store.update_movie(leon.id, "Léon", "1995").await.unwrap();
        assert_eq!(updated.id, leon.id);
        assert_eq!(updated.title, "Léon");
        assert_eq!(updated.year, "1995");

        assert_eq!(store.get_movie(other.id).await.unwrap(), other);
        assert_eq!(store.get_movie(leon.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let (_dir, store) = open_store().await;
        store.insert_movie("Leon", "1994").await.unwrap();

        assert!(matches!(store.get_movie(999).await, Err(AppError::NotFound)));
        assert!(matches!(store.update_movie(999, "x", "1").await, Err(AppError::NotFound)));
        assert!(matches!(store.delete_movie(999).await, Err(AppError::NotFound)));
        assert_eq!(store.list_movies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let (_dir, store) = open_store().await;
        let leon = store.insert_movie("Leon", "1994").await.unwrap();
        let other = store.insert_movie("Mahjong", "1996").await.unwrap();

        let deleted = store.delete_movie(leon.id).await.unwrap();
        assert_eq!(deleted, leon);
        assert_eq!(store.list_movies().await.unwrap(), vec![other]);
    }

    #[tokio::test]
    async fn reset_schema_empties_tables() {
        let (_dir, store) = open_store().await;
        store.seed().await.unwrap();

        crate::db::reset_schema(store.db()).await.unwrap();
        assert!(store.first_user().await.unwrap().is_none());
        assert!(store.list_movies().await.unwrap().is_empty());

        store.create_schema().await.unwrap();
        let movie = store.insert_movie("Leon", "1994").await.unwrap();
        assert_eq!(movie.id, 1);
        assert_eq!(store.list_movies().await.unwrap(), vec![movie]);
    }

    #[tokio::test]
    async fn seeding_twice_duplicates_rows() {
        let (_dir, store) = open_store().await;
        store.seed().await.unwrap();

        let movies = store.list_movies().await.unwrap();
        assert_eq!(movies.len(), SEED_MOVIES.len());
        assert_eq!(movies[3].title, "Leon");
        assert_eq!(movies[3].year, "1994");
        assert_eq!(store.first_user().await.unwrap().unwrap().name, SEED_USER);

        store.seed().await.unwrap();
        assert_eq!(store.list_movies().await.unwrap().len(), 2 * SEED_MOVIES.len());
        let users = user::Entity::find().all(store.db()).await.unwrap();
        assert_eq!(users.len(), 2);
    }
}
