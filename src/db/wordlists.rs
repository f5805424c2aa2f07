//! Database operations for fuzzer wordlists.

use async_trait::async_trait;
use sea_orm::{EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::fuzz_wordlist::{self, Entity as WordlistEntity};
use crate::error::{AppError, AppResult};
use crate::models::Wordlist;

use super::DbPool;
use super::repository::WordlistRegistry;

#[async_trait]
impl WordlistRegistry for DbPool {
    async fn resolve_wordlist(&self, id: Uuid) -> AppResult<Option<String>> {
        Ok(self.get_wordlist(id).await?.map(|w| w.path))
    }

    async fn insert_wordlist(&self, wordlist: &Wordlist) -> AppResult<()> {
        let model = fuzz_wordlist::ActiveModel {
            id: Set(wordlist.id),
            name: Set(wordlist.name.clone()),
            path: Set(wordlist.path.clone()),
            line_count: Set(wordlist.line_count),
            file_size: Set(wordlist.file_size),
            created_at: Set(wordlist.created_at),
        };

        WordlistEntity::insert(model)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert wordlist: {}", e)))?;

        Ok(())
    }

    async fn list_wordlists(&self) -> AppResult<Vec<Wordlist>> {
        let models = WordlistEntity::find()
            .order_by_desc(fuzz_wordlist::Column::CreatedAt)
            .all(self.connection())
            .await?;

        Ok(models.into_iter().map(model_to_wordlist).collect())
    }

    async fn get_wordlist(&self, id: Uuid) -> AppResult<Option<Wordlist>> {
        let found = WordlistEntity::find_by_id(id)
            .one(self.connection())
            .await?;

        Ok(found.map(model_to_wordlist))
    }

    async fn delete_wordlist(&self, id: Uuid) -> AppResult<bool> {
        let result = WordlistEntity::delete_by_id(id)
            .exec(self.connection())
            .await?;

        Ok(result.rows_affected > 0)
    }
}

fn model_to_wordlist(m: fuzz_wordlist::Model) -> Wordlist {
    Wordlist {
        id: m.id,
        name: m.name,
        path: m.path,
        line_count: m.line_count,
        file_size: m.file_size,
        created_at: m.created_at,
    }
}
