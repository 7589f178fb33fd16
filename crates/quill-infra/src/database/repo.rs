//! SeaORM repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use quill_core::domain::{Account, Post, PostChanges, PostDraft, PostWithAuthor};
use quill_core::error::RepoError;
use quill_core::ports::{AccountRepository, PostRepository};

use super::entity::account::{self, Entity as AccountEntity};
use super::entity::post::{self, Entity as PostEntity};

/// Map a SeaORM error onto the repository taxonomy, surfacing unique-index
/// violations as constraint failures.
fn db_err(e: DbErr) -> RepoError {
    let msg = e.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        RepoError::Constraint(msg)
    } else {
        RepoError::Query(msg)
    }
}

/// Post repository backed by SeaORM.
pub struct SeaOrmPostRepository {
    db: DbConn,
}

impl SeaOrmPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_slug_excluding(
        &self,
        slug: &str,
        exclude_id: i32,
    ) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Id.ne(exclude_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_recent(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let rows = PostEntity::find()
            .find_also_related(AccountEntity)
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(with_author).collect())
    }

    async fn get_detail(&self, slug: &str) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .find_also_related(AccountEntity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.map(with_author))
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let now = Utc::now();
        let model = post::ActiveModel {
            id: NotSet,
            author_id: Set(draft.author_id),
            title: Set(draft.title),
            description: Set(draft.description),
            content: Set(draft.content),
            slug: Set(draft.slug),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(inserted.into())
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: Set(id),
            author_id: NotSet,
            title: Set(changes.title),
            description: Set(changes.description),
            content: Set(changes.content),
            slug: Set(changes.slug),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => db_err(other),
        })?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

fn with_author((post, author): (post::Model, Option<account::Model>)) -> PostWithAuthor {
    PostWithAuthor {
        post: post.into(),
        author_name: author.map(|a| a.name),
    }
}

/// Account repository backed by SeaORM.
pub struct SeaOrmAccountRepository {
    db: DbConn,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepoError> {
        let result = AccountEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(account_email = %masked, "Finding account by email");

        let result = AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, acc: Account) -> Result<Account, RepoError> {
        let model: account::ActiveModel = acc.into();
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(inserted.into())
    }
}
