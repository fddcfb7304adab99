use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_entity, insert_user, list_entities, load_entity, require_user};
use crate::errors::{AppError, AppResult};
use crate::models::entity_kind::EntityKind;
use crate::models::timed_entity::TimedEntity;
use crate::models::user::User;

/// Users and timed entities: creation and tenant-scoped listing.
pub struct EntityLogic;

impl EntityLogic {
    pub fn add_user(pool: &mut DbPool, tenant: &str, name: &str) -> AppResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("User name cannot be empty".into()));
        }

        let user = insert_user(&pool.conn, tenant, name)?;
        ttlog_quiet(
            &pool.conn,
            "user_add",
            &format!("user #{}", user.id),
            &format!("Added user '{}' to tenant '{}'", user.name, user.tenant),
        );
        Ok(user)
    }

    /// Create a timed entity in the acting user's tenant.
    /// `owner` defaults to the acting user and must share its tenant.
    pub fn add_entity(
        pool: &mut DbPool,
        acting_user: i64,
        kind: EntityKind,
        title: &str,
        owner: Option<i64>,
    ) -> AppResult<TimedEntity> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Other("Title cannot be empty".into()));
        }

        let actor = require_user(&pool.conn, acting_user)?;
        let owner = match owner {
            Some(id) => require_user(&pool.conn, id)?,
            None => actor.clone(),
        };

        if owner.tenant != actor.tenant {
            return Err(AppError::Unauthorized {
                kind: "User",
                id: owner.id,
                user: actor.id,
            });
        }

        let mut entity = TimedEntity::new(&actor.tenant, kind, title, owner.id);
        entity.id = insert_entity(&pool.conn, &entity)?;

        ttlog_quiet(
            &pool.conn,
            "entity_add",
            &format!("{} #{}", kind.to_db_str(), entity.id),
            &format!("'{}' owned by user {}", entity.title, owner.id),
        );

        Ok(entity)
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<TimedEntity> {
        load_entity(&pool.conn, id)?.ok_or(AppError::NotFound { kind: "Entity", id })
    }

    pub fn list_for_user(
        pool: &mut DbPool,
        acting_user: i64,
        running_only: bool,
    ) -> AppResult<Vec<TimedEntity>> {
        let actor = require_user(&pool.conn, acting_user)?;
        list_entities(&pool.conn, &actor.tenant, running_only)
    }
}
