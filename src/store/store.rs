//! Store facade: validated reads and writes plus the document
//! operations the backend services consume.
//!
//! Every write resolves its path against the shape registry and is
//! validated before it reaches the tree; a rejected write leaves the
//! tree untouched. User and config reads go through read-through
//! caches keyed the way the original backend caches them.

use serde_json::Value;
use std::collections::HashMap;

use uuid::Uuid;

use crate::model::{DbConfig, GameConfig, GameMode, GameStats, User, UserStatsNode};
use crate::observability::Logger;
use crate::path;
use crate::schema::{ShapeRegistry, Validator};

use super::errors::{StoreError, StoreResult};
use super::tree::Tree;

/// In-memory, schema-validated tree store.
pub struct TreeStore {
    registry: ShapeRegistry,
    strict: bool,
    tree: Tree,
    cache_users: HashMap<String, User>,
    cache_config: Option<DbConfig>,
}

impl TreeStore {
    /// Creates a store over a shape registry.
    pub fn new(registry: ShapeRegistry) -> Self {
        Self {
            registry,
            strict: true,
            tree: Tree::new(),
            cache_users: HashMap::new(),
            cache_config: None,
        }
    }

    /// Creates a store over the builtin game-store shapes.
    pub fn builtin() -> Self {
        Self::new(ShapeRegistry::builtin())
    }

    /// Tolerates undeclared fields on writes.
    pub fn with_unknown_fields_allowed(mut self) -> Self {
        self.strict = false;
        self
    }

    /// The shape registry backing this store.
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    fn validator(&self) -> Validator<'_> {
        let validator = Validator::new(&self.registry);
        if self.strict {
            validator
        } else {
            validator.with_unknown_fields_allowed()
        }
    }

    /// Reads the subtree at a registered node path.
    ///
    /// The path must resolve to a shape; reading an unregistered path
    /// is an error, reading an absent node is `Ok(None)`.
    pub fn get(&self, path: &str) -> StoreResult<Option<Value>> {
        self.registry.resolve(path)?;
        Ok(self.tree.get(path).cloned())
    }

    /// Validates and replaces the subtree at a registered node path.
    pub fn set(&mut self, path: &str, value: Value) -> StoreResult<()> {
        if let Err(e) = self.validator().validate(path, &value) {
            Logger::warn(
                "WRITE_REJECTED",
                &[("path", path), ("reason", e.message())],
            );
            return Err(e.into());
        }

        self.tree.set(path, value);
        self.invalidate_caches(path);
        Logger::info("WRITE_ACCEPTED", &[("path", path)]);
        Ok(())
    }

    /// Validates and applies a shallow partial update.
    ///
    /// Each provided field replaces the stored one; presence of
    /// required fields is judged on the merged value, so a partial
    /// touching one field of an existing node stays valid.
    pub fn update(&mut self, path: &str, partial: Value) -> StoreResult<()> {
        let partial = match partial {
            Value::Object(map) => map,
            _ => return Err(StoreError::NotAnObject(path.to_string())),
        };

        let mut merged = match self.tree.get(path).cloned() {
            Some(Value::Object(map)) => map,
            Some(_) => return Err(StoreError::NotAnObject(path.to_string())),
            None => serde_json::Map::new(),
        };
        for (key, value) in partial {
            merged.insert(key, value);
        }

        self.set(path, Value::Object(merged))
    }

    fn invalidate_caches(&mut self, path: &str) {
        let segments = path::segments(path);
        match segments.first() {
            Some(&"users") => match segments.get(1) {
                Some(uid) => {
                    self.cache_users.remove(*uid);
                }
                None => self.cache_users.clear(),
            },
            Some(&"config") => self.cache_config = None,
            Some(_) => {}
            // Root write replaces everything.
            None => {
                self.cache_users.clear();
                self.cache_config = None;
            }
        }
    }

    /// Mints a fresh store id.
    pub fn mint_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Provisions an account: writes the profile node and an empty
    /// stats node together.
    pub fn create_user(&mut self, uid: &str, user: &User) -> StoreResult<()> {
        let user_path = format!("/users/{}", uid);
        if self.tree.get(&user_path).is_some() {
            return Err(StoreError::UserExists(uid.to_string()));
        }

        self.set(&user_path, serde_json::to_value(user)?)?;
        self.set(
            &format!("/stats/{}", uid),
            serde_json::to_value(UserStatsNode::empty())?,
        )?;

        self.cache_users.insert(uid.to_string(), user.clone());
        Ok(())
    }

    /// Reads a user profile, serving repeated reads from cache.
    pub fn user(&mut self, uid: &str) -> StoreResult<Option<User>> {
        if let Some(user) = self.cache_users.get(uid) {
            return Ok(Some(user.clone()));
        }

        let path = format!("/users/{}", uid);
        let Some(raw) = self.tree.get(&path) else {
            return Ok(None);
        };
        let user: User = serde_json::from_value(raw.clone())
            .map_err(|e| StoreError::MalformedNode {
                path,
                reason: e.to_string(),
            })?;

        self.cache_users.insert(uid.to_string(), user.clone());
        Ok(Some(user))
    }

    /// Finds a user by username, returning the uid alongside the
    /// profile. Checks the cache first, then scans /users.
    pub fn user_by_username(&mut self, username: &str) -> StoreResult<Option<(String, User)>> {
        for (uid, user) in &self.cache_users {
            if user.username == username {
                return Ok(Some((uid.clone(), user.clone())));
            }
        }

        let Some(users) = self.tree.get("/users").and_then(Value::as_object).cloned() else {
            return Ok(None);
        };
        for (uid, raw) in users {
            let user: User =
                serde_json::from_value(raw).map_err(|e| StoreError::MalformedNode {
                    path: format!("/users/{}", uid),
                    reason: e.to_string(),
                })?;
            if user.username == username {
                self.cache_users.insert(uid.clone(), user.clone());
                return Ok(Some((uid, user)));
            }
        }
        Ok(None)
    }

    /// Stamps the user's last_online via a partial update.
    pub fn touch_last_online(
        &mut self,
        uid: &str,
        at: chrono::NaiveDateTime,
    ) -> StoreResult<()> {
        if self.user(uid)?.is_none() {
            return Err(StoreError::UnknownUser(uid.to_string()));
        }
        self.update(
            &format!("/users/{}", uid),
            serde_json::json!({ "last_online": crate::model::format_datetime(&at) }),
        )
    }

    /// Reads the config node, cached. An absent node reads as a config
    /// with no modes.
    pub fn db_config(&mut self) -> StoreResult<DbConfig> {
        if let Some(config) = &self.cache_config {
            return Ok(config.clone());
        }

        let mut config = match self.tree.get("/config") {
            Some(raw) => serde_json::from_value::<DbConfig>(raw.clone()).map_err(|e| {
                StoreError::MalformedNode {
                    path: "/config".to_string(),
                    reason: e.to_string(),
                }
            })?,
            None => DbConfig {
                modes: Default::default(),
            },
        };

        // Mode ids live in the map keys.
        for (id, mode) in config.modes.iter_mut() {
            mode.id = id.clone();
        }

        self.cache_config = Some(config.clone());
        Ok(config)
    }

    /// All registered game modes.
    pub fn game_modes(&mut self) -> StoreResult<Vec<GameMode>> {
        Ok(self.db_config()?.modes.into_values().collect())
    }

    /// One game mode by id.
    pub fn game_mode(&mut self, id: &str) -> StoreResult<Option<GameMode>> {
        Ok(self.db_config()?.modes.remove(id))
    }

    /// Registers a new game mode under a minted id.
    pub fn add_game_mode(&mut self, name: &str, config: GameConfig) -> StoreResult<String> {
        let id = self.mint_id();
        let mode = GameMode {
            id: id.clone(),
            name: name.to_string(),
            config,
        };
        self.set(
            &format!("/config/modes/{}", id),
            serde_json::to_value(&mode)?,
        )?;
        Ok(id)
    }

    /// Reads a user's raw stats node. Absent nodes read as empty.
    pub fn user_stats_node(&self, uid: &str) -> StoreResult<UserStatsNode> {
        let path = format!("/stats/{}", uid);
        match self.tree.get(&path) {
            Some(raw) => serde_json::from_value(raw.clone()).map_err(|e| {
                StoreError::MalformedNode {
                    path,
                    reason: e.to_string(),
                }
            }),
            None => Ok(UserStatsNode::empty()),
        }
    }

    /// Records one finished game for a user: appends the history entry
    /// and updates the mode's current MMR, as one stats-node write.
    ///
    /// Enforced here: the mode must exist under /config/modes, the
    /// user must be provisioned, and the ranking must include the
    /// owning uid.
    pub fn push_game_stats(
        &mut self,
        uid: &str,
        mode_id: &str,
        stats: &GameStats,
    ) -> StoreResult<()> {
        if self.game_mode(mode_id)?.is_none() {
            return Err(StoreError::UnknownGameMode(mode_id.to_string()));
        }
        if self.user(uid)?.is_none() {
            return Err(StoreError::UnknownUser(uid.to_string()));
        }
        if !stats.ranking.iter().any(|player| player == uid) {
            return Err(StoreError::RankingMissingOwner(uid.to_string()));
        }

        let mut node = self.user_stats_node(uid)?;
        let (date_key, entry) = stats.entry();
        node.mmrs.insert(mode_id.to_string(), stats.mmr);
        node.history
            .entry(mode_id.to_string())
            .or_default()
            .insert(date_key, entry);

        self.set(&format!("/stats/{}", uid), serde_json::to_value(node)?)
    }
}
