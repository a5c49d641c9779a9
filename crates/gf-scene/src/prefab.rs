//! Prefab registry: object templates and named action prototypes parsed once
//! from JSON and stamped out on demand.
//!
//! # File format
//!
//! ```json
//! {
//!   "prefabs": [
//!     {
//!       "name": "bolt",
//!       "velocity": [0, 6],
//!       "health": 1,
//!       "metadata": { "team": "blue" },
//!       "behaviors": [
//!         { "kind": "drift" },
//!         { "kind": "contact_damage", "amount": 10 },
//!         { "kind": "lifetime", "seconds": 3 }
//!       ]
//!     }
//!   ],
//!   "actions": [
//!     { "name": "opening", "kind": "sequence", "children": [ { "kind": "wait", "duration_secs": 1 } ] }
//!   ]
//! }
//! ```
//!
//! Behavior and action nodes with a missing or unknown `"kind"` are skipped
//! with a warning.  Structural problems (a prefab without a name, two
//! prefabs or two behaviors of one prefab sharing a name) are errors.

use std::fmt;
use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde_json::Value;

use gf_action::{Action, ActionPool};
use gf_behavior::{Behavior, BehaviorComponent, BehaviorError, BehaviorPool};
use gf_core::{Decl, ObjectId, PrefabId, Vec2};
use gf_pool::Prototypes;
use gf_world::{GameObject, GameObjectBuilder, World};

use crate::{SceneError, SceneResult};

// ── ObjectTemplate ────────────────────────────────────────────────────────────

/// Everything needed to build one game object and its behaviors.
///
/// Behavior templates are never attached to an object themselves; each
/// instantiation deep-copies them through the behavior pool.
#[derive(Debug)]
pub struct ObjectTemplate {
    pub name:     String,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Max health; `None` builds an object without a `Health` component.
    pub health:   Option<f32>,
    pub metadata: Vec<(String, String)>,

    behaviors: Vec<Behavior>,
}

impl ObjectTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:      name.into(),
            position:  Vec2::ZERO,
            velocity:  Vec2::ZERO,
            health:    None,
            metadata:  Vec::new(),
            behaviors: Vec::new(),
        }
    }

    /// Add a behavior template.  Names must be unique within the prefab.
    pub fn push_behavior(&mut self, behavior: Behavior) -> SceneResult<()> {
        if self.behaviors.iter().any(|b| b.name() == behavior.name()) {
            return Err(SceneError::Prefab(format!(
                "prefab {:?} declares behavior {:?} twice",
                self.name,
                behavior.name()
            )));
        }
        self.behaviors.push(behavior);
        Ok(())
    }

    pub fn behaviors(&self) -> &[Behavior] {
        &self.behaviors
    }

    /// Tune a behavior template; later instances pick up the change.
    pub fn behavior_mut(&mut self, name: &str) -> Option<&mut Behavior> {
        self.behaviors.iter_mut().find(|b| b.name() == name)
    }

    fn from_decl(decl: Decl<'_>, index: usize, pool: &mut BehaviorPool) -> SceneResult<Self> {
        let name = decl.str_or("name", "");
        if name.is_empty() {
            return Err(SceneError::Prefab(format!("prefab #{index} has no name")));
        }
        let mut template = ObjectTemplate::new(name);
        template.position = decl.vec2_or("position", Vec2::ZERO);
        template.velocity = decl.vec2_or("velocity", Vec2::ZERO);
        template.health = decl
            .get("health")
            .and_then(Value::as_f64)
            .map(|h| h as f32)
            .filter(|h| h.is_finite() && *h > 0.0);
        template.metadata = decl
            .string_map("metadata")
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        for node in decl.children("behaviors") {
            if let Some(behavior) = Behavior::from_decl(node, pool) {
                template.push_behavior(behavior)?;
            }
        }
        Ok(template)
    }

    /// The bare game object at `position`, moving at `velocity`.
    pub fn build(&self, position: Vec2, velocity: Vec2) -> GameObject {
        let mut builder = GameObjectBuilder::new(self.name.as_str())
            .position(position)
            .velocity(velocity);
        if let Some(max) = self.health {
            builder = builder.health(max);
        }
        for (key, value) in &self.metadata {
            builder = builder.metadata(key.as_str(), value.as_str());
        }
        builder.build()
    }
}

// ── PrefabRegistry ────────────────────────────────────────────────────────────

/// Object templates addressed by name or dense [`PrefabId`], plus named
/// action prototypes.
#[derive(Default)]
pub struct PrefabRegistry {
    templates: Vec<ObjectTemplate>,
    by_name:   FxHashMap<String, PrefabId>,
    actions:   Prototypes<Action>,
}

impl PrefabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a prefab file.
    pub fn load(path: &Path) -> SceneResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Like [`load`](Self::load) but accepts any `Read` source.
    pub fn from_reader<R: Read>(reader: R) -> SceneResult<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> SceneResult<Self> {
        if !value.is_object() {
            return Err(SceneError::Prefab("expected a JSON object at the top level".into()));
        }
        let root = Decl::new(value);
        let mut registry = Self::new();

        // Templates are owned by the registry for its whole life, so they
        // are drawn from throwaway pools.
        let mut behaviors = BehaviorPool::new();
        for (i, node) in root.children("prefabs").enumerate() {
            let template = ObjectTemplate::from_decl(node, i, &mut behaviors)?;
            registry.insert(template)?;
        }

        let mut actions = ActionPool::new();
        for (i, node) in root.children("actions").enumerate() {
            let name = node.str_or("name", "");
            if name.is_empty() {
                return Err(SceneError::Prefab(format!("action prototype #{i} has no name")));
            }
            if let Some(action) = Action::from_decl(node, &mut actions) {
                registry.register_action(name, action);
            }
        }

        tracing::debug!(
            prefabs = registry.len(),
            actions = registry.actions.len(),
            "prefab registry loaded"
        );
        Ok(registry)
    }

    /// Add `template` and return its id.  Names are unique.
    pub fn insert(&mut self, template: ObjectTemplate) -> SceneResult<PrefabId> {
        if self.by_name.contains_key(&template.name) {
            return Err(SceneError::Prefab(format!("duplicate prefab {:?}", template.name)));
        }
        let id = PrefabId(self.templates.len() as u32);
        self.by_name.insert(template.name.clone(), id);
        self.templates.push(template);
        Ok(id)
    }

    /// Register a named action prototype, returning the one it replaced.
    pub fn register_action(&mut self, name: impl Into<String>, action: Action) -> Option<Action> {
        self.actions.register(name, action)
    }

    pub fn actions(&self) -> &Prototypes<Action> {
        &self.actions
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn id(&self, name: &str) -> Option<PrefabId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: PrefabId) -> Option<&ObjectTemplate> {
        self.templates.get(id.index())
    }

    pub fn template(&self, name: &str) -> Option<&ObjectTemplate> {
        self.id(name).and_then(|id| self.get(id))
    }

    pub fn template_mut(&mut self, name: &str) -> Option<&mut ObjectTemplate> {
        let id = self.id(name)?;
        self.templates.get_mut(id.index())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Prefab names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    // ── Instantiation ─────────────────────────────────────────────────────

    /// Spawn prefab `id` into `world` and build its behavior component.
    ///
    /// The component is returned uninitialized; the caller installs it and
    /// runs `initialize_all`.
    pub(crate) fn instantiate(
        &self,
        id:       PrefabId,
        position: Vec2,
        velocity: Vec2,
        world:    &mut World,
        pool:     &mut BehaviorPool,
    ) -> Option<(ObjectId, BehaviorComponent)> {
        let template = self.get(id)?;
        let object = world.spawn(template.build(position, velocity));
        let mut component = BehaviorComponent::new(object);
        for behavior in &template.behaviors {
            if let Err(BehaviorError::DuplicateName { rejected, .. }) =
                component.add_behavior(pool.instantiate(behavior))
            {
                pool.release(*rejected);
            }
        }
        Some((object, component))
    }
}

impl fmt::Debug for PrefabRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefabRegistry")
            .field("prefabs", &self.names().collect::<Vec<_>>())
            .field("actions", &self.actions.names().collect::<Vec<_>>())
            .finish()
    }
}
