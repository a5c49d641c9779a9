//! `Action` — lifecycle state plus one closed-set payload.

use gf_core::{Decl, ObjectId};
use gf_pool::{Pool, PoolTag, PoolVariant, Poolable};
use strum::{EnumString, IntoStaticStr, VariantArray};

use crate::composite::{copy_children, deserialize_children, release_children};
use crate::{
    ActionContext, ActionState, DamageAction, DestroyAction, EmitParticleAction, MoveAction,
    ParallelAction, SequenceAction, SpawnAction, WaitAction,
};

/// Pool of recycled actions, one free list per [`ActionTag`].
pub type ActionPool = Pool<Action>;

// ── Tag ───────────────────────────────────────────────────────────────────────

/// Discriminator of [`ActionKind`].  Parses from the `"kind"` field of a
/// declarative node (`"emit_particle"`, `"sequence"`, …).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, EnumString, IntoStaticStr, VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum ActionTag {
    Move,
    Damage,
    Spawn,
    EmitParticle,
    Destroy,
    Wait,
    Sequence,
    Parallel,
}

impl ActionTag {
    pub fn is_composite(self) -> bool {
        matches!(self, ActionTag::Sequence | ActionTag::Parallel)
    }
}

impl PoolTag for ActionTag {
    const ALL: &'static [Self] = Self::VARIANTS;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        self.into()
    }
}

// ── Kind ──────────────────────────────────────────────────────────────────────

/// The payload of an action.  One variant per concrete kind.
#[derive(Debug, PartialEq)]
pub enum ActionKind {
    Move(MoveAction),
    Damage(DamageAction),
    Spawn(SpawnAction),
    EmitParticle(EmitParticleAction),
    Destroy(DestroyAction),
    Wait(WaitAction),
    Sequence(SequenceAction),
    Parallel(ParallelAction),
}

impl ActionKind {
    fn fresh(tag: ActionTag) -> Self {
        match tag {
            ActionTag::Move => ActionKind::Move(MoveAction::default()),
            ActionTag::Damage => ActionKind::Damage(DamageAction::default()),
            ActionTag::Spawn => ActionKind::Spawn(SpawnAction::default()),
            ActionTag::EmitParticle => ActionKind::EmitParticle(EmitParticleAction::default()),
            ActionTag::Destroy => ActionKind::Destroy(DestroyAction),
            ActionTag::Wait => ActionKind::Wait(WaitAction::default()),
            ActionTag::Sequence => ActionKind::Sequence(SequenceAction::default()),
            ActionTag::Parallel => ActionKind::Parallel(ParallelAction::default()),
        }
    }

    pub fn tag(&self) -> ActionTag {
        match self {
            ActionKind::Move(_) => ActionTag::Move,
            ActionKind::Damage(_) => ActionTag::Damage,
            ActionKind::Spawn(_) => ActionTag::Spawn,
            ActionKind::EmitParticle(_) => ActionTag::EmitParticle,
            ActionKind::Destroy(_) => ActionTag::Destroy,
            ActionKind::Wait(_) => ActionTag::Wait,
            ActionKind::Sequence(_) => ActionTag::Sequence,
            ActionKind::Parallel(_) => ActionTag::Parallel,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Action>> {
        match self {
            ActionKind::Sequence(s) => Some(&mut s.children),
            ActionKind::Parallel(p) => Some(&mut p.children),
            _ => None,
        }
    }
}

/// Typed access to one payload, so callers can write
/// `Action::draw(pool, |d: &mut DamageAction| d.amount = 10.0)`.
pub trait ActionVariant: PoolVariant<Action> + Sized {
    fn payload(kind: &ActionKind) -> Option<&Self>;
    fn payload_mut(kind: &mut ActionKind) -> Option<&mut Self>;
}

macro_rules! action_variants {
    ($($variant:ident => $ty:ty),* $(,)?) => {$(
        impl PoolVariant<Action> for $ty {
            const TAG: ActionTag = ActionTag::$variant;
        }

        impl ActionVariant for $ty {
            #[inline]
            fn payload(kind: &ActionKind) -> Option<&Self> {
                match kind {
                    ActionKind::$variant(p) => Some(p),
                    _ => None,
                }
            }

            #[inline]
            fn payload_mut(kind: &mut ActionKind) -> Option<&mut Self> {
                match kind {
                    ActionKind::$variant(p) => Some(p),
                    _ => None,
                }
            }
        }
    )*};
}

action_variants! {
    Move         => MoveAction,
    Damage       => DamageAction,
    Spawn        => SpawnAction,
    EmitParticle => EmitParticleAction,
    Destroy      => DestroyAction,
    Wait         => WaitAction,
    Sequence     => SequenceAction,
    Parallel     => ParallelAction,
}

// ── Action ────────────────────────────────────────────────────────────────────

/// One schedulable unit of work.
#[derive(Debug, PartialEq)]
pub struct Action {
    state: ActionState,
    kind:  ActionKind,
}

impl Action {
    /// A freshly constructed, not-yet-initialized action of kind `tag`.
    /// Prefer drawing from an [`ActionPool`].
    pub fn new(tag: ActionTag) -> Self {
        Self { state: ActionState::default(), kind: ActionKind::fresh(tag) }
    }

    /// Draw a `V` from `pool` and configure its payload.
    pub fn draw<V: ActionVariant>(pool: &mut ActionPool, configure: impl FnOnce(&mut V)) -> Self {
        let mut action = pool.get::<V>();
        if let Some(payload) = V::payload_mut(&mut action.kind) {
            configure(payload);
        }
        action
    }

    /// Draw a Sequence owning `children` in order.
    pub fn sequence(pool: &mut ActionPool, children: impl IntoIterator<Item = Action>) -> Self {
        let mut action = pool.get::<SequenceAction>();
        for child in children {
            action.push_child(child);
        }
        action
    }

    /// Draw a Parallel owning `children`.
    pub fn parallel(pool: &mut ActionPool, children: impl IntoIterator<Item = Action>) -> Self {
        let mut action = pool.get::<ParallelAction>();
        for child in children {
            action.push_child(child);
        }
        action
    }

    /// Build any kind (composites included) from a declarative node.
    ///
    /// Returns `None`, with a warning, when `"kind"` is missing or unknown.
    /// Every other field falls back to its default.
    pub fn from_decl(decl: Decl<'_>, pool: &mut ActionPool) -> Option<Self> {
        let Some(kind) = decl.kind() else {
            tracing::warn!("action node without a kind; skipped");
            return None;
        };
        let Ok(tag) = kind.parse::<ActionTag>() else {
            tracing::warn!(kind, "unknown action kind; skipped");
            return None;
        };
        let mut action = pool.get_kind(tag);
        action.deserialize(decl, pool);
        Some(action)
    }

    /// Populate configuration fields from `decl`.  Never fails.
    pub fn deserialize(&mut self, decl: Decl<'_>, pool: &mut ActionPool) {
        match &mut self.kind {
            ActionKind::Move(m) => m.deserialize(decl),
            ActionKind::Damage(d) => d.deserialize(decl),
            ActionKind::Spawn(s) => s.deserialize(decl),
            ActionKind::EmitParticle(e) => e.deserialize(decl),
            ActionKind::Destroy(_) => {}
            ActionKind::Wait(w) => w.deserialize(decl),
            ActionKind::Sequence(s) => deserialize_children(decl, &mut s.children, pool),
            ActionKind::Parallel(p) => deserialize_children(decl, &mut p.children, pool),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Start a run: clears `finished`/`destroyed` and per-run progress.
    /// Composites initialize every child.
    pub fn initialize(&mut self) {
        self.state.begin();
        match &mut self.kind {
            ActionKind::Move(m) => m.begin(),
            ActionKind::Wait(w) => w.begin(),
            ActionKind::Sequence(SequenceAction { children })
            | ActionKind::Parallel(ParallelAction { children, .. }) => {
                children.iter_mut().for_each(Action::initialize);
            }
            ActionKind::Damage(_)
            | ActionKind::Spawn(_)
            | ActionKind::EmitParticle(_)
            | ActionKind::Destroy(_) => {}
        }
    }

    /// Advance one tick.
    ///
    /// An action that is already finished escalates to destroyed instead of
    /// doing work, so the scheduler reclaims it.  A paused action does
    /// nothing.
    pub fn update(&mut self, ctx: &mut ActionContext<'_>) {
        self.state.count_update();
        if self.state.is_finished() {
            if self.state.set_destroyed() {
                tracing::trace!(kind = self.tag().name(), "finished action updated; destroyed");
            }
            return;
        }
        if self.state.is_paused() {
            return;
        }

        let parent = self.state.parent();
        let target = self.state.target();
        let done = match &mut self.kind {
            ActionKind::Move(m) => m.run(target, ctx),
            ActionKind::Damage(d) => d.run(target, ctx),
            ActionKind::Spawn(s) => s.run(parent, target, ctx),
            ActionKind::EmitParticle(e) => e.run(target, ctx),
            ActionKind::Destroy(d) => d.run(target, ctx),
            ActionKind::Wait(w) => w.run(ctx),
            ActionKind::Sequence(s) => s.run(ctx),
            ActionKind::Parallel(p) => p.run(ctx),
        };
        if done && self.state.set_finished() {
            tracing::trace!(kind = self.tag().name(), ?target, "action finished");
        }
    }

    /// Cancel: sets `destroyed` (and therefore `finished`).  Returns `true`
    /// the first time in a run.
    pub fn destroy(&mut self) -> bool {
        self.state.set_destroyed()
    }

    pub fn pause(&mut self) {
        self.state.set_paused(true);
    }

    pub fn resume(&mut self) {
        self.state.set_paused(false);
    }

    /// Stamp the issuing owner.  Composites forward a changed value to every
    /// child; repeating the current value does nothing.
    pub fn set_parent(&mut self, parent: Option<ObjectId>) {
        if self.state.replace_parent(parent) {
            if let Some(children) = self.kind.children_mut() {
                children.iter_mut().for_each(|c| c.set_parent(parent));
            }
        }
    }

    /// Stamp the object acted upon.  Same propagation rule as `set_parent`.
    pub fn set_target(&mut self, target: Option<ObjectId>) {
        if self.state.replace_target(target) {
            if let Some(children) = self.kind.children_mut() {
                children.iter_mut().for_each(|c| c.set_target(target));
            }
        }
    }

    /// Append a child to a composite.  Whichever of parent and target the
    /// composite already has is stamped onto the child.  A child added to a
    /// running composite is initialized on the spot.
    ///
    /// # Panics
    ///
    /// Panics if `self` is a leaf.
    pub fn push_child(&mut self, mut child: Action) {
        let running = !self.state.is_finished();
        let tag = self.tag();
        let (parent, target) = (self.parent(), self.target());
        let Some(children) = self.kind.children_mut() else {
            panic!("push_child: {} is not a composite", tag.name());
        };
        if parent.is_some() {
            child.set_parent(parent);
        }
        if target.is_some() {
            child.set_target(target);
        }
        if running {
            child.initialize();
        }
        children.push(child);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn tag(&self) -> ActionTag {
        self.kind.tag()
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ActionKind {
        &mut self.kind
    }

    pub fn payload<V: ActionVariant>(&self) -> Option<&V> {
        V::payload(&self.kind)
    }

    pub fn payload_mut<V: ActionVariant>(&mut self) -> Option<&mut V> {
        V::payload_mut(&mut self.kind)
    }

    pub fn state(&self) -> &ActionState {
        &self.state
    }

    /// Children of a composite; empty for leaves.
    pub fn children(&self) -> &[Action] {
        match &self.kind {
            ActionKind::Sequence(s) => s.children(),
            ActionKind::Parallel(p) => p.children(),
            _ => &[],
        }
    }

    /// Mutable view of a composite's children.  The list itself cannot grow
    /// or shrink through it; use [`push_child`](Self::push_child).
    pub fn children_mut(&mut self) -> &mut [Action] {
        match self.kind.children_mut() {
            Some(children) => children.as_mut_slice(),
            None => &mut [],
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.state.is_destroyed()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    #[inline]
    pub fn parent(&self) -> Option<ObjectId> {
        self.state.parent()
    }

    #[inline]
    pub fn target(&self) -> Option<ObjectId> {
        self.state.target()
    }

    /// `update` calls since the last `initialize`.
    #[inline]
    pub fn updates(&self) -> u32 {
        self.state.updates()
    }
}

// ── Pool integration ──────────────────────────────────────────────────────────

impl Poolable for Action {
    type Tag = ActionTag;

    fn construct(tag: ActionTag) -> Self {
        Action::new(tag)
    }

    fn tag(&self) -> ActionTag {
        self.kind.tag()
    }

    fn reallocate(&mut self, pool: &mut ActionPool) {
        self.state.reset();
        match &mut self.kind {
            ActionKind::Move(m) => m.reset(),
            ActionKind::Damage(d) => d.reset(),
            ActionKind::Spawn(s) => s.reset(),
            ActionKind::EmitParticle(e) => e.reset(),
            ActionKind::Destroy(_) => {}
            ActionKind::Wait(w) => w.reset(),
            ActionKind::Sequence(SequenceAction { children })
            | ActionKind::Parallel(ParallelAction { children, .. }) => release_children(children, pool),
        }
    }

    fn copy_config(&self, dst: &mut Self, pool: &mut ActionPool) {
        match (&self.kind, &mut dst.kind) {
            (ActionKind::Move(s), ActionKind::Move(d)) => s.copy_config(d),
            (ActionKind::Damage(s), ActionKind::Damage(d)) => s.copy_config(d),
            (ActionKind::Spawn(s), ActionKind::Spawn(d)) => s.copy_config(d),
            (ActionKind::EmitParticle(s), ActionKind::EmitParticle(d)) => s.copy_config(d),
            (ActionKind::Destroy(_), ActionKind::Destroy(_)) => {}
            (ActionKind::Wait(s), ActionKind::Wait(d)) => s.copy_config(d),
            (ActionKind::Sequence(s), ActionKind::Sequence(d)) => {
                copy_children(&s.children, &mut d.children, pool)
            }
            (ActionKind::Parallel(s), ActionKind::Parallel(d)) => {
                copy_children(&s.children, &mut d.children, pool)
            }
            (src, dst) => unreachable!(
                "copy_config: {} into {} passed the pool's variant check",
                src.tag().name(),
                dst.tag().name(),
            ),
        }
    }
}
